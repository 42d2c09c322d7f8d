use log::{debug, warn};
use std::fs;

use crate::error::{AnnotatorError, Result};
use crate::geometry::{crop_region, extract_crop, map_to_image};
use crate::labels::parse_labels;
use crate::prompt::{PointPrompt, PromptOutcome};
use crate::types::{AnnotationStats, PoseRecord, WorkItem};

/// Collect keypoints for every box of one work item.
///
/// Each valid label line is cropped with a margin, shown through `prompt`, and
/// the clicks are mapped back to normalized image coordinates. Records come
/// back in label file order. Returns `Ok(None)` if the annotator cancelled.
/// Skipped lines and boxes are added to `stats` only when the item completes.
pub fn annotate_item<P>(
    item: &WorkItem,
    prompt: &mut P,
    stats: &mut AnnotationStats,
) -> Result<Option<Vec<PoseRecord>>>
where
    P: PointPrompt + ?Sized,
{
    let image = image::open(&item.image_path)
        .map_err(|source| AnnotatorError::ImageLoad {
            path: item.image_path.clone(),
            source,
        })?
        .to_rgb8();
    let (width, height) = image.dimensions();

    let content =
        fs::read_to_string(&item.label_path).map_err(|e| AnnotatorError::io(&item.label_path, e))?;
    let (boxes, skipped_malformed) = parse_labels(&content);
    let mut skipped_degenerate = 0;

    let file_name = item
        .image_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut records = Vec::with_capacity(boxes.len());
    for (index, bbox) in boxes.iter().enumerate() {
        let Some(region) = crop_region(bbox, width, height) else {
            warn!(
                "Box {} of {} lies outside the {}x{} image, skipping it",
                index + 1,
                item.label_path.display(),
                width,
                height
            );
            skipped_degenerate += 1;
            continue;
        };

        let crop = extract_crop(&image, region);
        let caption = format!("{} [{}] box {}/{}", file_name, item.subfolder, index + 1, boxes.len());
        let clicks = match prompt.collect_points(&crop.image, &caption)? {
            PromptOutcome::Points(clicks) => clicks,
            PromptOutcome::Cancelled => return Ok(None),
        };

        let keypoints = clicks.map(|click| map_to_image(click, crop.region, width, height));
        debug!("Annotated {}: {:?}", caption, keypoints);
        records.push(PoseRecord::new(*bbox, keypoints));
    }

    stats.add_malformed(skipped_malformed);
    stats.add_degenerate(skipped_degenerate);
    Ok(Some(records))
}
