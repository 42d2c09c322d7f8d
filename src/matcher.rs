use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::utils::file_stem;

// Map stem -> path, keeping the first path in sorted order when stems collide
fn index_by_stem(paths: &[PathBuf], kind: &str) -> BTreeMap<String, PathBuf> {
    let mut sorted: Vec<&PathBuf> = paths.iter().collect();
    sorted.sort();

    let mut by_stem = BTreeMap::new();
    for path in sorted {
        let Some(stem) = file_stem(path) else {
            continue;
        };
        if let Some(kept) = by_stem.get(&stem) {
            warn!(
                "Duplicate {} stem '{}': keeping {:?}, ignoring {:?}",
                kind, stem, kept, path
            );
            continue;
        }
        by_stem.insert(stem, path.clone());
    }
    by_stem
}

/// Pair image files with label files that share a file stem.
///
/// Unmatched files on either side are dropped. When several files in one
/// collection share a stem, the first one in path order is used. The pairs
/// are returned ordered by stem.
pub fn match_images_labels(
    image_paths: &[PathBuf],
    label_paths: &[PathBuf],
) -> Vec<(PathBuf, PathBuf)> {
    let images = index_by_stem(image_paths, "image");
    let mut labels = index_by_stem(label_paths, "label");

    let mut matched = Vec::with_capacity(images.len().min(labels.len()));
    for (stem, image_path) in images {
        match labels.remove(&stem) {
            Some(label_path) => matched.push((image_path, label_path)),
            None => debug!("No label for image {:?}", image_path),
        }
    }
    for label_path in labels.values() {
        debug!("No image for label {:?}", label_path);
    }

    matched
}
