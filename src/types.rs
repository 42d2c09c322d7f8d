use std::path::PathBuf;

use crate::config::KEYPOINT_COUNT;
use crate::error::Result;
use crate::utils::dataset_subfolder;

// One image/label pair waiting to be annotated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub image_path: PathBuf,
    pub label_path: PathBuf,
    pub subfolder: String,
}

impl WorkItem {
    /// Build a work item, deriving the dataset subfolder from the image path
    pub fn new(image_path: PathBuf, label_path: PathBuf) -> Result<Self> {
        let subfolder = dataset_subfolder(&image_path)?;
        Ok(Self {
            image_path,
            label_path,
            subfolder,
        })
    }
}

// A YOLO bounding box, every coordinate normalized to the image size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub class_id: u32,
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

impl BoundingBox {
    pub fn new(class_id: u32, cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self {
            class_id,
            cx,
            cy,
            w,
            h,
        }
    }

    /// Corners of the box in pixels as (x_min, y_min, x_max, y_max)
    pub fn to_pixels(&self, image_width: u32, image_height: u32) -> (f64, f64, f64, f64) {
        let (iw, ih) = (image_width as f64, image_height as f64);
        (
            (self.cx - self.w / 2.0) * iw,
            (self.cy - self.h / 2.0) * ih,
            (self.cx + self.w / 2.0) * iw,
            (self.cy + self.h / 2.0) * ih,
        )
    }
}

// A keypoint normalized to the original image size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
}

impl Keypoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// A bounding box extended with its keypoints, in top, left, right order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseRecord {
    pub bbox: BoundingBox,
    pub keypoints: [Keypoint; KEYPOINT_COUNT],
}

impl PoseRecord {
    pub fn new(bbox: BoundingBox, keypoints: [Keypoint; KEYPOINT_COUNT]) -> Self {
        Self { bbox, keypoints }
    }

    pub fn top(&self) -> Keypoint {
        self.keypoints[0]
    }

    pub fn left(&self) -> Keypoint {
        self.keypoints[1]
    }

    pub fn right(&self) -> Keypoint {
        self.keypoints[2]
    }
}

// Struct to hold annotation statistics for one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnnotationStats {
    pub items_saved: usize,
    pub boxes_annotated: usize,
    pub skipped_malformed_lines: usize,
    pub skipped_degenerate_boxes: usize,
}

impl AnnotationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_saved(&mut self) {
        self.items_saved += 1;
    }

    pub fn add_annotated(&mut self, count: usize) {
        self.boxes_annotated += count;
    }

    pub fn add_malformed(&mut self, count: usize) {
        self.skipped_malformed_lines += count;
    }

    pub fn add_degenerate(&mut self, count: usize) {
        self.skipped_degenerate_boxes += count;
    }

    /// Fold the tally of one saved item into the run totals
    pub fn merge(&mut self, other: &AnnotationStats) {
        self.items_saved += other.items_saved;
        self.boxes_annotated += other.boxes_annotated;
        self.skipped_malformed_lines += other.skipped_malformed_lines;
        self.skipped_degenerate_boxes += other.skipped_degenerate_boxes;
    }

    pub fn print_summary(&self) {
        log::info!("=== Annotation Summary ===");
        log::info!("Items saved: {}", self.items_saved);
        log::info!("Boxes annotated: {}", self.boxes_annotated);

        let total_skipped = self.skipped_malformed_lines + self.skipped_degenerate_boxes;
        if total_skipped > 0 {
            log::warn!(
                "Total skipped boxes: {} (malformed label line: {}, empty crop: {})",
                total_skipped,
                self.skipped_malformed_lines,
                self.skipped_degenerate_boxes
            );
        }
    }
}
