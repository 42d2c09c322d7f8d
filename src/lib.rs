//! YOLO detection to YOLO pose dataset annotator
//!
//! This library pairs images with YOLO box labels, shows a padded crop of every
//! box, collects three keypoint clicks (top, left, right) and writes pose labels.

pub mod annotate;
pub mod config;
pub mod dataset;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod io;
pub mod labels;
pub mod matcher;
pub mod prompt;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use annotate::annotate_item;
pub use config::Args;
pub use dataset::{discover_subfolders, index_dataset, WorkQueue};
pub use driver::{Annotator, DriverState, Step};
pub use error::{AnnotatorError, Result};
pub use io::{save_item, setup_output_directories, OutputDirs};
pub use labels::{format_pose_record, format_pose_records, parse_label_line, parse_labels};
pub use matcher::match_images_labels;
pub use prompt::{PointPrompt, PromptOutcome, WindowPrompt};
pub use types::{AnnotationStats, BoundingBox, Keypoint, PoseRecord, WorkItem};
