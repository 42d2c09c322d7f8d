use clap::Parser;
use std::path::PathBuf;

/// Pixels added around every bounding box before cropping
pub const CROP_MARGIN_PX: u32 = 15;

/// Side length of the square crop shown to the annotator
pub const DISPLAY_SIZE: u32 = 256;

/// Number of keypoints collected per bounding box
pub const KEYPOINT_COUNT: usize = 3;

/// Keypoint names, in the order they are clicked and serialized
pub const KEYPOINT_NAMES: [&str; KEYPOINT_COUNT] = ["top", "left", "right"];

/// Refresh rate of the annotation window while waiting for clicks
pub const WINDOW_TARGET_FPS: usize = 60;

/// Command-line arguments for annotating a YOLO detection dataset with keypoints.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// The input YOLO coco-like dataset
    #[arg(long = "input_dataset", value_parser = validate_dataset_dir)]
    pub input_dataset: PathBuf,

    /// The path where you want to put your YOLO pose dataset
    #[arg(long = "output_dataset")]
    pub output_dataset: PathBuf,
}

// Validate that the input dataset is an existing directory
fn validate_dataset_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("{} is not an existing directory", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dataset_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().to_str().unwrap();
        assert!(validate_dataset_dir(dir).is_ok());

        let missing = temp_dir.path().join("missing");
        assert!(validate_dataset_dir(missing.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_both_flags_required() {
        assert!(Args::try_parse_from(["pose-annotator", "--output_dataset", "out"]).is_err());

        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().to_str().unwrap();
        assert!(Args::try_parse_from(["pose-annotator", "--input_dataset", input]).is_err());

        let args =
            Args::try_parse_from(["pose-annotator", "--input_dataset", input, "--output_dataset", "out"])
                .unwrap();
        assert_eq!(args.output_dataset, PathBuf::from("out"));
    }
}
