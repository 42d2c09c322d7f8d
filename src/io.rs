use log::{info, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{AnnotatorError, Result};
use crate::labels::format_pose_records;
use crate::types::{PoseRecord, WorkItem};
use crate::utils::ensure_directory;

// Struct to hold the paths to the output image and label directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    pub images_dir: PathBuf,
    pub labels_dir: PathBuf,
}

impl OutputDirs {
    pub fn new(output_root: &Path) -> Self {
        Self {
            images_dir: output_root.join("images"),
            labels_dir: output_root.join("labels"),
        }
    }
}

/// Set up the directory structure for the pose dataset output.
///
/// Existing output is kept, so an interrupted run can be resumed.
pub fn setup_output_directories(output_root: &Path) -> Result<OutputDirs> {
    let dirs = OutputDirs::new(output_root);
    ensure_directory(&dirs.images_dir)?;
    ensure_directory(&dirs.labels_dir)?;
    Ok(dirs)
}

// Join a directory with the file name of `source`
fn output_path(dir: &Path, source: &Path) -> Result<PathBuf> {
    source
        .file_name()
        .map(|name| dir.join(name))
        .ok_or_else(|| AnnotatorError::MissingFileName(source.to_path_buf()))
}

/// Target paths of the copied image and of the pose label file
pub fn output_paths(item: &WorkItem, dirs: &OutputDirs) -> Result<(PathBuf, PathBuf)> {
    Ok((
        output_path(&dirs.images_dir, &item.image_path)?,
        output_path(&dirs.labels_dir, &item.label_path)?,
    ))
}

/// Whether either output file of an item is already present
pub fn outputs_exist(item: &WorkItem, dirs: &OutputDirs) -> Result<bool> {
    let (image_output_path, label_output_path) = output_paths(item, dirs)?;
    Ok(image_output_path.is_file() || label_output_path.is_file())
}

/// Copy the image and write the pose label file for one item
pub fn save_item(item: &WorkItem, records: &[PoseRecord], dirs: &OutputDirs) -> Result<()> {
    ensure_directory(&dirs.images_dir)?;
    ensure_directory(&dirs.labels_dir)?;
    let (image_output_path, label_output_path) = output_paths(item, dirs)?;

    info!("Saving image at path {}", image_output_path.display());
    fs::copy(&item.image_path, &image_output_path)
        .map_err(|e| AnnotatorError::io(&image_output_path, e))?;

    info!("Saving label at path {}", label_output_path.display());
    if let Err(e) = write_label_file(&label_output_path, records) {
        // A lone image would mark the item as done on the next run
        if let Err(cleanup) = fs::remove_file(&image_output_path) {
            warn!(
                "Failed to remove {} after label write error: {}",
                image_output_path.display(),
                cleanup
            );
        }
        return Err(e);
    }

    Ok(())
}

fn write_label_file(path: &Path, records: &[PoseRecord]) -> Result<()> {
    let file = File::create(path).map_err(|e| AnnotatorError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let written = writer
        .write_all(format_pose_records(records).as_bytes())
        .and_then(|_| writer.flush());
    if let Err(e) = written {
        drop(writer);
        let _ = fs::remove_file(path);
        return Err(AnnotatorError::io(path, e));
    }
    Ok(())
}
