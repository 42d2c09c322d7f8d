use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{AnnotatorError, Result};

/// File name without directory and extension, used to pair images with labels
pub fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

/// Dataset split a file belongs to: `<root>/<subfolder>/images/<file>` yields `subfolder`
pub fn dataset_subfolder(path: &Path) -> Result<String> {
    let parts: Vec<_> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();
    if parts.len() < 3 {
        return Err(AnnotatorError::InvalidDatasetPath(path.to_path_buf()));
    }
    Ok(parts[parts.len() - 3].to_string_lossy().into_owned())
}

/// List the regular files directly inside a directory, sorted by path
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| AnnotatorError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| AnnotatorError::io(dir, e))?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}}",
                label
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Create a directory (and its parents) if it is not there yet, keeping existing content
pub fn ensure_directory(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        log::debug!("Creating directory {}", path.display());
        fs::create_dir_all(path).map_err(|e| AnnotatorError::io(path, e))?;
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_subfolder() {
        let path = Path::new("/data/cones/train/images/img_001.png");
        assert_eq!(dataset_subfolder(path).unwrap(), "train");

        let relative = Path::new("val/images/img_002.jpg");
        assert_eq!(dataset_subfolder(relative).unwrap(), "val");

        assert!(dataset_subfolder(Path::new("images/img_003.jpg")).is_err());
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(
            file_stem(Path::new("/a/b/frame_10.jpg")).as_deref(),
            Some("frame_10")
        );
        assert_eq!(
            file_stem(Path::new("labels/frame.10.txt")).as_deref(),
            Some("frame.10")
        );
    }

    #[test]
    fn test_list_files_skips_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "").unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();

        let files = list_files(temp_dir.path()).unwrap();
        assert_eq!(
            files,
            vec![temp_dir.path().join("a.txt"), temp_dir.path().join("b.txt")]
        );

        assert!(list_files(&temp_dir.path().join("missing")).is_err());
    }
}
