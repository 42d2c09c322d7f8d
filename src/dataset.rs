use log::{info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{AnnotatorError, Result};
use crate::io::{output_paths, outputs_exist, OutputDirs};
use crate::matcher::match_images_labels;
use crate::types::WorkItem;
use crate::utils::list_files;

/// Work items of a run: an arena of items plus the indices still pending.
#[derive(Debug, Default, Clone)]
pub struct WorkQueue {
    items: Vec<WorkItem>,
    pending: Vec<usize>,
}

impl WorkQueue {
    pub fn new(items: Vec<WorkItem>) -> Self {
        let pending = (0..items.len()).collect();
        Self { items, pending }
    }

    /// Index of the item to process next (the last pending one)
    pub fn next_pending(&self) -> Option<usize> {
        self.pending.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<&WorkItem> {
        self.items.get(index)
    }

    /// Remove an item from the pending list once its output is saved
    pub fn complete(&mut self, index: usize) {
        self.pending.retain(|&pending| pending != index);
    }

    pub fn pending_items(&self) -> impl Iterator<Item = &WorkItem> + '_ {
        self.pending.iter().map(move |&index| &self.items[index])
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Every directory directly under the input dataset root, sorted by name
pub fn discover_subfolders(input_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(input_dir).map_err(|e| AnnotatorError::io(input_dir, e))?;
    let mut subfolders = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| AnnotatorError::io(input_dir, e))?.path();
        if path.is_dir() {
            if let Some(name) = path.file_name() {
                subfolders.push(name.to_string_lossy().into_owned());
            }
        }
    }
    subfolders.sort();
    Ok(subfolders)
}

/// Build the queue of items that still need annotation.
///
/// Each subfolder must contain `images/` and `labels/`. Items whose output
/// image or label already exists are left out, so re-running after a partial
/// run only queues the remaining work.
pub fn index_dataset(
    input_dir: &Path,
    subfolders: &[String],
    output_dirs: &OutputDirs,
) -> Result<WorkQueue> {
    let mut inputs = Vec::new();
    for subfolder in subfolders {
        let folder_path = input_dir.join(subfolder);
        let image_paths = list_files(&folder_path.join("images"))?;
        let label_paths = list_files(&folder_path.join("labels"))?;

        let matched = match_images_labels(&image_paths, &label_paths);
        info!("Subfolder {}: {} matched image/label pairs", subfolder, matched.len());
        for (image_path, label_path) in matched {
            inputs.push(WorkItem::new(image_path, label_path)?);
        }
    }

    let total = inputs.len();
    let mut claimed = HashSet::new();
    let mut already_done = 0;
    let mut pending = Vec::with_capacity(total);
    for item in inputs {
        if outputs_exist(&item, output_dirs)? {
            already_done += 1;
            continue;
        }
        let (image_output_path, label_output_path) = output_paths(&item, output_dirs)?;
        if !claimed.insert(image_output_path) || !claimed.insert(label_output_path) {
            warn!(
                "Skipping {}: another subfolder already writes an output with the same name",
                item.image_path.display()
            );
            continue;
        }
        pending.push(item);
    }

    info!(
        "Indexed {} items, {} already annotated, {} pending",
        total,
        already_done,
        pending.len()
    );
    Ok(WorkQueue::new(pending))
}
