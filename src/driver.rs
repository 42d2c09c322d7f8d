use log::info;

use crate::annotate::annotate_item;
use crate::dataset::WorkQueue;
use crate::error::Result;
use crate::io::{save_item, OutputDirs};
use crate::prompt::PointPrompt;
use crate::types::AnnotationStats;
use crate::utils::create_progress_bar;

/// Whether any work is left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Pending,
    Done,
}

/// Result of a single driver step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The item at this queue index was annotated and saved
    Saved(usize),
    /// The annotator cancelled; the current item stays pending
    Cancelled,
    /// Nothing left to do
    Done,
}

/// Drives the annotation of a work queue, one item at a time.
pub struct Annotator<P: PointPrompt> {
    queue: WorkQueue,
    output_dirs: OutputDirs,
    prompt: P,
    stats: AnnotationStats,
}

impl<P: PointPrompt> Annotator<P> {
    pub fn new(queue: WorkQueue, output_dirs: OutputDirs, prompt: P) -> Self {
        Self {
            queue,
            output_dirs,
            prompt,
            stats: AnnotationStats::new(),
        }
    }

    pub fn state(&self) -> DriverState {
        if self.queue.is_empty() {
            DriverState::Done
        } else {
            DriverState::Pending
        }
    }

    pub fn queue(&self) -> &WorkQueue {
        &self.queue
    }

    pub fn stats(&self) -> &AnnotationStats {
        &self.stats
    }

    /// Annotate and save the last pending item
    pub fn step(&mut self) -> Result<Step> {
        let Some(index) = self.queue.next_pending() else {
            return Ok(Step::Done);
        };
        let Some(item) = self.queue.get(index) else {
            return Ok(Step::Done);
        };

        info!("Annotating {}", item.image_path.display());
        let mut item_stats = AnnotationStats::new();
        let Some(records) = annotate_item(item, &mut self.prompt, &mut item_stats)? else {
            info!("Annotation cancelled, {} items left", self.queue.len());
            return Ok(Step::Cancelled);
        };

        save_item(item, &records, &self.output_dirs)?;
        item_stats.increment_saved();
        item_stats.add_annotated(records.len());
        self.stats.merge(&item_stats);
        self.queue.complete(index);
        Ok(Step::Saved(index))
    }

    /// Process items until the queue is empty or the annotator cancels
    pub fn run(&mut self) -> Result<DriverState> {
        let pb = create_progress_bar(self.queue.len() as u64, "Annotate");
        let outcome = loop {
            match self.step() {
                Ok(Step::Saved(_)) => pb.inc(1),
                Ok(Step::Cancelled) => break Ok(self.state()),
                Ok(Step::Done) => break Ok(DriverState::Done),
                Err(e) => break Err(e),
            }
        };
        pb.finish_and_clear();

        if let Ok(DriverState::Done) = outcome {
            info!("All items annotated.");
        }
        self.stats.print_summary();
        outcome
    }
}
