use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use pose_annotator::{
    discover_subfolders, index_dataset, setup_output_directories, Annotator, Args, DriverState,
    Result, WindowPrompt,
};

fn run(args: &Args) -> Result<DriverState> {
    let subfolders = discover_subfolders(&args.input_dataset)?;
    info!("Found subfolders: {:?}", subfolders);

    let output_dirs = setup_output_directories(&args.output_dataset)?;
    let queue = index_dataset(&args.input_dataset, &subfolders, &output_dirs)?;
    if queue.is_empty() {
        info!("Nothing to annotate.");
        return Ok(DriverState::Done);
    }

    let prompt = WindowPrompt::new("Cone point annotator");
    let mut annotator = Annotator::new(queue, output_dirs, prompt);
    annotator.run()
}

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("Starting the annotation process...");

    match run(&args) {
        Ok(DriverState::Done) => {
            info!("Annotation process completed successfully.");
            ExitCode::SUCCESS
        }
        Ok(DriverState::Pending) => {
            info!("Annotation stopped early, run again to resume.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Annotation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
