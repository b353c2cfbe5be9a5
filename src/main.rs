use anyhow::Context;
use notepad::{error, logging, RunOptions, TuiApplication};

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let options = RunOptions::from_env();
    for arg in &options.unknown_args {
        eprintln!("notepad: ignoring unknown argument: {}", arg);
    }
    if let Some(path) = logging::init(&options).context("failed to initialise debug log")? {
        eprintln!("debug log: {}", path.display());
    }
    log::info!("notepad {} starting", env!("CARGO_PKG_VERSION"));
    if !options.unknown_args.is_empty() {
        log::warn!("ignored arguments: {:?}", options.unknown_args);
    }

    let mut app = TuiApplication::new()?;
    app.run()?;

    log::info!("notepad exited");
    Ok(())
}
