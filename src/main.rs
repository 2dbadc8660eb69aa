mod blank;
mod replay;
mod script;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pageink", about = "Replay annotation gestures over a paged document and write the annotated pages")]
struct Cli {
    /// Overlay tunables as JSON; defaults apply when omitted.
    #[arg(long, env = "PAGEINK_CONFIG")]
    config: Option<PathBuf>,

    /// Directory the annotated `page-<n>.png` files are written to.
    #[arg(long, env = "PAGEINK_OUT_DIR", default_value = "out")]
    out_dir: PathBuf,

    /// Gesture script to replay.
    script: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(pages) => {
            tracing::info!(pages, out_dir = %cli.out_dir.display(), "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "pageink failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<usize, replay::ReplayError> {
    let config = replay::load_config(cli.config.as_deref())?;
    let script = replay::load_script(&cli.script)?;
    let doc = replay::open_document(&script, &config)?;
    let engine = replay::replay(&script, &doc, config)?;
    let written = replay::write_pages(&engine, &doc, &cli.out_dir)?;
    Ok(written.len())
}
