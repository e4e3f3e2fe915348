//! Camera Trap Image Extractor
//!
//! Reads camera, species and count from a camera trap folder tree
//! (`root/camera/.../species/count/image.jpg`) and writes one CSV row per
//! image, sorted by image id.

use camtrap_logging::{init_logging, LogConfig};
use camtrap_scout::SystemClock;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(
    name = "camtrap",
    version,
    about = "Extract image information from camera trap directory structure"
)]
struct Cli {
    /// Input directory containing camera trap images (default: current directory)
    #[arg(long, env = "CAMTRAP_INPUT_DIR")]
    input_dir: Option<PathBuf>,

    /// Output CSV file path; a timestamp is inserted before the extension
    /// (default: camera_trap_images_TIMESTAMP.csv in current directory)
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// TOML config file (input_dir, output_file, extensions, follow_symlinks)
    #[arg(long, env = "CAMTRAP_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(LogConfig {
        app_name: "camtrap",
        verbose: cli.verbose,
    }) {
        eprintln!("Warning: failed to initialize logging: {:#}", err);
    }

    let json_mode = cli.json;
    let args = cli::extract::ExtractArgs {
        input_dir: cli.input_dir,
        output_file: cli.output_file,
        config: cli.config,
        quiet: cli.quiet,
        json: cli.json,
    };

    match cli::extract::run(args, &SystemClock) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json_mode {
                cli::error::print_json_error(&err);
            } else {
                eprintln!("{:?}", err);
            }
            ExitCode::from(1)
        }
    }
}
