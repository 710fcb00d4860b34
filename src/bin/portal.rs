use std::{io, process::ExitCode};

use clap::Parser;
use log::{error, info};
use teacher_portal::{
    cli::{read_config, run, Args},
    clipboard::StdoutClipboard,
    confirmer::StdinConfirmer,
    storage::JsonFileStore,
};

fn main() -> ExitCode {
    /* Parse args first, verbosity decides the log level */
    let args = Args::parse();

    /* Setup logging */
    env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    /* Get configuration from defaults, config.json and environment */
    let config = match read_config(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    info!("Using storage file {}", config.storage_path.display());

    /* Run the requested command against the storage file */
    let storage = JsonFileStore::new(&config.storage_path);
    let mut stdout = io::stdout().lock();
    match run(
        &args,
        &config,
        storage,
        &mut StdinConfirmer,
        &mut StdoutClipboard,
        &mut stdout,
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
