use clap::Parser;

use crate::runtime::AppContext;

use super::types::{Cli, Commands};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let app = AppContext::new();

    match cli.command {
        Commands::Replay { session, report } => {
            let spec = app
                .session_service()
                .load(&session)
                .map_err(|error| error.to_string())?;
            let run_report = app
                .session_service()
                .run(&spec)
                .map_err(|error| error.to_string())?;
            if let Some(report_path) = report {
                app.session_service()
                    .save_report(report_path, &run_report)
                    .map_err(|error| error.to_string())?;
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&run_report).map_err(|error| error.to_string())?
            );
        }
        Commands::Probe {
            shape,
            pixel_type,
            index,
            x,
            y,
        } => {
            let readout = app
                .session_service()
                .probe(shape, pixel_type.into(), index, x, y)
                .map_err(|error| error.to_string())?;
            println!("{readout}");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
