pub mod cli;
pub mod model;
pub mod navigation;
pub mod runtime;
pub mod session;
pub mod viewer;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
