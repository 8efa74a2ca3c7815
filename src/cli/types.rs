use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::model::PixelType;

#[derive(Debug, Parser)]
#[command(
    name = "stackview",
    version,
    about = "Replays viewer sessions over stacked 2-D image data"
)]
pub(super) struct Cli {
    /// Log position moves, stack loads and color range changes.
    #[arg(short, long, global = true)]
    pub(super) verbose: bool,

    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Runs a YAML or JSON session file and prints the step report as JSON.
    Replay {
        #[arg(long)]
        session: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Prints the mouse-over readout for a synthetic ramp stack.
    Probe {
        #[arg(long, value_delimiter = ',', required = true)]
        shape: Vec<usize>,
        #[arg(long, value_enum, default_value_t = PixelTypeArg::F64)]
        pixel_type: PixelTypeArg,
        #[arg(long, allow_negative_numbers = true)]
        index: Option<f64>,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(super) enum PixelTypeArg {
    U8,
    U16,
    U32,
    I8,
    I16,
    I32,
    F32,
    F64,
}

impl From<PixelTypeArg> for PixelType {
    fn from(value: PixelTypeArg) -> Self {
        match value {
            PixelTypeArg::U8 => Self::U8,
            PixelTypeArg::U16 => Self::U16,
            PixelTypeArg::U32 => Self::U32,
            PixelTypeArg::I8 => Self::I8,
            PixelTypeArg::I16 => Self::I16,
            PixelTypeArg::I32 => Self::I32,
            PixelTypeArg::F32 => Self::F32,
            PixelTypeArg::F64 => Self::F64,
        }
    }
}
