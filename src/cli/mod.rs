pub mod commands;

pub use commands::{Cli, Commands, OutputArgs, OutputFormat, run};
