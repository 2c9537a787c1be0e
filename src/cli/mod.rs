pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{AskArgs, CliArgs, Commands, ModelsArgs, QueryArgs};
pub use output::{OutputFormat, OutputFormatter};
