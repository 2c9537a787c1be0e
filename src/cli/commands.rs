use crate::dispatch::AggregationMode;
use crate::llm::ChatMessage;
use clap::{Parser, Subcommand, ValueEnum};

/// Multi-model LLM dispatch with parallel aggregation and fallback chains
#[derive(Parser, Debug)]
#[command(
    name = "relaybox",
    about = "Multi-model LLM dispatch with parallel aggregation and fallback chains",
    version,
    author,
    long_about = "relaybox sends a conversation to a primary LLM provider and to a catalog of \
                  secondary models. Answers are either collected from every model that \
                  succeeds, or taken from the first model that succeeds."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Ask a question with primary-then-secondary fallback",
        long_about = "Tries the primary provider first, then the secondary model catalog. \
                      Always prints an answer.\n\n\
                      Examples:\n  \
                      relaybox ask \"What is a borrow checker?\"\n  \
                      relaybox ask --system \"Answer in one line\" \"Explain lifetimes\""
    )]
    Ask(AskArgs),

    #[command(
        about = "Query several secondary models at once",
        long_about = "Sends the prompt to the leading catalog models concurrently.\n\n\
                      Examples:\n  \
                      relaybox query \"Summarize RFC 9110\"\n  \
                      relaybox query --mode fallback --max-models 2 \"Hello\"\n  \
                      relaybox query --format json \"Hello\""
    )]
    Query(QueryArgs),

    #[command(about = "List the secondary model catalog")]
    Models(ModelsArgs),

    #[command(about = "Show the resolved configuration")]
    Config,
}

#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    #[arg(value_name = "PROMPT", required = true, num_args = 1.., help = "Question to ask")]
    pub prompt: Vec<String>,

    #[arg(short = 's', long, value_name = "TEXT", help = "System instruction")]
    pub system: Option<String>,

    #[arg(long, value_name = "TOKENS", help = "Maximum response tokens")]
    pub max_tokens: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    #[arg(value_name = "PROMPT", required = true, num_args = 1.., help = "Question to ask")]
    pub prompt: Vec<String>,

    #[arg(short = 's', long, value_name = "TEXT", help = "System instruction")]
    pub system: Option<String>,

    #[arg(
        long,
        default_value = "parallel",
        value_parser = parse_mode,
        help = "Aggregation mode: parallel or fallback (unknown values mean parallel)"
    )]
    pub mode: AggregationMode,

    #[arg(long, value_name = "N", help = "Number of catalog models to query")]
    pub max_models: Option<usize>,

    #[arg(long, value_name = "TOKENS", help = "Maximum response tokens per model")]
    pub max_tokens: Option<u32>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ModelsArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_mode(s: &str) -> Result<AggregationMode, String> {
    Ok(AggregationMode::parse(s))
}

/// Builds the conversation sent for a CLI prompt
pub fn build_messages(system: Option<&str>, prompt: &[String]) -> Vec<ChatMessage> {
    let mut messages = Vec::new();
    if let Some(system) = system {
        messages.push(ChatMessage::system(system));
    }
    messages.push(ChatMessage::user(prompt.join(" ")));
    messages
}
