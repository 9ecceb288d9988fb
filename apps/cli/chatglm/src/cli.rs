use crate::settings::Overrides;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command-line client for the ChatGLM model API.
///
/// The API key is read from `CHATGLM_API_KEY` (a `.env` file is honored) or
/// from the `api_key` entry of the settings file.
#[derive(Debug, Parser)]
#[command(name = "chatglm", version)]
pub struct Cli {
    /// Settings file (default: `<config dir>/chatglm/config.toml`)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Log request and response content
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Also append log records to this file
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            debug: self.debug,
            model: self.command.model().map(str::to_owned),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a model and wait for the answer
    Invoke(PromptArgs),
    /// Submit an asynchronous task and print its id
    AsyncInvoke(PromptArgs),
    /// Query an asynchronous task by id
    Query {
        /// Task id returned by `async-invoke`
        task_id: String,
    },
    /// Call the SSE endpoint
    Sse(PromptArgs),
    /// Print a freshly signed token and its claims
    Token,
}

impl Command {
    fn model(&self) -> Option<&str> {
        match self {
            Command::Invoke(args) | Command::AsyncInvoke(args) | Command::Sse(args) => {
                args.model.as_deref()
            }
            Command::Query { .. } | Command::Token => None,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct PromptArgs {
    /// User message sent as the prompt
    pub prompt: String,

    /// Model name (default from settings, else `chatglm_pro`)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Sampling temperature in (0, 1]
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Nucleus sampling in (0, 1)
    #[arg(long)]
    pub top_p: Option<f64>,

    /// Caller-chosen request id (default: a generated UUID)
    #[arg(long)]
    pub request_id: Option<String>,
}
