// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// compdf: command-line front end for the ComPDF document API.
//
// Entry point. Initialises logging, loads the configuration, and dispatches
// the chosen subcommand. Results go to stdout as JSON; logs go to stderr.

mod commands;
mod poll;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use compdf_core::human_errors::humanize_error;
use compdf_core::{ClientConfig, Language};
use compdf_tools::ToolSelector;

/// Convert, edit and analyse documents with the ComPDF API.
#[derive(Parser)]
#[command(name = "compdf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file. Without it, COMPDF_* environment variables are used.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Language of server messages: english or chinese
    #[arg(short, long, global = true)]
    language: Option<Language>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the tools available to the account
    Tools,

    /// Show the account's remaining balance
    Assets,

    /// List previous tasks
    Tasks {
        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "10")]
        size: u32,
    },

    /// Create a task, upload a file, start it and wait for the result
    Run {
        /// Tool name (e.g. pdf-to-word, compress) or endpoint path (e.g. pdf/docx)
        #[arg(short, long)]
        tool: ToolSelector,

        /// Input document
        #[arg(short, long)]
        file: PathBuf,

        /// Password of an encrypted input document
        #[arg(long)]
        password: Option<String>,

        /// Tool parameters as a JSON object
        #[arg(long)]
        parameter: Option<String>,

        /// Companion image, e.g. for an image watermark
        #[arg(long)]
        image: Option<PathBuf>,

        /// Name sent for the image (defaults to its file name)
        #[arg(long, requires = "image")]
        image_name: Option<String>,

        /// Start the task and return without waiting for it
        #[arg(long)]
        no_wait: bool,
    },

    /// Show the status of a task
    TaskInfo {
        task_id: String,
    },

    /// Show the download descriptor of a processed file
    FileInfo {
        file_key: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            let human = humanize_error(&err);
            eprintln!("error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> compdf_core::Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_json_file(path)?,
        None => ClientConfig::from_env()?,
    };
    if let Some(language) = cli.language {
        config = config.with_language(language);
    }

    let client = compdf_client::CompdfClient::new(&config)?;

    match cli.command {
        Command::Tools => commands::tools(&client).await,
        Command::Assets => commands::assets(&client).await,
        Command::Tasks { page, size } => commands::tasks(&client, page, size).await,
        Command::Run {
            tool,
            file,
            password,
            parameter,
            image,
            image_name,
            no_wait,
        } => {
            let job = commands::RunJob {
                tool,
                file,
                password,
                parameter,
                image,
                image_name,
                wait: !no_wait,
            };
            commands::run_job(&client, job).await
        }
        Command::TaskInfo { task_id } => commands::task_info(&client, task_id.into()).await,
        Command::FileInfo { file_key } => commands::file_info(&client, file_key.into()).await,
    }
}
