use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use atlas_verify::*;

#[derive(Parser)]
#[command(name = "atlas-verify", version, about = "Client for the Atlas hallucination-verification endpoint")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
    /// Verification endpoint base URL
    #[arg(long, default_value = "http://localhost:8000")] endpoint: String,
    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 30_000)] timeout_ms: u64,
    /// What the copy action puts on the clipboard
    #[arg(long, value_enum, default_value = "summary")] copy_format: CopyFormat,
}

#[derive(Subcommand)]
enum Cmd {
    /// Submit one query/response pair and render the verdict
    Verify {
        /// What the user asked the model
        #[arg(long)] query: String,
        /// The model output to judge
        #[arg(long)] response: String,
        /// Copy the verdict to the clipboard after rendering
        #[arg(long)] copy: bool,
    },
    /// Submit pairs repeatedly from stdin; `:copy` copies the last verdict, `:quit` exits
    Interactive,
}

/// Renders result regions as labelled lines on stdout; alerts go to stderr.
struct ConsoleView;

impl ResultView for ConsoleView {
    fn set_region(&mut self, region: Region, text: &str) {
        match region {
            Region::Raw => println!("{text}"),
            _ => println!("{}: {text}", region.label()),
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let client = VerifyClient::new(&cli.endpoint, cli.timeout_ms)?;
    let mut controller = VerifyController::new(
        Arc::new(client),
        Box::new(ConsoleView),
        Box::new(SystemClipboard),
        cli.copy_format,
    );

    match cli.cmd {
        Cmd::Verify { query, response, copy } => {
            let rendered = controller
                .submit(VerificationRequest { llm_query: query, llm_response: response })
                .await;
            if rendered && copy {
                controller.copy_last();
            }
            if !rendered {
                std::process::exit(1);
            }
        }
        Cmd::Interactive => run_interactive(&mut controller).await?,
    }
    Ok(())
}

async fn run_interactive(controller: &mut VerifyController) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt("query> ")?;
        let Some(query) = lines.next_line().await? else { break };
        match query.trim() {
            ":quit" => break,
            ":copy" => {
                if controller.last().is_none() {
                    eprintln!("Nothing to copy yet");
                } else {
                    controller.copy_last();
                }
                continue;
            }
            "" => continue,
            _ => {}
        }
        prompt("response> ")?;
        let Some(response) = lines.next_line().await? else { break };
        controller
            .submit(VerificationRequest { llm_query: query, llm_response: response })
            .await;
    }
    Ok(())
}

fn prompt(label: &str) -> Result<()> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(())
}
