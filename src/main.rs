use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_mcp::rpc;
use todo_mcp::store::{MemoryStore, SqliteStore, TodoStore};
use todo_mcp::tools::{self, dispatch, ToolName};
use todo_mcp::web::{self, WebConfig};

#[derive(Parser)]
#[command(name = "todo-mcp")]
#[command(about = "Todo tracker with a REST API, tool dispatch, and an optional chat relay")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database path (uses the in-memory store when omitted)
    #[arg(long, env = "TODO_DATABASE", global = true)]
    database: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value = "8000")]
        port: u16,
        /// Ollama-compatible agent URL for the chat relay
        #[arg(long, env = "OLLAMA_URL")]
        agent_url: Option<String>,
        /// Model the chat relay asks the agent for
        #[arg(long, env = "OLLAMA_MODEL", default_value = "llama3.1:8b")]
        model: String,
        /// System prompt for the chat relay
        #[arg(long, short)]
        system: Option<String>,
    },
    /// List the registered tools
    Tools,
    /// Call a tool directly
    Call {
        /// Tool name
        tool: String,
        /// Arguments as JSON
        #[arg(long, short)]
        args: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            agent_url,
            model,
            system,
        } => {
            web::serve(WebConfig {
                port,
                database: cli.database,
                agent_url,
                model,
                system_prompt: system,
            })
            .await?;
        }
        Commands::Tools => {
            let descriptors = tools::descriptors();
            println!("{}", serde_json::to_string_pretty(&descriptors)?);
        }
        Commands::Call { tool, args } => {
            run_call_tool(cli.database, &tool, args).await?;
        }
    }

    Ok(())
}

/// Initialize tracing to stderr so stdout stays clean for command output.
/// Set LOG_FORMAT=json for structured output.
fn init_tracing() -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("todo_mcp=info".parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}

async fn run_call_tool(database: Option<PathBuf>, tool: &str, args: Option<String>) -> Result<()> {
    let tool = ToolName::from_str(tool)?;

    let arguments: serde_json::Value = match args {
        Some(args) => serde_json::from_str(&args)?,
        None => serde_json::json!({}),
    };

    let store: Box<dyn TodoStore> = match database {
        Some(path) => Box::new(SqliteStore::open(path)?),
        None => Box::new(MemoryStore::new()),
    };

    match dispatch::call_tool(store.as_ref(), tool, arguments).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => anyhow::bail!("{} (code {})", e, rpc::error_code(&e)),
    }
}
