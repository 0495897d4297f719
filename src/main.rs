use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser as ClapParser, Subcommand};
use internetdata::Connection;
use internetdata::cli::{self, CliError, ExecuteOptions};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "lsd")]
#[command(about = "Compile and run LSD trips")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON instruction log into an LSD program
    Compile {
        /// Path to the plan (reads from stdin if not provided)
        plan: Option<PathBuf>,
    },

    /// Run an LSD program and print the rows as JSON
    Execute {
        /// The program to run (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List operations, or show documentation for one
    Docs {
        /// Operation name (use 'lsd docs' to list operations)
        operation: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile { plan } => run_compile(plan),
        Commands::Execute { query, pretty } => run_execute(query, pretty).await,
        Commands::Docs { operation: None } => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Docs {
            operation: Some(operation),
        } => cli::get_operation_doc(&operation).map(|content| print!("{}", content)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Reads stdin when it is piped, `None` when it is a terminal.
fn read_stdin() -> Result<Option<String>, CliError> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(Some(buffer))
}

fn run_compile(plan: Option<PathBuf>) -> Result<(), CliError> {
    let plan = match plan {
        Some(path) => fs::read_to_string(path)?,
        None => read_stdin()?.ok_or(CliError::NoInput)?,
    };

    println!("{}", cli::compile_plan(&plan)?);
    Ok(())
}

async fn run_execute(query: Option<String>, pretty: bool) -> Result<(), CliError> {
    let query = match query {
        Some(q) => q,
        None => read_stdin()?.ok_or(CliError::NoInput)?,
    };

    let connection = Connection::new(None)?;
    let options = ExecuteOptions { query, pretty };

    println!("{}", cli::execute_query(Arc::new(connection), &options).await?);
    Ok(())
}
