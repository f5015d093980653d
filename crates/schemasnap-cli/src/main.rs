//! SchemaSnap CLI - MySQL schema snapshot tool

use anyhow::{Context, Result};
use clap::Parser;
use schemasnap_cli::cli::{Args, OutputFormat};
use schemasnap_cli::executor::SqlxExecutor;
use schemasnap_cli::output;
use schemasnap_core::{DatabaseSchema, SchemaRenderer};
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

/// Rendering or query failure.
const EXIT_FAILURE: u8 = 1;
/// Configuration error (e.g. no connection URL given).
const EXIT_CONFIG_ERROR: u8 = 66;

fn main() -> ExitCode {
    let args = Args::parse();

    init_tracing(args.verbose);

    let Some(url) = args.url.clone() else {
        eprintln!("schemasnap: error: no connection URL; pass --url or set DATABASE_URL");
        return ExitCode::from(EXIT_CONFIG_ERROR);
    };

    match run(args, &url) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("schemasnap: error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args, url: &str) -> Result<()> {
    // Warn if credentials appear to be embedded in the URL
    if url.contains('@') && !args.quiet {
        eprintln!(
            "schemasnap: warning: database credentials in the connection URL may be logged in \
             shell history. Consider setting DATABASE_URL instead."
        );
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let (database, schema) = runtime.block_on(render(&args, url))?;

    let schema = if args.sort {
        output::sort_schema(schema)
    } else {
        schema
    };

    let content = match args.format {
        OutputFormat::Json => output::format_json(&schema, args.compact),
        OutputFormat::Table => output::format_table(&schema, &database, !args.no_color),
    };

    write_output(&args.output, &content)
}

/// Connect, resolve the target database, and render one snapshot.
async fn render(args: &Args, url: &str) -> Result<(String, DatabaseSchema)> {
    let executor = SqlxExecutor::connect(url, args.max_connections)
        .await
        .context("Failed to connect to the database")?;

    let renderer = match &args.database {
        Some(database) => SchemaRenderer::with_database(executor, database.as_str()),
        None => SchemaRenderer::for_current_database(executor)
            .await
            .context("Failed to resolve the active database")?,
    };
    let renderer = renderer.max_concurrent_fetches(args.max_connections as usize);

    let schema = renderer
        .render_schema()
        .await
        .context("Failed to render the database schema")?;

    Ok((renderer.database().to_string(), schema))
}

fn write_output(path: &Option<std::path::PathBuf>, content: &str) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, content)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    } else {
        io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout")?;
        // Ensure newline at end for terminal output
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
