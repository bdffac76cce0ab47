//! Command line entry point for the pay statement engine.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use paystub_engine::api::{AppState, create_router};
use paystub_engine::config::ConfigLoader;
use paystub_engine::error::{EngineError, EngineResult};
use paystub_engine::models::StatementRun;
use paystub_engine::render::{
    DocumentRenderer, HtmlStatementRenderer, JsonStatementRenderer, PayStatement,
    RenderDispatcher, RenderReport, format_currency, format_display_date,
};

#[derive(Parser, Debug)]
#[command(name = "paystub-engine", version, about = "Generate pay statements from a fixed-cadence schedule")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate every statement in the configured schedule.
    Generate {
        /// Configuration file, or a directory containing paystub.yaml.
        #[arg(long, default_value = "./config/default")]
        config: PathBuf,

        /// Directory the statements are written to.
        #[arg(long, default_value = "./paystubs")]
        output: PathBuf,

        /// Maximum number of statements rendered at once.
        #[arg(long, default_value_t = 8)]
        concurrency: usize,

        /// Document format of each statement.
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Serve the HTTP API.
    Serve {
        /// Configuration file, or a directory containing paystub.yaml.
        #[arg(long, default_value = "./config/default")]
        config: PathBuf,

        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Json,
    Html,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("paystub_engine=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate {
            config,
            output,
            concurrency,
            format,
        } => generate(config, output, concurrency, format).await,
        Command::Serve { config, addr } => serve(config, addr).await,
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "paystub-engine failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn generate(
    config: PathBuf,
    output: PathBuf,
    concurrency: usize,
    format: Format,
) -> EngineResult<ExitCode> {
    let loader = ConfigLoader::load(&config)?;
    let run = StatementRun::generate(loader.schedule())?;
    info!(
        run_id = %run.run_id,
        records = run.records.len(),
        output = %output.display(),
        "Generated schedule"
    );

    for record in &run.records {
        println!(
            "{}  {} - {}  gross {}  ytd {}",
            format_display_date(record.pay_date),
            format_display_date(record.period_start),
            format_display_date(record.period_end),
            format_currency(record.gross_amount),
            format_currency(record.ytd_total),
        );
    }

    let statements = PayStatement::for_records(run.records, loader.parties());
    let report = match format {
        Format::Json => {
            render_all(JsonStatementRenderer::new(output), statements, concurrency).await
        }
        Format::Html => {
            render_all(HtmlStatementRenderer::new(output), statements, concurrency).await
        }
    };

    for artifact in &report.rendered {
        println!("wrote {} ({} bytes)", artifact.location, artifact.bytes);
    }
    for failure in &report.failures {
        eprintln!("failed {}: {}", failure.artifact_name, failure.message);
    }

    if report.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!(failed = report.failures.len(), "Some statements were not rendered");
        Ok(ExitCode::FAILURE)
    }
}

async fn render_all<R>(renderer: R, statements: Vec<PayStatement>, concurrency: usize) -> RenderReport
where
    R: DocumentRenderer + 'static,
{
    RenderDispatcher::new(Arc::new(renderer))
        .with_concurrency_limit(concurrency)
        .dispatch(statements)
        .await
}

async fn serve(config: PathBuf, addr: String) -> EngineResult<ExitCode> {
    let loader = ConfigLoader::load(&config)?;
    let router = create_router(AppState::new(loader));

    let server_error = |e: std::io::Error| EngineError::Server {
        addr: addr.clone(),
        message: e.to_string(),
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(server_error)?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, router).await.map_err(server_error)?;
    Ok(ExitCode::SUCCESS)
}
