use std::sync::Arc;

use clap::{Parser, ValueEnum};
use ragmon_api::{ApiState, LogSink, api_router, route::DEFAULT_BODY_LIMIT};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "ragmon", about = "RAG monitoring metrics ingestion API")]
struct Cli {
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(long, default_value = "8080")]
    port: u16,

    /// Largest request body accepted by `POST /metrics`, in bytes.
    #[arg(long, default_value_t = DEFAULT_BODY_LIMIT)]
    max_body_bytes: usize,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::from_default_env().add_directive("ragmon=info".parse()?);
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    let addr = format!("{}:{}", cli.host, cli.port);
    let state = ApiState::new(Arc::new(LogSink)).with_body_limit(cli.max_body_bytes);
    let app = api_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(max_body_bytes = cli.max_body_bytes, "ragmon server listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, LogFormat};
    use ragmon_api::route::DEFAULT_BODY_LIMIT;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["ragmon"]).unwrap();
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.port, 8080);
        assert_eq!(cli.max_body_bytes, DEFAULT_BODY_LIMIT);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides() {
        let cli = Cli::try_parse_from([
            "ragmon",
            "--port",
            "9100",
            "--max-body-bytes",
            "1024",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.port, 9100);
        assert_eq!(cli.max_body_bytes, 1024);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_bad_port() {
        assert!(Cli::try_parse_from(["ragmon", "--port", "99999"]).is_err());
    }
}
