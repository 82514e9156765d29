//! S3Form Server - issues signed browser-based upload forms.
//!
//! Clients `POST /upload-form` and receive the URL and form fields needed to
//! upload a file straight to the configured bucket. The secret key never
//! leaves the process.
//!
//! # Usage
//!
//! ```text
//! AWS_ACCESS_KEY_ID=... AWS_SECRET_ACCESS_KEY=... S3_BUCKET=mybucket s3form-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:4580` | Bind address |
//! | `AWS_ACCESS_KEY_ID` / `ACCESS_KEY` | *(required)* | Access key ID |
//! | `AWS_SECRET_ACCESS_KEY` / `SECRET_KEY` | *(required)* | Secret access key |
//! | `S3_BUCKET` | *(required)* | Target bucket |
//! | `AWS_REGION` / `DEFAULT_REGION` | `us-east-1` | Signing region |
//! | `S3_ACCELERATE` | `false` | Use the transfer-acceleration endpoint |
//! | `DEFAULT_EXPIRY_MINUTES` | `10` | Policy lifetime when the request omits one |
//! | `MAX_EXPIRY_MINUTES` | `10080` | Longest policy lifetime a request may ask for |
//! | `RESOLVE_BUCKET_REGION` | `false` | Look up the bucket's region at startup |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod config;
mod error;
mod service;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use s3form_core::S3FormConfig;
use s3form_policy::Transfer;
use s3form_transfer::S3Transfer;

use crate::config::ServerConfig;
use crate::service::{FormService, FormState};

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Replace the configured region with the one the bucket reports.
async fn resolve_region(mut config: S3FormConfig) -> Result<S3FormConfig> {
    let region = S3Transfer::new(&config)
        .bucket_region()
        .await
        .with_context(|| format!("failed to resolve region of bucket {}", config.bucket))?;

    if region != config.region {
        warn!(
            bucket = %config.bucket,
            configured = %config.region,
            actual = %region,
            "bucket lives in a different region, signing for the actual one"
        );
        config.region = region;
    }

    Ok(config)
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: FormService) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Perform a health check by connecting to the gateway and requesting the health endpoint.
///
/// Exits with code 0 if healthy, 1 otherwise.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if response.contains("200 OK") && response.contains("\"status\":\"running\"") {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let server_config = ServerConfig::from_env().context("invalid server configuration")?;

    // Handle --health-check flag for Docker HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let addr = server_config.gateway_listen.replace("0.0.0.0", "127.0.0.1");
        let healthy = run_health_check(&addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&server_config.log_level)?;

    let mut config = S3FormConfig::from_env();
    config
        .validate()
        .context("invalid account configuration")?;

    if server_config.resolve_bucket_region {
        config = resolve_region(config).await?;
    }

    info!(
        gateway_listen = %server_config.gateway_listen,
        bucket = %config.bucket,
        region = %config.region,
        accelerate = config.accelerate,
        default_expiry_minutes = server_config.default_expiry_minutes,
        max_expiry_minutes = server_config.max_expiry_minutes,
        version = VERSION,
        "starting S3Form Server",
    );

    let service = FormService::new(FormState::new(config, &server_config));

    let addr: SocketAddr = server_config
        .gateway_listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", server_config.gateway_listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, service).await
}
