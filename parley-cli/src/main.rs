use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use parley_core::IceServerConfig;
use parley_server::{
    Authenticator, GatewayState, JwtVerifier, Relay, RelayConfig, StaticTokenVerifier,
    TokenVerifier, router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "parley-relay", about = "Presence and WebRTC signaling relay")]
struct Args {
    /// Address to listen on.
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    bind: SocketAddr,

    /// Seconds between server pings.
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u64).range(1..))]
    heartbeat_secs: u64,

    /// Seconds of client silence before the socket is dropped.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Upper bound on token verification.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    handshake_timeout_secs: u64,

    /// STUN/TURN url advertised to clients (repeatable).
    #[arg(long = "ice-server")]
    ice_servers: Vec<String>,

    /// HS256 secret of the identity provider.
    #[arg(long)]
    jwt_secret: Option<String>,

    /// Required `iss` claim.
    #[arg(long, requires = "jwt_secret")]
    jwt_issuer: Option<String>,

    /// Development token as `<token>=<identity>` (repeatable).
    #[arg(long = "static-token", value_parser = parse_static_token)]
    static_tokens: Vec<(String, String)>,
}

fn parse_static_token(raw: &str) -> std::result::Result<(String, String), String> {
    let (token, identity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <token>=<identity>, got `{raw}`"))?;
    if token.is_empty() || identity.is_empty() {
        return Err(format!("empty token or identity in `{raw}`"));
    }
    Ok((token.to_owned(), identity.to_owned()))
}

fn relay_config(args: &Args) -> RelayConfig {
    let mut config = RelayConfig {
        heartbeat_interval: Duration::from_secs(args.heartbeat_secs),
        client_timeout: Duration::from_secs(args.timeout_secs),
        handshake_timeout: Duration::from_secs(args.handshake_timeout_secs),
        ..RelayConfig::default()
    };
    if !args.ice_servers.is_empty() {
        config.ice_servers = args
            .ice_servers
            .iter()
            .map(|url| IceServerConfig {
                urls: vec![url.clone()],
                username: None,
                credential: None,
            })
            .collect();
    }
    config
}

fn token_verifier(args: &Args) -> Result<Arc<dyn TokenVerifier>> {
    if let Some(secret) = &args.jwt_secret {
        if !args.static_tokens.is_empty() {
            warn!("--static-token is ignored when --jwt-secret is set");
        }
        let mut verifier = JwtVerifier::hs256(secret.as_bytes());
        if let Some(issuer) = &args.jwt_issuer {
            verifier = verifier.with_issuer(issuer);
        }
        return Ok(Arc::new(verifier));
    }

    if args.static_tokens.is_empty() {
        anyhow::bail!("no identity provider configured: pass --jwt-secret or --static-token");
    }
    Ok(Arc::new(StaticTokenVerifier::with_tokens(
        args.static_tokens.iter().cloned(),
    )))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley_server=info,parley_cli=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = relay_config(&args);
    let verifier = token_verifier(&args)?;

    let relay = Relay::start(&config).await;
    let auth = Authenticator::new(verifier, config.handshake_timeout);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(GatewayState::new(relay.clone(), auth, config)).layer(cors);

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;

    println!("{}", "📡 Parley relay is up".green().bold());
    println!("   🔌 WebSocket: ws://{}/ws?token=...", args.bind);
    println!("   ❤️  Health:    http://{}/healthz", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if relay.shutdown().await.is_err() {
        warn!("Relay already stopped");
    }
    info!("Bye");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
