//! Server startup

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::prelude::*;
use crate::routes;
use vocal_royale_core::AppBuilder;
use vocal_royale_core::app::VERSION;
use vocal_royale_settings_adapter_pocketbase::SettingsAdapterPocketBase;

/// Install the global tracing subscriber, filtered by `RUST_LOG`.
///
/// Only the first call has an effect.
pub fn init_logging() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.try_init();
}

/// Assemble the app state: PocketBase settings adapter plus the Apple Music
/// signer configured from the environment.
pub fn build_app(config: &ServerConfig) -> VrResult<App> {
	let mut adapter =
		SettingsAdapterPocketBase::new(&config.pocketbase_url, &config.settings_collection)?;
	if let Some(token) = &config.pocketbase_token {
		adapter = adapter.with_auth_token(token.clone());
	}
	info!("Reading settings from {}", adapter.records_url());

	AppBuilder::new().settings_adapter(Arc::new(adapter)).build()
}

/// Serve the routes on `listener` until Ctrl-C
pub async fn serve(app: App, listener: TcpListener) -> VrResult<()> {
	axum::serve(listener, routes::init(app)).with_graceful_shutdown(shutdown_signal()).await?;
	Ok(())
}

pub async fn run(config: ServerConfig) -> VrResult<()> {
	init_logging();
	info!("Vocal Royale V{}", VERSION);

	if rustls::crypto::CryptoProvider::install_default(
		rustls::crypto::aws_lc_rs::default_provider(),
	)
	.is_err()
	{
		debug!("Crypto provider already installed");
	}

	let app = build_app(&config)?;
	let apple_music = app.apple_music.config();
	if apple_music.developer_token.is_some() {
		info!("Apple Music: using pre-built developer token");
	} else if apple_music.key_id.is_none() || apple_music.team_id.is_none() {
		warn!("Apple Music: key id or team id not configured, token endpoint disabled");
	}

	let listener = TcpListener::bind(config.listen).await?;
	info!("Listening on HTTP {}", config.listen);
	serve(app, listener).await?;

	info!("Shut down");
	Ok(())
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		error!("Cannot listen for shutdown signal: {}", err);
		std::future::pending::<()>().await;
	}
	info!("Shutting down...");
}


// vim: ts=4
