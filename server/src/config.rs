//! Server configuration from the environment

use std::net::SocketAddr;

use crate::prelude::*;

pub const ENV_LISTEN: &str = "LISTEN";
pub const ENV_POCKETBASE_URL: &str = "POCKETBASE_URL";
pub const ENV_POCKETBASE_TOKEN: &str = "POCKETBASE_TOKEN";
pub const ENV_SETTINGS_COLLECTION: &str = "SETTINGS_COLLECTION";

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
pub const DEFAULT_POCKETBASE_URL: &str = "http://127.0.0.1:8090";

#[derive(Clone)]
pub struct ServerConfig {
	pub listen: SocketAddr,
	pub pocketbase_url: Box<str>,
	/// Sent as `Authorization` to PocketBase when the collection is not public
	pub pocketbase_token: Option<Box<str>>,
	pub settings_collection: Box<str>,
}

impl std::fmt::Debug for ServerConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ServerConfig")
			.field("listen", &self.listen)
			.field("pocketbase_url", &self.pocketbase_url)
			.field("pocketbase_token", &self.pocketbase_token.as_ref().map(|_| "<redacted>"))
			.field("settings_collection", &self.settings_collection)
			.finish()
	}
}

impl ServerConfig {
	pub fn from_env() -> VrResult<Self> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	pub fn from_lookup<F>(lookup: F) -> VrResult<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |name: &str| -> Option<String> {
			lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
		};

		let listen_str = var(ENV_LISTEN).unwrap_or_else(|| DEFAULT_LISTEN.to_string());
		let listen = listen_str.parse::<SocketAddr>().map_err(|err| {
			Error::ConfigError(format!("invalid {} {:?}: {}", ENV_LISTEN, listen_str, err))
		})?;

		Ok(Self {
			listen,
			pocketbase_url: var(ENV_POCKETBASE_URL)
				.unwrap_or_else(|| DEFAULT_POCKETBASE_URL.to_string())
				.into(),
			pocketbase_token: var(ENV_POCKETBASE_TOKEN).map(Into::into),
			settings_collection: var(ENV_SETTINGS_COLLECTION)
				.unwrap_or_else(|| {
					vocal_royale_settings_adapter_pocketbase::DEFAULT_COLLECTION.to_string()
				})
				.into(),
		})
	}
}


// vim: ts=4
