//! Apple Music signer configuration

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::prelude::*;

pub const ENV_DEVELOPER_TOKEN: &str = "APPLE_MUSIC_DEVELOPER_TOKEN";
pub const ENV_KEY_ID: &str = "APPLE_MUSIC_KEY_ID";
pub const ENV_TEAM_ID: &str = "APPLE_MUSIC_TEAM_ID";
pub const ENV_PRIVATE_KEY_PATH: &str = "APPLE_MUSIC_PRIVATE_KEY_PATH";
pub const ENV_TOKEN_TTL_DAYS: &str = "APPLE_MUSIC_TOKEN_TTL_DAYS";
pub const ENV_SECRETS_FILE: &str = "VOCAL_ROYALE_SECRETS_FILE";

pub const DEFAULT_SECRETS_FILE: &str = ".env.secrets";

pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;
pub const MIN_TOKEN_TTL_DAYS: i64 = 1;
/// Apple rejects developer tokens valid for longer than 6 months
pub const MAX_TOKEN_TTL_DAYS: i64 = 180;

const SECS_PER_DAY: i64 = 86_400;

#[derive(Clone, Default)]
pub struct AppleMusicConfig {
	/// Pre-built token, bypasses signing entirely
	pub developer_token: Option<Box<str>>,
	pub key_id: Option<Box<str>>,
	/// Team id, used as the token issuer
	pub team_id: Option<Box<str>>,
	pub private_key_path: Option<PathBuf>,
	pub token_ttl_days: Option<i64>,
}

impl std::fmt::Debug for AppleMusicConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AppleMusicConfig")
			.field("developer_token", &self.developer_token.as_ref().map(|_| "<redacted>"))
			.field("key_id", &self.key_id)
			.field("team_id", &self.team_id)
			.field("private_key_path", &self.private_key_path)
			.field("token_ttl_days", &self.token_ttl_days)
			.finish()
	}
}

impl AppleMusicConfig {
	/// Read the configuration from the process environment, falling back to
	/// the static secrets file for the key id and team id.
	pub fn from_env() -> Self {
		let secrets_path = std::env::var(ENV_SECRETS_FILE)
			.ok()
			.filter(|path| !path.trim().is_empty())
			.unwrap_or_else(|| DEFAULT_SECRETS_FILE.to_string());

		let secrets = match SecretsFile::load(&secrets_path) {
			Ok(secrets) => secrets,
			Err(err) => {
				warn!("Cannot read secrets file {}: {}", secrets_path, err);
				None
			}
		};

		Self::from_lookup(|name| std::env::var(name).ok(), secrets.as_ref())
	}

	/// Build the configuration from an arbitrary variable lookup.
	///
	/// Empty values count as unset.
	pub fn from_lookup<F>(lookup: F, secrets: Option<&SecretsFile>) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |name: &str| -> Option<String> {
			lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
		};
		let with_fallback = |name: &str| -> Option<Box<str>> {
			var(name)
				.or_else(|| secrets.and_then(|s| s.get(name)).map(str::to_string))
				.map(Into::into)
		};

		let token_ttl_days = var(ENV_TOKEN_TTL_DAYS).and_then(|days| match days.parse::<i64>() {
			Ok(days) => Some(days),
			Err(_) => {
				warn!("Ignoring invalid {}: {:?}", ENV_TOKEN_TTL_DAYS, days);
				None
			}
		});

		Self {
			developer_token: var(ENV_DEVELOPER_TOKEN).map(Into::into),
			key_id: with_fallback(ENV_KEY_ID),
			team_id: with_fallback(ENV_TEAM_ID),
			private_key_path: var(ENV_PRIVATE_KEY_PATH).map(PathBuf::from),
			token_ttl_days,
		}
	}

	/// Token lifetime in seconds, clamped to what Apple accepts
	pub fn token_ttl_secs(&self) -> i64 {
		self.token_ttl_days
			.unwrap_or(DEFAULT_TOKEN_TTL_DAYS)
			.clamp(MIN_TOKEN_TTL_DAYS, MAX_TOKEN_TTL_DAYS)
			* SECS_PER_DAY
	}
}

/// Static secrets file in dotenv format (`KEY=value` per line)
#[derive(Debug, Clone, Default)]
pub struct SecretsFile {
	vars: HashMap<String, String>,
}

impl SecretsFile {
	/// Load a secrets file. A missing file is not an error.
	pub fn load(path: impl AsRef<Path>) -> VrResult<Option<Self>> {
		match std::fs::read_to_string(path.as_ref()) {
			Ok(content) => Ok(Some(Self::parse(&content))),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
			Err(err) => Err(err.into()),
		}
	}

	pub fn parse(content: &str) -> Self {
		let vars = content
			.lines()
			.map(str::trim)
			.filter(|line| !line.is_empty() && !line.starts_with('#'))
			.filter_map(|line| {
				let line = line.strip_prefix("export ").unwrap_or(line);
				let (key, value) = line.split_once('=')?;
				Some((key.trim().to_string(), parse_value(value.trim()).to_string()))
			})
			.filter(|(key, value)| !key.is_empty() && !value.is_empty())
			.collect();

		Self { vars }
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.vars.get(name).map(String::as_str)
	}
}

/// Quoted values are taken verbatim; unquoted ones end at an inline ` #` comment
fn parse_value(value: &str) -> &str {
	for quote in ['"', '\''] {
		if let Some(rest) = value.strip_prefix(quote)
			&& let Some((inner, tail)) = rest.split_once(quote)
			&& (tail.trim().is_empty() || tail.trim_start().starts_with('#'))
		{
			return inner;
		}
	}
	match value.find(" #").or_else(|| value.find("\t#")) {
		Some(pos) => value[..pos].trim_end(),
		None => value,
	}
}


// vim: ts=4
