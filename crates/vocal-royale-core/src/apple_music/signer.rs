//! Developer token signing and caching

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::config::AppleMusicConfig;
use super::key::{self, FsKeyLoader, KeyLoader};
use crate::prelude::*;

/// A cached token is not handed out during its last minute
pub const CACHE_SAFETY_MARGIN_SECS: i64 = 60;

/// Developer token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperTokenClaims {
	pub iss: Box<str>,
	pub iat: Timestamp,
	pub exp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
	pub token: Box<str>,
	pub expires_at: Timestamp,
}

impl SignedToken {
	fn is_usable_at(&self, now: Timestamp) -> bool {
		now < self.expires_at.add_seconds(-CACHE_SAFETY_MARGIN_SECS)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
	/// Configured pre-built token
	Override,
	Cached,
	Signed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingCredential {
	KeyId,
	TeamId,
}

impl std::fmt::Display for MissingCredential {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			MissingCredential::KeyId => write!(f, "key id"),
			MissingCredential::TeamId => write!(f, "team id"),
		}
	}
}

/// Result of a token request
#[derive(Debug)]
pub enum TokenOutcome {
	Issued { token: Box<str>, source: TokenSource },
	/// Signing credentials are not configured
	NotConfigured(MissingCredential),
	/// Credentials are configured but no token could be produced
	Failed(Error),
}

impl TokenOutcome {
	pub fn into_token(self) -> Option<Box<str>> {
		match self {
			TokenOutcome::Issued { token, .. } => Some(token),
			TokenOutcome::NotConfigured(_) | TokenOutcome::Failed(_) => None,
		}
	}
}

/// Signs Apple Music developer tokens and caches the last one issued
pub struct AppleMusicTokenSigner {
	config: AppleMusicConfig,
	clock: Arc<dyn Clock>,
	key_loader: Arc<dyn KeyLoader>,
	work_dir: PathBuf,
	cache: Mutex<Option<SignedToken>>,
}

impl std::fmt::Debug for AppleMusicTokenSigner {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AppleMusicTokenSigner")
			.field("config", &self.config)
			.field("work_dir", &self.work_dir)
			.field(
				"cached_until",
				&self.cache.try_lock().map(|cache| cache.as_ref().map(|t| t.expires_at)),
			)
			.finish_non_exhaustive()
	}
}

impl AppleMusicTokenSigner {
	pub fn new(config: AppleMusicConfig) -> Self {
		Self {
			config,
			clock: Arc::new(SystemClock),
			key_loader: Arc::new(FsKeyLoader),
			work_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
			cache: Mutex::new(None),
		}
	}

	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;
		self
	}

	pub fn with_key_loader(mut self, key_loader: Arc<dyn KeyLoader>) -> Self {
		self.key_loader = key_loader;
		self
	}

	pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
		self.work_dir = work_dir.into();
		self
	}

	pub fn config(&self) -> &AppleMusicConfig {
		&self.config
	}

	/// The currently cached token, if any (regardless of its validity)
	pub fn cached(&self) -> Option<SignedToken> {
		self.cache.lock().clone()
	}

	/// Get a developer token, or `None` if the integration is unavailable.
	///
	/// Never fails: the reason for a missing token is only logged.
	pub fn get_token(&self) -> Option<Box<str>> {
		match self.issue() {
			TokenOutcome::Issued { token, source } => {
				debug!(source = ?source, "Apple Music developer token issued");
				Some(token)
			}
			TokenOutcome::NotConfigured(missing) => {
				debug!("Apple Music integration not configured: missing {}", missing);
				None
			}
			TokenOutcome::Failed(err) => {
				warn!("Cannot issue Apple Music developer token: {}", err);
				None
			}
		}
	}

	/// Get a developer token with the detailed outcome
	pub fn issue(&self) -> TokenOutcome {
		if let Some(token) = &self.config.developer_token {
			return TokenOutcome::Issued { token: token.clone(), source: TokenSource::Override };
		}

		let Some(key_id) = self.config.key_id.as_deref() else {
			return TokenOutcome::NotConfigured(MissingCredential::KeyId);
		};
		let Some(team_id) = self.config.team_id.as_deref() else {
			return TokenOutcome::NotConfigured(MissingCredential::TeamId);
		};

		// Held until the new token is stored so concurrent callers sign only once
		let mut cache = self.cache.lock();
		let now = self.clock.now();

		if let Some(cached) = cache.as_ref().filter(|cached| cached.is_usable_at(now)) {
			return TokenOutcome::Issued { token: cached.token.clone(), source: TokenSource::Cached };
		}

		let key = match key::load_private_key(
			self.key_loader.as_ref(),
			self.config.private_key_path.as_deref(),
			&self.work_dir,
		) {
			Ok(key) => key,
			Err(err) => return TokenOutcome::Failed(err),
		};

		match self.sign(key_id, team_id, &key.pem, now) {
			Ok(signed) => {
				info!(
					key_id = %key_id,
					expires_at = %signed.expires_at,
					"Signed new Apple Music developer token"
				);
				let token = signed.token.clone();
				*cache = Some(signed);
				TokenOutcome::Issued { token, source: TokenSource::Signed }
			}
			Err(err) => {
				error!(
					key_path = %key.path.display(),
					"Apple Music token signing failed: {}", err
				);
				TokenOutcome::Failed(err)
			}
		}
	}

	fn sign(
		&self,
		key_id: &str,
		team_id: &str,
		pem: &str,
		now: Timestamp,
	) -> VrResult<SignedToken> {
		let expires_at = now.add_seconds(self.config.token_ttl_secs());

		let mut header = Header::new(Algorithm::ES256);
		header.kid = Some(key_id.to_string());

		let claims = DeveloperTokenClaims { iss: team_id.into(), iat: now, exp: expires_at };

		let encoding_key = EncodingKey::from_ec_pem(pem.as_bytes())?;
		let token = jsonwebtoken::encode(&header, &claims, &encoding_key)?;

		Ok(SignedToken { token: token.into(), expires_at })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::apple_music::clock::ManualClock;
	use std::path::Path;
	use std::sync::atomic::{AtomicUsize, Ordering};

	/// Loader that counts calls and never finds a key
	#[derive(Default)]
	struct CountingLoader {
		calls: AtomicUsize,
	}

	impl KeyLoader for CountingLoader {
		fn load(&self, _path: &Path) -> VrResult<String> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			Err(Error::NotFound)
		}
	}

	fn config() -> AppleMusicConfig {
		AppleMusicConfig {
			key_id: Some("KEY1234567".into()),
			team_id: Some("TEAM123456".into()),
			..Default::default()
		}
	}

	#[test]
	fn override_token_wins() {
		let loader = Arc::new(CountingLoader::default());
		let signer = AppleMusicTokenSigner::new(AppleMusicConfig {
			developer_token: Some("prebuilt.token.value".into()),
			..config()
		})
		.with_key_loader(loader.clone());

		match signer.issue() {
			TokenOutcome::Issued { token, source } => {
				assert_eq!(&*token, "prebuilt.token.value");
				assert_eq!(source, TokenSource::Override);
			}
			other => panic!("unexpected outcome: {:?}", other),
		}
		assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
		assert!(signer.cached().is_none());
	}

	#[test]
	fn missing_credentials_are_reported_without_reading_keys() {
		let loader = Arc::new(CountingLoader::default());

		let signer = AppleMusicTokenSigner::new(AppleMusicConfig { key_id: None, ..config() })
			.with_key_loader(loader.clone());
		assert!(matches!(signer.issue(), TokenOutcome::NotConfigured(MissingCredential::KeyId)));

		let signer = AppleMusicTokenSigner::new(AppleMusicConfig { team_id: None, ..config() })
			.with_key_loader(loader.clone());
		assert!(matches!(signer.issue(), TokenOutcome::NotConfigured(MissingCredential::TeamId)));
		assert_eq!(signer.get_token(), None);

		assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn unreadable_key_fails_without_caching() {
		let loader = Arc::new(CountingLoader::default());
		let signer = AppleMusicTokenSigner::new(config())
			.with_key_loader(loader.clone())
			.with_work_dir("/nonexistent");

		assert!(matches!(signer.issue(), TokenOutcome::Failed(Error::ConfigError(_))));
		assert!(signer.cached().is_none());
		assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn cached_token_usable_until_safety_margin() {
		let token = SignedToken { token: "a.b.c".into(), expires_at: Timestamp(1_000) };
		assert!(token.is_usable_at(Timestamp(0)));
		assert!(token.is_usable_at(Timestamp(939)));
		assert!(!token.is_usable_at(Timestamp(940)));
		assert!(!token.is_usable_at(Timestamp(1_000)));
	}

	#[test]
	fn manual_clock_drives_now() {
		let clock = Arc::new(ManualClock::new(Timestamp(100)));
		clock.advance(5);
		assert_eq!(clock.now(), Timestamp(105));
	}
}

// vim: ts=4
