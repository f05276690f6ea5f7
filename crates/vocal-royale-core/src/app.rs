//! App state type

use std::sync::Arc;

use crate::apple_music::{AppleMusicConfig, AppleMusicTokenSigner};
use crate::prelude::*;
use vocal_royale_types::settings_adapter::SettingsAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub settings_adapter: Arc<dyn SettingsAdapter>,
	/// Owns the developer token cache for the lifetime of the process
	pub apple_music: AppleMusicTokenSigner,
}

impl std::fmt::Debug for AppState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AppState")
			.field("settings_adapter", &self.settings_adapter)
			.field("apple_music", &self.apple_music)
			.finish()
	}
}

pub type App = Arc<AppState>;

#[derive(Default)]
pub struct AppBuilder {
	settings_adapter: Option<Arc<dyn SettingsAdapter>>,
	apple_music: Option<AppleMusicTokenSigner>,
}

impl AppBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn settings_adapter(&mut self, adapter: Arc<dyn SettingsAdapter>) -> &mut Self {
		self.settings_adapter = Some(adapter);
		self
	}

	pub fn apple_music(&mut self, signer: AppleMusicTokenSigner) -> &mut Self {
		self.apple_music = Some(signer);
		self
	}

	pub fn build(&mut self) -> VrResult<App> {
		let settings_adapter = self
			.settings_adapter
			.take()
			.ok_or_else(|| Error::ConfigError("no settings adapter".into()))?;
		let apple_music = self
			.apple_music
			.take()
			.unwrap_or_else(|| AppleMusicTokenSigner::new(AppleMusicConfig::from_env()));

		Ok(Arc::new(AppState { settings_adapter, apple_music }))
	}
}


// vim: ts=4
