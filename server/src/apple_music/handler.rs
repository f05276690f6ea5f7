use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::prelude::*;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
	pub token: Box<str>,
}

/// GET /api/apple-music/token - Developer token for the Apple Music API
pub async fn get_token(State(app): State<App>) -> VrResult<(StatusCode, Json<TokenResponse>)> {
	// Key loading and signing block while the token cache is locked
	let token = tokio::task::spawn_blocking(move || app.apple_music.get_token())
		.await
		.map_err(|err| Error::Internal(format!("token task failed: {}", err)))?
		.ok_or_else(|| Error::ServiceUnavailable("apple music unavailable".into()))?;

	Ok((StatusCode::OK, Json(TokenResponse { token })))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use vocal_royale_core::AppBuilder;
	use vocal_royale_core::apple_music::{AppleMusicConfig, AppleMusicTokenSigner};
	use vocal_royale_types::settings_adapter::InMemorySettingsAdapter;

	fn app_with(config: AppleMusicConfig) -> App {
		AppBuilder::new()
			.settings_adapter(Arc::new(InMemorySettingsAdapter::default()))
			.apple_music(AppleMusicTokenSigner::new(config))
			.build()
			.unwrap()
	}

	#[tokio::test]
	async fn returns_override_token() {
		let app = app_with(AppleMusicConfig {
			developer_token: Some("prebuilt.jwt.token".into()),
			..AppleMusicConfig::default()
		});
		let (status, Json(res)) = get_token(State(app)).await.unwrap();
		assert_eq!(status, StatusCode::OK);
		assert_eq!(&*res.token, "prebuilt.jwt.token");
	}

	#[tokio::test]
	async fn unconfigured_is_unavailable() {
		let res = get_token(State(app_with(AppleMusicConfig::default()))).await;
		assert!(matches!(res, Err(Error::ServiceUnavailable(_))));
	}
}

// vim: ts=4
