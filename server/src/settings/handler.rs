//! Settings handlers

use axum::{
	Json,
	extract::{Query, State},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use vocal_royale_core::settings::{
	MAX_ROUND_COUNT, SettingsExt, load_settings, song_labels, total_song_count, validate_rounds,
};
use vocal_royale_types::types::CompetitionSettings;

/// Effective settings with the derived song slots
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
	#[serde(flatten)]
	pub settings: CompetitionSettings,
	pub total_song_count: i64,
	pub song_labels: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongsQuery {
	pub total_rounds: Option<i64>,
	pub number_of_final_songs: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongsResponse {
	pub total_rounds: i64,
	pub number_of_final_songs: i64,
	pub total_song_count: i64,
	pub song_labels: Vec<String>,
}

/// GET /api/settings - Effective competition settings
///
/// A failing settings read is logged by the resolver and answered with the
/// defaults.
pub async fn get_settings(
	State(app): State<App>,
) -> VrResult<(StatusCode, Json<SettingsResponse>)> {
	let settings = load_settings(app.settings_adapter.as_ref()).await;

	if settings.total_rounds > MAX_ROUND_COUNT || settings.number_of_final_songs > MAX_ROUND_COUNT {
		return Err(Error::ConfigError(format!(
			"stored round counts exceed {}: totalRounds={}, numberOfFinalSongs={}",
			MAX_ROUND_COUNT, settings.total_rounds, settings.number_of_final_songs
		)));
	}

	let response = SettingsResponse {
		total_song_count: settings.total_song_count(),
		song_labels: settings.song_labels(),
		settings,
	};

	Ok((StatusCode::OK, Json(response)))
}

/// GET /api/settings/songs - Song slots for explicit round counts
///
/// Parameters left out come from the effective settings.
pub async fn get_songs(
	State(app): State<App>,
	Query(query): Query<SongsQuery>,
) -> VrResult<(StatusCode, Json<SongsResponse>)> {
	let (total_rounds, number_of_final_songs) =
		match (query.total_rounds, query.number_of_final_songs) {
			(Some(total_rounds), Some(number_of_final_songs)) => {
				(total_rounds, number_of_final_songs)
			}
			(total_rounds, number_of_final_songs) => {
				let settings = load_settings(app.settings_adapter.as_ref()).await;
				(
					total_rounds.unwrap_or(settings.total_rounds),
					number_of_final_songs.unwrap_or(settings.number_of_final_songs),
				)
			}
		};
	validate_rounds(total_rounds, number_of_final_songs)?;

	let response = SongsResponse {
		total_rounds,
		number_of_final_songs,
		total_song_count: total_song_count(total_rounds, number_of_final_songs),
		song_labels: song_labels(total_rounds, number_of_final_songs),
	};

	Ok((StatusCode::OK, Json(response)))
}


// vim: ts=4
