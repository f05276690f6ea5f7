//! Settings resolution
//!
//! Fills every missing field of a persisted settings record with its
//! default. This is a pass-through, not a validator: values that are present
//! are returned exactly as stored, even when they are inconsistent with each
//! other (e.g. an elimination pattern longer than the number of rounds).

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::prelude::*;
use crate::settings::songs;
use vocal_royale_types::settings_adapter::SettingsAdapter;
use vocal_royale_types::types::{CompetitionSettings, SettingsRecord};

pub const DEFAULT_TOTAL_ROUNDS: i64 = 5;
pub const DEFAULT_NUMBER_OF_FINAL_SONGS: i64 = 2;
pub const DEFAULT_MAX_PARTICIPANT_COUNT: i64 = 15;
pub const DEFAULT_MAX_JUROR_COUNT: i64 = 3;
pub const DEFAULT_ROUND_ELIMINATION_PATTERN: &str = "5,3,3,2";

/// PocketBase serializes datetime fields as "2024-05-01 18:30:00.000Z"
const POCKETBASE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.fZ";

/// Resolve the effective competition settings from an optional record.
///
/// Never fails: an absent record yields the full set of defaults.
pub fn resolve(record: Option<&SettingsRecord>) -> CompetitionSettings {
	let Some(record) = record else {
		return CompetitionSettings {
			total_rounds: DEFAULT_TOTAL_ROUNDS,
			number_of_final_songs: DEFAULT_NUMBER_OF_FINAL_SONGS,
			max_participant_count: DEFAULT_MAX_PARTICIPANT_COUNT,
			max_juror_count: DEFAULT_MAX_JUROR_COUNT,
			song_choice_deadline: None,
			round_elimination_pattern: DEFAULT_ROUND_ELIMINATION_PATTERN.to_string(),
		};
	};

	CompetitionSettings {
		total_rounds: record.total_rounds.unwrap_or(DEFAULT_TOTAL_ROUNDS),
		number_of_final_songs: record
			.number_of_final_songs
			.unwrap_or(DEFAULT_NUMBER_OF_FINAL_SONGS),
		max_participant_count: record
			.max_participant_count
			.unwrap_or(DEFAULT_MAX_PARTICIPANT_COUNT),
		max_juror_count: record.max_juror_count.unwrap_or(DEFAULT_MAX_JUROR_COUNT),
		song_choice_deadline: record.song_choice_deadline.clone(),
		round_elimination_pattern: record
			.round_elimination_pattern
			.clone()
			.unwrap_or_else(|| DEFAULT_ROUND_ELIMINATION_PATTERN.to_string()),
	}
}

/// Read the settings record through `adapter` and resolve it.
///
/// A failing read is logged and treated like a missing record.
pub async fn load_settings(adapter: &dyn SettingsAdapter) -> CompetitionSettings {
	match adapter.read_settings().await {
		Ok(record) => resolve(record.as_ref()),
		Err(err) => {
			warn!("Cannot read competition settings, using defaults: {}", err);
			resolve(None)
		}
	}
}

/// Derived values on resolved settings
pub trait SettingsExt {
	fn total_song_count(&self) -> i64;
	fn song_labels(&self) -> Vec<String>;

	/// Parse the elimination pattern into numbers.
	///
	/// Resolution itself never looks at the pattern; this is for callers that
	/// need the numbers and want an error on malformed input.
	fn parse_elimination_pattern(&self) -> VrResult<Vec<u32>>;

	/// Parsed song choice deadline, if set and well-formed
	fn song_choice_deadline_at(&self) -> Option<DateTime<Utc>>;

	/// Whether the song choice deadline lies before `now`.
	///
	/// An absent or unparseable deadline never counts as passed.
	fn song_choice_deadline_passed(&self, now: Timestamp) -> bool;
}

impl SettingsExt for CompetitionSettings {
	fn total_song_count(&self) -> i64 {
		songs::total_song_count(self.total_rounds, self.number_of_final_songs)
	}

	fn song_labels(&self) -> Vec<String> {
		songs::song_labels(self.total_rounds, self.number_of_final_songs)
	}

	fn parse_elimination_pattern(&self) -> VrResult<Vec<u32>> {
		let pattern = self.round_elimination_pattern.trim();
		if pattern.is_empty() {
			return Ok(Vec::new());
		}
		pattern
			.split(',')
			.map(|part| {
				part.trim().parse::<u32>().map_err(|_| {
					Error::ValidationError(format!("invalid elimination count: {:?}", part))
				})
			})
			.collect()
	}

	fn song_choice_deadline_at(&self) -> Option<DateTime<Utc>> {
		let raw = self.song_choice_deadline.as_deref()?.trim();
		if raw.is_empty() {
			return None;
		}
		if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
			return Some(dt.with_timezone(&Utc));
		}
		match NaiveDateTime::parse_from_str(raw, POCKETBASE_DATETIME_FORMAT) {
			Ok(dt) => Some(dt.and_utc()),
			Err(err) => {
				debug!("unparseable song choice deadline {:?}: {}", raw, err);
				None
			}
		}
	}

	fn song_choice_deadline_passed(&self, now: Timestamp) -> bool {
		self.song_choice_deadline_at().is_some_and(|deadline| deadline.timestamp() < now.0)
	}
}


// vim: ts=4
