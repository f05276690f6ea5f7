//! Common types used throughout Vocal Royale.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

// Timestamp //
//***********//
/// Unix timestamp in seconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(i64::try_from(res.as_secs()).unwrap_or(i64::MAX))
	}

	pub fn add_seconds(&self, seconds: i64) -> Timestamp {
		Timestamp(self.0.saturating_add(seconds))
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

// Competition settings //
//**********************//
/// Persisted competition settings as stored in the record database.
///
/// Every field is optional: a missing key and an explicit `null` are treated
/// the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
	#[serde(default)]
	pub total_rounds: Option<i64>,
	#[serde(default)]
	pub number_of_final_songs: Option<i64>,
	#[serde(default)]
	pub max_participant_count: Option<i64>,
	#[serde(default)]
	pub max_juror_count: Option<i64>,
	#[serde(default)]
	pub song_choice_deadline: Option<String>,
	#[serde(default)]
	pub round_elimination_pattern: Option<String>,
}

/// Effective competition configuration with every default applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionSettings {
	pub total_rounds: i64,
	pub number_of_final_songs: i64,
	pub max_participant_count: i64,
	pub max_juror_count: i64,
	pub song_choice_deadline: Option<String>,
	/// Comma-separated elimination counts, e.g. "5,3,3,2". Not validated.
	pub round_elimination_pattern: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn settings_record_accepts_nulls_and_missing_keys() {
		let json = r#"{"totalRounds": 4, "numberOfFinalSongs": null, "songChoiceDeadline": null}"#;
		let record: SettingsRecord = serde_json::from_str(json).unwrap();
		assert_eq!(record.total_rounds, Some(4));
		assert_eq!(record.number_of_final_songs, None);
		assert_eq!(record.max_juror_count, None);
		assert_eq!(record.song_choice_deadline, None);
	}

	#[test]
	fn settings_record_ignores_unknown_pocketbase_fields() {
		let json = r#"{
			"id": "abc123",
			"collectionName": "settings",
			"created": "2024-05-01 10:00:00.000Z",
			"roundEliminationPattern": "4,4,2",
			"maxParticipantCount": 20
		}"#;
		let record: SettingsRecord = serde_json::from_str(json).unwrap();
		assert_eq!(record.round_elimination_pattern.as_deref(), Some("4,4,2"));
		assert_eq!(record.max_participant_count, Some(20));
	}

	#[test]
	fn competition_settings_serializes_camel_case() {
		let settings = CompetitionSettings {
			total_rounds: 5,
			number_of_final_songs: 2,
			max_participant_count: 15,
			max_juror_count: 3,
			song_choice_deadline: None,
			round_elimination_pattern: "5,3,3,2".into(),
		};
		let value = serde_json::to_value(&settings).unwrap();
		assert_eq!(value["totalRounds"], 5);
		assert_eq!(value["roundEliminationPattern"], "5,3,3,2");
		assert!(value["songChoiceDeadline"].is_null());
	}

	#[test]
	fn timestamp_add_seconds_saturates() {
		assert_eq!(Timestamp(10).add_seconds(5), Timestamp(15));
		assert_eq!(Timestamp(i64::MAX).add_seconds(1), Timestamp(i64::MAX));
	}
}

// vim: ts=4
