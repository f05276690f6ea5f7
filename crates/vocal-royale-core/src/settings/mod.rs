//! Competition settings resolution and song slot derivation

pub mod resolver;
pub mod songs;

pub use resolver::{
	DEFAULT_MAX_JUROR_COUNT, DEFAULT_MAX_PARTICIPANT_COUNT, DEFAULT_NUMBER_OF_FINAL_SONGS,
	DEFAULT_ROUND_ELIMINATION_PATTERN, DEFAULT_TOTAL_ROUNDS, SettingsExt, load_settings, resolve,
};
pub use songs::{MAX_ROUND_COUNT, song_labels, total_song_count, validate_rounds};

// vim: ts=4
