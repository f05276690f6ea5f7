//! Song slot derivation
//!
//! Every round before the finale takes one song per participant; the finale
//! takes `number_of_final_songs`. The finale is itself one of `total_rounds`,
//! hence the `- 1`.

use crate::prelude::*;

/// Upper bound for both round counts accepted by [`validate_rounds`]
pub const MAX_ROUND_COUNT: i64 = 1000;

/// Number of songs a participant has to choose.
///
/// No bounds checking: non-positive inputs give non-positive results.
pub fn total_song_count(total_rounds: i64, number_of_final_songs: i64) -> i64 {
	total_rounds.saturating_add(number_of_final_songs).saturating_sub(1)
}

/// Labels for every song slot, round slots first, then the finale slots.
///
/// A single finale song is labelled "Finale"; several are numbered
/// "Finale Song 1", "Finale Song 2", ...
///
/// Unchecked like [`total_song_count`]: very large counts are bounded only by
/// memory. Use [`validate_rounds`] on untrusted input.
pub fn song_labels(total_rounds: i64, number_of_final_songs: i64) -> Vec<String> {
	let normal_rounds = total_rounds.saturating_sub(1).max(0);
	let finale_songs = number_of_final_songs.max(0);

	let mut labels = Vec::with_capacity(label_capacity(normal_rounds, finale_songs));
	labels.extend((1..=normal_rounds).map(|i| format!("Round {}", i)));

	if number_of_final_songs == 1 {
		labels.push("Finale".to_string());
	} else {
		labels.extend((1..=finale_songs).map(|i| format!("Finale Song {}", i)));
	}

	labels
}

/// Preallocation hint, capped so huge counts grow the vector on demand
fn label_capacity(normal_rounds: i64, finale_songs: i64) -> usize {
	let capacity = normal_rounds.saturating_add(finale_songs).clamp(0, 2 * MAX_ROUND_COUNT);
	usize::try_from(capacity).unwrap_or_default()
}

/// Reject round configurations the derivations above are not meaningful for
pub fn validate_rounds(total_rounds: i64, number_of_final_songs: i64) -> VrResult<()> {
	if total_rounds < 1 {
		return Err(Error::ValidationError(format!(
			"totalRounds must be at least 1, got {}",
			total_rounds
		)));
	}
	if number_of_final_songs < 1 {
		return Err(Error::ValidationError(format!(
			"numberOfFinalSongs must be at least 1, got {}",
			number_of_final_songs
		)));
	}
	if total_rounds > MAX_ROUND_COUNT || number_of_final_songs > MAX_ROUND_COUNT {
		return Err(Error::ValidationError(format!(
			"round counts must not exceed {}",
			MAX_ROUND_COUNT
		)));
	}
	Ok(())
}


// vim: ts=4
