//! Private key lookup
//!
//! The key is looked up in a fixed order, stopping at the first readable
//! candidate:
//! 1. the configured path, relative to the working directory
//! 2. the configured path as given
//! 3. the fallback location `secrets/AuthKey.p8` in the working directory

use std::path::{Path, PathBuf};

use crate::prelude::*;

pub const FALLBACK_PRIVATE_KEY_PATH: &str = "secrets/AuthKey.p8";

pub trait KeyLoader: Send + Sync {
	/// Read the PEM encoded private key at `path`
	fn load(&self, path: &Path) -> VrResult<String>;
}

/// Reads keys from the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsKeyLoader;

impl KeyLoader for FsKeyLoader {
	fn load(&self, path: &Path) -> VrResult<String> {
		Ok(std::fs::read_to_string(path)?)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyCandidate {
	Configured,
	Fallback,
}

const KEY_CANDIDATES: [KeyCandidate; 2] = [KeyCandidate::Configured, KeyCandidate::Fallback];

impl KeyCandidate {
	fn path(self, configured: Option<&Path>, work_dir: &Path) -> Option<PathBuf> {
		match self {
			// Absolute paths replace the base on join
			KeyCandidate::Configured => configured.map(|path| work_dir.join(path)),
			KeyCandidate::Fallback => Some(work_dir.join(FALLBACK_PRIVATE_KEY_PATH)),
		}
	}
}

#[derive(Debug)]
pub struct LoadedKey {
	pub path: PathBuf,
	pub pem: String,
}

/// Load the private key from the first readable candidate location
pub fn load_private_key(
	loader: &dyn KeyLoader,
	configured: Option<&Path>,
	work_dir: &Path,
) -> VrResult<LoadedKey> {
	let mut tried: Vec<PathBuf> = Vec::with_capacity(KEY_CANDIDATES.len());

	for candidate in KEY_CANDIDATES {
		let Some(path) = candidate.path(configured, work_dir) else { continue };
		if tried.contains(&path) {
			continue;
		}
		match loader.load(&path) {
			Ok(pem) => {
				debug!("Loaded Apple Music private key from {}", path.display());
				return Ok(LoadedKey { path, pem });
			}
			Err(err) => {
				debug!("Private key candidate {} not readable: {}", path.display(), err);
				tried.push(path);
			}
		}
	}

	let tried: Vec<String> = tried.iter().map(|p| p.display().to_string()).collect();
	Err(Error::ConfigError(format!("no readable private key, tried: {}", tried.join(", "))))
}


// vim: ts=4
