//! Adapter that reads the persisted competition settings record.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{prelude::*, types::SettingsRecord};

#[async_trait]
pub trait SettingsAdapter: Debug + Send + Sync {
	/// Reads the current settings record.
	///
	/// Returns `Ok(None)` when no record has been created yet.
	async fn read_settings(&self) -> VrResult<Option<SettingsRecord>>;
}

/// Settings adapter holding a fixed record in memory.
///
/// Used for local development and tests.
#[derive(Debug, Default)]
pub struct InMemorySettingsAdapter {
	record: parking_lot::RwLock<Option<SettingsRecord>>,
}

impl InMemorySettingsAdapter {
	pub fn new(record: Option<SettingsRecord>) -> Self {
		Self { record: parking_lot::RwLock::new(record) }
	}

	pub fn set(&self, record: Option<SettingsRecord>) {
		*self.record.write() = record;
	}
}

#[async_trait]
impl SettingsAdapter for InMemorySettingsAdapter {
	async fn read_settings(&self) -> VrResult<Option<SettingsRecord>> {
		Ok(self.record.read().clone())
	}
}

// vim: ts=4
