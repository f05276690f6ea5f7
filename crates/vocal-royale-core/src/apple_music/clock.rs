//! Time source for token issuing

use std::sync::atomic::{AtomicI64, Ordering};

use crate::prelude::*;

pub trait Clock: Send + Sync {
	fn now(&self) -> Timestamp;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> Timestamp {
		Timestamp::now()
	}
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
	now: AtomicI64,
}

impl ManualClock {
	pub fn new(now: Timestamp) -> Self {
		Self { now: AtomicI64::new(now.0) }
	}

	pub fn set(&self, now: Timestamp) {
		self.now.store(now.0, Ordering::SeqCst);
	}

	pub fn advance(&self, seconds: i64) {
		self.now.fetch_add(seconds, Ordering::SeqCst);
	}
}

impl Clock for ManualClock {
	fn now(&self) -> Timestamp {
		Timestamp(self.now.load(Ordering::SeqCst))
	}
}

// vim: ts=4
