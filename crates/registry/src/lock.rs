use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use quern_primitives::Key;

/// Errors returned by registration calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// The registries were frozen before the call.
	#[error("{registry} registry is already initialized; cannot {action} {key}")]
	Locked {
		registry: &'static str,
		action: &'static str,
		key: Key,
	},
	/// The entry can never be registered.
	#[error("{registry} registry rejected {key}: {reason}")]
	Rejected {
		registry: &'static str,
		key: Key,
		reason: &'static str,
	},
}

/// One-way switch shared by every registry of a quern instance.
///
/// Clones observe the same state. Once locked it stays locked.
#[derive(Debug, Clone, Default)]
pub struct RegistrationLock(Arc<AtomicBool>);

impl RegistrationLock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Freezes every registry sharing this lock. Returns false if it was already locked.
	pub fn lock(&self) -> bool {
		!self.0.swap(true, Ordering::AcqRel)
	}

	pub fn is_locked(&self) -> bool {
		self.0.load(Ordering::Acquire)
	}

	/// Fails with [`RegistryError::Locked`] once the lock is engaged.
	pub fn ensure_open(&self, registry: &'static str, action: &'static str, key: &Key) -> Result<(), RegistryError> {
		if self.is_locked() {
			tracing::warn!(registry, action, key = %key, "registration after initialization");
			return Err(RegistryError::Locked {
				registry,
				action,
				key: key.clone(),
			});
		}
		Ok(())
	}
}
