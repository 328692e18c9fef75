//! Process-wide handle for hosts that cannot thread a [`Quern`] through every call.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::{Quern, QuernError};

static INSTALLED: ArcSwapOption<Quern> = ArcSwapOption::const_empty();

/// Publishes `quern` as the process-wide instance. Fails if one is already installed.
pub fn install(quern: Arc<Quern>) -> Result<(), QuernError> {
	let previous = INSTALLED.compare_and_swap(&None::<Arc<Quern>>, Some(quern));
	if previous.is_some() {
		tracing::warn!("a quern instance is already installed");
		return Err(QuernError::AlreadyInstalled);
	}
	tracing::debug!("quern instance installed");
	Ok(())
}

pub fn installed() -> Option<Arc<Quern>> {
	INSTALLED.load_full()
}

/// Removes and returns the process-wide instance.
pub fn uninstall() -> Option<Arc<Quern>> {
	let previous = INSTALLED.swap(None);
	if previous.is_some() {
		tracing::debug!("quern instance uninstalled");
	}
	previous
}
