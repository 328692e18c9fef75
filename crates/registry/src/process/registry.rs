use std::sync::Arc;

use arc_swap::ArcSwap;
use quern_primitives::{Key, Recipe};

use super::{Process, ProcessRef};
use crate::{RegistrationLock, RegistryError};

const LABEL: &str = "process";

/// Registered processes, kept sorted in process order.
pub struct ProcessRegistry {
	lock: RegistrationLock,
	processes: ArcSwap<Vec<ProcessRef>>,
}

impl ProcessRegistry {
	pub fn new(lock: RegistrationLock) -> Self {
		Self {
			lock,
			processes: ArcSwap::from_pointee(Vec::new()),
		}
	}

	/// Registers a process, replacing any process with the same key.
	///
	/// Returns the replaced process.
	pub fn register(&self, process: Process) -> Result<Option<ProcessRef>, RegistryError> {
		self.lock.ensure_open(LABEL, "register", process.key())?;
		if process.is_fallback() {
			return Err(RegistryError::Rejected {
				registry: LABEL,
				key: process.key().clone(),
				reason: "the fallback process is built in",
			});
		}

		let process = Arc::new(process);
		let mut replaced = None;
		self.processes.rcu(|current| {
			let mut next = Vec::clone(current);
			replaced = match next.binary_search(&process) {
				Ok(pos) => Some(std::mem::replace(&mut next[pos], Arc::clone(&process))),
				Err(pos) => {
					next.insert(pos, Arc::clone(&process));
					None
				}
			};
			next
		});
		tracing::debug!(process = %process.key(), replaced = replaced.is_some(), "registered process");
		Ok(replaced)
	}

	/// Looks up a process by key, including the fallback process.
	pub fn get(&self, key: &Key) -> Option<ProcessRef> {
		let fallback = Process::undefined();
		if fallback.key() == key {
			return Some(fallback);
		}
		self.processes.load().iter().find(|p| p.key() == key).cloned()
	}

	/// First process in process order that handles `recipe`, else the fallback process.
	pub fn process_for(&self, recipe: &dyn Recipe) -> ProcessRef {
		self.processes
			.load()
			.iter()
			.find(|p| p.can_handle(recipe))
			.cloned()
			.unwrap_or_else(Process::undefined)
	}

	/// Registered processes in process order, without the fallback.
	pub fn all(&self) -> Arc<Vec<ProcessRef>> {
		self.processes.load_full()
	}

	pub fn len(&self) -> usize {
		self.processes.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
