//! Namespaced keys (`namespace:value`).
//!
//! Keys identify recipes, processes, extractors, item kinds and tags. They compare
//! lexicographically by namespace, then by value, which gives every keyed container a
//! deterministic iteration order.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Namespace reserved by the host game for its own content.
pub const MINECRAFT_NAMESPACE: &str = "minecraft";
/// Namespace used for keys defined by quern itself.
pub const QUERN_NAMESPACE: &str = "quern";

/// Errors produced when building or parsing a [`Key`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
	#[error("empty {part} in key {input:?}")]
	Empty { part: &'static str, input: String },
	#[error("invalid character {ch:?} in {part} of key {input:?}")]
	InvalidChar {
		part: &'static str,
		ch: char,
		input: String,
	},
}

/// Qualified identifier made of a namespace and a value.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
	namespace: Arc<str>,
	value: Arc<str>,
}

impl Key {
	/// Builds a key after validating both parts.
	pub fn new(namespace: &str, value: &str) -> Result<Self, KeyError> {
		let input = || format!("{namespace}:{value}");
		validate(namespace, "namespace", is_namespace_char, input)?;
		validate(value, "value", is_value_char, input)?;
		Ok(Self {
			namespace: Arc::from(namespace),
			value: Arc::from(value),
		})
	}

	/// Builds a key from compile-time constants.
	///
	/// Both parts must already be valid; this is checked in debug builds only.
	pub fn from_static(namespace: &'static str, value: &'static str) -> Self {
		debug_assert!(
			!namespace.is_empty() && namespace.chars().all(is_namespace_char),
			"invalid static namespace {namespace:?}"
		);
		debug_assert!(
			!value.is_empty() && value.chars().all(is_value_char),
			"invalid static value {value:?}"
		);
		Self {
			namespace: Arc::from(namespace),
			value: Arc::from(value),
		}
	}

	/// Key in the host's reserved namespace.
	pub fn minecraft(value: &str) -> Result<Self, KeyError> {
		Self::new(MINECRAFT_NAMESPACE, value)
	}

	/// Key in quern's own namespace.
	pub fn quern(value: &str) -> Result<Self, KeyError> {
		Self::new(QUERN_NAMESPACE, value)
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	/// Returns true if this key lives in the host's reserved namespace.
	pub fn is_minecraft(&self) -> bool {
		&*self.namespace == MINECRAFT_NAMESPACE
	}

	/// Shortest textual form: the bare value for host keys, `namespace:value` otherwise.
	pub fn as_minimal_string(&self) -> String {
		if self.is_minecraft() {
			self.value.to_string()
		} else {
			self.to_string()
		}
	}
}

fn validate(
	part: &str,
	label: &'static str,
	allowed: fn(char) -> bool,
	input: impl Fn() -> String,
) -> Result<(), KeyError> {
	if part.is_empty() {
		return Err(KeyError::Empty {
			part: label,
			input: input(),
		});
	}
	match part.chars().find(|&ch| !allowed(ch)) {
		Some(ch) => Err(KeyError::InvalidChar {
			part: label,
			ch,
			input: input(),
		}),
		None => Ok(()),
	}
}

fn is_namespace_char(ch: char) -> bool {
	matches!(ch, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

fn is_value_char(ch: char) -> bool {
	is_namespace_char(ch) || ch == '/'
}

impl FromStr for Key {
	type Err = KeyError;

	/// Parses `namespace:value`; a bare value lands in the host namespace.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.split_once(':') {
			Some((namespace, value)) => Self::new(namespace, value),
			None => Self::minecraft(s),
		}
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.namespace, self.value)
	}
}

impl fmt::Debug for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Key({self})")
	}
}

impl Serialize for Key {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Key {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		raw.parse().map_err(serde::de::Error::custom)
	}
}
