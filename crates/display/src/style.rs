use std::fmt;
use std::str::FromStr;

/// 24-bit colour written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour {0:?}, expected #RRGGBB")]
pub struct ColorParseError(pub String);

impl FromStr for Rgb {
	type Err = ColorParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let err = || ColorParseError(s.to_string());
		let hex = s.strip_prefix('#').ok_or_else(err)?;
		if hex.len() != 6 || !hex.is_ascii() {
			return Err(err());
		}
		let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
		Ok(Self(channel(0)?, channel(2)?, channel(4)?))
	}
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
	}
}

impl Rgb {
	/// Wraps `text` in a colour tag understood by the host's text renderer.
	pub fn paint(&self, text: &str) -> String {
		format!("<{self}>{text}</{self}>")
	}
}

/// Colours and pack switches for decorated items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
	pub has_resource_pack: bool,
	pub primary: Rgb,
	pub secondary: Rgb,
	pub tertiary: Rgb,
	pub quaternary: Rgb,
}

impl Default for Style {
	fn default() -> Self {
		Self {
			has_resource_pack: false,
			primary: Rgb(0xAE, 0xA4, 0x4D),
			secondary: Rgb(0x95, 0x99, 0x56),
			tertiary: Rgb(0x33, 0x65, 0x8A),
			quaternary: Rgb(0x86, 0xBB, 0xD8),
		}
	}
}
