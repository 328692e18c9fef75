//! Display-side building blocks: cycling slot values, panel layouts and colours.

/// Cycling and computed slot values.
pub mod cyclic;
/// Recipe panels, their slots and the per-process panel registry.
pub mod panel;
/// Colours and resource-pack switches used when decorating items.
pub mod style;

pub use cyclic::{CyclicError, CyclicIngredient, Producer};
pub use panel::{
	Panel, PanelContext, PanelError, PanelFactory, PanelRegistry, PanelSlot, SharedButton,
};
pub use style::{Rgb, Style};
