//! Parameter panel: a declarative set of controls bound to a target through
//! explicit getter/setter closures, grouped into collapsible folders.
//!
//! The panel is renderer-agnostic; the desktop app draws it with egui and
//! routes widget edits back through [`Panel::set_number`] and friends.
//!
//! # Invariants
//! - Number writes are quantised to the step and clamped to the range before
//!   the setter runs; the change callback runs after the setter.
//! - Controls never hold references to their target.

mod control;
mod panel;

pub use control::{Control, ControlId, ControlKind, FolderId, Value};
pub use panel::{Folder, Panel, PanelError};
