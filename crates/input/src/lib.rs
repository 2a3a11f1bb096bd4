//! Input mapping: keyboard keys to high-level actions.
//!
//! # Invariants
//! - Unbound keys map to [`Action::Noop`], never to an error.

pub mod action;

pub use action::{Action, KeyBindings};
