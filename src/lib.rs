//! Daybook library exports for testing

pub mod cli;
pub mod core;
pub mod tui;

pub use crate::core::state::Section;
pub use crate::core::{PostStore, StoreError};
