//! # Core Application Logic
//!
//! This module contains Daybook's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • PostStore (files)    │
//!                    │  • State + Action       │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │    CLI     │
//!            │  Adapter   │            │ subcommands│
//!            │ (ratatui)  │            │   (clap)   │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`]: `PostStore`, one text file per post in a single directory
//! - [`post`]: on-disk format, filename derivation, validation
//! - [`config`]: layered configuration
//! - [`state`]: the `App` struct, all navigation state in one place
//! - [`action`]: the `Action` enum and the `update()` reducer

pub mod action;
pub mod config;
pub mod post;
pub mod state;
pub mod store;

pub use store::{PostStore, StoreError};
