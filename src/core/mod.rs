//! # Core Application Logic
//!
//! The analyzer's business logic. It knows nothing about any specific UI
//! technology. Apart from reading the config file it performs no I/O.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (DisplayState) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • render() (breakdown) │
//!                    │                         │
//!                    │  No network. No UI.     │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │    CLI     │
//!          │  Adapter   │                │ (one-shot) │
//!          │ (ratatui)  │                │            │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `App`, `DisplayState`, `FormInput`
//! - [`action`]: `Action`, `Effect` and the `update()` reducer
//! - [`render`]: `AnalysisResult` → `Breakdown`
//! - [`config`]: config file loading and resolution

pub mod action;
pub mod config;
pub mod render;
pub mod state;
