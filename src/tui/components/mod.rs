//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app name, backend URL and status
//! - `ResultPanel`: built each frame from `DisplayState`
//!
//! ## Stateful Components (Event-Driven)
//!
//! - `TextField`: editable bordered field, single- or multi-line
//! - `ReviewForm`: the two fields plus the submit control
//! - `ResultPanelState`: scroll position of the result area
//!
//! Components receive external data as props (struct fields or parameters),
//! never by reaching into `App` themselves.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (top status bar)
//! ├── review_form.rs   (product + review + submit)
//! ├── result_panel.rs  (idle / loading / error / result)
//! └── text_field/      (editable field + row layout)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod review_form;
pub mod result_panel;
pub mod text_field;
pub use review_form::{FormEvent, ReviewForm};
pub use result_panel::{ResultPanel, ResultPanelState};
