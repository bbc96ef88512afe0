//! Presentation of extraction results: UI state machine and renderers.

pub mod html;
pub mod state;
pub mod text;

pub use html::{escape_html, render_page, render_results_view};
pub use state::{Presenter, UiState};
pub use text::render_text;
