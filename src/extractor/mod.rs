//! Extraction of derived views from a parsed conversation.

pub mod reader;

pub use reader::extract;
