use std::future::Future;

use crate::error::Result;
use crate::models::ExtractionResult;

/// Which view the popup shows
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Idle,
    Extracting,
    Success(ExtractionResult),
    Error(String),
}

/// Owns the UI state. Only bridge outcomes move it out of `Extracting`.
#[derive(Debug)]
pub struct Presenter {
    state: UiState,
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter {
    pub fn new() -> Self {
        Self { state: UiState::Idle }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, UiState::Extracting)
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_busy() { "Extracting..." } else { "Extract Queries" }
    }

    /// Enter `Extracting`. Returns false (and changes nothing) if an extraction is
    /// already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.state = UiState::Extracting;
        true
    }

    /// Record the outcome of the extraction started by [`Presenter::begin`]
    pub fn finish(&mut self, outcome: Result<ExtractionResult>) {
        self.state = match outcome {
            Ok(result) => UiState::Success(result),
            Err(e) => UiState::Error(e.user_message()),
        };
    }

    /// Back/retry: return to the initial view
    pub fn reset(&mut self) {
        if !self.is_busy() {
            self.state = UiState::Idle;
        }
    }

    /// Run an extraction through the state machine. Returns false if another
    /// extraction was already running, in which case `extraction` is not polled.
    pub async fn run<F>(&mut self, extraction: F) -> bool
    where
        F: Future<Output = Result<ExtractionResult>>,
    {
        if !self.begin() {
            return false;
        }
        let outcome = extraction.await;
        self.finish(outcome);
        true
    }
}
