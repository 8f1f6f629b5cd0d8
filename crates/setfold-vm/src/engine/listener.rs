//! Sinks for recognition errors.

use super::error::RecognitionError;

/// Receives every recognition error as it is reported.
pub trait ErrorListener {
    fn syntax_error(&mut self, error: &RecognitionError);
}

/// Prints `line L:C message` to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleErrorListener;

impl ErrorListener for ConsoleErrorListener {
    fn syntax_error(&mut self, error: &RecognitionError) {
        eprintln!("{error}");
    }
}

/// Keeps reported errors in order.
#[derive(Debug, Default, Clone)]
pub struct ErrorCollector {
    errors: Vec<RecognitionError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[RecognitionError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// One `line L:C message` line per error.
    pub fn render(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_errors(self) -> Vec<RecognitionError> {
        self.errors
    }
}

impl ErrorListener for ErrorCollector {
    fn syntax_error(&mut self, error: &RecognitionError) {
        self.errors.push(error.clone());
    }
}

impl<L: ErrorListener + ?Sized> ErrorListener for &mut L {
    fn syntax_error(&mut self, error: &RecognitionError) {
        (**self).syntax_error(error);
    }
}
