//! # Template method: a fixed document skeleton with a swappable step
//!
//! [`DocProcessor::operate`] is the skeleton; the content step is a strategy
//! closure held by the processor rather than an overridden method.
//!
//! ## Example
//! ```rust
//! use patternbus::patterns::template::DocProcessor;
//!
//! let doc = DocProcessor::local();
//! assert_eq!(doc.operate(), "processed the document, content: this is a local doc.");
//!
//! let doc = doc.with_step(|| "patched".to_string());
//! assert_eq!(doc.operate(), "processed the document, content: patched");
//! ```

use std::fmt;

type ContentStep = Box<dyn Fn() -> String + Send + Sync>;

/// Document processor: fixed skeleton around a content step.
pub struct DocProcessor {
    kind: &'static str,
    step: ContentStep,
}

impl DocProcessor {
    /// Processor with a custom content step.
    pub fn new<F>(kind: &'static str, step: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            kind,
            step: Box::new(step),
        }
    }

    /// Local-file document variant.
    pub fn local() -> Self {
        Self::new("local", || "this is a local doc.".to_string())
    }

    /// Network document variant.
    pub fn net() -> Self {
        Self::new("net", || "this is a net doc.".to_string())
    }

    /// Replaces the content step, keeping the skeleton.
    #[must_use]
    pub fn with_step<F>(mut self, step: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.step = Box::new(step);
        self
    }

    /// Variant label.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Runs the skeleton.
    pub fn operate(&self) -> String {
        format!("processed the document, content: {}", (self.step)())
    }
}

impl fmt::Debug for DocProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocProcessor")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_share_the_skeleton() {
        assert_eq!(
            DocProcessor::net().operate(),
            "processed the document, content: this is a net doc."
        );
        assert_eq!(DocProcessor::local().kind(), "local");
    }

    #[test]
    fn step_can_capture_state() {
        let title = String::from("report.md");
        let doc = DocProcessor::new("custom", move || format!("file {title}"));
        assert_eq!(doc.operate(), "processed the document, content: file report.md");
    }
}
