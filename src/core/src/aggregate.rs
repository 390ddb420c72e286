//! AggregateError - A single error value carrying many underlying errors.
//!
//! The `AggregateError` provides:
//! - A composed message listing every child error's diagnostic text
//! - Read-only, restartable iteration over the children in insertion order
//! - `std::error::Error` compatibility, so it travels through `?`,
//!   `Box<dyn Error>` and `anyhow::Error` like any other error
//!
//! # Example
//!
//! ```rust
//! use settle_core::aggregate::AggregateError;
//!
//! let err = AggregateError::new("2 uploads failed", ["disk full", "timed out"]);
//! assert_eq!(err.name(), "AggregateError");
//! assert_eq!(err.message(), "2 uploads failed\n    disk full\n    timed out");
//! assert_eq!(err.iter().count(), 2);
//! ```

use std::fmt;

/// Prefix applied to every line of the rendered child block.
const INDENT: &str = "    ";

/// An error composed of multiple underlying errors.
///
/// The child errors are collected when the aggregate is built and cannot be
/// added, removed, or reordered afterwards. Each child renders as its
/// `Display` description. When the child's `Debug` output begins with that
/// description and carries more, as an `anyhow::Error` cause chain and
/// backtrace do, the longer `Debug` text is used instead.
#[derive(Clone)]
pub struct AggregateError<E> {
    /// Summary line supplied by the caller
    summary: String,
    /// Summary followed by the indented child diagnostics
    message: String,
    /// Child errors in insertion order
    errors: Vec<E>,
}

impl<E: fmt::Display + fmt::Debug> AggregateError<E> {
    /// Create an aggregate from a summary message and the errors it bundles.
    ///
    /// `errors` is drained eagerly into storage owned by the aggregate.
    pub fn new<I>(message: impl Into<String>, errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let summary = message.into();
        let errors: Vec<E> = errors.into_iter().collect();

        let message = if errors.is_empty() {
            format!("{}\n", summary)
        } else {
            let details = errors
                .iter()
                .map(diagnostic)
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}\n{}", summary, indent(&details))
        };

        Self {
            summary,
            message,
            errors,
        }
    }
}

impl<E> AggregateError<E> {
    /// Type tag distinguishing an aggregate from a plain error.
    pub const NAME: &'static str = "AggregateError";

    /// Get the composed message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the summary message the aggregate was created with.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Get the type tag, always `"AggregateError"`.
    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Number of child errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the aggregate carries no child errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Read-only view of the child errors.
    pub fn errors(&self) -> &[E] {
        &self.errors
    }

    /// Iterate over the child errors in insertion order.
    ///
    /// Each call starts a fresh traversal.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            inner: self.errors.iter(),
        }
    }

    /// Log this aggregate at error level.
    pub fn log(&self) {
        tracing::error!(
            name = self.name(),
            error_count = self.errors.len(),
            summary = %self.summary,
            message = %self.message,
            "Aggregate error"
        );
    }
}

/// Diagnostic text for one child: its description, extended by the `Debug`
/// detail when that detail starts with the description.
fn diagnostic<E: fmt::Display + fmt::Debug>(error: &E) -> String {
    let description = error.to_string();
    let detail = format!("{:?}", error);

    if detail.len() > description.len() && detail.starts_with(&description) {
        detail
    } else {
        description
    }
}

/// Prefix each line of `text` with [`INDENT`], including empty lines.
fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("{}{}", INDENT, line))
        .collect::<Vec<_>>()
        .join("\n")
}

impl<E> fmt::Display for AggregateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl<E: fmt::Debug> fmt::Debug for AggregateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateError")
            .field("summary", &self.summary)
            .field("errors", &self.errors)
            .finish()
    }
}

impl<E: fmt::Display + fmt::Debug> std::error::Error for AggregateError<E> {}

impl<E: PartialEq> PartialEq for AggregateError<E> {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message && self.errors == other.errors
    }
}

impl<E: Eq> Eq for AggregateError<E> {}

// ═══════════════════════════════════════════════════════════════════════════════
// Iteration
// ═══════════════════════════════════════════════════════════════════════════════

/// Borrowing iterator over the errors of an [`AggregateError`].
#[derive(Debug, Clone)]
pub struct Iter<'a, E> {
    inner: std::slice::Iter<'a, E>,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> DoubleEndedIterator for Iter<'_, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> std::iter::FusedIterator for Iter<'_, E> {}

impl<'a, E> IntoIterator for &'a AggregateError<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E> IntoIterator for AggregateError<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
