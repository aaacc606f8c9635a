//! Non-fatal diagnostics.
//!
//! Nothing here aborts an operation. Constructors and the multiplication
//! dispatcher hand a [`Diagnostic`] to whatever [`DiagnosticSink`] the caller
//! supplied and then carry on. The convenience entry points use
//! [`TracingSink`], which turns each diagnostic into a `tracing` warning.

use std::fmt;

use thiserror::Error;

/// Which input of `C = A * B` a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    A,
    B,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::A => f.write_str("A"),
            Operand::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Diagnostic {
    /// An input of a multiplication shares storage with the output. The
    /// product is still computed, but it may be wrong.
    #[error(
        "input {operand} shares storage with output C, the product may be invalid; \
         copy the input first (this is what `*=` does)"
    )]
    AliasedOperand { operand: Operand },

    /// A nested-list constructor got the wrong number of elements. Missing
    /// elements were zero-filled, surplus ones dropped.
    #[error("initialized a matrix with {supplied} elements, {expected} expected")]
    ElementCount { supplied: usize, expected: usize },
}

/// Receives diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Logs every diagnostic with `tracing::warn!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::AliasedOperand { operand } => {
                tracing::warn!(operand = %operand, "{diagnostic}");
            }
            Diagnostic::ElementCount { supplied, expected } => {
                tracing::warn!(supplied, expected, "{diagnostic}");
            }
        }
    }
}

/// Collects diagnostics, mostly useful in tests.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// True if the memory behind `input` and `output` overlaps.
///
/// Only addresses are compared, never values. Safe code cannot produce an
/// overlapping `&`/`&mut` pair, so this only fires when storage was shared
/// through `unsafe`.
pub fn overlaps<T, U>(input: &[T], output: &[U]) -> bool {
    let input = input.as_ptr_range();
    let output = output.as_ptr_range();
    let (in_start, in_end) = (input.start as usize, input.end as usize);
    let (out_start, out_end) = (output.start as usize, output.end as usize);

    in_start < out_end && out_start < in_end
}
