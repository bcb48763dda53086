//! Core domain types.

use std::fmt;

/// Which way a transform runs, and how it maps onto the transit API.
///
/// The direction decides the URL path segment, the name of the per-item
/// payload field sent to the service, and the name of the result field
/// expected back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    /// URL path segment under the engine mount (`encrypt` or `decrypt`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            Direction::Encrypt => "encrypt",
            Direction::Decrypt => "decrypt",
        }
    }

    /// Name of the per-item field submitted to the service.
    pub fn payload_field(&self) -> &'static str {
        match self {
            Direction::Encrypt => "plaintext",
            Direction::Decrypt => "ciphertext",
        }
    }

    /// Name of the per-item field expected in results.
    pub fn result_field(&self) -> &'static str {
        match self {
            Direction::Encrypt => "ciphertext",
            Direction::Decrypt => "plaintext",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// What to do with empty units (blank lines) during a file transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyUnits {
    /// Drop empty units from the output entirely. This matches the
    /// historical behavior: blank lines are lost on round trip.
    Drop,
    /// Keep an empty output at each empty input position. Empty units are
    /// still never sent to the service.
    Preserve,
}
