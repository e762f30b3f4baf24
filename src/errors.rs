// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The failures a caller can provoke.  Broken internal invariants are
//! not listed here; those panic.

use failure::Fail;

/// Everything that can go wrong before a computation is allowed to
/// start, plus out-of-range lookups on a domain.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum FracError {
    /// A sample count, iteration count, radius, or palette setting
    /// that no computation can be run with.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// The grid handed to the engine has no rows or no columns.
    #[fail(display = "the domain must be sampled at least once along each axis")]
    EmptyDomain,

    /// A sample was requested outside of a domain.
    #[fail(
        display = "sample ({}, {}) is outside of a {}x{} domain",
        col, row, cols, rows
    )]
    OutOfBounds {
        /// Requested column.
        col: usize,
        /// Requested row.
        row: usize,
        /// Columns in the domain.
        cols: usize,
        /// Rows in the domain.
        rows: usize,
    },
}

impl FracError {
    pub(crate) fn invalid<S: Into<String>>(reason: S) -> FracError {
        FracError::InvalidConfiguration(reason.into())
    }
}
