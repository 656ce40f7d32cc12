// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for configuration and validation.
//!
//! Placement itself never fails: invalid runtime input is coerced and logged
//! so a building always renders something. These errors surface only where
//! configuration is validated or loaded.

/// Result type alias for stackhouse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating or loading building configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A shape parameter does not fit the footprint it is applied to.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A level or building configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A solver accessor was used before a request was bound.
    #[error("solver request accessed before begin()")]
    RequestNotBound,

    /// A named solver is not registered.
    #[error("unknown solver: {0}")]
    UnknownSolver(String),

    /// Configuration JSON could not be parsed or written.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
