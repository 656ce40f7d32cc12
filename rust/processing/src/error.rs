// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for building configuration and build passes
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading or validating a building
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid building configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Core error: {0}")]
    Core(#[from] stackhouse_core::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] stackhouse_geometry::Error),
}
