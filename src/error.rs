// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Unified error types for df-pv.
//!
//! Every failure that can stop a collection run is one variant of [`enum@Error`].
//! Only [`Error::NotFound`] is recovered locally (the PV column stays empty);
//! everything else aborts the whole run with no partial result.
//!
//! # Example
//!
//! ```rust,no_run
//! use df_pv::{Error, Result};
//!
//! fn describe(result: Result<usize>) -> String {
//!     match result {
//!         Ok(n) => format!("{n} PVCs"),
//!         Err(Error::NodeUnreachable { node, .. }) => format!("node {node} is down"),
//!         Err(e) => e.to_string(),
//!     }
//! }
//! ```

use thiserror::Error;

/// The main error type for df-pv operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Listing nodes or pods failed.
    ///
    /// Raised before any node is contacted, so no work has been started.
    #[error("Failed to {operation}: {reason}")]
    ClusterQuery {
        operation: &'static str,
        reason: String,
    },

    /// A node's stats summary endpoint could not be reached.
    #[error("Failed to get stats from node {node}: {reason}")]
    NodeUnreachable { node: String, reason: String },

    /// The stats summary payload did not have the expected JSON shape.
    #[error("Failed to decode stats summary from node {node}: {source}")]
    Decode {
        node: String,
        #[source]
        source: serde_json::Error,
    },

    /// The claim is not bound to a persistent volume (or does not exist).
    #[error("No persistent volume bound to claim {namespace}/{claim}")]
    NotFound { namespace: String, claim: String },

    /// Cluster credentials or client configuration could not be loaded.
    #[error("Failed to read kubeconfig: {0}")]
    Config(String),

    /// A collection worker panicked or was aborted.
    #[error("Collection worker failed: {0}")]
    Worker(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error must abort the whole collection run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::NotFound { .. })
    }
}

/// A specialized Result type for df-pv operations.
pub type Result<T> = std::result::Result<T, Error>;
