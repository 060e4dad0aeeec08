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

//! Cluster API seam.
//!
//! Collection code only talks to the cluster through [`ClusterApi`], so the
//! pipeline can be driven by [`KubeCluster`] in production and by an
//! in-memory fake in tests.

pub mod fake;
pub mod kube_client;

use async_trait::async_trait;

use crate::error::Result;

pub use kube_client::KubeCluster;

/// A pod that mounts at least one persistent volume claim, and where it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodPlacement {
    pub pod_name: String,
    pub node_name: String,
    pub claim_names: Vec<String>,
}

/// Operations df-pv needs from the cluster.
///
/// Implementations must be thread-safe (`Send + Sync`); one instance is
/// shared by every collection worker.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Names of every node in the cluster.
    ///
    /// Fails with [`Error::ClusterQuery`](crate::Error::ClusterQuery).
    async fn list_nodes(&self) -> Result<Vec<String>>;

    /// Scheduled pods in `namespace` that mount a claim.
    ///
    /// Fails with [`Error::ClusterQuery`](crate::Error::ClusterQuery).
    async fn list_pods_with_pvcs(&self, namespace: &str) -> Result<Vec<PodPlacement>>;

    /// Raw GET against `path` on the node proxy, e.g. `stats/summary`.
    ///
    /// Fails with [`Error::NodeUnreachable`](crate::Error::NodeUnreachable).
    async fn proxy_get(&self, node: &str, path: &str) -> Result<Vec<u8>>;

    /// Name of the persistent volume bound to `claim`.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound).
    async fn get_pvc_bound_volume_name(&self, namespace: &str, claim: &str) -> Result<String>;
}
