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

use std::collections::BTreeSet;

use tracing::debug;

use crate::cluster::ClusterApi;
use crate::error::Result;

/// Nodes that have to be queried for `desired_namespace`.
///
/// With no namespace every node is returned. With a namespace only the nodes
/// running a pod of that namespace that mounts a claim are returned, so
/// nodes that cannot contribute a row are never contacted. The result is
/// sorted and free of duplicates.
pub async fn select_nodes(
    cluster: &dyn ClusterApi,
    desired_namespace: &str,
) -> Result<Vec<String>> {
    let nodes: BTreeSet<String> = if desired_namespace.is_empty() {
        cluster.list_nodes().await?.into_iter().collect()
    } else {
        cluster
            .list_pods_with_pvcs(desired_namespace)
            .await?
            .into_iter()
            .filter(|pod| pod.claim_names.iter().any(|claim| !claim.is_empty()))
            .map(|pod| pod.node_name)
            .filter(|node| !node.is_empty())
            .collect()
    };

    debug!(
        "Selected {} node(s) for namespace {:?}",
        nodes.len(),
        desired_namespace
    );
    Ok(nodes.into_iter().collect())
}
