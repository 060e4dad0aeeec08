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

//! In-memory [`ClusterApi`] with canned responses.
//!
//! Used by the test suites to drive collection without a live cluster. It
//! also records which nodes were fetched and the peak number of concurrent
//! fetches, so tests can check the worker pool bound.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{ClusterApi, PodPlacement};
use crate::error::{Error, Result};

enum NodeResponse {
    Body(Vec<u8>),
    Unreachable(String),
}

#[derive(Default)]
pub struct StaticCluster {
    nodes: Vec<String>,
    responses: HashMap<String, NodeResponse>,
    delays: HashMap<String, Duration>,
    pods: HashMap<String, Vec<PodPlacement>>,
    bound_volumes: HashMap<(String, String), String>,
    listing_error: Option<String>,
    visits: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl StaticCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node whose stats endpoint answers with `body`.
    pub fn with_node(mut self, node: &str, body: impl Into<Vec<u8>>) -> Self {
        self.nodes.push(node.to_string());
        self.responses
            .insert(node.to_string(), NodeResponse::Body(body.into()));
        self
    }

    /// Add a node whose stats endpoint cannot be reached.
    pub fn with_unreachable_node(mut self, node: &str, reason: &str) -> Self {
        self.nodes.push(node.to_string());
        self.responses.insert(
            node.to_string(),
            NodeResponse::Unreachable(reason.to_string()),
        );
        self
    }

    /// Delay the stats response of `node`.
    pub fn with_delay(mut self, node: &str, delay: Duration) -> Self {
        self.delays.insert(node.to_string(), delay);
        self
    }

    pub fn with_pod(mut self, namespace: &str, pod: &str, node: &str, claims: &[&str]) -> Self {
        self.pods
            .entry(namespace.to_string())
            .or_default()
            .push(PodPlacement {
                pod_name: pod.to_string(),
                node_name: node.to_string(),
                claim_names: claims.iter().map(|c| c.to_string()).collect(),
            });
        self
    }

    pub fn with_bound_volume(mut self, namespace: &str, claim: &str, volume: &str) -> Self {
        self.bound_volumes.insert(
            (namespace.to_string(), claim.to_string()),
            volume.to_string(),
        );
        self
    }

    /// Make node and pod listing fail.
    pub fn with_listing_error(mut self, reason: &str) -> Self {
        self.listing_error = Some(reason.to_string());
        self
    }

    /// Nodes whose stats were requested, in request order.
    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .map(|visits| visits.clone())
            .unwrap_or_default()
    }

    /// Highest number of stats requests that were in flight at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn check_listing(&self, operation: &'static str) -> Result<()> {
        match &self.listing_error {
            Some(reason) => Err(Error::ClusterQuery {
                operation,
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ClusterApi for StaticCluster {
    async fn list_nodes(&self) -> Result<Vec<String>> {
        self.check_listing("list nodes")?;
        Ok(self.nodes.clone())
    }

    async fn list_pods_with_pvcs(&self, namespace: &str) -> Result<Vec<PodPlacement>> {
        self.check_listing("list pods")?;
        Ok(self.pods.get(namespace).cloned().unwrap_or_default())
    }

    async fn proxy_get(&self, node: &str, _path: &str) -> Result<Vec<u8>> {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(node.to_string());
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(node) {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.responses.get(node) {
            Some(NodeResponse::Body(body)) => Ok(body.clone()),
            Some(NodeResponse::Unreachable(reason)) => Err(Error::NodeUnreachable {
                node: node.to_string(),
                reason: reason.clone(),
            }),
            None => Err(Error::NodeUnreachable {
                node: node.to_string(),
                reason: "node not found".to_string(),
            }),
        }
    }

    async fn get_pvc_bound_volume_name(&self, namespace: &str, claim: &str) -> Result<String> {
        self.bound_volumes
            .get(&(namespace.to_string(), claim.to_string()))
            .cloned()
            .ok_or_else(|| Error::NotFound {
                namespace: namespace.to_string(),
                claim: claim.to_string(),
            })
    }
}

/// Build a stats summary body with one pod per `(pod, namespace, volumes)` entry.
///
/// Each volume is `(volume name, optional claim, capacity, used)`; available
/// bytes are `capacity - used` and inode figures are derived from the byte
/// counts so tests can predict them.
pub fn summary_json(pods: &[(&str, &str, &[(&str, Option<&str>, u64, u64)])]) -> String {
    let pods: Vec<serde_json::Value> = pods
        .iter()
        .map(|(pod, namespace, volumes)| {
            let volumes: Vec<serde_json::Value> = volumes
                .iter()
                .map(|(name, claim, capacity, used)| {
                    let mut volume = serde_json::json!({
                        "time": "2024-05-01T12:00:00Z",
                        "availableBytes": capacity - used,
                        "capacityBytes": capacity,
                        "usedBytes": used,
                        "inodesFree": (capacity - used) / 1024,
                        "inodes": capacity / 1024,
                        "inodesUsed": used / 1024,
                        "name": name,
                    });
                    if let Some(claim) = claim {
                        volume["pvcRef"] = serde_json::json!({
                            "name": claim,
                            "namespace": namespace,
                        });
                    }
                    volume
                })
                .collect();

            serde_json::json!({
                "podRef": { "name": pod, "namespace": namespace },
                "volume": volumes,
            })
        })
        .collect();

    serde_json::json!({ "pods": pods }).to_string()
}
