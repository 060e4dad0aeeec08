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

use std::path::Path;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Node, PersistentVolumeClaim, Pod};
use kube::api::{Api, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config, ResourceExt};
use tracing::debug;

use super::{ClusterApi, PodPlacement};
use crate::error::{Error, Result};

/// [`ClusterApi`] backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from an explicit kubeconfig and/or context, falling back
    /// to the usual inference (`KUBECONFIG`, `~/.kube/config`, in-cluster).
    pub async fn connect(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<Self> {
        let options = KubeConfigOptions {
            context: context.map(str::to_string),
            ..Default::default()
        };

        let config = match (kubeconfig, context) {
            (Some(path), _) => {
                let kubeconfig =
                    Kubeconfig::read_from(path).map_err(|e| Error::Config(e.to_string()))?;
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(|e| Error::Config(e.to_string()))?
            }
            (None, Some(_)) => Config::from_kubeconfig(&options)
                .await
                .map_err(|e| Error::Config(e.to_string()))?,
            (None, None) => Config::infer()
                .await
                .map_err(|e| Error::Config(e.to_string()))?,
        };

        debug!("Connecting to cluster at {}", config.cluster_url);
        let client = Client::try_from(config)
            .map_err(|e| Error::Config(format!("failed to create client: {e}")))?;
        Ok(Self::new(client))
    }
}

/// Where `pod` runs and which claims it mounts; `None` when it is unscheduled
/// or mounts no claim.
pub fn placement_from_pod(pod: &Pod) -> Option<PodPlacement> {
    let spec = pod.spec.as_ref()?;
    let node_name = spec.node_name.clone().filter(|n| !n.is_empty())?;

    let claim_names: Vec<String> = spec
        .volumes
        .iter()
        .flatten()
        .filter_map(|v| v.persistent_volume_claim.as_ref())
        .map(|pvc| pvc.claim_name.clone())
        .filter(|name| !name.is_empty())
        .collect();

    if claim_names.is_empty() {
        return None;
    }

    Some(PodPlacement {
        pod_name: pod.name_any(),
        node_name,
        claim_names,
    })
}

#[async_trait]
impl ClusterApi for KubeCluster {
    async fn list_nodes(&self) -> Result<Vec<String>> {
        let api: Api<Node> = Api::all(self.client.clone());
        let nodes = api
            .list(&ListParams::default())
            .await
            .map_err(|e| Error::ClusterQuery {
                operation: "list nodes",
                reason: e.to_string(),
            })?;

        Ok(nodes.items.iter().map(|node| node.name_any()).collect())
    }

    async fn list_pods_with_pvcs(&self, namespace: &str) -> Result<Vec<PodPlacement>> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let pods = api
            .list(&ListParams::default())
            .await
            .map_err(|e| Error::ClusterQuery {
                operation: "list pods",
                reason: e.to_string(),
            })?;

        Ok(pods.items.iter().filter_map(placement_from_pod).collect())
    }

    async fn proxy_get(&self, node: &str, path: &str) -> Result<Vec<u8>> {
        let url = format!("/api/v1/nodes/{node}/proxy/{path}");
        let request = http::Request::get(url)
            .body(Vec::new())
            .map_err(|e| Error::NodeUnreachable {
                node: node.to_string(),
                reason: e.to_string(),
            })?;

        let body = self
            .client
            .request_text(request)
            .await
            .map_err(|e| Error::NodeUnreachable {
                node: node.to_string(),
                reason: e.to_string(),
            })?;

        Ok(body.into_bytes())
    }

    async fn get_pvc_bound_volume_name(&self, namespace: &str, claim: &str) -> Result<String> {
        let not_found = || Error::NotFound {
            namespace: namespace.to_string(),
            claim: claim.to_string(),
        };

        let api: Api<PersistentVolumeClaim> = Api::namespaced(self.client.clone(), namespace);
        let pvc = api.get(claim).await.map_err(|e| match e {
            kube::Error::Api(response) if response.code == 404 => not_found(),
            e => Error::ClusterQuery {
                operation: "get persistent volume claim",
                reason: e.to_string(),
            },
        })?;

        pvc.spec
            .and_then(|spec| spec.volume_name)
            .filter(|name| !name.is_empty())
            .ok_or_else(not_found)
    }
}
