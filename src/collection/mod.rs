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

pub mod node_selector;
pub mod pipeline;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::cluster::ClusterApi;
use crate::common::config::AppConfig;
use crate::error::Result;
use crate::storage::{PvResolver, PvcUsage};

pub use node_selector::select_nodes;
pub use pipeline::CollectionPipeline;

/// Configuration for one collection run
#[derive(Debug, Clone)]
pub struct CollectionConfig {
    /// Only report claims in this namespace; empty means every namespace.
    pub namespace: String,
    pub workers: usize,
    pub resolve_pv: bool,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            workers: AppConfig::DEFAULT_WORKERS,
            resolve_pv: false,
        }
    }
}

/// Select the nodes to query and collect PVC usage from all of them.
///
/// A failed node or pod listing aborts before any node is contacted.
pub async fn collect_pvc_usage(
    cluster: Arc<dyn ClusterApi>,
    config: &CollectionConfig,
    progress: Option<mpsc::UnboundedSender<String>>,
) -> Result<Vec<PvcUsage>> {
    let nodes = select_nodes(cluster.as_ref(), &config.namespace).await?;

    let mut pipeline = CollectionPipeline::new(cluster.clone()).with_workers(config.workers);
    if config.resolve_pv {
        pipeline = pipeline.with_pv_resolver(PvResolver::new(cluster));
    }
    if let Some(progress) = progress {
        pipeline = pipeline.with_progress(progress);
    }

    pipeline.collect(nodes, &config.namespace).await
}
