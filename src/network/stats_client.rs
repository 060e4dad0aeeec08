use std::sync::Arc;

use tracing::debug;

use crate::cluster::ClusterApi;
use crate::common::config::AppConfig;
use crate::error::Result;
use crate::network::summary::{decode_summary, StatsSummary};

/// Fetches and decodes one node's stats summary through the API server proxy.
///
/// There is no retry here: a failed fetch fails the node.
#[derive(Clone)]
pub struct StatsClient {
    cluster: Arc<dyn ClusterApi>,
}

impl StatsClient {
    pub fn new(cluster: Arc<dyn ClusterApi>) -> Self {
        Self { cluster }
    }

    pub async fn fetch_node_stats(&self, node: &str) -> Result<StatsSummary> {
        let body = self
            .cluster
            .proxy_get(node, AppConfig::STATS_SUMMARY_PATH)
            .await?;
        debug!("Fetched {} bytes of stats from node {node}", body.len());

        decode_summary(node, &body)
    }
}
