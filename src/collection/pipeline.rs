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

//! Bounded fan-out over nodes with first-error cancellation.
//!
//! A producer task feeds node names into a queue, a fixed number of workers
//! drain it, and the caller drains the row channel while joining the tasks.
//! The first worker error cancels the shared token; every other task stops at
//! its next queue receive or row send, and all rows gathered so far are
//! dropped.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cluster::ClusterApi;
use crate::common::config::{AppConfig, EnvConfig};
use crate::error::{Error, Result};
use crate::network::StatsClient;
use crate::storage::{PvResolver, PvcUsage, VolumeRowExtractor};

type NodeQueue = Arc<Mutex<mpsc::Receiver<String>>>;

pub struct CollectionPipeline {
    stats: StatsClient,
    resolver: Option<PvResolver>,
    workers: usize,
    progress: Option<mpsc::UnboundedSender<String>>,
}

impl CollectionPipeline {
    pub fn new(cluster: Arc<dyn ClusterApi>) -> Self {
        Self {
            stats: StatsClient::new(cluster),
            resolver: None,
            workers: AppConfig::DEFAULT_WORKERS,
            progress: None,
        }
    }

    /// Number of concurrent node fetches.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Fill in the bound PV name of every row.
    pub fn with_pv_resolver(mut self, resolver: PvResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Receive the name of every node once its rows have been emitted.
    pub fn with_progress(mut self, progress: mpsc::UnboundedSender<String>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Collect rows from every node in `nodes`.
    ///
    /// Rows from one node keep the order of that node's payload; rows from
    /// different nodes arrive in completion order. Any fetch or decode
    /// failure fails the whole call.
    pub async fn collect(
        &self,
        nodes: Vec<String>,
        desired_namespace: &str,
    ) -> Result<Vec<PvcUsage>> {
        let node_count = nodes.len();
        let workers = EnvConfig::worker_count(self.workers, node_count);
        debug!("Collecting from {node_count} node(s) with {workers} worker(s)");

        let (queue_tx, queue_rx) = mpsc::channel::<String>(workers);
        let queue: NodeQueue = Arc::new(Mutex::new(queue_rx));
        let (row_tx, mut row_rx) = mpsc::channel::<PvcUsage>(AppConfig::ROW_CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();

        let mut tasks = JoinSet::new();
        tasks.spawn(produce(nodes, queue_tx, cancel.clone()));

        let extractor = VolumeRowExtractor::new(desired_namespace);
        for id in 0..workers {
            let worker = Worker {
                id,
                stats: self.stats.clone(),
                resolver: self.resolver.clone(),
                extractor: extractor.clone(),
                progress: self.progress.clone(),
            };
            tasks.spawn(worker.run(queue.clone(), row_tx.clone(), cancel.clone()));
        }
        // Only workers hold senders now, so the channel closes once they all exit.
        drop(row_tx);

        let mut rows = Vec::new();
        let mut first_error: Option<Error> = None;
        loop {
            tokio::select! {
                Some(row) = row_rx.recv() => rows.push(row),
                Some(joined) = tasks.join_next() => {
                    let outcome = joined
                        .map_err(|e| Error::Worker(e.to_string()))
                        .and_then(|result| result);
                    if let Err(e) = outcome {
                        cancel.cancel();
                        if first_error.is_none() {
                            warn!("Collection aborted: {e}");
                            first_error = Some(e);
                        } else {
                            debug!("Suppressed error after cancellation: {e}");
                        }
                    }
                }
                else => break,
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                info!("Collected {} PVC row(s) from {node_count} node(s)", rows.len());
                Ok(rows)
            }
        }
    }
}

/// Enqueue every node once, then close the queue by dropping the sender.
async fn produce(
    nodes: Vec<String>,
    queue: mpsc::Sender<String>,
    cancel: CancellationToken,
) -> Result<()> {
    for node in nodes {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            sent = queue.send(node) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }
    Ok(())
}

struct Worker {
    id: usize,
    stats: StatsClient,
    resolver: Option<PvResolver>,
    extractor: VolumeRowExtractor,
    progress: Option<mpsc::UnboundedSender<String>>,
}

impl Worker {
    async fn run(
        self,
        queue: NodeQueue,
        rows: mpsc::Sender<PvcUsage>,
        cancel: CancellationToken,
    ) -> Result<()> {
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Worker {} cancelled", self.id);
                    return Ok(());
                }
                node = async { queue.lock().await.recv().await } => node,
            };

            let Some(node) = next else {
                debug!("Worker {} finished, queue drained", self.id);
                return Ok(());
            };

            if let Err(e) = self.process(&node, &rows, &cancel).await {
                cancel.cancel();
                return Err(e);
            }
        }
    }

    async fn process(
        &self,
        node: &str,
        rows: &mpsc::Sender<PvcUsage>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        debug!("Worker {} fetching stats from node {node}", self.id);
        let summary = self.stats.fetch_node_stats(node).await?;

        for mut row in self.extractor.extract_all(node, &summary) {
            if let Some(resolver) = &self.resolver {
                row.pv_name = resolver.resolve(&row.namespace, &row.pvc_name).await;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(()),
                sent = rows.send(row) => {
                    if sent.is_err() {
                        return Ok(());
                    }
                }
            }
        }

        if let Some(progress) = &self.progress {
            let _ = progress.send(node.to_string());
        }
        Ok(())
    }
}
