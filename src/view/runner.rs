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

use std::io::{IsTerminal, Write};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::cli::Cli;
use crate::cluster::{ClusterApi, KubeCluster};
use crate::collection::{collect_pvc_usage, CollectionConfig};
use crate::error::Result;
use crate::ui::{empty_message, render_table, sort_rows, Spinner, TableOptions};

/// Everything one report needs besides the cluster and the output sink.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub collection: CollectionConfig,
    pub table: TableOptions,
}

impl ReportOptions {
    pub fn from_cli(args: &Cli, color: bool) -> Self {
        Self {
            collection: CollectionConfig {
                namespace: args.namespace.clone(),
                workers: args.workers,
                resolve_pv: args.show_pv,
            },
            table: TableOptions {
                unit: args.output,
                show_pv: args.show_pv,
                color: color && !args.no_color,
            },
        }
    }
}

/// Collect, sort and render one snapshot to `out`.
///
/// Returns the number of rows rendered. An empty result prints an
/// informational message and is not an error.
pub async fn run_report<W: Write>(
    cluster: Arc<dyn ClusterApi>,
    options: &ReportOptions,
    out: &mut W,
    progress: Option<mpsc::UnboundedSender<String>>,
) -> Result<usize> {
    let mut rows = collect_pvc_usage(cluster, &options.collection, progress).await?;

    if rows.is_empty() {
        writeln!(out, "{}", empty_message(&options.collection.namespace))?;
        return Ok(0);
    }

    sort_rows(&mut rows);
    render_table(out, &rows, &options.table)?;
    Ok(rows.len())
}

/// Run df-pv against the cluster selected by `args`, printing to stdout.
pub async fn run_df(args: &Cli) -> Result<()> {
    let cluster =
        KubeCluster::connect(args.kubeconfig.as_deref(), args.context.as_deref()).await?;
    let options = ReportOptions::from_cli(args, std::io::stdout().is_terminal());

    let (spinner, progress) = if std::io::stderr().is_terminal() {
        let (tx, rx) = mpsc::unbounded_channel();
        (Some(Spinner::start(rx, std::io::stderr())), Some(tx))
    } else {
        (None, None)
    };

    // Render into a buffer so the spinner line is cleared before the table appears.
    let mut buffer = Vec::new();
    let result = run_report(Arc::new(cluster), &options, &mut buffer, progress).await;

    if let Some(spinner) = spinner {
        spinner.finish().await;
    }
    result?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&buffer)?;
    stdout.flush()?;
    Ok(())
}
