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

//! The df-pv prelude.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use df_pv::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let cluster = Arc::new(KubeCluster::connect(None, None).await?);
//! let rows = collect_pvc_usage(cluster, &CollectionConfig::default(), None).await?;
//! for row in rows {
//!     println!("{} {:.2}%", row.pvc_name, row.percentage_used);
//! }
//! # Ok(())
//! # }
//! ```

// Error types
pub use crate::error::{Error, Result};

// Cluster access
pub use crate::cluster::{ClusterApi, KubeCluster, PodPlacement};

// Collection
pub use crate::collection::{collect_pvc_usage, select_nodes, CollectionConfig, CollectionPipeline};

// Data types
pub use crate::network::{StatsClient, StatsSummary};
pub use crate::storage::{PvResolver, PvcUsage, VolumeRowExtractor};

// Formatting
pub use crate::utils::{to_decimal_si, to_iec, ByteUnit};
