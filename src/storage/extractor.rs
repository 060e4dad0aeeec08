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

use crate::network::summary::{PodStats, StatsSummary, VolumeStats};
use crate::storage::usage::{percentage, PvcUsage};

/// Turns kubelet volume stats into [`PvcUsage`] rows.
///
/// Volumes without a claim are dropped, and so are claims outside the
/// namespace filter when one is set.
#[derive(Debug, Clone, Default)]
pub struct VolumeRowExtractor {
    namespace: Option<String>,
}

impl VolumeRowExtractor {
    /// An empty `desired_namespace` disables namespace filtering.
    pub fn new(desired_namespace: &str) -> Self {
        Self {
            namespace: Some(desired_namespace.to_string()).filter(|ns| !ns.is_empty()),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn extract(&self, node: &str, pod: &PodStats, volume: &VolumeStats) -> Option<PvcUsage> {
        let pvc_name = volume.pvc_name()?;

        if let Some(desired) = &self.namespace {
            if volume.pvc_namespace() != desired {
                return None;
            }
        }

        let namespace = match volume.pvc_namespace() {
            "" => pod.pod_ref.namespace.clone(),
            ns => ns.to_string(),
        };

        Some(PvcUsage {
            namespace,
            pvc_name: pvc_name.to_string(),
            pv_name: String::new(),
            pod_name: pod.pod_ref.name.clone(),
            volume_mount_name: volume.name.clone(),
            node_name: node.to_string(),

            capacity_bytes: volume.capacity_bytes,
            used_bytes: volume.used_bytes,
            available_bytes: volume.available_bytes,
            percentage_used: percentage(volume.used_bytes, volume.capacity_bytes),

            inodes: volume.inodes,
            inodes_used: volume.inodes_used,
            inodes_free: volume.inodes_free,
            percentage_inodes_used: percentage(volume.inodes_used, volume.inodes),

            stats_time: volume.time,
        })
    }

    /// All rows of one node, in the payload's pod/volume order.
    pub fn extract_all(&self, node: &str, summary: &StatsSummary) -> Vec<PvcUsage> {
        summary
            .pods
            .iter()
            .flat_map(|pod| {
                pod.volumes
                    .iter()
                    .filter_map(move |volume| self.extract(node, pod, volume))
            })
            .collect()
    }
}
