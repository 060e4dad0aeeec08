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

//! Wire types for the kubelet `stats/summary` document.
//!
//! Only the fields needed for volume usage are modelled; everything else the
//! kubelet reports (node, container and network stats) is ignored.
//!
//! ```json
//! {
//!   "pods": [{
//!     "podRef": { "name": "vault-0", "namespace": "vault" },
//!     "volume": [{
//!       "time": "2019-11-25T20:33:19Z",
//!       "availableBytes": 25674719232,
//!       "capacityBytes": 25674731520,
//!       "usedBytes": 12288,
//!       "inodesFree": 6268236,
//!       "inodes": 6268245,
//!       "inodesUsed": 9,
//!       "name": "data",
//!       "pvcRef": { "name": "data-vault-0", "namespace": "vault" }
//!     }]
//!   }]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decoded response of one node's stats summary endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pods: Vec<PodStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pod_ref: PodReference,
    #[serde(default, rename = "volume", deserialize_with = "null_as_default")]
    pub volumes: Vec<VolumeStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodReference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

/// Usage of a single volume mounted by a pod.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeStats {
    /// When the kubelet last refreshed these numbers.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub available_bytes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capacity_bytes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub used_bytes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inodes_free: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inodes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inodes_used: u64,
    /// Volume name as declared in the pod spec.
    #[serde(default)]
    pub name: String,
    /// Present only for volumes backed by a persistent volume claim.
    #[serde(default)]
    pub pvc_ref: Option<PvcReference>,
}

impl VolumeStats {
    /// Name of the bound claim, or `None` for emptyDir, configMap and friends.
    pub fn pvc_name(&self) -> Option<&str> {
        self.pvc_ref
            .as_ref()
            .map(|pvc| pvc.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn pvc_namespace(&self) -> &str {
        self.pvc_ref
            .as_ref()
            .map(|pvc| pvc.namespace.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PvcReference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

/// Decode a raw stats summary body fetched from `node`.
pub fn decode_summary(node: &str, body: &[u8]) -> Result<StatsSummary> {
    serde_json::from_slice(body).map_err(|source| Error::Decode {
        node: node.to_string(),
        source,
    })
}
