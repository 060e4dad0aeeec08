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

//! End-to-end collection tests against an in-memory cluster.

use std::sync::Arc;
use std::time::Duration;

use df_pv::cluster::fake::{summary_json, StaticCluster};
use df_pv::prelude::*;

fn two_namespace_cluster() -> StaticCluster {
    StaticCluster::new()
        .with_node(
            "worker-1",
            summary_json(&[(
                "postgres-0",
                "db",
                &[
                    ("data", Some("data-postgres-0"), 10 << 30, 3 << 30),
                    ("scratch", None, 100 << 30, 1 << 30),
                ],
            )]),
        )
        .with_node(
            "worker-2",
            summary_json(&[(
                "nginx-0",
                "web",
                &[("static", Some("static-nginx-0"), 1 << 30, 1 << 29)],
            )]),
        )
        .with_pod("db", "postgres-0", "worker-1", &["data-postgres-0"])
        .with_pod("web", "nginx-0", "worker-2", &["static-nginx-0"])
}

#[tokio::test]
async fn test_collect_all_namespaces() {
    let cluster = Arc::new(two_namespace_cluster());
    let rows = collect_pvc_usage(cluster.clone(), &CollectionConfig::default(), None)
        .await
        .expect("collection should succeed");

    let mut claims: Vec<&str> = rows.iter().map(|r| r.pvc_name.as_str()).collect();
    claims.sort();
    assert_eq!(claims, vec!["data-postgres-0", "static-nginx-0"]);

    let mut visits = cluster.visits();
    visits.sort();
    assert_eq!(visits, vec!["worker-1", "worker-2"]);
}

#[tokio::test]
async fn test_namespace_filter_yields_exact_row() {
    let cluster = Arc::new(two_namespace_cluster());
    let config = CollectionConfig {
        namespace: "db".to_string(),
        ..Default::default()
    };

    let rows = collect_pvc_usage(cluster.clone(), &config, None).await.unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.namespace, "db");
    assert_eq!(row.pvc_name, "data-postgres-0");
    assert_eq!(row.pod_name, "postgres-0");
    assert_eq!(row.node_name, "worker-1");
    assert_eq!(row.volume_mount_name, "data");
    assert_eq!(row.capacity_bytes, 10 << 30);
    assert_eq!(row.used_bytes, 3 << 30);
    assert_eq!(row.available_bytes, 7 << 30);
    assert_eq!(row.inodes, (10 << 30) / 1024);
    assert_eq!(row.inodes_used, (3 << 30) / 1024);
    assert_eq!(row.inodes_free, (7 << 30) / 1024);
    assert!((row.percentage_used - 30.0).abs() < 1e-9);
    assert!((row.percentage_inodes_used - 30.0).abs() < 1e-9);
    assert!(row.stats_time.is_some());

    // Only the node hosting the namespace's claims was contacted.
    assert_eq!(cluster.visits(), vec!["worker-1"]);
}

#[tokio::test]
async fn test_volumes_without_claims_are_excluded() {
    let cluster = Arc::new(StaticCluster::new().with_node(
        "worker-1",
        summary_json(&[
            ("web", "default", &[("cache", None, 1 << 20, 1 << 10)]),
            ("job", "default", &[("tmp", None, 1 << 20, 0)]),
        ]),
    ));

    let rows = collect_pvc_usage(cluster, &CollectionConfig::default(), None)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_rows_under_filter_match_namespace() {
    let mut cluster = StaticCluster::new();
    for i in 0..6 {
        let namespace = if i % 2 == 0 { "even" } else { "odd" };
        let pod = format!("pod-{i}");
        let claim = format!("claim-{i}");
        let node = format!("node-{i}");
        cluster = cluster
            .with_node(
                &node,
                summary_json(&[(
                    pod.as_str(),
                    namespace,
                    &[("data", Some(claim.as_str()), 1000, i * 100)],
                )]),
            )
            .with_pod(namespace, &pod, &node, &[claim.as_str()]);
    }
    let cluster = Arc::new(cluster);

    let config = CollectionConfig {
        namespace: "odd".to_string(),
        workers: 2,
        ..Default::default()
    };
    let rows = collect_pvc_usage(cluster, &config, None).await.unwrap();

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.namespace == "odd"));
    for row in &rows {
        assert!((0.0..=100.0).contains(&row.percentage_used));
        let expected = row.used_bytes as f64 / row.capacity_bytes as f64 * 100.0;
        assert!((row.percentage_used - expected).abs() < 1e-9);
    }
}

#[tokio::test]
async fn test_bounded_pool_visits_each_node_once() {
    let mut cluster = StaticCluster::new();
    let mut nodes = Vec::new();
    for i in 0..25 {
        let node = format!("node-{i:02}");
        let claim = format!("claim-{i}");
        cluster = cluster
            .with_node(
                &node,
                summary_json(&[("pod", "ns", &[("data", Some(claim.as_str()), 100, 10)])]),
            )
            .with_delay(&node, Duration::from_millis(2));
        nodes.push(node);
    }
    let cluster = Arc::new(cluster);

    let rows = CollectionPipeline::new(cluster.clone())
        .with_workers(4)
        .collect(nodes.clone(), "")
        .await
        .unwrap();
    assert_eq!(rows.len(), 25);

    let mut visits = cluster.visits();
    visits.sort();
    assert_eq!(visits, nodes);
    assert!(cluster.peak_in_flight() <= 4);
}

#[tokio::test]
async fn test_one_failing_node_fails_everything() {
    let cluster = two_namespace_cluster()
        .with_delay("worker-1", Duration::from_millis(1))
        .with_unreachable_node("worker-3", "dial tcp 10.0.0.3:10250: i/o timeout");
    let cluster = Arc::new(cluster);

    let result = collect_pvc_usage(cluster, &CollectionConfig::default(), None).await;
    match result {
        Err(Error::NodeUnreachable { node, reason }) => {
            assert_eq!(node, "worker-3");
            assert!(reason.contains("i/o timeout"));
        }
        other => panic!("expected unreachable node error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_listing_failure_aborts_before_fan_out() {
    let cluster = Arc::new(two_namespace_cluster().with_listing_error("Unauthorized"));

    let err = collect_pvc_usage(cluster.clone(), &CollectionConfig::default(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ClusterQuery { .. }));
    assert!(cluster.visits().is_empty());
}

#[tokio::test]
async fn test_pv_names_are_resolved_when_requested() {
    let cluster = Arc::new(
        two_namespace_cluster().with_bound_volume("db", "data-postgres-0", "pvc-7f3a"),
    );
    let config = CollectionConfig {
        resolve_pv: true,
        ..Default::default()
    };

    let mut rows = collect_pvc_usage(cluster, &config, None).await.unwrap();
    rows.sort_by(|a, b| a.pvc_name.cmp(&b.pvc_name));
    assert_eq!(rows[0].pv_name, "pvc-7f3a");
    // No binding known for this claim: the row survives with an empty PV.
    assert_eq!(rows[1].pvc_name, "static-nginx-0");
    assert_eq!(rows[1].pv_name, "");
}
