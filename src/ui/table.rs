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

use std::io::{self, Write};

use crate::common::config::ThemeConfig;
use crate::storage::PvcUsage;
use crate::ui::text::{display_width, pad_to_width, print_colored_text};
use crate::utils::ByteUnit;

const COLUMN_GAP: &str = "   ";

/// How the PVC table is rendered
#[derive(Debug, Clone, Copy, Default)]
pub struct TableOptions {
    pub unit: ByteUnit,
    pub show_pv: bool,
    pub color: bool,
}

/// Order rows by claim name, then namespace, then pod.
pub fn sort_rows(rows: &mut [PvcUsage]) {
    rows.sort_by(|a, b| {
        a.pvc_name
            .cmp(&b.pvc_name)
            .then_with(|| a.namespace.cmp(&b.namespace))
            .then_with(|| a.pod_name.cmp(&b.pod_name))
    });
}

fn format_percentage(percent: f64) -> String {
    if percent.is_finite() {
        format!("{percent:.2}")
    } else {
        "-".to_string()
    }
}

fn headers(options: &TableOptions) -> Vec<&'static str> {
    let mut headers = vec!["PVC", "NAMESPACE", "POD", "NODE"];
    if options.show_pv {
        headers.push("PV");
    }
    headers.extend([
        "SIZE", "USED", "AVAILABLE", "%USED", "IUSED", "IFREE", "%IUSED",
    ]);
    headers
}

fn cells(row: &PvcUsage, options: &TableOptions) -> Vec<String> {
    let mut cells = vec![
        row.pvc_name.clone(),
        row.namespace.clone(),
        row.pod_name.clone(),
        row.node_name.clone(),
    ];
    if options.show_pv {
        cells.push(row.pv_name.clone());
    }
    cells.extend([
        options.unit.format(row.capacity_bytes),
        options.unit.format(row.used_bytes),
        options.unit.format(row.available_bytes),
        format_percentage(row.percentage_used),
        row.inodes_used.to_string(),
        row.inodes_free.to_string(),
        format_percentage(row.percentage_inodes_used),
    ]);
    cells
}

fn join_line(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if i == last {
                cell.clone()
            } else {
                pad_to_width(cell, widths[i])
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
}

/// Render `rows` as an aligned table, one line per row.
pub fn render_table<W: Write>(
    out: &mut W,
    rows: &[PvcUsage],
    options: &TableOptions,
) -> io::Result<()> {
    let header: Vec<String> = headers(options).into_iter().map(String::from).collect();
    let body: Vec<Vec<String>> = rows.iter().map(|row| cells(row, options)).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| display_width(h)).collect();
    for line in &body {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(display_width(cell));
        }
    }

    print_colored_text(out, &join_line(&header, &widths), None)?;
    writeln!(out)?;

    for (row, line) in rows.iter().zip(&body) {
        let color = if options.color {
            ThemeConfig::usage_color(row.peak_percentage())
        } else {
            None
        };
        print_colored_text(out, &join_line(line, &widths), color)?;
        writeln!(out)?;
    }

    out.flush()
}

/// Message shown instead of a table when no claim qualified.
pub fn empty_message(namespace: &str) -> String {
    if namespace.is_empty() {
        "No PVCs found in any namespace".to_string()
    } else {
        format!("No PVCs found in namespace \"{namespace}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(pvc: &str, namespace: &str, used: u64, capacity: u64) -> PvcUsage {
        PvcUsage {
            namespace: namespace.to_string(),
            pvc_name: pvc.to_string(),
            pv_name: format!("pv-{pvc}"),
            pod_name: format!("{pvc}-pod"),
            volume_mount_name: "data".to_string(),
            node_name: "worker-1".to_string(),
            capacity_bytes: capacity,
            used_bytes: used,
            available_bytes: capacity - used,
            percentage_used: used as f64 / capacity as f64 * 100.0,
            inodes: 1000,
            inodes_used: 10,
            inodes_free: 990,
            percentage_inodes_used: 1.0,
            stats_time: None,
        }
    }

    fn render(rows: &[PvcUsage], options: TableOptions) -> String {
        let mut out = Vec::new();
        render_table(&mut out, rows, &options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_sort_rows_by_claim_then_namespace() {
        let mut rows = vec![
            usage("b", "x", 1, 2),
            usage("a", "z", 1, 2),
            usage("a", "y", 1, 2),
        ];
        sort_rows(&mut rows);
        let keys: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.pvc_name.as_str(), r.namespace.as_str()))
            .collect();
        assert_eq!(keys, vec![("a", "y"), ("a", "z"), ("b", "x")]);
    }

    #[test]
    fn test_render_table_columns() {
        let rows = vec![usage("data-postgres-0", "db", 1 << 30, 4 << 30)];
        let text = render(&rows, TableOptions::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("PVC"));
        assert!(!lines[0].contains("PV "));
        assert!(lines[0].ends_with("%IUSED"));

        let fields: Vec<&str> = lines[1].split_whitespace().collect();
        assert_eq!(
            fields,
            vec![
                "data-postgres-0",
                "db",
                "data-postgres-0-pod",
                "worker-1",
                "4Gi",
                "1Gi",
                "3Gi",
                "25.00",
                "10",
                "990",
                "1.00"
            ]
        );
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let rows = vec![usage("a", "db", 1, 2), usage("long-claim-name", "db", 1, 2)];
        let text = render(&rows, TableOptions::default());
        let lines: Vec<&str> = text.lines().collect();

        let column = lines[0].find("NAMESPACE").unwrap();
        assert_eq!(lines[1].find("db"), Some(column));
        assert_eq!(lines[2].find("db"), Some(column));
    }

    #[test]
    fn test_render_table_with_pv_and_unit() {
        let rows = vec![usage("data", "db", 1 << 20, 3 << 20)];
        let options = TableOptions {
            unit: ByteUnit::Ki,
            show_pv: true,
            color: false,
        };
        let text = render(&rows, options);
        assert!(text.lines().next().unwrap().contains("   PV   "));
        assert!(text.contains("pv-data"));
        assert!(text.contains("3072Ki"));
        assert!(text.contains("1024Ki"));
    }

    #[test]
    fn test_non_finite_percentage_renders_dash() {
        let mut row = usage("empty", "db", 0, 1);
        row.capacity_bytes = 0;
        row.available_bytes = 0;
        row.percentage_used = f64::NAN;
        let text = render(&[row], TableOptions::default());
        let fields: Vec<&str> = text.lines().nth(1).unwrap().split_whitespace().collect();
        assert_eq!(fields[7], "-");
    }

    #[test]
    fn test_color_only_when_enabled() {
        let rows = vec![usage("full", "db", 9, 10)];
        let plain = render(&rows, TableOptions::default());
        assert!(!plain.contains('\u{1b}'));

        let colored = render(
            &rows,
            TableOptions {
                color: true,
                ..Default::default()
            },
        );
        assert!(colored.contains('\u{1b}'));

        let calm = render(
            &[usage("calm", "db", 1, 10)],
            TableOptions {
                color: true,
                ..Default::default()
            },
        );
        assert!(!calm.contains('\u{1b}'));
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(empty_message(""), "No PVCs found in any namespace");
        assert_eq!(empty_message("db"), "No PVCs found in namespace \"db\"");
    }
}
