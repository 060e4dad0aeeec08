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

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::common::config::AppConfig;
use crate::utils::ByteUnit;

/// Show disk usage of persistent volume claims across the cluster.
#[derive(Parser, Debug, Clone)]
#[command(name = "df-pv", author, version, about, long_about = None)]
pub struct Cli {
    /// Only show claims in this namespace. Shows every namespace when empty.
    #[arg(short, long, env = "DF_PV_NAMESPACE", default_value = "")]
    pub namespace: String,
    /// Unit for byte columns: iec, si, bytes, Ki, Mi, Gi or Ti.
    #[arg(short, long, env = "DF_PV_OUTPUT", default_value_t = ByteUnit::Iec)]
    pub output: ByteUnit,
    /// Path to the kubeconfig file to use.
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,
    /// The kubeconfig context to use.
    #[arg(long)]
    pub context: Option<String>,
    /// Number of nodes queried concurrently.
    #[arg(short, long, env = "DF_PV_WORKERS", default_value_t = AppConfig::DEFAULT_WORKERS)]
    pub workers: usize,
    /// Look up and show the persistent volume bound to each claim.
    #[arg(long)]
    pub show_pv: bool,
    /// Do not color rows by usage.
    #[arg(long)]
    pub no_color: bool,
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
