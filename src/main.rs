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

mod check;
mod cli;
mod config;
mod error;
mod measure;
mod mount;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use check::{CheckReport, ImageDataSizeChecker};
use cli::Cli;
use config::CheckConfig;
use error::Result;
use measure::EtcdKeySizeCommand;
use mount::create_mount_reader;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(report) => {
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{json}"),
                Err(err) => error!("failed to serialize report: {err}"),
            }
            std::process::exit(i32::from(report.failed));
        }
        Err(err) => {
            error!("{err}");
            std::process::exit(2);
        }
    }
}

async fn run(cli: Cli) -> Result<CheckReport> {
    let (mut config, mounts) = if let Some(path) = &cli.vars_file {
        let raw = std::fs::read_to_string(path)?;
        let vars: serde_json::Value = serde_json::from_str(&raw)?;
        CheckConfig::from_vars(&vars)?
    } else {
        let config = cli.to_config()?;
        let mounts = create_mount_reader().mounts();
        (config, mounts)
    };
    config.report_all_failures |= cli.all_hosts;

    let executor = Box::new(EtcdKeySizeCommand::new(cli.etcdkeysize_bin));
    let checker = ImageDataSizeChecker::new(config, executor);
    checker.run(&mounts).await
}
