// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use log::LevelFilter;
use redfish_registry_codegen::commands::process_command;
use redfish_registry_codegen::commands::Commands;
use redfish_registry_codegen::Error;

/// Generator CLI.
#[derive(Parser, Debug)]
#[command(name = "redfish-registry-codegen")]
#[command(about = "Redfish registry headers and schema bundle generator", long_about = None)]
struct Cli {
    /// Log level of messages written to stderr.
    #[arg(short = 'L', long, default_value = "info")]
    log_level: LevelFilter,
    #[command(subcommand)]
    command: Commands,
}

fn setup_logger(level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .level(level)
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {message}", record.level()));
        })
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    if let Err(e) = setup_logger(cli.log_level) {
        eprintln!("failed to initialize logging: {e}");
    }

    for msg in process_command(&cli.command)? {
        println!("{msg}");
    }
    Ok(())
}
