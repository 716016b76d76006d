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

//! Command-line entry points of the generator
//!
//! Provides two subcommands:
//! - `Registries`: fetch message registries and the privilege
//!   registry and write C++ headers into the include directory.
//! - `Schemas`: install CSDL and JSON schemas of the schema bundle
//!   into the static tree of the service.
//!
//! Both commands use the built-in manifest unless `--manifest` is
//! given.

use crate::manifest::Manifest;
use crate::privilege::dedup::NamingStrategy;
use crate::registries::Generator;
use crate::registries::Selection;
use crate::schemas::Installer;
use crate::source::DirSource;
use crate::source::HttpSource;
use crate::source::Source;
use crate::Error;
use clap::Subcommand;
use log::info;
use std::fs;
use std::path::PathBuf;

/// Default include directory of generated headers.
pub const DEFAULT_INCLUDE_DIR: &str = "redfish-core/include/registries";

/// Default static directory of the service.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Generator high-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate message and privilege registry headers.
    Registries {
        /// Registries to generate (comma separated). `privilege` and
        /// `openbmc` name the privilege registry and the local
        /// OpenBMC registry. If empty, all registries are generated.
        #[arg(short, long, value_delimiter = ',')]
        registries: Vec<String>,
        /// Directory where headers are written. The local OpenBMC
        /// registry is read from this directory too.
        #[arg(short, long, default_value = DEFAULT_INCLUDE_DIR)]
        include_dir: PathBuf,
        /// Read registry documents from this directory instead of
        /// downloading them.
        #[arg(short = 'd', long)]
        registry_dir: Option<PathBuf>,
        /// Naming of deduplicated privilege sets.
        #[arg(short, long, value_enum, default_value_t = NamingStrategy::default())]
        naming: NamingStrategy,
        /// Manifest to use instead of the built-in one.
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
    /// Install schema bundle.
    Schemas {
        /// Bundle archive. If not specified, bundle is downloaded
        /// from the URL of the manifest.
        #[arg(short, long)]
        bundle: Option<PathBuf>,
        /// Static directory of the service.
        #[arg(short, long, default_value = DEFAULT_STATIC_DIR)]
        static_dir: PathBuf,
        /// Manifest to use instead of the built-in one.
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

/// Process a generator command.
///
/// # Errors
///
/// Returns an error if command processing fails.
pub fn process_command(command: &Commands) -> Result<Vec<String>, Error> {
    match command {
        Commands::Registries {
            registries,
            include_dir,
            registry_dir,
            naming,
            manifest,
        } => {
            let manifest = Manifest::load(manifest.as_deref()).map_err(Error::Manifest)?;
            let selection = Selection::new(&manifest, registries).map_err(Error::Registries)?;
            let source: Box<dyn Source> = match registry_dir {
                Some(dir) => Box::new(DirSource::new(dir)),
                None => Box::new(HttpSource::new().map_err(Error::Source)?),
            };
            let written = Generator::new(&manifest, source.as_ref(), include_dir, *naming)
                .generate(&selection)
                .map_err(Error::Registries)?;
            Ok(report(&written))
        }
        Commands::Schemas {
            bundle,
            static_dir,
            manifest,
        } => {
            let manifest = Manifest::load(manifest.as_deref()).map_err(Error::Manifest)?;
            let data = match bundle {
                Some(path) => fs::read(path).map_err(|e| Error::Io(path.clone(), e))?,
                None => {
                    let url = manifest.schema_bundle.url();
                    info!("downloading schema bundle {url}");
                    HttpSource::new()
                        .and_then(|source| source.fetch(&url))
                        .map_err(Error::Source)?
                }
            };
            let written = Installer::new(&manifest, static_dir)
                .install(&data)
                .map_err(Error::Schemas)?;
            Ok(report(&written))
        }
    }
}

fn report(written: &[PathBuf]) -> Vec<String> {
    let mut messages = written
        .iter()
        .map(|path| format!("written: {}", path.display()))
        .collect::<Vec<_>>();
    messages.push(format!("{} files written", written.len()));
    messages
}
