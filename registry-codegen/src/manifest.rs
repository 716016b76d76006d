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

//! Generator manifest.
//!
//! The manifest names the DMTF documents that are used for
//! generation: message registries and their versions, the privilege
//! registry, the schema bundle and the OEM schemas that must be
//! referenced from `$metadata`. A default manifest is built into the
//! binary; it can be replaced with a TOML file.

use serde::Deserialize;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fs::File;
use std::io::Error as IoError;
use std::io::Read as _;
use std::path::Path;
use toml::de::Error as TomlError;

/// Manifest that is compiled into the generator.
pub const BUILTIN_MANIFEST: &str = include_str!("../manifest.toml");

/// Manifest of documents used for generation.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    /// Base URL of DMTF registries.
    pub registry_base_url: String,
    /// File name of the privilege registry.
    pub privilege_registry: String,
    /// File name of the local OpenBMC message registry.
    pub openbmc_registry: String,
    /// Schema bundle (DSP8010) to install.
    pub schema_bundle: SchemaBundle,
    /// DMTF message registries.
    pub registries: Vec<RegistryEntry>,
    /// OEM schemas referenced from `$metadata`.
    #[serde(default)]
    pub oem_schemas: Vec<OemSchema>,
}

impl Manifest {
    /// Read manifest from toml file.
    ///
    /// # Errors
    ///
    /// - `Error::Io` if failed to read file
    /// - `Error::Toml` if failed to parse content as TOML / invalid manifest.
    pub fn read(fname: &Path) -> Result<Self, Error> {
        let mut file = File::open(fname).map_err(Error::Io)?;
        let mut content = String::new();
        file.read_to_string(&mut content).map_err(Error::Io)?;
        toml::from_str(&content).map_err(Error::Toml)
    }

    /// Manifest that is built into the generator.
    ///
    /// # Errors
    ///
    /// `Error::Toml` if built-in manifest is broken.
    pub fn builtin() -> Result<Self, Error> {
        toml::from_str(BUILTIN_MANIFEST).map_err(Error::Toml)
    }

    /// Read manifest from file if specified, otherwise use built-in one.
    ///
    /// # Errors
    ///
    /// See [`Manifest::read`] and [`Manifest::builtin`].
    pub fn load(fname: Option<&Path>) -> Result<Self, Error> {
        fname.map_or_else(Self::builtin, Self::read)
    }

    /// Find DMTF message registry by name.
    #[must_use]
    pub fn registry(&self, name: &str) -> Option<&RegistryEntry> {
        self.registries.iter().find(|r| r.name == name)
    }

    /// Names of all DMTF message registries.
    #[must_use]
    pub fn registry_names(&self) -> Vec<&String> {
        self.registries.iter().map(|r| &r.name).collect()
    }

    /// URL of a document in the registry repository.
    #[must_use]
    pub fn registry_url(&self, file_name: &str) -> String {
        format!(
            "{}/{file_name}",
            self.registry_base_url.trim_end_matches('/')
        )
    }
}

/// DMTF message registry.
#[derive(Deserialize, Debug)]
pub struct RegistryEntry {
    /// Registry name in snake case (`resource_event`).
    pub name: String,
    /// Registry version (`1.3.0`).
    pub version: String,
}

/// DSP8010 schema bundle.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaBundle {
    /// Bundle version (`DSP8010_2022.2`).
    pub version: String,
    /// Base URL where bundle archive is published.
    pub base_url: String,
}

impl SchemaBundle {
    /// URL of bundle archive.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/{}.zip",
            self.base_url.trim_end_matches('/'),
            self.version
        )
    }
}

/// OEM schema reference.
#[derive(Deserialize, Debug)]
pub struct OemSchema {
    /// URI of the schema file.
    pub uri: String,
    /// Namespaces included from the schema.
    pub namespaces: Vec<String>,
}

#[derive(Debug)]
pub enum Error {
    Io(IoError),
    Toml(TomlError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Io(err) => write!(f, "input/output error: {err}"),
            Self::Toml(err) => write!(f, "manifest file format error: {err}"),
        }
    }
}

impl StdError for Error {}
