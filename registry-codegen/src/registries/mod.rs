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

//! Message and privilege registry headers.
//!
//! DMTF message registries are fetched by name and version from the
//! registry repository, the OpenBMC registry is read from the include
//! directory, and the privilege registry is deduplicated before it is
//! rendered. Every registry is written as a C++ header into the
//! include directory.

/// C++ literals
pub mod cpp;

/// Message registry header
pub mod message;

/// Privilege registry header
pub mod privilege_header;

use crate::manifest::Manifest;
use crate::manifest::RegistryEntry;
use crate::privilege::dedup::Deduplicated;
use crate::privilege::dedup::NamingStrategy;
use crate::privilege::Error as PrivilegeError;
use crate::privilege::PrivilegeRegistry;
use crate::source::Error as SourceError;
use crate::source::Source;
use log::debug;
use log::info;
use message::MessageRegistry;
use message::MessageRegistryHeader;
use privilege_header::PrivilegeRegistryHeader;
use serde_json::Error as JsonError;
use serde_path_to_error::Error as PathError;
use std::collections::BTreeSet;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fs;
use std::io::Error as IoError;
use std::path::Path;
use std::path::PathBuf;

/// Selection name of the privilege registry.
pub const PRIVILEGE: &str = "privilege";

/// Selection name of the local OpenBMC message registry.
pub const OPENBMC: &str = "openbmc";

pub(crate) const PRAGMA_ONCE: &str = "#pragma once\n";

pub(crate) const WARNING: &str = "/****************************************************************
 *                 READ THIS WARNING FIRST
 * This is an auto-generated header which contains definitions
 * for Redfish DMTF defined messages.
 * DO NOT modify this registry outside of running the
 * redfish-registry-codegen tool.  The definitions contained within
 * this file are owned by DMTF.  Any modifications to these files
 * should be first pushed to the relevant registry in the DMTF
 * github organization.
 ***************************************************************/";

/// Registry generation errors.
#[derive(Debug)]
pub enum Error {
    /// Registry name is not known.
    UnknownRegistry(String),
    /// Failed to fetch registry document.
    Source(SourceError),
    /// Registry document format error.
    Json(String, PathError<JsonError>),
    /// Registry version is not `major.minor.errata`.
    RegistryVersion(String),
    /// Privilege registry validation error.
    Privilege(PrivilegeError),
    /// Failed to read local registry.
    Read(PathBuf, IoError),
    /// Failed to write header.
    Write(PathBuf, IoError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::UnknownRegistry(name) => write!(f, "unknown registry: {name}"),
            Self::Source(err) => err.fmt(f),
            Self::Json(doc, err) => write!(f, "registry format error: {doc}: {err}"),
            Self::RegistryVersion(v) => write!(f, "invalid registry version: {v}"),
            Self::Privilege(err) => write!(f, "privilege registry error:\n{err}"),
            Self::Read(path, err) => write!(f, "failed to read {}: {err}", path.display()),
            Self::Write(path, err) => write!(f, "failed to write {}: {err}", path.display()),
        }
    }
}

impl StdError for Error {}

/// Convert `snake_case` registry name to `PascalCase` (`job_event` ->
/// `JobEvent`).
#[must_use]
pub fn to_pascal_case(text: &str) -> String {
    text.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect()
}

/// Registries selected for generation.
#[derive(Debug)]
pub struct Selection(BTreeSet<String>);

impl Selection {
    /// All registries known to the manifest, OpenBMC and privilege
    /// registries.
    #[must_use]
    pub fn all(manifest: &Manifest) -> Self {
        Self(
            manifest
                .registry_names()
                .into_iter()
                .cloned()
                .chain([PRIVILEGE, OPENBMC].iter().map(|v| (*v).to_string()))
                .collect(),
        )
    }

    /// Selection from registry names. Empty list selects all.
    ///
    /// # Errors
    ///
    /// `Error::UnknownRegistry` if any of names is not known.
    pub fn new(manifest: &Manifest, names: &[String]) -> Result<Self, Error> {
        if names.is_empty() {
            return Ok(Self::all(manifest));
        }
        names
            .iter()
            .map(|name| {
                if name == PRIVILEGE || name == OPENBMC || manifest.registry(name).is_some() {
                    Ok(name.clone())
                } else {
                    Err(Error::UnknownRegistry(name.clone()))
                }
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

/// Registry headers generator.
pub struct Generator<'a> {
    manifest: &'a Manifest,
    source: &'a dyn Source,
    include_dir: &'a Path,
    naming: NamingStrategy,
}

impl<'a> Generator<'a> {
    #[must_use]
    pub fn new(
        manifest: &'a Manifest,
        source: &'a dyn Source,
        include_dir: &'a Path,
        naming: NamingStrategy,
    ) -> Self {
        Self {
            manifest,
            source,
            include_dir,
            naming,
        }
    }

    /// Generate headers of selected registries.
    ///
    /// # Errors
    ///
    /// Returns first error of fetching, validating or writing.
    pub fn generate(&self, selection: &Selection) -> Result<Vec<PathBuf>, Error> {
        let mut written = self
            .manifest
            .registries
            .iter()
            .filter(|entry| selection.contains(&entry.name))
            .map(|entry| self.dmtf_registry(entry))
            .collect::<Result<Vec<_>, _>>()?;
        if selection.contains(OPENBMC) {
            written.push(self.openbmc_registry()?);
        }
        if selection.contains(PRIVILEGE) {
            written.push(self.privilege_registry()?);
        }
        Ok(written)
    }

    fn dmtf_registry(&self, entry: &RegistryEntry) -> Result<PathBuf, Error> {
        let document = format!("{}.{}.json", to_pascal_case(&entry.name), entry.version);
        let url = self.manifest.registry_url(&document);
        let data = self.source.fetch(&url).map_err(Error::Source)?;
        let registry = MessageRegistry::parse(&document, &data)?;
        debug!(
            "{document}: {} messages in registry {}",
            registry.messages.len(),
            registry.registry_prefix
        );
        let header = MessageRegistryHeader::new(&registry, &entry.name, &url)?;
        self.write(&format!("{}_message_registry.hpp", entry.name), &header)
    }

    fn openbmc_registry(&self) -> Result<PathBuf, Error> {
        let path = self.include_dir.join(&self.manifest.openbmc_registry);
        let data = fs::read(&path).map_err(|e| Error::Read(path.clone(), e))?;
        let registry = MessageRegistry::parse(&self.manifest.openbmc_registry, &data)?;
        let header = MessageRegistryHeader::new(&registry, OPENBMC, "")?;
        self.write("openbmc_message_registry.hpp", &header)
    }

    fn privilege_registry(&self) -> Result<PathBuf, Error> {
        let url = self.manifest.registry_url(&self.manifest.privilege_registry);
        let data = self.source.fetch(&url).map_err(Error::Source)?;
        let registry = PrivilegeRegistry::parse(&data).map_err(Error::Privilege)?;
        let dedup = Deduplicated::new(&registry, self.naming);
        debug!(
            "{} entities share {} privilege sets",
            dedup.entities.len(),
            dedup.sets.len()
        );
        self.write("privilege_registry.hpp", &PrivilegeRegistryHeader(&dedup))
    }

    fn write(&self, file_name: &str, content: &dyn Display) -> Result<PathBuf, Error> {
        let path = self.include_dir.join(file_name);
        fs::write(&path, content.to_string()).map_err(|e| Error::Write(path.clone(), e))?;
        info!("{} has been written", path.display());
        Ok(path)
    }
}
