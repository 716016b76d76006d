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

//! Schema bundle installation.
//!
//! CSDL and JSON schemas of the DSP8010 bundle are installed into the
//! static tree of the service (`<static>/redfish/v1`):
//!
//! - `schema/<file>.xml` CSDL documents;
//! - `$metadata/index.xml` referencing every installed CSDL document
//!   and the OEM schemas of the manifest;
//! - `JsonSchemas/<schema>/<schema>.json` latest version of each JSON
//!   schema with its `index.json` resource;
//! - `JsonSchemas/index.json` collection of all JSON schemas.
//!
//! Files whose names start with `Oem` are owned by the service and
//! are kept.

/// Bundle archive
pub mod bundle;

/// EDMX namespaces
pub mod edmx;

/// `JsonSchemaFile` resources
pub mod json_schema;

/// `$metadata` document
pub mod metadata;

use crate::manifest::Manifest;
use crate::schema_version::Error as SchemaVersionError;
use bundle::Bundle;
use edmx::Edmx;
use edmx::ValidateError;
use json_schema::Collection;
use json_schema::JsonSchemaFile;
use log::debug;
use log::info;
use metadata::MetadataIndex;
use metadata::Reference;
use serde_json::Error as JsonError;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fs;
use std::io::Error as IoError;
use std::path::Path;
use std::path::PathBuf;
use std::str::Utf8Error;
use zip::result::ZipError;

/// Prefix of files that are not removed on reinstall.
pub const KEEP_PREFIX: &str = "Oem";

/// Schema installation errors.
#[derive(Debug)]
pub enum Error {
    /// Bundle archive error.
    Zip(ZipError),
    /// Archive entry path is absolute or escapes its directory.
    UnsafeEntryPath(String),
    /// Schema file name has malformed version.
    Version(SchemaVersionError),
    /// CSDL document is not UTF-8.
    NotUtf8(String, Utf8Error),
    /// CSDL document is not valid EDMX.
    Edmx(String, ValidateError),
    /// Failed to serialize JSON resource.
    Json(JsonError),
    /// File system error.
    Io(PathBuf, IoError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Zip(err) => write!(f, "schema bundle error: {err}"),
            Self::UnsafeEntryPath(path) => write!(f, "unsafe path in schema bundle: {path}"),
            Self::Version(err) => err.fmt(f),
            Self::NotUtf8(file, err) => write!(f, "while reading {file}\n{err}"),
            Self::Edmx(file, err) => write!(f, "while parsing {file}\n{err}"),
            Self::Json(err) => write!(f, "JSON serialization error: {err}"),
            Self::Io(path, err) => write!(f, "{}: {err}", path.display()),
        }
    }
}

impl StdError for Error {}

/// Installer of schema bundle into static tree.
pub struct Installer<'a> {
    manifest: &'a Manifest,
    root: PathBuf,
}

impl<'a> Installer<'a> {
    /// Installer into `<static_dir>/redfish/v1`.
    #[must_use]
    pub fn new(manifest: &'a Manifest, static_dir: &Path) -> Self {
        Self {
            manifest,
            root: static_dir.join("redfish").join("v1"),
        }
    }

    /// Directory of CSDL documents.
    #[must_use]
    pub fn schema_dir(&self) -> PathBuf {
        self.root.join("schema")
    }

    /// Directory of JSON schemas.
    #[must_use]
    pub fn json_schema_dir(&self) -> PathBuf {
        self.root.join("JsonSchemas")
    }

    /// Path of `$metadata` document.
    #[must_use]
    pub fn metadata_index(&self) -> PathBuf {
        self.root.join("$metadata").join("index.xml")
    }

    /// Replace installed schemas with content of the bundle.
    ///
    /// # Errors
    ///
    /// Returns first error of reading bundle or writing files.
    pub fn install(&self, data: &[u8]) -> Result<Vec<PathBuf>, Error> {
        let mut bundle = Bundle::new(data)?;
        let contents = bundle.contents()?;
        debug!(
            "bundle contains {} CSDL documents and {} JSON schemas",
            contents.csdl.len(),
            contents.json_schemas.len()
        );

        let mut schema_files = Vec::new();
        let mut index = MetadataIndex::default();
        for entry in &contents.csdl {
            let content = bundle.read(entry)?;
            let xml = std::str::from_utf8(&content)
                .map_err(|e| Error::NotUtf8(entry.path.clone(), e))?;
            let edmx = Edmx::parse(xml).map_err(|e| Error::Edmx(entry.path.clone(), e))?;
            index
                .references
                .push(Reference::installed(&entry.file_name, &edmx.namespaces));
            schema_files.push((self.schema_dir().join(&entry.file_name), content));
        }
        index.oem_references = self.manifest.oem_schemas.iter().map(Into::into).collect();

        let json_schema_dir = self.json_schema_dir();
        let mut json_files = Vec::new();
        for schema in &contents.json_schemas {
            let latest = match schema.latest() {
                Some(latest) => latest,
                None => continue,
            };
            let dir = json_schema_dir.join(&schema.name);
            let content = bundle.read(latest)?;
            json_files.push((dir.join(format!("{}.json", schema.name)), content));
            let resource = JsonSchemaFile::new(&schema.name)
                .to_json()
                .map_err(Error::Json)?;
            json_files.push((dir.join("index.json"), resource));
        }
        let collection = Collection::new(contents.json_schemas.iter().map(|s| s.name.as_str()))
            .to_json()
            .map_err(Error::Json)?;
        json_files.push((json_schema_dir.join("index.json"), collection));

        // Previous installation is removed only after the bundle is validated.
        self.clean()?;

        let mut written = Vec::new();
        for (path, content) in &schema_files {
            written.push(write(path, content)?);
        }
        written.push(write(&self.metadata_index(), index.to_string().as_bytes())?);
        for (path, content) in &json_files {
            written.push(write(path, content)?);
        }
        Ok(written)
    }

    /// Remove previously installed schemas and create directories.
    fn clean(&self) -> Result<(), Error> {
        for dir in &[self.schema_dir(), self.json_schema_dir()] {
            if dir.exists() {
                remove_installed(dir)?;
            }
            fs::create_dir_all(dir).map_err(|e| Error::Io(dir.clone(), e))?;
        }
        let index = self.metadata_index();
        if index.exists() {
            fs::remove_file(&index).map_err(|e| Error::Io(index.clone(), e))?;
        }
        Ok(())
    }
}

fn remove_installed(dir: &Path) -> Result<(), Error> {
    let entries = fs::read_dir(dir).map_err(|e| Error::Io(dir.into(), e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::Io(dir.into(), e))?;
        if entry.file_name().to_string_lossy().starts_with(KEEP_PREFIX) {
            debug!("keeping {}", entry.path().display());
            continue;
        }
        let path = entry.path();
        let result = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        result.map_err(|e| Error::Io(path.clone(), e))?;
    }
    Ok(())
}

fn write(path: &Path, content: &[u8]) -> Result<PathBuf, Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::Io(parent.into(), e))?;
    }
    fs::write(path, content).map_err(|e| Error::Io(path.into(), e))?;
    info!("{} has been written", path.display());
    Ok(path.into())
}
