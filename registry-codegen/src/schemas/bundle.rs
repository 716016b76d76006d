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

//! DSP8010 schema bundle archive.
//!
//! The bundle is a zip archive with `csdl/`, `json-schema/`,
//! `openapi/` and `dictionaries/` directories. Only CSDL and JSON
//! schema files are installed.

use crate::schema_version::sort_by_version;
use crate::schema_version::SortOrder;
use crate::schemas::Error;
use log::debug;
use std::io::Cursor;
use std::io::Read as _;
use std::path::Component;
use std::path::Path;
use zip::ZipArchive;

const CSDL_DIR: &str = "csdl/";
const JSON_SCHEMA_DIR: &str = "json-schema/";

/// File in the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Path inside the archive.
    pub path: String,
    /// File name without directories.
    pub file_name: String,
}

impl AsRef<str> for Entry {
    fn as_ref(&self) -> &str {
        &self.file_name
    }
}

/// All versions of one JSON schema.
#[derive(Debug)]
pub struct JsonSchema {
    /// Schema name (`AccountService`).
    pub name: String,
    /// Schema files, latest version first.
    pub versions: Vec<Entry>,
}

impl AsRef<str> for JsonSchema {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl JsonSchema {
    /// Latest version of the schema.
    #[must_use]
    pub fn latest(&self) -> Option<&Entry> {
        self.versions.first()
    }
}

/// Sorted bundle contents.
#[derive(Debug)]
pub struct Contents {
    /// CSDL files in ascending version order.
    pub csdl: Vec<Entry>,
    /// JSON schemas in ascending name order.
    pub json_schemas: Vec<JsonSchema>,
}

/// Opened schema bundle.
pub struct Bundle<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> Bundle<'a> {
    /// Open bundle archive.
    ///
    /// # Errors
    ///
    /// `Error::Zip` if data is not a zip archive.
    pub fn new(data: &'a [u8]) -> Result<Self, Error> {
        Ok(Self {
            archive: ZipArchive::new(Cursor::new(data)).map_err(Error::Zip)?,
        })
    }

    /// Classify and sort files of the bundle.
    ///
    /// # Errors
    ///
    /// Returns error if archive is broken, has unsafe paths or
    /// malformed schema versions.
    pub fn contents(&mut self) -> Result<Contents, Error> {
        let mut csdl = Vec::new();
        let mut json_schemas: Vec<JsonSchema> = Vec::new();
        for i in 0..self.archive.len() {
            let file = self.archive.by_index(i).map_err(Error::Zip)?;
            if file.is_dir() {
                continue;
            }
            let path = file.name().to_string();
            let file_name = safe_file_name(&path)?;
            let entry = Entry { path, file_name };
            if entry.path.starts_with(CSDL_DIR) {
                csdl.push(entry);
            } else if entry.path.starts_with(JSON_SCHEMA_DIR) {
                let name = entry
                    .file_name
                    .split('.')
                    .next()
                    .unwrap_or_default()
                    .to_string();
                match json_schemas.iter_mut().find(|s| s.name == name) {
                    Some(schema) => schema.versions.push(entry),
                    None => json_schemas.push(JsonSchema {
                        name,
                        versions: vec![entry],
                    }),
                }
            } else {
                debug!("skipping {}", entry.path);
            }
        }

        let json_schemas = json_schemas
            .into_iter()
            .map(|JsonSchema { name, versions }| {
                sort_by_version(versions, SortOrder::Descending)
                    .map(|versions| JsonSchema { name, versions })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::Version)?;

        Ok(Contents {
            csdl: sort_by_version(csdl, SortOrder::Ascending).map_err(Error::Version)?,
            json_schemas: sort_by_version(json_schemas, SortOrder::Ascending)
                .map_err(Error::Version)?,
        })
    }

    /// Read file from the bundle with CRLF line endings converted to LF.
    ///
    /// # Errors
    ///
    /// `Error::Zip` if file cannot be read.
    pub fn read(&mut self, entry: &Entry) -> Result<Vec<u8>, Error> {
        let mut file = self.archive.by_name(&entry.path).map_err(Error::Zip)?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| Error::Zip(e.into()))?;
        Ok(normalize_line_endings(&content))
    }
}

/// File name of archive entry. Rejects absolute paths and paths with
/// `..`.
fn safe_file_name(path: &str) -> Result<String, Error> {
    let mut file_name = None;
    for c in Path::new(path).components() {
        match c {
            Component::Prefix(_) | Component::RootDir | Component::ParentDir => {
                return Err(Error::UnsafeEntryPath(path.into()));
            }
            Component::CurDir => {}
            Component::Normal(p) => file_name = Some(p),
        }
    }
    file_name
        .and_then(|name| name.to_str())
        .map(ToString::to_string)
        .ok_or_else(|| Error::UnsafeEntryPath(path.into()))
}

fn normalize_line_endings(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut iter = data.iter().peekable();
    while let Some(&b) = iter.next() {
        if b == b'\r' && iter.peek() == Some(&&b'\n') {
            continue;
        }
        out.push(b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn archive(files: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in files {
            if name.ends_with('/') {
                writer
                    .add_directory(*name, SimpleFileOptions::default())
                    .unwrap();
            } else {
                writer
                    .start_file(*name, SimpleFileOptions::default())
                    .unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_contents_are_classified_and_sorted() {
        let data = archive(&[
            ("csdl/", ""),
            ("csdl/Zone_v1.xml", ""),
            ("csdl/AccountService_v1.xml", ""),
            ("json-schema/Zone.v1_10_0.json", ""),
            ("json-schema/Zone.json", ""),
            ("json-schema/Zone.v1_2_0.json", ""),
            ("json-schema/AccountService.v1_0_0.json", ""),
            ("openapi/openapi.yaml", ""),
            ("dictionaries/Zone_v1.dict", ""),
        ]);
        let mut bundle = Bundle::new(&data).unwrap();
        let contents = bundle.contents().unwrap();

        let csdl = contents
            .csdl
            .iter()
            .map(|e| e.file_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(csdl, vec!["AccountService_v1.xml", "Zone_v1.xml"]);

        let schemas = contents
            .json_schemas
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(schemas, vec!["AccountService", "Zone"]);

        let zone = contents
            .json_schemas
            .iter()
            .find(|s| s.name == "Zone")
            .unwrap();
        let versions = zone
            .versions
            .iter()
            .map(|e| e.file_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            versions,
            vec!["Zone.v1_10_0.json", "Zone.v1_2_0.json", "Zone.json"]
        );
        assert_eq!(zone.latest().unwrap().path, "json-schema/Zone.v1_10_0.json");
    }

    #[test]
    fn test_read_normalizes_line_endings() {
        let data = archive(&[("csdl/Zone_v1.xml", "<a>\r\n<b/>\r\n</a>\r")]);
        let mut bundle = Bundle::new(&data).unwrap();
        let contents = bundle.contents().unwrap();
        let content = bundle.read(&contents.csdl[0]).unwrap();
        assert_eq!(content, b"<a>\n<b/>\n</a>\r");
    }

    #[test]
    fn test_unsafe_paths_are_rejected() {
        assert!(matches!(
            safe_file_name("../csdl/Zone_v1.xml"),
            Err(Error::UnsafeEntryPath(_))
        ));
        assert!(matches!(
            safe_file_name("/csdl/Zone_v1.xml"),
            Err(Error::UnsafeEntryPath(_))
        ));
        assert_eq!(safe_file_name("csdl/Zone_v1.xml").unwrap(), "Zone_v1.xml");
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(Bundle::new(b"not a zip"), Err(Error::Zip(_))));
    }
}
