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

//! Sources of DMTF documents.
//!
//! Registries and schema bundles are published on the DMTF site.
//! [`HttpSource`] downloads them; [`DirSource`] reads files with the
//! same names from a local directory, which allows offline
//! generation from previously downloaded documents.

use log::debug;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fs;
use std::io::Error as IoError;
use std::path::PathBuf;

/// Document source errors.
#[derive(Debug)]
pub enum Error {
    /// HTTP client cannot be built.
    Client(reqwest::Error),
    /// Failed to download document.
    Http(String, reqwest::Error),
    /// URL does not end with a file name.
    NoFileName(String),
    /// Failed to read local document.
    Io(PathBuf, IoError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Client(err) => write!(f, "failed to create HTTP client: {err}"),
            Self::Http(url, err) => write!(f, "failed to download {url}: {err}"),
            Self::NoFileName(url) => write!(f, "URL has no file name: {url}"),
            Self::Io(path, err) => write!(f, "failed to read {}: {err}", path.display()),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Client(err) | Self::Http(_, err) => Some(err),
            Self::Io(_, err) => Some(err),
            Self::NoFileName(_) => None,
        }
    }
}

/// Source of documents addressed by URL.
pub trait Source {
    /// Fetch document content.
    ///
    /// # Errors
    ///
    /// Returns error if document cannot be retrieved.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, Error>;
}

/// Downloads documents over HTTP(S). Proxy is taken from the
/// standard `https_proxy` / `HTTPS_PROXY` environment variables.
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    /// Create new HTTP source.
    ///
    /// # Errors
    ///
    /// Returns error if TLS backend cannot be initialized.
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            client: reqwest::blocking::Client::builder()
                .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(Error::Client)?,
        })
    }
}

impl Source for HttpSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
        debug!("downloading {url}");
        let response = self
            .client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|err| Error::Http(url.into(), err))?;
        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|err| Error::Http(url.into(), err))
    }
}

/// Reads documents from a directory. Last segment of the URL is used
/// as file name.
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, url: &str) -> Result<PathBuf, Error> {
        url.rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .map(|name| self.dir.join(name))
            .ok_or_else(|| Error::NoFileName(url.into()))
    }
}

impl Source for DirSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
        let path = self.path_for(url)?;
        debug!("reading {} for {url}", path.display());
        fs::read(&path).map_err(|err| Error::Io(path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_source_uses_last_url_segment() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Base.1.19.0.json"), b"{}").unwrap();
        let source = DirSource::new(dir.path());
        let content = source
            .fetch("https://redfish.dmtf.org/registries/Base.1.19.0.json")
            .unwrap();
        assert_eq!(content, b"{}");
    }

    #[test]
    fn test_dir_source_rejects_url_without_file_name() {
        let source = DirSource::new("/nonexistent");
        assert!(matches!(
            source.fetch("https://redfish.dmtf.org/registries/"),
            Err(Error::NoFileName(_))
        ));
    }

    #[test]
    fn test_dir_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(dir.path());
        assert!(matches!(
            source.fetch("https://example.com/missing.json"),
            Err(Error::Io(..))
        ));
    }
}
