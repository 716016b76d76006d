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

use crate::manifest::Error as ManifestError;
use crate::registries::Error as RegistriesError;
use crate::schemas::Error as SchemasError;
use crate::source::Error as SourceError;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::io::Error as IoError;
use std::path::PathBuf;

/// Registry generator errors.
#[derive(Debug)]
pub enum Error {
    Manifest(ManifestError),
    Source(SourceError),
    Registries(RegistriesError),
    Schemas(SchemasError),
    Io(PathBuf, IoError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Manifest(error) => write!(f, "manifest error: {error}"),
            Self::Source(error) => write!(f, "document source error: {error}"),
            Self::Registries(error) => write!(f, "while generating registries\n{error}"),
            Self::Schemas(error) => write!(f, "while installing schemas\n{error}"),
            Self::Io(fname, error) => {
                write!(f, "input/output error: file: {}: {error}", fname.display())
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Manifest(error) => Some(error),
            Self::Source(error) => Some(error),
            Self::Registries(error) => Some(error),
            Self::Schemas(error) => Some(error),
            Self::Io(_, error) => Some(error),
        }
    }
}
