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

//! `$metadata` document of the service.

use crate::manifest::OemSchema;
use crate::schemas::edmx::Namespace;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Schema included from a referenced document.
#[derive(Debug)]
pub struct Include {
    pub namespace: String,
    pub alias: Option<&'static str>,
}

impl From<&Namespace> for Include {
    fn from(ns: &Namespace) -> Self {
        Self {
            namespace: ns.to_string(),
            alias: if ns.is_redfish_extensions() {
                Some("Redfish")
            } else {
                None
            },
        }
    }
}

/// `edmx:Reference` element.
#[derive(Debug)]
pub struct Reference {
    pub uri: String,
    pub includes: Vec<Include>,
}

impl Reference {
    /// Reference to CSDL file installed in `/redfish/v1/schema`.
    #[must_use]
    pub fn installed(file_name: &str, namespaces: &[Namespace]) -> Self {
        Self {
            uri: format!("/redfish/v1/schema/{file_name}"),
            includes: namespaces.iter().map(Into::into).collect(),
        }
    }
}

impl From<&OemSchema> for Reference {
    fn from(oem: &OemSchema) -> Self {
        Self {
            uri: oem.uri.clone(),
            includes: oem
                .namespaces
                .iter()
                .map(|namespace| Include {
                    namespace: namespace.clone(),
                    alias: None,
                })
                .collect(),
        }
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "    <edmx:Reference Uri=\"{}\">", self.uri)?;
        for include in &self.includes {
            match include.alias {
                Some(alias) => writeln!(
                    f,
                    "        <edmx:Include Namespace=\"{}\"  Alias=\"{alias}\"/>",
                    include.namespace
                )?,
                None => writeln!(
                    f,
                    "        <edmx:Include Namespace=\"{}\"/>",
                    include.namespace
                )?,
            }
        }
        writeln!(f, "    </edmx:Reference>")
    }
}

/// `$metadata/index.xml` content.
///
/// Installed schemas are referenced first, then the `Service` entity
/// container, then OEM schemas.
#[derive(Debug, Default)]
pub struct MetadataIndex {
    pub references: Vec<Reference>,
    pub oem_references: Vec<Reference>,
}

impl Display for MetadataIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(
            f,
            "<edmx:Edmx xmlns:edmx=\"http://docs.oasis-open.org/odata/ns/edmx\" Version=\"4.0\">"
        )?;
        for reference in &self.references {
            write!(f, "{reference}")?;
        }
        writeln!(f, "    <edmx:DataServices>")?;
        writeln!(
            f,
            "        <Schema xmlns=\"http://docs.oasis-open.org/odata/ns/edm\" Namespace=\"Service\">"
        )?;
        writeln!(
            f,
            "            <EntityContainer Name=\"Service\" Extends=\"ServiceRoot.v1_0_0.ServiceContainer\"/>"
        )?;
        writeln!(f, "        </Schema>")?;
        writeln!(f, "    </edmx:DataServices>")?;
        for reference in &self.oem_references {
            write!(f, "{reference}")?;
        }
        writeln!(f, "</edmx:Edmx>")
    }
}
