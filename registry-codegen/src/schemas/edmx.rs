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

//! Minimal EDMX reader.
//!
//! Only schema namespaces of `edmx:DataServices` are needed to build
//! `$metadata` references; all other elements of CSDL documents are
//! skipped.

use quick_xml::DeError;
use serde::de::Error as DeErrorTrait;
use serde::de::Visitor;
use serde::Deserialize;
use serde::Deserializer;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;

/// EDMX validation errors.
#[derive(Debug)]
pub enum ValidateError {
    /// XML deserialization error.
    XmlDeserialize(DeError),
    /// Invalid number of `DataServices`.
    WrongDataServicesNumber,
}

impl Display for ValidateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::XmlDeserialize(err) => write!(f, "XML error: {err}"),
            Self::WrongDataServicesNumber => {
                write!(f, "document must contain exactly one edmx:DataServices")
            }
        }
    }
}

impl std::error::Error for ValidateError {}

/// Invalid namespace.
#[derive(Debug)]
pub struct InvalidNamespace(String);

impl Display for InvalidNamespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "invalid namespace {}", self.0)
    }
}

/// Schema namespace (`RedfishExtensions.v1_0_0`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Namespace {
    pub ids: Vec<String>,
}

impl Namespace {
    /// Namespace that is included with `Alias="Redfish"`.
    #[must_use]
    pub fn is_redfish_extensions(&self) -> bool {
        self.ids
            .first()
            .map_or(false, |id| id.starts_with("RedfishExtensions"))
    }

    fn is_simple_identifier(s: &str) -> bool {
        // Starts with a letter or underscore, followed by letters,
        // underscores or digits. Max length is not checked.
        let mut chars = s.chars();
        chars
            .next()
            .map_or(false, |first| first.is_alphabetic() || first == '_')
            && chars.all(|c| c.is_alphanumeric() || c == '_')
    }
}

impl FromStr for Namespace {
    type Err = InvalidNamespace;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ids = s.split('.').map(ToString::to_string).collect::<Vec<_>>();
        if ids.iter().all(|id| Self::is_simple_identifier(id)) {
            Ok(Self { ids })
        } else {
            Err(InvalidNamespace(s.into()))
        }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.ids.join("."))
    }
}

impl<'de> Deserialize<'de> for Namespace {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct NsVisitor {}
        impl Visitor<'_> for NsVisitor {
            type Value = Namespace;

            fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
                formatter.write_str("Namespace string")
            }
            fn visit_str<E: DeErrorTrait>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map_err(DeErrorTrait::custom)
            }
        }

        de.deserialize_string(NsVisitor {})
    }
}

/// 3.1 Element edmx:Edmx
#[derive(Debug, Deserialize)]
struct DeEdmx {
    #[serde(rename = "DataServices", default)]
    data_services: Vec<DeDataServices>,
}

/// 3.2 Element edmx:DataServices
#[derive(Debug, Deserialize)]
struct DeDataServices {
    #[serde(rename = "Schema", default)]
    schemas: Vec<DeSchema>,
}

/// 5.1 Element edm:Schema
#[derive(Debug, Deserialize)]
struct DeSchema {
    #[serde(rename = "@Namespace")]
    namespace: Namespace,
}

/// Validated EDMX document.
#[derive(Debug)]
pub struct Edmx {
    /// Namespaces of schemas in document order.
    pub namespaces: Vec<Namespace>,
}

impl Edmx {
    /// # Errors
    /// Validation error or XML parsing error.
    pub fn parse(data: &str) -> Result<Self, ValidateError> {
        quick_xml::de::from_str::<DeEdmx>(data)
            .map_err(ValidateError::XmlDeserialize)?
            .validate()
    }
}

impl DeEdmx {
    fn validate(self) -> Result<Edmx, ValidateError> {
        // This element MUST contain a single direct child edmx:DataServices element.
        if self.data_services.len() > 1 {
            return Err(ValidateError::WrongDataServicesNumber);
        }
        let ds = self
            .data_services
            .into_iter()
            .next()
            .ok_or(ValidateError::WrongDataServicesNumber)?;
        Ok(Edmx {
            namespaces: ds.schemas.into_iter().map(|s| s.namespace).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_namespaces() {
        let data = r#"<?xml version="1.0" encoding="UTF-8"?>
<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:Reference Uri="http://docs.oasis-open.org/odata/odata/v4.0/errata03/csd01/complete/vocabularies/Org.OData.Core.V1.xml">
    <edmx:Include Namespace="Org.OData.Core.V1" Alias="OData"/>
  </edmx:Reference>
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="Zone">
      <EntityType Name="Zone" BaseType="Resource.v1_0_0.Resource" Abstract="true">
        <Annotation Term="OData.Description" String="The Zone schema."/>
      </EntityType>
    </Schema>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="Zone.v1_0_0">
      <EntityType Name="Zone" BaseType="Zone.Zone"/>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;
        let edmx = Edmx::parse(data).unwrap();
        let namespaces = edmx
            .namespaces
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(namespaces, vec!["Zone", "Zone.v1_0_0"]);
        assert!(!edmx.namespaces[0].is_redfish_extensions());
    }

    #[test]
    fn test_redfish_extensions() {
        let ns: Namespace = "RedfishExtensions.v1_0_0".parse().unwrap();
        assert!(ns.is_redfish_extensions());
    }

    #[test]
    fn test_invalid_namespace() {
        assert!("Zone..v1".parse::<Namespace>().is_err());
        assert!("1Zone".parse::<Namespace>().is_err());
    }

    #[test]
    fn test_no_data_services() {
        let data = r#"<edmx:Edmx Version="4.0"></edmx:Edmx>"#;
        assert!(matches!(
            Edmx::parse(data),
            Err(ValidateError::WrongDataServicesNumber)
        ));
    }
}
