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

//! Redfish privilege registry.
//!
//! The privilege registry maps every Redfish resource (entity) and
//! HTTP operation to the privileges a caller must hold. The document
//! is deserialized into `De*` structures and validated into
//! [`PrivilegeRegistry`]; validation rejects mappings that cannot be
//! turned into generated code.

/// Privilege set deduplication and naming
pub mod dedup;

/// Subordinate override chain expansion
pub mod overrides;

use serde::de::MapAccess;
use serde::de::Visitor;
use serde::Deserialize;
use serde::Deserializer;
use serde_json::Error as JsonError;
use serde_path_to_error::Error as PathError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use tagged_types::TaggedType;

/// Privilege that means "no authorization required". It never
/// constrains access and is dropped from privilege sets.
pub const NO_AUTH: &str = "NoAuth";

/// Name of the resource entity (`Manager`, `EthernetInterface`).
/// Subordinate override targets are entity names too.
pub type EntityName = TaggedType<String, EntityNameTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display, Deserialize)]
#[capability(inner_access)]
pub enum EntityNameTag {}

/// HTTP operation name (`GET`, `PATCH`).
pub type OperationName = TaggedType<String, OperationNameTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq)]
#[transparent(Debug, Display, Deserialize)]
#[capability(inner_access)]
pub enum OperationNameTag {}

/// Privilege name (`Login`, `ConfigureManager`).
pub type PrivilegeName = TaggedType<String, PrivilegeNameTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[transparent(Debug, Display, Deserialize)]
#[capability(inner_access)]
pub enum PrivilegeNameTag {}

/// Privilege registry validation errors.
#[derive(Debug)]
pub enum Error {
    /// JSON deserialization error.
    Json(PathError<JsonError>),
    /// Privilege alternative has no `Privilege` key.
    NoPrivilegeKey,
    /// Privilege alternative has empty `Privilege` list.
    EmptyPrivilegeList,
    /// Operation has no privilege alternatives.
    NoAlternatives,
    /// Subordinate override has no targets.
    NoTargets,
    /// Error in privilege alternative (by position).
    Alternative(usize, Box<Error>),
    /// Error in operation.
    Operation(OperationName, Box<Error>),
    /// Error in subordinate override (by position).
    SubordinateOverride(usize, Box<Error>),
    /// Error in entity mapping.
    Entity(EntityName, Box<Error>),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Json(err) => write!(f, "privilege registry format error: {err}"),
            Self::NoPrivilegeKey => write!(f, "missing required key: Privilege"),
            Self::EmptyPrivilegeList => write!(f, "empty privilege list"),
            Self::NoAlternatives => write!(f, "operation has no privilege alternatives"),
            Self::NoTargets => write!(f, "subordinate override has no targets"),
            Self::Alternative(no, err) => {
                write!(f, "while validating privilege alternative #{no}\n{err}")
            }
            Self::Operation(name, err) => write!(f, "while validating operation: {name}\n{err}"),
            Self::SubordinateOverride(no, err) => {
                write!(f, "while validating subordinate override #{no}\n{err}")
            }
            Self::Entity(name, err) => write!(f, "while validating entity: {name}\n{err}"),
        }
    }
}

impl std::error::Error for Error {}

/// Privilege registry document.
#[derive(Debug, Deserialize)]
struct DePrivilegeRegistry {
    #[serde(rename = "Mappings")]
    mappings: Vec<DeMapping>,
}

#[derive(Debug, Deserialize)]
struct DeMapping {
    #[serde(rename = "Entity")]
    entity: EntityName,
    #[serde(rename = "OperationMap")]
    operation_map: DeOperationMap,
    #[serde(rename = "SubordinateOverrides", default)]
    subordinate_overrides: Vec<DeSubordinateOverride>,
}

#[derive(Debug, Deserialize)]
struct DeSubordinateOverride {
    #[serde(rename = "Targets", default)]
    targets: Vec<EntityName>,
    #[serde(rename = "OperationMap")]
    operation_map: DeOperationMap,
}

#[derive(Debug, Deserialize)]
struct DeAlternative {
    #[serde(rename = "Privilege")]
    privilege: Option<Vec<PrivilegeName>>,
}

/// Operation map in document order.
#[derive(Debug)]
struct DeOperationMap(Vec<(OperationName, Vec<DeAlternative>)>);

impl<'de> Deserialize<'de> for DeOperationMap {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct OpMapVisitor {}
        impl<'de> Visitor<'de> for OpMapVisitor {
            type Value = DeOperationMap;

            fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
                formatter.write_str("map of operation to privilege alternatives")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut operations: Vec<(OperationName, Vec<DeAlternative>)> = Vec::new();
                while let Some(entry) = map.next_entry()? {
                    operations.push(entry);
                }
                Ok(DeOperationMap(operations))
            }
        }

        de.deserialize_map(OpMapVisitor {})
    }
}

/// Validated privilege registry.
#[derive(Debug)]
pub struct PrivilegeRegistry {
    pub mappings: Vec<Mapping>,
}

/// Privileges of one resource entity.
#[derive(Debug)]
pub struct Mapping {
    pub entity: EntityName,
    pub operations: Vec<OperationPrivileges>,
    pub subordinate_overrides: Vec<SubordinateOverride>,
}

/// Privilege alternatives required for an operation.
#[derive(Debug)]
pub struct OperationPrivileges {
    pub operation: OperationName,
    pub alternatives: Vec<Alternative>,
}

/// Privileges that are required together. Keeps privileges as they
/// are in the document, `NoAuth` included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative(pub Vec<PrivilegeName>);

impl Alternative {
    /// Privileges that constrain access (all except `NoAuth`).
    pub fn required(&self) -> impl Iterator<Item = &PrivilegeName> {
        self.0.iter().filter(|p| p.inner() != NO_AUTH)
    }
}

/// Alternate privileges of the entity when it is accessed under the
/// containment chain of `targets`.
#[derive(Debug)]
pub struct SubordinateOverride {
    pub targets: Vec<EntityName>,
    pub operations: Vec<OperationPrivileges>,
}

impl PrivilegeRegistry {
    /// Parse and validate privilege registry document.
    ///
    /// # Errors
    ///
    /// JSON format error or validation error that points to the
    /// offending entity / operation.
    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        serde_path_to_error::deserialize::<_, DePrivilegeRegistry>(
            &mut serde_json::Deserializer::from_slice(data),
        )
        .map_err(Error::Json)?
        .validate()
    }
}

impl DePrivilegeRegistry {
    fn validate(self) -> Result<PrivilegeRegistry, Error> {
        Ok(PrivilegeRegistry {
            mappings: self
                .mappings
                .into_iter()
                .map(DeMapping::validate)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl DeMapping {
    fn validate(self) -> Result<Mapping, Error> {
        let Self {
            entity,
            operation_map,
            subordinate_overrides,
        } = self;
        let validated = operation_map.validate().and_then(|operations| {
            subordinate_overrides
                .into_iter()
                .enumerate()
                .map(|(no, v)| {
                    v.validate()
                        .map_err(|e| Error::SubordinateOverride(no, Box::new(e)))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(|subordinate_overrides| (operations, subordinate_overrides))
        });
        match validated {
            Ok((operations, subordinate_overrides)) => Ok(Mapping {
                entity,
                operations,
                subordinate_overrides,
            }),
            Err(e) => Err(Error::Entity(entity, Box::new(e))),
        }
    }
}

impl DeSubordinateOverride {
    fn validate(self) -> Result<SubordinateOverride, Error> {
        if self.targets.is_empty() {
            return Err(Error::NoTargets);
        }
        Ok(SubordinateOverride {
            targets: self.targets,
            operations: self.operation_map.validate()?,
        })
    }
}

impl DeOperationMap {
    fn validate(self) -> Result<Vec<OperationPrivileges>, Error> {
        self.0
            .into_iter()
            .map(|(operation, alternatives)| {
                Self::validate_alternatives(alternatives)
                    .map(|alternatives| OperationPrivileges {
                        operation: operation.clone(),
                        alternatives,
                    })
                    .map_err(|e| Error::Operation(operation, Box::new(e)))
            })
            .collect()
    }

    fn validate_alternatives(alternatives: Vec<DeAlternative>) -> Result<Vec<Alternative>, Error> {
        if alternatives.is_empty() {
            return Err(Error::NoAlternatives);
        }
        alternatives
            .into_iter()
            .enumerate()
            .map(|(no, alt)| match alt.privilege {
                None => Err(Error::Alternative(no, Box::new(Error::NoPrivilegeKey))),
                Some(v) if v.is_empty() => {
                    Err(Error::Alternative(no, Box::new(Error::EmptyPrivilegeList)))
                }
                Some(v) => Ok(Alternative(v)),
            })
            .collect()
    }
}
