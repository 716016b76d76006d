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

//! `JsonSchemaFile` resources describing installed JSON schemas.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Error as JsonError;
use serde_json::Serializer;

const JSON_SCHEMAS: &str = "/redfish/v1/JsonSchemas";

/// Location of a schema file.
#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    pub language: &'static str,
    pub publication_uri: String,
    pub uri: String,
}

/// `JsonSchemaFile` resource of a single schema.
#[derive(Serialize, Debug)]
pub struct JsonSchemaFile {
    #[serde(rename = "@odata.context")]
    pub odata_context: &'static str,
    #[serde(rename = "@odata.id")]
    pub odata_id: String,
    #[serde(rename = "@odata.type")]
    pub odata_type: &'static str,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Schema")]
    pub schema: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Languages")]
    pub languages: Vec<&'static str>,
    #[serde(rename = "Languages@odata.count")]
    pub languages_count: usize,
    #[serde(rename = "Location")]
    pub location: Vec<Location>,
    #[serde(rename = "Location@odata.count")]
    pub location_count: usize,
}

impl JsonSchemaFile {
    /// Resource for schema `name` installed as
    /// `/redfish/v1/JsonSchemas/<name>/<name>.json`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let location = vec![Location {
            language: "en",
            publication_uri: format!("http://redfish.dmtf.org/schemas/v1/{name}.json"),
            uri: format!("{JSON_SCHEMAS}/{name}/{name}.json"),
        }];
        let languages = vec!["en"];
        Self {
            odata_context: "/redfish/v1/$metadata#JsonSchemaFile.JsonSchemaFile",
            odata_id: format!("{JSON_SCHEMAS}/{name}"),
            odata_type: "#JsonSchemaFile.v1_0_2.JsonSchemaFile",
            name: format!("{name} Schema File"),
            schema: format!("#{name}.{name}"),
            description: format!("{name} Schema File Location"),
            id: name.into(),
            languages_count: languages.len(),
            languages,
            location_count: location.len(),
            location,
        }
    }

    /// Pretty-printed JSON with 4-space indent.
    ///
    /// # Errors
    ///
    /// Serialization error.
    pub fn to_json(&self) -> Result<Vec<u8>, JsonError> {
        to_pretty_json(self, b"    ")
    }
}

/// Collection member reference.
#[derive(Serialize, Debug)]
pub struct Member {
    #[serde(rename = "@odata.id")]
    pub odata_id: String,
}

/// `JsonSchemaFileCollection` resource.
#[derive(Serialize, Debug)]
pub struct Collection {
    #[serde(rename = "@odata.id")]
    pub odata_id: &'static str,
    #[serde(rename = "@odata.context")]
    pub odata_context: &'static str,
    #[serde(rename = "@odata.type")]
    pub odata_type: &'static str,
    #[serde(rename = "Name")]
    pub name: &'static str,
    #[serde(rename = "Description")]
    pub description: &'static str,
    #[serde(rename = "Members@odata.count")]
    pub members_count: usize,
    #[serde(rename = "Members")]
    pub members: Vec<Member>,
}

impl Collection {
    /// Collection of schemas. Members are sorted by `@odata.id`.
    #[must_use]
    pub fn new<'a, I: IntoIterator<Item = &'a str>>(schemas: I) -> Self {
        let mut members = schemas
            .into_iter()
            .map(|name| Member {
                odata_id: format!("{JSON_SCHEMAS}/{name}"),
            })
            .collect::<Vec<_>>();
        members.sort_by(|a, b| a.odata_id.cmp(&b.odata_id));
        Self {
            odata_id: JSON_SCHEMAS,
            odata_context: "/redfish/v1/$metadata#JsonSchemaFileCollection.JsonSchemaFileCollection",
            odata_type: "#JsonSchemaFileCollection.JsonSchemaFileCollection",
            name: "JsonSchemaFile Collection",
            description: "Collection of JsonSchemaFiles",
            members_count: members.len(),
            members,
        }
    }

    /// Pretty-printed JSON with 2-space indent.
    ///
    /// # Errors
    ///
    /// Serialization error.
    pub fn to_json(&self) -> Result<Vec<u8>, JsonError> {
        to_pretty_json(self, b"  ")
    }
}

fn to_pretty_json<T: Serialize>(value: &T, indent: &[u8]) -> Result<Vec<u8>, JsonError> {
    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent));
    value.serialize(&mut ser)?;
    Ok(out)
}
