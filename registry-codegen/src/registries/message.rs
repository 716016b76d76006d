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

//! Message registry header.

use crate::registries::cpp::CppStr;
use crate::registries::cpp::LowerFirst;
use crate::registries::Error;
use crate::registries::PRAGMA_ONCE;
use crate::registries::WARNING;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Redfish message registry document.
#[derive(Debug, Deserialize)]
pub struct MessageRegistry {
    #[serde(rename = "@Redfish.Copyright")]
    pub copyright: String,
    #[serde(rename = "@odata.type")]
    pub odata_type: String,
    #[serde(rename = "RegistryVersion")]
    pub registry_version: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "RegistryPrefix")]
    pub registry_prefix: String,
    #[serde(rename = "OwningEntity")]
    pub owning_entity: String,
    /// Messages sorted by message id.
    #[serde(rename = "Messages")]
    pub messages: BTreeMap<String, Message>,
}

/// Message definition.
#[derive(Debug, Deserialize)]
pub struct Message {
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "MessageSeverity")]
    pub severity: String,
    #[serde(rename = "NumberOfArgs")]
    pub number_of_args: u32,
    #[serde(rename = "ParamTypes", default)]
    pub param_types: Vec<String>,
    #[serde(rename = "Resolution")]
    pub resolution: String,
}

impl MessageRegistry {
    /// Parse message registry document.
    ///
    /// # Errors
    ///
    /// `Error::Json` if document is not a message registry.
    pub fn parse(document: &str, data: &[u8]) -> Result<Self, Error> {
        serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_slice(data))
            .map_err(|e| Error::Json(document.into(), e))
    }
}

/// `major.minor.errata` of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryVersion {
    pub major: u32,
    pub minor: u32,
    pub errata: u32,
}

impl RegistryVersion {
    /// # Errors
    ///
    /// `Error::RegistryVersion` if version is not three dot-separated
    /// integers.
    pub fn parse(v: &str) -> Result<Self, Error> {
        let pieces = v
            .split('.')
            .map(str::parse)
            .collect::<Result<Vec<u32>, _>>()
            .map_err(|_| Error::RegistryVersion(v.into()))?;
        match pieces.as_slice() {
            [major, minor, errata] => Ok(Self {
                major: *major,
                minor: *minor,
                errata: *errata,
            }),
            _ => Err(Error::RegistryVersion(v.into())),
        }
    }
}

/// Generated C++ header of a message registry.
pub struct MessageRegistryHeader<'a> {
    registry: &'a MessageRegistry,
    version: RegistryVersion,
    namespace: &'a str,
    url: &'a str,
}

impl<'a> MessageRegistryHeader<'a> {
    /// # Errors
    ///
    /// `Error::RegistryVersion` if registry version is malformed.
    pub fn new(registry: &'a MessageRegistry, namespace: &'a str, url: &'a str) -> Result<Self, Error> {
        Ok(Self {
            registry,
            version: RegistryVersion::parse(&registry.registry_version)?,
            namespace,
            url,
        })
    }

    fn fmt_header(&self, f: &mut Formatter<'_>) -> FmtResult {
        let r = self.registry;
        writeln!(f, "const Header header = {{")?;
        writeln!(f, "    {},", CppStr(&r.copyright))?;
        writeln!(f, "    {},", CppStr(&r.odata_type))?;
        writeln!(f, "    {},", self.version.major)?;
        writeln!(f, "    {},", self.version.minor)?;
        writeln!(f, "    {},", self.version.errata)?;
        writeln!(f, "    {},", CppStr(&r.name))?;
        writeln!(f, "    {},", CppStr(&r.language))?;
        writeln!(f, "    {},", CppStr(&r.description))?;
        writeln!(f, "    {},", CppStr(&r.registry_prefix))?;
        writeln!(f, "    {},", CppStr(&r.owning_entity))?;
        writeln!(f, "}};")?;
        writeln!(f, "constexpr const char* url =")?;
        writeln!(f, "    {};", CppStr(self.url))
    }

    fn fmt_message(f: &mut Formatter<'_>, id: &str, message: &Message) -> FmtResult {
        writeln!(f, "    MessageEntry{{")?;
        writeln!(f, "        {},", CppStr(id))?;
        writeln!(f, "        {{")?;
        writeln!(f, "            {},", CppStr(&message.description))?;
        writeln!(f, "            {},", CppStr(&message.message))?;
        writeln!(f, "            {},", CppStr(&message.severity))?;
        writeln!(f, "            {},", message.number_of_args)?;
        if message.param_types.is_empty() {
            writeln!(f, "            {{}},")?;
        } else {
            write!(f, "            {{")?;
            for param_type in &message.param_types {
                write!(f, "\n                {},", CppStr(param_type))?;
            }
            writeln!(f, "\n            }},")?;
        }
        writeln!(f, "            {},", CppStr(&message.resolution))?;
        writeln!(f, "        }}}},")
    }
}

impl Display for MessageRegistryHeader<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(PRAGMA_ONCE)?;
        f.write_str(WARNING)?;
        writeln!(f)?;
        writeln!(f, "#include \"registries.hpp\"")?;
        writeln!(f)?;
        writeln!(f, "#include <array>")?;
        writeln!(f)?;
        writeln!(f, "// clang-format off")?;
        writeln!(f)?;
        writeln!(f, "namespace redfish::registries::{}", self.namespace)?;
        writeln!(f, "{{")?;
        self.fmt_header(f)?;
        writeln!(f)?;
        writeln!(f, "constexpr std::array registry =")?;
        writeln!(f, "{{")?;
        for (id, message) in &self.registry.messages {
            Self::fmt_message(f, id, message)?;
        }
        writeln!(f)?;
        writeln!(f, "}};")?;
        writeln!(f)?;
        writeln!(f, "enum class Index")?;
        writeln!(f, "{{")?;
        for (index, id) in self.registry.messages.keys().enumerate() {
            writeln!(f, "    {} = {index},", LowerFirst(id))?;
        }
        writeln!(f, "}};")?;
        writeln!(f, "}} // namespace redfish::registries::{}", self.namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASK_EVENT: &str = r##"{
        "@Redfish.Copyright": "Copyright 2014-2020 DMTF.",
        "@odata.type": "#MessageRegistry.v1_4_1.MessageRegistry",
        "Id": "TaskEvent.1.0.3",
        "Name": "Task Event Message Registry",
        "Language": "en",
        "Description": "This registry defines the messages for task related events.",
        "RegistryPrefix": "TaskEvent",
        "RegistryVersion": "1.0.3",
        "OwningEntity": "DMTF",
        "Messages": {
            "TaskStarted": {
                "Description": "The task with the specified identifier has started.",
                "Message": "The task with Id '%1' has started.",
                "Severity": "OK",
                "MessageSeverity": "OK",
                "NumberOfArgs": 1,
                "ParamTypes": ["string"],
                "Resolution": "None."
            },
            "TaskAborted": {
                "Description": "The task with the specified identifier has been aborted.",
                "Message": "The task with Id '%1' has been aborted.",
                "MessageSeverity": "Critical",
                "NumberOfArgs": 1,
                "ParamTypes": ["string"],
                "Resolution": "None."
            },
            "Ping": {
                "Description": "Ping \"test\".",
                "Message": "Ping.",
                "MessageSeverity": "OK",
                "NumberOfArgs": 0,
                "Resolution": "None."
            }
        }
    }"##;

    fn render() -> String {
        let registry = MessageRegistry::parse("TaskEvent", TASK_EVENT.as_bytes()).unwrap();
        MessageRegistryHeader::new(
            &registry,
            "task_event",
            "https://redfish.dmtf.org/registries/TaskEvent.1.0.3.json",
        )
        .unwrap()
        .to_string()
    }

    #[test]
    fn test_registry_version() {
        assert_eq!(
            RegistryVersion::parse("1.19.0").unwrap(),
            RegistryVersion {
                major: 1,
                minor: 19,
                errata: 0
            }
        );
        assert!(RegistryVersion::parse("1.19").is_err());
        assert!(RegistryVersion::parse("1.x.0").is_err());
    }

    #[test]
    fn test_header_block() {
        let text = render();
        assert!(text.starts_with("#pragma once\n"));
        assert!(text.contains("namespace redfish::registries::task_event\n{\n"));
        assert!(text.contains(
            "const Header header = {\n    \"Copyright 2014-2020 DMTF.\",\n    \"#MessageRegistry.v1_4_1.MessageRegistry\",\n    1,\n    0,\n    3,\n"
        ));
        assert!(text.contains(
            "constexpr const char* url =\n    \"https://redfish.dmtf.org/registries/TaskEvent.1.0.3.json\";\n"
        ));
        assert!(text.ends_with("} // namespace redfish::registries::task_event\n"));
    }

    #[test]
    fn test_messages_are_sorted_and_indexed() {
        let text = render();
        let aborted = text.find("\"TaskAborted\"").unwrap();
        let started = text.find("\"TaskStarted\"").unwrap();
        let ping = text.find("\"Ping\"").unwrap();
        assert!(ping < aborted && aborted < started);
        assert!(text.contains(
            "enum class Index\n{\n    ping = 0,\n    taskAborted = 1,\n    taskStarted = 2,\n};\n"
        ));
    }

    #[test]
    fn test_message_entry() {
        let text = render();
        assert!(text.contains(
            "    MessageEntry{\n        \"TaskStarted\",\n        {\n            \"The task with the specified identifier has started.\",\n            \"The task with Id '%1' has started.\",\n            \"OK\",\n            1,\n            {\n                \"string\",\n            },\n            \"None.\",\n        }},\n"
        ));
        assert!(text.contains("            0,\n            {},\n"));
        assert!(text.contains("\"Ping \\\"test\\\".\""));
    }

    #[test]
    fn test_missing_message_field() {
        let err = MessageRegistry::parse("Broken", br#"{"Messages": {}}"#).unwrap_err();
        assert!(matches!(err, Error::Json(ref doc, _) if doc == "Broken"));
    }
}
