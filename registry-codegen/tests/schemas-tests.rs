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

//! Integration tests of schema bundle installation.

use redfish_registry_codegen::commands::process_command;
use redfish_registry_codegen::commands::Commands;
use redfish_registry_codegen::Error;
use serde_json::Value as JsonValue;
use std::error::Error as StdError;
use std::fs;
use std::fs::File;
use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

const SERVICE_ROOT_CSDL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:Reference Uri="http://redfish.dmtf.org/schemas/v1/Resource_v1.xml">
    <edmx:Include Namespace="Resource.v1_0_0"/>
  </edmx:Reference>
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="ServiceRoot">
      <EntityType Name="ServiceRoot" BaseType="Resource.v1_0_0.Resource" Abstract="true"/>
    </Schema>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="ServiceRoot.v1_0_0">
      <EntityType Name="ServiceRoot" BaseType="ServiceRoot.ServiceRoot"/>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>
"#;

const EXTENSIONS_CSDL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
  <edmx:DataServices>
    <Schema xmlns="http://docs.oasis-open.org/odata/ns/edm" Namespace="RedfishExtensions.v1_0_0"/>
  </edmx:DataServices>
</edmx:Edmx>
"#;

fn write_bundle(path: &Path, files: &[(&str, &str)]) -> Result<(), Box<dyn StdError>> {
    let mut writer = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in files {
        if name.ends_with('/') {
            writer.add_directory(*name, options)?;
        } else {
            writer.start_file(*name, options)?;
            writer.write_all(content.replace('\n', "\r\n").as_bytes())?;
        }
    }
    writer.finish()?;
    Ok(())
}

fn default_bundle(path: &Path) -> Result<(), Box<dyn StdError>> {
    write_bundle(
        path,
        &[
            ("csdl/", ""),
            ("csdl/ServiceRoot_v1.xml", SERVICE_ROOT_CSDL),
            ("csdl/RedfishExtensions_v1.xml", EXTENSIONS_CSDL),
            ("json-schema/", ""),
            ("json-schema/ServiceRoot.json", "{\"title\": \"#ServiceRoot\"}\n"),
            ("json-schema/ServiceRoot.v1_2_0.json", "{\"title\": \"#ServiceRoot.v1_2_0\"}\n"),
            ("json-schema/ServiceRoot.v1_10_0.json", "{\"title\": \"#ServiceRoot.v1_10_0\"}\n"),
            ("json-schema/AccountService.v1_0_0.json", "{\"title\": \"#AccountService.v1_0_0\"}\n"),
            ("openapi/openapi.yaml", "openapi: 3.0.1\n"),
            ("dictionaries/ServiceRoot_v1.dict", ""),
        ],
    )
}

fn schemas(bundle: PathBuf, static_dir: &Path) -> Commands {
    Commands::Schemas {
        bundle: Some(bundle),
        static_dir: static_dir.into(),
        manifest: None,
    }
}

fn read_json(path: &Path) -> Result<JsonValue, Box<dyn StdError>> {
    Ok(serde_json::from_slice(&fs::read(path)?)?)
}

#[test]
fn install_bundle() -> Result<(), Box<dyn StdError>> {
    let dir = tempfile::tempdir()?;
    let bundle = dir.path().join("bundle.zip");
    default_bundle(&bundle)?;
    let static_dir = dir.path().join("static");
    process_command(&schemas(bundle, &static_dir))?;

    let root = static_dir.join("redfish").join("v1");
    let csdl = fs::read_to_string(root.join("schema").join("ServiceRoot_v1.xml"))?;
    assert_eq!(csdl, SERVICE_ROOT_CSDL);

    let index = fs::read_to_string(root.join("$metadata").join("index.xml"))?;
    let extensions = index
        .find("<edmx:Reference Uri=\"/redfish/v1/schema/RedfishExtensions_v1.xml\">")
        .ok_or("no RedfishExtensions reference")?;
    let service_root = index
        .find("<edmx:Reference Uri=\"/redfish/v1/schema/ServiceRoot_v1.xml\">")
        .ok_or("no ServiceRoot reference")?;
    let container = index
        .find("<EntityContainer Name=\"Service\" Extends=\"ServiceRoot.v1_0_0.ServiceContainer\"/>")
        .ok_or("no Service container")?;
    let oem = index
        .find("<edmx:Reference Uri=\"/redfish/v1/schema/OemManager_v1.xml\">")
        .ok_or("no OEM reference")?;
    assert!(extensions < service_root && service_root < container && container < oem);
    assert!(index.contains(
        "        <edmx:Include Namespace=\"RedfishExtensions.v1_0_0\"  Alias=\"Redfish\"/>\n"
    ));
    assert!(index.contains(
        "        <edmx:Include Namespace=\"ServiceRoot\"/>\n        <edmx:Include Namespace=\"ServiceRoot.v1_0_0\"/>\n"
    ));
    assert!(!index.contains("Resource.v1_0_0\"/>"));
    assert!(index.ends_with("</edmx:Edmx>\n"));

    let json_schemas = root.join("JsonSchemas");
    let latest = fs::read_to_string(json_schemas.join("ServiceRoot").join("ServiceRoot.json"))?;
    assert_eq!(latest, "{\"title\": \"#ServiceRoot.v1_10_0\"}\n");

    let schema_file = read_json(&json_schemas.join("ServiceRoot").join("index.json"))?;
    assert_eq!(schema_file["@odata.id"], "/redfish/v1/JsonSchemas/ServiceRoot");
    assert_eq!(schema_file["Schema"], "#ServiceRoot.ServiceRoot");
    assert_eq!(
        schema_file["Location"][0]["Uri"],
        "/redfish/v1/JsonSchemas/ServiceRoot/ServiceRoot.json"
    );

    let collection = read_json(&json_schemas.join("index.json"))?;
    assert_eq!(collection["Members@odata.count"], 2);
    assert_eq!(
        collection["Members"][0]["@odata.id"],
        "/redfish/v1/JsonSchemas/AccountService"
    );
    assert_eq!(
        collection["Members"][1]["@odata.id"],
        "/redfish/v1/JsonSchemas/ServiceRoot"
    );
    assert!(!root.join("openapi").exists());
    Ok(())
}

#[test]
fn reinstall_keeps_oem_schemas() -> Result<(), Box<dyn StdError>> {
    let dir = tempfile::tempdir()?;
    let static_dir = dir.path().join("static");
    let root = static_dir.join("redfish").join("v1");
    let schema_dir = root.join("schema");
    let json_schemas = root.join("JsonSchemas");
    fs::create_dir_all(&schema_dir)?;
    fs::create_dir_all(json_schemas.join("OemManager"))?;
    fs::create_dir_all(json_schemas.join("Removed"))?;
    fs::write(schema_dir.join("OemManager_v1.xml"), "<oem/>")?;
    fs::write(schema_dir.join("Removed_v1.xml"), "<removed/>")?;
    fs::write(json_schemas.join("OemManager").join("index.json"), "{}")?;
    fs::write(json_schemas.join("Removed").join("index.json"), "{}")?;

    let bundle = dir.path().join("bundle.zip");
    default_bundle(&bundle)?;
    process_command(&schemas(bundle, &static_dir))?;

    assert_eq!(fs::read_to_string(schema_dir.join("OemManager_v1.xml"))?, "<oem/>");
    assert!(json_schemas.join("OemManager").join("index.json").exists());
    assert!(!schema_dir.join("Removed_v1.xml").exists());
    assert!(!json_schemas.join("Removed").exists());
    Ok(())
}

#[test]
fn unsafe_entry_path() -> Result<(), Box<dyn StdError>> {
    let dir = tempfile::tempdir()?;
    let bundle = dir.path().join("bundle.zip");
    write_bundle(&bundle, &[("csdl/../../escape.xml", EXTENSIONS_CSDL)])?;
    let static_dir = dir.path().join("static");
    let result = process_command(&schemas(bundle, &static_dir));
    let err = result.err().ok_or("unsafe path is accepted")?;
    assert!(matches!(err, Error::Schemas(_)));
    assert!(err.to_string().contains("unsafe path in schema bundle"));
    assert!(!dir.path().join("escape.xml").exists());
    Ok(())
}

#[test]
fn missing_bundle_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = process_command(&schemas(dir.path().join("missing.zip"), dir.path()));
    assert!(matches!(result, Err(Error::Io(..))));
}
