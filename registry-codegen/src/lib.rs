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

//! Redfish registry generator
//!
//! Generates C++ headers of Redfish message registries and of the
//! privilege registry, and installs DMTF schema bundles into the
//! static tree of a Redfish service.
//!
//! Privilege registry entities often share identical privilege sets.
//! [`privilege::dedup`] collapses equal sets into named constants and
//! binds every entity operation to one of them. Subordinate overrides
//! are expanded by [`privilege::overrides`] into the chains of
//! resources they apply to.
//!
//! Schema files are ordered with [`schema_version`] that compares
//! version pieces numerically (`v1_10_0` is after `v1_2_0`).

/// Command-line commands
pub mod commands;

/// Generator manifest
pub mod manifest;

/// Privilege registry model and deduplication
pub mod privilege;

/// Registry headers
pub mod registries;

/// Schema version ordering
pub mod schema_version;

/// Schema bundle installation
pub mod schemas;

/// Document sources
pub mod source;

/// Generator errors
pub mod error;

#[doc(inline)]
pub use error::Error;
