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

//! Privilege registry header.

use crate::privilege::dedup::Deduplicated;
use crate::privilege::dedup::PrivilegeSet;
use crate::privilege::dedup::PrivilegeSetName;
use crate::registries::cpp::CppStr;
use crate::registries::PRAGMA_ONCE;
use crate::registries::WARNING;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Name of the C++ constant for privilege set (`privilegeSetLogin`).
pub struct ConstantName<'a>(pub &'a PrivilegeSetName);

impl Display for ConstantName<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "privilegeSet{}", self.0)
    }
}

/// C++ initializer of privilege set array.
struct Initializer<'a>(&'a PrivilegeSet);

impl Display for Initializer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("{{\n")?;
        for (no, alt) in self.0.alternatives().iter().enumerate() {
            if no > 0 {
                f.write_str(",\n")?;
            }
            f.write_str("    {")?;
            for (pno, privilege) in alt.iter().enumerate() {
                if pno > 0 {
                    f.write_str(", ")?;
                }
                CppStr(privilege.inner()).fmt(f)?;
            }
            f.write_str("}")?;
        }
        f.write_str("\n}}")
    }
}

/// Generated C++ header of the privilege registry.
pub struct PrivilegeRegistryHeader<'a>(pub &'a Deduplicated);

impl Display for PrivilegeRegistryHeader<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(PRAGMA_ONCE)?;
        f.write_str(WARNING)?;
        writeln!(f)?;
        writeln!(f, "#include \"privileges.hpp\"")?;
        writeln!(f)?;
        writeln!(f, "#include <array>")?;
        writeln!(f)?;
        writeln!(f, "// clang-format off")?;
        writeln!(f)?;
        writeln!(f, "namespace redfish::privileges")?;
        writeln!(f, "{{")?;
        for def in &self.0.sets {
            writeln!(
                f,
                "const std::array<Privileges, {}> {} = {};",
                def.set.len(),
                ConstantName(&def.name),
                Initializer(&def.set)
            )?;
        }
        for entity in &self.0.entities {
            writeln!(f, "// {}", entity.entity)?;
            for b in &entity.operations {
                writeln!(
                    f,
                    "const static auto& {}{} = {};",
                    b.operation.inner().to_lowercase(),
                    entity.entity,
                    ConstantName(&b.set_name)
                )?;
            }
            writeln!(f)?;
            if entity.overrides.is_empty() {
                continue;
            }
            for o in &entity.overrides {
                f.write_str("// Subordinate override for ")?;
                for target in &o.chain {
                    write!(f, "{target} -> ")?;
                }
                writeln!(f, "{}", entity.entity)?;
                let suffix = o.chain_suffix();
                for b in &o.operations {
                    writeln!(
                        f,
                        "const static auto& {}{}SubOver{suffix} = {};",
                        b.operation.inner().to_lowercase(),
                        entity.entity,
                        ConstantName(&b.set_name)
                    )?;
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "}} // namespace redfish::privileges")?;
        writeln!(f, "// clang-format on")
    }
}
