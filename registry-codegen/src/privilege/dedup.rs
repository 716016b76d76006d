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

//! Privilege set deduplication.
//!
//! Many entities and operations share the same privilege
//! requirements. Generated code defines every distinct privilege set
//! once and refers to it by name from each entity / operation /
//! subordinate override binding.
//!
//! Privilege sets are compared by their canonical form: alternatives
//! rendered as `{Priv1,Priv2}` joined by `,`, with `NoAuth` dropped.
//! An alternative that consisted of `NoAuth` only keeps its braces
//! (`{}`), meaning "no privileges required".

use crate::privilege::overrides;
use crate::privilege::Alternative;
use crate::privilege::EntityName;
use crate::privilege::OperationName;
use crate::privilege::OperationPrivileges;
use crate::privilege::PrivilegeName;
use crate::privilege::PrivilegeRegistry;
use clap::ValueEnum;
use std::collections::HashMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use tagged_types::TaggedType;

/// Generated name of a privilege set.
pub type PrivilegeSetName = TaggedType<String, PrivilegeSetNameTag>;
#[doc(hidden)]
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq)]
#[transparent(Debug, Display)]
#[capability(inner_access)]
pub enum PrivilegeSetNameTag {}

/// How names of deduplicated privilege sets are generated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum NamingStrategy {
    /// Privileges joined with `And`, alternatives joined with `Or`
    /// (`LoginOrConfigureManager`). Distinct sets may collide when
    /// privilege names contain `And` or `Or`.
    #[default]
    Descriptive,
    /// `PrivSet_<n>` where `n` is the position of the set in the
    /// order of first appearance. Never collides.
    Indexed,
}

/// Privilege set with `NoAuth` removed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrivilegeSet {
    alternatives: Vec<Vec<PrivilegeName>>,
}

impl PrivilegeSet {
    /// Build privilege set from document alternatives.
    #[must_use]
    pub fn new(alternatives: &[Alternative]) -> Self {
        Self {
            alternatives: alternatives
                .iter()
                .map(|alt| alt.required().cloned().collect())
                .collect(),
        }
    }

    /// Alternatives (OR) of required privileges (AND).
    #[must_use]
    pub fn alternatives(&self) -> &[Vec<PrivilegeName>] {
        &self.alternatives
    }

    /// Number of alternatives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// `true` if set has no alternatives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Canonical textual form used as deduplication key.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl Display for PrivilegeSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (no, alt) in self.alternatives.iter().enumerate() {
            if no > 0 {
                f.write_str(",")?;
            }
            f.write_str("{")?;
            for (pno, privilege) in alt.iter().enumerate() {
                if pno > 0 {
                    f.write_str(",")?;
                }
                Display::fmt(privilege, f)?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

/// Descriptive name of privilege alternatives. Privileges are taken
/// as written in the document, so `NoAuth` takes part in the name
/// (`LoginOrNoAuth`).
#[must_use]
pub fn descriptive_name(alternatives: &[Alternative]) -> String {
    alternatives
        .iter()
        .map(|alt| {
            alt.0
                .iter()
                .map(|p| p.inner().as_str())
                .collect::<Vec<_>>()
                .join("And")
        })
        .collect::<Vec<_>>()
        .join("Or")
}

/// Split descriptive name back into alternatives of privilege
/// names. Exact inverse of [`descriptive_name`] only when no
/// privilege name contains `And` or `Or`.
#[must_use]
pub fn parse_descriptive_name(name: &str) -> Vec<Alternative> {
    name.split("Or")
        .map(|alt| {
            Alternative(
                alt.split("And")
                    .map(|p| PrivilegeName::new(p.into()))
                    .collect(),
            )
        })
        .collect()
}

/// Distinct privilege set with its generated name.
#[derive(Debug)]
pub struct PrivilegeSetDef {
    pub name: PrivilegeSetName,
    pub set: PrivilegeSet,
}

/// Operation that refers to a deduplicated privilege set.
#[derive(Debug, PartialEq, Eq)]
pub struct OperationBinding {
    pub operation: OperationName,
    pub set_name: PrivilegeSetName,
}

/// Bindings of one expanded subordinate override chain.
#[derive(Debug)]
pub struct OverrideBindings {
    pub chain: Vec<EntityName>,
    pub operations: Vec<OperationBinding>,
}

impl OverrideBindings {
    /// Chain names concatenated (`ManagerEthernetInterfaceCollection`).
    #[must_use]
    pub fn chain_suffix(&self) -> String {
        self.chain.iter().map(|t| t.inner().as_str()).collect()
    }
}

/// All bindings of one entity.
#[derive(Debug)]
pub struct EntityBindings {
    pub entity: EntityName,
    pub operations: Vec<OperationBinding>,
    pub overrides: Vec<OverrideBindings>,
}

/// Result of deduplication.
#[derive(Debug)]
pub struct Deduplicated {
    /// Distinct privilege sets in order of first appearance.
    pub sets: Vec<PrivilegeSetDef>,
    /// Per-entity bindings in document order.
    pub entities: Vec<EntityBindings>,
}

impl Deduplicated {
    /// Deduplicate privilege sets of the registry.
    ///
    /// Sets of the main operation maps of all entities are numbered
    /// first, then sets that appear only in subordinate overrides.
    /// A set keeps the position of its first appearance, but its
    /// descriptive name is built from the last alternatives list that
    /// has the same canonical form.
    #[must_use]
    pub fn new(registry: &PrivilegeRegistry, naming: NamingStrategy) -> Self {
        let mut interner = Interner::default();
        registry
            .mappings
            .iter()
            .flat_map(|m| m.operations.iter())
            .for_each(|op| interner.intern(&op.alternatives));
        registry
            .mappings
            .iter()
            .flat_map(|m| m.subordinate_overrides.iter())
            .flat_map(|o| o.operations.iter())
            .for_each(|op| interner.intern(&op.alternatives));
        let names = interner.name(naming);

        let entities = registry
            .mappings
            .iter()
            .map(|m| EntityBindings {
                entity: m.entity.clone(),
                operations: names.bind(&m.operations),
                overrides: m
                    .subordinate_overrides
                    .iter()
                    .flat_map(|o| {
                        let operations = names.bind(&o.operations);
                        overrides::expand(&o.targets)
                            .into_iter()
                            .map(move |chain| OverrideBindings {
                                chain,
                                operations: operations
                                    .iter()
                                    .map(|b| OperationBinding {
                                        operation: b.operation.clone(),
                                        set_name: b.set_name.clone(),
                                    })
                                    .collect(),
                            })
                    })
                    .collect(),
            })
            .collect();

        Self {
            sets: names.sets,
            entities,
        }
    }

    /// Find privilege set by its generated name.
    #[must_use]
    pub fn set(&self, name: &PrivilegeSetName) -> Option<&PrivilegeSetDef> {
        self.sets.iter().find(|s| &s.name == name)
    }

    /// Flat list of `(entity, operation, set name)`.
    pub fn bindings(
        &self,
    ) -> impl Iterator<Item = (&EntityName, &OperationName, &PrivilegeSetName)> + '_ {
        self.entities.iter().flat_map(|e| {
            e.operations
                .iter()
                .map(move |b| (&e.entity, &b.operation, &b.set_name))
        })
    }

    /// Flat list of `(entity, chain suffix, operation, set name)`.
    pub fn override_bindings(
        &self,
    ) -> impl Iterator<Item = (&EntityName, String, &OperationName, &PrivilegeSetName)> + '_ {
        self.entities.iter().flat_map(|e| {
            e.overrides.iter().flat_map(move |o| {
                let suffix = o.chain_suffix();
                o.operations
                    .iter()
                    .map(move |b| (&e.entity, suffix.clone(), &b.operation, &b.set_name))
            })
        })
    }
}

/// Collects distinct privilege sets in order of first appearance.
#[derive(Default)]
struct Interner<'a> {
    index: HashMap<String, usize>,
    sets: Vec<(PrivilegeSet, &'a [Alternative])>,
}

impl<'a> Interner<'a> {
    fn intern(&mut self, alternatives: &'a [Alternative]) {
        let set = PrivilegeSet::new(alternatives);
        let canonical = set.canonical();
        match self.index.get(&canonical) {
            Some(&no) => self.sets[no].1 = alternatives,
            None => {
                self.index.insert(canonical, self.sets.len());
                self.sets.push((set, alternatives));
            }
        }
    }

    fn name(self, naming: NamingStrategy) -> Names {
        let sets = self
            .sets
            .into_iter()
            .enumerate()
            .map(|(no, (set, alternatives))| PrivilegeSetDef {
                name: PrivilegeSetName::new(match naming {
                    NamingStrategy::Descriptive => descriptive_name(alternatives),
                    NamingStrategy::Indexed => format!("PrivSet_{no}"),
                }),
                set,
            })
            .collect();
        Names {
            index: self.index,
            sets,
        }
    }
}

/// Named privilege sets.
struct Names {
    index: HashMap<String, usize>,
    sets: Vec<PrivilegeSetDef>,
}

impl Names {
    fn bind(&self, operations: &[OperationPrivileges]) -> Vec<OperationBinding> {
        operations
            .iter()
            .filter_map(|op| {
                self.index
                    .get(&PrivilegeSet::new(&op.alternatives).canonical())
                    .map(|&no| OperationBinding {
                        operation: op.operation.clone(),
                        set_name: self.sets[no].name.clone(),
                    })
            })
            .collect()
    }
}
