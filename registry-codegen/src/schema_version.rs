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

//! Natural ordering of Redfish schema identifiers.
//!
//! Schema identifiers look like `Zone.v1_10_0` (schema name, then
//! version) or `Zone.v1_10_0.json` (file name). Ordering them as
//! plain strings puts `v1_10_0` before `v1_2_0`, so this module
//! turns an identifier into a key that compares the version pieces
//! as integers. Schema names compare case-insensitively.

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::num::ParseIntError;
use std::str::FromStr;

/// Schema version key errors.
#[derive(Debug)]
pub enum Error {
    /// Version part contains digits but one of `_`-separated pieces
    /// is not an integer.
    InvalidVersionPiece(String, String, ParseIntError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InvalidVersionPiece(id, piece, err) => {
                write!(f, "invalid version piece '{piece}' in schema identifier {id}: {err}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Comparison key for a schema identifier.
///
/// Key is `(base, major, minor, patch, ...)`. Keys compare as
/// sequences, so a key without version pieces sorts before any key
/// with the same base and version pieces.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersionKey {
    base: String,
    version: Vec<u64>,
}

impl SchemaVersionKey {
    /// Build key from raw schema identifier.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidVersionPiece` if the version part has
    /// digits but cannot be split into integers.
    pub fn new(id: &str) -> Result<Self, Error> {
        let folded = id.to_lowercase();
        let mut parts = folded.split('.');
        let base = parts.next().unwrap_or_default().to_string();
        let version = match parts.next() {
            Some(version) => {
                let version = version.strip_prefix('v').unwrap_or(version);
                if version.chars().any(|c| c.is_ascii_digit()) {
                    version
                        .split('_')
                        .map(|piece| {
                            piece.parse().map_err(|err| {
                                Error::InvalidVersionPiece(id.into(), piece.into(), err)
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?
                } else {
                    Vec::new()
                }
            }
            None => Vec::new(),
        };
        Ok(Self { base, version })
    }

    /// Case-folded schema name.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Numeric version pieces. Empty if identifier has no version.
    #[must_use]
    pub fn version(&self) -> &[u64] {
        &self.version
    }
}

impl FromStr for SchemaVersionKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for SchemaVersionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.base)?;
        let mut iter = self.version.iter();
        if let Some(v) = iter.next() {
            write!(f, ".v{v}")?;
        }
        for v in iter {
            write!(f, "_{v}")?;
        }
        Ok(())
    }
}

/// Direction of version sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Latest first.
    Descending,
}

/// Sort identifiers by their schema version key. Sort is stable:
/// identifiers with equal keys keep their relative order.
///
/// # Errors
///
/// Returns error if any of identifiers has malformed version part.
pub fn sort_by_version<S: AsRef<str>>(items: Vec<S>, order: SortOrder) -> Result<Vec<S>, Error> {
    let mut keyed = items
        .into_iter()
        .map(|item| SchemaVersionKey::new(item.as_ref()).map(|key| (key, item)))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by(|(a, _), (b, _)| match order {
        SortOrder::Ascending => a.cmp(b),
        SortOrder::Descending => b.cmp(a),
    });
    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}

/// Compare two identifiers by their schema version keys.
///
/// # Errors
///
/// Returns error if any of identifiers has malformed version part.
pub fn compare(a: &str, b: &str) -> Result<Ordering, Error> {
    Ok(SchemaVersionKey::new(a)?.cmp(&SchemaVersionKey::new(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> SchemaVersionKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_numeric_version_order() {
        assert!(key("Foo.v1_2_0") < key("Foo.v1_10_0"));
        assert!(key("Foo.v1_10_0") < key("Foo.v2_0_0"));
        assert!(key("Foo.v0_2_0") < key("Foo.v0_10_0"));
    }

    #[test]
    fn test_unversioned_sorts_first() {
        assert!(key("Foo") < key("Foo.v1_0_0"));
        assert_eq!(key("Foo").version(), &[] as &[u64]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(key("FOO.V1_0_0"), key("foo.v1_0_0"));
        assert_eq!(
            compare("FOO.V1_0_0", "foo.v1_0_0").unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn test_version_part_without_digits() {
        let k = key("AccountService.json");
        assert_eq!(k.base(), "accountservice");
        assert!(k.version().is_empty());
        assert_eq!(key("Zone_v1.xml").base(), "zone_v1");
    }

    #[test]
    fn test_file_name_suffix_is_ignored() {
        let k = key("Zone.v1_10_0.json");
        assert_eq!(k.version(), &[1, 10, 0]);
        assert_eq!(k.to_string(), "zone.v1_10_0");
    }

    #[test]
    fn test_version_without_v_prefix() {
        assert_eq!(key("Foo.1_2_3").version(), &[1, 2, 3]);
    }

    #[test]
    fn test_invalid_piece() {
        assert!(matches!(
            SchemaVersionKey::new("Foo.v1_x_0"),
            Err(Error::InvalidVersionPiece(_, piece, _)) if piece == "x"
        ));
    }

    #[test]
    fn test_sort_directions() {
        let files = vec![
            "Zone.v1_2_0.json",
            "Zone.json",
            "Zone.v1_10_0.json",
            "Zone.v1_0_0.json",
        ];
        assert_eq!(
            sort_by_version(files.clone(), SortOrder::Descending).unwrap(),
            vec![
                "Zone.v1_10_0.json",
                "Zone.v1_2_0.json",
                "Zone.v1_0_0.json",
                "Zone.json"
            ]
        );
        assert_eq!(
            sort_by_version(files, SortOrder::Ascending).unwrap(),
            vec![
                "Zone.json",
                "Zone.v1_0_0.json",
                "Zone.v1_2_0.json",
                "Zone.v1_10_0.json"
            ]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let names = vec!["b", "A", "a", "B"];
        assert_eq!(
            sort_by_version(names, SortOrder::Ascending).unwrap(),
            vec!["A", "a", "b", "B"]
        );
    }
}
