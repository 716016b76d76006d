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

//! Expansion of subordinate override targets.
//!
//! A subordinate override lists a containment chain of resource
//! types (`[Manager, EthernetInterfaceCollection]`). The override
//! applies to several chains built from prefixes of the target list;
//! [`expand`] produces them in the order the registry header lists
//! them.

/// Expand target chain into the chains that inherit the override.
///
/// Output starts with `[t0]`. Then, for every position `i`, the
/// working prefix `targets[..=i]` (without the last target once the
/// prefix reaches it, unless it is the first one) is extended with
/// each target after `i`.
///
/// Empty input produces no chains.
#[must_use]
pub fn expand<T: Clone>(targets: &[T]) -> Vec<Vec<T>> {
    let first = match targets.first() {
        Some(first) => first,
        None => return Vec::new(),
    };
    let last = targets.len() - 1;
    let mut chains = vec![vec![first.clone()]];
    for i in 0..targets.len() {
        let prefix = targets[..=i]
            .iter()
            .enumerate()
            .filter(|(j, _)| !(*j > 0 && *j == last))
            .map(|(_, t)| t.clone())
            .collect::<Vec<_>>();
        chains.extend(targets[i + 1..].iter().map(|tail| {
            let mut chain = prefix.clone();
            chain.push(tail.clone());
            chain
        }));
    }
    chains
}

/// Number of chains [`expand`] produces for `n` targets.
#[must_use]
pub const fn chain_count(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        1 + n * (n - 1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_three_targets() {
        assert_eq!(
            expand(&["A", "B", "C"]),
            vec![
                vec!["A"],
                vec!["A", "B"],
                vec!["A", "C"],
                vec!["A", "B", "C"],
            ]
        );
    }

    #[test]
    fn test_expand_single_target() {
        assert_eq!(expand(&["Manager"]), vec![vec!["Manager"]]);
    }

    #[test]
    fn test_expand_two_targets() {
        assert_eq!(
            expand(&["Manager", "EthernetInterfaceCollection"]),
            vec![
                vec!["Manager"],
                vec!["Manager", "EthernetInterfaceCollection"],
            ]
        );
    }

    #[test]
    fn test_expand_four_targets_drops_last_from_prefix() {
        assert_eq!(
            expand(&["A", "B", "C", "D"]),
            vec![
                vec!["A"],
                vec!["A", "B"],
                vec!["A", "C"],
                vec!["A", "D"],
                vec!["A", "B", "C"],
                vec!["A", "B", "D"],
                vec!["A", "B", "C", "D"],
            ]
        );
    }

    #[test]
    fn test_expand_empty() {
        assert!(expand::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_chain_count_matches_expand() {
        let targets = ["A", "B", "C", "D", "E"];
        for n in 0..=targets.len() {
            assert_eq!(expand(&targets[..n]).len(), chain_count(n));
        }
    }
}
