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

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fmt::Write as _;

/// C++ string literal.
///
/// Example of representation: `"Indicates that \"%1\" is invalid."`
#[derive(Clone, Copy)]
pub struct CppStr<'a>(pub &'a str);

impl Display for CppStr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_char('"')?;
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                c => f.write_char(c)?,
            }
        }
        f.write_char('"')
    }
}

/// Identifier with first character in lower case (`resourceCreated`).
pub struct LowerFirst<'a>(pub &'a str);

impl Display for LowerFirst<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut chars = self.0.chars();
        if let Some(first) = chars.next() {
            for c in first.to_lowercase() {
                f.write_char(c)?;
            }
        }
        f.write_str(chars.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpp_str_escapes() {
        assert_eq!(CppStr("plain").to_string(), r#""plain""#);
        assert_eq!(
            CppStr(r#"The value "%1" is\bad"#).to_string(),
            r#""The value \"%1\" is\\bad""#
        );
        assert_eq!(CppStr("a\nb").to_string(), r#""a\nb""#);
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(LowerFirst("ResourceCreated").to_string(), "resourceCreated");
        assert_eq!(LowerFirst("").to_string(), "");
        assert_eq!(LowerFirst("A").to_string(), "a");
    }
}
