// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use crate::{Error, ErrorCode::Range, ErrorCode::TypeMismatch, Sequence, Var, Variant};
use arcstr::ArcStr;
use std::fmt::{Debug, Display, Formatter};

/// Immutable, cheaply cloned text. As a sequence it is indexed by `char`, not by byte.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Str(ArcStr);

impl Str {
    pub fn mk_str(s: &str) -> Self {
        Str(ArcStr::from(s))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn str_append(&self, other: &Self) -> Var {
        let mut s = String::with_capacity(self.0.len() + other.0.len());
        s.push_str(self.as_str());
        s.push_str(other.as_str());
        Var::mk_string(s)
    }
}

impl Debug for Str {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl Display for Str {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Str {
    fn from(s: &str) -> Self {
        Str(ArcStr::from(s))
    }
}

impl From<String> for Str {
    fn from(s: String) -> Self {
        Str(ArcStr::from(s))
    }
}

impl From<ArcStr> for Str {
    fn from(s: ArcStr) -> Self {
        Str(s)
    }
}

impl Sequence for Str {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn len(&self) -> usize {
        self.0.chars().count()
    }

    fn index_in(&self, value: &Var) -> Option<usize> {
        let Variant::Str(needle) = value.variant() else {
            return None;
        };
        let byte_offset = self.as_str().find(needle.as_str())?;
        Some(self.as_str()[..byte_offset].chars().count())
    }

    fn index(&self, index: usize) -> Result<Var, Error> {
        let Some(c) = self.0.chars().nth(index) else {
            return Err(Range.with_msg(|| {
                format!(
                    "attempt to index {index} in string of length {}",
                    self.len()
                )
            }));
        };
        Ok(Var::mk_string(c.to_string()))
    }

    fn index_set(&self, index: usize, value: &Var) -> Result<Var, Error> {
        let Variant::Str(value) = value.variant() else {
            return Err(TypeMismatch.msg("attempt to set string element to non-string"));
        };
        let mut chars = value.as_str().chars();
        let (Some(replacement), None) = (chars.next(), chars.next()) else {
            return Err(TypeMismatch.msg("attempt to set string element to other than one char"));
        };
        if index >= self.len() {
            return Err(Range.with_msg(|| {
                format!(
                    "attempt to set index {index} in string of length {}",
                    self.len()
                )
            }));
        }
        let s: String = self
            .0
            .chars()
            .enumerate()
            .map(|(i, c)| if i == index { replacement } else { c })
            .collect();
        Ok(Var::mk_string(s))
    }

    fn push(&self, value: &Var) -> Result<Var, Error> {
        let Variant::Str(value) = value.variant() else {
            return Err(TypeMismatch.msg("attempt to append non-string to string"));
        };
        Ok(self.str_append(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v_str;

    #[test]
    fn test_str_len_counts_chars() {
        let s = Str::mk_str("żółw");
        assert_eq!(s.len(), 4);
        assert!(!s.is_empty());
        assert!(Str::mk_str("").is_empty());
    }

    #[test]
    fn test_str_index() {
        let s = Str::mk_str("żółw");
        assert_eq!(s.index(1).unwrap(), "ó");
        assert_eq!(s.index(4).unwrap_err(), Range);
    }

    #[test]
    fn test_str_index_set() {
        let s = Str::mk_str("test");
        assert_eq!(s.index_set(0, &v_str("b")).unwrap(), "best");
        assert_eq!(s.index_set(0, &v_str("be")).unwrap_err(), TypeMismatch);
        assert_eq!(s.index_set(9, &v_str("b")).unwrap_err(), Range);
    }

    #[test]
    fn test_str_index_in() {
        let s = Str::mk_str("test_string");
        assert_eq!(s.index_in(&v_str("string")), Some(5));
        assert!(s.contains(&v_str("_")));
        assert_eq!(s.index_in(&v_str("nope")), None);
        assert_eq!(s.index_in(&Var::mk_integer(1)), None);
    }

    #[test]
    fn test_str_push() {
        let s = Str::mk_str("test");
        assert_eq!(s.push(&v_str("_string")).unwrap(), "test_string");
        assert_eq!(s.push(&Var::mk_integer(1)).unwrap_err(), TypeMismatch);
    }
}
