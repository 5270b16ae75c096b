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

//! Extraction of payloads back into plain Rust types.
//!
//! Extraction is strict about tags: an `Int` never reads as a `bool` or `f64`. The one leniency is
//! that text is parsed into numbers and booleans, since configuration values commonly arrive as
//! strings.

use crate::{
    Error,
    ErrorCode::{Conversion, TypeMismatch},
    Var, Variant,
};
use std::collections::BTreeMap;
use tracing::trace;

pub trait FromVar: Sized {
    fn from_var(var: &Var) -> Result<Self, Error>;
}

fn mismatch(var: &Var, wanted: &str) -> Error {
    TypeMismatch.with_msg(|| {
        format!(
            "expected {wanted}, found {}",
            var.type_code().to_literal()
        )
    })
}

impl FromVar for Var {
    fn from_var(var: &Var) -> Result<Self, Error> {
        Ok(var.clone())
    }
}

impl FromVar for String {
    fn from_var(var: &Var) -> Result<Self, Error> {
        match var.variant() {
            Variant::Str(s) => Ok(s.as_str().to_string()),
            _ => Err(mismatch(var, "STR")),
        }
    }
}

impl FromVar for i64 {
    fn from_var(var: &Var) -> Result<Self, Error> {
        match var.variant() {
            Variant::Int(i) => Ok(*i),
            Variant::Str(s) => {
                trace!(value = s.as_str(), "parsing integer from string payload");
                s.as_str()
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| {
                        Conversion.with_msg(|| format!("{:?} is not an integer: {e}", s.as_str()))
                    })
            }
            _ => Err(mismatch(var, "INT")),
        }
    }
}

macro_rules! narrowed_int_from_var {
    ($($t:ty),*) => {
        $(
            impl FromVar for $t {
                fn from_var(var: &Var) -> Result<Self, Error> {
                    let i = i64::from_var(var)?;
                    <$t>::try_from(i).map_err(|_| {
                        Conversion.with_msg(|| {
                            format!("{i} out of range for {}", stringify!($t))
                        })
                    })
                }
            }
        )*
    };
}

narrowed_int_from_var!(i32, u32, u64, usize);

impl FromVar for f64 {
    fn from_var(var: &Var) -> Result<Self, Error> {
        match var.variant() {
            Variant::Float(f) => Ok(*f),
            Variant::Str(s) => {
                trace!(value = s.as_str(), "parsing float from string payload");
                s.as_str()
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| {
                        Conversion.with_msg(|| format!("{:?} is not a float: {e}", s.as_str()))
                    })
            }
            _ => Err(mismatch(var, "FLOAT")),
        }
    }
}

impl FromVar for f32 {
    fn from_var(var: &Var) -> Result<Self, Error> {
        f64::from_var(var).map(|f| f as f32)
    }
}

impl FromVar for bool {
    fn from_var(var: &Var) -> Result<Self, Error> {
        match var.variant() {
            Variant::Bool(b) => Ok(*b),
            Variant::Str(s) => {
                trace!(value = s.as_str(), "parsing boolean from string payload");
                match s.as_str().trim() {
                    "true" | "TRUE" | "True" | "YES" | "yes" => Ok(true),
                    "false" | "FALSE" | "False" | "NO" | "no" => Ok(false),
                    other => Err(Conversion.with_msg(|| format!("{other:?} is not a boolean"))),
                }
            }
            _ => Err(mismatch(var, "BOOL")),
        }
    }
}

impl<T: FromVar> FromVar for Vec<T> {
    fn from_var(var: &Var) -> Result<Self, Error> {
        match var.variant() {
            Variant::List(l) => l.iter().map(|v| T::from_var(&v)).collect(),
            Variant::Tuple(t) => t.iter().map(|v| T::from_var(&v)).collect(),
            _ => Err(mismatch(var, "LIST")),
        }
    }
}

impl<T: FromVar> FromVar for BTreeMap<String, T> {
    fn from_var(var: &Var) -> Result<Self, Error> {
        let Variant::Map(m) = var.variant() else {
            return Err(mismatch(var, "MAP"));
        };
        m.iter()
            .map(|(k, v)| Ok((String::from_var(&k)?, T::from_var(&v)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorCode, v_bool, v_float, v_int, v_list, v_map, v_str, v_tuple};
    use test_case::test_case;

    #[test]
    fn test_strict_tags() {
        assert_eq!(bool::from_var(&v_int(0)).unwrap_err(), ErrorCode::TypeMismatch);
        assert_eq!(i64::from_var(&v_bool(false)).unwrap_err(), ErrorCode::TypeMismatch);
        assert_eq!(f64::from_var(&v_int(1)).unwrap_err(), ErrorCode::TypeMismatch);
        assert_eq!(String::from_var(&v_int(1)).unwrap_err(), ErrorCode::TypeMismatch);
    }

    #[test_case("200" => 200; "plain")]
    #[test_case(" 7 " => 7; "padded")]
    fn test_u32_from_string(s: &str) -> u32 {
        u32::from_var(&v_str(s)).unwrap()
    }

    #[test_case("YES" => true)]
    #[test_case("true" => true)]
    #[test_case("NO" => false)]
    #[test_case("False" => false)]
    fn test_bool_from_string(s: &str) -> bool {
        bool::from_var(&v_str(s)).unwrap()
    }

    #[test]
    fn test_conversion_failures() {
        assert_eq!(u32::from_var(&v_int(-1)).unwrap_err(), ErrorCode::Conversion);
        assert_eq!(i32::from_var(&v_str("x")).unwrap_err(), ErrorCode::Conversion);
        assert_eq!(bool::from_var(&v_str("maybe")).unwrap_err(), ErrorCode::Conversion);
    }

    #[test]
    fn test_collections() {
        let l = v_list(&[v_float(21.0), v_float(37.0)]);
        assert_eq!(Vec::<f64>::from_var(&l).unwrap(), vec![21.0, 37.0]);

        let t = v_tuple(&[v_int(2), v_int(1)]);
        assert_eq!(Vec::<i64>::from_var(&t).unwrap(), vec![2, 1]);

        let m = v_map(&[(v_str("key"), v_str("value"))]);
        let m = BTreeMap::<String, String>::from_var(&m).unwrap();
        assert_eq!(m.get("key").map(String::as_str), Some("value"));

        let m = v_map(&[(v_int(1), v_int(2))]);
        assert!(BTreeMap::<String, i64>::from_var(&m).is_err());
    }
}
