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

//! Type-preserving boxed values.
//!
//! A [`Var`] holds exactly one payload of a closed set of shapes (text, integer, float, boolean,
//! list, tuple, map or an opaque user object) and hands it back exactly as it was given. Sequence
//! and mapping payloads additionally support length, indexing and keyed lookup.

mod convert;
mod error;
pub mod json;
mod list;
mod map;
mod object;
pub mod properties;
mod string;
mod tuple;
#[allow(clippy::module_inception)]
mod var;
mod variant;

pub use convert::FromVar;
pub use error::{Error, ErrorCode};
pub use list::List;
pub use map::Map;
pub use object::Object;
pub use properties::{Property, PropertyMap};
pub use string::Str;
use strum::FromRepr;
pub use tuple::Tuple;
pub use var::{
    Var, v_bool, v_empty_list, v_empty_map, v_empty_str, v_float, v_int, v_list, v_list_iter,
    v_map, v_map_iter, v_object, v_str, v_string, v_tuple,
};
pub use variant::Variant;

/// Integer encoding of the payload shapes, as reported by `Var::type_code`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, FromRepr)]
pub enum VarType {
    Str = 0,
    Int = 1,
    Float = 2,
    Bool = 3,
    List = 4,
    Tuple = 5,
    Map = 6,
    Object = 7,
}

impl VarType {
    pub fn to_literal(&self) -> &str {
        match self {
            VarType::Str => "STR",
            VarType::Int => "INT",
            VarType::Float => "FLOAT",
            VarType::Bool => "BOOL",
            VarType::List => "LIST",
            VarType::Tuple => "TUPLE",
            VarType::Map => "MAP",
            VarType::Object => "OBJECT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "STR" | "STRING" => Some(VarType::Str),
            "INT" | "INTEGER" => Some(VarType::Int),
            "FLOAT" => Some(VarType::Float),
            "BOOL" => Some(VarType::Bool),
            "LIST" => Some(VarType::List),
            "TUPLE" => Some(VarType::Tuple),
            "MAP" | "DICT" => Some(VarType::Map),
            "OBJECT" | "OBJ" => Some(VarType::Object),
            _ => None,
        }
    }
}

pub enum TypeClass<'a> {
    Sequence(&'a dyn Sequence),
    Associative(&'a dyn Associative),
    Scalar,
}

impl TypeClass<'_> {
    #[inline(always)]
    fn is_sequence(&self) -> bool {
        matches!(self, TypeClass::Sequence(_))
    }

    #[inline(always)]
    fn is_associative(&self) -> bool {
        matches!(self, TypeClass::Associative(_))
    }

    #[inline(always)]
    fn is_scalar(&self) -> bool {
        matches!(self, TypeClass::Scalar)
    }
}

/// Ordered payloads: strings, lists and tuples. Indices here are already resolved to
/// non-negative offsets.
pub trait Sequence {
    /// Return true if the sequence is empty.
    fn is_empty(&self) -> bool;
    /// Return the length of the sequence.
    fn len(&self) -> usize;
    /// Check if the sequence contains the element, returning its offset if it does.
    fn index_in(&self, value: &Var) -> Option<usize>;
    /// Check if the sequence contains the element.
    fn contains(&self, value: &Var) -> bool {
        self.index_in(value).is_some()
    }
    /// Get the `index`nth element of the sequence.
    fn index(&self, index: usize) -> Result<Var, Error>;
    /// Return a copy of the sequence with the `index`nth element replaced.
    fn index_set(&self, index: usize, value: &Var) -> Result<Var, Error>;
    /// Return a copy of the sequence with `value` added to the end.
    fn push(&self, value: &Var) -> Result<Var, Error>;
}

/// Keyed payloads.
pub trait Associative {
    /// Return true if the associative container is empty.
    fn is_empty(&self) -> bool;
    /// Return the number of key-value pairs in the associative container.
    fn len(&self) -> usize;
    /// Get the value associated with the given key.
    fn get(&self, key: &Var) -> Result<Var, Error>;
    /// Return a copy of the container with `key` bound to `value`.
    fn set(&self, key: &Var, value: &Var) -> Result<Var, Error>;
    /// Return the keys in the associative container.
    fn keys(&self) -> Vec<Var>;
    /// Return the values in the associative container.
    fn values(&self) -> Vec<Var>;
    /// Check if the associative container contains the key.
    fn contains_key(&self, key: &Var) -> bool;
    /// Return this container with the key/value pair removed, and the value that was removed, if
    /// any.
    fn remove(&self, key: &Var) -> (Var, Option<Var>);
}

/// Resolve a possibly negative index against a sequence of length `len`: `-1` is the last
/// element. Returns `None` if the index falls outside the sequence.
pub(crate) fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { len + index } else { index };
    if resolved < 0 || resolved >= len {
        return None;
    }
    usize::try_from(resolved).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 3 => Some(0); "first")]
    #[test_case(2, 3 => Some(2); "last")]
    #[test_case(3, 3 => None; "past end")]
    #[test_case(-1, 3 => Some(2); "negative last")]
    #[test_case(-3, 3 => Some(0); "negative first")]
    #[test_case(-4, 3 => None; "negative past start")]
    #[test_case(0, 0 => None; "empty")]
    fn test_resolve_index(index: i64, len: usize) -> Option<usize> {
        resolve_index(index, len)
    }

    #[test]
    fn test_var_type_literals() {
        for code in 0..=7u8 {
            let t = VarType::from_repr(code).unwrap();
            assert_eq!(VarType::parse(t.to_literal()), Some(t));
        }
        assert_eq!(VarType::parse("dict"), Some(VarType::Map));
        assert_eq!(VarType::parse("nope"), None);
        assert_eq!(VarType::from_repr(8), None);
    }
}
