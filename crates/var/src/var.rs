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

use crate::ErrorCode::{Range, TypeMismatch};
use crate::list::List;
use crate::map::Map;
use crate::object::Object;
use crate::string::Str;
use crate::tuple::Tuple;
use crate::variant::Variant;
use crate::{Associative, Error, FromVar, Sequence, TypeClass, VarType, resolve_index};
use std::any::Any;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

/// A box holding exactly one payload. The payload's tag is fixed at construction; "changing" a
/// `Var` means building a new one.
#[derive(Clone)]
pub struct Var(Variant);

impl Debug for Var {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.variant())
    }
}

impl Var {
    pub fn from_variant(variant: Variant) -> Self {
        Var(variant)
    }

    pub fn mk_integer(i: i64) -> Self {
        Var(Variant::Int(i))
    }

    pub fn mk_str(s: &str) -> Self {
        Var(Variant::Str(s.into()))
    }

    pub fn mk_string(s: String) -> Self {
        Var(Variant::Str(s.into()))
    }

    pub fn mk_float(f: f64) -> Self {
        Var(Variant::Float(f))
    }

    pub fn mk_bool(b: bool) -> Self {
        Var(Variant::Bool(b))
    }

    pub fn mk_list(values: &[Var]) -> Self {
        List::build(values)
    }

    pub fn mk_list_iter<IT: IntoIterator<Item = Var>>(values: IT) -> Self {
        Var::from_iter(values)
    }

    pub fn mk_tuple(values: &[Var]) -> Self {
        Tuple::build(values)
    }

    pub fn mk_map(pairs: &[(Var, Var)]) -> Self {
        Map::build(pairs.iter())
    }

    pub fn mk_map_iter<'a, I: Iterator<Item = &'a (Var, Var)>>(pairs: I) -> Self {
        Map::build(pairs)
    }

    /// Box an arbitrary value. It is kept behind a shared handle, never copied.
    pub fn mk_object<T: Any + Send + Sync>(value: T) -> Self {
        Var(Variant::Object(Object::new(value)))
    }

    /// The payload, exactly as it was given.
    pub fn variant(&self) -> &Variant {
        &self.0
    }

    pub fn into_variant(self) -> Variant {
        self.0
    }

    pub fn type_code(&self) -> VarType {
        match self.variant() {
            Variant::Str(_) => VarType::Str,
            Variant::Int(_) => VarType::Int,
            Variant::Float(_) => VarType::Float,
            Variant::Bool(_) => VarType::Bool,
            Variant::List(_) => VarType::List,
            Variant::Tuple(_) => VarType::Tuple,
            Variant::Map(_) => VarType::Map,
            Variant::Object(_) => VarType::Object,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.variant() {
            Variant::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self.variant() {
            Variant::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.variant() {
            Variant::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.variant() {
            Variant::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self.variant() {
            Variant::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&Tuple> {
        match self.variant() {
            Variant::Tuple(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self.variant() {
            Variant::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self.variant() {
            Variant::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Borrow the boxed user value, if this is an object payload holding a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_object()?.downcast_ref::<T>()
    }

    /// Extract the payload as a plain Rust value.
    pub fn extract<T: FromVar>(&self) -> Result<T, Error> {
        T::from_var(self)
    }

    /// Index into a sequence, or look up a key in a map.
    /// Sequences take an integer index, zero based, where negative indices count back from the
    /// end. Anything else is Err(TypeMismatch); an index outside the sequence is Err(Range), and a
    /// missing map key Err(KeyNotFound).
    pub fn index(&self, index: &Var) -> Result<Self, Error> {
        match self.type_class() {
            TypeClass::Sequence(s) => {
                let idx = self.resolve(s, index)?;
                s.index(idx)
            }
            TypeClass::Associative(a) => a.get(index),
            TypeClass::Scalar => Err(self.not_indexable()),
        }
    }

    /// As `index`, but `None` instead of an error.
    pub fn get(&self, key: &Var) -> Option<Self> {
        self.index(key).ok()
    }

    /// Return a copy with the element at `index` (sequences) or `key` (maps) replaced.
    pub fn index_set(&self, index: &Var, value: &Var) -> Result<Self, Error> {
        match self.type_class() {
            TypeClass::Sequence(s) => {
                let idx = self.resolve(s, index)?;
                s.index_set(idx, value)
            }
            TypeClass::Associative(a) => a.set(index, value),
            TypeClass::Scalar => Err(self.not_indexable()),
        }
    }

    /// Return a copy of a map with `key` bound to `value`.
    pub fn set(&self, key: &Var, value: &Var) -> Result<Self, Error> {
        match self.type_class() {
            TypeClass::Associative(a) => a.set(key, value),
            _ => self.index_set(key, value),
        }
    }

    /// Return a copy of a list (or string) with `value` added at the end.
    pub fn push(&self, value: &Var) -> Result<Self, Error> {
        match self.type_class() {
            TypeClass::Sequence(s) => s.push(value),
            _ => Err(TypeMismatch.with_msg(|| {
                format!("cannot push onto {}", self.type_code().to_literal())
            })),
        }
    }

    /// Return a copy of a map without `key`, along with the value that was removed, if any.
    pub fn remove(&self, key: &Var) -> Result<(Self, Option<Self>), Error> {
        match self.type_class() {
            TypeClass::Associative(a) => Ok(a.remove(key)),
            _ => Err(TypeMismatch.with_msg(|| {
                format!("cannot remove keys from {}", self.type_code().to_literal())
            })),
        }
    }

    /// Element membership for sequences, key membership for maps.
    pub fn contains(&self, value: &Var) -> Result<bool, Error> {
        match self.type_class() {
            TypeClass::Sequence(s) => Ok(s.contains(value)),
            TypeClass::Associative(a) => Ok(a.contains_key(value)),
            TypeClass::Scalar => Err(self.not_indexable()),
        }
    }

    /// Keys of a map, in order.
    pub fn keys(&self) -> Result<Vec<Var>, Error> {
        match self.type_class() {
            TypeClass::Associative(a) => Ok(a.keys()),
            _ => Err(TypeMismatch.with_msg(|| {
                format!("{} has no keys", self.type_code().to_literal())
            })),
        }
    }

    /// Values of a map in key order, or the elements of a sequence.
    pub fn values(&self) -> Result<Vec<Var>, Error> {
        match self.variant() {
            Variant::Map(m) => Ok(Associative::values(m)),
            Variant::List(l) => Ok(l.iter().collect()),
            Variant::Tuple(t) => Ok(t.iter().collect()),
            Variant::Str(s) => (0..Sequence::len(s)).map(|i| s.index(i)).collect(),
            _ => Err(self.not_indexable()),
        }
    }

    pub fn len(&self) -> Result<usize, Error> {
        match self.type_class() {
            TypeClass::Sequence(s) => Ok(s.len()),
            TypeClass::Associative(a) => Ok(a.len()),
            TypeClass::Scalar => Err(TypeMismatch.with_msg(|| {
                format!("{} has no length", self.type_code().to_literal())
            })),
        }
    }

    pub fn is_empty(&self) -> Result<bool, Error> {
        match self.type_class() {
            TypeClass::Sequence(s) => Ok(s.is_empty()),
            TypeClass::Associative(a) => Ok(a.is_empty()),
            TypeClass::Scalar => Err(TypeMismatch.with_msg(|| {
                format!("{} has no length", self.type_code().to_literal())
            })),
        }
    }

    pub fn is_sequence(&self) -> bool {
        self.type_class().is_sequence()
    }

    pub fn is_associative(&self) -> bool {
        self.type_class().is_associative()
    }

    pub fn is_scalar(&self) -> bool {
        self.type_class().is_scalar()
    }

    pub fn is_string(&self) -> bool {
        matches!(self.variant(), Variant::Str(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.variant(), Variant::Object(_))
    }

    pub fn type_class(&self) -> TypeClass<'_> {
        match self.variant() {
            Variant::Str(s) => TypeClass::Sequence(s),
            Variant::List(l) => TypeClass::Sequence(l),
            Variant::Tuple(t) => TypeClass::Sequence(t),
            Variant::Map(m) => TypeClass::Associative(m),
            _ => TypeClass::Scalar,
        }
    }

    fn resolve(&self, s: &dyn Sequence, index: &Var) -> Result<usize, Error> {
        let Variant::Int(i) = index.variant() else {
            return Err(TypeMismatch.with_msg(|| {
                format!(
                    "{} index must be INT, was {}",
                    self.type_code().to_literal(),
                    index.type_code().to_literal()
                )
            }));
        };
        resolve_index(*i, s.len()).ok_or_else(|| {
            Range.with_msg(|| {
                format!(
                    "index {i} out of range for {} of length {}",
                    self.type_code().to_literal(),
                    s.len()
                )
            })
        })
    }

    fn not_indexable(&self) -> Error {
        TypeMismatch.with_msg(|| {
            format!("{} is not a sequence or map", self.type_code().to_literal())
        })
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn join<I: Iterator<Item = Var>>(f: &mut Formatter<'_>, items: I) -> std::fmt::Result {
            for (i, item) in items.enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self.variant() {
            Variant::Str(s) => write!(f, "{:?}", s.as_str()),
            Variant::Int(i) => write!(f, "{i}"),
            Variant::Float(fl) => write!(f, "{fl:?}"),
            Variant::Bool(b) => write!(f, "{b}"),
            Variant::List(l) => {
                write!(f, "[")?;
                join(f, l.iter())?;
                write!(f, "]")
            }
            Variant::Tuple(t) => {
                write!(f, "(")?;
                join(f, t.iter())?;
                if t.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Variant::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Variant::Object(o) => write!(f, "<object {}>", o.type_name()),
        }
    }
}

pub fn v_int(i: i64) -> Var {
    Var::mk_integer(i)
}

pub fn v_bool(b: bool) -> Var {
    Var::mk_bool(b)
}

pub fn v_str(s: &str) -> Var {
    Var::mk_str(s)
}

pub fn v_string(s: String) -> Var {
    Var::mk_string(s)
}

pub fn v_float(f: f64) -> Var {
    Var::mk_float(f)
}

pub fn v_list(values: &[Var]) -> Var {
    Var::mk_list(values)
}

pub fn v_list_iter<IT: IntoIterator<Item = Var>>(values: IT) -> Var {
    Var::mk_list_iter(values)
}

pub fn v_tuple(values: &[Var]) -> Var {
    Var::mk_tuple(values)
}

pub fn v_map(pairs: &[(Var, Var)]) -> Var {
    Var::mk_map(pairs)
}

pub fn v_map_iter<'a, I: Iterator<Item = &'a (Var, Var)>>(pairs: I) -> Var {
    Var::mk_map_iter(pairs)
}

pub fn v_object<T: Any + Send + Sync>(value: T) -> Var {
    Var::mk_object(value)
}

pub fn v_empty_list() -> Var {
    v_list(&[])
}

pub fn v_empty_str() -> Var {
    v_str("")
}

pub fn v_empty_map() -> Var {
    v_map(&[])
}

impl From<i64> for Var {
    fn from(i: i64) -> Self {
        Var::mk_integer(i)
    }
}

impl From<i32> for Var {
    fn from(i: i32) -> Self {
        Var::mk_integer(i64::from(i))
    }
}

impl From<u32> for Var {
    fn from(i: u32) -> Self {
        Var::mk_integer(i64::from(i))
    }
}

impl From<f64> for Var {
    fn from(f: f64) -> Self {
        Var::mk_float(f)
    }
}

impl From<f32> for Var {
    fn from(f: f32) -> Self {
        Var::mk_float(f64::from(f))
    }
}

impl From<bool> for Var {
    fn from(b: bool) -> Self {
        Var::mk_bool(b)
    }
}

impl From<&str> for Var {
    fn from(s: &str) -> Self {
        Var::mk_str(s)
    }
}

impl From<String> for Var {
    fn from(s: String) -> Self {
        Var::mk_string(s)
    }
}

impl From<Str> for Var {
    fn from(s: Str) -> Self {
        Var(Variant::Str(s))
    }
}

impl From<Object> for Var {
    fn from(o: Object) -> Self {
        Var(Variant::Object(o))
    }
}

impl<T: Into<Var>> From<Vec<T>> for Var {
    fn from(values: Vec<T>) -> Self {
        Var::mk_list_iter(values.into_iter().map(Into::into))
    }
}

impl<K: Into<Var>, V: Into<Var>> From<BTreeMap<K, V>> for Var {
    fn from(m: BTreeMap<K, V>) -> Self {
        let pairs: Vec<(Var, Var)> = m.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Var::mk_map(&pairs)
    }
}

impl<K: Into<Var>, V: Into<Var>, S> From<HashMap<K, V, S>> for Var {
    fn from(m: HashMap<K, V, S>) -> Self {
        let pairs: Vec<(Var, Var)> = m.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Var::mk_map(&pairs)
    }
}

macro_rules! tuple_into_var {
    ($($name:ident),+) => {
        impl<$($name: Into<Var>),+> From<($($name,)+)> for Var {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                Var::mk_tuple(&[$($name.into()),+])
            }
        }
    };
}

tuple_into_var!(A);
tuple_into_var!(A, B);
tuple_into_var!(A, B, C);
tuple_into_var!(A, B, C, D);

impl PartialEq<Self> for Var {
    fn eq(&self, other: &Self) -> bool {
        self.variant() == other.variant()
    }
}

impl Eq for Var {}

impl PartialEq<str> for Var {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Var {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<String> for Var {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == Some(other.as_str())
    }
}

macro_rules! int_eq {
    ($($t:ty),*) => {
        $(
            impl PartialEq<$t> for Var {
                fn eq(&self, other: &$t) -> bool {
                    match (self.variant(), i64::try_from(*other)) {
                        (Variant::Int(i), Ok(o)) => *i == o,
                        _ => false,
                    }
                }
            }
        )*
    };
}

int_eq!(i32, i64, u32, u64, usize);

impl PartialEq<f64> for Var {
    fn eq(&self, other: &f64) -> bool {
        self.as_float() == Some(*other)
    }
}

impl PartialEq<bool> for Var {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl Ord for Var {
    fn cmp(&self, other: &Self) -> Ordering {
        self.variant().cmp(other.variant())
    }
}

impl PartialOrd<Self> for Var {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Var {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.variant().hash(state)
    }
}
