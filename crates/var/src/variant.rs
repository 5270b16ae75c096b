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

use crate::list::List;
use crate::map::Map;
use crate::object::Object;
use crate::string::Str;
use crate::tuple::Tuple;
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};

/// Our series of payload shapes.
#[derive(Clone)]
pub enum Variant {
    Str(Str),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(List),
    Tuple(Tuple),
    Map(Map),
    Object(Object),
}

impl Hash for Variant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Variant::Str(s) => s.hash(state),
            Variant::Int(i) => i.hash(state),
            Variant::Float(f) => f.to_bits().hash(state),
            Variant::Bool(b) => b.hash(state),
            Variant::List(l) => l.hash(state),
            Variant::Tuple(t) => t.hash(state),
            Variant::Map(m) => m.hash(state),
            Variant::Object(o) => o.hash(state),
        }
    }
}

impl Ord for Variant {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Variant::Bool(l), Variant::Bool(r)) => l.cmp(r),
            (Variant::Int(l), Variant::Int(r)) => l.cmp(r),
            (Variant::Float(l), Variant::Float(r)) => l.total_cmp(r),
            (Variant::Str(l), Variant::Str(r)) => l.cmp(r),
            (Variant::List(l), Variant::List(r)) => l.cmp(r),
            (Variant::Tuple(l), Variant::Tuple(r)) => l.cmp(r),
            (Variant::Map(l), Variant::Map(r)) => l.cmp(r),
            (Variant::Object(l), Variant::Object(r)) => l.cmp(r),

            (Variant::Bool(_), _) => Ordering::Less,
            (_, Variant::Bool(_)) => Ordering::Greater,
            (Variant::Int(_), _) => Ordering::Less,
            (_, Variant::Int(_)) => Ordering::Greater,
            (Variant::Float(_), _) => Ordering::Less,
            (_, Variant::Float(_)) => Ordering::Greater,
            (Variant::Str(_), _) => Ordering::Less,
            (_, Variant::Str(_)) => Ordering::Greater,
            (Variant::List(_), _) => Ordering::Less,
            (_, Variant::List(_)) => Ordering::Greater,
            (Variant::Tuple(_), _) => Ordering::Less,
            (_, Variant::Tuple(_)) => Ordering::Greater,
            (Variant::Map(_), _) => Ordering::Less,
            (_, Variant::Map(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Variant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Debug for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Str(s) => write!(f, "String({:?})", s.as_str()),
            Variant::Int(i) => write!(f, "Integer({i})"),
            Variant::Float(fl) => write!(f, "Float({fl})"),
            Variant::Bool(b) => write!(f, "Bool({b})"),
            Variant::List(l) => {
                let i: Vec<_> = l.iter().collect();
                write!(f, "List([size = {}, items = {:?}])", l.len(), i)
            }
            Variant::Tuple(t) => {
                let i: Vec<_> = t.iter().collect();
                write!(f, "Tuple([size = {}, items = {:?}])", t.len(), i)
            }
            Variant::Map(m) => {
                let i: Vec<_> = m.iter().collect();
                write!(f, "Map([size = {}, items = {:?}])", m.len(), i)
            }
            Variant::Object(o) => write!(f, "Object({})", o.type_name()),
        }
    }
}

impl PartialEq<Self> for Variant {
    fn eq(&self, other: &Self) -> bool {
        // If the types are different, they're not equal. In particular Bool(false) is not Int(0).
        // Floats compare by total order so equality agrees with `Ord` and `Hash`: NaN equals
        // itself and -0.0 differs from 0.0.
        match (self, other) {
            (Variant::Str(s), Variant::Str(o)) => s == o,
            (Variant::Int(s), Variant::Int(o)) => s == o,
            (Variant::Float(s), Variant::Float(o)) => s.total_cmp(o) == Ordering::Equal,
            (Variant::Bool(s), Variant::Bool(o)) => s == o,
            (Variant::List(s), Variant::List(o)) => s == o,
            (Variant::Tuple(s), Variant::Tuple(o)) => s == o,
            (Variant::Map(s), Variant::Map(o)) => s == o,
            (Variant::Object(s), Variant::Object(o)) => s == o,
            _ => false,
        }
    }
}

impl Eq for Variant {}
