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

use crate::{
    Error,
    ErrorCode::{Range, TypeMismatch},
    Sequence, Var, Variant,
};
use std::fmt::{Debug, Formatter};
use std::ops::Index;
use std::sync::Arc;

/// A fixed-size sequence. Its arity is set at construction and never changes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Tuple(Arc<[Var]>);

impl Tuple {
    pub fn build(values: &[Var]) -> Var {
        Var::from_variant(Variant::Tuple(Self::mk_tuple(values)))
    }

    pub fn mk_tuple(values: &[Var]) -> Tuple {
        Tuple(Arc::from(values))
    }

    pub fn iter(&self) -> impl Iterator<Item = Var> + '_ {
        self.0.iter().cloned()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Var] {
        &self.0
    }
}

impl Debug for Tuple {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", &self.0[..])
    }
}

impl Sequence for Tuple {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn index_in(&self, value: &Var) -> Option<usize> {
        self.0.iter().position(|v| v == value)
    }

    fn index(&self, index: usize) -> Result<Var, Error> {
        let Some(v) = self.0.get(index) else {
            return Err(Range.with_msg(|| {
                format!(
                    "attempt to index {index} in tuple of arity {}",
                    self.len()
                )
            }));
        };
        Ok(v.clone())
    }

    fn index_set(&self, index: usize, value: &Var) -> Result<Var, Error> {
        if index >= self.len() {
            return Err(Range.with_msg(|| {
                format!(
                    "attempt to set index {index} in tuple of arity {}",
                    self.len()
                )
            }));
        }
        let mut values = self.0.to_vec();
        values[index] = value.clone();
        Ok(Tuple::build(&values))
    }

    fn push(&self, _value: &Var) -> Result<Var, Error> {
        Err(TypeMismatch.with_msg(|| {
            format!("attempt to grow tuple of fixed arity {}", self.len())
        }))
    }
}

impl From<Tuple> for Var {
    fn from(val: Tuple) -> Self {
        Var::from_variant(Variant::Tuple(val))
    }
}

impl Index<usize> for Tuple {
    type Output = Var;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
