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

// Clippy warns about Arc<imbl::Vector<Var>> not being Send/Sync due to circular type dependency,
// but this is a false positive - Var is Send/Sync and imbl::Vector is thread-safe.
#![allow(clippy::arc_with_non_send_sync)]

use crate::{Error, ErrorCode::Range, Sequence, Var, Variant};
use std::{
    cmp::Ordering,
    fmt::{Debug, Formatter},
    hash::Hash,
    ops::Index,
    sync::Arc,
};

/// An ordered, growable sequence. Updates produce a new list sharing structure with the old one.
#[derive(Clone)]
#[repr(transparent)]
pub struct List(Arc<imbl::Vector<Var>>);

impl List {
    pub fn build(values: &[Var]) -> Var {
        Var::from_variant(Variant::List(Self::mk_list(values)))
    }

    pub fn mk_list(values: &[Var]) -> List {
        let l = imbl::Vector::from(values.to_vec());
        List(Arc::new(l))
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

    /// Return a list which is this list followed by `other`.
    pub fn append(&self, other: &List) -> Var {
        let mut result = (*self.0).clone();
        result.append(other.0.as_ref().clone());
        Var::from_variant(Variant::List(List(Arc::new(result))))
    }

    /// Return a list with the `index`nth element removed.
    pub fn remove_at(&self, index: usize) -> Result<Var, Error> {
        if index >= self.len() {
            return Err(Range.with_msg(|| {
                format!(
                    "attempt to remove index {index} in list of length {}",
                    self.len()
                )
            }));
        }
        let mut new = (*self.0).clone();
        new.remove(index);
        Ok(Var::from_variant(Variant::List(List(Arc::new(new)))))
    }
}

impl Debug for List {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl Sequence for List {
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
        if index >= self.len() {
            return Err(Range.with_msg(|| {
                format!(
                    "attempt to index {index} in list of length {}",
                    self.len()
                )
            }));
        }
        Ok(self.0[index].clone())
    }

    fn index_set(&self, index: usize, value: &Var) -> Result<Var, Error> {
        if index >= self.len() {
            return Err(Range.with_msg(|| {
                format!(
                    "attempt to set index {index} in list of length {}",
                    self.len()
                )
            }));
        }
        let new = self.0.update(index, value.clone());
        Ok(Var::from_variant(Variant::List(List(Arc::new(new)))))
    }

    fn push(&self, value: &Var) -> Result<Var, Error> {
        let mut new = (*self.0).clone();
        new.push_back(value.clone());
        Ok(Var::from_variant(Variant::List(List(Arc::new(new)))))
    }
}

impl From<List> for Var {
    fn from(val: List) -> Self {
        Var::from_variant(Variant::List(val))
    }
}

impl Index<usize> for List {
    type Output = Var;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a == b)
    }
}

impl Eq for List {}

impl PartialOrd for List {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for List {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.len() != other.len() {
            return self.len().cmp(&other.len());
        }

        for (a, b) in self.0.iter().zip(other.0.iter()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                x => return x,
            }
        }

        Ordering::Equal
    }
}

impl Hash for List {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for item in self.0.iter() {
            item.hash(state);
        }
    }
}

impl FromIterator<Var> for Var {
    fn from_iter<T: IntoIterator<Item = Var>>(iter: T) -> Self {
        Var::from_variant(Variant::List(List::from_iter(iter)))
    }
}

impl FromIterator<Var> for List {
    fn from_iter<T: IntoIterator<Item = Var>>(iter: T) -> Self {
        let l: imbl::Vector<Var> = imbl::Vector::from_iter(iter);
        List(Arc::new(l))
    }
}
