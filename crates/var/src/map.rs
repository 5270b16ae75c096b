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
    Associative, Error,
    ErrorCode::KeyNotFound,
    var::Var,
    variant::Variant,
};
use std::{cmp::Ordering, hash::Hash, sync::Arc};

#[derive(Clone)]
pub struct Map(Arc<imbl::Vector<(Var, Var)>>);

impl Map {
    /// Construct from an iterator of pairs. When a key repeats, the last pair given for it wins.
    pub fn build<'a, I: Iterator<Item = &'a (Var, Var)>>(pairs: I) -> Var {
        Var::from_variant(Variant::Map(Self::mk_map(pairs)))
    }

    pub fn mk_map<'a, I: Iterator<Item = &'a (Var, Var)>>(pairs: I) -> Map {
        // We use a vector of pairs, sorted, so binary search can be used to find
        // keys in O(log n) time.
        let mut sorted: Vec<(Var, Var)> = pairs.map(|(k, v)| (k.clone(), v.clone())).collect();
        // Stable sort keeps duplicates in the order given, so the last one is the one we keep.
        sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
        let mut deduped: Vec<(Var, Var)> = Vec::with_capacity(sorted.len());
        for (k, v) in sorted {
            match deduped.last_mut() {
                Some(last) if last.0.cmp(&k) == Ordering::Equal => last.1 = v,
                _ => deduped.push((k, v)),
            }
        }
        Map(Arc::new(imbl::Vector::from(deduped)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Var, Var)> + '_ {
        self.0.iter().map(|(k, v)| (k.clone(), v.clone()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn position(&self, key: &Var) -> Result<usize, usize> {
        self.0.binary_search_by(|(k, _)| k.cmp(key))
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a == b)
    }
}

impl Associative for Map {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn get(&self, key: &Var) -> Result<Var, Error> {
        match self.position(key) {
            Ok(pos) => Ok(self.0[pos].1.clone()),
            Err(_) => Err(KeyNotFound.with_msg(|| format!("Key not found: {key}"))),
        }
    }

    fn set(&self, key: &Var, value: &Var) -> Result<Var, Error> {
        let mut new = self.0.as_ref().clone();
        match self.position(key) {
            Ok(pos) => {
                new.set(pos, (key.clone(), value.clone()));
            }
            Err(pos) => {
                new.insert(pos, (key.clone(), value.clone()));
            }
        }
        Ok(Var::from_variant(Variant::Map(Map(Arc::new(new)))))
    }

    fn keys(&self) -> Vec<Var> {
        self.0.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<Var> {
        self.0.iter().map(|(_, v)| v.clone()).collect()
    }

    fn contains_key(&self, key: &Var) -> bool {
        self.position(key).is_ok()
    }

    fn remove(&self, key: &Var) -> (Var, Option<Var>) {
        match self.position(key) {
            Ok(pos) => {
                let mut new = self.0.as_ref().clone();
                let (_, removed) = new.remove(pos);
                (
                    Var::from_variant(Variant::Map(Map(Arc::new(new)))),
                    Some(removed),
                )
            }
            Err(_) => (Var::from_variant(Variant::Map(self.clone())), None),
        }
    }
}

impl Eq for Map {}

impl PartialOrd for Map {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Map {
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

impl Hash for Map {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for (k, v) in self.0.iter() {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl From<Map> for Var {
    fn from(val: Map) -> Self {
        Var::from_variant(Variant::Map(val))
    }
}
