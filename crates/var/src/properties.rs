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

//! Named configuration values.
//!
//! A [`PropertyMap`] is what a device or compiled model is configured with: a string-keyed set of
//! boxed values. [`Property`] gives one of those names a Rust type, so reading it back checks (or
//! parses) the payload.

use crate::{
    Error,
    ErrorCode::{Config, KeyNotFound, TypeMismatch},
    FromVar, Var, Variant,
};
use figment::Figment;
use figment::providers::{Format, Json, Yaml};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap(BTreeMap<String, Var>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, returning the value it replaced, if any.
    pub fn set<N: Into<String>, V: Into<Var>>(&mut self, name: N, value: V) -> Option<Var> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Var> {
        self.0.get(name)
    }

    /// Read `name` as a `T`. Missing names are Err(KeyNotFound).
    pub fn get_as<T: FromVar>(&self, name: &str) -> Result<T, Error> {
        let Some(v) = self.0.get(name) else {
            return Err(KeyNotFound.with_msg(|| format!("property {name} is not set")));
        };
        T::from_var(v)
    }

    pub fn remove(&mut self, name: &str) -> Option<Var> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Var)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy every property of `other` into this map. Where both set a name, `other` wins.
    pub fn merge(&mut self, other: PropertyMap) {
        debug!(
            existing = self.len(),
            incoming = other.len(),
            "merging property maps"
        );
        self.0.extend(other.0);
    }

    /// The properties as a map payload keyed by name.
    pub fn to_var(&self) -> Var {
        let pairs: Vec<(Var, Var)> = self
            .0
            .iter()
            .map(|(k, v)| (Var::mk_str(k), v.clone()))
            .collect();
        Var::mk_map(&pairs)
    }

    /// Load properties from a YAML or JSON file, chosen by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Config.with_msg(|| format!("no property file at {}", path.display())));
        }
        let figment = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Figment::new().merge(Json::file(path)),
            Some("yaml") | Some("yml") => Figment::new().merge(Yaml::file(path)),
            other => {
                warn!(
                    ?path,
                    extension = ?other,
                    "unrecognized property file extension, reading as YAML"
                );
                Figment::new().merge(Yaml::file(path))
            }
        };
        let props = Self::from_figment(&figment)?;
        debug!(?path, count = props.len(), "loaded properties");
        Ok(props)
    }

    /// Extract properties from an already assembled figment, e.g. several layered files.
    pub fn from_figment(figment: &Figment) -> Result<Self, Error> {
        figment
            .extract::<PropertyMap>()
            .map_err(|e| Config.with_msg(|| format!("failed to extract properties: {e}")))
    }
}

impl FromVar for PropertyMap {
    fn from_var(var: &Var) -> Result<Self, Error> {
        let Variant::Map(m) = var.variant() else {
            return Err(TypeMismatch.with_msg(|| {
                format!("expected MAP, found {}", var.type_code().to_literal())
            }));
        };
        let mut props = PropertyMap::new();
        for (k, v) in m.iter() {
            let Some(name) = k.as_str() else {
                return Err(TypeMismatch.with_msg(|| {
                    format!(
                        "property names must be STR, found {}",
                        k.type_code().to_literal()
                    )
                }));
            };
            props.set(name, v);
        }
        Ok(props)
    }
}

impl<N: Into<String>> FromIterator<(N, Var)> for PropertyMap {
    fn from_iter<T: IntoIterator<Item = (N, Var)>>(iter: T) -> Self {
        PropertyMap(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for PropertyMap {
    type Item = (String, Var);
    type IntoIter = btree_map::IntoIter<String, Var>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<PropertyMap> for Var {
    fn from(props: PropertyMap) -> Self {
        props.to_var()
    }
}

/// A property name bound to the Rust type its value is read as.
pub struct Property<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> Property<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Property<T> {}

impl<T> std::fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Property({})", self.name)
    }
}

impl<T: FromVar> Property<T> {
    pub fn get(&self, props: &PropertyMap) -> Result<T, Error> {
        props.get_as(self.name)
    }

    /// As `get`, but an unset property reads as `default`. A set property of the wrong shape is
    /// still an error.
    pub fn get_or(&self, props: &PropertyMap, default: T) -> Result<T, Error> {
        match props.get(self.name) {
            Some(v) => T::from_var(v),
            None => Ok(default),
        }
    }
}

impl<T: Into<Var>> Property<T> {
    pub fn set(&self, props: &mut PropertyMap, value: T) -> Option<Var> {
        props.set(self.name, value)
    }
}

/// Properties understood by the CPU plugin.
pub mod cpu {
    use super::Property;

    /// Whether denormal floats are flushed to zero.
    pub const DENORMALS_OPTIMIZATION: Property<bool> =
        Property::new("CPU_DENORMALS_OPTIMIZATION");

    /// Minimum sparsity of a weight tensor for it to be stored compressed.
    pub const SPARSE_WEIGHTS_DECOMPRESSION_RATE: Property<f32> =
        Property::new("CPU_SPARSE_WEIGHTS_DECOMPRESSION_RATE");

    pub const ALLOCATE_MAX_SIZE: Property<bool> = Property::new("CPU_ALLOCATE_MAX_SIZE");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorCode, v_int, v_list, v_map, v_str};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const TIMEOUT: Property<u32> = Property::new("AUTO_BATCH_TIMEOUT");
    const DEVICE_CONFIG: Property<String> = Property::new("AUTO_BATCH_DEVICE_CONFIG");

    #[test]
    fn test_typed_properties() {
        let mut props = PropertyMap::new();
        TIMEOUT.set(&mut props, 100);
        cpu::DENORMALS_OPTIMIZATION.set(&mut props, true);

        assert_eq!(TIMEOUT.get(&props).unwrap(), 100);
        assert!(cpu::DENORMALS_OPTIMIZATION.get(&props).unwrap());
        assert_eq!(
            cpu::ALLOCATE_MAX_SIZE.get(&props).unwrap_err(),
            ErrorCode::KeyNotFound
        );
        assert!(!cpu::ALLOCATE_MAX_SIZE.get_or(&props, false).unwrap());
    }

    #[test]
    fn test_string_valued_properties_parse() {
        let props: PropertyMap = [
            ("AUTO_BATCH_TIMEOUT", v_str("200")),
            ("AUTO_BATCH_DEVICE_CONFIG", v_str("CPU(16)")),
            ("CPU_DENORMALS_OPTIMIZATION", v_str("YES")),
        ]
        .into_iter()
        .collect();

        assert_eq!(TIMEOUT.get(&props).unwrap(), 200);
        assert_eq!(DEVICE_CONFIG.get(&props).unwrap(), "CPU(16)");
        assert!(cpu::DENORMALS_OPTIMIZATION.get(&props).unwrap());
    }

    #[test]
    fn test_wrong_shape_is_error() {
        let mut props = PropertyMap::new();
        props.set("AUTO_BATCH_TIMEOUT", v_list(&[v_int(1)]));
        assert_eq!(TIMEOUT.get(&props).unwrap_err(), ErrorCode::TypeMismatch);
        assert_eq!(
            TIMEOUT.get_or(&props, 5).unwrap_err(),
            ErrorCode::TypeMismatch
        );
    }

    #[test]
    fn test_merge_right_wins() {
        let mut base = PropertyMap::new();
        base.set("A", 1);
        base.set("B", 2);
        let mut over = PropertyMap::new();
        over.set("B", "two");
        base.merge(over);

        assert_eq!(base.len(), 2);
        assert_eq!(base.get("A"), Some(&v_int(1)));
        assert_eq!(base.get("B"), Some(&v_str("two")));
    }

    #[test]
    fn test_var_conversion() {
        let mut props = PropertyMap::new();
        props.set("A", 1);
        let v = props.to_var();
        assert_eq!(v, v_map(&[(v_str("A"), v_int(1))]));
        assert_eq!(PropertyMap::from_var(&v).unwrap(), props);

        let bad = v_map(&[(v_int(1), v_int(1))]);
        assert_eq!(
            PropertyMap::from_var(&bad).unwrap_err(),
            ErrorCode::TypeMismatch
        );
    }

    #[test]
    fn test_from_yaml_file() {
        let mut f = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(f, "AUTO_BATCH_TIMEOUT: 100").unwrap();
        writeln!(f, "CPU_SPARSE_WEIGHTS_DECOMPRESSION_RATE: 0.5").unwrap();
        writeln!(f, "DEVICES: [CPU, GPU]").unwrap();

        let props = PropertyMap::from_file(f.path()).unwrap();
        assert_eq!(TIMEOUT.get(&props).unwrap(), 100);
        assert_eq!(
            cpu::SPARSE_WEIGHTS_DECOMPRESSION_RATE.get(&props).unwrap(),
            0.5
        );
        assert_eq!(
            props.get("DEVICES"),
            Some(&v_list(&[v_str("CPU"), v_str("GPU")]))
        );
    }

    #[test]
    fn test_from_json_file() {
        let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            f,
            r#"{{"AUTO_BATCH_DEVICE_CONFIG": "CPU(16)", "PAIR": {{"__type_tuple": [2, 1]}}}}"#
        )
        .unwrap();

        let props = PropertyMap::from_file(f.path()).unwrap();
        assert_eq!(DEVICE_CONFIG.get(&props).unwrap(), "CPU(16)");
        assert_eq!(props.get_as::<Vec<i64>>("PAIR").unwrap(), vec![2, 1]);
        assert!(props.get("PAIR").unwrap().as_tuple().is_some());
    }

    #[test]
    fn test_unknown_extension_reads_yaml() {
        let mut f = tempfile::Builder::new().suffix(".conf").tempfile().unwrap();
        writeln!(f, "AUTO_BATCH_TIMEOUT: 250").unwrap();
        writeln!(f, "CPU_DENORMALS_OPTIMIZATION: \"YES\"").unwrap();

        let props = PropertyMap::from_file(f.path()).unwrap();
        assert_eq!(TIMEOUT.get(&props).unwrap(), 250);
        assert!(cpu::DENORMALS_OPTIMIZATION.get(&props).unwrap());
    }

    #[test]
    fn test_layered_figment_later_wins() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.yaml");
        let over = dir.path().join("override.json");
        std::fs::write(&base, "AUTO_BATCH_TIMEOUT: 100\nDEVICES: [CPU]\n").unwrap();
        std::fs::write(&over, r#"{"AUTO_BATCH_TIMEOUT": 500}"#).unwrap();

        let figment = Figment::new()
            .merge(Yaml::file(&base))
            .merge(Json::file(&over));
        let props = PropertyMap::from_figment(&figment).unwrap();
        assert_eq!(props.len(), 2);
        assert_eq!(TIMEOUT.get(&props).unwrap(), 500);
        assert_eq!(props.get("DEVICES"), Some(&v_list(&[v_str("CPU")])));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PropertyMap::from_file(dir.path().join("absent.yaml")).unwrap_err();
        assert_eq!(err, ErrorCode::Config);
    }
}
