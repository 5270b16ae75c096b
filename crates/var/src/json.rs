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

//! JSON interchange for `Var`.
//!
//! Strings, numbers, booleans and lists map directly. Shapes JSON cannot tell apart use tagged
//! objects:
//! - Tuple: `{"__type_tuple": [a, b]}`
//! - Map with any non-string key: `{"__type_map": [[key1, val1], [key2, val2], ...]}`
//!
//! Maps whose keys are all strings are written as plain JSON objects. Objects, non-finite floats,
//! integers outside `i64` and JSON `null` have no representation.

use crate::{
    Error,
    ErrorCode::InvalidArgument,
    Var, Variant, v_bool, v_float, v_int, v_list_iter, v_map, v_str, v_tuple,
};
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

const TUPLE_TAG: &str = "__type_tuple";
const MAP_TAG: &str = "__type_map";
const BAD_MAP_ENTRY: &str = "map entry must be a [key, value] pair";

pub fn var_to_json(var: &Var) -> Result<JsonValue, Error> {
    match var.variant() {
        Variant::Str(s) => Ok(JsonValue::String(s.as_str().to_string())),
        Variant::Int(i) => Ok(JsonValue::Number((*i).into())),
        Variant::Float(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .ok_or_else(|| InvalidArgument.with_msg(|| format!("float {f} has no JSON form"))),
        Variant::Bool(b) => Ok(JsonValue::Bool(*b)),
        Variant::List(l) => {
            let items: Result<Vec<_>, _> = l.iter().map(|v| var_to_json(&v)).collect();
            Ok(JsonValue::Array(items?))
        }
        Variant::Tuple(t) => {
            let items: Result<Vec<_>, _> = t.iter().map(|v| var_to_json(&v)).collect();
            let mut obj = serde_json::Map::new();
            obj.insert(TUPLE_TAG.to_string(), JsonValue::Array(items?));
            Ok(JsonValue::Object(obj))
        }
        Variant::Map(m) => {
            if m.iter().all(|(k, _)| k.is_string()) {
                let mut obj = serde_json::Map::new();
                for (k, v) in m.iter() {
                    let key = k.as_str().unwrap_or_default().to_string();
                    obj.insert(key, var_to_json(&v)?);
                }
                return Ok(JsonValue::Object(obj));
            }

            let mut pairs = Vec::with_capacity(m.len());
            for (k, v) in m.iter() {
                pairs.push(JsonValue::Array(vec![var_to_json(&k)?, var_to_json(&v)?]));
            }
            let mut obj = serde_json::Map::new();
            obj.insert(MAP_TAG.to_string(), JsonValue::Array(pairs));
            Ok(JsonValue::Object(obj))
        }
        Variant::Object(o) => Err(InvalidArgument.with_msg(|| {
            format!("object of type {} has no JSON form", o.type_name())
        })),
    }
}

pub fn json_to_var(json: &JsonValue) -> Result<Var, Error> {
    match json {
        JsonValue::Null => Err(InvalidArgument.msg("null has no Var form")),
        JsonValue::Bool(b) => Ok(v_bool(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(v_int(i));
            }
            if !n.is_f64() {
                return Err(InvalidArgument.with_msg(|| format!("integer {n} does not fit INT")));
            }
            match n.as_f64() {
                Some(f) => Ok(v_float(f)),
                None => Err(InvalidArgument.with_msg(|| format!("number {n} does not fit FLOAT"))),
            }
        }
        JsonValue::String(s) => Ok(v_str(s)),
        JsonValue::Array(arr) => {
            let items: Result<Vec<_>, _> = arr.iter().map(json_to_var).collect();
            Ok(v_list_iter(items?))
        }
        JsonValue::Object(obj) => {
            if obj.len() == 1 {
                if let Some(JsonValue::Array(items)) = obj.get(TUPLE_TAG) {
                    let items: Result<Vec<_>, _> = items.iter().map(json_to_var).collect();
                    return Ok(v_tuple(&items?));
                }
                if let Some(JsonValue::Array(pairs)) = obj.get(MAP_TAG) {
                    let mut entries = Vec::with_capacity(pairs.len());
                    for pair in pairs {
                        let Some([k, v]) = pair.as_array().map(Vec::as_slice) else {
                            return Err(InvalidArgument.msg(BAD_MAP_ENTRY));
                        };
                        entries.push((json_to_var(k)?, json_to_var(v)?));
                    }
                    return Ok(v_map(&entries));
                }
            }

            let mut entries = Vec::with_capacity(obj.len());
            for (k, v) in obj {
                entries.push((v_str(k), json_to_var(v)?));
            }
            Ok(v_map(&entries))
        }
    }
}

impl Serialize for Var {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        var_to_json(self)
            .map_err(|e| S::Error::custom(e.to_string()))?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Var {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        json_to_var(&json).map_err(|e| D::Error::custom(e.to_string()))
    }
}
