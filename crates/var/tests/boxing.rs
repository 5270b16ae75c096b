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

//! Boxing values of every shape and reading them back unchanged.

use rtinfo_var::{Var, VarType, Variant, v_float, v_int, v_str};
use std::collections::BTreeMap;

#[test]
fn test_box_str() {
    let var = Var::from("test_string");
    assert!(matches!(var.variant(), Variant::Str(_)));
    assert_eq!(var, "test_string");
}

#[test]
fn test_box_int() {
    let var = Var::from(2137);
    assert!(matches!(var.variant(), Variant::Int(2137)));
    assert_eq!(var, 2137);
}

#[test]
fn test_box_float() {
    let var = Var::from(21.37);
    assert!(matches!(var.variant(), Variant::Float(_)));
    assert_eq!(var.as_float(), Some(21.37));
}

#[test]
fn test_box_string_list() {
    let var = Var::from(vec!["test", "string"]);
    assert!(matches!(var.variant(), Variant::List(_)));
    let first = var.index(&v_int(0)).unwrap();
    assert_eq!(first.type_code(), VarType::Str);
    assert_eq!(first, "test");
}

#[test]
fn test_box_int_list() {
    let var = Var::from(vec![21, 37]);
    assert!(matches!(var.variant(), Variant::List(_)));
    assert_eq!(var.len().unwrap(), 2);
    assert_eq!(var.index(&v_int(0)).unwrap().type_code(), VarType::Int);
}

#[test]
fn test_box_float_list() {
    let var = Var::from(vec![21.0, 37.0]);
    assert!(matches!(var.variant(), Variant::List(_)));
    assert_eq!(var.len().unwrap(), 2);
    assert_eq!(var.index(&v_int(0)).unwrap().type_code(), VarType::Float);
}

#[test]
fn test_box_tuple() {
    let var = Var::from((2, 1));
    assert!(matches!(var.variant(), Variant::Tuple(_)));
    assert_eq!(var.as_tuple().map(|t| t.len()), Some(2));
}

#[test]
fn test_box_bool() {
    let var = Var::from(false);
    assert!(matches!(var.variant(), Variant::Bool(false)));
    assert!(var != true);
    assert!(var != 0);
}

#[test]
fn test_box_dict_str() {
    let mut m = BTreeMap::new();
    m.insert("key", "value");
    let var = Var::from(m);
    assert!(matches!(var.variant(), Variant::Map(_)));
    assert_eq!(var.index(&v_str("key")).unwrap(), "value");
}

#[test]
fn test_box_dict_str_int() {
    let mut m = BTreeMap::new();
    m.insert("key", 2);
    let var = Var::from(m);
    assert!(matches!(var.variant(), Variant::Map(_)));
    assert_eq!(var.index(&v_str("key")).unwrap(), 2);
}

#[test]
fn test_box_int_dict() {
    let mut m = BTreeMap::new();
    m.insert(1, 2);
    let var = Var::from(m);
    assert!(matches!(var.variant(), Variant::Map(_)));
    assert_eq!(var.index(&v_int(1)).unwrap(), 2);
}

#[test]
fn test_rebox_replaces_tag() {
    let mut var = Var::from(1);
    assert_eq!(var.type_code(), VarType::Int);
    var = Var::from("test");
    assert_eq!(var.type_code(), VarType::Str);
    assert_eq!(var, "test");
}

#[test]
fn test_box_user_object() {
    struct TestClass {
        text: String,
    }

    let var = Var::mk_object(TestClass {
        text: "test".to_string(),
    });
    assert!(var.as_object().is_some_and(|o| o.is::<TestClass>()));
    assert_eq!(var.downcast_ref::<TestClass>().unwrap().text, "test");

    // Clones share the one object rather than copying it.
    let copy = var.clone();
    let a: *const TestClass = var.downcast_ref::<TestClass>().unwrap();
    let b: *const TestClass = copy.downcast_ref::<TestClass>().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_extract_round_trip() {
    assert_eq!(Var::from("s").extract::<String>().unwrap(), "s");
    assert_eq!(Var::from(2137).extract::<i64>().unwrap(), 2137);
    assert_eq!(
        Var::from(vec![21.0, 37.0]).extract::<Vec<f64>>().unwrap(),
        vec![21.0, 37.0]
    );
    assert_eq!(v_float(0.5).extract::<f64>().unwrap(), 0.5);
}

#[test]
fn test_vars_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Var>();

    let var = Var::from(vec!["shared"]);
    let handle = {
        let var = var.clone();
        std::thread::spawn(move || var.index(&v_int(0)).unwrap())
    };
    assert_eq!(handle.join().unwrap(), "shared");
}
