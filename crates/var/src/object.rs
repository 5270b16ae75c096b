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

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An opaque handle to an arbitrary user value.
///
/// The value itself is never copied: clones of the handle share one allocation, and equality,
/// ordering and hashing are all by identity of that allocation.
#[derive(Clone)]
pub struct Object {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Object {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            inner: Arc::new(value),
        }
    }

    /// Wrap a value that is already shared, keeping its identity.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            inner: value,
        }
    }

    /// The Rust type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Recover the shared value if it is a `T`.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.inner.clone().downcast::<T>().ok()
    }

    /// True if both handles refer to the same value.
    pub fn ptr_eq(&self, other: &Object) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

impl Debug for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Object({} @ {:#x})", self.type_name, self.addr())
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Object {}

impl PartialOrd for Object {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Object {
    fn cmp(&self, other: &Self) -> Ordering {
        self.addr().cmp(&other.addr())
    }
}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Model {
        text: String,
    }

    #[test]
    fn test_object_downcast() {
        let o = Object::new(Model {
            text: "test".into(),
        });
        assert!(o.is::<Model>());
        assert!(!o.is::<String>());
        assert_eq!(o.downcast_ref::<Model>().unwrap().text, "test");
        assert!(o.downcast_ref::<i64>().is_none());
        assert!(o.type_name().ends_with("Model"));
        assert_eq!(o.type_id(), TypeId::of::<Model>());
    }

    #[test]
    fn test_object_identity() {
        let o1 = Object::new(Model {
            text: "test".into(),
        });
        let o2 = o1.clone();
        let o3 = Object::new(Model {
            text: "test".into(),
        });
        assert_eq!(o1, o2);
        assert_ne!(o1, o3);
    }

    #[test]
    fn test_object_from_arc_shares() {
        let shared = Arc::new(Model {
            text: "test".into(),
        });
        let o = Object::from_arc(shared.clone());
        let back = o.downcast_arc::<Model>().unwrap();
        assert!(Arc::ptr_eq(&shared, &back));
        assert!(o.downcast_arc::<String>().is_none());
    }
}
