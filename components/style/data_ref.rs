/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Copy-on-write handles to shared style records.

use std::fmt;
use std::ops::Deref;

use servo_arc::Arc;

/// A reference counted, copy-on-write handle to a style record.
///
/// Cloning a `DataRef` only bumps a reference count. Writing through
/// [`DataRef::access`] clones the record first if anybody else holds it, so a
/// shared record is never mutated in place.
pub struct DataRef<T> {
    data: Arc<T>,
}

impl<T> DataRef<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        DataRef {
            data: Arc::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.data
    }

    /// Whether both handles point at the very same record.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl<T: Clone> DataRef<T> {
    /// Returns a mutable reference to the record, cloning it first if it is
    /// shared with any other handle.
    #[inline]
    pub fn access(&mut self) -> &mut T {
        Arc::make_mut(&mut self.data)
    }
}

impl<T> Clone for DataRef<T> {
    #[inline]
    fn clone(&self) -> Self {
        DataRef {
            data: self.data.clone(),
        }
    }
}

impl<T> Deref for DataRef<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T: Default> Default for DataRef<T> {
    fn default() -> Self {
        DataRef::new(T::default())
    }
}

impl<T: PartialEq> PartialEq for DataRef<T> {
    /// Shared records compare equal without looking at their contents.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.data == *other.data
    }
}

impl<T: fmt::Debug> fmt::Debug for DataRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.data.fmt(f)
    }
}

/// Compares two optional shared values, short-circuiting on identity.
///
/// Used for nested lists (shadows, quotes, counters) that are stored behind
/// their own reference count inside a style record.
#[inline]
pub fn data_equivalent<T: PartialEq>(a: Option<&Arc<T>>, b: Option<&Arc<T>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b) || **a == **b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_copies_shared_records() {
        let mut a = DataRef::new(vec![1, 2, 3]);
        let b = a.clone();
        assert!(a.ptr_eq(&b));

        a.access().push(4);
        assert!(!a.ptr_eq(&b));
        assert_eq!(*b, vec![1, 2, 3]);
        assert_eq!(*a, vec![1, 2, 3, 4]);
    }

    #[test]
    fn access_does_not_copy_unique_records() {
        let mut a = DataRef::new(vec![1]);
        let before: *const Vec<i32> = a.get();
        a.access().push(2);
        let after: *const Vec<i32> = a.get();
        assert_eq!(before, after);
    }

    #[test]
    fn equality_is_deep() {
        let a = DataRef::new(String::from("x"));
        let b = DataRef::new(String::from("x"));
        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn optional_equivalence() {
        let a = Arc::new(5);
        let b = Arc::new(5);
        assert!(data_equivalent(Some(&a), Some(&b)));
        assert!(data_equivalent::<i32>(None, None));
        assert!(!data_equivalent(Some(&a), None));
    }
}
