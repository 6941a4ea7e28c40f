//! Typed-index vectors.
//!
//! A compiler juggles several index spaces at once: node identities
//! (`NodeId`), scope identities (`RibId`), definition identities (`DefId`).
//! Using a raw `usize`/`u32` for all of these is the kind of mistake that's
//! cheap to make and annoying to debug — a `RibId` used to index a vector of
//! AST nodes compiles fine and reads the wrong slot. `IndexVec<I, T>`
//! wraps a `Vec<T>` so that only the matching index newtype can index it.
//!
//! This is a zero-cost abstraction: `Idx` types are plain `u32` newtypes and
//! `IndexVec` compiles down to ordinary vector indexing.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// A type that can be used as a typed index into an [`IndexVec`].
pub trait Idx: Copy + Eq {
    fn from_usize(idx: usize) -> Self;
    fn index(self) -> usize;
}

/// A `Vec<T>` indexed only by `I`.
#[derive(Clone, Debug)]
pub struct IndexVec<I, T> {
    raw: Vec<T>,
    _marker: PhantomData<fn(&I)>,
}

impl<I, T> IndexVec<I, T> {
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: Vec::with_capacity(capacity),
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.raw.iter()
    }
}

impl<I: Idx, T> IndexVec<I, T> {
    /// Push a value, returning the typed index it was stored at.
    pub fn push(&mut self, value: T) -> I {
        let index = self.raw.len();
        self.raw.push(value);
        I::from_usize(index)
    }

    pub fn get(&self, index: I) -> Option<&T> {
        self.raw.get(index.index())
    }

    pub fn get_mut(&mut self, index: I) -> Option<&mut T> {
        self.raw.get_mut(index.index())
    }

    pub fn iter_enumerated(&self) -> impl Iterator<Item = (I, &T)> {
        self.raw.iter().enumerate().map(|(i, v)| (I::from_usize(i), v))
    }

    pub fn indices(&self) -> impl Iterator<Item = I> {
        (0..self.raw.len()).map(I::from_usize)
    }
}

impl<I: Idx, T> Index<I> for IndexVec<I, T> {
    type Output = T;

    fn index(&self, index: I) -> &T {
        &self.raw[index.index()]
    }
}

impl<I: Idx, T> IndexMut<I> for IndexVec<I, T> {
    fn index_mut(&mut self, index: I) -> &mut T {
        &mut self.raw[index.index()]
    }
}

impl<I, T> Default for IndexVec<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Defines a `u32`-backed [`Idx`] newtype.
#[macro_export]
macro_rules! define_idx {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $crate::Idx for $name {
            fn from_usize(idx: usize) -> Self {
                assert!(idx <= u32::MAX as usize, "index space for {} exhausted", stringify!($name));
                $name(idx as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    define_idx!(TestId);

    #[test]
    fn push_and_index_roundtrip() {
        let mut v: IndexVec<TestId, &str> = IndexVec::new();
        let a = v.push("a");
        let b = v.push("b");
        assert_eq!(v[a], "a");
        assert_eq!(v[b], "b");
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn iter_enumerated_yields_typed_indices() {
        let mut v: IndexVec<TestId, i32> = IndexVec::new();
        v.push(10);
        v.push(20);
        let collected: Vec<_> = v.iter_enumerated().map(|(i, x)| (i.index(), *x)).collect();
        assert_eq!(collected, vec![(0, 10), (1, 20)]);
    }

    #[quickcheck_macros::quickcheck]
    fn pushed_values_come_back_in_push_order(values: Vec<i32>) -> bool {
        let mut v: IndexVec<TestId, i32> = IndexVec::new();
        let ids: Vec<_> = values.iter().map(|x| v.push(*x)).collect();
        ids.iter().zip(&values).all(|(id, expected)| v[*id] == *expected)
    }

    #[quickcheck_macros::quickcheck]
    fn index_roundtrips_through_from_usize(idx: usize) -> bool {
        let idx = idx % (u32::MAX as usize);
        TestId::from_usize(idx).index() == idx
    }
}
