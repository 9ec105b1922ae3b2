//! Arity-typed views over a [`MatrixMap`].
//!
//! A view is a thin adapter: it holds the map (owned or borrowed) and
//! forwards every call with the key components packed into a tuple of
//! the right length. The only way to get one is [`cast`](MatrixMap2::cast),
//! which checks the map's dimensionality and key types first.

use std::borrow::{Borrow, BorrowMut};
use std::fmt;
use std::marker::PhantomData;

use crate::error::MatrixError;
use crate::key::{AsKey, Key, MatrixKey};
use crate::map::MatrixMap;

type DomainCheck<V> = fn(&MatrixMap<V>, usize) -> Result<(), MatrixError>;

fn check_domain<K: MatrixKey, V>(map: &MatrixMap<V>, dimension: usize) -> Result<(), MatrixError> {
    let domain = &map.dimensions()[dimension];
    match domain.iter().find(|key| K::from_key(key).is_none()) {
        Some(key) => Err(MatrixError::KeyType {
            dimension,
            key: key.clone(),
        }),
        None => Ok(()),
    }
}

macro_rules! typed_view {
    (
        $(#[$meta:meta])*
        $name:ident, $arity:literal, $( $k:ident $q:ident $arg:ident ),+
    ) => {
        $(#[$meta])*
        pub struct $name<$($k,)+ V, M = MatrixMap<V>> {
            inner: M,
            _marker: PhantomData<fn() -> ($($k,)+ V)>,
        }

        impl<$($k,)+ V, M: Clone> Clone for $name<$($k,)+ V, M> {
            fn clone(&self) -> Self {
                Self {
                    inner: self.inner.clone(),
                    _marker: PhantomData,
                }
            }
        }

        impl<$($k,)+ V, M: fmt::Debug> fmt::Debug for $name<$($k,)+ V, M> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.inner).finish()
            }
        }

        impl<$($k: MatrixKey + Into<Key>,)+ V> $name<$($k,)+ V, MatrixMap<V>> {
            /// Build a fresh map with these key domains and wrap it.
            pub fn new<F>($($arg: Vec<$k>,)+ default: F) -> Result<Self, MatrixError>
            where
                F: Fn(&[Key]) -> V + Send + Sync + 'static,
            {
                let dimensions: Vec<Vec<Key>> =
                    vec![$($arg.into_iter().map(Into::into).collect()),+];
                Self::cast(MatrixMap::new(dimensions, default)?)
            }
        }

        impl<$($k: MatrixKey,)+ V, M: Borrow<MatrixMap<V>>> $name<$($k,)+ V, M> {
            /// Number of key components every call takes.
            pub const ARITY: usize = $arity;

            /// Wrap `inner` after checking its shape.
            ///
            /// Fails with [`MatrixError::ShapeMismatch`] unless the map has
            /// exactly this view's arity, and with [`MatrixError::KeyType`]
            /// if a domain holds keys of a different kind than the view's.
            pub fn cast(inner: M) -> Result<Self, MatrixError> {
                let map = inner.borrow();
                if map.num_dimensions() != $arity {
                    return Err(MatrixError::ShapeMismatch {
                        expected: $arity,
                        found: map.num_dimensions(),
                    });
                }
                let checks: [DomainCheck<V>; $arity] = [$(check_domain::<$k, V>),+];
                for (dimension, check) in checks.iter().enumerate() {
                    check(map, dimension)?;
                }
                Ok(Self {
                    inner,
                    _marker: PhantomData,
                })
            }

            /// The underlying map.
            pub fn map(&self) -> &MatrixMap<V> {
                self.inner.borrow()
            }

            /// Unwrap the view.
            pub fn into_inner(self) -> M {
                self.inner
            }

            /// See [`MatrixMap::get`].
            pub fn get<$($q),+>(&self, $($arg: &$q),+) -> Result<&V, MatrixError>
            where
                $($k: Borrow<$q>, $q: AsKey + ?Sized,)+
            {
                self.inner.borrow().get(&[$($arg.key_ref()),+])
            }

            /// See [`MatrixMap::has`].
            pub fn has<$($q),+>(&self, $($arg: &$q),+) -> Result<bool, MatrixError>
            where
                $($k: Borrow<$q>, $q: AsKey + ?Sized,)+
            {
                self.inner.borrow().has(&[$($arg.key_ref()),+])
            }

            /// See [`MatrixMap::all`].
            pub fn all<F: Fn(&V) -> bool>(&self, predicate: F) -> bool {
                self.inner.borrow().all(predicate)
            }

            /// See [`MatrixMap::any`].
            pub fn any<F: Fn(&V) -> bool>(&self, predicate: F) -> bool {
                self.inner.borrow().any(predicate)
            }

            /// Visit every key tuple outer-to-inner, as typed keys.
            pub fn each_key<F>(&self, mut visitor: F)
            where
                F: FnMut($($k),+),
            {
                self.inner.borrow().each_key(|keys| {
                    let mut it = keys.iter();
                    if let ($(Some($arg),)+) = ($(it.next().and_then(<$k as MatrixKey>::from_key),)+) {
                        visitor($($arg),+);
                    }
                });
            }
        }

        impl<$($k: MatrixKey,)+ V, M: BorrowMut<MatrixMap<V>>> $name<$($k,)+ V, M> {
            /// The underlying map, mutably.
            pub fn map_mut(&mut self) -> &mut MatrixMap<V> {
                self.inner.borrow_mut()
            }

            /// See [`MatrixMap::get_mut`].
            pub fn get_mut<$($q),+>(&mut self, $($arg: &$q),+) -> Result<&mut V, MatrixError>
            where
                $($k: Borrow<$q>, $q: AsKey + ?Sized,)+
            {
                self.inner.borrow_mut().get_mut(&[$($arg.key_ref()),+])
            }

            /// See [`MatrixMap::put`].
            pub fn put<$($q),+>(&mut self, $($arg: &$q,)+ value: V) -> Result<V, MatrixError>
            where
                $($k: Borrow<$q>, $q: AsKey + ?Sized,)+
            {
                self.inner.borrow_mut().put(&[$($arg.key_ref()),+], value)
            }

            /// See [`MatrixMap::remove`].
            pub fn remove<$($q),+>(&mut self, $($arg: &$q),+) -> Result<Option<V>, MatrixError>
            where
                $($k: Borrow<$q>, $q: AsKey + ?Sized,)+
            {
                self.inner.borrow_mut().remove(&[$($arg.key_ref()),+])
            }

            /// See [`MatrixMap::set_all`].
            pub fn set_all(&mut self, value: V)
            where
                V: Clone,
            {
                self.inner.borrow_mut().set_all(value);
            }

            /// See [`MatrixMap::set_all_with`].
            pub fn set_all_with<F: FnMut(&[Key]) -> V>(&mut self, f: F) {
                self.inner.borrow_mut().set_all_with(f);
            }
        }
    };
}

typed_view! {
    /// A one-dimensional view: a keyed list of values.
    MatrixMap1, 1, K1 Q1 k1
}

typed_view! {
    /// A two-dimensional view, e.g. zone × species.
    MatrixMap2, 2, K1 Q1 k1, K2 Q2 k2
}

typed_view! {
    /// A three-dimensional view, e.g. species × region × utilization class.
    MatrixMap3, 3, K1 Q1 k1, K2 Q2 k2, K3 Q3 k3
}

impl<K1: MatrixKey, K2: MatrixKey, V, M: BorrowMut<MatrixMap<V>>> MatrixMap2<K1, K2, V, M> {
    /// Put every value of a nested `outer -> inner -> value` mapping.
    ///
    /// Stops at the first unknown key; entries before it stay written.
    pub fn add_all<I, J>(&mut self, nested: I) -> Result<(), MatrixError>
    where
        I: IntoIterator<Item = (K1, J)>,
        J: IntoIterator<Item = (K2, V)>,
    {
        let map = self.inner.borrow_mut();
        for (k1, row) in nested {
            for (k2, value) in row {
                map.put(&[k1.key_ref(), k2.key_ref()], value)?;
            }
        }
        Ok(())
    }
}
