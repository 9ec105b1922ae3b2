//! Fixed-length coefficient vectors with a configurable lower index.

use std::ops::{Index, IndexMut};

use crate::error::CoefficientError;
use crate::MISSING_FLOAT;

/// An ordered, fixed-length run of `f32` values addressed by a signed
/// index starting at `index_from`.
///
/// Source tables are authored with 1-based or (-1)-based indices, so
/// the lower bound travels with the values instead of being translated
/// at every call site. Checked access goes through [`get`](Self::get)
/// and [`set`](Self::set); the `Index` impls panic on a bad index and
/// are meant for code that has already validated its bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Coefficients {
    values: Vec<f32>,
    index_from: i32,
}

impl Coefficients {
    /// Wrap existing values, the first of which has index `index_from`.
    pub fn new(values: Vec<f32>, index_from: i32) -> Self {
        Self { values, index_from }
    }

    /// `len` zeros starting at `index_from`.
    pub fn empty(len: usize, index_from: i32) -> Self {
        Self::new(vec![0.0; len], index_from)
    }

    /// `len` copies of [`MISSING_FLOAT`] starting at `index_from`.
    pub fn missing(len: usize, index_from: i32) -> Self {
        Self::new(vec![MISSING_FLOAT; len], index_from)
    }

    /// A per-utilization-class vector: small, all, then the four bands.
    pub fn utilization(values: [f32; 6]) -> Self {
        Self::new(values.to_vec(), -1)
    }

    /// A Lorey height pair: small, then all.
    pub fn lorey_height(small: f32, all: f32) -> Self {
        Self::new(vec![small, all], -1)
    }

    /// Lowest valid index.
    pub fn index_from(&self) -> i32 {
        self.index_from
    }

    /// Highest valid index (inclusive).
    pub fn index_to(&self) -> i32 {
        self.index_from + self.values.len() as i32 - 1
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no values at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The values in index order.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Iterate `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f32)> + '_ {
        let from = self.index_from;
        self.values
            .iter()
            .enumerate()
            .map(move |(i, v)| (from + i as i32, *v))
    }

    /// Value at `index`.
    pub fn get(&self, index: i32) -> Result<f32, CoefficientError> {
        let slot = self.offset(index)?;
        Ok(self.values[slot])
    }

    /// Mutable reference to the value at `index`.
    pub fn get_mut(&mut self, index: i32) -> Result<&mut f32, CoefficientError> {
        let slot = self.offset(index)?;
        Ok(&mut self.values[slot])
    }

    /// Overwrite the value at `index`.
    pub fn set(&mut self, index: i32, value: f32) -> Result<(), CoefficientError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Whether `index` addresses a value.
    pub fn contains_index(&self, index: i32) -> bool {
        self.offset(index).is_ok()
    }

    fn offset(&self, index: i32) -> Result<usize, CoefficientError> {
        let slot = i64::from(index) - i64::from(self.index_from);
        if slot < 0 || slot >= self.values.len() as i64 {
            return Err(CoefficientError::IndexOutOfRange {
                index,
                from: self.index_from,
                to: self.index_to(),
            });
        }
        Ok(slot as usize)
    }
}

impl Index<i32> for Coefficients {
    type Output = f32;

    fn index(&self, index: i32) -> &f32 {
        match self.offset(index) {
            Ok(slot) => &self.values[slot],
            Err(e) => panic!("{e}"),
        }
    }
}

impl IndexMut<i32> for Coefficients {
    fn index_mut(&mut self, index: i32) -> &mut f32 {
        match self.offset(index) {
            Ok(slot) => &mut self.values[slot],
            Err(e) => panic!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn one_based_vector_addresses_from_one() {
        let c = Coefficients::new(vec![1.0, 2.0, 3.0], 1);
        assert_eq!(c.get(1), Ok(1.0));
        assert_eq!(c.get(3), Ok(3.0));
        assert_eq!(c.index_to(), 3);
        assert_eq!(
            c.get(0),
            Err(CoefficientError::IndexOutOfRange {
                index: 0,
                from: 1,
                to: 3
            })
        );
    }

    #[test]
    fn utilization_vector_starts_at_minus_one() {
        let c = Coefficients::utilization([0.5, 10.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(c[-1], 0.5);
        assert_eq!(c[0], 10.0);
        assert_eq!(c[4], 4.0);
        assert!(!c.contains_index(5));
    }

    #[test]
    fn set_writes_through_offset() {
        let mut c = Coefficients::empty(4, 0);
        c.set(2, 7.5).unwrap();
        c[3] = 1.25;
        assert_eq!(c.as_slice(), &[0.0, 0.0, 7.5, 1.25]);
        assert!(c.set(4, 1.0).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_panics_out_of_range() {
        let c = Coefficients::lorey_height(1.0, 2.0);
        let _ = c[1];
    }

    proptest! {
        #[test]
        fn iter_indices_span_declared_range(
            values in proptest::collection::vec(-100.0f32..100.0, 1..16),
            from in -2i32..3,
        ) {
            let c = Coefficients::new(values.clone(), from);
            let indices: Vec<i32> = c.iter().map(|(i, _)| i).collect();
            prop_assert_eq!(indices.first().copied(), Some(from));
            prop_assert_eq!(indices.last().copied(), Some(c.index_to()));
            for (i, v) in c.iter() {
                prop_assert_eq!(c.get(i), Ok(v));
            }
        }
    }
}
