//! The generic N-dimensional store.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use smallvec::{smallvec, SmallVec};

use crate::error::MatrixError;
use crate::key::{Key, KeyRef};

/// Largest supported dimensionality.
pub const MAX_DIMENSIONS: usize = 3;

type DefaultFn<V> = dyn Fn(&[Key]) -> V + Send + Sync;

/// A dense key/value table over one to three categorical key domains.
///
/// # Invariants
///
/// - Every access supplies exactly [`num_dimensions`](Self::num_dimensions)
///   key components, each drawn from its dimension's domain.
/// - Every cell holds a value. Cells that were never written hold the
///   default computed for their tuple when the map was built.
/// - [`has`](Self::has) is true exactly for cells written through
///   [`put`](Self::put), [`get_mut`](Self::get_mut) or a bulk setter and
///   not since [`remove`](Self::remove)d.
///
/// # Ordering
///
/// Tuples are enumerated outer-to-inner: the first dimension varies
/// slowest, and each dimension follows its domain's insertion order.
pub struct MatrixMap<V> {
    dimensions: Vec<IndexSet<Key>>,
    strides: SmallVec<[usize; MAX_DIMENSIONS]>,
    cells: Vec<V>,
    populated: Vec<bool>,
    default: Arc<DefaultFn<V>>,
}

impl<V: Clone> Clone for MatrixMap<V> {
    fn clone(&self) -> Self {
        Self {
            dimensions: self.dimensions.clone(),
            strides: self.strides.clone(),
            cells: self.cells.clone(),
            populated: self.populated.clone(),
            default: Arc::clone(&self.default),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for MatrixMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixMap")
            .field("dimensions", &self.dimensions)
            .field("populated", &self.populated.iter().filter(|p| **p).count())
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

impl<V> MatrixMap<V> {
    /// Build a map over `dimensions`, filling every cell from `default`.
    ///
    /// Fails with [`MatrixError::InvalidDimensions`] unless there are one
    /// to three dimensions. A dimension with no keys gives a map with no
    /// cells, where every lookup is an unknown key.
    pub fn new<I, D, K, F>(dimensions: I, default: F) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = K>,
        K: Into<Key>,
        F: Fn(&[Key]) -> V + Send + Sync + 'static,
    {
        let dimensions: Vec<IndexSet<Key>> = dimensions
            .into_iter()
            .map(|d| d.into_iter().map(Into::into).collect())
            .collect();

        if dimensions.is_empty() || dimensions.len() > MAX_DIMENSIONS {
            return Err(MatrixError::InvalidDimensions {
                reason: format!(
                    "expected 1 to {MAX_DIMENSIONS} dimensions, got {}",
                    dimensions.len()
                ),
            });
        }
        // strides[i] = product(len(dimensions[j]) for j > i)
        let n = dimensions.len();
        let mut strides: SmallVec<[usize; MAX_DIMENSIONS]> = smallvec![1; n];
        for i in (0..n - 1).rev() {
            strides[i] = strides[i + 1]
                .checked_mul(dimensions[i + 1].len())
                .ok_or_else(|| MatrixError::InvalidDimensions {
                    reason: "cell count overflows usize".into(),
                })?;
        }
        let total = strides[0]
            .checked_mul(dimensions[0].len())
            .ok_or_else(|| MatrixError::InvalidDimensions {
                reason: "cell count overflows usize".into(),
            })?;

        let mut cells = Vec::with_capacity(total);
        for_each_tuple(&dimensions, |_, tuple| cells.push(default(tuple)));

        Ok(Self {
            dimensions,
            strides,
            cells,
            populated: vec![false; total],
            default: Arc::new(default),
        })
    }

    /// Number of key dimensions.
    pub fn num_dimensions(&self) -> usize {
        self.dimensions.len()
    }

    /// The key domains, outermost first.
    pub fn dimensions(&self) -> &[IndexSet<Key>] {
        &self.dimensions
    }

    /// Total number of cells (the product of the domain sizes).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether some dimension has no keys.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells that have been explicitly set.
    pub fn populated_len(&self) -> usize {
        self.populated.iter().filter(|p| **p).count()
    }

    fn offset(&self, keys: &[KeyRef<'_>]) -> Result<usize, MatrixError> {
        if keys.len() != self.dimensions.len() {
            return Err(MatrixError::Arity {
                expected: self.dimensions.len(),
                found: keys.len(),
            });
        }
        let mut offset = 0;
        for (dimension, (key, domain)) in keys.iter().zip(&self.dimensions).enumerate() {
            let index = domain
                .get_index_of(key)
                .ok_or_else(|| MatrixError::UnknownKey {
                    dimension,
                    key: key.to_key(),
                })?;
            offset += index * self.strides[dimension];
        }
        Ok(offset)
    }

    fn tuple_at(&self, offset: usize) -> Vec<Key> {
        self.dimensions
            .iter()
            .zip(&self.strides)
            .filter_map(|(domain, stride)| domain.get_index((offset / stride) % domain.len()))
            .cloned()
            .collect()
    }

    /// The value at `keys`: the stored value, or the construction default.
    pub fn get(&self, keys: &[KeyRef<'_>]) -> Result<&V, MatrixError> {
        let offset = self.offset(keys)?;
        Ok(&self.cells[offset])
    }

    /// Mutable access to the value at `keys`. The cell counts as set
    /// afterwards.
    pub fn get_mut(&mut self, keys: &[KeyRef<'_>]) -> Result<&mut V, MatrixError> {
        let offset = self.offset(keys)?;
        self.populated[offset] = true;
        Ok(&mut self.cells[offset])
    }

    /// Store `value` at `keys`, returning the previous value.
    pub fn put(&mut self, keys: &[KeyRef<'_>], value: V) -> Result<V, MatrixError> {
        let offset = self.offset(keys)?;
        self.populated[offset] = true;
        Ok(std::mem::replace(&mut self.cells[offset], value))
    }

    /// Reset the cell at `keys` to its default. Returns the removed value
    /// if the cell had been set.
    pub fn remove(&mut self, keys: &[KeyRef<'_>]) -> Result<Option<V>, MatrixError> {
        let offset = self.offset(keys)?;
        if !self.populated[offset] {
            return Ok(None);
        }
        let fresh = (self.default)(&self.tuple_at(offset));
        self.populated[offset] = false;
        Ok(Some(std::mem::replace(&mut self.cells[offset], fresh)))
    }

    /// Whether the cell at `keys` has been explicitly set.
    pub fn has(&self, keys: &[KeyRef<'_>]) -> Result<bool, MatrixError> {
        let offset = self.offset(keys)?;
        Ok(self.populated[offset])
    }

    /// Set every cell to `value`.
    pub fn set_all(&mut self, value: V)
    where
        V: Clone,
    {
        self.cells.fill(value);
        self.populated.fill(true);
    }

    /// Set every cell to `f(keys)`.
    pub fn set_all_with<F>(&mut self, mut f: F)
    where
        F: FnMut(&[Key]) -> V,
    {
        let cells = &mut self.cells;
        for_each_tuple(&self.dimensions, |offset, tuple| cells[offset] = f(tuple));
        self.populated.fill(true);
    }

    /// Whether `predicate` holds for every cell value, defaults included.
    pub fn all<F>(&self, predicate: F) -> bool
    where
        F: Fn(&V) -> bool,
    {
        self.cells.iter().all(predicate)
    }

    /// Whether `predicate` holds for any cell value, defaults included.
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&V) -> bool,
    {
        self.cells.iter().any(predicate)
    }

    /// Visit every key tuple, outer-to-inner.
    pub fn each_key<F>(&self, mut visitor: F)
    where
        F: FnMut(&[Key]),
    {
        for_each_tuple(&self.dimensions, |_, tuple| visitor(tuple));
    }

    /// Visit every key tuple with its value, outer-to-inner.
    pub fn each<F>(&self, mut visitor: F)
    where
        F: FnMut(&[Key], &V),
    {
        let cells = &self.cells;
        for_each_tuple(&self.dimensions, |offset, tuple| visitor(tuple, &cells[offset]));
    }
}

/// Walk every tuple in mixed-radix order, the last dimension fastest.
fn for_each_tuple<F>(dimensions: &[IndexSet<Key>], mut f: F)
where
    F: FnMut(usize, &[Key]),
{
    let n = dimensions.len();
    if n == 0 || dimensions.iter().any(IndexSet::is_empty) {
        return;
    }
    let mut counters: SmallVec<[usize; MAX_DIMENSIONS]> = smallvec![0; n];
    let mut tuple: Vec<Key> = dimensions
        .iter()
        .filter_map(|d| d.get_index(0).cloned())
        .collect();
    let mut offset = 0;
    loop {
        f(offset, &tuple);
        offset += 1;

        // Advance odometer (rightmost = fastest).
        let mut carry = true;
        for i in (0..n).rev() {
            if !carry {
                break;
            }
            counters[i] += 1;
            if counters[i] < dimensions[i].len() {
                carry = false;
            } else {
                counters[i] = 0;
            }
            if let Some(key) = dimensions[i].get_index(counters[i]) {
                tuple[i] = key.clone();
            }
        }
        if carry {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone_species() -> MatrixMap<f32> {
        MatrixMap::new(vec![vec!["CWH", "IDF"], vec!["AC", "AT", "B"]], |_| 0.0).unwrap()
    }

    #[test]
    fn dimensions_reported() {
        let map = zone_species();
        assert_eq!(map.num_dimensions(), 2);
        assert_eq!(map.len(), 6);
        assert_eq!(map.dimensions()[1].len(), 3);
    }

    #[test]
    fn rejects_bad_dimension_lists() {
        let none: Vec<Vec<&str>> = vec![];
        assert!(matches!(
            MatrixMap::new(none, |_| 0),
            Err(MatrixError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            MatrixMap::new(vec![vec!["A"]; 4], |_| 0),
            Err(MatrixError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn empty_domain_gives_no_cells() {
        let map = MatrixMap::new(vec![vec![], vec!["C", "I"]], |_| 0).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.num_dimensions(), 2);
        assert!(map.all(|v| *v == 1));

        let mut visited = 0;
        map.each_key(|_| visited += 1);
        assert_eq!(visited, 0);
        assert!(matches!(
            map.get(&["R".into(), "C".into()]),
            Err(MatrixError::UnknownKey { dimension: 0, .. })
        ));
    }

    #[test]
    fn arity_checked() {
        let mut map = zone_species();
        assert_eq!(
            map.get(&["CWH".into()]).unwrap_err(),
            MatrixError::Arity {
                expected: 2,
                found: 1
            }
        );
        assert!(matches!(
            map.put(&["CWH".into(), "AC".into(), "X".into()], 1.0),
            Err(MatrixError::Arity { found: 3, .. })
        ));
    }

    #[test]
    fn unknown_key_names_dimension() {
        let map = zone_species();
        assert_eq!(
            map.get(&["CWH".into(), "PL".into()]).unwrap_err(),
            MatrixError::UnknownKey {
                dimension: 1,
                key: Key::from("PL")
            }
        );
    }

    #[test]
    fn default_function_sees_tuple() {
        let map = MatrixMap::new(vec![vec!["CWH", "IDF"], vec!["AC", "AT"]], |keys| {
            format!("{}/{}", keys[0], keys[1])
        })
        .unwrap();
        assert_eq!(map.get(&["IDF".into(), "AT".into()]).unwrap(), "\"IDF\"/\"AT\"");
    }

    #[test]
    fn put_get_has_remove() {
        let mut map = zone_species();
        let k: [KeyRef<'_>; 2] = ["IDF".into(), "B".into()];
        assert!(!map.has(&k).unwrap());
        assert_eq!(map.put(&k, 3.5).unwrap(), 0.0);
        assert!(map.has(&k).unwrap());
        assert_eq!(*map.get(&k).unwrap(), 3.5);
        assert_eq!(map.remove(&k).unwrap(), Some(3.5));
        assert!(!map.has(&k).unwrap());
        assert_eq!(*map.get(&k).unwrap(), 0.0);
        assert_eq!(map.remove(&k).unwrap(), None);
    }

    #[test]
    fn get_mut_marks_populated() {
        let mut map = zone_species();
        *map.get_mut(&["CWH".into(), "AT".into()]).unwrap() += 2.0;
        assert!(map.has(&["CWH".into(), "AT".into()]).unwrap());
        assert_eq!(map.populated_len(), 1);
    }

    #[test]
    fn set_all_and_predicates() {
        let mut map = zone_species();
        assert!(map.all(|v| *v == 0.0));
        assert!(!map.any(|v| *v > 0.0));
        map.set_all(1.0);
        assert!(map.all(|v| *v == 1.0));
        assert_eq!(map.populated_len(), 6);
        map.set_all_with(|keys| if keys[1] == Key::from("B") { 2.0 } else { 1.0 });
        assert!(map.any(|v| *v == 2.0));
        assert_eq!(*map.get(&["CWH".into(), "B".into()]).unwrap(), 2.0);
    }

    #[test]
    fn each_key_is_outer_to_inner() {
        let map = zone_species();
        let mut seen = Vec::new();
        map.each_key(|keys| seen.push(format!("{}{}", keys[0], keys[1])));
        assert_eq!(
            seen,
            vec![
                "\"CWH\"\"AC\"",
                "\"CWH\"\"AT\"",
                "\"CWH\"\"B\"",
                "\"IDF\"\"AC\"",
                "\"IDF\"\"AT\"",
                "\"IDF\"\"B\""
            ]
        );
    }

    #[test]
    fn each_pairs_values_with_tuples() {
        let mut map = zone_species();
        map.put(&["IDF".into(), "AC".into()], 9.0).unwrap();
        let mut hits = Vec::new();
        map.each(|keys, v| {
            if *v > 0.0 {
                hits.push(keys.to_vec());
            }
        });
        assert_eq!(hits, vec![vec![Key::from("IDF"), Key::from("AC")]]);
    }

    #[test]
    fn clone_is_independent() {
        let mut map = zone_species();
        let snapshot = map.clone();
        map.put(&["CWH".into(), "AC".into()], 5.0).unwrap();
        assert_eq!(*snapshot.get(&["CWH".into(), "AC".into()]).unwrap(), 0.0);
    }
}
