//! Property tests for store shape, defaults and enumeration order.

use grove_matrix::{Key, KeyRef, MatrixError, MatrixMap, MatrixMap2, MatrixMap3};
use proptest::prelude::*;

fn domain(prefix: &'static str, len: usize) -> Vec<String> {
    (0..len).map(|i| format!("{prefix}{i}")).collect()
}

fn dims_strategy() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(1usize..5, 1..=3)
}

fn build(lens: &[usize]) -> MatrixMap<i64> {
    let dims: Vec<Vec<String>> = lens
        .iter()
        .enumerate()
        .map(|(d, len)| domain(["a", "b", "c"][d], *len))
        .collect();
    // Default encodes the tuple so it can be checked later.
    MatrixMap::new(dims, |keys| {
        keys.iter()
            .map(|k| match k {
                Key::Str(s) => s[1..].parse::<i64>().unwrap_or(0),
                _ => 0,
            })
            .fold(0, |acc, i| acc * 10 + i)
    })
    .unwrap()
}

fn tuple(lens: &[usize], picks: &[usize]) -> Vec<String> {
    lens.iter()
        .zip(picks)
        .enumerate()
        .map(|(d, (len, pick))| format!("{}{}", ["a", "b", "c"][d], pick % len))
        .collect()
}

proptest! {
    #[test]
    fn arity_must_match(lens in dims_strategy(), extra in 0usize..2) {
        let map = build(&lens);
        prop_assert_eq!(map.num_dimensions(), lens.len());

        let good = tuple(&lens, &[0, 0, 0]);
        let refs: Vec<KeyRef<'_>> = good.iter().map(|s| KeyRef::Str(s)).collect();
        prop_assert!(map.get(&refs).is_ok());

        let mut wrong = refs.clone();
        if extra == 0 {
            wrong.pop();
        } else {
            wrong.push(KeyRef::Str("zz"));
        }
        let is_arity_error = matches!(map.get(&wrong), Err(MatrixError::Arity { .. }));
        prop_assert!(is_arity_error);
    }

    #[test]
    fn default_until_put(lens in dims_strategy(), picks in proptest::collection::vec(0usize..5, 3), v in any::<i64>()) {
        let mut map = build(&lens);
        let keys = tuple(&lens, &picks);
        let refs: Vec<KeyRef<'_>> = keys.iter().map(|s| KeyRef::Str(s)).collect();

        let expected_default = keys
            .iter()
            .map(|k| k[1..].parse::<i64>().unwrap())
            .fold(0, |acc, i| acc * 10 + i);
        prop_assert_eq!(*map.get(&refs).unwrap(), expected_default);
        prop_assert!(!map.has(&refs).unwrap());

        map.put(&refs, v).unwrap();
        prop_assert_eq!(*map.get(&refs).unwrap(), v);
        prop_assert!(map.has(&refs).unwrap());

        map.remove(&refs).unwrap();
        prop_assert_eq!(*map.get(&refs).unwrap(), expected_default);
        prop_assert!(!map.has(&refs).unwrap());
    }

    #[test]
    fn each_key_visits_product_in_order(lens in dims_strategy()) {
        let map = build(&lens);
        let mut seen: Vec<Vec<Key>> = Vec::new();
        map.each_key(|keys| seen.push(keys.to_vec()));

        prop_assert_eq!(seen.len(), lens.iter().product::<usize>());
        // Outer-to-inner order means tuples are lexicographic in domain position.
        let positions: Vec<Vec<usize>> = seen
            .iter()
            .map(|t| {
                t.iter()
                    .zip(map.dimensions())
                    .map(|(k, d)| d.get_index_of(k).unwrap())
                    .collect()
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        prop_assert_eq!(positions, sorted);
    }
}

#[test]
fn two_d_store_as_two_d_view_keeps_cells() {
    let mut map = MatrixMap::new(vec![vec!["CWH", "IDF", "MH"], vec!["AC", "PL"]], |_| -1.0).unwrap();
    map.put(&["MH".into(), "PL".into()], 3.0).unwrap();
    map.put(&["CWH".into(), "AC".into()], 1.0).unwrap();
    let before = map.clone();

    let view = MatrixMap2::<String, String, f32>::cast(map).unwrap();
    before.each(|keys, v| {
        let (Key::Str(zone), Key::Str(species)) = (&keys[0], &keys[1]) else {
            panic!("unexpected key kinds: {keys:?}");
        };
        assert_eq!(view.get(zone, species).unwrap(), v);
    });
}

#[test]
fn two_d_store_as_three_d_view_fails() {
    let map = MatrixMap::new(vec![vec!["CWH"], vec!["AC"]], |_| 0.0f32).unwrap();
    let err = MatrixMap3::<String, String, String, f32>::cast(map).unwrap_err();
    assert_eq!(
        err,
        MatrixError::ShapeMismatch {
            expected: 3,
            found: 2
        }
    );
}
