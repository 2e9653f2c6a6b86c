//! Grouping and aggregation helpers over table columns.

use indexmap::IndexMap;

use crate::input::Value;

/// Frequency of each distinct non-missing category, most frequent first.
///
/// Ties keep the order in which categories were first seen.
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a Value>) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for key in values.into_iter().filter_map(Value::as_category) {
        *counts.entry(key).or_insert(0) += 1;
    }
    // IndexMap::sort_by is stable
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts
}

/// Mean of the non-missing numbers, `None` when there are none.
pub fn mean<'a>(values: impl IntoIterator<Item = &'a Value>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .filter_map(Value::as_number)
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Mean of `values` grouped by `keys`, in first-seen key order.
///
/// Rows with a missing key are ignored. A group whose values are all missing
/// maps to `None`.
pub fn group_mean<'a>(
    keys: impl IntoIterator<Item = &'a Value>,
    values: impl IntoIterator<Item = &'a Value>,
) -> IndexMap<String, Option<f64>> {
    let mut groups: IndexMap<String, (f64, usize)> = IndexMap::new();
    for (key, value) in keys.into_iter().zip(values) {
        let Some(key) = key.as_category() else {
            continue;
        };
        let acc = groups.entry(key).or_insert((0.0, 0));
        if let Some(v) = value.as_number() {
            acc.0 += v;
            acc.1 += 1;
        }
    }
    groups
        .into_iter()
        .map(|(key, (sum, n))| (key, (n > 0).then(|| sum / n as f64)))
        .collect()
}

/// Sum of `values` grouped by `keys`, in first-seen key order.
///
/// Missing values add nothing, so an all-missing group sums to zero.
pub fn group_sum<'a>(
    keys: impl IntoIterator<Item = &'a Value>,
    values: impl IntoIterator<Item = &'a Value>,
) -> IndexMap<String, f64> {
    let mut groups: IndexMap<String, f64> = IndexMap::new();
    for (key, value) in keys.into_iter().zip(values) {
        let Some(key) = key.as_category() else {
            continue;
        };
        *groups.entry(key).or_insert(0.0) += value.as_number().unwrap_or(0.0);
    }
    groups
}

/// Indices of rows whose number is strictly below `cutoff`. Missing never qualifies.
pub fn rows_below<'a>(values: impl IntoIterator<Item = &'a Value>, cutoff: f64) -> Vec<usize> {
    values
        .into_iter()
        .enumerate()
        .filter(|(_, v)| v.as_number().is_some_and(|n| n < cutoff))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(values: &[&str]) -> Vec<Value> {
        values.iter().map(|v| Value::from_raw(v)).collect()
    }

    fn numbers(values: &[Option<f64>]) -> Vec<Value> {
        values
            .iter()
            .map(|v| v.map_or(Value::Missing, Value::Number))
            .collect()
    }

    #[test]
    fn test_value_counts_orders_by_frequency_then_first_seen() {
        let values = texts(&["b", "a", "c", "a", "", "c"]);
        let counts = value_counts(&values);
        let ordered: Vec<_> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(ordered, vec![("a", 2), ("c", 2), ("b", 1)]);
    }

    #[test]
    fn test_mean_excludes_missing() {
        assert_eq!(mean(&numbers(&[Some(1.0), None, Some(3.0)])), Some(2.0));
        assert_eq!(mean(&numbers(&[None, None])), None);
        assert_eq!(mean(&numbers(&[])), None);
    }

    #[test]
    fn test_group_mean_all_missing_group() {
        let keys = texts(&["flu", "flu", "cold", ""]);
        let values = numbers(&[Some(3.0), Some(5.0), None, Some(9.0)]);
        let means = group_mean(&keys, &values);
        assert_eq!(means.get("flu"), Some(&Some(4.0)));
        assert_eq!(means.get("cold"), Some(&None));
        assert_eq!(means.len(), 2);
    }

    #[test]
    fn test_group_sum_missing_contributes_zero() {
        let keys = texts(&["ER", "ICU", "ER"]);
        let values = numbers(&[Some(10.0), None, Some(5.0)]);
        let sums = group_sum(&keys, &values);
        assert_eq!(sums.get("ER"), Some(&15.0));
        assert_eq!(sums.get("ICU"), Some(&0.0));
    }

    #[test]
    fn test_rows_below_is_strict() {
        let values = numbers(&[Some(0.95), Some(0.85), Some(0.9), None]);
        assert_eq!(rows_below(&values, 0.9), vec![1]);
    }
}
