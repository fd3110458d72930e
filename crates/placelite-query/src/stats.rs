//! Small numeric helpers shared by the criteria compiler and the
//! insight queries.

use std::cmp::Ordering;

/// Round to one decimal place. Used for rates and score averages.
pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Round to a whole number. Used for package averages.
pub(crate) fn round0(v: f64) -> f64 {
    v.round()
}

/// Mean of an iterator of values; `None` when the iterator is empty.
pub(crate) fn mean<I>(iter: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in iter {
        sum += v;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// `part` as a percentage of `whole`; 0.0 when `whole` is zero.
pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Descending comparison of floats, treating incomparable values as equal.
pub(crate) fn cmp_f64_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Descending comparison of optional values, absent values sorting last.
pub(crate) fn cmp_opt_desc<T: PartialOrd>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round1() {
        assert_eq!(round1(76.6666), 76.7);
        assert_eq!(round1(50.04), 50.0);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([80.0, 90.0, 100.0]), Some(90.0));
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(3, 0), 0.0);
    }

    #[test]
    fn test_cmp_opt_desc_absent_last() {
        assert_eq!(cmp_opt_desc(&Some(5), &None), Ordering::Less);
        assert_eq!(cmp_opt_desc(&None, &Some(5)), Ordering::Greater);
        assert_eq!(cmp_opt_desc(&Some(3), &Some(9)), Ordering::Greater);
    }
}
