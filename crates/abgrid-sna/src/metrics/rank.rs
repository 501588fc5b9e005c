//! Dense descending ranks.
//!
//! The highest value gets rank 1, tied values share a rank and the next
//! distinct value gets the next integer: `[0.9, 0.5, 0.5, 0.1]` ranks as
//! `[1, 2, 2, 3]`. Callers round values before ranking so that differences
//! below the reported precision do not split ties.

use std::collections::HashMap;

/// Dense rank of every key, 1 = highest value.
#[must_use]
pub fn dense_rank(values: &HashMap<String, f64>) -> HashMap<String, u32> {
    let mut distinct: Vec<f64> = values.values().copied().collect();
    distinct.sort_by(|a, b| b.total_cmp(a));
    distinct.dedup_by(|a, b| a.total_cmp(b).is_eq());

    values
        .iter()
        .map(|(label, value)| {
            let pos = distinct
                .binary_search_by(|d| value.total_cmp(d))
                .unwrap_or_else(|insert_at| insert_at);
            (label.clone(), u32::try_from(pos + 1).unwrap_or(u32::MAX))
        })
        .collect()
}

/// `(label, rank)` pairs ordered by rank, ties broken by label.
#[must_use]
pub fn rankings<'a>(ranks: impl IntoIterator<Item = (&'a str, u32)>) -> Vec<(String, u32)> {
    let mut ordered: Vec<(String, u32)> = ranks
        .into_iter()
        .map(|(label, rank)| (label.to_string(), rank))
        .collect();
    ordered.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(l, v)| ((*l).to_string(), *v)).collect()
    }

    #[test]
    fn ties_share_rank_without_gaps() {
        let ranks = dense_rank(&scores(&[("A", 0.9), ("B", 0.5), ("C", 0.5), ("D", 0.1)]));
        assert_eq!(ranks["A"], 1);
        assert_eq!(ranks["B"], 2);
        assert_eq!(ranks["C"], 2);
        assert_eq!(ranks["D"], 3);
    }

    #[test]
    fn all_equal_is_rank_one() {
        let ranks = dense_rank(&scores(&[("A", 0.0), ("B", 0.0), ("C", 0.0)]));
        assert!(ranks.values().all(|&r| r == 1));
    }

    #[test]
    fn empty_input() {
        assert!(dense_rank(&HashMap::new()).is_empty());
    }

    #[test]
    fn rankings_order_by_rank_then_label() {
        let ranks = dense_rank(&scores(&[("C", 0.5), ("A", 0.1), ("B", 0.5), ("D", 0.7)]));
        let ordered = rankings(ranks.iter().map(|(l, r)| (l.as_str(), *r)));
        assert_eq!(
            ordered,
            vec![
                ("D".to_string(), 1),
                ("B".to_string(), 2),
                ("C".to_string(), 2),
                ("A".to_string(), 3),
            ]
        );
    }
}
