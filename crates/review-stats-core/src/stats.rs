// Aggregation primitives shared by the queries: grade averages and
// group-by-key counting over one pass of the review set.

use review_stats_models::{MovieId, Review};
use std::collections::BTreeMap;

/// Running count and sum of grades for one key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeTally {
    pub count: usize,
    pub sum: i64,
}

impl GradeTally {
    pub fn add(&mut self, grade: i32) {
        self.count += 1;
        self.sum += i64::from(grade);
    }

    /// `None` for an empty tally
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum as f64 / self.count as f64)
        }
    }
}

/// Mean grade of the given reviews, `None` when there are none
pub fn average_grade<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Option<f64> {
    let mut tally = GradeTally::default();
    for review in reviews {
        tally.add(review.grade);
    }
    tally.average()
}

/// Count reviews per key. `BTreeMap` keeps key order deterministic.
pub fn count_by_key<'a, K, F>(reviews: impl IntoIterator<Item = &'a Review>, key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&Review) -> K,
{
    let mut counts = BTreeMap::new();
    for review in reviews {
        *counts.entry(key(review)).or_insert(0) += 1;
    }
    counts
}

/// Every key whose count equals the maximum, in ascending key order.
/// Empty input gives an empty result.
pub fn keys_with_max_count<K: Ord + Copy>(counts: &BTreeMap<K, usize>) -> Vec<K> {
    let Some(max) = counts.values().copied().max() else {
        return Vec::new();
    };
    counts
        .iter()
        .filter(|(_, count)| **count == max)
        .map(|(key, _)| *key)
        .collect()
}

/// Average grade per movie, keyed by movie id
pub fn movie_averages(reviews: &[Review]) -> BTreeMap<MovieId, f64> {
    let mut tallies: BTreeMap<MovieId, GradeTally> = BTreeMap::new();
    for review in reviews {
        tallies.entry(review.movie).or_default().add(review.grade);
    }
    tallies
        .into_iter()
        .filter_map(|(movie, tally)| tally.average().map(|avg| (movie, avg)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_review(reviewer: i32, movie: i32, grade: i32) -> Review {
        Review::new(reviewer, movie, grade, Utc::now())
    }

    #[test]
    fn test_average_grade() {
        let reviews = vec![create_review(1, 1, 3), create_review(1, 2, 4)];
        assert_eq!(average_grade(&reviews), Some(3.5));
        assert_eq!(average_grade(&Vec::new()), None);
    }

    #[test]
    fn test_grade_tally() {
        let mut tally = GradeTally::default();
        assert_eq!(tally.average(), None);
        tally.add(5);
        tally.add(2);
        tally.add(2);
        assert_eq!(tally.count, 3);
        assert_eq!(tally.sum, 9);
        assert_eq!(tally.average(), Some(3.0));
    }

    #[test]
    fn test_count_by_key() {
        let reviews = vec![create_review(1, 7, 3), create_review(2, 7, 4), create_review(1, 8, 5)];
        let by_reviewer = count_by_key(&reviews, |r| r.reviewer);
        assert_eq!(by_reviewer.get(&1), Some(&2));
        assert_eq!(by_reviewer.get(&2), Some(&1));
    }

    #[test]
    fn test_keys_with_max_count_returns_all_ties() {
        let counts: BTreeMap<i32, usize> = [(4, 2), (1, 1), (2, 2)].into_iter().collect();
        assert_eq!(keys_with_max_count(&counts), vec![2, 4]);
        assert!(keys_with_max_count::<i32>(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_movie_averages() {
        let reviews = vec![create_review(1, 2, 1), create_review(2, 2, 4), create_review(3, 9, 5)];
        let averages = movie_averages(&reviews);
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[&2], 2.5);
        assert_eq!(averages[&9], 5.0);
    }
}
