// Query engine over the review set supplied by a ReviewSource.
// Every query fetches one snapshot (unless its arguments are rejected first)
// and computes its answer in memory from that snapshot alone.

use review_stats_models::{MovieId, Review, ReviewerId};
use review_stats_sources::ReviewSource;
use std::cmp::Ordering;
use tracing::debug;

use crate::error::{
    ReviewStatsError, Result, AMOUNT_EXCEEDS_REVIEWS, MISSING_REPOSITORY, MOVIE_EXCEEDS_REVIEWS, MOVIE_NOT_FOUND,
    REVIEWER_EXCEEDS_REVIEWS, REVIEWER_NOT_FOUND,
};
use crate::stats::{average_grade, count_by_key, keys_with_max_count, movie_averages};
use crate::validation::{ensure_amount, ensure_movie, ensure_rate, ensure_reviewer, within_review_count};


pub struct ReviewService<S> {
    source: S,
}

impl<S: ReviewSource> ReviewService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fails with `InvalidArgument` when no source is supplied
    pub fn try_new(source: Option<S>) -> Result<Self> {
        source
            .map(Self::new)
            .ok_or_else(|| ReviewStatsError::invalid_argument(MISSING_REPOSITORY))
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn fetch_reviews(&self) -> Result<Vec<Review>> {
        let reviews = self.source.get_all_reviews()?;
        debug!(source = self.source.source_name(), count = reviews.len(), "Fetched review snapshot");
        Ok(reviews)
    }

    /// Number of reviews written by `reviewer`; 0 when there are none
    pub fn count_reviews_by_reviewer(&self, reviewer: ReviewerId) -> Result<usize> {
        let reviews = self.fetch_reviews()?;
        Ok(reviews.iter().filter(|r| r.reviewer == reviewer).count())
    }

    pub fn average_grade_by_reviewer(&self, reviewer: ReviewerId) -> Result<f64> {
        let reviews = self.fetch_reviews()?;
        average_grade(reviews.iter().filter(|r| r.reviewer == reviewer))
            .ok_or_else(|| ReviewStatsError::not_found(REVIEWER_NOT_FOUND))
    }

    /// Number of reviews by `reviewer` graded exactly `rate`
    pub fn count_rates_by_reviewer(&self, reviewer: ReviewerId, rate: i32) -> Result<usize> {
        ensure_reviewer(reviewer)?;
        ensure_rate(rate)?;

        let reviews = self.fetch_reviews()?;
        Ok(reviews
            .iter()
            .filter(|r| r.reviewer == reviewer && r.grade == rate)
            .count())
    }

    pub fn count_reviews_of_movie(&self, movie: MovieId) -> Result<usize> {
        let reviews = self.fetch_reviews()?;
        match reviews.iter().filter(|r| r.movie == movie).count() {
            0 => Err(ReviewStatsError::not_found(MOVIE_NOT_FOUND)),
            count => Ok(count),
        }
    }

    pub fn average_grade_of_movie(&self, movie: MovieId) -> Result<f64> {
        ensure_movie(movie)?;

        let reviews = self.fetch_reviews()?;
        average_grade(reviews.iter().filter(|r| r.movie == movie))
            .ok_or_else(|| ReviewStatsError::not_found(MOVIE_NOT_FOUND))
    }

    /// Number of reviews of `movie` graded exactly `rate`
    pub fn count_rates_of_movie(&self, movie: MovieId, rate: i32) -> Result<usize> {
        ensure_rate(rate)?;

        let reviews = self.fetch_reviews()?;
        let mut matched = reviews.iter().filter(|r| r.movie == movie).peekable();
        if matched.peek().is_none() {
            return Err(ReviewStatsError::not_found(MOVIE_NOT_FOUND));
        }
        Ok(matched.filter(|r| r.grade == rate).count())
    }

    /// Movies with the most top-rate (grade 5) reviews. All tied movies are
    /// returned, in ascending movie id order.
    pub fn movies_with_most_top_rates(&self) -> Result<Vec<MovieId>> {
        let reviews = self.fetch_reviews()?;
        let counts = count_by_key(reviews.iter().filter(|r| r.is_top_rate()), |r| r.movie);
        Ok(keys_with_max_count(&counts))
    }

    /// Reviewers with the most reviews of any grade. All tied reviewers are
    /// returned, in ascending reviewer id order.
    pub fn most_productive_reviewers(&self) -> Result<Vec<ReviewerId>> {
        let reviews = self.fetch_reviews()?;
        let counts = count_by_key(&reviews, |r| r.reviewer);
        Ok(keys_with_max_count(&counts))
    }

    /// The first `amount` movies ordered ascending by average grade.
    ///
    /// `amount` is bounded by the number of review records, not by the number
    /// of distinct movies, so a feasible amount may still return fewer movies.
    /// Movies with equal averages stay in ascending id order.
    pub fn top_rated_movies(&self, amount: i32) -> Result<Vec<MovieId>> {
        ensure_amount(amount)?;

        let reviews = self.fetch_reviews()?;
        if !within_review_count(amount, reviews.len()) {
            return Err(ReviewStatsError::not_found(AMOUNT_EXCEEDS_REVIEWS));
        }

        let mut ranked: Vec<(MovieId, f64)> = movie_averages(&reviews).into_iter().collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

        debug!(amount, movies = ranked.len(), "Ranked movies by average grade");
        Ok(ranked
            .into_iter()
            .take(amount as usize)
            .map(|(movie, _)| movie)
            .collect())
    }

    /// Movies reviewed by `reviewer`, newest review first; reviews on the same
    /// date are ordered by ascending grade.
    ///
    /// `reviewer` must not exceed the number of reviews in the snapshot.
    pub fn movies_reviewed_by_reviewer(&self, reviewer: ReviewerId) -> Result<Vec<MovieId>> {
        ensure_reviewer(reviewer)?;

        let reviews = self.fetch_reviews()?;
        if !within_review_count(reviewer, reviews.len()) {
            return Err(ReviewStatsError::invalid_argument(REVIEWER_EXCEEDS_REVIEWS));
        }

        let mut matched: Vec<&Review> = reviews.iter().filter(|r| r.reviewer == reviewer).collect();
        matched.sort_by(|a, b| newest_first(a, b).then(a.grade.cmp(&b.grade)));
        Ok(matched.into_iter().map(|r| r.movie).collect())
    }

    /// Reviewers of `movie`, highest grade first; equal grades are ordered
    /// newest review first.
    ///
    /// `movie` must not exceed the number of reviews in the snapshot.
    pub fn reviewers_of_movie(&self, movie: MovieId) -> Result<Vec<ReviewerId>> {
        ensure_movie(movie)?;

        let reviews = self.fetch_reviews()?;
        if !within_review_count(movie, reviews.len()) {
            return Err(ReviewStatsError::invalid_argument(MOVIE_EXCEEDS_REVIEWS));
        }

        let mut matched: Vec<&Review> = reviews.iter().filter(|r| r.movie == movie).collect();
        matched.sort_by(|a, b| b.grade.cmp(&a.grade).then_with(|| newest_first(a, b)));
        Ok(matched.into_iter().map(|r| r.reviewer).collect())
    }
}

fn newest_first(a: &Review, b: &Review) -> Ordering {
    b.review_date.cmp(&a.review_date)
}
