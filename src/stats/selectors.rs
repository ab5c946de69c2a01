use std::cmp::Ordering;

use crate::movies::model::Movie;
use crate::stats::ratings::club_average;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Era {
    Oldest,
    Newest,
}

/// First `n` movies ordered by `key`. Movies whose key is missing or zero
/// are left out; equal keys keep their collection order.
pub fn ranked<'a, F>(movies: &'a [Movie], n: usize, key: F, order: Order) -> Vec<&'a Movie>
where
    F: Fn(&Movie) -> Option<f64>,
{
    let mut keyed: Vec<(f64, &Movie)> = movies
        .iter()
        .filter_map(|movie| key(movie).filter(|k| *k != 0.).map(|k| (k, movie)))
        .collect();

    // `sort_by` is stable.
    keyed.sort_by(|(a, _), (b, _)| match order {
        Order::Ascending => a.total_cmp(b),
        Order::Descending => b.total_cmp(a),
    });

    keyed.into_iter().take(n).map(|(_, movie)| movie).collect()
}

pub fn top_rated(movies: &[Movie], n: usize) -> Vec<&Movie> {
    ranked(movies, n, club_average, Order::Descending)
}

pub fn lowest_rated(movies: &[Movie], n: usize) -> Vec<&Movie> {
    ranked(movies, n, club_average, Order::Ascending)
}

pub fn total_runtime(movies: &[Movie]) -> u64 {
    movies.iter().map(|movie| u64::from(movie.runtime)).sum()
}

/// Reduces to the movie that `wins` over every other; a later movie only
/// replaces the current pick when it is strictly better.
fn extreme_by<K, F>(movies: &[Movie], key: F, wins: Ordering) -> Option<&Movie>
where
    K: Ord,
    F: Fn(&Movie) -> K,
{
    movies
        .iter()
        .reduce(|best, movie| if key(movie).cmp(&key(best)) == wins { movie } else { best })
}

pub fn extreme_by_runtime(movies: &[Movie], extreme: Extreme) -> Option<&Movie> {
    let wins = match extreme {
        Extreme::Min => Ordering::Less,
        Extreme::Max => Ordering::Greater,
    };
    extreme_by(movies, |movie| movie.runtime, wins)
}

pub fn extreme_by_year(movies: &[Movie], era: Era) -> Option<&Movie> {
    let wins = match era {
        Era::Oldest => Ordering::Less,
        Era::Newest => Ordering::Greater,
    };
    extreme_by(movies, |movie| movie.year, wins)
}

pub fn movie_by_slug<'a>(movies: &'a [Movie], slug: &str) -> Option<&'a Movie> {
    movies.iter().find(|movie| movie.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movies::model::fixtures::{movie, pair};

    fn slugs(movies: &[&Movie]) -> Vec<String> {
        movies.iter().map(|movie| movie.slug.clone()).collect()
    }

    fn rated(slug: &str, rating: Option<f64>) -> Movie {
        movie(slug, 100, 2000, &[("alice", rating)])
    }

    #[test]
    fn top_and_bottom_by_club_average() {
        let movies = vec![
            rated("c", Some(6.)),
            rated("a", Some(9.)),
            rated("d", Some(2.)),
            rated("b", Some(7.)),
        ];

        assert_eq!(slugs(&top_rated(&movies, 3)), vec!["a", "b", "c"]);
        assert_eq!(slugs(&lowest_rated(&movies, 3)), vec!["d", "c", "b"]);
    }

    #[test]
    fn rankings_reverse_each_other_for_distinct_ratings() {
        let movies = vec![rated("x", Some(3.)), rated("y", Some(8.)), rated("z", Some(5.))];

        let mut top = slugs(&top_rated(&movies, movies.len()));
        top.reverse();
        assert_eq!(top, slugs(&lowest_rated(&movies, movies.len())));
    }

    #[test]
    fn rankings_skip_unrated_and_zero() {
        let movies = vec![
            rated("none", None),
            rated("zero", Some(0.)),
            movie("nobody", 100, 2000, &[]),
            rated("ok", Some(5.)),
        ];

        assert_eq!(slugs(&top_rated(&movies, 3)), vec!["ok"]);
        assert_eq!(slugs(&lowest_rated(&movies, 3)), vec!["ok"]);
    }

    #[test]
    fn ranking_ties_keep_collection_order() {
        let movies = vec![
            rated("first", Some(6.)),
            rated("second", Some(6.)),
            rated("third", Some(6.)),
            rated("fourth", Some(6.)),
        ];

        assert_eq!(slugs(&top_rated(&movies, 3)), vec!["first", "second", "third"]);
        assert_eq!(slugs(&lowest_rated(&movies, 3)), vec!["first", "second", "third"]);
    }

    #[test]
    fn ranked_with_custom_key() {
        let movies = pair();
        let by_runtime = ranked(&movies, 1, |m| Some(f64::from(m.runtime)), Order::Descending);
        assert_eq!(slugs(&by_runtime), vec!["b"]);
    }

    #[test]
    fn total_runtime_sums_and_adds() {
        let movies = pair();
        assert_eq!(total_runtime(&movies), 210);
        assert_eq!(total_runtime(&[]), 0);

        let (a, b) = movies.split_at(1);
        assert_eq!(total_runtime(a) + total_runtime(b), total_runtime(&movies));
    }

    #[test]
    fn runtime_extremes() {
        let movies = pair();
        assert_eq!(extreme_by_runtime(&movies, Extreme::Max).unwrap().slug, "b");
        assert_eq!(extreme_by_runtime(&movies, Extreme::Min).unwrap().slug, "a");

        let min = extreme_by_runtime(&movies, Extreme::Min).unwrap().runtime;
        let max = extreme_by_runtime(&movies, Extreme::Max).unwrap().runtime;
        assert!(movies.iter().all(|m| min <= m.runtime && m.runtime <= max));
    }

    #[test]
    fn extremes_ties_go_to_first() {
        let movies = vec![
            movie("early", 100, 1999, &[]),
            movie("late", 100, 1999, &[]),
        ];

        assert_eq!(extreme_by_runtime(&movies, Extreme::Min).unwrap().slug, "early");
        assert_eq!(extreme_by_runtime(&movies, Extreme::Max).unwrap().slug, "early");
        assert_eq!(extreme_by_year(&movies, Era::Oldest).unwrap().slug, "early");
        assert_eq!(extreme_by_year(&movies, Era::Newest).unwrap().slug, "early");
    }

    #[test]
    fn single_movie_is_every_extreme() {
        let movies = vec![movie("only", 95, 1984, &[])];
        assert_eq!(
            extreme_by_runtime(&movies, Extreme::Min),
            extreme_by_runtime(&movies, Extreme::Max)
        );
    }

    #[test]
    fn year_extremes() {
        let movies = pair();
        assert_eq!(extreme_by_year(&movies, Era::Oldest).unwrap().slug, "a");
        assert_eq!(extreme_by_year(&movies, Era::Newest).unwrap().slug, "b");
    }

    #[test]
    fn empty_collection() {
        assert!(top_rated(&[], 3).is_empty());
        assert!(lowest_rated(&[], 3).is_empty());
        assert_eq!(extreme_by_runtime(&[], Extreme::Max), None);
        assert_eq!(extreme_by_year(&[], Era::Oldest), None);
        assert_eq!(movie_by_slug(&[], "a"), None);
    }

    #[test]
    fn lookup_by_slug() {
        let movies = pair();
        assert_eq!(movie_by_slug(&movies, "b").unwrap().runtime, 120);
        assert_eq!(movie_by_slug(&movies, "c"), None);
    }
}
