use std::collections::HashMap;

use serde::Serialize;

use crate::movies::model::Movie;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MemberSummary {
    pub username: String,
    pub highest_rated_movie: Option<String>,
    pub lowest_rated_movie: Option<String>,
    /// Mean of the member's ratings on the 0-5 scale.
    pub average_rating: Option<f64>,
}

#[derive(Default)]
struct Tally<'a> {
    highest: Option<(&'a str, f64)>,
    lowest: Option<(&'a str, f64)>,
    sum: f64,
    count: usize,
}

impl<'a> Tally<'a> {
    fn record(&mut self, slug: &'a str, rating: f64) {
        if self.highest.map_or(true, |(_, best)| rating > best) {
            self.highest = Some((slug, rating));
        }
        if self.lowest.map_or(true, |(_, worst)| rating < worst) {
            self.lowest = Some((slug, rating));
        }
        self.sum += rating;
        self.count += 1;
    }

    fn into_summary(self, username: &str) -> MemberSummary {
        MemberSummary {
            username: username.to_string(),
            highest_rated_movie: self.highest.map(|(slug, _)| slug.to_string()),
            lowest_rated_movie: self.lowest.map(|(slug, _)| slug.to_string()),
            average_rating: (self.count > 0).then(|| self.sum / (2. * self.count as f64)),
        }
    }
}

/// One summary per member appearing in any rating map, in the order the
/// members are first encountered. Ties on the highest or lowest rating go to
/// the movie seen first.
pub fn summarize_members(movies: &[Movie]) -> Vec<MemberSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<(&str, Tally)> = Vec::new();

    for movie in movies {
        for (username, rating) in movie.club_ratings.iter() {
            let position = *index.entry(username).or_insert_with(|| {
                tallies.push((username, Tally::default()));
                tallies.len() - 1
            });

            if let Some(rating) = rating {
                tallies[position].1.record(&movie.slug, rating);
            }
        }
    }

    tallies
        .into_iter()
        .map(|(username, tally)| tally.into_summary(username))
        .collect()
}
