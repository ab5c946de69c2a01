use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Movie {
    pub slug: String,
    pub poster_url: String,
    pub title: String,
    pub year: u32,
    pub runtime: u32,
    pub avg_rating: f64,
    pub director: Director,
    pub top_actors: Vec<Actor>,
    pub club_ratings: ClubRatings,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Director {
    pub slug: String,
    pub name: String,
    pub url: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Actor {
    pub slug: String,
    pub name: String,
    pub role_name: String,
}

/// Per-member ratings of one movie on the 0-10 scale, `None` meaning the
/// member has not rated it.
///
/// Entries keep the order they had in the snapshot document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClubRatings(Vec<(String, Option<f64>)>);

impl ClubRatings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, username: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(name, _)| name == username)
            .and_then(|(_, rating)| *rating)
    }

    /// Sets the member's rating, keeping their original position when they
    /// are already present.
    pub fn insert(&mut self, username: impl Into<String>, rating: Option<f64>) {
        let username = username.into();
        match self.0.iter_mut().find(|(name, _)| *name == username) {
            Some(entry) => entry.1 = rating,
            None => self.0.push((username, rating)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.0.iter().map(|(name, rating)| (name.as_str(), *rating))
    }

    /// Ratings that are actually present.
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().filter_map(|(_, rating)| *rating)
    }
}

impl<S: Into<String>> FromIterator<(S, Option<f64>)> for ClubRatings {
    fn from_iter<I: IntoIterator<Item = (S, Option<f64>)>>(iter: I) -> Self {
        let mut ratings = ClubRatings::new();
        for (username, rating) in iter {
            ratings.insert(username, rating);
        }
        ratings
    }
}

impl Serialize for ClubRatings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (username, rating) in &self.0 {
            map.serialize_entry(username, rating)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ClubRatings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RatingsVisitor;

        impl<'de> Visitor<'de> for RatingsVisitor {
            type Value = ClubRatings;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of usernames to ratings or null")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ClubRatings, A::Error> {
                let mut ratings = ClubRatings::new();
                while let Some((username, rating)) = access.next_entry::<String, Option<f64>>()? {
                    ratings.insert(username, rating);
                }
                Ok(ratings)
            }
        }

        deserializer.deserialize_map(RatingsVisitor)
    }
}
