use rocket::serde::json::Json;
use rocket::{get, routes, Route, State};
use serde::Serialize;

use crate::config::ServerConfig;
use crate::error::SnapshotError;
use crate::movies::model::Movie;
use crate::snapshot;
use crate::stats::members::summarize_members;
use crate::stats::ratings::{club_average, starify, Scale};
use crate::stats::selectors::{
    extreme_by_runtime, extreme_by_year, lowest_rated, movie_by_slug, top_rated, total_runtime,
    Era, Extreme,
};

const PODIUM_SIZE: usize = 3;

#[derive(Serialize, Debug)]
pub struct RankedMovie {
    pub slug: String,
    pub title: String,
    pub club_rating: Option<f64>,
    pub stars: String,
}

impl From<&Movie> for RankedMovie {
    fn from(movie: &Movie) -> Self {
        let club_rating = club_average(movie);
        RankedMovie {
            slug: movie.slug.clone(),
            title: movie.title.clone(),
            club_rating,
            stars: starify(club_rating, Scale::OutOfFive),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ClubStats {
    pub movies_watched: usize,
    pub total_runtime: u64,
    pub total_runtime_hours: u64,
    pub top_rated: Vec<RankedMovie>,
    pub lowest_rated: Vec<RankedMovie>,
    pub shortest: Option<Movie>,
    pub longest: Option<Movie>,
    pub oldest: Option<Movie>,
    pub newest: Option<Movie>,
}

impl ClubStats {
    pub fn compute(movies: &[Movie]) -> Self {
        let total_runtime = total_runtime(movies);

        ClubStats {
            movies_watched: movies.len(),
            total_runtime,
            total_runtime_hours: (total_runtime as f64 / 60.).round() as u64,
            top_rated: top_rated(movies, PODIUM_SIZE).into_iter().map(RankedMovie::from).collect(),
            lowest_rated: lowest_rated(movies, PODIUM_SIZE)
                .into_iter()
                .map(RankedMovie::from)
                .collect(),
            shortest: extreme_by_runtime(movies, Extreme::Min).cloned(),
            longest: extreme_by_runtime(movies, Extreme::Max).cloned(),
            oldest: extreme_by_year(movies, Era::Oldest).cloned(),
            newest: extreme_by_year(movies, Era::Newest).cloned(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct MemberReport {
    pub username: String,
    pub highest_rated_movie: Option<String>,
    pub highest_rating: Option<f64>,
    pub highest_stars: Option<String>,
    pub lowest_rated_movie: Option<String>,
    pub lowest_rating: Option<f64>,
    pub lowest_stars: Option<String>,
    pub average_rating: Option<f64>,
}

impl MemberReport {
    pub fn compute(movies: &[Movie]) -> Vec<Self> {
        summarize_members(movies)
            .into_iter()
            .map(|summary| {
                let rating_of = |slug: &Option<String>| {
                    slug.as_deref()
                        .and_then(|slug| movie_by_slug(movies, slug))
                        .and_then(|movie| movie.club_ratings.get(&summary.username))
                };
                let highest_rating = rating_of(&summary.highest_rated_movie);
                let lowest_rating = rating_of(&summary.lowest_rated_movie);

                MemberReport {
                    highest_stars: highest_rating.map(|r| starify(Some(r), Scale::OutOfTen)),
                    lowest_stars: lowest_rating.map(|r| starify(Some(r), Scale::OutOfTen)),
                    highest_rating,
                    lowest_rating,
                    username: summary.username,
                    highest_rated_movie: summary.highest_rated_movie,
                    lowest_rated_movie: summary.lowest_rated_movie,
                    average_rating: summary.average_rating,
                }
            })
            .collect()
    }
}

#[get("/club")]
async fn get_club_stats(config: &State<ServerConfig>) -> Result<Json<ClubStats>, SnapshotError> {
    let movies = snapshot::load_movies(&config.data_file).await?;
    Ok(Json(ClubStats::compute(&movies)))
}

#[get("/members")]
async fn get_member_stats(
    config: &State<ServerConfig>,
) -> Result<Json<Vec<MemberReport>>, SnapshotError> {
    let movies = snapshot::load_movies(&config.data_file).await?;
    Ok(Json(MemberReport::compute(&movies)))
}

pub fn routes() -> Vec<Route> {
    routes![get_club_stats, get_member_stats]
}
