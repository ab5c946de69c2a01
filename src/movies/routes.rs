use rocket::serde::json::Json;
use rocket::{get, routes, Route, State};
use serde::Serialize;
use serde_json::Value;

use crate::config::ServerConfig;
use crate::error::SnapshotError;
use crate::movies::model::Movie;
use crate::snapshot;
use crate::stats::ratings::{club_average, starify, Scale};
use crate::stats::selectors::movie_by_slug;

#[derive(Serialize, Debug)]
pub struct MemberRating {
    pub username: String,
    pub rating: Option<f64>,
    pub stars: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    pub club_rating: Option<f64>,
    pub club_stars: Option<String>,
    pub global_stars: String,
    pub members: Vec<MemberRating>,
}

impl From<Movie> for MovieDetails {
    fn from(movie: Movie) -> Self {
        let club_rating = club_average(&movie);
        let members = movie
            .club_ratings
            .iter()
            .map(|(username, rating)| MemberRating {
                username: username.to_string(),
                rating,
                stars: rating.map(|r| starify(Some(r), Scale::OutOfTen)),
            })
            .collect();

        MovieDetails {
            club_rating,
            club_stars: club_rating.map(|r| starify(Some(r), Scale::OutOfFive)),
            global_stars: starify(Some(movie.avg_rating), Scale::OutOfFive),
            members,
            movie,
        }
    }
}

#[get("/data")]
async fn get_data(config: &State<ServerConfig>) -> Result<Json<Value>, SnapshotError> {
    snapshot::load_document(&config.data_file).await.map(Json)
}

#[get("/movies/<slug>")]
async fn get_movie(
    config: &State<ServerConfig>,
    slug: &str,
) -> Result<Option<Json<MovieDetails>>, SnapshotError> {
    let movies = snapshot::load_movies(&config.data_file).await?;

    Ok(movie_by_slug(&movies, slug)
        .cloned()
        .map(MovieDetails::from)
        .map(Json))
}

pub fn routes() -> Vec<Route> {
    routes![get_data, get_movie]
}
