use rocket::http::Status;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read JSON file")]
    Read(#[source] std::io::Error),

    #[error("Failed to parse JSON file")]
    Parse(#[source] serde_json::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl<'r> Responder<'r, 'static> for SnapshotError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        if let Some(cause) = std::error::Error::source(&self) {
            log::error!("{}: {}", self, cause);
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        status::Custom(Status::InternalServerError, body).respond_to(request)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not defined")]
    Missing(&'static str),

    #[error("invalid {var} value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("film {0} not found")]
    FilmNotFound(String),

    #[error("film {slug} has no {field}")]
    MissingField { slug: String, field: &'static str },

    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}
