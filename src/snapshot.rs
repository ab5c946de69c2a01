//! Reading the movie snapshot from disk. The file is read again on every
//! call, so edits to it show up on the next request.

use std::path::Path;

use rocket::tokio::fs;
use serde_json::Value;

use crate::error::SnapshotError;
use crate::movies::model::Movie;

async fn read(path: &Path) -> Result<String, SnapshotError> {
    fs::read_to_string(path).await.map_err(SnapshotError::Read)
}

/// Any valid JSON document, passed through untouched.
pub async fn load_document(path: &Path) -> Result<Value, SnapshotError> {
    let json = read(path).await?;
    serde_json::from_str(&json).map_err(SnapshotError::Parse)
}

pub async fn load_movies(path: &Path) -> Result<Vec<Movie>, SnapshotError> {
    let json = read(path).await?;
    serde_json::from_str(&json).map_err(SnapshotError::Parse)
}
