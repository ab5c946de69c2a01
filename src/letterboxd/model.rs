pub const BASE_URL: &str = "https://letterboxd.com";

/// A film on a member's films page, with their rating out of 10 if any.
#[derive(Clone, Debug, PartialEq)]
pub struct UserFilm {
    pub slug: String,
    pub rating: Option<u8>,
}

/// Everything a member has logged.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberFilms {
    pub username: String,
    pub films: Vec<UserFilm>,
}

pub fn list_page_url(owner: &str, slug: &str, page: usize) -> String {
    format!("{}/{}/list/{}/page/{}/", BASE_URL, owner, slug, page)
}

pub fn user_films_page_url(username: &str, page: usize) -> String {
    format!("{}/{}/films/page/{}/", BASE_URL, username, page)
}

pub fn film_url(slug: &str) -> String {
    format!("{}/film/{}/", BASE_URL, slug)
}
