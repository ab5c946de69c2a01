use std::path::Path;

use reqwest::{Client, StatusCode};
use rocket::futures::future::join_all;
use select::predicate::{Attr, Class, Name, Predicate};
use select::{document::Document, node::Node};

use super::model::{film_url, list_page_url, user_films_page_url, MemberFilms, UserFilm, BASE_URL};
use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::movies::model::{Actor, ClubRatings, Director, Movie};

fn film_slug(node: Node) -> Option<String> {
    node.attr("data-film-slug")
        .or_else(|| node.attr("data-item-slug"))
        .map(|s| s.to_string())
}

/// Appends the entries of one fetched page that aren't known yet, keyed by
/// slug. `None` is a page past the end. Returns whether anything was added;
/// pagination stops once a page adds nothing.
fn absorb_page<T>(known: &mut Vec<T>, page: Option<Vec<T>>, slug: impl Fn(&T) -> &str) -> bool {
    let mut added = false;
    for entry in page.unwrap_or_default() {
        if !known.iter().any(|k| slug(k) == slug(&entry)) {
            known.push(entry);
            added = true;
        }
    }
    added
}

pub fn parse_list_page(document: &Document) -> Vec<String> {
    let mut slugs = Vec::new();
    let found: Vec<String> = document
        .find(Attr("data-film-slug", ()).or(Attr("data-item-slug", ())))
        .filter_map(film_slug)
        .collect();
    absorb_page(&mut slugs, Some(found), |s: &String| s.as_str());
    slugs
}

pub fn parse_user_films_page(document: &Document) -> Vec<UserFilm> {
    document
        .find(Name("li").and(Class("poster-container").or(Class("griditem"))))
        .filter_map(parse_user_film)
        .collect()
}

fn parse_user_film(film_node: Node) -> Option<UserFilm> {
    let slug = film_node
        .find(Attr("data-film-slug", ()).or(Attr("data-item-slug", ())))
        .next()
        .and_then(film_slug)?;

    let rating = film_node
        .find(Name("span").and(Class("rating")))
        .next()
        .and_then(|n| n.attr("class"))
        .and_then(|c| c.split_whitespace().find_map(|class| class.strip_prefix("rated-")))
        .and_then(|r| r.parse::<u8>().ok());

    Some(UserFilm { slug, rating })
}

/// Splits an `og:title` such as `Parasite (2019)` into its title and year.
fn split_title_year(og_title: &str) -> (String, Option<u32>) {
    let parsed = og_title
        .strip_suffix(')')
        .and_then(|rest| rest.rsplit_once(" ("))
        .and_then(|(title, year)| year.parse().ok().map(|year| (title, year)));

    match parsed {
        Some((title, year)) => (title.to_string(), Some(year)),
        None => (og_title.to_string(), None),
    }
}

/// Minutes from a footer like `132 mins   More at IMDb TMDb`.
fn parse_runtime(text: &str) -> Option<u32> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    tokens
        .windows(2)
        .find(|pair| pair[1].starts_with("min"))
        .and_then(|pair| pair[0].replace(',', "").parse().ok())
}

fn meta_content<'a>(document: &'a Document, attr: &'static str, value: &'static str) -> Option<&'a str> {
    document
        .find(Name("meta").and(Attr(attr, value)))
        .next()
        .and_then(|n| n.attr("content"))
}

fn link_slug(href: &str, prefix: &str) -> Option<String> {
    href.strip_prefix(prefix)
        .map(|rest| rest.trim_end_matches('/').to_string())
        .filter(|slug| !slug.is_empty())
}

fn parse_director(document: &Document) -> Director {
    document
        .find(Name("a"))
        .find_map(|n| {
            let href = n.attr("href")?;
            let slug = link_slug(href, "/director/")?;
            Some(Director {
                slug,
                name: n.text().trim().to_string(),
                url: format!("{}{}", BASE_URL, href),
            })
        })
        .unwrap_or_else(|| Director {
            slug: String::new(),
            name: "N/A".to_string(),
            url: String::new(),
        })
}

fn parse_cast(document: &Document, top_actor_count: usize) -> Vec<Actor> {
    document
        .find(Attr("id", "tab-cast").descendant(Name("a")))
        .filter_map(|n| {
            let slug = link_slug(n.attr("href")?, "/actor/")?;
            let role_name = n
                .attr("data-original-title")
                .or_else(|| n.attr("title"))
                .unwrap_or_default()
                .to_string();
            Some(Actor {
                slug,
                name: n.text().trim().to_string(),
                role_name,
            })
        })
        .take(top_actor_count)
        .collect()
}

/// The poster lives in the page's JSON-LD block, which Letterboxd wraps in
/// CDATA comments.
fn parse_poster(document: &Document) -> Option<String> {
    let script = document
        .find(Name("script").and(Attr("type", "application/ld+json")))
        .next()?
        .text();
    let (start, end) = (script.find('{')?, script.rfind('}')?);
    if end < start {
        return None;
    }
    let json = script.get(start..=end)?;
    let data: serde_json::Value = serde_json::from_str(json).ok()?;
    data["image"].as_str().map(|s| s.to_string())
}

pub fn parse_film_page(
    document: &Document,
    slug: &str,
    top_actor_count: usize,
) -> Result<Movie, ScrapeError> {
    let (og_title, og_year) = meta_content(document, "property", "og:title")
        .map(split_title_year)
        .unwrap_or_default();

    let title = document
        .find(Name("h1").and(Class("filmtitle")).descendant(Class("name")))
        .next()
        .map(|n| n.text().trim().to_string())
        .filter(|title| !title.is_empty())
        .or(Some(og_title).filter(|title| !title.is_empty()))
        .ok_or_else(|| ScrapeError::MissingField {
            slug: slug.to_string(),
            field: "title",
        })?;

    let year = document
        .find(Class("releaseyear").or(Class("releasedate")).descendant(Name("a")))
        .next()
        .and_then(|n| n.text().trim().parse().ok())
        .or(og_year)
        .unwrap_or_else(|| {
            log::warn!("no release year for {}", slug);
            0
        });

    let runtime = document
        .find(Name("p").and(Class("text-footer")))
        .find_map(|n| parse_runtime(&n.text()))
        .unwrap_or_else(|| {
            log::warn!("no runtime for {}", slug);
            0
        });

    let avg_rating = meta_content(document, "name", "twitter:data2")
        .and_then(|content| content.split_whitespace().next())
        .and_then(|r| r.parse().ok())
        .unwrap_or(0.);

    Ok(Movie {
        slug: slug.to_string(),
        poster_url: parse_poster(document).unwrap_or_default(),
        title,
        year,
        runtime,
        avg_rating,
        director: parse_director(document),
        top_actors: parse_cast(document, top_actor_count),
        club_ratings: ClubRatings::new(),
    })
}

/// Page HTML, or `None` past the last page.
async fn fetch_html(client: &Client, url: &str) -> Result<Option<String>, ScrapeError> {
    let response = client.get(url).send().await?;
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    Ok(Some(response.error_for_status()?.text().await?))
}

pub async fn fetch_list_slugs(
    client: &Client,
    owner: &str,
    list_slug: &str,
) -> Result<Vec<String>, ScrapeError> {
    let mut slugs = Vec::new();

    for page in 1.. {
        let found = fetch_html(client, &list_page_url(owner, list_slug, page))
            .await?
            .map(|html| parse_list_page(&Document::from(html.as_str())));

        if !absorb_page(&mut slugs, found, |s: &String| s.as_str()) {
            break;
        }
    }

    Ok(slugs)
}

pub async fn fetch_member_films(client: &Client, username: &str) -> Result<MemberFilms, ScrapeError> {
    let mut films: Vec<UserFilm> = Vec::new();

    for page in 1.. {
        let found = fetch_html(client, &user_films_page_url(username, page))
            .await?
            .map(|html| parse_user_films_page(&Document::from(html.as_str())));

        if !absorb_page(&mut films, found, |film: &UserFilm| film.slug.as_str()) {
            break;
        }
    }

    Ok(MemberFilms {
        username: username.to_string(),
        films,
    })
}

pub async fn fetch_movie(
    client: &Client,
    slug: &str,
    top_actor_count: usize,
) -> Result<Movie, ScrapeError> {
    log::debug!("Fetching movie info for {}", slug);

    match fetch_html(client, &film_url(slug)).await? {
        Some(html) => parse_film_page(&Document::from(html.as_str()), slug, top_actor_count),
        None => Err(ScrapeError::FilmNotFound(slug.to_string())),
    }
}

/// Gives every movie a rating map over all club members, in `club_users`
/// order. Members who haven't logged a movie stay absent, and films outside
/// the list are ignored.
pub fn merge_club_ratings(
    movies: Vec<Movie>,
    club_users: &[String],
    members: &[MemberFilms],
) -> Vec<Movie> {
    movies
        .into_iter()
        .map(|mut movie| {
            let mut ratings: ClubRatings =
                club_users.iter().map(|user| (user.as_str(), None)).collect();

            for member in members {
                if let Some(film) = member.films.iter().find(|film| film.slug == movie.slug) {
                    ratings.insert(member.username.as_str(), film.rating.map(f64::from));
                }
            }

            movie.club_ratings = ratings;
            movie
        })
        .collect()
}

pub async fn build_snapshot(client: &Client, config: &ScrapeConfig) -> Result<Vec<Movie>, ScrapeError> {
    let slugs = fetch_list_slugs(client, &config.list_owner, &config.list_slug).await?;
    log::info!("Found {} movie slugs in list", slugs.len());

    let movies = join_all(
        slugs
            .iter()
            .map(|slug| fetch_movie(client, slug, config.top_actor_count)),
    )
    .await
    .into_iter()
    .collect::<Result<Vec<_>, _>>()?;
    log::info!("Movie information fetched for all movies");

    log::info!("Fetching user ratings for {} users", config.club_users.len());
    let mut members = Vec::with_capacity(config.club_users.len());
    for username in &config.club_users {
        log::debug!("Fetching films for {}", username);
        members.push(fetch_member_films(client, username).await?);
    }

    Ok(merge_club_ratings(movies, &config.club_users, &members))
}

pub async fn write_snapshot(path: &Path, movies: &[Movie]) -> Result<(), ScrapeError> {
    let json = serde_json::to_string(movies)?;
    rocket::tokio::fs::write(path, json).await?;
    Ok(())
}
