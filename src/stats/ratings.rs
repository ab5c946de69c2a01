use crate::movies::model::Movie;

pub const FULL_STAR: char = '★';
pub const HALF_STAR: char = '⯪';
pub const EMPTY_STAR: char = '☆';

const STAR_COUNT: usize = 5;

/// Scale of a rating handed to [`starify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Raw club ratings, 0 to 10.
    OutOfTen,
    /// Averages as returned by [`club_average`] and [`member_average`], 0 to 5.
    OutOfFive,
}

/// Mean of the present ratings on the 0-5 scale, `None` if there are none.
fn half_mean(ratings: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = ratings.fold((0., 0usize), |(sum, count), r| (sum + r, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / (2. * count as f64))
    }
}

/// Average club rating of a movie, ignoring members who haven't rated it.
pub fn club_average(movie: &Movie) -> Option<f64> {
    half_mean(movie.club_ratings.present())
}

/// Average of everything `username` has rated across the collection.
pub fn member_average(movies: &[Movie], username: &str) -> Option<f64> {
    half_mean(movies.iter().filter_map(|movie| movie.club_ratings.get(username)))
}

/// Renders a rating as exactly five star glyphs. A missing rating renders
/// as five empty stars and values outside the scale are clamped.
///
/// The half star follows the rounded 0-10 value being odd, so `9.6` shows
/// as four full stars and one empty star.
pub fn starify(rating: Option<f64>, scale: Scale) -> String {
    let rating = rating.unwrap_or(0.);
    let rating = match scale {
        Scale::OutOfTen => rating,
        Scale::OutOfFive => rating * 2.,
    }
    .clamp(0., 10.);

    let full = (rating / 2.).floor() as usize;
    let half = (rating.round() as u32) % 2 == 1;
    let empty = STAR_COUNT - full - usize::from(half);

    let mut stars = String::with_capacity(STAR_COUNT * FULL_STAR.len_utf8());
    stars.extend(std::iter::repeat(FULL_STAR).take(full));
    if half {
        stars.push(HALF_STAR);
    }
    stars.extend(std::iter::repeat(EMPTY_STAR).take(empty));
    stars
}
