use std::str::FromStr;

use anyhow::Context;
use movie_club::config::ScrapeConfig;
use movie_club::letterboxd::scrape::{build_snapshot, write_snapshot};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

const USER_AGENT: &str = concat!("movie-club-dashboard/", env!("CARGO_PKG_VERSION"));

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = ScrapeConfig::from_env()?;

    let level = LevelFilter::from_str(&config.log_level)
        .with_context(|| format!("invalid LOGLEVEL {:?}", config.log_level))?;
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    let movies = build_snapshot(&client, &config).await?;

    write_snapshot(&config.output_path, &movies)
        .await
        .with_context(|| format!("writing {}", config.output_path.display()))?;
    log::info!(
        "Wrote {} movies to {}",
        movies.len(),
        config.output_path.display()
    );

    Ok(())
}
