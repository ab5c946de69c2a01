use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};

pub mod config;
pub mod cors;
pub mod error;
pub mod frontend;
pub mod snapshot;

pub mod movies {
    pub mod model;
    pub mod routes;
}

pub mod stats {
    pub mod members;
    pub mod ratings;
    pub mod routes;
    pub mod selectors;
}

pub mod letterboxd {
    pub mod model;
    pub mod scrape;
}

#[cfg(test)]
mod testing;

use config::ServerConfig;

pub fn build(config: ServerConfig) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", config.address))
        .merge(("port", config.port));

    let announce = AdHoc::on_liftoff("Snapshot", |rocket| {
        Box::pin(async move {
            if let Some(config) = rocket.state::<ServerConfig>() {
                log::info!(
                    "serving {} with assets from {}",
                    config.data_file.display(),
                    config.dist_dir.display()
                );
            }
        })
    });

    rocket::custom(figment)
        .attach(cors::Cors)
        .attach(announce)
        .mount("/", cors::routes())
        .mount("/api", movies::routes::routes())
        .mount("/api/stats", stats::routes::routes())
        .mount("/", frontend::assets(&config))
        .mount("/", frontend::routes())
        .manage(config)
}
