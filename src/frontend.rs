//! Serves the built single-page app. Paths that don't name a file in the
//! dist directory get its `index.html` so client-side routing works.

use rocket::fs::{FileServer, NamedFile, Options};
use rocket::{get, routes, Route, State};

use crate::config::ServerConfig;

const INDEX: &str = "index.html";

#[get("/<_..>", rank = 20)]
async fn fallback(config: &State<ServerConfig>) -> Option<NamedFile> {
    NamedFile::open(config.dist_dir.join(INDEX)).await.ok()
}

pub fn assets(config: &ServerConfig) -> FileServer {
    FileServer::new(&config.dist_dir, Options::Index | Options::Missing)
}

pub fn routes() -> Vec<Route> {
    routes![fallback]
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rocket::http::{ContentType, Status};

    use crate::testing::{client_with_dist, snapshot_file};

    #[test]
    fn serves_built_assets() {
        let file = snapshot_file("[]");
        let dist = tempfile::tempdir().unwrap();
        fs::write(dist.path().join("index.html"), "<html>app</html>").unwrap();
        fs::create_dir(dist.path().join("assets")).unwrap();
        fs::write(dist.path().join("assets/app.js"), "console.log(1)").unwrap();

        let client = client_with_dist(file.path(), dist.path());

        let response = client.get("/assets/app.js").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.content_type(), Some(ContentType::JavaScript));
        assert_eq!(response.into_string().unwrap(), "console.log(1)");

        let response = client.get("/").dispatch();
        assert_eq!(response.into_string().unwrap(), "<html>app</html>");
    }

    #[test]
    fn unknown_paths_fall_back_to_index() {
        let file = snapshot_file("[]");
        let dist = tempfile::tempdir().unwrap();
        fs::write(dist.path().join("index.html"), "<html>app</html>").unwrap();

        let client = client_with_dist(file.path(), dist.path());

        for path in ["/members", "/club/stats", "/movies/parasite-2019"] {
            let response = client.get(path).dispatch();
            assert_eq!(response.status(), Status::Ok, "{}", path);
            assert_eq!(response.content_type(), Some(ContentType::HTML));
            assert_eq!(response.into_string().unwrap(), "<html>app</html>");
        }
    }

    #[test]
    fn missing_dist_is_not_found() {
        let file = snapshot_file("[]");
        let dist = tempfile::tempdir().unwrap();

        let client = client_with_dist(file.path(), &dist.path().join("missing"));

        let response = client.get("/members").dispatch();
        assert_eq!(response.status(), Status::NotFound);
    }
}
