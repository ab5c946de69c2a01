use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{options, routes, Request, Response, Route};

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "GET, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[options("/<_..>")]
fn preflight() {
    /* Intentionally left empty */
}

pub fn routes() -> Vec<Route> {
    routes![preflight]
}
