// src/web/cors_utils.rs
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::{Request, Response};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Adds the permissive CORS headers to every response, error pages included
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
        response.set_header(Header::new("Access-Control-Allow-Origin", ALLOW_ORIGIN));
        response.set_header(Header::new("Access-Control-Allow-Methods", ALLOW_METHODS));
        response.set_header(Header::new("Access-Control-Allow-Headers", ALLOW_HEADERS));
    }
}

/// Preflight: 200 with an empty body for any path
#[rocket::options("/<_..>")]
pub async fn universal_options_handler() -> Status {
    Status::Ok
}
