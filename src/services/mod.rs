pub mod redirect;
pub mod shorten;
pub mod stats;

pub use redirect::RedirectService;
pub use shorten::ShortenService;
pub use stats::StatsService;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse};

use crate::errors::SnaplinkError;
use crate::structs::ErrorResponse;

/// Map a core error onto its HTTP response body.
pub fn error_response(err: &SnaplinkError) -> HttpResponse {
    HttpResponse::build(err.http_status())
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorResponse {
            error: err.message().to_string(),
        })
}

/// Handler for `web::JsonConfig`: malformed request bodies (bad JSON, wrong
/// field types) get the same `{"error": ...}` shape as every other rejection.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = HttpResponse::BadRequest()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorResponse {
            error: err.to_string(),
        });
    InternalError::from_response(err, body).into()
}

/// Build the shareable link for a shortcode.
pub fn short_link(base_url: &str, shortcode: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), shortcode)
}
