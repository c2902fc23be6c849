use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::registry::Registry;
use crate::registry::models::VisitMetadata;

use super::error_response;

pub struct RedirectService;

impl RedirectService {
    /// `GET /{shortcode}` — 307 to the target URL, recording the visit.
    #[instrument(skip_all, fields(shortcode = %path))]
    pub async fn handle_redirect(
        path: web::Path<String>,
        req: HttpRequest,
        registry: web::Data<Arc<Registry>>,
    ) -> impl Responder {
        let shortcode = path.into_inner();
        let visit = visit_metadata(&req);

        match registry.resolve(&shortcode, visit) {
            Ok(target) => {
                info!("URL accessed: {} -> {}", shortcode, target);
                HttpResponse::TemporaryRedirect()
                    .insert_header((header::LOCATION, target))
                    .finish()
            }
            Err(err) => {
                warn!("Redirect refused for '{}': {}", shortcode, err);
                error_response(&err)
            }
        }
    }
}

/// Pull the visit metadata out of the request. The referer stays `None` here;
/// the registry substitutes the "Direct" sentinel.
fn visit_metadata(req: &HttpRequest) -> VisitMetadata {
    let source_ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    VisitMetadata {
        source_ip,
        user_agent: header_value(req, header::USER_AGENT).unwrap_or_default(),
        referer: header_value(req, header::REFERER),
    }
}

fn header_value(req: &HttpRequest, name: header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
