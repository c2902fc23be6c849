use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::registry::Registry;
use crate::structs::{CreateShortUrlRequest, CreateShortUrlResponse};

use super::{error_response, short_link};

pub struct ShortenService;

impl ShortenService {
    /// `POST /shorturls` — allocate a shortcode for a target URL.
    #[instrument(skip_all, fields(url = %payload.url))]
    pub async fn create_short_url(
        payload: web::Json<CreateShortUrlRequest>,
        registry: web::Data<Arc<Registry>>,
        config: web::Data<Config>,
    ) -> impl Responder {
        let req = payload.into_inner();

        match registry.create(&req.url, req.validity, req.shortcode.as_deref()) {
            Ok(created) => {
                info!(
                    "Short URL created: {} -> {} (expires {})",
                    created.shortcode,
                    req.url,
                    created.expiry_at.to_rfc3339()
                );
                HttpResponse::Created().json(CreateShortUrlResponse {
                    short_link: short_link(&config.public_base_url, &created.shortcode),
                    expiry: created.expiry_at,
                })
            }
            Err(err) => {
                warn!("Short URL creation rejected: {}", err);
                error_response(&err)
            }
        }
    }
}
