use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::registry::Registry;
use crate::structs::UrlListItem;

use super::{error_response, short_link};

pub struct StatsService;

impl StatsService {
    /// `GET /shorturls/{shortcode}` — record snapshot plus click history.
    /// Works for expired codes too; only redirection is blocked by expiry.
    #[instrument(skip_all, fields(shortcode = %path))]
    pub async fn get_url_stats(
        path: web::Path<String>,
        registry: web::Data<Arc<Registry>>,
    ) -> impl Responder {
        let shortcode = path.into_inner();

        match registry.stats(&shortcode) {
            Ok(stats) => {
                info!("Shortcode statistics requested: {}", shortcode);
                HttpResponse::Ok().json(stats)
            }
            Err(err) => {
                warn!("Statistics unavailable for '{}': {}", shortcode, err);
                error_response(&err)
            }
        }
    }

    /// `GET /api/urls` — every issued shortcode with its click history.
    #[instrument(skip_all)]
    pub async fn get_all_urls(
        registry: web::Data<Arc<Registry>>,
        config: web::Data<Config>,
    ) -> impl Responder {
        let urls: Vec<UrlListItem> = registry
            .list_all()
            .into_iter()
            .map(|stats| UrlListItem {
                short_link: short_link(&config.public_base_url, &stats.record.shortcode),
                stats,
            })
            .collect();

        info!("URLs list requested, count: {}", urls.len());
        HttpResponse::Ok().json(urls)
    }
}
