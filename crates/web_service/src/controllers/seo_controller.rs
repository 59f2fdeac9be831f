use actix_web::{
    get,
    http::header::{CacheControl, CacheDirective, ContentType},
    web, HttpResponse,
};
use serde::Deserialize;

use crate::middleware::RequestContext;
use crate::server::AppState;

const OG_IMAGE_MAX_AGE_SECS: u32 = 86_400;

#[derive(Debug, Default, Deserialize)]
pub struct OgImageQuery {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[get("/sitemap.xml")]
pub async fn sitemap(app_state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(app_state.seo.sitemap_xml())
}

#[get("/robots.txt")]
pub async fn robots(app_state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(app_state.seo.robots_txt())
}

/// Social preview card for a page title and description.
#[get("/og")]
pub async fn og_image(
    app_state: web::Data<AppState>,
    ctx: RequestContext,
    query: web::Query<OgImageQuery>,
) -> HttpResponse {
    let svg = app_state.seo.og_image_svg(
        ctx.locale,
        query.title.as_deref(),
        query.description.as_deref(),
    );

    HttpResponse::Ok()
        .content_type("image/svg+xml")
        .insert_header(CacheControl(vec![
            CacheDirective::Public,
            CacheDirective::MaxAge(OG_IMAGE_MAX_AGE_SECS),
        ]))
        .body(svg)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(sitemap).service(robots).service(og_image);
}
