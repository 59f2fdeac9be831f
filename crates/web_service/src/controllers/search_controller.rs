use actix_web::{get, web, HttpResponse};
use toolbox_core::palette::{search, PaletteState};

use crate::dto::{SearchQuery, SearchResponse};
use crate::middleware::RequestContext;
use crate::server::AppState;

pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const MAX_SEARCH_LIMIT: usize = 50;

/// Command palette lookup. An empty `q` lists every tool.
#[get("/search")]
pub async fn search_tools(
    app_state: web::Data<AppState>,
    ctx: RequestContext,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let query = query.into_inner();
    let q = query.q.unwrap_or_default();
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);

    let results = search(&app_state.catalog, app_state.messages, ctx.locale, &q, limit);
    tracing::debug!(query = %q, hits = results.len(), "Palette search");

    HttpResponse::Ok().json(SearchResponse {
        query: q,
        locale: ctx.locale.as_str().to_string(),
        shortcut: PaletteState::new(ctx.platform).toggle_label(),
        results,
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(search_tools);
}
