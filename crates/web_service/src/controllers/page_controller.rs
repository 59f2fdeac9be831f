//! Server-rendered pages. Tool forms post back to their own page, so every
//! tool works without JavaScript.

use std::collections::HashMap;

use actix_web::{
    get,
    http::{header::ContentType, StatusCode},
    post, web, HttpRequest, HttpResponse,
};
use serde::Deserialize;
use toolbox_core::{
    locale::LOCALE_COOKIE,
    palette::search,
    LocalizedTool, Locale, ToolError, ToolResult,
};

use super::preference_controller::preference_cookie;
use super::search_controller::MAX_SEARCH_LIMIT;
use crate::middleware::RequestContext;
use crate::server::AppState;
use crate::services::form_builder::{args_from_form, fields_from_schema};
use crate::services::PageRenderer;

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub q: Option<String>,
    pub lang: Option<String>,
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

fn not_found_page(app_state: &AppState, ctx: &RequestContext, path: &str) -> HttpResponse {
    let renderer = PageRenderer::new(ctx, app_state.catalog, app_state.messages);
    let metadata = app_state.seo.not_found_metadata(ctx.locale);
    html(
        StatusCode::NOT_FOUND,
        renderer.render(&metadata, path, None, &renderer.not_found()),
    )
}

/// Fallback for every unknown page.
pub async fn not_found(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    ctx: RequestContext,
) -> HttpResponse {
    tracing::debug!(path = %req.path(), "No page at path");
    not_found_page(&app_state, &ctx, req.path())
}

/// Home page. `q` adds a search result section; a valid `lang` is
/// remembered in the locale cookie.
#[get("/")]
pub async fn home(
    app_state: web::Data<AppState>,
    ctx: RequestContext,
    query: web::Query<HomeQuery>,
) -> HttpResponse {
    let renderer = PageRenderer::new(&ctx, app_state.catalog, app_state.messages);
    let search_query = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());
    let hits = search_query
        .map(|q| {
            search(
                &app_state.catalog,
                app_state.messages,
                ctx.locale,
                q,
                MAX_SEARCH_LIMIT,
            )
        })
        .unwrap_or_default();

    let metadata = app_state.seo.home_metadata(ctx.locale);
    let body = renderer.render(&metadata, "/", None, &renderer.home(search_query, &hits));

    let mut response = HttpResponse::Ok();
    response.content_type(ContentType::html());
    if let Some(locale) = query.lang.as_deref().and_then(Locale::from_tag) {
        response.cookie(preference_cookie(LOCALE_COOKIE, locale.as_str()));
    }
    response.body(body)
}

#[get("/tools/{tool_id}")]
pub async fn tool_page(
    app_state: web::Data<AppState>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> HttpResponse {
    render_tool(&app_state, &ctx, &path.into_inner(), None).await
}

#[post("/tools/{tool_id}")]
pub async fn submit_tool(
    app_state: web::Data<AppState>,
    ctx: RequestContext,
    path: web::Path<String>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    render_tool(&app_state, &ctx, &path.into_inner(), Some(form.into_inner())).await
}

async fn render_tool(
    app_state: &AppState,
    ctx: &RequestContext,
    tool_id: &str,
    submitted: Option<HashMap<String, String>>,
) -> HttpResponse {
    let page_path = format!("/tools/{tool_id}");
    let (Some((category, info)), Some(tool), Some(metadata)) = (
        app_state.catalog.find_tool(tool_id),
        app_state.registry.get(tool_id),
        app_state.seo.tool_metadata(tool_id, ctx.locale),
    ) else {
        return not_found_page(app_state, ctx, &page_path);
    };

    let fields = fields_from_schema(&tool.parameters_schema());
    let invalid_input = |detail: &str| {
        ToolResult::failed(app_state.messages.format(
            ctx.locale,
            "form.invalid_input",
            &[("detail", detail)],
        ))
    };

    let outcome = match submitted.as_ref() {
        None => None,
        Some(form) => Some(match args_from_form(&fields, form) {
            Err(e) => invalid_input(&e.to_string()),
            Ok(args) => match app_state.registry.execute(tool_id, args).await {
                Ok(result) => result,
                Err(ToolError::InvalidArguments(msg)) => invalid_input(&msg),
                Err(ToolError::Execution(msg)) => {
                    tracing::warn!(tool = %tool_id, error = %msg, "Tool execution failed");
                    ToolResult::failed(msg)
                }
                Err(ToolError::NotFound(_)) => {
                    return not_found_page(app_state, ctx, &page_path);
                }
            },
        }),
    };
    if let Some(outcome) = &outcome {
        tracing::info!(tool = %tool_id, success = outcome.success, "Tool form submitted");
    }

    let renderer = PageRenderer::new(ctx, app_state.catalog, app_state.messages);
    let localized = LocalizedTool::new(info, app_state.messages, ctx.locale);
    let category_key = category.name_key();
    let category_name = app_state.messages.get(ctx.locale, &category_key);
    let main = renderer.tool_page(
        &localized,
        category.id,
        category_name,
        &fields,
        submitted.as_ref(),
        outcome.as_ref(),
    );

    html(
        StatusCode::OK,
        renderer.render(&metadata, &page_path, Some(tool_id), &main),
    )
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(home).service(tool_page).service(submit_tool);
}
