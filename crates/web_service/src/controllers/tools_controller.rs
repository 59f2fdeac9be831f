use actix_web::{get, post, web, HttpResponse};
use serde_json::Value;
use toolbox_core::LocalizedTool;

use crate::dto::{CatalogResponse, ExecuteToolResponse, ToolDetailResponse};
use crate::error::AppError;
use crate::middleware::RequestContext;
use crate::server::AppState;

#[get("/tools")]
pub async fn list_tools(app_state: web::Data<AppState>, ctx: RequestContext) -> HttpResponse {
    HttpResponse::Ok().json(CatalogResponse {
        locale: ctx.locale.as_str().to_string(),
        tool_count: app_state.catalog.tool_count(),
        categories: app_state.catalog.localized(app_state.messages, ctx.locale),
    })
}

#[get("/tools/{tool_id}")]
pub async fn get_tool(
    app_state: web::Data<AppState>,
    ctx: RequestContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let tool_id = path.into_inner();
    let (category, info) = app_state
        .catalog
        .find_tool(&tool_id)
        .ok_or_else(|| AppError::ToolNotFound(tool_id.clone()))?;
    let tool = app_state
        .registry
        .get(&tool_id)
        .ok_or_else(|| AppError::ToolNotFound(tool_id.clone()))?;

    Ok(HttpResponse::Ok().json(ToolDetailResponse {
        tool: LocalizedTool::new(info, app_state.messages, ctx.locale),
        category_id: category.id.to_string(),
        category_name: app_state
            .messages
            .get(ctx.locale, &category.name_key())
            .to_string(),
        parameters: tool.parameters_schema(),
    }))
}

/// Run a tool on JSON arguments.
///
/// Rejected input (bad Base64, malformed JSON, ...) is a normal response with
/// `success: false`; only unknown tools and unreadable argument objects are
/// HTTP errors.
#[post("/tools/{tool_id}/execute")]
pub async fn execute_tool(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let tool_id = path.into_inner();
    let result = app_state
        .registry
        .execute(&tool_id, payload.into_inner())
        .await?;

    tracing::info!(tool = %tool_id, success = result.success, "Tool executed");

    Ok(HttpResponse::Ok().json(ExecuteToolResponse {
        tool: tool_id,
        success: result.success,
        result: result.result,
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(list_tools)
        .service(get_tool)
        .service(execute_tool);
}
