use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpRequest, HttpServer};
use anyhow::{bail, Context};
use log::{error, info};
use tokio::sync::oneshot;
use toolbox_core::{Catalog, MessageCatalog, ToolRegistry};
use toolbox_tools::builtin_registry;

use crate::config::ServerConfig;
use crate::controllers::{
    i18n_controller, page_controller, preference_controller, search_controller, seo_controller,
    system_controller, tools_controller,
};
use crate::error::AppError;
use crate::middleware::TracingMiddleware;
use crate::services::SeoService;

/// Request bodies above this size are rejected (Markdown and JSON inputs
/// are the large ones).
const MAX_BODY_BYTES: usize = 512 * 1024;

pub struct AppState {
    pub registry: Arc<ToolRegistry>,
    pub catalog: Catalog,
    pub messages: &'static MessageCatalog,
    pub seo: SeoService,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let registry = builtin_registry(&config.tools_config())
            .context("Failed to register built-in tools")?;
        Self::with_registry(config, registry)
    }

    /// Build the state around an existing registry. Every catalog entry
    /// must have an implementation.
    pub fn with_registry(config: &ServerConfig, registry: ToolRegistry) -> anyhow::Result<Self> {
        let catalog = Catalog::builtin();
        let missing = catalog.verify_against(&registry);
        if !missing.is_empty() {
            bail!("Catalog tools without an implementation: {}", missing.join(", "));
        }

        let messages = MessageCatalog::builtin();
        let started_on = chrono::Utc::now().date_naive();

        Ok(Self {
            registry: Arc::new(registry),
            catalog,
            messages,
            seo: SeoService::new(config.site_url.clone(), catalog, messages, started_on),
        })
    }
}

async fn api_not_found(req: HttpRequest) -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::RouteNotFound(req.path().to_string()))
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(MAX_BODY_BYTES)
            .error_handler(|err, _req| AppError::InvalidArguments(err.to_string()).into()),
    )
    .app_data(web::FormConfig::default().limit(MAX_BODY_BYTES))
    .service(
        web::scope("/api")
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::InvalidArguments(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::InvalidArguments(err.to_string()).into()
            }))
            .configure(system_controller::config)
            .configure(tools_controller::config)
            .configure(search_controller::config)
            .configure(preference_controller::config)
            .configure(i18n_controller::config)
            .default_service(web::to(api_not_found)),
    )
    .configure(seo_controller::config)
    .configure(page_controller::config)
    .default_service(web::to(page_controller::not_found));
}

fn build_server(config: &ServerConfig, app_state: web::Data<AppState>) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Cors::permissive())
            .wrap(TracingMiddleware)
            .configure(app_config)
    })
    .workers(config.workers)
    .bind(config.bind_address())?
    .run();
    Ok(server)
}

pub async fn run(config: ServerConfig) -> Result<(), String> {
    info!("Starting web service...");

    let app_state = web::Data::new(
        AppState::new(&config).map_err(|e| format!("Failed to initialize app state: {e:#}"))?,
    );

    let server = build_server(&config, app_state)
        .map_err(|e| format!("Failed to bind server: {e}"))?;

    info!("Starting web service on http://{}", config.bind_address());

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(format!("Web server error: {e}"));
    }

    Ok(())
}

pub struct WebService {
    shutdown_tx: Option<oneshot::Sender<()>>,
    server_handle: Option<tokio::task::JoinHandle<()>>,
    config: ServerConfig,
}

impl WebService {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            shutdown_tx: None,
            server_handle: None,
            config,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub async fn start(&mut self) -> Result<(), String> {
        info!("Starting web service...");
        if self.server_handle.is_some() {
            return Err("Web service is already running".to_string());
        }

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let app_state = web::Data::new(
            AppState::new(&self.config)
                .map_err(|e| format!("Failed to initialize app state: {e:#}"))?,
        );
        let server = build_server(&self.config, app_state)
            .map_err(|e| format!("Failed to bind server: {e}"))?;
        let handle = server.handle();

        let server_handle = tokio::spawn(async move {
            tokio::select! {
                result = server => {
                    if let Err(e) = result {
                        error!("Web server error: {}", e);
                    }
                }
                _ = &mut shutdown_rx => {
                    info!("Web service shutdown signal received");
                    handle.stop(true).await;
                }
            }
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.server_handle = Some(server_handle);

        info!(
            "Web service started successfully on http://{}",
            self.config.bind_address()
        );
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), String> {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            if shutdown_tx.send(()).is_err() {
                error!("Failed to send shutdown signal");
            }
        }

        if let Some(handle) = self.server_handle.take() {
            if let Err(e) = handle.await {
                error!("Error waiting for server shutdown: {}", e);
                return Err(format!("Error waiting for server shutdown: {e}"));
            }
        }

        info!("Web service stopped successfully");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.server_handle.is_some()
    }
}

impl Drop for WebService {
    fn drop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
    }
}
