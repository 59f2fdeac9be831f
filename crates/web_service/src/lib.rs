//! HTTP surface of the dev toolbox: the JSON API under `/api`, the
//! server-rendered pages, and the SEO endpoints.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod server;
pub mod services;

pub use config::ServerConfig;
pub use error::AppError;
pub use server::{app_config, run, AppState, WebService};
