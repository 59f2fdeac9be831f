pub mod form_builder;
pub mod page_renderer;
pub mod seo_service;

pub use page_renderer::PageRenderer;
pub use seo_service::{PageMetadata, SeoService};
