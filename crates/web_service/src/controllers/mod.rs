pub mod i18n_controller;
pub mod page_controller;
pub mod preference_controller;
pub mod search_controller;
pub mod seo_controller;
pub mod system_controller;
pub mod tools_controller;
