pub mod app_config;
pub mod constants;
pub mod content;
pub mod de;
pub mod error;
pub mod format;
pub mod http;
pub mod reports;
pub mod resource;
pub mod rich_text;
