pub mod health;
pub mod url;

pub use health::health_handler;
pub use url::{create_url_handler, redirect_handler};
