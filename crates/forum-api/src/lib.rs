pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod openapi;
pub mod resources;
pub mod routes;
pub mod scope;
pub mod state;
pub mod validation;

pub use app::build_router;
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
