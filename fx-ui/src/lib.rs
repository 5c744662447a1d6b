pub mod app;
pub mod config;
pub mod logging;
pub mod routes;
pub mod utils;
pub mod views;

pub use app::{App, AppError};
pub use routes::Route;
