pub mod api_types;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod recorder;
pub mod resolver;
pub mod validate;
