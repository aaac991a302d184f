pub mod api;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod listing;
pub mod nav;
pub mod registry;
pub mod resources;
pub mod routes;
pub mod state;
pub mod templates_structs;
