//! Cookbook HTTP server.
//!
//! Serves the cookbook page, the form posts behind it, and the mock chat
//! endpoint the recipe panel talks to.

pub mod chat_api;
pub mod chat_client;
pub mod health_api;
pub mod page;
pub mod recipe_flow;
pub mod server;
pub mod ui;

pub use chat_client::HttpChatBackend;
pub use recipe_flow::ask_for_recipe;
pub use server::{GatewayState, PageSettings, build_router, serve, start_server};
