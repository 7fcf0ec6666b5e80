// src/lib.rs

//! Client data layer for a multi-journal academic publishing site.
//!
//! Resource stores mirror the backend's REST collections, the session
//! store and route guard gate the admin views, and the rich-text and view
//! helpers prepare stored text for display.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod richtext;
pub mod session;
pub mod site;
pub mod store;
pub mod utils;
pub mod view;

pub use site::Site;
