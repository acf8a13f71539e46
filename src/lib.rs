pub mod api;
pub mod app;
pub mod code_utils;
pub mod config;
pub mod data;
pub mod markdown;
pub mod model;
pub mod radar;
pub mod ui;
pub mod view_models;

pub use app::TutorApp;
