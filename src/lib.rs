pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod panel;
pub mod render;
pub mod services;
