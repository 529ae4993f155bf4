pub mod command;
pub mod config;
pub mod feed;
pub mod logging;
pub mod render;
