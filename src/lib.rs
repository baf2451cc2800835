pub mod args;
pub mod attendance;
pub mod config;
pub mod data;
pub mod form;
pub mod render;
