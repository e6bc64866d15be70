pub mod cli;
pub mod constants;
pub mod core;
pub mod menu;
pub mod models;
pub mod system;
