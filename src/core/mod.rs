pub mod components;
pub mod config;
pub mod constants;
pub mod level;
pub mod system;
