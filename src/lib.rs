pub mod client;
pub mod config;
pub mod health;
pub mod mw;
pub mod quiz;
pub mod server;
