pub mod handlers;
pub mod models;
pub mod parse;
pub mod prompt;
pub mod state;
