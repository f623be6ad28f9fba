// Public API for integration tests and potential library usage

pub mod api;
pub mod auth;
pub mod config;
pub mod game;
pub mod haunt;
pub mod sidequest;
pub mod state;
pub mod storage;
pub mod types;
