pub mod config;
pub mod directory;
pub mod feed;
pub mod platform;
pub mod session;
pub mod state;
pub mod station;
