#![forbid(unsafe_code)]

pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod render;
pub mod scheduler;
pub mod snapshot;

pub type Result<T> = std::result::Result<T, crate::error::Error>;
