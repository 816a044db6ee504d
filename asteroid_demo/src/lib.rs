//! Asteroid field demo
//!
//! A camera flies through a field of spinning icosahedra and shoots them
//! down with a laser. Built on `field_engine`; see [`app::AsteroidDemo`]
//! for the entry point.

pub mod app;
pub mod config;
pub mod error;
pub mod field;
pub mod geometry;

pub use app::AsteroidDemo;
pub use config::DemoConfig;
pub use error::AppError;
