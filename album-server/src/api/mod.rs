//! HTTP API handlers for album-server

pub mod dates;
pub mod health;
pub mod photos;

pub use dates::update_dates;
pub use health::health_routes;
pub use photos::list_photos;
