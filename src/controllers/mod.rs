pub mod buildings;
pub mod config;
pub mod images;
pub mod rankings;
pub mod reviews;

pub use self::config::config;
