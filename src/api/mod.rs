pub mod error;
pub mod images;
pub mod reviews;
pub mod schema;

pub use self::error::*;
pub use self::images::*;
pub use self::schema::*;
