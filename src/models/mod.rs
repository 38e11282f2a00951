pub mod auth;
pub mod buildings;
pub mod rankings;
pub mod reviews;

pub use self::auth::*;
pub use self::buildings::*;
pub use self::rankings::*;
pub use self::reviews::*;
