pub mod rankings;

pub use self::rankings::*;
