pub mod images;

pub use self::images::*;
