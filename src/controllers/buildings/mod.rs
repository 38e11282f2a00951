pub mod buildings;

pub use self::buildings::*;
