pub mod buildings;
pub mod filter_review_record;
pub mod location;
pub mod rankings;
pub mod reviews;

pub use self::buildings::*;
pub use self::filter_review_record::filter_review_record;
pub use self::location::*;
pub use self::rankings::*;
pub use self::reviews::*;
