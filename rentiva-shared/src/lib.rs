pub mod catalog;
pub mod discount;
pub mod holiday;
pub mod location;
pub mod money;

pub use catalog::{AddonPrice, Category, RentalItem};
pub use discount::DiscountCode;
pub use holiday::Holiday;
pub use location::{AccountDetails, DateSpan, LocationData};
pub use money::round2;
