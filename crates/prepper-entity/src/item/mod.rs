//! Inventory item entities.

pub mod category;
pub mod expiration;
pub mod model;

pub use category::Category;
pub use expiration::{ExpirationStatus, days_until};
pub use model::{CreateItem, Item, UpdateItem};
