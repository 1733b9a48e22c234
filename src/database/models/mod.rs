pub mod admin;
pub mod category;

pub use admin::{Admin, AdminProfile, NewAdmin};
pub use category::{Category, CategoryFields};
