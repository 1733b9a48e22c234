pub mod admins;
pub mod categories;
pub mod models;
pub mod pool;
pub mod repository;
pub mod schema;

pub use models::{Admin, AdminProfile, Category, CategoryFields, NewAdmin};
pub use pool::{connect, DatabaseError, PgHealthProbe};
pub use repository::{AdminRepository, CategoryRepository, HealthProbe, Repositories};
