pub mod calculations;
pub mod db;
pub mod models;

pub use db::repository::{EcoleRepository, RepositoryError};
pub use models::*;
