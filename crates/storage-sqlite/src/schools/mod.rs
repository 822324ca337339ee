//! SQLite storage implementation for schools.

mod model;
mod repository;

pub use model::SchoolDB;
pub use repository::SchoolRepository;
