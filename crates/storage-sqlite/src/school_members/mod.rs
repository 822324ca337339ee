//! SQLite storage implementation for school memberships.

mod model;
mod repository;

pub use model::SchoolMemberDB;
pub use repository::SchoolMemberRepository;
