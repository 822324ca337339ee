//! SQLite storage implementation for school news.

mod model;
mod repository;

pub use model::{SchoolNewsChangesetDB, SchoolNewsDB};
pub use repository::SchoolNewsRepository;
