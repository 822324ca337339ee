//! School repository and service traits.

use async_trait::async_trait;

use super::schools_model::{NewSchool, School, SchoolRegion};
use crate::errors::Result;

/// Persistence contract for schools.
#[async_trait]
pub trait SchoolRepositoryTrait: Send + Sync {
    async fn create(&self, name: String, region: SchoolRegion) -> Result<School>;

    /// Finds a school that has not been soft-deleted.
    fn find_active(&self, school_id: &str) -> Result<Option<School>>;

    /// Soft-deletes a school. Returns the number of rows affected.
    async fn soft_delete(&self, school_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait SchoolServiceTrait: Send + Sync {
    /// Creates a school and publishes `school.create` for the creator's
    /// membership.
    async fn create_school(&self, new_school: NewSchool) -> Result<School>;

    /// Returns the active school or `Error::SchoolNotFound`.
    fn get_school(&self, school_id: &str) -> Result<School>;
}
