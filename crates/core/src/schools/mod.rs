//! Schools module - domain models, services, and traits.

mod schools_model;
mod schools_service;
mod schools_traits;


pub use schools_model::{NewSchool, School, SchoolRegion};
pub use schools_service::SchoolService;
pub use schools_traits::{SchoolRepositoryTrait, SchoolServiceTrait};
