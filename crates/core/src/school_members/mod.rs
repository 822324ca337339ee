//! School members module - subscriptions of users to schools.

mod school_members_event_handler;
mod school_members_model;
mod school_members_service;
mod school_members_traits;

#[cfg(test)]
mod school_members_service_tests;

pub use school_members_event_handler::SchoolMemberEventHandler;
pub use school_members_model::{NewSchoolMember, SchoolMember, SchoolMemberRole, SchoolSubscription};
pub use school_members_service::SchoolMemberService;
pub use school_members_traits::{SchoolMemberRepositoryTrait, SchoolMemberServiceTrait};
