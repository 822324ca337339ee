//! Domain events module.
//!
//! Provides the domain event types, the sink trait services publish through
//! after successful mutations, and the in-process dispatcher that fans a
//! published event out to the handlers registered for its name.

mod dispatcher;
mod domain_event;
mod sink;

pub use dispatcher::*;
pub use domain_event::*;
pub use sink::*;
