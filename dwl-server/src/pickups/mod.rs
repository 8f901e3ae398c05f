//! Pickup requests: scheduling, assignment and the completed-pickup flow

mod flow;
mod scheduler;

pub use flow::PickupFlow;
pub use scheduler::{Scheduler, validate_pickup};
