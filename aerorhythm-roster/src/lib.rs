pub mod coverage;
pub mod crew;
pub mod disruption;
pub mod flight;
pub mod job;
pub mod lifecycle;
pub mod metric;
pub mod query;
pub mod roster_assignment;
pub mod strategy;

mod util;
