// Simulation Flow Controller: one mock-interview session from setup to report.
// `session` is the pure state machine; `controller` drives it with cancellable
// gateway calls and the answer clock.

pub mod catalog;
pub mod controller;
pub mod session;
mod timer;
