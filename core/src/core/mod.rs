//! Simulated time: the shared global clock and calendar arithmetic.

pub mod clock;
