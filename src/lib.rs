//! Least-cost economic dispatch of power-generation fleets.
//!
//! Given a roster of technologies and a net-demand time series, this crate formulates a linear
//! program (one output variable per technology and time step, capacity bounds, per-step demand
//! balance, optional ramp limits), solves it with the HiGHS solver and exposes the resulting
//! dispatch table and total operating cost.
#![warn(missing_docs)]
pub mod demand;
pub mod error;
pub mod log;
pub mod model;
pub mod optimisation;
pub mod results;
pub mod technology;
pub mod time_step;
pub mod units;

#[cfg(test)]
mod fixture;
