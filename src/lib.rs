//! Over/under line model for per-match count markets (shots, shots on
//! target, fouls): EWMA + shrinkage team estimates, an optional referee
//! adjustment, and a Poisson/Normal mixture over the configured lines.

pub mod backtest;
pub mod config;
pub mod dataset;
pub mod expectation;
pub mod ingest;
pub mod lines;
pub mod recommend;
pub mod referee;
pub mod shrinkage;
pub mod smoothing;
