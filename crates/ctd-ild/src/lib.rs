//! Decision support for connective tissue disease associated interstitial
//! lung disease: a ten-phase assessment wizard with scoring, treatment
//! orientation, follow-up planning and a printable report.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
