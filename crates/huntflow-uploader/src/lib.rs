//! Roster-to-Huntflow import: locate each candidate's résumé, have the service parse it,
//! create the applicant, and attach it to the matching vacancy at the requested status.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
