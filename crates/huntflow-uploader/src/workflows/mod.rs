pub mod candidates;
pub mod huntflow;
pub mod roster;
