// Application layer - fetch cycles, pivoting, and scheduling
pub mod monitor_service;
pub mod observation_source;
pub mod pivot;
pub mod scheduler;
pub mod state;
