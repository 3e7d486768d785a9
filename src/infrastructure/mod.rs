// Infrastructure layer - external dependencies and adapters
pub mod config;
pub mod influx_source;
