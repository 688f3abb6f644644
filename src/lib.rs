pub mod cli;
pub mod collection;
pub mod configuration;
pub mod domain;
pub mod output;
pub mod telemetry;
pub mod youtube_api;
