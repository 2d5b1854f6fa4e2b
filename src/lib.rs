pub mod aggregate;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod report;
pub mod select;
pub mod synth;
