// Library target shared by the binary, integration tests and benchmarks.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod generator;
pub mod session;
pub mod store;
pub mod ui;
