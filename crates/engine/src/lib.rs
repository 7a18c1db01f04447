pub mod adapters;
pub mod config;
pub mod driver;
pub mod event;
pub mod ports;
pub mod sink;
pub mod tick;
