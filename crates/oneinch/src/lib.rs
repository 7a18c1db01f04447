pub mod models;
pub mod rest;

pub use rest::OneInchRest;
