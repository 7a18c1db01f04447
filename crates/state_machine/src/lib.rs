pub mod cause;
pub mod error;
pub mod monitor;
pub mod stance;

pub use cause::TriggerCause;
pub use error::MonitorError;
pub use monitor::TriggerMonitor;
pub use stance::Stance;

#[cfg(test)]
mod tests;
