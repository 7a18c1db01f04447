use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MonitorError {
    /// Нарушение инварианта: стойка пришла извне (seed store, конфиг) и не распознана
    #[error("unknown stance: {0:?}")]
    UnknownStance(String),

    #[error("invalid price: {0} (must be finite and non-negative)")]
    InvalidPrice(f64),

    #[error("invalid {name} percent: {value} (must be finite and positive)")]
    InvalidPercent { name: &'static str, value: f64 },
}
