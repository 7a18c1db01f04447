use std::fmt;
use std::str::FromStr;

use crate::error::MonitorError;

/// Сторона стратегии.
///
/// `Accumulate`: держим stable, ждём момента купить target ("BUY").
/// `Distribute`: держим target, ждём момента продать его ("SELL").
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Stance {
    Accumulate,
    Distribute,
}

impl Stance {
    pub fn opposite(self) -> Stance {
        match self {
            Stance::Accumulate => Stance::Distribute,
            Stance::Distribute => Stance::Accumulate,
        }
    }

    /// Человекочитаемое имя ордера (для логов и seed store)
    pub fn label(self) -> &'static str {
        match self {
            Stance::Accumulate => "BUY",
            Stance::Distribute => "SELL",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stance {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "accumulate" => Ok(Stance::Accumulate),
            "sell" | "distribute" => Ok(Stance::Distribute),
            _ => Err(MonitorError::UnknownStance(s.to_string())),
        }
    }
}

/// Числовой код: 0 = BUY, 1 = SELL
impl TryFrom<u8> for Stance {
    type Error = MonitorError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Stance::Accumulate),
            1 => Ok(Stance::Distribute),
            other => Err(MonitorError::UnknownStance(other.to_string())),
        }
    }
}
