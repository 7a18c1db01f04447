//! Core domain types.
//!
//! Цель:
//! - запретить "голые" f64 и строки в логике свопа
//! - зафиксировать единицы измерения (цена в stable за 1 target, проценты, raw-суммы)
//! - сделать ошибки разбора очевидными на уровне типов

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Курс пары: сколько stable стоит 1 target
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Price(pub f64);

/// Ширина полосы в процентах (1.0 = 1%)
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Percent(pub f64);

/// Сумма токена в минимальных единицах (wei и т.п.), как её отдаёт API
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenAmount(pub u128);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty token amount")]
    Empty,
    #[error("invalid token amount: {0}")]
    Invalid(String),
}

/// Описание токена из конфигурации
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub symbol: String,
    pub name: String,
    pub address: String,
    pub decimals: u8,
}

/// Торгуемая пара: target копим, stable служит базой расчёта
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub target: Token,
    pub stable: Token,
}

/// Баланс кошелька и allowance роутера для одного токена
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TokenBalance {
    pub balance: TokenAmount,
    pub allowance: TokenAmount,
}

/// Котировка свопа from → to (суммы в минимальных единицах)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub id: String,
    pub from_amount: TokenAmount,
    pub to_amount: TokenAmount,
    pub preset: Option<String>,
}

/// Снимок кошелька по паре target/stable
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Holdings {
    pub target: TokenBalance,
    pub stable: TokenBalance,
}

//
// --- Conversions & helpers --------------------------------------------------
//

impl Price {
    /// Курс из пары сумм свопа, уже приведённых к decimals.
    /// `None`, если target-сторона нулевая или результат не конечен.
    pub fn per_target(stable: f64, target: f64) -> Option<Price> {
        if target <= 0.0 || stable < 0.0 {
            return None;
        }
        let p = stable / target;
        p.is_finite().then_some(Price(p))
    }

    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

impl Percent {
    /// Перевод процентов → коэффициент
    pub fn as_fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// price * (1 + pct)
    pub fn above(self, price: Price) -> Price {
        Price(price.0 * (1.0 + self.as_fraction()))
    }

    /// price * (1 - pct)
    pub fn below(self, price: Price) -> Price {
        Price(price.0 * (1.0 - self.as_fraction()))
    }

    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl TokenAmount {
    pub const ZERO: TokenAmount = TokenAmount(0);

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// raw / 10^decimals
    pub fn to_decimal(self, decimals: u8) -> f64 {
        self.0 as f64 / 10f64.powi(decimals as i32)
    }

    /// Обратное преобразование (с округлением вниз)
    pub fn from_decimal(value: f64, decimals: u8) -> TokenAmount {
        if !value.is_finite() || value <= 0.0 {
            return TokenAmount::ZERO;
        }
        TokenAmount((value * 10f64.powi(decimals as i32)).floor() as u128)
    }
}

impl TokenAmount {
    /// Как `parse`, но переполнение u128 (безлимитный approve = 2^256-1)
    /// насыщается до `u128::MAX`.
    pub fn parse_saturating(s: &str) -> Result<TokenAmount, AmountError> {
        match s.parse::<TokenAmount>() {
            Err(AmountError::Invalid(raw)) if raw.bytes().all(|b| b.is_ascii_digit()) => {
                Ok(TokenAmount(u128::MAX))
            }
            other => other,
        }
    }
}

impl FromStr for TokenAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        s.parse::<u128>()
            .map(TokenAmount)
            .map_err(|_| AmountError::Invalid(s.to_string()))
    }
}

impl Token {
    /// Адреса в API приходят в разном регистре
    pub fn has_address(&self, address: &str) -> bool {
        self.address.eq_ignore_ascii_case(address)
    }
}

impl Holdings {
    pub fn is_empty(&self) -> bool {
        self.target.balance.is_zero() && self.stable.balance.is_zero()
    }
}

//
// --- Display (для логов) ----------------------------------------------------
//

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.symbol, self.address)
    }
}
