use thiserror::Error;

use domain::types::{Holdings, TokenAmount, TokenBalance};
use state_machine::stance::Stance;

/// Итог попытки исполнить своп
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionReport {
    /// Своп исполнен: сколько отдали и сколько получили (raw-единицы)
    Filled {
        spent: TokenAmount,
        received: TokenAmount,
    },
    /// Исполнитель сознательно ничего не делал (watch-only)
    Skipped,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaperError {
    #[error("insufficient paper balance: have {have}, need {need}")]
    InsufficientBalance { have: TokenAmount, need: TokenAmount },
}

/// Бумажный кошелёк на пару target/stable.
/// Allowance считается безлимитным, как после approve на роутер.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PaperWallet {
    pub target: TokenAmount,
    pub stable: TokenAmount,
}

impl PaperWallet {
    pub fn new(target: TokenAmount, stable: TokenAmount) -> Self {
        Self { target, stable }
    }

    pub fn holdings(&self) -> Holdings {
        Holdings {
            target: TokenBalance {
                balance: self.target,
                allowance: TokenAmount(u128::MAX),
            },
            stable: TokenBalance {
                balance: self.stable,
                allowance: TokenAmount(u128::MAX),
            },
        }
    }

    /// `Accumulate`: stable → target, `Distribute`: target → stable
    pub fn apply(
        &mut self,
        stance: Stance,
        spent: TokenAmount,
        received: TokenAmount,
    ) -> Result<(), PaperError> {
        let (from, to) = match stance {
            Stance::Accumulate => (&mut self.stable, &mut self.target),
            Stance::Distribute => (&mut self.target, &mut self.stable),
        };

        if from.0 < spent.0 {
            return Err(PaperError::InsufficientBalance {
                have: *from,
                need: spent,
            });
        }

        from.0 -= spent.0;
        to.0 = to.0.saturating_add(received.0);
        Ok(())
    }
}
