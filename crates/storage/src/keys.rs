use domain::types::TokenAmount;

pub const STANCE_KEY: &str = "STANCE";
pub const REFERENCE_PRICE_KEY: &str = "REFERENCE_PRICE";

/// Последний ненулевой баланс токена
pub fn last_balance_key(symbol: &str) -> String {
    format!("LAST_BALANCE:{}", symbol)
}

/// История балансов токена (LPUSH, свежие в голове)
pub fn balance_history_key(symbol: &str) -> String {
    format!("BALANCES:{}", symbol)
}

/// Что делать с ключами баланса после очередного снимка
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BalanceWrite {
    pub set_last: bool,
    pub push_history: bool,
}

impl BalanceWrite {
    pub const NOTHING: BalanceWrite = BalanceWrite {
        set_last: false,
        push_history: false,
    };
}

/// Ключ создаётся при первом снимке (даже нулевом); дальше пишем
/// только ненулевой баланс, отличающийся от сохранённого.
pub fn plan_balance_write(stored: Option<&str>, current: TokenAmount) -> BalanceWrite {
    if current.is_zero() {
        return BalanceWrite {
            set_last: stored.is_none(),
            push_history: false,
        };
    }

    let changed = stored != Some(current.to_string().as_str());
    BalanceWrite {
        set_last: changed,
        push_history: changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_by_symbol() {
        assert_eq!(last_balance_key("WETH"), "LAST_BALANCE:WETH");
        assert_eq!(balance_history_key("USDC"), "BALANCES:USDC");
    }

    #[test]
    fn first_zero_snapshot_only_creates_key() {
        assert_eq!(
            plan_balance_write(None, TokenAmount::ZERO),
            BalanceWrite {
                set_last: true,
                push_history: false
            }
        );
    }

    #[test]
    fn first_nonzero_snapshot_is_recorded_in_history() {
        assert_eq!(
            plan_balance_write(None, TokenAmount(5)),
            BalanceWrite {
                set_last: true,
                push_history: true
            }
        );
    }

    #[test]
    fn unchanged_or_zero_balance_writes_nothing() {
        assert_eq!(plan_balance_write(Some("5"), TokenAmount(5)), BalanceWrite::NOTHING);
        assert_eq!(plan_balance_write(Some("5"), TokenAmount::ZERO), BalanceWrite::NOTHING);
    }

    #[test]
    fn changed_balance_updates_and_pushes() {
        let w = plan_balance_write(Some("5"), TokenAmount(6));
        assert!(w.set_last && w.push_history);
    }
}
