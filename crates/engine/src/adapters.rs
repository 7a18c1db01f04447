use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use tracing::info;

use domain::types::{Holdings, Pair, Quote, Token, TokenAmount};
use execution::paper::{ExecutionReport, PaperWallet};
use execution::sim::ExecutionModel;
use oneinch::OneInchRest;
use storage::RedisStore;
use storage::seed::StanceSeed;

use crate::ports::{BalanceSource, QuoteSource, SeedStore, SwapOrder, TradeExecutor};

/// Живой кошелёк через 1inch (только чтение)
#[derive(Clone)]
pub struct OneInchMarket {
    pub rest: OneInchRest,
    pub wallet: String,
    pub pair: Pair,
}

impl BalanceSource for OneInchMarket {
    async fn holdings(&self) -> Result<Holdings> {
        self.rest
            .holdings(&self.wallet, &self.pair.target, &self.pair.stable)
            .await
    }
}

impl QuoteSource for OneInchMarket {
    async fn quote(&self, from: &Token, to: &Token, amount: TokenAmount) -> Result<Quote> {
        self.rest.quote(&self.wallet, from, to, amount).await
    }
}

/// Бумажный стол: и источник балансов, и исполнитель.
/// Клоны делят один кошелёк.
#[derive(Clone)]
pub struct PaperDesk {
    wallet: Arc<Mutex<PaperWallet>>,
    model: ExecutionModel,
}

impl PaperDesk {
    pub fn new(wallet: PaperWallet, model: ExecutionModel) -> Self {
        Self {
            wallet: Arc::new(Mutex::new(wallet)),
            model,
        }
    }

    pub fn snapshot(&self) -> Result<PaperWallet> {
        self.wallet
            .lock()
            .map(|w| *w)
            .map_err(|_| anyhow!("paper wallet lock poisoned"))
    }
}

impl BalanceSource for PaperDesk {
    async fn holdings(&self) -> Result<Holdings> {
        Ok(self.snapshot()?.holdings())
    }
}

impl TradeExecutor for PaperDesk {
    async fn execute(&mut self, order: &SwapOrder, quote: &Quote) -> Result<ExecutionReport> {
        let received = self.model.fill_amount(quote.to_amount);

        let mut wallet = self
            .wallet
            .lock()
            .map_err(|_| anyhow!("paper wallet lock poisoned"))?;
        wallet.apply(order.stance, order.amount, received)?;

        info!(
            "paper swap {} {} -> {} {}",
            order.amount, order.from.symbol, received, order.to.symbol
        );

        Ok(ExecutionReport::Filled {
            spent: order.amount,
            received,
        })
    }
}

/// Ничего не исполняет, только пишет в лог, какой своп был бы сделан
#[derive(Debug, Default, Clone, Copy)]
pub struct WatchOnly;

impl TradeExecutor for WatchOnly {
    async fn execute(&mut self, order: &SwapOrder, quote: &Quote) -> Result<ExecutionReport> {
        info!(
            "watch-only: would swap {} {} -> {} {} (quote {})",
            order.amount, order.from.symbol, quote.to_amount, order.to.symbol, quote.id
        );
        Ok(ExecutionReport::Skipped)
    }
}

impl SeedStore for RedisStore {
    async fn load_seed(&self) -> Result<Option<StanceSeed>> {
        RedisStore::load_seed(self).await
    }

    async fn save_seed(&self, seed: &StanceSeed) -> Result<()> {
        RedisStore::save_seed(self, seed).await
    }

    async fn record_balances(&self, pair: &Pair, holdings: &Holdings) -> Result<()> {
        self.record_balance(&pair.target.symbol, holdings.target.balance)
            .await?;
        self.record_balance(&pair.stable.symbol, holdings.stable.balance)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::types::Price;
    use state_machine::stance::Stance;

    fn token(symbol: &str, decimals: u8) -> Token {
        Token {
            symbol: symbol.into(),
            name: symbol.into(),
            address: format!("0x{}", symbol.to_lowercase()),
            decimals,
        }
    }

    fn buy_order(amount: u128) -> SwapOrder {
        SwapOrder {
            stance: Stance::Accumulate,
            from: token("USDC", 6),
            to: token("WETH", 18),
            amount: TokenAmount(amount),
            observed: Price(2000.0),
        }
    }

    fn quote(from: u128, to: u128) -> Quote {
        Quote {
            id: "q".into(),
            from_amount: TokenAmount(from),
            to_amount: TokenAmount(to),
            preset: None,
        }
    }

    #[tokio::test]
    async fn paper_desk_shares_wallet_between_clones() {
        let desk = PaperDesk::new(
            PaperWallet::new(TokenAmount::ZERO, TokenAmount(1_000)),
            ExecutionModel::FREE,
        );
        let mut executor = desk.clone();

        let report = executor
            .execute(&buy_order(1_000), &quote(1_000, 42))
            .await
            .unwrap();
        assert_eq!(
            report,
            ExecutionReport::Filled {
                spent: TokenAmount(1_000),
                received: TokenAmount(42)
            }
        );

        let h = desk.holdings().await.unwrap();
        assert_eq!(h.target.balance, TokenAmount(42));
        assert!(h.stable.balance.is_zero());
    }

    #[tokio::test]
    async fn paper_desk_refuses_overspend() {
        let mut desk = PaperDesk::new(
            PaperWallet::new(TokenAmount::ZERO, TokenAmount(10)),
            ExecutionModel::FREE,
        );
        assert!(desk.execute(&buy_order(11), &quote(11, 1)).await.is_err());
        assert_eq!(
            desk.snapshot().unwrap(),
            PaperWallet::new(TokenAmount::ZERO, TokenAmount(10))
        );
    }

    #[tokio::test]
    async fn watch_only_never_fills() {
        let mut w = WatchOnly;
        let report = w.execute(&buy_order(5), &quote(5, 1)).await.unwrap();
        assert_eq!(report, ExecutionReport::Skipped);
    }
}
