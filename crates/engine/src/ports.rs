//! Внешние коллабораторы драйвера. Монитор про них ничего не знает.
#![allow(async_fn_in_trait)]

use anyhow::Result;

use domain::types::{Holdings, Pair, Price, Quote, Token, TokenAmount};
use execution::paper::ExecutionReport;
use state_machine::stance::Stance;
use storage::seed::StanceSeed;

/// Что драйвер просит исполнить после срабатывания
#[derive(Debug, Clone, PartialEq)]
pub struct SwapOrder {
    pub stance: Stance,
    pub from: Token,
    pub to: Token,
    pub amount: TokenAmount,
    pub observed: Price,
}

pub trait BalanceSource {
    async fn holdings(&self) -> Result<Holdings>;
}

pub trait QuoteSource {
    async fn quote(&self, from: &Token, to: &Token, amount: TokenAmount) -> Result<Quote>;
}

pub trait TradeExecutor {
    async fn execute(&mut self, order: &SwapOrder, quote: &Quote) -> Result<ExecutionReport>;
}

/// Учёт балансов и seed стойки между рестартами
pub trait SeedStore {
    async fn load_seed(&self) -> Result<Option<StanceSeed>>;
    async fn save_seed(&self, seed: &StanceSeed) -> Result<()>;
    async fn record_balances(&self, pair: &Pair, holdings: &Holdings) -> Result<()>;
}
