use std::time::Duration;

use anyhow::{Result, bail};
use tracing::info;

use domain::types::{Holdings, Pair, Price};
use execution::paper::ExecutionReport;
use state_machine::monitor::TriggerMonitor;
use state_machine::stance::Stance;
use storage::seed::StanceSeed;

use crate::config::RearmMode;
use crate::event::EngineEvent;
use crate::ports::{BalanceSource, QuoteSource, SeedStore, SwapOrder, TradeExecutor};
use crate::sink;
use crate::tick::{holding_stance, observed_rate, rate_from_amounts, swap_amount, swap_legs};

#[derive(Debug, Copy, Clone)]
pub struct DriverParams {
    /// Минимальный выход свопа в единицах to-токена
    pub min_output: f64,
    pub rearm: RearmMode,
    pub poll_interval: Duration,
    pub cooldown: Duration,
}

/// Цикл опроса: балансы → котировка → монитор → (своп → перевооружение).
/// Единственный владелец монитора.
pub struct Driver<B, Q, E, S> {
    monitor: TriggerMonitor,
    /// Стойка монитора уже сверена с балансами
    synced: bool,
    pair: Pair,
    params: DriverParams,
    balances: B,
    quotes: Q,
    executor: E,
    store: S,
}

impl<B, Q, E, S> Driver<B, Q, E, S>
where
    B: BalanceSource,
    Q: QuoteSource,
    E: TradeExecutor,
    S: SeedStore,
{
    pub fn new(
        monitor: TriggerMonitor,
        pair: Pair,
        params: DriverParams,
        balances: B,
        quotes: Q,
        executor: E,
        store: S,
    ) -> Self {
        Self {
            monitor,
            synced: false,
            pair,
            params,
            balances,
            quotes,
            executor,
            store,
        }
    }

    pub fn monitor(&self) -> &TriggerMonitor {
        &self.monitor
    }

    /// Крутится до Ctrl-C или фатальной ошибки
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "driver started: {}/{}, stance {}, up {}, down {}",
            self.pair.target,
            self.pair.stable,
            self.monitor.stance(),
            self.monitor.trigger_up(),
            self.monitor.trigger_down()
        );

        loop {
            let wait = self.tick().await?;

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown requested");
                    return Ok(());
                }
            }
        }
    }

    /// Один цикл; возвращает паузу до следующего
    pub async fn tick(&mut self) -> Result<Duration> {
        let mut events = Vec::new();
        let res = self.cycle(&mut events).await;
        sink::consume(events);
        res
    }

    async fn cycle(&mut self, events: &mut Vec<EngineEvent>) -> Result<Duration> {
        let holdings = self.balances.holdings().await?;
        self.check_holdings(&holdings)?;
        self.store.record_balances(&self.pair, &holdings).await?;

        let Some(direction) = holding_stance(&holdings) else {
            events.push(EngineEvent::Warn(format!(
                "both {} and {} are held, skipping cycle",
                self.pair.target.symbol, self.pair.stable.symbol
            )));
            return Ok(self.params.poll_interval);
        };

        self.align(direction, events);

        let stance = self.monitor.stance();
        let (from, to) = swap_legs(stance, &self.pair);
        let amount = swap_amount(stance, &holdings);
        let quote = self.quotes.quote(from, to, amount).await?;

        let Some(rate) = observed_rate(stance, &self.pair, &quote) else {
            events.push(EngineEvent::Warn(format!(
                "quote {} has no usable rate ({} -> {})",
                quote.id, quote.from_amount, quote.to_amount
            )));
            return Ok(self.params.poll_interval);
        };

        self.monitor.update(rate)?;
        events.push(EngineEvent::Observation {
            stance,
            price: rate,
            trigger_up: self.monitor.trigger_up(),
            trigger_down: self.monitor.trigger_down(),
            triggered: self.monitor.is_triggered(),
            cause: self.monitor.last_cause(),
        });

        if !self.monitor.is_triggered() {
            return Ok(self.params.poll_interval);
        }

        // своп только при выходе строго выше минимума
        let output = quote.to_amount.to_decimal(to.decimals);
        if output <= self.params.min_output {
            events.push(EngineEvent::BelowMinOutput {
                output,
                min_output: self.params.min_output,
            });
            return Ok(self.params.poll_interval);
        }

        let order = SwapOrder {
            stance,
            from: from.clone(),
            to: to.clone(),
            amount,
            observed: rate,
        };

        match self.executor.execute(&order, &quote).await {
            Ok(ExecutionReport::Filled { spent, received }) => {
                let fill = rate_from_amounts(stance, &self.pair, spent, received).unwrap_or(rate);
                events.push(EngineEvent::Executed {
                    stance,
                    spent,
                    received,
                    price: fill,
                });

                self.flip(fill, events).await?;
                Ok(self.params.cooldown)
            }
            Ok(ExecutionReport::Skipped) => Ok(self.params.poll_interval),
            Err(e) => {
                // монитор не переключаем: на следующем цикле попробуем снова
                events.push(EngineEvent::ExecutionFailed(format!("{:#}", e)));
                Ok(self.params.poll_interval)
            }
        }
    }

    fn check_holdings(&self, h: &Holdings) -> Result<()> {
        if h.is_empty() {
            bail!(
                "both {} and {} balances are zero",
                self.pair.target.symbol,
                self.pair.stable.symbol
            );
        }
        if h.target.allowance.is_zero() {
            bail!("router allowance for {} is zero", self.pair.target.symbol);
        }
        if h.stable.allowance.is_zero() {
            bail!("router allowance for {} is zero", self.pair.stable.symbol);
        }
        Ok(())
    }

    /// Приводит стойку монитора к тому, что реально лежит в кошельке.
    /// Расхождение исправляется на любом цикле (кошелёк могли поменять
    /// снаружи); на первом цикле ещё и открываются вырожденные полосы (якорь 0).
    fn align(&mut self, direction: Stance, events: &mut Vec<EngineEvent>) {
        let current = self.monitor.stance();
        let degenerate = !self.synced && self.monitor.trigger_up().0 <= 0.0;

        if current != direction || degenerate {
            self.monitor
                .switch_stance(direction, Price(0.0), Price(0.0));

            if current != direction {
                events.push(EngineEvent::Realigned {
                    from: current,
                    to: direction,
                });
            } else {
                events.push(EngineEvent::Log(format!(
                    "{} bands opened, seeding from first quote",
                    direction
                )));
            }
        }

        self.synced = true;
    }

    async fn flip(&mut self, fill: Price, events: &mut Vec<EngineEvent>) -> Result<()> {
        let from = self.monitor.stance();
        let next = from.opposite();

        match self.params.rearm {
            RearmMode::Percent => self.monitor.rearm(next, fill)?,
            RearmMode::Open => self.monitor.switch_stance(next, Price(0.0), Price(0.0)),
        }

        // после покупки reference = цена покупки, даже если полосы открыты
        let seed = StanceSeed {
            stance: next,
            reference: match next {
                Stance::Distribute => fill,
                Stance::Accumulate => Price(0.0),
            },
        };
        self.store.save_seed(&seed).await?;

        events.push(EngineEvent::Flipped {
            from,
            to: next,
            trigger_up: self.monitor.trigger_up(),
            trigger_down: self.monitor.trigger_down(),
            reference: seed.reference,
        });
        Ok(())
    }
}
