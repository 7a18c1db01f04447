use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};

use domain::types::{Pair, Percent, Token};

/// Откуда берутся балансы и кто исполняет своп
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Бумажный кошелёк, реальные котировки
    Paper,
    /// Реальный кошелёк, сделки только логируются
    Watch,
}

/// Как перевооружать монитор после свопа
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RearmMode {
    /// Полосы пересчитываются от цены исполнения по процентам
    Percent,
    /// Открытые полосы, засеваются первым наблюдением
    Open,
}

/// Все параметры берутся из env (и .env), флаги их перекрывают
#[derive(Parser, Debug, Clone)]
#[command(name = "engine", about = "Trailing trigger-band swap poller")]
pub struct Args {
    #[arg(long, env = "ENV", default_value = "development")]
    pub env: String,

    #[arg(long, env = "WALLET_ADDRESS")]
    pub wallet_address: String,
    #[arg(long, env = "CHAIN_ID", default_value = "1")]
    pub chain_id: String,
    #[arg(long, env = "ROUTER_CONTRACT_ADDRESS")]
    pub router_address: String,
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    #[arg(long, env = "TARGET_TOKEN_SYMBOL")]
    pub target_symbol: String,
    #[arg(long, env = "TARGET_TOKEN_NAME", default_value = "")]
    pub target_name: String,
    #[arg(long, env = "TARGET_TOKEN_DECIMALS")]
    pub target_decimals: u8,
    #[arg(long, env = "TARGET_TOKEN_ADDRESS")]
    pub target_address: String,

    #[arg(long, env = "STABLE_TOKEN_SYMBOL")]
    pub stable_symbol: String,
    #[arg(long, env = "STABLE_TOKEN_NAME", default_value = "")]
    pub stable_name: String,
    #[arg(long, env = "STABLE_TOKEN_DECIMALS")]
    pub stable_decimals: u8,
    #[arg(long, env = "STABLE_TOKEN_ADDRESS")]
    pub stable_address: String,

    #[arg(long, env = "LIMIT_PERCENT", default_value_t = 0.5)]
    pub limit_percent: f64,
    #[arg(long, env = "STOP_LOSS_PERCENT", default_value_t = 1.0)]
    pub stop_loss_percent: f64,
    /// Якорь полос для старта в BUY без сохранённого seed (0 = засеять первым наблюдением)
    #[arg(long, env = "INITIAL_PRICE", default_value_t = 0.0)]
    pub initial_price: f64,

    #[arg(long, env = "POLL_INTERVAL_SECS", default_value_t = 10)]
    pub poll_interval_secs: u64,
    #[arg(long, env = "COOLDOWN_SECS", default_value_t = 3600)]
    pub cooldown_secs: u64,
    /// Минимальный выход свопа (в единицах to-токена); исполняем только строго выше
    #[arg(long, env = "MIN_OUTPUT", default_value_t = 971.0)]
    pub min_output: f64,

    #[arg(long, env = "MODE", value_enum, default_value_t = Mode::Paper)]
    pub mode: Mode,
    #[arg(long, env = "REARM", value_enum, default_value_t = RearmMode::Percent)]
    pub rearm: RearmMode,

    #[arg(long, env = "PAPER_TARGET_BALANCE", default_value_t = 0.0)]
    pub paper_target: f64,
    #[arg(long, env = "PAPER_STABLE_BALANCE", default_value_t = 1000.0)]
    pub paper_stable: f64,
    #[arg(long, env = "PAPER_FEE_BPS", default_value_t = 10.0)]
    pub fee_bps: f64,
    #[arg(long, env = "PAPER_SLIPPAGE_BPS", default_value_t = 5.0)]
    pub slippage_bps: f64,
}

impl Args {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    pub fn pair(&self) -> Pair {
        Pair {
            target: Token {
                symbol: self.target_symbol.clone(),
                name: self.target_name.clone(),
                address: self.target_address.clone(),
                decimals: self.target_decimals,
            },
            stable: Token {
                symbol: self.stable_symbol.clone(),
                name: self.stable_name.clone(),
                address: self.stable_address.clone(),
                decimals: self.stable_decimals,
            },
        }
    }

    pub fn limit(&self) -> Percent {
        Percent(self.limit_percent)
    }

    pub fn stop_loss(&self) -> Percent {
        Percent(self.stop_loss_percent)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.limit().is_valid() {
            bail!("LIMIT_PERCENT must be positive, got {}", self.limit_percent);
        }
        if !self.stop_loss().is_valid() {
            bail!("STOP_LOSS_PERCENT must be positive, got {}", self.stop_loss_percent);
        }
        if !(self.initial_price.is_finite() && self.initial_price >= 0.0) {
            bail!("INITIAL_PRICE must be non-negative, got {}", self.initial_price);
        }
        if self.target_address.eq_ignore_ascii_case(&self.stable_address) {
            bail!("target and stable token addresses must differ");
        }
        if self.target_decimals > 36 || self.stable_decimals > 36 {
            bail!("token decimals above 36 are not supported");
        }
        if self.poll_interval_secs == 0 {
            bail!("POLL_INTERVAL_SECS must be at least 1");
        }
        if !(self.min_output.is_finite() && self.min_output >= 0.0) {
            bail!("MIN_OUTPUT must be non-negative, got {}", self.min_output);
        }
        if self.paper_target < 0.0 || self.paper_stable < 0.0 {
            bail!("paper balances must be non-negative");
        }
        Ok(())
    }
}
