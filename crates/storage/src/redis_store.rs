use anyhow::Context;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use tracing::{debug, warn};

use domain::types::TokenAmount;

use crate::keys::{
    REFERENCE_PRICE_KEY, STANCE_KEY, balance_history_key, last_balance_key, plan_balance_write,
};
use crate::seed::StanceSeed;

/// Redis: учёт балансов и seed стойки для рестарта
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let client = redis::Client::open(url).context("invalid REDIS_URL")?;
        let mut conn = client
            .get_multiplexed_tokio_connection()
            .await
            .context("redis connection failed")?;

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("redis ping failed")?;

        Ok(Self { conn })
    }

    /// Обновить LAST_BALANCE / BALANCES для токена
    pub async fn record_balance(&self, symbol: &str, current: TokenAmount) -> anyhow::Result<()> {
        let mut conn = self.conn.clone();
        let last_key = last_balance_key(symbol);

        let stored: Option<String> = conn
            .get(&last_key)
            .await
            .with_context(|| format!("failed to read {}", last_key))?;

        if stored.is_none() {
            warn!("key {} does not exist, creating it", last_key);
        }

        let plan = plan_balance_write(stored.as_deref(), current);
        let value = current.to_string();

        if plan.set_last {
            let _: () = conn
                .set(&last_key, &value)
                .await
                .with_context(|| format!("failed to set {}", last_key))?;
        }
        if plan.push_history {
            let history_key = balance_history_key(symbol);
            let _: () = conn
                .lpush(&history_key, &value)
                .await
                .with_context(|| format!("failed to push {}", history_key))?;
            debug!(symbol, balance = %value, "balance change recorded");
        }

        Ok(())
    }

    pub async fn load_seed(&self) -> anyhow::Result<Option<StanceSeed>> {
        let mut conn = self.conn.clone();

        let stance: Option<String> = conn.get(STANCE_KEY).await.context("failed to read STANCE")?;
        let reference: Option<String> = conn
            .get(REFERENCE_PRICE_KEY)
            .await
            .context("failed to read REFERENCE_PRICE")?;

        StanceSeed::parse(stance.as_deref(), reference.as_deref())
    }

    pub async fn save_seed(&self, seed: &StanceSeed) -> anyhow::Result<()> {
        let mut conn = self.conn.clone();
        let (stance, reference) = seed.encode();

        let _: () = conn.set(STANCE_KEY, stance).await.context("failed to set STANCE")?;
        let _: () = conn
            .set(REFERENCE_PRICE_KEY, reference)
            .await
            .context("failed to set REFERENCE_PRICE")?;
        Ok(())
    }
}
