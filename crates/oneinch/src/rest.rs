use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Mutex;
use tracing::debug;

use domain::types::{Holdings, Quote, Token, TokenAmount, TokenBalance};

use crate::models::{BalancesResp, QuoteResp, Session, parse_balances};

/// Параметр source, который web-клиент 1inch передаёт в quoter
const QUOTE_SOURCE: &str = "0xe26b9977";

/// Read-only клиент proxy-app.1inch.io: сессия, балансы/allowance, котировки.
/// Подпись и отправка ордеров сюда не входят.
#[derive(Clone)]
pub struct OneInchRest {
    client: reqwest::Client,
    base: String,
    chain_id: String,
    router: String,
    session: Arc<Mutex<Option<Session>>>,
}

impl OneInchRest {
    pub fn new(chain_id: impl Into<String>, router: impl Into<String>) -> Self {
        Self::with_base("https://proxy-app.1inch.io/v2.0", chain_id, router)
    }

    pub fn with_base(
        base: impl Into<String>,
        chain_id: impl Into<String>,
        router: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
            chain_id: chain_id.into(),
            router: router.into(),
            session: Arc::new(Mutex::new(None)),
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn router(&self) -> &str {
        &self.router
    }

    /// Актуальный bearer-токен; обновляет сессию, если до истечения < 10 минут
    pub async fn access_token(&self) -> anyhow::Result<String> {
        let mut guard = self.session.lock().await;
        let now = chrono::Utc::now().timestamp();

        if Session::needs_refresh(guard.as_ref(), now) {
            let url = format!("{}/auth/token", self.base);
            let fresh: Session = self
                .client
                .get(url)
                .send()
                .await?
                .error_for_status()
                .context("auth token request failed")?
                .json()
                .await?;

            debug!(exp = fresh.exp, "refreshed 1inch access token");
            *guard = Some(fresh);
        }

        guard
            .as_ref()
            .map(|s| s.access_token.clone())
            .context("no 1inch session")
    }

    /// Балансы и allowance роутера для всех токенов кошелька
    pub async fn balances_and_allowances(
        &self,
        wallet: &str,
    ) -> anyhow::Result<HashMap<String, TokenBalance>> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/balance/v1.2/{}/allowancesAndBalances/{}/{}",
            self.base, self.chain_id, self.router, wallet
        );

        let resp: BalancesResp = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()
            .context("balances request failed")?
            .json()
            .await?;

        parse_balances(resp)
    }

    /// Снимок по паре target/stable
    pub async fn holdings(
        &self,
        wallet: &str,
        target: &Token,
        stable: &Token,
    ) -> anyhow::Result<Holdings> {
        let all = self.balances_and_allowances(wallet).await?;

        let pick = |t: &Token| -> anyhow::Result<TokenBalance> {
            all.get(&t.address.to_ascii_lowercase())
                .copied()
                .with_context(|| format!("token {} missing from balances response", t))
        };

        Ok(Holdings {
            target: pick(target)?,
            stable: pick(stable)?,
        })
    }

    /// Котировка "сколько получим to за amount from"
    pub async fn quote(
        &self,
        wallet: &str,
        from: &Token,
        to: &Token,
        amount: TokenAmount,
    ) -> anyhow::Result<Quote> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/fusion/quoter/v2.0/{}/quote/receive",
            self.base, self.chain_id
        );

        let amount = amount.to_string();

        let resp: QuoteResp = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(&[
                ("walletAddress", wallet),
                ("amount", amount.as_str()),
                ("fromTokenAddress", from.address.as_str()),
                ("toTokenAddress", to.address.as_str()),
                ("enableEstimate", "true"),
                ("showDestAmountMinusFee", "true"),
                ("source", QUOTE_SOURCE),
            ])
            .send()
            .await?
            .error_for_status()
            .context("quote request failed")?
            .json()
            .await?;

        resp.try_into()
    }
}
