use std::collections::HashMap;

use anyhow::Context;
use serde::Deserialize;

use domain::types::{Quote, TokenAmount, TokenBalance};

/// Ответ /auth/token
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    /// unix seconds
    pub exp: i64,
}

/// Токен обновляем заранее, за 10 минут до истечения
pub const SESSION_REFRESH_BUFFER_SECS: i64 = 10 * 60;

impl Session {
    pub fn needs_refresh(session: Option<&Session>, now_secs: i64) -> bool {
        match session {
            Some(s) => s.exp - now_secs - SESSION_REFRESH_BUFFER_SECS <= 0,
            None => true,
        }
    }
}

/// Элемент ответа allowancesAndBalances (ключ: адрес токена)
#[derive(Debug, Deserialize)]
pub struct BalanceEntry {
    pub balance: String,
    pub allowance: String,
}

pub type BalancesResp = HashMap<String, BalanceEntry>;

/// Балансы по адресам (адреса в нижнем регистре)
pub fn parse_balances(resp: BalancesResp) -> anyhow::Result<HashMap<String, TokenBalance>> {
    let mut out = HashMap::with_capacity(resp.len());
    for (address, entry) in resp {
        let balance: TokenAmount = entry
            .balance
            .parse()
            .with_context(|| format!("bad balance for {}", address))?;
        let allowance = TokenAmount::parse_saturating(&entry.allowance)
            .with_context(|| format!("bad allowance for {}", address))?;
        out.insert(address.to_ascii_lowercase(), TokenBalance { balance, allowance });
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
pub struct QuoteResp {
    #[serde(rename = "quoteId")]
    pub quote_id: String,
    #[serde(rename = "fromTokenAmount")]
    pub from_token_amount: String,
    #[serde(rename = "toTokenAmount")]
    pub to_token_amount: String,
    #[serde(default)]
    pub recommended_preset: Option<String>,
}

impl TryFrom<QuoteResp> for Quote {
    type Error = anyhow::Error;

    fn try_from(r: QuoteResp) -> Result<Self, Self::Error> {
        let from_amount: TokenAmount = r
            .from_token_amount
            .parse()
            .context("bad fromTokenAmount in quote")?;
        let to_amount: TokenAmount = r
            .to_token_amount
            .parse()
            .context("bad toTokenAmount in quote")?;

        Ok(Quote {
            id: r.quote_id,
            from_amount,
            to_amount,
            preset: r.recommended_preset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_refresh_respects_buffer() {
        let s = Session {
            access_token: "t".into(),
            exp: 10_000,
        };
        assert!(Session::needs_refresh(None, 0));
        assert!(!Session::needs_refresh(Some(&s), 10_000 - 601));
        assert!(Session::needs_refresh(Some(&s), 10_000 - 600));
        assert!(Session::needs_refresh(Some(&s), 20_000));
    }

    #[test]
    fn session_parses_token_response() {
        let s: Session = serde_json::from_str(r#"{"access_token":"abc","exp":1700000000}"#).unwrap();
        assert_eq!(s.access_token, "abc");
        assert_eq!(s.exp, 1_700_000_000);
    }

    #[test]
    fn balances_are_keyed_by_lowercase_address() {
        let body = r#"{
            "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48": {"balance": "1500000000", "allowance": "115792089237316195423570985008687907853269984665640564039457584007913129639935"},
            "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2": {"balance": "0", "allowance": "1000"}
        }"#;
        let map = parse_balances(serde_json::from_str(body).unwrap()).unwrap();

        let usdc = map["0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"];
        assert_eq!(usdc.balance, TokenAmount(1_500_000_000));
        assert_eq!(usdc.allowance, TokenAmount(u128::MAX));
        assert_eq!(map["0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"].allowance, TokenAmount(1000));
        assert!(map["0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"].balance.is_zero());
    }

    #[test]
    fn garbage_balance_is_rejected() {
        let body = r#"{"0xabc": {"balance": "n/a", "allowance": "0"}}"#;
        assert!(parse_balances(serde_json::from_str(body).unwrap()).is_err());
    }

    #[test]
    fn quote_response_converts_to_domain_quote() {
        let body = r#"{
            "quoteId": "q-1",
            "fromTokenAmount": "1000000000",
            "toTokenAmount": "330000000000000000",
            "recommended_preset": "fast",
            "k": 12
        }"#;
        let q: Quote = serde_json::from_str::<QuoteResp>(body).unwrap().try_into().unwrap();

        assert_eq!(q.id, "q-1");
        assert_eq!(q.from_amount, TokenAmount(1_000_000_000));
        assert_eq!(q.to_amount, TokenAmount(330_000_000_000_000_000));
        assert_eq!(q.preset.as_deref(), Some("fast"));
    }

    #[test]
    fn quote_with_garbage_amount_is_rejected() {
        let body = r#"{"quoteId":"q","fromTokenAmount":"1e9","toTokenAmount":"5"}"#;
        let r: QuoteResp = serde_json::from_str(body).unwrap();
        assert!(Quote::try_from(r).is_err());
    }
}
