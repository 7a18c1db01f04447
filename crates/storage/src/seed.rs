use anyhow::Context;

use domain::types::Price;
use state_machine::stance::Stance;

/// Что нужно монитору для старта после рестарта
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StanceSeed {
    pub stance: Stance,
    pub reference: Price,
}

impl StanceSeed {
    /// Разбор сохранённых значений. Нет стойки → нет seed.
    /// Нераспознанная стойка: фатальная ошибка.
    pub fn parse(stance: Option<&str>, reference: Option<&str>) -> anyhow::Result<Option<Self>> {
        let Some(stance) = stance else {
            return Ok(None);
        };
        let stance: Stance = stance.parse()?;

        let reference = match reference {
            Some(raw) => {
                let v: f64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("bad stored reference price: {}", raw))?;
                Price(v)
            }
            None => Price(0.0),
        };
        if !reference.is_valid() {
            anyhow::bail!("stored reference price out of range: {}", reference.0);
        }

        Ok(Some(Self { stance, reference }))
    }

    pub fn encode(&self) -> (&'static str, String) {
        (self.stance.label(), self.reference.0.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use state_machine::error::MonitorError;

    #[test]
    fn missing_stance_means_no_seed() {
        assert_eq!(StanceSeed::parse(None, Some("12.5")).unwrap(), None);
    }

    #[test]
    fn seed_survives_encode_and_parse() {
        let seed = StanceSeed {
            stance: Stance::Distribute,
            reference: Price(2012.75),
        };
        let (stance, reference) = seed.encode();
        assert_eq!(stance, "SELL");

        let back = StanceSeed::parse(Some(stance), Some(&reference)).unwrap();
        assert_eq!(back, Some(seed));
    }

    #[test]
    fn missing_reference_defaults_to_zero() {
        let seed = StanceSeed::parse(Some("BUY"), None).unwrap().unwrap();
        assert_eq!(seed.stance, Stance::Accumulate);
        assert_eq!(seed.reference, Price(0.0));
    }

    #[test]
    fn unknown_stored_stance_is_fatal() {
        let err = StanceSeed::parse(Some("HODL"), Some("1")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<MonitorError>(),
            Some(&MonitorError::UnknownStance("HODL".into()))
        );
    }

    #[test]
    fn bad_reference_is_rejected() {
        assert!(StanceSeed::parse(Some("SELL"), Some("abc")).is_err());
        assert!(StanceSeed::parse(Some("SELL"), Some("-3")).is_err());
        assert!(StanceSeed::parse(Some("SELL"), Some("NaN")).is_err());
    }
}
