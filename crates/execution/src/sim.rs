use domain::types::TokenAmount;

/// Модель издержек paper-исполнения: котировка уже включает маршрут,
/// сверху снимаем комиссию и проскальзывание.
#[derive(Debug, Copy, Clone)]
pub struct ExecutionModel {
    pub fee_bps: f64,
    pub slippage_bps: f64,
}

impl ExecutionModel {
    pub const FREE: ExecutionModel = ExecutionModel {
        fee_bps: 0.0,
        slippage_bps: 0.0,
    };

    fn bps_to_ratio(bps: f64) -> f64 {
        (bps.max(0.0)) / 10_000.0
    }

    /// Доля котировки, которая теряется при исполнении (0.0 .. 1.0)
    pub fn cost_ratio(self) -> f64 {
        (Self::bps_to_ratio(self.fee_bps) + Self::bps_to_ratio(self.slippage_bps)).min(1.0)
    }

    /// Сколько реально получим за котировку `quoted`
    pub fn fill_amount(self, quoted: TokenAmount) -> TokenAmount {
        let cost = self.cost_ratio();
        if cost <= 0.0 {
            return quoted;
        }
        TokenAmount((quoted.0 as f64 * (1.0 - cost)).floor() as u128)
    }
}
