use domain::types::{Price, TokenAmount};
use state_machine::cause::TriggerCause;
use state_machine::stance::Stance;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Итог `update` на очередной котировке
    Observation {
        stance: Stance,
        price: Price,
        trigger_up: Price,
        trigger_down: Price,
        triggered: bool,
        cause: Option<TriggerCause>,
    },
    /// Стойка монитора приведена к фактическим балансам
    Realigned { from: Stance, to: Stance },
    /// Сработало, но выход свопа ниже минимума
    BelowMinOutput { output: f64, min_output: f64 },
    Executed {
        stance: Stance,
        spent: TokenAmount,
        received: TokenAmount,
        price: Price,
    },
    /// Монитор перевооружён на противоположную стойку
    Flipped {
        from: Stance,
        to: Stance,
        trigger_up: Price,
        trigger_down: Price,
        reference: Price,
    },
    ExecutionFailed(String),
    Warn(String),
    Log(String),
}
