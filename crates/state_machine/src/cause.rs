/// Какая полоса сработала на последнем `update`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TriggerCause {
    // Цена ушла в выгодную сторону на limit%
    LimitHit,

    // Цена ушла против нас на stop-loss%, перестаём ждать
    StopLossHit,
}

impl TriggerCause {
    pub fn label(self) -> &'static str {
        match self {
            TriggerCause::LimitHit => "limit",
            TriggerCause::StopLossHit => "stop-loss",
        }
    }
}
