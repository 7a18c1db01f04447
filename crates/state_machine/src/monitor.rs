use domain::types::{Percent, Price};

use crate::cause::TriggerCause;
use crate::error::MonitorError;
use crate::stance::Stance;

/// Открытая верхняя граница: не сработает, пока `update` не засеет реальную полосу
const OPEN_UP: Price = Price(f64::INFINITY);
/// Открытая нижняя граница (недостижима для неотрицательной цены)
const OPEN_DOWN: Price = Price(f64::NEG_INFINITY);

/// Трейлинг-монитор полос срабатывания.
///
/// Держит стойку и пару уровней `trigger_down < trigger_up`, между которыми
/// ничего не делаем. Пока цена внутри, полосы подтягиваются только в сторону
/// тренда текущей стойки (ratchet) и никогда не расширяются обратно.
/// Выход цены за любую из полос выставляет `triggered`; дальше драйвер
/// совершает своп и перевооружает монитор через `rearm` / `switch_stance`.
///
/// Монитор не делает I/O и не знает о токенах; владелец ровно один.
#[derive(Debug, Clone)]
pub struct TriggerMonitor {
    stance: Stance,
    limit: Percent,
    stop_loss: Percent,
    trigger_up: Price,
    trigger_down: Price,
    reference: Price,
    triggered: bool,
    last_cause: Option<TriggerCause>,
}

impl TriggerMonitor {
    /// `Accumulate`: полосы вокруг `initial`, reference = 0.
    /// `Distribute`: полосы вокруг `reference` (цена последней покупки).
    pub fn new(
        stance: Stance,
        initial: Price,
        reference: Price,
        limit: Percent,
        stop_loss: Percent,
    ) -> Result<Self, MonitorError> {
        if !limit.is_valid() {
            return Err(MonitorError::InvalidPercent {
                name: "limit",
                value: limit.0,
            });
        }
        if !stop_loss.is_valid() {
            return Err(MonitorError::InvalidPercent {
                name: "stop-loss",
                value: stop_loss.0,
            });
        }
        check_price(initial)?;
        check_price(reference)?;

        let (anchor, reference) = match stance {
            Stance::Accumulate => (initial, Price(0.0)),
            Stance::Distribute => (reference, reference),
        };
        let (trigger_up, trigger_down) = bands(stance, anchor, limit, stop_loss);

        Ok(Self {
            stance,
            limit,
            stop_loss,
            trigger_up,
            trigger_down,
            reference,
            triggered: false,
            last_cause: None,
        })
    }

    /// Одно наблюдение цены.
    ///
    /// `triggered` пересчитывается полностью на каждом вызове по полосам,
    /// какими они были до вызова. При срабатывании полосы не трогаем.
    /// Невалидная цена отклоняется без изменения состояния.
    pub fn update(&mut self, price: Price) -> Result<(), MonitorError> {
        check_price(price)?;

        let hit_up = price.0 >= self.trigger_up.0;
        let hit_down = price.0 <= self.trigger_down.0;

        if hit_up || hit_down {
            let limit_hit = match self.stance {
                Stance::Accumulate => hit_down,
                Stance::Distribute => hit_up,
            };
            self.last_cause = Some(if limit_hit {
                TriggerCause::LimitHit
            } else {
                TriggerCause::StopLossHit
            });
            self.triggered = true;
            return Ok(());
        }

        self.ratchet(price);
        self.last_cause = None;
        self.triggered = false;
        Ok(())
    }

    fn ratchet(&mut self, price: Price) {
        match self.stance {
            // обе полосы идут вниз вслед за падающей ценой
            Stance::Accumulate => {
                let down = self.limit.below(price);
                if self.is_down_open() || down.0 < self.trigger_down.0 {
                    self.trigger_down = down;
                }

                let up = self.stop_loss.above(price);
                if up.0 < self.trigger_up.0 {
                    self.trigger_up = up;
                }
            }
            // зеркально: обе полосы идут вверх за растущей ценой
            Stance::Distribute => {
                let up = self.limit.above(price);
                if self.is_up_open() || up.0 > self.trigger_up.0 {
                    self.trigger_up = up;
                }

                let down = self.stop_loss.below(price);
                if down.0 > self.trigger_down.0 {
                    self.trigger_down = down;
                }
            }
        }
    }

    /// Смена стойки с явными уровнями. Неположительный уровень ставит
    /// открытую границу, и первый `update` засеет полосу от наблюдаемой цены.
    /// Перевёрнутая пара (`down >= up`) открывает обе границы.
    pub fn switch_stance(&mut self, stance: Stance, trigger_up: Price, trigger_down: Price) {
        self.stance = stance;
        self.reference = Price(0.0);
        self.triggered = false;
        self.last_cause = None;

        let up = (trigger_up.0.is_finite() && trigger_up.0 > 0.0).then_some(trigger_up);
        let down = (trigger_down.0.is_finite() && trigger_down.0 > 0.0).then_some(trigger_down);

        (self.trigger_up, self.trigger_down) = match (up, down) {
            (Some(u), Some(d)) if d.0 >= u.0 => (OPEN_UP, OPEN_DOWN),
            (u, d) => (u.unwrap_or(OPEN_UP), d.unwrap_or(OPEN_DOWN)),
        };
    }

    /// Смена стойки с пересчётом полос от цены исполнения по процентам.
    /// Для `Distribute` эта цена становится reference.
    /// Нулевая цена отклоняется: полосы от нулевого якоря схлопываются.
    pub fn rearm(&mut self, stance: Stance, price: Price) -> Result<(), MonitorError> {
        check_price(price)?;
        if price.0 <= 0.0 {
            return Err(MonitorError::InvalidPrice(price.0));
        }

        let (trigger_up, trigger_down) = bands(stance, price, self.limit, self.stop_loss);

        self.stance = stance;
        self.trigger_up = trigger_up;
        self.trigger_down = trigger_down;
        self.reference = match stance {
            Stance::Accumulate => Price(0.0),
            Stance::Distribute => price,
        };
        self.triggered = false;
        self.last_cause = None;
        Ok(())
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn stance(&self) -> Stance {
        self.stance
    }

    pub fn trigger_up(&self) -> Price {
        self.trigger_up
    }

    pub fn trigger_down(&self) -> Price {
        self.trigger_down
    }

    pub fn reference_price(&self) -> Price {
        self.reference
    }

    pub fn limit_percent(&self) -> Percent {
        self.limit
    }

    pub fn stop_loss_percent(&self) -> Percent {
        self.stop_loss
    }

    pub fn last_cause(&self) -> Option<TriggerCause> {
        self.last_cause
    }

    pub fn is_up_open(&self) -> bool {
        self.trigger_up.0 == OPEN_UP.0
    }

    pub fn is_down_open(&self) -> bool {
        self.trigger_down.0 == OPEN_DOWN.0
    }
}

/// (up, down) для стойки вокруг якорной цены
fn bands(stance: Stance, anchor: Price, limit: Percent, stop_loss: Percent) -> (Price, Price) {
    match stance {
        Stance::Accumulate => (stop_loss.above(anchor), limit.below(anchor)),
        Stance::Distribute => (limit.above(anchor), stop_loss.below(anchor)),
    }
}

fn check_price(price: Price) -> Result<(), MonitorError> {
    if price.is_valid() {
        Ok(())
    } else {
        Err(MonitorError::InvalidPrice(price.0))
    }
}
