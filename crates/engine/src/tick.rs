use domain::types::{Holdings, Pair, Price, Quote, Token, TokenAmount};
use state_machine::stance::Stance;

/// Стойка по фактическим балансам.
/// Только stable → ждём покупки, только target → ждём продажи.
/// Оба ненулевые (или оба нулевые) → неоднозначно.
pub fn holding_stance(h: &Holdings) -> Option<Stance> {
    match (h.target.balance.is_zero(), h.stable.balance.is_zero()) {
        (true, false) => Some(Stance::Accumulate),
        (false, true) => Some(Stance::Distribute),
        _ => None,
    }
}

/// (from, to) для свопа в текущей стойке
pub fn swap_legs(stance: Stance, pair: &Pair) -> (&Token, &Token) {
    match stance {
        Stance::Accumulate => (&pair.stable, &pair.target),
        Stance::Distribute => (&pair.target, &pair.stable),
    }
}

/// Сколько from-токена отдаём: весь баланс
pub fn swap_amount(stance: Stance, h: &Holdings) -> TokenAmount {
    match stance {
        Stance::Accumulate => h.stable.balance,
        Stance::Distribute => h.target.balance,
    }
}

/// Курс "stable за 1 target" из пары сумм свопа.
/// `spent`/`received` в raw-единицах from/to соответственно.
/// Нулевая любая из сторон → курса нет.
pub fn rate_from_amounts(
    stance: Stance,
    pair: &Pair,
    spent: TokenAmount,
    received: TokenAmount,
) -> Option<Price> {
    if spent.is_zero() || received.is_zero() {
        return None;
    }

    let (from, to) = swap_legs(stance, pair);
    let f1 = spent.to_decimal(from.decimals);
    let f2 = received.to_decimal(to.decimals);

    match stance {
        Stance::Accumulate => Price::per_target(f1, f2),
        Stance::Distribute => Price::per_target(f2, f1),
    }
}

/// Наблюдаемый курс по котировке
pub fn observed_rate(stance: Stance, pair: &Pair, quote: &Quote) -> Option<Price> {
    rate_from_amounts(stance, pair, quote.from_amount, quote.to_amount)
}
