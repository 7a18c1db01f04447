use crate::cause::TriggerCause;
use crate::error::MonitorError;
use crate::stance::Stance;

#[test]
fn stance_flips_back_and_forth() {
    let mut s = Stance::Accumulate;

    s = s.opposite();
    assert_eq!(s, Stance::Distribute);

    s = s.opposite();
    assert_eq!(s, Stance::Accumulate);
}

#[test]
fn stance_labels_match_order_names() {
    assert_eq!(Stance::Accumulate.to_string(), "BUY");
    assert_eq!(Stance::Distribute.to_string(), "SELL");
    assert_eq!(TriggerCause::StopLossHit.label(), "stop-loss");
}

#[test]
fn stance_parses_labels_and_names() {
    assert_eq!("BUY".parse::<Stance>(), Ok(Stance::Accumulate));
    assert_eq!(" sell ".parse::<Stance>(), Ok(Stance::Distribute));
    assert_eq!("Accumulate".parse::<Stance>(), Ok(Stance::Accumulate));
    assert_eq!(Stance::Distribute.label().parse::<Stance>(), Ok(Stance::Distribute));
}

#[test]
fn unknown_stance_is_rejected_not_defaulted() {
    assert_eq!(
        "HOLD".parse::<Stance>(),
        Err(MonitorError::UnknownStance("HOLD".into()))
    );
    assert_eq!(Stance::try_from(0u8), Ok(Stance::Accumulate));
    assert_eq!(Stance::try_from(1u8), Ok(Stance::Distribute));
    assert_eq!(
        Stance::try_from(2u8),
        Err(MonitorError::UnknownStance("2".into()))
    );
}
