use tracing::{debug, error, info, warn};

use crate::event::EngineEvent;

pub fn consume(events: Vec<EngineEvent>) {
    for e in events {
        match e {
            EngineEvent::Observation {
                stance,
                price,
                trigger_up,
                trigger_down,
                triggered,
                cause,
            } => {
                info!(
                    "Waiting to {}, triggered: {}, price: {}, up: {}, down: {}{}",
                    stance,
                    triggered,
                    price,
                    trigger_up,
                    trigger_down,
                    cause.map(|c| format!(" ({} hit)", c.label())).unwrap_or_default()
                );
            }
            EngineEvent::Realigned { from, to } => {
                warn!("monitor stance realigned to balances: {} -> {}", from, to);
            }
            EngineEvent::BelowMinOutput { output, min_output } => {
                info!("triggered, but output {:.4} is below minimum {:.4}", output, min_output);
            }
            EngineEvent::Executed {
                stance,
                spent,
                received,
                price,
            } => {
                info!("{} executed: spent={} received={} price={}", stance, spent, received, price);
            }
            EngineEvent::Flipped {
                from,
                to,
                trigger_up,
                trigger_down,
                reference,
            } => {
                info!(
                    "Flipped {} -> {}, up: {}, down: {}, reference: {}",
                    from, to, trigger_up, trigger_down, reference
                );
            }
            EngineEvent::ExecutionFailed(msg) => {
                error!("swap execution failed: {}", msg);
            }
            EngineEvent::Warn(msg) => {
                warn!("{}", msg);
            }
            EngineEvent::Log(msg) => {
                debug!("{}", msg);
            }
        }
    }
}
