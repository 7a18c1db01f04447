use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use domain::types::{Price, TokenAmount};
use execution::paper::PaperWallet;
use execution::sim::ExecutionModel;
use oneinch::OneInchRest;
use state_machine::monitor::TriggerMonitor;
use state_machine::stance::Stance;
use storage::RedisStore;

use engine::adapters::{OneInchMarket, PaperDesk, WatchOnly};
use engine::config::{Args, Mode};
use engine::driver::{Driver, DriverParams};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let default_filter = if args.is_production() {
        "engine=info"
    } else {
        "engine=debug"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    args.validate()?;

    let pair = args.pair();
    let store = RedisStore::connect(&args.redis_url)
        .await
        .context("redis connection failed")?;

    // без seed стартуем в BUY от INITIAL_PRICE
    let seed = store.load_seed().await?;
    let (stance, reference) = match seed {
        Some(s) => (s.stance, s.reference),
        None => (Stance::Accumulate, Price(0.0)),
    };
    let monitor = TriggerMonitor::new(
        stance,
        Price(args.initial_price),
        reference,
        args.limit(),
        args.stop_loss(),
    )?;

    info!(
        "starting {:?} mode, stance {}, reference {}, limit {}%, stop-loss {}%",
        args.mode,
        stance,
        reference,
        args.limit_percent,
        args.stop_loss_percent
    );

    let params = DriverParams {
        min_output: args.min_output,
        rearm: args.rearm,
        poll_interval: args.poll_interval(),
        cooldown: args.cooldown(),
    };

    let rest = OneInchRest::new(args.chain_id.clone(), args.router_address.clone());
    info!(
        "1inch router {} on chain {}, wallet {}",
        rest.router(),
        rest.chain_id(),
        args.wallet_address
    );

    let market = OneInchMarket {
        rest,
        wallet: args.wallet_address.clone(),
        pair: pair.clone(),
    };

    match args.mode {
        Mode::Paper => {
            let desk = PaperDesk::new(
                PaperWallet::new(
                    TokenAmount::from_decimal(args.paper_target, pair.target.decimals),
                    TokenAmount::from_decimal(args.paper_stable, pair.stable.decimals),
                ),
                ExecutionModel {
                    fee_bps: args.fee_bps,
                    slippage_bps: args.slippage_bps,
                },
            );

            Driver::new(monitor, pair, params, desk.clone(), market, desk, store)
                .run()
                .await
        }
        Mode::Watch => {
            Driver::new(monitor, pair, params, market.clone(), market, WatchOnly, store)
                .run()
                .await
        }
    }
}
