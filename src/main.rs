use std::io::{self, Write};
use std::time::Duration;

use eyre::Result;
use tokio::time::{Instant, sleep_until};
use tracing::{error, info, warn};

use crate::activator::ActivationOutcome;
use crate::config::Config;

mod activator;
mod config;
mod constants;
mod logger;
mod wallets;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logger::init();

    let config = Config::from_env()?;
    info!("Taker node activation bot");
    info!(
        "chain {} | contract {}",
        config.chain_id, config.activation_contract
    );

    let continuous = prompt_yes_no("Activate the node continuously (every 24 hours)? [y/N] ")?;

    if !continuous {
        info!("single activation run");
        run_once(&config).await;
        info!("activation complete, exiting");
        return Ok(());
    }

    info!(
        "continuous mode enabled, repeating every {}s",
        config.interval.as_secs()
    );
    loop {
        let started = Instant::now();
        run_once(&config).await;

        let tick = next_tick(started, config.interval);
        let remaining = tick.saturating_duration_since(Instant::now());
        let eta = chrono::Local::now()
            + chrono::Duration::from_std(remaining).unwrap_or_else(|_| chrono::Duration::zero());
        info!("next activation at {}", eta.format("%Y-%m-%d %H:%M:%S"));

        tokio::select! {
            _ = sleep_until(tick) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown requested, exiting");
                break;
            }
        }
    }
    Ok(())
}

/// The next run starts one full interval after the previous one started;
/// an overrunning batch delays the tick instead of overlapping it.
fn next_tick(started: Instant, interval: Duration) -> Instant {
    started + interval
}

async fn run_once(config: &Config) {
    match activator::run_batch(config).await {
        Ok(results) => {
            let mut confirmed = 0;
            for result in &results {
                match &result.outcome {
                    ActivationOutcome::Confirmed { .. } => confirmed += 1,
                    ActivationOutcome::Failed(err) => {
                        warn!("wallet [{}] not activated: {err}", result.address);
                    }
                }
            }
            info!(
                "batch finished: {confirmed}/{} activations confirmed",
                results.len()
            );
        }
        Err(err) => error!("activation batch aborted: {err:#}"),
    }
}

fn prompt_yes_no(message: &str) -> Result<bool> {
    print!("{message}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(parse_confirmation(&answer))
}

fn parse_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_accepts_yes_variants() {
        assert!(parse_confirmation("y\n"));
        assert!(parse_confirmation("Yes"));
        assert!(parse_confirmation("  YES  "));
    }

    #[test]
    fn confirmation_defaults_to_no() {
        assert!(!parse_confirmation(""));
        assert!(!parse_confirmation("n\n"));
        assert!(!parse_confirmation("maybe"));
    }

    #[test]
    fn overrunning_batch_schedules_next_run_immediately() {
        let interval = Duration::from_secs(60);
        let started = Instant::now() - Duration::from_secs(120);
        let tick = next_tick(started, interval);
        assert_eq!(
            tick.saturating_duration_since(Instant::now()),
            Duration::ZERO
        );
    }

    #[test]
    fn fast_batch_waits_out_the_rest_of_the_interval() {
        let interval = Duration::from_secs(60);
        let started = Instant::now();
        let remaining = next_tick(started, interval).saturating_duration_since(Instant::now());
        assert!(remaining <= interval);
        assert!(remaining > interval - Duration::from_secs(5));
    }
}
