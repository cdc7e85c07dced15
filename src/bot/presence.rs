use crate::cfg::BotConfiguration;
use crate::network::{PingClient, PingError};
use crate::status::StatusSummary;
use log::{debug, warn};
use serenity::all::{ActivityData, Context, OnlineStatus};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, sleep, MissedTickBehavior};

/// Spawns the loop that mirrors the default server's player count into the bot's presence.
pub fn start(ctx: Context, config: Arc<BotConfiguration>, pinger: PingClient) {
    tokio::spawn(async move {
        let mut ticker = interval(config.presence_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            update_presence(&ctx, &config, &pinger).await;
        }
    });
}

async fn update_presence(ctx: &Context, config: &BotConfiguration, pinger: &PingClient) {
    let players = with_retries(
        config.presence_retries,
        config.presence_retry_delay(),
        move || async move {
            let status = pinger
                .status(&config.default_server, config.default_port)
                .await?;
            Ok::<_, PingError>(StatusSummary::from_status(&status).online)
        },
    )
    .await;

    let (activity, status) = presence_for(&config.presence_label, players);
    debug!("Setting presence to {:?} \"{}\"", status, activity);
    ctx.set_presence(Some(ActivityData::playing(activity)), status);
}

/// Runs `query` once plus up to `retries` more times, sleeping `delay` between
/// attempts. Gives `None` once every attempt has failed.
pub async fn with_retries<T, F, Fut>(retries: u32, delay: Duration, mut query: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PingError>>,
{
    let attempts = retries.saturating_add(1);

    for attempt in 1..=attempts {
        match query().await {
            Ok(value) => return Some(value),
            Err(e) => {
                warn!("Presence update attempt {}/{} failed: {}", attempt, attempts, e);
                if attempt < attempts {
                    sleep(delay).await;
                }
            }
        }
    }

    None
}

/// Activity text and online status for a player count, `None` meaning the server is down.
pub fn presence_for(label: &str, players: Option<u64>) -> (String, OnlineStatus) {
    match players {
        Some(0) => (format!("{} | 0 players", label), OnlineStatus::Idle),
        Some(online) => (format!("{} | {} players", label, online), OnlineStatus::Online),
        None => (format!("{} | offline", label), OnlineStatus::DoNotDisturb),
    }
}
