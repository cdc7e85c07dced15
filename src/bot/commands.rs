use crate::bot::{Context, Data, Error};
use crate::cfg::BotConfiguration;
use crate::network::PingError;
use crate::status::{format_latency, LatencyTier, StatusSummary};
use log::warn;
use poise::CreateReply;
use serenity::all::{CreateAttachment, CreateEmbed, CreateEmbedFooter};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 25565;

const SUCCESS_COLOUR: u32 = 0xA0D6B4;
const ERROR_COLOUR: u32 = 0xF5A3A3;
const FAVICON_NAME: &str = "favicon.png";
const MAX_SAMPLE_SHOWN: usize = 10;

pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![mcstatus(), playerlist(), ping(), help()]
}

/// Picks the server a status command should query.
///
/// Asking for the default host on the standard port means the configured
/// default server, which may listen somewhere else.
pub fn resolve_target(
    config: &BotConfiguration,
    host: Option<&str>,
    port: Option<u16>,
) -> (String, u16) {
    let host = host.unwrap_or(&config.default_server);
    let port = port.unwrap_or(DEFAULT_PORT);

    if port == DEFAULT_PORT && host.eq_ignore_ascii_case(&config.default_server) {
        (config.default_server.clone(), config.default_port)
    } else {
        (host.to_string(), port)
    }
}

fn reply_embed(
    ctx: Context<'_>,
    title: impl Into<String>,
    description: impl Into<String>,
    colour: u32,
) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .color(colour)
        .footer(CreateEmbedFooter::new(&ctx.data().config.bot_name))
}

/// Show the status of a Minecraft server
#[poise::command(prefix_command, slash_command, aliases("status", "online", "server"))]
pub async fn mcstatus(
    ctx: Context<'_>,
    #[description = "Server address, the community server by default"] host: Option<String>,
    #[description = "Server port"] port: Option<u16>,
) -> Result<(), Error> {
    ctx.defer().await?;

    let data = ctx.data();
    let (host, port) = resolve_target(&data.config, host.as_deref(), port);
    let (status, latency) = tokio::join!(
        data.pinger.status(&host, port),
        data.pinger.latency(&host, port)
    );

    let reply = match status {
        Ok(status) => {
            let summary = StatusSummary::from_status(&status);
            let embed = reply_embed(
                ctx,
                format!("Minecraft Server Status for {}:{}", host, port),
                status_description(&summary, latency),
                SUCCESS_COLOUR,
            );

            match summary.favicon {
                Some(favicon) => CreateReply::default()
                    .embed(embed.thumbnail(format!("attachment://{}", FAVICON_NAME)))
                    .attachment(CreateAttachment::bytes(favicon, FAVICON_NAME)),
                None => CreateReply::default().embed(embed),
            }
        }
        Err(e) => {
            warn!("Status query for {}:{} failed: {}", host, port, e);
            let embed = reply_embed(ctx, "Error", status_error_text(&e), ERROR_COLOUR);
            CreateReply::default().embed(embed)
        }
    };

    ctx.send(reply).await?;
    Ok(())
}

pub fn status_description(summary: &StatusSummary, latency: Option<Duration>) -> String {
    let tier = LatencyTier::from_latency(latency);
    let mut text = format!(
        "Version: `{}`\nPlayers: `{}/{}`\nLatency: `{}` {}\nDescription: `{}`",
        summary.version,
        summary.online,
        summary.max,
        format_latency(latency),
        tier.indicator(),
        summary.description,
    );

    if !summary.sample.is_empty() {
        let shown = summary.sample.len().min(MAX_SAMPLE_SHOWN);
        let mut names = summary.sample[..shown].join(", ");
        if summary.sample.len() > shown {
            names.push_str(&format!(" and {} more", summary.sample.len() - shown));
        }
        text.push_str(&format!("\nOnline: {}", names));
    }

    text
}

pub fn status_error_text(error: &PingError) -> &'static str {
    if error.is_timeout() {
        "Server did not respond in time"
    } else {
        "Failed to fetch server status"
    }
}

/// List online players on a Minecraft server
#[poise::command(prefix_command, slash_command, aliases("players", "list"))]
pub async fn playerlist(
    ctx: Context<'_>,
    #[description = "Server address, the community server by default"] host: Option<String>,
    #[description = "Server port"] port: Option<u16>,
) -> Result<(), Error> {
    ctx.defer().await?;

    let data = ctx.data();
    let (host, port) = resolve_target(&data.config, host.as_deref(), port);

    let embed = match data.pinger.status(&host, port).await {
        Ok(status) => {
            let listing = PlayerListing::from_summary(&StatusSummary::from_status(&status));
            reply_embed(ctx, listing.title, listing.description, listing.colour)
        }
        Err(e) => {
            warn!("Player list query for {}:{} failed: {}", host, port, e);
            reply_embed(ctx, "Error", "Failed to fetch player list", ERROR_COLOUR)
        }
    };

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerListing {
    pub title: String,
    pub description: String,
    pub colour: u32,
}

impl PlayerListing {
    pub fn from_summary(summary: &StatusSummary) -> Self {
        if summary.online == 0 {
            return PlayerListing {
                title: "No Players Online".to_string(),
                description: "There is currently no one online.".to_string(),
                colour: ERROR_COLOUR,
            };
        }

        let description = if summary.sample.is_empty() {
            "No player details available".to_string()
        } else {
            summary.sample.join("\n")
        };

        PlayerListing {
            title: format!("Online Players ({})", summary.online),
            description,
            colour: SUCCESS_COLOUR,
        }
    }
}

/// Check the bot's latency
#[poise::command(prefix_command, slash_command, aliases("latency"))]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    // gateway heartbeat round trip, zero until the first heartbeat is acknowledged
    let latency = ctx.ping().await;
    let tier = LatencyTier::from_latency(Some(latency));

    let embed = reply_embed(
        ctx,
        "Latency",
        format!("`{}` {}", format_heartbeat(latency), tier.indicator()),
        SUCCESS_COLOUR,
    );

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

pub fn format_heartbeat(latency: Duration) -> String {
    format!("{:.2}ms", latency.as_secs_f64() * 1000.0)
}

/// Show this help menu
#[poise::command(prefix_command, slash_command)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command to show help about"] command: Option<String>,
) -> Result<(), Error> {
    let extra = format!(
        "Status commands query {} unless told otherwise.",
        ctx.data().config.default_server
    );

    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            extra_text_at_bottom: &extra,
            ..Default::default()
        },
    )
    .await?;

    Ok(())
}
