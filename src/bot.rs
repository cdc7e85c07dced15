//! Discord side of the bot.
//!
//! Commands are hybrid: they answer both as prefix commands read from message
//! content and as slash commands, so the bot needs the privileged
//! `MESSAGE_CONTENT` intent enabled in the Discord Developer Portal. Slash
//! commands are registered globally and the presence loop is started once the
//! framework has finished its setup.

pub mod commands;
pub mod handler;
pub mod presence;

use crate::cfg::{BotConfiguration, PingConfiguration, Secrets};
use crate::network::PingClient;
use anyhow::Context as _;
use log::info;
use serenity::all::{ClientBuilder, GatewayIntents};
use std::sync::Arc;

/// State shared with every command invocation.
pub struct Data {
    pub config: Arc<BotConfiguration>,
    pub pinger: PingClient,
}

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Builds the poise framework and serenity client and runs them until the
/// gateway connection ends.
pub async fn start_bot(config: BotConfiguration, secrets: Secrets) -> anyhow::Result<()> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let config = Arc::new(config);
    let pinger = PingClient::new(PingConfiguration::from_cfg(&config.ping));

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.command_prefix.clone()),
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(handler::event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(handler::on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands)
                    .await
                    .context("Failed to register slash commands")?;
                info!("Registered {} commands", framework.options().commands.len());

                presence::start(ctx.clone(), config.clone(), pinger.clone());

                Ok(Data { config, pinger })
            })
        })
        .build();

    let mut client = ClientBuilder::new(&secrets.discord_token, intents)
        .framework(framework)
        .await
        .context("Failed to build Discord client")?;

    info!("Connecting to Discord...");

    client
        .start()
        .await
        .context("Discord client stopped with an error")?;

    Ok(())
}
