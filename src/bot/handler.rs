use crate::bot::{Data, Error};
use log::{error, info};
use serenity::all::{Context, FullEvent, Message};

/// Gateway events outside of command dispatch, which poise handles itself.
pub async fn event_handler(
    ctx: &Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    _data: &Data,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!(
                "Logged in as {} ({})",
                data_about_bot.user.name, data_about_bot.user.id
            );
        }
        FullEvent::Message { new_message, .. } if !new_message.author.bot => {
            info!(
                "[#{}] Message from {}: {}",
                channel_name(ctx, new_message).await,
                new_message.author.name,
                new_message.content
            );
        }
        _ => {}
    }

    Ok(())
}

async fn channel_name(ctx: &Context, message: &Message) -> String {
    if message.guild_id.is_none() {
        return "DM".to_string();
    }

    message
        .channel_id
        .to_channel(ctx)
        .await
        .ok()
        .and_then(|channel| channel.guild())
        .map(|channel| channel.name)
        .unwrap_or_else(|| message.channel_id.to_string())
}

pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Framework setup failed: {:#}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(
                "Command `{}` from {} failed: {:#}",
                ctx.command().name,
                ctx.author().name,
                error
            );
        }
        error => {
            // argument parse failures and the like get poise's stock reply
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}
