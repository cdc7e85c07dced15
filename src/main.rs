pub mod bot;
pub mod cfg;
pub mod chat;
pub mod net_io;
pub mod network;
pub mod protocol;
pub mod status;

use anyhow::Context;
use cfg::{BotConfiguration, Secrets};
use log::{info, LevelFilter};
use log4rs::append::console::ConsoleAppender;

use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::{init_config, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = BotConfiguration::path();
    if !path.exists() {
        BotConfiguration::default().save(&path).await?;
        println!(
            "Created default configuration at {}. Please fill it out. Exiting...",
            path.display()
        );
        return Ok(());
    }

    let config = BotConfiguration::load(&path)
        .await
        .with_context(|| format!("Could not load configuration from {}", path.display()))?;

    configure_logging(config.log_level()?)?;

    info!("Starting {}...", config.bot_name);

    let secrets = Secrets::from_env()?;
    bot::start_bot(config, secrets).await?;

    info!("Closing bot...");

    Ok(())
}

fn configure_logging(level: LevelFilter) -> anyhow::Result<()> {
    let pattern = "[{d(%Y-%m-%d %H:%M:%S)}] <{M}> {h([{l}])}: {m}{n}";
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let logfile = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build(
            "logs/latest.log",
            Box::new(CompoundPolicy::new(
                Box::new(SizeTrigger::new(4 * 1024)),
                Box::new(
                    FixedWindowRoller::builder()
                        .build("logs/log_{}.old.gz", 4)
                        .context("Could not initialize logger roller.")?,
                ),
            )),
        )
        .context("Could not initialize file logging")?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .logger(Logger::builder().build("serenity", LevelFilter::Warn))
        .logger(Logger::builder().build("tungstenite", LevelFilter::Warn))
        .build(
            Root::builder()
                .appender("stdout")
                .appender("logfile")
                .build(level),
        )
        .context("Could not build logger config")?;

    init_config(config).context("Could not initialize logger config")?;

    Ok(())
}
