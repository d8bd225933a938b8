use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use marquee_config::Config;
use marquee_core::i18n::Strings;
use marquee_core::realtime::{
    EventRegistry, NotificationChange, NotificationFeed, NotificationTiming,
    ReconnectPolicy, RelayClient, RelayConfig, WebSocketTransport,
};
use marquee_model::Locale;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Args, Debug, Default)]
pub struct WatchArgs {
    /// Relay socket URL (overrides config)
    #[arg(long)]
    pub url: Option<String>,

    /// Language for notification text
    #[arg(long)]
    pub locale: Option<Locale>,
}

pub async fn run(config: &Config, args: WatchArgs) -> Result<()> {
    let realtime = &config.realtime;
    let relay_config = RelayConfig::new(args.url.as_deref().unwrap_or(&realtime.url))?
        .with_connect_timeout(realtime.connect_timeout)
        .with_policy(ReconnectPolicy {
            interval: realtime.reconnect_interval,
            max_attempts: realtime.max_reconnect_attempts,
        });

    let registry = Arc::new(EventRegistry::new());
    let feed = NotificationFeed::spawn(NotificationTiming {
        display: config.notifications.display_window,
        dedupe: config.notifications.dedupe_window,
        debounce: config.notifications.debounce,
    });
    feed.attach(&registry);
    let mut changes = feed.subscribe();

    let client = RelayClient::new(
        relay_config,
        Arc::new(WebSocketTransport),
        Arc::clone(&registry),
    );
    let strings = Strings::for_locale(args.locale.unwrap_or(config.browse.locale));

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted; closing relay connection");
            on_signal.cancel();
        }
    });

    let relay = client.run(cancel);
    tokio::pin!(relay);

    loop {
        tokio::select! {
            result = &mut relay => return Ok(result?),
            change = changes.recv() => match change {
                Ok(NotificationChange::Shown(notification)) => {
                    println!("{}", notification.message(strings));
                }
                Ok(NotificationChange::Dismissed { .. }) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Skipped {} notification changes", skipped);
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    Ok(())
}
