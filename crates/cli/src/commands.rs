use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use folio_client::assistant::GREETING;
use folio_client::{AssistantClient, AssistantError, CacheRouter, FetchClient, FetchConfig, RouterConfig};
use folio_core::reveal::{render, spawn_reveal};
use folio_core::{AppConfig, CacheDb, RevealPace, Theme};

use crate::ansi::paint;
use crate::args::{AskArgs, CacheCommand, RevealArgs};

pub async fn reveal(config: &AppConfig, args: RevealArgs) -> Result<()> {
    let interval = config.reveal_interval(args.pace.into());
    let theme = args.theme.unwrap_or(config.theme);
    show(&args.text, !args.instant, interval, theme).await
}

pub async fn ask(config: &AppConfig, args: AskArgs) -> Result<()> {
    let theme = args.theme.unwrap_or(config.theme);
    let Some(question) = args.question else {
        return show(GREETING, false, config.reveal_interval(RevealPace::Notice), theme).await;
    };

    let result = match AssistantClient::from_app_config(config) {
        Ok(client) => client.ask(&question).await,
        Err(e) => Err(e),
    };

    let (text, pace) = match result {
        Ok(reply) => (reply, RevealPace::Reply),
        Err(AssistantError::InvalidQuestion(msg)) => anyhow::bail!(msg),
        Err(e) => {
            tracing::warn!(error = %e, "assistant request failed");
            (e.user_message(), RevealPace::Notice)
        }
    };

    show(&text, true, config.reveal_interval(pace), theme).await
}

pub async fn cache(config: &AppConfig, cmd: CacheCommand) -> Result<()> {
    let db = CacheDb::open(&config.db_path)
        .await
        .with_context(|| format!("opening cache database {}", config.db_path.display()))?;

    if cmd == CacheCommand::Sets {
        let names = config.cache_names();
        for name in db.set_names().await? {
            let marker = if names.is_allowed(&name) { "*" } else { " " };
            println!("{marker} {name}\t{}", db.entry_count(&name).await?);
        }
        return Ok(());
    }

    let network = FetchClient::new(FetchConfig::from_app_config(config))?;
    let router = CacheRouter::new(RouterConfig::from_app_config(config)?, Arc::new(db), Arc::new(network));
    let installed = router.install().await?;
    for url in installed.precached() {
        println!("precached {url}");
    }

    if cmd == CacheCommand::Activate {
        let (_router, report) = installed.activate().await?;
        for name in &report.deleted {
            println!("deleted {name}");
        }
        for name in &report.kept {
            println!("kept {name}");
        }
    }
    Ok(())
}

/// Print `text` as it is revealed, then the styled rendering.
async fn show(text: &str, animate: bool, interval: Duration, theme: Theme) -> Result<()> {
    let handle = spawn_reveal(text, animate, interval);
    let mut display = handle.subscribe();
    let mut stdout = std::io::stdout();
    let mut shown = 0;

    loop {
        {
            let current = display.borrow_and_update();
            stdout.write_all(current.get(shown..).unwrap_or_default().as_bytes())?;
            shown = current.len();
        }
        stdout.flush()?;
        if display.changed().await.is_err() {
            break;
        }
    }

    let final_display = handle.finished().await;
    writeln!(stdout, "\n\n{}", paint(&render(&final_display, theme)))?;
    Ok(())
}
