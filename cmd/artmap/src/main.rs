//! # artmap binary
//!
//! Wires settings, the board client and the snapshot store into the
//! pipeline service, then hands over to the interactive menu.

mod console;
mod menu;
mod monitor;

use std::sync::Arc;

use anyhow::Context;
use api_adapters::DemoBoard;
use configs::{ConfigError, Settings};
use domains::ports::BoardApi;
use services::{ArtMapService, ModerationPolicy};
use storage_adapters::LocalSnapshotStore;
use tokio::io::AsyncBufRead;
use tracing_subscriber::EnvFilter;

use crate::menu::Prompt;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn board_id(settings: &Settings) -> Option<String> {
    settings
        .board
        .id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .or_else(|| {
            settings
                .board
                .url
                .as_deref()
                .and_then(domains::board_id_from_url)
                .map(str::to_string)
        })
}

#[cfg(feature = "padlet-http")]
fn live_board(settings: &Settings, api_key: secrecy::SecretString) -> anyhow::Result<Arc<dyn BoardApi>> {
    use api_adapters::{PadletClient, RetryConfig};
    use std::time::Duration;

    let client = PadletClient::new(
        &settings.api.base_url,
        api_key,
        Duration::from_secs(settings.api.timeout_secs),
    )?
    .with_retry(RetryConfig::default().max_retries(settings.api.max_retries));
    tracing::info!(base_url = client.base_url(), "using board API");
    Ok(Arc::new(client))
}

async fn board_api<R: AsyncBufRead + Unpin>(
    settings: &Settings,
    prompt: &mut Prompt<R>,
) -> anyhow::Result<Option<Arc<dyn BoardApi>>> {
    #[cfg(feature = "padlet-http")]
    match configs::resolve_api_key(None) {
        Ok(key) => return live_board(settings, key).map(Some),
        Err(ConfigError::MissingApiKey) => {
            console::warning("PADLET_API_KEY가 설정되지 않았습니다 (환경 변수 또는 /run/secrets/PADLET_API_KEY)");
        }
        Err(err) => return Err(err.into()),
    }
    #[cfg(not(feature = "padlet-http"))]
    let _ = settings;

    if prompt.confirm("샘플 데이터로 데모 모드를 실행할까요? (y/N): ").await? {
        console::warning("데모 모드: 게시/댓글은 실제 보드에 전송되지 않습니다");
        Ok(Some(Arc::new(DemoBoard::new())))
    } else {
        Ok(None)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    configs::load_dotenv();
    init_tracing();

    let settings = Settings::load().context("loading settings")?;
    let board_id = board_id(&settings).context("no board configured: set ARTMAP__BOARD__ID or ARTMAP__BOARD__URL")?;

    let mut prompt = Prompt::stdin();
    let Some(api) = board_api(&settings, &mut prompt).await? else {
        println!("\n👋 프로그램을 종료합니다.");
        return Ok(());
    };

    let store = Arc::new(LocalSnapshotStore::new(settings.storage.data_dir.clone()));
    let policy = ModerationPolicy {
        blocked_words: settings.moderation.blocked_words.clone(),
        max_links: settings.moderation.max_links,
        flag_antarctica: settings.moderation.flag_antarctica,
    };
    let service = ArtMapService::new(api, store, board_id)
        .with_policy(policy)
        .with_help_comments(settings.auto_respond.post_comments);

    menu::run(&service, &settings, &mut prompt).await
}
