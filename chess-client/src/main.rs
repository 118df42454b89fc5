use std::io;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chess_client::settings::ClientSettings;
use chess_client::storage::StorageManager;
use chess_client::App;

fn main() -> Result<()> {
    let settings = ClientSettings::load();

    // 日志写到 stderr，避免和棋盘输出混在一起
    let mut filter = EnvFilter::from_default_env();
    for directive in settings.log_level.filter_directives() {
        filter = filter.add_directive(directive.parse()?);
    }
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let resume = std::env::args().skip(1).any(|arg| arg == "--resume");

    let storage = match &settings.save_dir {
        Some(dir) => StorageManager::with_dir(dir),
        None => StorageManager::new(),
    };
    let storage = match storage {
        Ok(storage) => {
            info!("存储目录: {:?}", storage.saves_directory());
            Some(storage)
        }
        Err(e) => {
            warn!("存储不可用，本局不会保存: {:#}", e);
            None
        }
    };

    if let Some(info) = storage.as_ref().and_then(StorageManager::saved_game_info) {
        println!(
            "Saved game: {} moves, saved {}",
            info.move_count,
            info.formatted_time()
        );
    }

    let mut app = App::new(settings, storage);
    if resume && !app.resume() {
        println!("No saved game found");
    }

    println!("Same-device chess. Type `help` for commands.");
    app.run(io::stdin().lock(), io::stdout().lock())
}
