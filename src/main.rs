use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::info;
use tower_http::services::ServeDir;

use typedash::config::{Config, ConfigStore, FileConfigStore};
use typedash::leaderboard::Leaderboard;
use typedash::phrases;
use typedash::web::{router, AppState, GameInfo};

/// timed phrase typing game core with a persistent leaderboard server
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
struct Cli {
    /// address to bind the HTTP server to
    #[clap(short, long)]
    bind: Option<String>,

    /// path to the leaderboard database
    #[clap(short, long)]
    db: Option<PathBuf>,

    /// phrase file, one phrase per line
    #[clap(short, long)]
    phrases: Option<PathBuf>,

    /// directory of static client files to serve
    #[clap(long)]
    static_dir: Option<PathBuf>,

    /// number of seconds per session
    #[clap(short, long)]
    secs: Option<u32>,
}

impl Cli {
    /// Layer CLI flags over the loaded config file.
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(bind) = &self.bind {
            cfg.bind = bind.clone();
        }
        if let Some(db) = &self.db {
            cfg.db_path = Some(db.clone());
        }
        if let Some(phrases) = &self.phrases {
            cfg.phrases_file = Some(phrases.clone());
        }
        if let Some(static_dir) = &self.static_dir {
            cfg.static_dir = Some(static_dir.clone());
        }
        if let Some(secs) = self.secs {
            cfg.number_of_secs = secs;
        }
        cfg
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = cli.apply(FileConfigStore::new().load());

    let db = match &cfg.db_path {
        Some(path) => Leaderboard::open(path)?,
        None => Leaderboard::open_default()?,
    };

    let phrases = match &cfg.phrases_file {
        Some(path) => phrases::load_phrases(path)?,
        None => phrases::default_phrases(),
    };
    let game = GameInfo {
        seconds: cfg.number_of_secs,
        phrases,
    };
    let state = Arc::new(AppState::new(db, game));

    let mut app = router(state);
    if let Some(static_dir) = &cfg.static_dir {
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    let listener = tokio::net::TcpListener::bind(&cfg.bind).await?;
    info!("listening on {}", cfg.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
