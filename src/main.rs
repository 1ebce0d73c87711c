use std::{
    net::SocketAddr,
    path::PathBuf,
    sync::Arc,
};

use clap::Parser;
use tracing_subscriber::{
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use yomirei::{
    dictionary::DictType,
    web,
    AppConfig,
    AppContext,
};

#[derive(Parser)]
#[command(name = "yomirei")]
#[command(about = "Browse example sentences with furigana by vocabulary category", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON config file (default: config.json in the application data directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sentences CSV with a `Sentence` column
    #[arg(long)]
    sentences: Option<PathBuf>,

    /// Navigation CSV with a `Word` column and one flag column per category
    #[arg(long)]
    navigation: Option<PathBuf>,

    /// Directory served under /static
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:5000
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Tokenizer dictionary to provision and read features from
    #[arg(long, value_enum)]
    dictionary_type: Option<DictType>,

    /// Prebuilt vibrato system.dic; skips the download
    #[arg(long)]
    dictionary: Option<PathBuf>,
}

impl Cli {
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(path) = self.sentences {
            config.sentences_path = path;
        }
        if let Some(path) = self.navigation {
            config.navigation_path = path;
        }
        if let Some(dir) = self.static_dir {
            config.static_dir = dir;
        }
        if let Some(addr) = self.bind {
            config.bind_addr = addr;
        }
        if let Some(dict_type) = self.dictionary_type {
            config.dictionary_type = dict_type;
        }
        if let Some(path) = self.dictionary {
            config.dictionary_path = Some(path);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    let config = cli.apply(config);
    tracing::debug!(?config, "Resolved configuration");

    // Dictionary provisioning uses a blocking HTTP client
    let startup_config = config.clone();
    let ctx = tokio::task::spawn_blocking(move || AppContext::load(&startup_config)).await??;

    web::serve(Arc::new(ctx), config.bind_addr, &config.static_dir).await?;
    Ok(())
}
