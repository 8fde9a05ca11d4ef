//! talant server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `TALANT_*` environment variables, opens the JSON store in `data_dir` and
//! serves the HTTP API.
//!
//! # Signing secret
//!
//! Sessions are signed with `token_secret`. Generate one with:
//!
//! ```
//! cargo run -p talant-server --bin server -- --generate-secret
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use rand_core::{OsRng, RngCore};
use talant_auth::{TokenService, password::hash_password};
use talant_server::{AppState, ServerConfig};
use talant_store_json::JsonStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Talant job board server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print a fresh random signing secret and exit.
  #[arg(long)]
  generate_secret: bool,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.generate_secret {
    println!("{}", hex::encode(random_secret()));
    return Ok(());
  }

  if cli.hash_password {
    let password = read_password()?;
    let hash = hash_password(&password).context("failed to hash password")?;
    println!("{hash}");
    return Ok(());
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("TALANT"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let data_dir = expand_tilde(&server_cfg.data_dir);
  let store = JsonStore::open(&data_dir)
    .await
    .with_context(|| format!("failed to open store at {data_dir:?}"))?;

  let secret = match &server_cfg.token_secret {
    Some(s) if !s.is_empty() => s.as_bytes().to_vec(),
    _ => {
      tracing::warn!("no token_secret configured; sessions will not survive a restart");
      random_secret().to_vec()
    }
  };
  let ttl = server_cfg.token_ttl().context("invalid session lifetime")?;
  let tokens = TokenService::with_ttl(&secret, ttl);

  let state = AppState {
    store:  Arc::new(store),
    tokens: Arc::new(tokens),
    config: Arc::new(server_cfg.clone()),
  };

  let app = talant_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!(data_dir = %data_dir.display(), "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

fn random_secret() -> [u8; 32] {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  bytes
}

/// Read a single line from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
