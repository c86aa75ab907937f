//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "scriptorium";
const ENV_PREFIX: &str = "SCRIPTORIUM";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_GRACEFUL_SHUTDOWN_SECS: u64 = 30;
const DEFAULT_MAX_BODY_BYTES: u64 = 1024 * 1024;
const DEFAULT_CONTENT_DIR: &str = "web/blogposts";
const DEFAULT_SUMMARY_PATH: &str = "web/blogposts/summary.json";
const DEFAULT_KEY_DIGESTS_PATH: &str = "auth/keyhashes.json";
const DEFAULT_SITE_TITLE: &str = "Blog";

/// Command-line arguments for the scriptorium binary.
#[derive(Debug, Parser)]
#[command(name = "scriptorium", version, about = "Scriptorium blog server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "SCRIPTORIUM_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the blog HTTP server.
    Serve(Box<ServeArgs>),
    /// Generate an API key, store its digest and print the key once.
    #[command(name = "gen-api-key")]
    GenApiKey(GenApiKeyArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct StorageOverrides {
    /// Override the directory holding `<name>.md` and `<name>.html` files.
    #[arg(long = "storage-content-dir", value_name = "PATH")]
    pub content_dir: Option<PathBuf>,

    /// Override the summary index path.
    #[arg(long = "storage-summary-path", value_name = "PATH")]
    pub summary_path: Option<PathBuf>,

    /// Override the API key digest store path.
    #[arg(long = "storage-key-digests-path", value_name = "PATH")]
    pub key_digests_path: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub storage: StorageOverrides,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the maximum request body size in bytes.
    #[arg(long = "server-max-body-bytes", value_name = "BYTES")]
    pub server_max_body_bytes: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Toggle sanitisation of rendered post HTML.
    #[arg(
        long = "render-sanitize-html",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub render_sanitize_html: Option<bool>,

    /// Override the site title shown in page chrome.
    #[arg(long = "site-title", value_name = "TITLE")]
    pub site_title: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GenApiKeyArgs {
    /// Override the API key digest store path.
    #[arg(long = "storage-key-digests-path", value_name = "PATH")]
    pub key_digests_path: Option<PathBuf>,
}

/// Fully-resolved deployment settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub storage: StorageSettings,
    pub render: RenderSettings,
    pub site: SiteSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub graceful_shutdown: Duration,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub content_dir: PathBuf,
    pub summary_path: PathBuf,
    pub key_digests_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub sanitize_html: bool,
}

#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub title: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match cli.command.as_ref() {
        Some(Command::Serve(args)) => raw.apply_serve_overrides(&args.overrides),
        Some(Command::GenApiKey(args)) => raw.apply_gen_api_key_overrides(args),
        None => raw.apply_serve_overrides(&ServeOverrides::default()),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    storage: RawStorageSettings,
    render: RawRenderSettings,
    site: RawSiteSettings,
}

impl RawSettings {
    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(host) = overrides.server_host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.server_port {
            self.server.port = Some(port);
        }
        if let Some(seconds) = overrides.server_graceful_shutdown_seconds {
            self.server.graceful_shutdown_seconds = Some(seconds);
        }
        if let Some(limit) = overrides.server_max_body_bytes {
            self.server.max_body_bytes = Some(limit);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(sanitize) = overrides.render_sanitize_html {
            self.render.sanitize_html = Some(sanitize);
        }
        if let Some(title) = overrides.site_title.as_ref() {
            self.site.title = Some(title.clone());
        }
        self.apply_storage_overrides(&overrides.storage);
    }

    fn apply_gen_api_key_overrides(&mut self, args: &GenApiKeyArgs) {
        if let Some(path) = args.key_digests_path.as_ref() {
            self.storage.key_digests_path = Some(path.clone());
        }
    }

    fn apply_storage_overrides(&mut self, overrides: &StorageOverrides) {
        if let Some(dir) = overrides.content_dir.as_ref() {
            self.storage.content_dir = Some(dir.clone());
        }
        if let Some(path) = overrides.summary_path.as_ref() {
            self.storage.summary_path = Some(path.clone());
        }
        if let Some(path) = overrides.key_digests_path.as_ref() {
            self.storage.key_digests_path = Some(path.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            logging,
            storage,
            render,
            site,
        } = raw;

        Ok(Self {
            server: build_server_settings(server)?,
            logging: build_logging_settings(logging)?,
            storage: build_storage_settings(storage),
            render: RenderSettings {
                sanitize_html: render.sanitize_html.unwrap_or(false),
            },
            site: build_site_settings(site)?,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }
    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.addr", reason))?;

    let graceful_secs = server
        .graceful_shutdown_seconds
        .unwrap_or(DEFAULT_GRACEFUL_SHUTDOWN_SECS);
    if graceful_secs == 0 {
        return Err(LoadError::invalid(
            "server.graceful_shutdown_seconds",
            "must be greater than zero",
        ));
    }

    let max_body_value = server.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES);
    if max_body_value == 0 {
        return Err(LoadError::invalid(
            "server.max_body_bytes",
            "must be greater than zero",
        ));
    }
    let max_body_bytes = usize::try_from(max_body_value).map_err(|_| {
        LoadError::invalid(
            "server.max_body_bytes",
            "value exceeds supported range for usize",
        )
    })?;

    Ok(ServerSettings {
        addr,
        graceful_shutdown: Duration::from_secs(graceful_secs),
        max_body_bytes,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_storage_settings(storage: RawStorageSettings) -> StorageSettings {
    StorageSettings {
        content_dir: storage
            .content_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR)),
        summary_path: storage
            .summary_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SUMMARY_PATH)),
        key_digests_path: storage
            .key_digests_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_DIGESTS_PATH)),
    }
}

fn build_site_settings(site: RawSiteSettings) -> Result<SiteSettings, LoadError> {
    let title = site
        .title
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| DEFAULT_SITE_TITLE.to_string());
    if title.is_empty() {
        return Err(LoadError::invalid("site.title", "must not be blank"));
    }
    Ok(SiteSettings { title })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
    graceful_shutdown_seconds: Option<u64>,
    max_body_bytes: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawStorageSettings {
    content_dir: Option<PathBuf>,
    summary_path: Option<PathBuf>,
    key_digests_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRenderSettings {
    sanitize_html: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSiteSettings {
    title: Option<String>,
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
