use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_COMPILER_URL: &str = "http://closure-compiler.appspot.com/compile";

/// How `/smush` turns a list of source URLs into a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmushMode {
    /// Forward the URLs to the remote compiler and store the output under `out/`.
    Compile,
    /// Fetch every URL and return the concatenated text.
    Concat,
}

impl FromStr for SmushMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compile" => Ok(SmushMode::Compile),
            "concat" => Ok(SmushMode::Concat),
            other => Err(AppError::ConfigError(format!("Unknown SMUSH_MODE: {}", other))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub mode: SmushMode,
    pub compiler_url: String,
    pub static_root: PathBuf,
    pub template_dir: PathBuf,
    pub fetch_concurrency: usize,
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "12345".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let mode = match env::var("SMUSH_MODE") {
            Ok(raw) => raw.parse()?,
            Err(env::VarError::NotPresent) => SmushMode::Compile,
            Err(e) => return Err(e.into()),
        };

        let compiler_url = env::var("COMPILER_URL").unwrap_or_else(|_| DEFAULT_COMPILER_URL.to_string());
        let static_root = PathBuf::from(env::var("STATIC_ROOT").unwrap_or_else(|_| ".".to_string()));
        let template_dir = PathBuf::from(env::var("TEMPLATE_DIR").unwrap_or_else(|_| "tmpl".to_string()));

        let fetch_concurrency = parse_concurrency(&env::var("FETCH_CONCURRENCY").unwrap_or_else(|_| "4".to_string()))?;

        let timeout_secs = env::var("HTTP_TIMEOUT_SECS").unwrap_or_else(|_| "30".to_string());
        let timeout_secs = timeout_secs
            .parse::<u64>()
            .map_err(|e| AppError::ConfigError(format!("Invalid HTTP_TIMEOUT_SECS: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            mode,
            compiler_url,
            static_root,
            template_dir,
            fetch_concurrency,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Directory the compile strategy writes into; served back under `/out/`.
    pub fn output_dir(&self) -> PathBuf {
        self.static_root.join("out")
    }
}

fn parse_concurrency(raw: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(0) => Err(AppError::ConfigError("FETCH_CONCURRENCY must be at least 1".to_string())),
        Ok(n) => Ok(n),
        Err(e) => Err(AppError::ConfigError(format!("Invalid FETCH_CONCURRENCY: {}", e))),
    }
}
