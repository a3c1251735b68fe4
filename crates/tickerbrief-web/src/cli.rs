//! Server configuration.
//!
//! Every option falls back to an environment variable; `.env` is loaded before parsing.
//!
//! | Option | Env | Default |
//! |--------|-----|---------|
//! | `--alpha-vantage-api-key` | `ALPHA_VANTAGE_API_KEY` | required |
//! | `--gemini-api-key` | `GEMINI_API_KEY` | empty (fallback analysis only) |
//! | `--gemini-model` | `GEMINI_MODEL` | `gemini-1.5-pro` |
//! | `--host` | `HOST` | `0.0.0.0` |
//! | `--port` | `PORT` | `3000` |
//! | `--static-dir` | `TICKERBRIEF_STATIC_DIR` | `public` |
//! | `--timeout-ms` | `TICKERBRIEF_TIMEOUT_MS` | `10000` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use tickerbrief_core::config::DEFAULT_GEMINI_MODEL;
use tickerbrief_core::http_client::DEFAULT_TIMEOUT_MS;
use tickerbrief_core::{AlphaVantageConfig, GeminiConfig};

/// Stock summary server: ticker or company name in, normalized series and analysis out.
#[derive(Debug, Parser)]
#[command(name = "tickerbrief", author, version, about)]
pub struct Cli {
    /// Alpha Vantage API key.
    #[arg(long, env = "ALPHA_VANTAGE_API_KEY", hide_env_values = true)]
    pub alpha_vantage_api_key: String,

    /// Gemini API key. Without one every report carries the fallback analysis.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, default_value = "")]
    pub gemini_api_key: String,

    /// Gemini model used for the analysis text.
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory holding `index.html` and other static assets.
    #[arg(long, env = "TICKERBRIEF_STATIC_DIR", default_value = "public")]
    pub static_dir: PathBuf,

    /// Timeout budget for the market data calls, in milliseconds.
    #[arg(long, env = "TICKERBRIEF_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,
}

impl Cli {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn alpha_vantage_config(&self) -> AlphaVantageConfig {
        AlphaVantageConfig::new(self.alpha_vantage_api_key.clone())
            .with_timeout_ms(self.timeout_ms)
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig::new(self.gemini_api_key.clone()).with_model(self.gemini_model.clone())
    }
}
