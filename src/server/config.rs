use std::{
    fmt, fs, io,
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
    time::Duration,
};

use serde::{Deserialize, Serialize};
use url::Url;

use super::serde::as_secs;
use crate::game_config::{GameConfig, PartialGameConfig};

macro_rules! apply_if_some {
    ($cfg:expr, $o:expr) => {
        if let Some(v) = $o {
            $cfg = Some(v)
        }
    };
    ($cfg:expr, $o:expr, required) => {
        if let Some(v) = $o {
            $cfg = v
        }
    };
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct AppConfig {
    /// Public address of the board, only used for the startup announcement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_base: Option<Url>,
    pub socket: u16,
    pub address: IpAddr,
    pub serve_from: PathBuf,
    /// TLS is enabled when both files are set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_chain_file: Option<PathBuf>,
    /// Pause before showing the robot's reply, 0 to disable.
    #[serde(with = "as_secs")]
    pub robot_delay: Duration,
    pub game: GameConfig,
}

#[derive(Default)]
pub struct AppConfigPartial {
    pub url_base: Option<Url>,
    pub socket: Option<u16>,
    pub address: Option<IpAddr>,
    pub serve_from: Option<PathBuf>,
    pub private_key_file: Option<PathBuf>,
    pub certificate_chain_file: Option<PathBuf>,
    pub robot_delay: Option<Duration>,
    pub game: PartialGameConfig,
}

#[derive(Debug)]
pub enum AppConfigError {
    FailedToReadFile(io::Error),
    FailedToParseContents(toml::de::Error),
}

impl fmt::Display for AppConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailedToReadFile(e) => write!(f, "failed to read file: {e}"),
            Self::FailedToParseContents(e) => write!(f, "failed to parse contents: {e}"),
        }
    }
}

impl std::error::Error for AppConfigError {}

impl AppConfig {
    pub fn from_file(path: &PathBuf) -> Result<Self, AppConfigError> {
        let cfg = fs::read_to_string(path).map_err(AppConfigError::FailedToReadFile)?;
        Self::from_toml(&cfg)
    }

    pub fn from_toml(contents: &str) -> Result<Self, AppConfigError> {
        toml::from_str::<Self>(contents).map_err(AppConfigError::FailedToParseContents)
    }

    pub fn apply_partial(&mut self, cfg: AppConfigPartial) {
        apply_if_some!(self.url_base, cfg.url_base);
        apply_if_some!(self.socket, cfg.socket, required);
        apply_if_some!(self.address, cfg.address, required);
        apply_if_some!(self.serve_from, cfg.serve_from, required);
        apply_if_some!(self.private_key_file, cfg.private_key_file);
        apply_if_some!(self.certificate_chain_file, cfg.certificate_chain_file);
        apply_if_some!(self.robot_delay, cfg.robot_delay, required);
        self.game.apply_partial(&cfg.game);
    }

    /// Key and certificate chain, if both are configured.
    #[must_use]
    pub fn tls_files(&self) -> Option<(&PathBuf, &PathBuf)> {
        self.private_key_file
            .as_ref()
            .zip(self.certificate_chain_file.as_ref())
    }

    /// Where players should point their browser.
    #[must_use]
    pub fn public_url(&self) -> String {
        if let Some(url) = &self.url_base {
            return url.to_string();
        }

        let scheme = if self.tls_files().is_some() { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.address, self.socket)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            url_base: None,
            socket: 8080,
            address: Ipv4Addr::new(127, 0, 0, 1).into(),
            serve_from: PathBuf::from("./static"),
            private_key_file: None,
            certificate_chain_file: None,
            robot_delay: Duration::from_secs(1),
            game: GameConfig::default(),
        }
    }
}
