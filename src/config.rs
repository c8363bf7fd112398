use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;

pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const PAGE_SIZE_ENV: &str = "PROMANO_PAGE_SIZE";
pub const RESET_ON_FILTER_CHANGE_ENV: &str = "PROMANO_RESET_ON_FILTER_CHANGE";
pub const RESET_ON_DATA_CHANGE_ENV: &str = "PROMANO_RESET_ON_DATA_CHANGE";
pub const DISCARD_STALE_ENV: &str = "PROMANO_DISCARD_STALE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub initial_page_size: usize,
    /// Only read by the local paginator.
    pub reset_on_data_change: bool,
    pub reset_on_filter_change: bool,
    /// Drop responses from fetches that were overtaken by a newer one.
    pub discard_stale_responses: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            initial_page_size: DEFAULT_PAGE_SIZE,
            reset_on_data_change: true,
            reset_on_filter_change: true,
            discard_stale_responses: false,
        }
    }
}

impl PaginationConfig {
    pub fn with_initial_page_size(mut self, page_size: usize) -> Self {
        self.initial_page_size = page_size.max(1);
        self
    }

    pub fn with_reset_on_data_change(mut self, enabled: bool) -> Self {
        self.reset_on_data_change = enabled;
        self
    }

    pub fn with_reset_on_filter_change(mut self, enabled: bool) -> Self {
        self.reset_on_filter_change = enabled;
        self
    }

    pub fn with_discard_stale_responses(mut self, enabled: bool) -> Self {
        self.discard_stale_responses = enabled;
        self
    }

    /// Applies overrides from a variable lookup; unset variables keep the current value.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(PAGE_SIZE_ENV) {
            let page_size: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("{PAGE_SIZE_ENV} must be a positive integer: {raw:?}"))?;
            if page_size == 0 {
                bail!("{PAGE_SIZE_ENV} must be at least 1");
            }
            self.initial_page_size = page_size;
        }
        if let Some(raw) = lookup(RESET_ON_FILTER_CHANGE_ENV) {
            self.reset_on_filter_change = parse_flag(RESET_ON_FILTER_CHANGE_ENV, &raw)?;
        }
        if let Some(raw) = lookup(RESET_ON_DATA_CHANGE_ENV) {
            self.reset_on_data_change = parse_flag(RESET_ON_DATA_CHANGE_ENV, &raw)?;
        }
        if let Some(raw) = lookup(DISCARD_STALE_ENV) {
            self.discard_stale_responses = parse_flag(DISCARD_STALE_ENV, &raw)?;
        }
        Ok(self)
    }
}

pub fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("{name} must be a boolean flag, got {other:?}")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub pagination: PaginationConfig,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let pagination = PaginationConfig::default()
            .apply_overrides(|name| std::env::var(name).ok())
            .context("invalid pagination settings in environment")?;
        Ok(Self {
            pagination,
            data_dir: default_data_dir()?,
        })
    }

    pub fn webview_data_dir(&self) -> Result<PathBuf> {
        ensure_webview_data_dir(&self.data_dir)
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "promano", "promano")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().to_path_buf())
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}
