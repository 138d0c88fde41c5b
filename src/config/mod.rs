//! Configuration layer: typed settings with layered precedence (file → env).

use std::num::NonZeroUsize;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::domain::types::{Language, SortOrder};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "vetrina";
const DEFAULT_PAGE_SIZE: usize = 6;
const DEFAULT_REVEAL_DELAY_MS: u64 = 250;
const DEFAULT_STORAGE_KEY: &str = "siteLang";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub listing: ListingSettings,
    pub logging: LoggingSettings,
    pub locale: LocaleSettings,
}

#[derive(Debug, Clone)]
pub struct ListingSettings {
    pub page_size: NonZeroUsize,
    pub reveal_delay: Duration,
    pub default_sort: SortOrder,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).expect("default page size is non-zero"),
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_DELAY_MS),
            default_sort: SortOrder::Newest,
        }
    }
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
pub struct LocaleSettings {
    pub default_language: Language,
    pub storage_key: String,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            default_language: Language::En,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
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

/// Load settings using the configured precedence (files → environment).
pub fn load() -> Result<Settings, LoadError> {
    let builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false))
        .add_source(Environment::with_prefix("VETRINA").separator("__"));

    let raw: RawSettings = builder.build()?.try_deserialize()?;
    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    listing: RawListingSettings,
    logging: RawLoggingSettings,
    locale: RawLocaleSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawListingSettings {
    page_size: Option<usize>,
    reveal_delay_ms: Option<u64>,
    default_sort: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLocaleSettings {
    default_language: Option<String>,
    storage_key: Option<String>,
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let page_size = raw.listing.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        let page_size = NonZeroUsize::new(page_size)
            .ok_or_else(|| LoadError::invalid("listing.page_size", "must be greater than zero"))?;

        let reveal_delay = Duration::from_millis(
            raw.listing
                .reveal_delay_ms
                .unwrap_or(DEFAULT_REVEAL_DELAY_MS),
        );

        let default_sort = match raw.listing.default_sort {
            None => SortOrder::Newest,
            Some(value) => match SortOrder::parse(&value) {
                SortOrder::Unordered => {
                    return Err(LoadError::invalid(
                        "listing.default_sort",
                        format!("unrecognized sort order `{value}`"),
                    ));
                }
                order => order,
            },
        };

        let level = match raw.logging.level {
            None => LevelFilter::INFO,
            Some(value) => value.parse().map_err(|_| {
                LoadError::invalid("logging.level", format!("unrecognized level `{value}`"))
            })?,
        };

        let format = if raw.logging.json.unwrap_or(false) {
            LogFormat::Json
        } else {
            LogFormat::Compact
        };

        let default_language = match raw.locale.default_language {
            None => Language::En,
            Some(value) => Language::from_tag(&value).ok_or_else(|| {
                LoadError::invalid(
                    "locale.default_language",
                    format!("expected `en` or `fa`, got `{value}`"),
                )
            })?,
        };

        let storage_key = raw
            .locale
            .storage_key
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

        Ok(Settings {
            listing: ListingSettings {
                page_size,
                reveal_delay,
                default_sort,
            },
            logging: LoggingSettings { level, format },
            locale: LocaleSettings {
                default_language,
                storage_key,
            },
        })
    }
}
