//! Configuration.
//!
//! Matching constants live in [`MatchWeights`] and [`ResolverSettings`]; both default to the
//! values the chatbot has always used. [`AppConfig`] is the binary-level configuration read
//! from `KNSBOT_*` environment variables (optionally seeded from a `.env` file).

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

use crate::composer::ResponseTiming;
use crate::error::AppError;

pub const ENV_KNOWLEDGE_PATH: &str = "KNSBOT_KNOWLEDGE_PATH";
pub const ENV_TYPING_DELAY_MS: &str = "KNSBOT_TYPING_DELAY_MS";
pub const ENV_FOLLOWUP_DELAY_MS: &str = "KNSBOT_FOLLOWUP_DELAY_MS";
pub const ENV_LOG_FORMAT: &str = "KNSBOT_LOG_FORMAT";
pub const ENV_MIN_PARTIAL_SCORE: &str = "KNSBOT_MIN_PARTIAL_SCORE";

/// Scoring weights of the FAQ matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MatchWeights {
    /// Keyword found with word boundaries on both sides.
    pub exact_keyword: u32,
    /// Keyword found only as a bare substring.
    pub partial_keyword: u32,
    /// Each long part of a multi-word keyword found in the input.
    pub keyword_part: u32,
    /// Multiplied by the number of matched keywords when more than one matched.
    pub multi_keyword_factor: u32,
    /// Each long word of the question label found in the input.
    pub question_word: u32,
    /// Lowest score a partial-only winner may have. Zero would make a zero score usable.
    #[validate(range(min = 1))]
    pub min_partial_score: u32,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            exact_keyword: 10,
            partial_keyword: 5,
            keyword_part: 2,
            multi_keyword_factor: 2,
            question_word: 3,
            min_partial_score: 5,
        }
    }
}

/// Knobs of the programme resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ResolverSettings {
    /// A residual query shorter than this falls back to the raw message.
    #[validate(range(min = 1))]
    pub min_residual_len: usize,
    /// Names longer than this also match when their prefix of this length is present.
    #[validate(range(min = 1))]
    pub name_prefix_len: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            min_residual_len: 3,
            name_prefix_len: 15,
        }
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Configuration of the chatbot binary.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Knowledge file to load instead of the built-in dataset.
    pub knowledge_path: Option<PathBuf>,
    /// Simulated typing delay before the first reply of a turn.
    pub typing_delay: Duration,
    /// Spacing between the messages of a multi-part reply.
    pub followup_delay: Duration,
    pub log_format: LogFormat,
    #[validate(nested)]
    pub match_weights: MatchWeights,
    #[validate(nested)]
    pub resolver: ResolverSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        let timing = ResponseTiming::default();
        Self {
            knowledge_path: None,
            typing_delay: timing.typing,
            followup_delay: timing.step,
            log_format: LogFormat::default(),
            match_weights: MatchWeights::default(),
            resolver: ResolverSettings::default(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(path) = env_value::<PathBuf>(ENV_KNOWLEDGE_PATH)? {
            config.knowledge_path = Some(path);
        }
        if let Some(ms) = env_value::<u64>(ENV_TYPING_DELAY_MS)? {
            config.typing_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = env_value::<u64>(ENV_FOLLOWUP_DELAY_MS)? {
            config.followup_delay = Duration::from_millis(ms);
        }
        if let Some(format) = env_value::<LogFormat>(ENV_LOG_FORMAT)? {
            config.log_format = format;
        }
        if let Some(score) = env_value::<u32>(ENV_MIN_PARTIAL_SCORE)? {
            config.match_weights.min_partial_score = score;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reply pacing derived from the configured delays.
    pub fn timing(&self) -> ResponseTiming {
        ResponseTiming {
            typing: self.typing_delay,
            step: self.followup_delay,
            ..ResponseTiming::default()
        }
    }
}

/// Read and parse an optional environment variable. Empty values count as unset.
fn env_value<T>(key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{}: {}", key, e))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(AppError::Config(format!("{}: {}", key, e))),
    }
}
