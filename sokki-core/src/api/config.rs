//! Engine configuration.

use crate::api::error::{Error, Result};

/// Default configuration values.
pub mod defaults {
    /// History similarity must strictly exceed this for a replacement.
    pub const SIMILARITY_THRESHOLD: f64 = 0.8;

    /// A suggestion pair must be observed more than this many times before
    /// each promotion prompt.
    pub const PROMOTION_THRESHOLD: u32 = 5;

    /// Words shorter than this many chars are never matched.
    pub const MIN_WORD_CHARS: usize = 2;
}

/// Engine tunables. Build one with [`Config::builder`] or start from
/// [`Config::default`].
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) similarity_threshold: f64,
    pub(crate) promotion_threshold: u32,
    pub(crate) min_word_chars: usize,
    pub(crate) enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            similarity_threshold: defaults::SIMILARITY_THRESHOLD,
            promotion_threshold: defaults::PROMOTION_THRESHOLD,
            min_word_chars: defaults::MIN_WORD_CHARS,
            enabled: true,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }

    pub fn promotion_threshold(&self) -> u32 {
        self.promotion_threshold
    }

    pub fn min_word_chars(&self) -> usize {
        self.min_word_chars
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(Error::Configuration(
                "similarity_threshold must be within 0.0..=1.0".to_string(),
            ));
        }
        if self.promotion_threshold == 0 {
            return Err(Error::Configuration(
                "promotion_threshold must be at least 1".to_string(),
            ));
        }
        if self.min_word_chars == 0 {
            return Err(Error::Configuration(
                "min_word_chars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fluent builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    similarity_threshold: Option<f64>,
    promotion_threshold: Option<u32>,
    min_word_chars: Option<usize>,
    enabled: Option<bool>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Similarity a history key must strictly exceed to replace a word.
    pub fn similarity_threshold(mut self, value: f64) -> Self {
        self.similarity_threshold = Some(value);
        self
    }

    /// Observations a suggestion pair needs before each promotion prompt.
    pub fn promotion_threshold(mut self, value: u32) -> Self {
        self.promotion_threshold = Some(value);
        self
    }

    /// Minimum word length, in chars, for any matching at all.
    pub fn min_word_chars(mut self, value: usize) -> Self {
        self.min_word_chars = Some(value);
        self
    }

    /// Whether the engine starts enabled.
    pub fn enabled(mut self, value: bool) -> Self {
        self.enabled = Some(value);
        self
    }

    pub fn build(self) -> Result<Config> {
        let base = Config::default();
        let config = Config {
            similarity_threshold: self
                .similarity_threshold
                .unwrap_or(base.similarity_threshold),
            promotion_threshold: self.promotion_threshold.unwrap_or(base.promotion_threshold),
            min_word_chars: self.min_word_chars.unwrap_or(base.min_word_chars),
            enabled: self.enabled.unwrap_or(base.enabled),
        };
        config.validate()?;
        Ok(config)
    }
}
