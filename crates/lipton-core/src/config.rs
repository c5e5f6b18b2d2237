//! Shell configuration
//!
//! Nothing is read from disk; defaults can be overridden from the
//! environment.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::Result;

const HOMEPAGE_ENV: &str = "LIPTONWEB_HOMEPAGE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// Heights of the page area and the inspection panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSizes {
    pub content: u32,
    pub inspector: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address opened by new tabs
    pub homepage: String,
    pub window_title: String,
    pub window_size: WindowSize,
    /// Tab labels are cut to this many characters
    pub tab_title_limit: usize,
    /// Split while the inspector is hidden
    pub split_collapsed: SplitSizes,
    /// Split while the inspector is shown
    pub split_expanded: SplitSizes,
}

impl Config {
    pub fn new(homepage: String) -> Self {
        Self {
            homepage,
            window_title: "LiptonWeb Browser".to_string(),
            window_size: WindowSize {
                width: 1200,
                height: 800,
            },
            tab_title_limit: 30,
            split_collapsed: SplitSizes {
                content: 600,
                inspector: 0,
            },
            split_expanded: SplitSizes {
                content: 400,
                inspector: 300,
            },
        }
    }

    /// Defaults with overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(homepage) = lookup(HOMEPAGE_ENV)
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
        {
            config.homepage = homepage;
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.homepage.trim().is_empty() {
            return Err(CoreError::Config("homepage cannot be empty".to_string()));
        }

        if self.tab_title_limit == 0 {
            return Err(CoreError::Config(
                "tab title limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("https://duckduckgo.com".to_string())
    }
}
