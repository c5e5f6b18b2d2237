//! Inspection tools

use serde::{Deserialize, Serialize};

use crate::error::DevtoolsError;
use crate::probe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Expression evaluation through the input box
    #[default]
    Console,
    /// Location and title of the page
    Network,
    /// Enumeration of page elements
    Elements,
    /// Dump of the page's local storage
    LocalStorage,
    /// Cookies visible to the page
    Cookies,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Console,
        Tool::Network,
        Tool::Elements,
        Tool::LocalStorage,
        Tool::Cookies,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Console => "console",
            Tool::Network => "network",
            Tool::Elements => "elements",
            Tool::LocalStorage => "localstorage",
            Tool::Cookies => "cookies",
        }
    }

    /// Heading printed above the tool's output
    pub fn heading(&self) -> &'static str {
        match self {
            Tool::Console => "=== JavaScript Console ===",
            Tool::Network => "=== Network ===",
            Tool::Elements => "=== Page Elements ===",
            Tool::LocalStorage => "=== Local Storage ===",
            Tool::Cookies => "=== Cookies ===",
        }
    }

    /// Script evaluated when the tool is refreshed, if it fetches at all
    pub fn probe(&self) -> Option<&'static str> {
        match self {
            Tool::Console | Tool::Network => None,
            Tool::Elements => Some(probe::ELEMENTS),
            Tool::LocalStorage => Some(probe::LOCAL_STORAGE),
            Tool::Cookies => Some(probe::COOKIES),
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Tool {
    type Err = DevtoolsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "console" | "js" | "c" => Ok(Tool::Console),
            "network" | "net" | "n" => Ok(Tool::Network),
            "elements" | "dom" | "e" => Ok(Tool::Elements),
            "localstorage" | "local-storage" | "storage" | "ls" => Ok(Tool::LocalStorage),
            "cookies" | "cookie" | "ck" => Ok(Tool::Cookies),
            _ => Err(DevtoolsError::UnknownTool(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_aliases() {
        for tool in Tool::ALL {
            assert_eq!(tool.as_str().parse::<Tool>().unwrap(), tool);
        }
        assert_eq!("DOM".parse::<Tool>().unwrap(), Tool::Elements);
        assert_eq!("storage".parse::<Tool>().unwrap(), Tool::LocalStorage);
        assert_eq!(
            "profiler".parse::<Tool>(),
            Err(DevtoolsError::UnknownTool("profiler".to_string()))
        );
    }

    #[test]
    fn test_only_page_tools_probe() {
        assert!(Tool::Console.probe().is_none());
        assert!(Tool::Network.probe().is_none());
        assert!(Tool::Elements.probe().is_some());
        assert!(Tool::LocalStorage.probe().is_some());
        assert!(Tool::Cookies.probe().is_some());
    }
}
