//! Line commands for the text-mode window
//!
//! - `go <address>`, `back`, `forward`, `reload`
//! - `new [address]`, `close [n]`, `tab <n>` with 1-based tab numbers
//! - `devtools`, `tool <name>`, `eval <code>` or `> <code>`, `clear`
//! - `json` dumps the window state, `help`, `quit`

use lipton_core::{CoreError, Intent, SessionRegistry, Tool};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Back,
    Forward,
    Reload,
    New(Option<String>),
    /// Tab number, or the active tab
    Close(Option<usize>),
    Tab(usize),
    Devtools,
    Tool(Tool),
    Eval(String),
    Clear,
    /// Print the window state as JSON
    Json,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        if let Some(code) = input.strip_prefix('>') {
            return Ok(Some(Command::Eval(code.trim().to_string())));
        }

        let mut parts = input.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let parsed = match command.as_str() {
            "go" | "open" | "g" => Command::Go(required(&command, arg)?),
            "back" | "b" => Command::Back,
            "forward" | "f" => Command::Forward,
            "reload" | "r" => Command::Reload,
            "new" | "n" => Command::New(arg),
            "close" | "x" => Command::Close(arg.map(|a| tab_number(&command, &a)).transpose()?),
            "tab" | "t" => Command::Tab(tab_number(&command, &required(&command, arg)?)?),
            "devtools" | "dev" | "d" => Command::Devtools,
            "tool" => {
                let name = required(&command, arg)?;
                Command::Tool(name.parse::<Tool>().map_err(CoreError::from)?)
            }
            "eval" | "e" => Command::Eval(required(&command, arg)?),
            "clear" => Command::Clear,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(AppError::UnknownCommand(command)),
        };

        Ok(Some(parsed))
    }

    /// Resolve tab numbers against the open tabs. `None` for commands that
    /// are handled by the window surface itself, or a tab number that does
    /// not exist.
    pub fn into_intent(self, registry: &SessionRegistry) -> Option<Intent> {
        let tab = |n: usize| registry.at(n - 1).map(|s| s.id());

        match self {
            Command::Go(address) => Some(Intent::SubmitAddress(address)),
            Command::Back => Some(Intent::Back),
            Command::Forward => Some(Intent::Forward),
            Command::Reload => Some(Intent::Reload),
            Command::New(address) => Some(Intent::NewTab(address)),
            Command::Close(None) => Some(Intent::CloseTab(None)),
            Command::Close(Some(n)) => tab(n).map(|id| Intent::CloseTab(Some(id))),
            Command::Tab(n) => tab(n).map(Intent::SwitchTab),
            Command::Devtools => Some(Intent::ToggleInspector),
            Command::Tool(tool) => Some(Intent::SelectTool(tool)),
            Command::Eval(code) => Some(Intent::Evaluate(code)),
            Command::Clear => Some(Intent::ClearInspector),
            Command::Quit => Some(Intent::Quit),
            Command::Json | Command::Help => None,
        }
    }
}

pub const HELP: &str = "commands: go <address> | back | forward | reload | new [address] | \
close [n] | tab <n> | devtools | tool <console|network|elements|localstorage|cookies> | \
eval <code> | > <code> | clear | json | quit";

fn required(command: &str, arg: Option<String>) -> Result<String> {
    arg.ok_or_else(|| AppError::InvalidArgument {
        command: command.to_string(),
        value: String::new(),
    })
}

fn tab_number(command: &str, value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::InvalidArgument {
            command: command.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipton_engine::event_channel;
    use lipton_engine::scripted::ScriptedEngine;

    #[test]
    fn test_parse_navigation() {
        assert_eq!(
            Command::parse("go example.com").unwrap(),
            Some(Command::Go("example.com".to_string()))
        );
        assert_eq!(Command::parse("  BACK ").unwrap(), Some(Command::Back));
        assert_eq!(Command::parse("f").unwrap(), Some(Command::Forward));
        assert_eq!(Command::parse("").unwrap(), None);
        assert!(Command::parse("go").is_err());
    }

    #[test]
    fn test_parse_tabs() {
        assert_eq!(Command::parse("new").unwrap(), Some(Command::New(None)));
        assert_eq!(
            Command::parse("new rust-lang.org").unwrap(),
            Some(Command::New(Some("rust-lang.org".to_string())))
        );
        assert_eq!(Command::parse("close").unwrap(), Some(Command::Close(None)));
        assert_eq!(Command::parse("close 2").unwrap(), Some(Command::Close(Some(2))));
        assert_eq!(Command::parse("tab 3").unwrap(), Some(Command::Tab(3)));
        assert!(Command::parse("tab 0").is_err());
        assert!(Command::parse("tab two").is_err());
    }

    #[test]
    fn test_parse_inspector() {
        assert_eq!(Command::parse("devtools").unwrap(), Some(Command::Devtools));
        assert_eq!(
            Command::parse("tool cookies").unwrap(),
            Some(Command::Tool(Tool::Cookies))
        );
        assert!(matches!(
            Command::parse("tool sources"),
            Err(AppError::Core(CoreError::Devtools(_)))
        ));
        assert_eq!(
            Command::parse("> document.title").unwrap(),
            Some(Command::Eval("document.title".to_string()))
        );
        assert_eq!(
            Command::parse("eval 1 + 2").unwrap(),
            Some(Command::Eval("1 + 2".to_string()))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            Command::parse("launch rockets"),
            Err(AppError::UnknownCommand(c)) if c == "launch"
        ));
    }

    #[test]
    fn test_into_intent_resolves_tab_numbers() {
        let engine = ScriptedEngine::new();
        let (tx, _rx) = event_channel();
        let mut registry =
            SessionRegistry::start(Box::new(engine), tx, "https://duckduckgo.com", None);
        let first = registry.active_id();
        registry.open(None);

        assert_eq!(
            Command::Tab(1).into_intent(&registry),
            Some(Intent::SwitchTab(first))
        );
        assert_eq!(
            Command::Close(Some(1)).into_intent(&registry),
            Some(Intent::CloseTab(Some(first)))
        );
        assert_eq!(Command::Tab(3).into_intent(&registry), None);
        assert_eq!(Command::Help.into_intent(&registry), None);
        assert_eq!(
            Command::Go("x".to_string()).into_intent(&registry),
            Some(Intent::SubmitAddress("x".to_string()))
        );
    }
}
