//! # Console Commands
//!
//! Colon commands typed at the console prompt.

use crate::panel::events::Tab;
use anyhow::{anyhow, bail, Result};

/// Help shown for `:help`
pub const HELP_TEXT: &str = "\
Commands:
  :run               run the query against the selected site
  :reset             regenerate the query from the example
  :copy              copy the query to the clipboard
  :site <domain>     select the site to query
  :sites             list available sites
  :tab <name>        show the query, example or response tab
  :edit              edit the query in $EDITOR
  :set <json>        replace the query with <json>
  :show              redraw the panel
  :result            print the last result as JSON
  :help              show this help
  :q                 quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Run,
    Reset,
    Copy,
    SelectSite(String),
    ListSites,
    ShowTab(Tab),
    Edit,
    Set(String),
    Show,
    Result,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(command) = line.strip_prefix(':') else {
        bail!("Commands start with ':' (try :help)");
    };
    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };

    let parsed = match name {
        "run" | "r" => ConsoleCommand::Run,
        "reset" => ConsoleCommand::Reset,
        "copy" | "y" => ConsoleCommand::Copy,
        "site" => {
            if argument.is_empty() {
                bail!("Usage: :site <domain>");
            }
            ConsoleCommand::SelectSite(argument.to_string())
        }
        "sites" => ConsoleCommand::ListSites,
        "tab" => ConsoleCommand::ShowTab(parse_tab(argument)?),
        "edit" | "e" => ConsoleCommand::Edit,
        "set" => ConsoleCommand::Set(argument.to_string()),
        "show" => ConsoleCommand::Show,
        "result" => ConsoleCommand::Result,
        "help" | "h" => ConsoleCommand::Help,
        "q" | "q!" | "quit" => ConsoleCommand::Quit,
        other => bail!("Unknown command ':{other}' (try :help)"),
    };
    Ok(Some(parsed))
}

fn parse_tab(name: &str) -> Result<Tab> {
    match name {
        "query" | "q" => Ok(Tab::Query),
        "example" | "example_response" | "e" => Ok(Tab::ExampleResponse),
        "response" | "r" => Ok(Tab::Response),
        "" => Err(anyhow!("Usage: :tab query|example|response")),
        other => Err(anyhow!("Unknown tab '{other}' (use query, example or response)")),
    }
}
