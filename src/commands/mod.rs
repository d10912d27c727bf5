//! Module commands (AddIdentifier, SetFormat, etc).
//!
//! Parses operator commands and applies them to the shared redirect state.
//! Every command produces one or more reply lines for the operator.

pub mod table;

use std::sync::Arc;

use tracing::debug;

use crate::redirect::state::RedirectState;
use crate::redirect::template::DEFAULT_FORMAT;
use table::Table;

/// A parsed module command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    GetFormat,
    /// `SetFormat <format>`; `None` when the argument is missing.
    SetFormat(Option<String>),
    ListIdentifiers,
    /// `AddIdentifier [identifier]`.
    AddIdentifier(Vec<String>),
    /// `DelIdentifier [identifier]`.
    DelIdentifier(Vec<String>),
    Unknown(String),
}

impl Command {
    /// Parse a command line. Command names are case-insensitive.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (name, rest) = line.split_once(' ').unwrap_or((line, ""));
        let args = || -> Vec<String> { rest.split_whitespace().map(str::to_string).collect() };

        match name.to_lowercase().as_str() {
            "help" => Command::Help,
            "getformat" => Command::GetFormat,
            "setformat" => Command::SetFormat((!rest.is_empty()).then(|| rest.to_string())),
            "listidentifiers" => Command::ListIdentifiers,
            "addidentifier" => Command::AddIdentifier(args()),
            "delidentifier" => Command::DelIdentifier(args()),
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Executes module commands against the redirect state.
pub struct CommandInterpreter {
    state: Arc<RedirectState>,
}

impl CommandInterpreter {
    pub fn new(state: Arc<RedirectState>) -> Self {
        Self { state }
    }

    /// Run a command line issued by a client.
    ///
    /// `client_identifier` is the issuing client's identifier; it is used
    /// when AddIdentifier/DelIdentifier are given no argument.
    pub fn execute(&self, line: &str, client_identifier: &str) -> Vec<String> {
        let command = Command::parse(line);
        debug!("Processing module command: {:?}", command);

        match command {
            Command::Help => help_table().render(),
            Command::GetFormat => {
                vec![format!("'{}' is the currently in-use format", self.state.template())]
            }
            Command::SetFormat(None) => vec!["SetFormat requires an argument".to_string()],
            Command::SetFormat(Some(format)) => match self.state.set_template(&format) {
                Ok(()) => vec![format!("Set '{}' as the in-use format", format)],
                Err(e) => vec![format!(
                    "Unable to format message. Did you typo a formatter? {}",
                    e
                )],
            },
            Command::ListIdentifiers => self.list_identifiers(),
            Command::AddIdentifier(args) => match resolve_identifier("AddIdentifier", args, client_identifier) {
                Ok(id) => vec![self.add_identifier(&id)],
                Err(reply) => vec![reply],
            },
            Command::DelIdentifier(args) => match resolve_identifier("DelIdentifier", args, client_identifier) {
                Ok(id) => vec![self.del_identifier(&id)],
                Err(reply) => vec![reply],
            },
            Command::Unknown(line) => vec![format!("Unknown command '{}'. Try help", line)],
        }
    }

    fn list_identifiers(&self) -> Vec<String> {
        let identifiers = self.state.list_identifiers();
        if identifiers.is_empty() {
            return vec!["No set identifiers, use addidentifier to add some".to_string()];
        }

        let mut table = Table::new(["Identifier"]);
        for id in identifiers {
            table.add_row([id]);
        }
        table.render()
    }

    fn add_identifier(&self, id: &str) -> String {
        match self.state.add_identifier(id) {
            Ok(true) => format!("Added '{}' to identifiers", id),
            Ok(false) => format!("'{}' is already an identifier", id),
            Err(e) => e.to_string(),
        }
    }

    fn del_identifier(&self, id: &str) -> String {
        match self.state.remove_identifier(id) {
            Ok(()) => format!("Removed '{}' from identifiers", id),
            Err(e) => e.to_string(),
        }
    }
}

/// Pick the identifier an Add/Del command applies to.
fn resolve_identifier(
    command: &str,
    mut args: Vec<String>,
    client_identifier: &str,
) -> Result<String, String> {
    match args.len() {
        0 if !client_identifier.is_empty() => Ok(client_identifier.to_string()),
        0 => Err(format!("{} requires an argument", command)),
        1 => Ok(args.remove(0)),
        _ => Err(format!("{} takes a single identifier", command)),
    }
}

fn help_table() -> Table {
    let mut table = Table::new(["Command", "Description"]);
    table.add_row(["Help".to_string(), "This output".to_string()]);
    table.add_row([
        "SetFormat <format>".to_string(),
        format!(
            "Sets the format to modify messages with for specified clients. Defaults to '{}'",
            DEFAULT_FORMAT
        ),
    ]);
    table.add_row([
        "GetFormat".to_string(),
        "Gets the format to modify messages with for specified clients".to_string(),
    ]);
    table.add_row([
        "AddIdentifier [identifier]".to_string(),
        "Adds a client identifier to the list of identifiers to modify messages for. \
         If an identifier is not supplied, it uses the current client's identifier"
            .to_string(),
    ]);
    table.add_row([
        "DelIdentifier [identifier]".to_string(),
        "Removes a client identifier from the list of identifiers to modify messages for. \
         If an identifier is not supplied, it uses the current client's identifier"
            .to_string(),
    ]);
    table.add_row([
        "ListIdentifiers".to_string(),
        "Lists the currently set identifiers".to_string(),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn interpreter() -> CommandInterpreter {
        CommandInterpreter::new(Arc::new(RedirectState::new(Box::new(MemoryStore::new()))))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("HELP"), Command::Help);
        assert_eq!(Command::parse("getFormat"), Command::GetFormat);
        assert_eq!(
            Command::parse("setformat <{prefix}> {msg}"),
            Command::SetFormat(Some("<{prefix}> {msg}".to_string()))
        );
        assert_eq!(Command::parse("setformat"), Command::SetFormat(None));
        assert_eq!(
            Command::parse("AddIdentifier phone"),
            Command::AddIdentifier(vec!["phone".to_string()])
        );
        assert_eq!(Command::parse("delidentifier"), Command::DelIdentifier(vec![]));
        assert_eq!(Command::parse("frobnicate"), Command::Unknown("frobnicate".to_string()));
    }

    #[test]
    fn test_add_list_delete() {
        let cmd = interpreter();
        assert_eq!(
            cmd.execute("listidentifiers", ""),
            vec!["No set identifiers, use addidentifier to add some"]
        );
        assert_eq!(cmd.execute("addidentifier phone", ""), vec!["Added 'phone' to identifiers"]);
        assert_eq!(cmd.execute("addidentifier phone", ""), vec!["'phone' is already an identifier"]);

        let listing = cmd.execute("listidentifiers", "");
        assert_eq!(listing[1], "| Identifier |");
        assert_eq!(listing[3], "| phone      |");

        assert_eq!(cmd.execute("delidentifier ghost", ""), vec!["'ghost' is not a known identifier"]);
        assert_eq!(cmd.execute("delidentifier phone", ""), vec!["Removed 'phone' from identifiers"]);
    }

    #[test]
    fn test_identifier_defaults_to_current_client() {
        let cmd = interpreter();
        assert_eq!(cmd.execute("addidentifier", "tablet"), vec!["Added 'tablet' to identifiers"]);
        assert_eq!(cmd.execute("delidentifier", "tablet"), vec!["Removed 'tablet' from identifiers"]);
        assert_eq!(cmd.execute("addidentifier", ""), vec!["AddIdentifier requires an argument"]);
        assert_eq!(
            cmd.execute("delidentifier a b", "tablet"),
            vec!["DelIdentifier takes a single identifier"]
        );
    }

    #[test]
    fn test_set_and_get_format() {
        let cmd = interpreter();
        assert_eq!(
            cmd.execute("getformat", ""),
            vec!["'[{prefix}] {msg}' is the currently in-use format"]
        );
        assert_eq!(
            cmd.execute("setformat {prefix} said: {msg}", ""),
            vec!["Set '{prefix} said: {msg}' as the in-use format"]
        );

        let reply = cmd.execute("setformat {bogus} {msg}", "");
        assert!(reply[0].starts_with("Unable to format message."));
        assert!(reply[0].contains("{bogus}"));
        assert_eq!(
            cmd.execute("getformat", ""),
            vec!["'{prefix} said: {msg}' is the currently in-use format"]
        );
        assert_eq!(cmd.execute("setformat", ""), vec!["SetFormat requires an argument"]);
    }

    #[test]
    fn test_help_and_unknown() {
        let cmd = interpreter();
        let help = cmd.execute("help", "");
        assert!(help[1].starts_with("| Command"));
        assert!(help.iter().any(|l| l.contains("ListIdentifiers")));
        assert_eq!(help.len(), 3 + 6 + 1);

        assert_eq!(cmd.execute("wat now", ""), vec!["Unknown command 'wat now'. Try help"]);
    }
}
