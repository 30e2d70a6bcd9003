//! # Terminal Session
//!
//! Turns input lines into commands and commands into output.
//!
//! ## Commands
//! | Input               | Effect                               | Output        |
//! |---------------------|--------------------------------------|---------------|
//! | `products`          | none                                 | view          |
//! | `add <name>`        | adds a catalog item                  | view          |
//! | `remove <name>`     | removes an item                      | view          |
//! | `clear`             | empties the cart                     | view          |
//! | `discount`          | none                                 | selector      |
//! | `discount <value>`  | selects a discount                   | view          |
//! | `reload`            | retries a failed catalog load        | view          |
//! | `cart`              | none                                 | JSON          |
//! | `status`            | none                                 | JSON          |
//! | `help`              | none                                 | help text     |
//! | `quit`              | ends the session                     | nothing       |

use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::commands;
use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState, LedgerState};
use crate::view;

// =============================================================================
// Command Parsing
// =============================================================================

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products,
    Add(String),
    Remove(String),
    Clear,
    Discount(String),
    Discounts,
    Cart,
    Status,
    Reload,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let argument = |usage: &str| {
            if rest.is_empty() {
                Err(ApiError::validation(format!("Usage: {}", usage)))
            } else {
                Ok(rest.to_string())
            }
        };

        match word.to_lowercase().as_str() {
            "products" | "ls" => Ok(Command::Products),
            "add" => argument("add <name>").map(Command::Add),
            "remove" | "rm" => argument("remove <name>").map(Command::Remove),
            "clear" => Ok(Command::Clear),
            "discount" if rest.is_empty() => Ok(Command::Discounts),
            "discount" => Ok(Command::Discount(rest.to_string())),
            "cart" => Ok(Command::Cart),
            "status" => Ok(Command::Status),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err(ApiError::validation("Empty command")),
            other => Err(ApiError::not_found("Command", other)),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// What the session loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this and keep reading.
    Output(String),
    /// Stop reading.
    Quit,
}

/// State shared by the session loop and the catalog re-render task.
#[derive(Debug)]
pub struct Session {
    config: ConfigState,
    catalog: CatalogState,
    ledger: LedgerState,
}

impl Session {
    pub fn new(config: ConfigState, catalog: CatalogState, ledger: LedgerState) -> Self {
        Session {
            config,
            catalog,
            ledger,
        }
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn ledger(&self) -> &LedgerState {
        &self.ledger
    }

    /// Renders the current screen.
    pub fn render(&self) -> String {
        let load_state = self.catalog.load_state();
        self.ledger
            .with_ledger(|ledger| view::render(&self.config.store, &load_state, ledger))
    }

    /// Parses and runs one input line.
    pub fn handle_line(&self, line: &str) -> Reply {
        match line.parse::<Command>() {
            Ok(command) => self.execute(command),
            Err(e) => error_reply(e),
        }
    }

    /// Runs a command. Accepted state changes are followed by a re-render.
    pub fn execute(&self, command: Command) -> Reply {
        let result: Result<Option<String>, ApiError> = match command {
            Command::Products => Ok(None),
            Command::Add(name) => {
                commands::add_to_cart(&self.catalog, &self.ledger, &name).map(|_| None)
            }
            Command::Remove(name) => commands::remove_from_cart(&self.ledger, &name).map(|_| None),
            Command::Clear => {
                commands::clear_cart(&self.ledger);
                Ok(None)
            }
            Command::Discount(value) => commands::set_discount(&self.ledger, &value).map(|_| None),
            Command::Discounts => Ok(Some(view::render_discounts(&commands::list_discounts(
                &self.ledger,
            )))),
            Command::Reload => {
                commands::reload_products(&self.catalog);
                Ok(None)
            }
            Command::Cart => to_json(&commands::get_cart(&self.ledger)).map(Some),
            Command::Status => to_json(&commands::catalog_status(&self.catalog)).map(Some),
            Command::Help => Ok(Some(view::help().to_string())),
            Command::Quit => return Reply::Quit,
        };

        match result {
            Ok(Some(text)) => Reply::Output(text),
            Ok(None) => Reply::Output(self.render()),
            Err(e) => error_reply(e),
        }
    }
}

fn error_reply(err: ApiError) -> Reply {
    warn!(code = ?err.code, "{}", err.message);
    Reply::Output(format!("Error: {}", err.message))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::internal(e.to_string()))
}
