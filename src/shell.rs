//! # Shell Adapter
//!
//! Turns text commands into drawer actions and plays the part of a navigation
//! container: it holds the current state and installs each reducer result.
//!
//! ```text
//! open | close | toggle           drawer actions
//! jump <Name> [json]              JUMP_TO, optional params object
//! navigate <Name> [json]          NAVIGATE
//! back                            GO_BACK
//! params <json>                   SET_PARAMS on the focused route
//! focus <Name>                    route focus by name
//! state                           print the current state
//! quit                            leave
//! ```

use log::{debug, trace};
use std::fmt;
use std::sync::Arc;

use crate::core::route::{NavigationState, Params};
use crate::core::router::{NavigationAction, Router, RouterError};
use crate::core::{DrawerAction, DrawerRouter, DrawerState, RouteConfig, TabState};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(DrawerAction),
    /// Focus a route by name.
    Focus(String),
    Show,
    Quit,
}

#[derive(Debug)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    BadParams(serde_json::Error),
    ParamsNotObject,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "empty command"),
            CommandError::Unknown(word) => write!(f, "unknown command: {word}"),
            CommandError::MissingArgument(what) => write!(f, "missing argument: {what}"),
            CommandError::BadParams(e) => write!(f, "params are not valid JSON: {e}"),
            CommandError::ParamsNotObject => write!(f, "params must be a JSON object"),
        }
    }
}

impl std::error::Error for CommandError {}

/// Splits off the first whitespace-separated word.
fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn parse_params(text: &str) -> Result<Option<Params>, CommandError> {
    if text.is_empty() {
        return Ok(None);
    }
    match serde_json::from_str(text).map_err(CommandError::BadParams)? {
        serde_json::Value::Object(map) => Ok(Some(map)),
        _ => Err(CommandError::ParamsNotObject),
    }
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let (word, rest) = split_word(line.trim());
    match word {
        "" => Err(CommandError::Empty),
        "open" => Ok(Command::Dispatch(DrawerAction::open_drawer())),
        "close" => Ok(Command::Dispatch(DrawerAction::close_drawer())),
        "toggle" => Ok(Command::Dispatch(DrawerAction::toggle_drawer())),
        "back" => Ok(Command::Dispatch(DrawerAction::go_back())),
        "jump" | "navigate" => {
            let (name, json) = split_word(rest);
            if name.is_empty() {
                return Err(CommandError::MissingArgument("route name"));
            }
            let params = parse_params(json)?;
            let action = if word == "jump" {
                DrawerAction::jump_to(name, params)
            } else {
                DrawerAction::navigate(name, params)
            };
            Ok(Command::Dispatch(action))
        }
        "params" => match parse_params(rest)? {
            Some(params) => Ok(Command::Dispatch(DrawerAction::set_params(params))),
            None => Err(CommandError::MissingArgument("params")),
        },
        "focus" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("route name"));
            }
            Ok(Command::Focus(rest.to_string()))
        }
        "state" => Ok(Command::Show),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// One line describing a state: key, routes with the focused one starred,
/// drawer flag, and history.
pub fn summarize<S: NavigationState>(state: &DrawerState<S>) -> String {
    let routes: Vec<String> = state
        .routes()
        .iter()
        .enumerate()
        .map(|(i, r)| {
            if i == state.index() {
                format!("*{}*", r.name)
            } else {
                r.name.clone()
            }
        })
        .collect();
    format!(
        "{} [{}] drawer={} history=[{}]",
        state.key(),
        routes.join(" "),
        if state.is_drawer_open { "open" } else { "closed" },
        state.route_key_history().join(", ")
    )
}

/// Holds the current state and serializes dispatches against it.
pub struct Session {
    router: DrawerRouter,
    state: Arc<DrawerState<TabState>>,
}

impl Session {
    pub fn new(router: DrawerRouter, config: &RouteConfig) -> Result<Self, RouterError> {
        let state = router.initial_state(config)?;
        Ok(Self { router, state })
    }

    pub fn state(&self) -> &Arc<DrawerState<TabState>> {
        &self.state
    }

    /// Applies `action`. Returns whether the state changed.
    pub fn dispatch(&mut self, action: &DrawerAction) -> bool {
        let next = self.router.state_for_action(&self.state, action);
        self.install(next, action.kind())
    }

    /// Focuses the route named `name`. Unknown names leave the state alone.
    pub fn focus(&mut self, name: &str) -> bool {
        let Some(key) = self
            .state
            .routes()
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.key.clone())
        else {
            trace!("No route named {} to focus", name);
            return false;
        };
        let next = self.router.state_for_route_focus(&self.state, &key);
        self.install(next, "FOCUS")
    }

    fn install(&mut self, next: Arc<DrawerState<TabState>>, kind: &str) -> bool {
        if Arc::ptr_eq(&self.state, &next) {
            trace!("{} left {} unchanged", kind, self.state.key());
            return false;
        }
        debug!("{} -> {}", kind, summarize(&next));
        self.state = next;
        true
    }
}
