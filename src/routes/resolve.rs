//! Resolution of command-line tokens against a built route tree.

use crate::constants;
use crate::error::Error;
use crate::params::{self, Coerced};
use crate::routes::help::render_help;
use crate::routes::tree::{HttpVerb, RouteNode};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Typed flag values, in command-line order. Absent optional flags are not
/// present at all.
pub type Arguments = IndexMap<String, Value>;

/// A fully resolved request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCall {
    pub verb: HttpVerb,
    pub url_path: String,
    pub arguments: Arguments,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Call(ResolvedCall),
    /// Help was requested; nothing is to be dispatched.
    Help(String),
}

/// Maps an action alias (`list`, `update`, `do_delete`, ...) to its verb.
///
/// Matching is case-insensitive. The `do_` prefixed forms name the same
/// verbs and take precedence over same-named routes during resolution.
#[must_use]
pub fn action_alias(token: &str) -> Option<HttpVerb> {
    let lowered = token.to_ascii_lowercase();
    let bare = lowered
        .strip_prefix(constants::FORCED_ACTION_PREFIX)
        .unwrap_or(&lowered);
    match bare {
        "get" | "show" | "list" => Some(HttpVerb::Get),
        "post" | "create" => Some(HttpVerb::Post),
        "put" | "update" | "set" => Some(HttpVerb::Put),
        "delete" => Some(HttpVerb::Delete),
        _ => None,
    }
}

fn is_forced_action(token: &str) -> bool {
    token
        .get(..constants::FORCED_ACTION_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(constants::FORCED_ACTION_PREFIX))
}

/// Resolves `tokens` from the root of the grammar.
///
/// Route tokens are consumed until an action is named or the first flag is
/// reached; every remaining token belongs to the selected action's flags.
///
/// # Errors
/// [`Error::UnknownRoute`] when the tokens do not lead to an action,
/// [`Error::Validation`] when the flags do not fit the action.
pub fn resolve(root: &RouteNode, tokens: &[String]) -> Result<Resolution, Error> {
    resolve_from(root, String::new(), tokens)
}

fn resolve_from(node: &RouteNode, base_url: String, tokens: &[String]) -> Result<Resolution, Error> {
    match tokens.split_first() {
        Some((first, _)) if first == constants::HELP_FLAG => Ok(Resolution::Help(render_help(node))),
        Some((token, rest)) if !token.starts_with('-') => {
            let forced = action_alias(token)
                .filter(|verb| is_forced_action(token) && node.action(*verb).is_some());
            if let Some(verb) = forced {
                return call(node, verb, base_url, rest);
            }

            if let Some(child) = node.route(token) {
                let url = format!("{base_url}/{}", child.path());
                return resolve_from(child, url, rest);
            }

            if let Some(verb) = action_alias(token).filter(|verb| node.action(*verb).is_some()) {
                return call(node, verb, base_url, rest);
            }

            if let Some(child) = node.placeholder() {
                let url = format!("{base_url}/{}", urlencoding::encode(token));
                return resolve_from(child, url, rest);
            }

            Err(Error::unknown_route(&base_url, token))
        }
        _ => {
            if node.actions().is_empty() {
                return Err(Error::no_actions(&base_url));
            }
            let verb = node
                .default_verb()
                .ok_or_else(|| Error::ambiguous_default(&base_url))?;
            call(node, verb, base_url, tokens)
        }
    }
}

fn call(
    node: &RouteNode,
    verb: HttpVerb,
    url_path: String,
    flags: &[String],
) -> Result<Resolution, Error> {
    let Some(action) = node.action(verb) else {
        return Err(Error::no_actions(&url_path));
    };

    Ok(match params::coerce(action, &url_path, flags)? {
        Coerced::Arguments(arguments) => Resolution::Call(ResolvedCall {
            verb,
            url_path,
            arguments,
        }),
        Coerced::Help(text) => Resolution::Help(text),
    })
}
