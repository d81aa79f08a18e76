//! Help text for a route node.

use crate::routes::tree::{HttpVerb, RouteNode};
use std::fmt::Write;

/// User-facing title of `verb` at `node`.
fn action_title(node: &RouteNode, verb: HttpVerb) -> &'static str {
    match verb {
        HttpVerb::Get if node.placeholder().is_some() => "list",
        HttpVerb::Get => "show",
        HttpVerb::Post => "create",
        HttpVerb::Put => "update",
        HttpVerb::Delete => "delete",
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim()
}

fn push_table(out: &mut String, heading: &str, rows: &[(String, String)]) {
    if rows.is_empty() {
        return;
    }
    let width = rows.iter().map(|(left, _)| left.chars().count()).max().unwrap_or(0);

    out.push_str(heading);
    out.push('\n');
    for (left, right) in rows {
        let _ = writeln!(out, "    {left:<width$} {right}");
    }
    out.push('\n');
}

/// Renders the help of `node`: identity line, actions and child routes.
///
/// ```text
/// Param '{serviceName}': Private database
///
/// Actions:
///     show (default) Get this object properties
///     update         Alter this object properties
///
/// Methods:
///     user           Users of the database
/// ```
#[must_use]
pub fn render_help(node: &RouteNode) -> String {
    let mut out = match (node.name(), node.is_placeholder() && !node.path().is_empty()) {
        (Some(name), _) => format!("Method '{name}'"),
        (None, true) => format!("Param '{}'", node.path()),
        (None, false) => String::new(),
    };

    let help = node.help().trim();
    if help.is_empty() {
        out.push(':');
    } else if out.is_empty() {
        out.push_str(help);
    } else {
        let _ = write!(out, ": {help}");
    }
    out.push_str("\n\n");

    let label = node.name().unwrap_or_else(|| node.path());
    let default = node.default_verb();
    let actions: Vec<(String, String)> = node
        .actions()
        .values()
        .map(|action| {
            let title = action_title(node, action.verb);
            let description = match first_line(&action.help) {
                "" => format!("{} {label} object(s)", capitalize(title)),
                line => line.to_string(),
            };
            let title = if default == Some(action.verb) {
                format!("{title} (default)")
            } else {
                title.to_string()
            };
            (title, description)
        })
        .collect();
    push_table(&mut out, "Actions:", &actions);

    let methods: Vec<(String, String)> = node
        .routes()
        .iter()
        .map(|(name, child)| (name.clone(), first_line(child.help()).to_string()))
        .chain(
            node.placeholder()
                .map(|child| (child.path().to_string(), first_line(child.help()).to_string())),
        )
        .collect();
    push_table(&mut out, "Methods:", &methods);

    out
}
