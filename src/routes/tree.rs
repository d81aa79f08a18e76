//! Route tree types and their construction from resource schemas.

use crate::constants;
use crate::error::Error;
use crate::schema::models::{ModelDef, Parameter, SchemaModel};
use crate::schema::types::TypeRef;
use crate::utils::camel_to_hyphen;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The HTTP verbs an action can be registered under.
///
/// Ordering follows the declaration order and drives the order actions are
/// listed in help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpVerb {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => constants::HTTP_METHOD_GET,
            Self::Post => constants::HTTP_METHOD_POST,
            Self::Put => constants::HTTP_METHOD_PUT,
            Self::Delete => constants::HTTP_METHOD_DELETE,
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpVerb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            constants::HTTP_METHOD_GET => Ok(Self::Get),
            constants::HTTP_METHOD_POST => Ok(Self::Post),
            constants::HTTP_METHOD_PUT => Ok(Self::Put),
            constants::HTTP_METHOD_DELETE => Ok(Self::Delete),
            other => Err(format!("unsupported HTTP method {other}")),
        }
    }
}

/// Where the API expects a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamLocation {
    /// Filled from route tokens, never exposed as a flag.
    Path,
    Query,
    Body,
}

impl ParamLocation {
    fn from_param_type(param_type: &str) -> Self {
        match param_type {
            constants::PARAM_LOCATION_PATH => Self::Path,
            constants::PARAM_LOCATION_BODY => Self::Body,
            _ => Self::Query,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDef {
    pub name: String,
    pub location: ParamLocation,
    pub type_ref: TypeRef,
    pub required: bool,
    pub nullable: bool,
    pub description: String,
}

impl ParameterDef {
    /// Resolves a schema parameter against the models of its schema.
    #[must_use]
    pub fn from_schema(param: &Parameter, models: &BTreeMap<String, ModelDef>) -> Self {
        Self {
            name: param.name.clone(),
            location: ParamLocation::from_param_type(&param.param_type),
            type_ref: TypeRef::resolve(&param.data_type, models),
            required: param.required,
            nullable: param.nullable,
            description: param.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub verb: HttpVerb,
    pub parameters: Vec<ParameterDef>,
    pub help: String,
}

/// One segment of the command grammar.
///
/// A node is reached either by a literal token (`name` is set) or by
/// consuming any token as a path placeholder (`name` is `None`). Both kinds
/// of children may coexist under one parent: literals are tried first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    name: Option<String>,
    path: String,
    help: String,
    routes: BTreeMap<String, RouteNode>,
    placeholder: Option<Box<RouteNode>>,
    actions: BTreeMap<HttpVerb, ActionSpec>,
}

impl RouteNode {
    /// The unnamed root of a grammar.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            name: None,
            path: String::new(),
            help: String::new(),
            routes: BTreeMap::new(),
            placeholder: None,
            actions: BTreeMap::new(),
        }
    }

    fn literal(name: String, path: &str) -> Self {
        Self {
            name: Some(name),
            path: path.to_string(),
            ..Self::root()
        }
    }

    fn placeholder_for(segment: &str) -> Self {
        Self {
            path: segment.to_string(),
            ..Self::root()
        }
    }

    /// Token that selects this node, `None` for placeholders and the root.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Raw schema path fragment, e.g. `privateDatabase` or `{serviceName}`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.name.is_none()
    }

    /// Literal children keyed by their command-line token.
    #[must_use]
    pub const fn routes(&self) -> &BTreeMap<String, Self> {
        &self.routes
    }

    #[must_use]
    pub fn route(&self, token: &str) -> Option<&Self> {
        self.routes.get(token)
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&Self> {
        self.placeholder.as_deref()
    }

    #[must_use]
    pub const fn actions(&self) -> &BTreeMap<HttpVerb, ActionSpec> {
        &self.actions
    }

    #[must_use]
    pub fn action(&self, verb: HttpVerb) -> Option<&ActionSpec> {
        self.actions.get(&verb)
    }

    /// The verb used when no action is named: the only action if there is
    /// exactly one, otherwise `GET` when present, otherwise none.
    #[must_use]
    pub fn default_verb(&self) -> Option<HttpVerb> {
        if self.actions.len() == 1 {
            return self.actions.keys().next().copied();
        }
        self.actions
            .contains_key(&HttpVerb::Get)
            .then_some(HttpVerb::Get)
    }

    /// Returns the child for `segment`, creating it when absent.
    ///
    /// Segments opening with `{` map to the placeholder child; any other
    /// segment maps to the literal child keyed by its hyphenated name.
    fn ensure_segment(&mut self, segment: &str) -> &mut Self {
        if segment.starts_with('{') {
            return self
                .placeholder
                .get_or_insert_with(|| Box::new(Self::placeholder_for(segment)))
                .as_mut();
        }
        self.ensure_literal(camel_to_hyphen(segment), segment)
    }

    fn ensure_literal(&mut self, name: String, path: &str) -> &mut Self {
        self.routes
            .entry(name.clone())
            .or_insert_with(|| Self::literal(name, path))
    }

    /// Walks `relative` (`/{serviceName}/user`), creating intermediate nodes.
    fn ensure_path(&mut self, relative: &str) -> &mut Self {
        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self, Self::ensure_segment)
    }

    fn register_action(&mut self, api_path: &str, action: ActionSpec) -> Result<(), Error> {
        if self.actions.contains_key(&action.verb) {
            return Err(Error::ConstructionConflict {
                path: api_path.to_string(),
                reason: format!("duplicated action {}", action.verb),
            });
        }
        self.actions.insert(action.verb, action);
        Ok(())
    }
}

/// Builds the grammar for a complete set of resource schemas.
///
/// Each schema becomes a root-level command named after the last segment of
/// its resource path (`/hosting/privateDatabase` -> `private-database`).
/// Schemas whose last segments normalise to the same name share one subtree.
///
/// # Errors
/// Returns [`Error::ConstructionConflict`] when two operations register the
/// same verb on one route, when an API path lies outside its schema's
/// resource path, or when an operation uses an unsupported HTTP method.
pub fn build(schemas: &[SchemaModel]) -> Result<RouteNode, Error> {
    let mut root = RouteNode::root();

    for schema in schemas {
        let resource = schema.resource_path.trim_start_matches('/');
        let Some(last) = resource.rsplit('/').next().filter(|s| !s.is_empty()) else {
            return Err(Error::ConstructionConflict {
                path: schema.resource_path.clone(),
                reason: "empty resource path".to_string(),
            });
        };

        let command = root.ensure_literal(camel_to_hyphen(last), resource);

        for api in &schema.apis {
            let relative = api
                .path
                .strip_prefix(&schema.resource_path)
                .filter(|rest| rest.is_empty() || rest.starts_with('/'))
                .ok_or_else(|| Error::ConstructionConflict {
                    path: api.path.clone(),
                    reason: format!("not under resource path {}", schema.resource_path),
                })?;

            let leaf = command.ensure_path(relative);
            leaf.help.clone_from(&api.description);

            for operation in &api.operations {
                let verb = operation.http_method.parse::<HttpVerb>().map_err(|reason| {
                    Error::ConstructionConflict {
                        path: api.path.clone(),
                        reason,
                    }
                })?;
                let parameters = operation
                    .parameters
                    .iter()
                    .map(|param| ParameterDef::from_schema(param, &schema.models))
                    .collect();
                leaf.register_action(
                    &api.path,
                    ActionSpec {
                        verb,
                        parameters,
                        help: operation.description.clone(),
                    },
                )?;
            }
        }
    }

    Ok(root)
}
