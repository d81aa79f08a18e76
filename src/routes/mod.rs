//! The route tree: construction from schemas, token resolution and help.

pub mod help;
pub mod resolve;
pub mod tree;

pub use help::render_help;
pub use resolve::{action_alias, resolve, Arguments, Resolution, ResolvedCall};
pub use tree::{build, ActionSpec, HttpVerb, ParamLocation, ParameterDef, RouteNode};
