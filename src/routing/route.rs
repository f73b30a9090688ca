//! Route definitions and match results.

use std::sync::Arc;

use crate::routing::component::{Component, View};
use crate::routing::pattern::{Params, PatternError, RoutePattern};

/// Query string pairs in the order they appeared. Keys may repeat.
pub type QueryPairs = Vec<(String, String)>;

/// A path pattern bound to a named view.
#[derive(Debug)]
pub struct Route {
    pub name: String,
    pub pattern: RoutePattern,
    pub component: Component,
    /// Forward path parameters to the component as inputs.
    pub props: bool,
}

impl Route {
    /// Route with an eagerly available component.
    pub fn new(
        path: &str,
        name: impl Into<String>,
        component: Component,
    ) -> Result<Self, PatternError> {
        Ok(Self {
            name: name.into(),
            pattern: RoutePattern::parse(path)?,
            component,
            props: false,
        })
    }

    pub fn with_props(mut self, props: bool) -> Self {
        self.props = props;
        self
    }

    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Result of resolving a location against the route table.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    /// Location path relative to the base, without query or hash.
    pub path: String,
    pub params: Params,
    pub query: QueryPairs,
    pub hash: Option<String>,
}

impl RouteMatch<'_> {
    pub fn name(&self) -> &str {
        &self.route.name
    }

    /// Inputs handed to the component when it is mounted.
    /// First value of a query key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn props(&self) -> Params {
        if self.route.props {
            self.params.clone()
        } else {
            Params::new()
        }
    }

    /// Path plus query and hash, as it appears in a history entry.
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if !self.query.is_empty() {
            full.push('?');
            full.push_str(
                &url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(self.query.iter())
                    .finish(),
            );
        }
        if let Some(hash) = &self.hash {
            full.push('#');
            full.push_str(hash);
        }
        full
    }
}

/// A route whose component has been obtained and is ready to render.
#[derive(Debug, Clone)]
pub struct Mounted {
    pub route: String,
    pub full_path: String,
    pub view: Arc<View>,
    pub props: Params,
    pub query: QueryPairs,
}
