//! Route lookup and reverse routing.
//!
//! # Responsibilities
//! - Store the ordered route table
//! - Resolve a location to the first matching route or an explicit NotFound
//! - Build locations from a route name and parameters
//! - Obtain a route's component when it is mounted
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - O(1) name lookup via HashMap, O(n) pattern scan in table order
//! - Duplicate names are rejected; shadowed patterns are only logged

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::SpaConfig;
use crate::routing::component::{Component, LazyComponent, LoadError, ViewLoader};
use crate::routing::history::HistoryMode;
use crate::routing::pattern::{Params, PatternError, RoutePattern};
use crate::routing::route::{Mounted, QueryPairs, Route, RouteMatch};

/// Errors raised by the router.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("no route matches '{path}'")]
    NotFound { path: String },
    #[error("no route named '{name}'")]
    UnknownRoute { name: String },
    #[error("route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },
    #[error("route name '{0}' is defined more than once")]
    DuplicateName(String),
    #[error("invalid path pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// The client route table.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
    history: HistoryMode,
}

impl Router {
    /// Build a router from an ordered list of routes.
    pub fn configure(routes: Vec<Route>, history: HistoryMode) -> Result<Self, RouterError> {
        let mut by_name = HashMap::with_capacity(routes.len());

        for (idx, route) in routes.iter().enumerate() {
            if by_name.insert(route.name.clone(), idx).is_some() {
                return Err(RouterError::DuplicateName(route.name.clone()));
            }

            if let Some(earlier) = routes[..idx]
                .iter()
                .find(|r| r.pattern.is_equivalent(&route.pattern))
            {
                tracing::warn!(
                    route = %route.name,
                    path = %route.pattern,
                    shadowed_by = %earlier.name,
                    "Route can never match, an earlier route has the same pattern"
                );
            }
        }

        tracing::debug!(
            routes = routes.len(),
            base = %history.base(),
            "Route table configured"
        );

        Ok(Self {
            routes,
            by_name,
            history,
        })
    }

    /// Build a router from the `[app]` config section.
    ///
    /// Lazy routes fetch their chunks through `loader`.
    pub fn from_config(
        config: &SpaConfig,
        loader: Arc<dyn ViewLoader>,
    ) -> Result<Self, RouterError> {
        let mut routes = Vec::with_capacity(config.routes.len());

        for rc in &config.routes {
            let pattern = RoutePattern::parse(&rc.path)
                .map_err(|source| RouterError::InvalidPattern {
                    pattern: rc.path.clone(),
                    source,
                })?
                .case_sensitive(rc.case_sensitive);

            let component = if rc.lazy {
                let chunk = rc
                    .chunk
                    .clone()
                    .unwrap_or_else(|| format!("assets/{}.js", rc.component));
                Component::Lazy(LazyComponent::new(&rc.component, chunk, loader.clone()))
            } else {
                Component::eager(&rc.component)
            };

            routes.push(Route {
                name: rc.name.clone(),
                pattern,
                component,
                props: rc.props,
            });
        }

        Self::configure(routes, HistoryMode::new(config.history, &config.base_url))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&idx| &self.routes[idx])
    }

    pub fn history_mode(&self) -> &HistoryMode {
        &self.history
    }

    /// Resolve a location (path relative to the base, optional query and hash).
    pub fn resolve(&self, location: &str) -> Result<RouteMatch<'_>, RouterError> {
        let (rest, hash) = match location.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (location, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (rest, QueryPairs::new()),
        };
        let path = if path.is_empty() { "/" } else { path };

        for route in &self.routes {
            if let Some(params) = route.pattern.matches(path) {
                tracing::trace!(route = %route.name, path, "Route matched");
                return Ok(RouteMatch {
                    route,
                    path: path.to_string(),
                    params,
                    query,
                    hash,
                });
            }
        }

        Err(RouterError::NotFound {
            path: path.to_string(),
        })
    }

    /// Resolve a full browser URL, stripping the history base first.
    pub fn resolve_url(&self, url: &str) -> Result<RouteMatch<'_>, RouterError> {
        let location = self
            .history
            .strip_base(url)
            .ok_or_else(|| RouterError::NotFound {
                path: url.to_string(),
            })?;
        self.resolve(&location)
    }

    /// Build the location of a named route.
    pub fn location_for(&self, name: &str, params: &Params) -> Result<String, RouterError> {
        let route = self.route(name).ok_or_else(|| RouterError::UnknownRoute {
            name: name.to_string(),
        })?;

        let known: Vec<&str> = route.pattern.param_names().collect();
        for extra in params.keys().filter(|k| !known.contains(&k.as_str())) {
            tracing::debug!(route = %name, param = %extra, "Discarding unknown parameter");
        }

        route
            .pattern
            .build(params)
            .map_err(|param| RouterError::MissingParam {
                route: name.to_string(),
                param,
            })
    }

    /// Browser URL for a location under this router's history mode.
    pub fn href(&self, location: &str) -> String {
        self.history.href(location)
    }

    /// Obtain the matched route's component, awaiting a lazy fetch if needed.
    pub async fn mount(&self, matched: &RouteMatch<'_>) -> Result<Mounted, RouterError> {
        let view = matched.route.component.view().await?;
        Ok(Mounted {
            route: matched.route.name.clone(),
            full_path: matched.full_path(),
            view,
            props: matched.props(),
            query: matched.query.clone(),
        })
    }
}

fn parse_query(query: &str) -> QueryPairs {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
