//! Client route hosting.
//!
//! Any GET that no API route claims is resolved against the client route
//! table. A match serves the app shell tagged with the route name, anything
//! else is a 404.

use std::path::PathBuf;

use axum::{
    extract::State,
    http::{HeaderValue, Method, Uri},
    response::{Html, IntoResponse, Response},
};

use crate::config::SpaConfig;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Response header naming the client route a URL resolved to.
pub const X_ROUTE_NAME: &str = "x-route-name";

/// The HTML document every client route boots from.
#[derive(Debug, Clone)]
pub struct SpaShell {
    index_path: PathBuf,
}

impl SpaShell {
    pub fn from_config(config: &SpaConfig) -> Self {
        Self {
            index_path: PathBuf::from(&config.assets_dir).join(&config.index_file),
        }
    }

    /// The built index file, or a minimal shell when none is deployed.
    pub async fn render(&self, base: &str) -> String {
        match tokio::fs::read_to_string(&self.index_path).await {
            Ok(html) => html,
            Err(e) => {
                tracing::debug!(
                    path = %self.index_path.display(),
                    error = %e,
                    "Serving built-in shell"
                );
                builtin_shell(base)
            }
        }
    }
}

fn builtin_shell(base: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <base href=\"{base}/\">\n<title>Flight Planner</title>\n</head>\n\
         <body>\n<div id=\"app\"></div>\n</body>\n</html>\n"
    )
}

pub async fn spa_fallback(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        let message = format!("No handler for {method} {}", uri.path());
        return ApiError::NotFound(message).into_response();
    }

    let router = state.spa.load_full();
    let url = uri.path_and_query().map_or(uri.path(), |pq| pq.as_str());

    let route_name = match router.resolve_url(url) {
        Ok(matched) => {
            tracing::debug!(
                route = matched.name(),
                params = ?matched.params,
                "Client route resolved"
            );
            matched.name().to_string()
        }
        Err(e) => {
            metrics::record_spa_resolution("not_found");
            tracing::debug!(url, error = %e, "No client route");
            return ApiError::from(e).into_response();
        }
    };
    metrics::record_spa_resolution("matched");

    let html = state.shell.render(router.history_mode().base()).await;
    let mut response = Html(html).into_response();
    if let Ok(value) = HeaderValue::from_str(&route_name) {
        response.headers_mut().insert(X_ROUTE_NAME, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_shell_when_index_missing() {
        let config = SpaConfig {
            assets_dir: "/nonexistent-planner-assets".to_string(),
            ..SpaConfig::default()
        };
        let html = SpaShell::from_config(&config).render("/planner").await;
        assert!(html.contains("<div id=\"app\"></div>"));
        assert!(html.contains("<base href=\"/planner/\">"));
    }
}
