//! View components referenced by routes.
//!
//! A route points at a component either eagerly (bundled with the entry
//! point and available at startup) or lazily (its chunk is fetched the first
//! time the route is navigated to, then cached for the router's lifetime).

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::OnceCell;

/// Failure to fetch a lazy component's code.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("chunk '{chunk}' for component '{component}' not found")]
    NotFound { component: String, chunk: String },
    #[error("failed to read chunk '{chunk}': {source}")]
    Io {
        chunk: String,
        #[source]
        source: std::io::Error,
    },
}

/// A loaded view component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub name: String,
    /// Chunk the code came from; `None` for views bundled with the entry point.
    pub chunk: Option<String>,
    pub code: Vec<u8>,
}

impl View {
    /// A view that ships with the entry bundle.
    pub fn bundled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chunk: None,
            code: Vec::new(),
        }
    }
}

/// Fetches the code of lazily loaded components.
pub trait ViewLoader: Send + Sync + fmt::Debug {
    fn load<'a>(
        &'a self,
        component: &'a str,
        chunk: &'a str,
    ) -> BoxFuture<'a, Result<View, LoadError>>;
}

/// Loads chunks from a directory of built assets.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ViewLoader for AssetLoader {
    fn load<'a>(
        &'a self,
        component: &'a str,
        chunk: &'a str,
    ) -> BoxFuture<'a, Result<View, LoadError>> {
        Box::pin(async move {
            let path = self.root.join(chunk.trim_start_matches('/'));
            tracing::debug!(component, path = %path.display(), "Fetching component chunk");

            match tokio::fs::read(&path).await {
                Ok(code) => Ok(View {
                    name: component.to_string(),
                    chunk: Some(chunk.to_string()),
                    code,
                }),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LoadError::NotFound {
                    component: component.to_string(),
                    chunk: chunk.to_string(),
                }),
                Err(source) => Err(LoadError::Io {
                    chunk: chunk.to_string(),
                    source,
                }),
            }
        })
    }
}

/// A component whose code is fetched on first use.
pub struct LazyComponent {
    name: String,
    chunk: String,
    loader: Arc<dyn ViewLoader>,
    view: OnceCell<Arc<View>>,
}

impl LazyComponent {
    pub fn new(
        name: impl Into<String>,
        chunk: impl Into<String>,
        loader: Arc<dyn ViewLoader>,
    ) -> Self {
        Self {
            name: name.into(),
            chunk: chunk.into(),
            loader,
            view: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chunk(&self) -> &str {
        &self.chunk
    }

    /// Whether the chunk has been fetched successfully.
    pub fn is_loaded(&self) -> bool {
        self.view.initialized()
    }

    /// Return the view, fetching it if this is the first use.
    ///
    /// A failed fetch is not cached; the next call tries again.
    pub async fn get(&self) -> Result<Arc<View>, LoadError> {
        let view = self
            .view
            .get_or_try_init(|| async {
                let view = self.loader.load(&self.name, &self.chunk).await?;
                tracing::info!(
                    component = %self.name,
                    chunk = %self.chunk,
                    "Lazy component loaded"
                );
                Ok::<_, LoadError>(Arc::new(view))
            })
            .await?;
        Ok(view.clone())
    }
}

impl fmt::Debug for LazyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyComponent")
            .field("name", &self.name)
            .field("chunk", &self.chunk)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// How a route refers to its view.
#[derive(Debug)]
pub enum Component {
    Eager(Arc<View>),
    Lazy(LazyComponent),
}

impl Component {
    pub fn eager(name: impl Into<String>) -> Self {
        Component::Eager(Arc::new(View::bundled(name)))
    }

    pub fn name(&self) -> &str {
        match self {
            Component::Eager(view) => &view.name,
            Component::Lazy(lazy) => lazy.name(),
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Component::Lazy(_))
    }

    /// Resolve to a view. This is the only suspension point of a navigation.
    pub async fn view(&self) -> Result<Arc<View>, LoadError> {
        match self {
            Component::Eager(view) => Ok(view.clone()),
            Component::Lazy(lazy) => lazy.get().await,
        }
    }
}
