//! Navigation session over a shared route table.
//!
//! A navigation resolves the target, awaits the component and only then
//! commits the history entry. A failed navigation leaves history untouched.

use std::sync::Arc;

use crate::routing::history::History;
use crate::routing::pattern::Params;
use crate::routing::route::Mounted;
use crate::routing::router::{Router, RouterError};

/// Tracks the current location of one client.
#[derive(Debug)]
pub struct Navigator {
    router: Arc<Router>,
    history: History,
    current: Option<Mounted>,
}

impl Navigator {
    pub fn new(router: Arc<Router>) -> Self {
        Self {
            router,
            history: History::new(),
            current: None,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The currently mounted route, if any navigation succeeded yet.
    pub fn current(&self) -> Option<&Mounted> {
        self.current.as_ref()
    }

    /// Navigate to a location and add a history entry.
    pub async fn push(&mut self, location: &str) -> Result<Mounted, RouterError> {
        let mounted = self.load(location).await?;
        self.history.push(mounted.full_path.clone());
        Ok(self.commit(mounted))
    }

    /// Navigate to a location, replacing the current history entry.
    pub async fn replace(&mut self, location: &str) -> Result<Mounted, RouterError> {
        let mounted = self.load(location).await?;
        self.history.replace(mounted.full_path.clone());
        Ok(self.commit(mounted))
    }

    /// Navigate to a named route.
    pub async fn navigate(&mut self, name: &str, params: &Params) -> Result<Mounted, RouterError> {
        let location = self.router.location_for(name, params)?;
        self.push(&location).await
    }

    /// Go back one entry. Returns `None` at the start of history.
    pub async fn back(&mut self) -> Result<Option<Mounted>, RouterError> {
        self.go(-1).await
    }

    /// Go forward one entry. Returns `None` at the end of history.
    pub async fn forward(&mut self) -> Result<Option<Mounted>, RouterError> {
        self.go(1).await
    }

    async fn go(&mut self, delta: isize) -> Result<Option<Mounted>, RouterError> {
        let Some(location) = self.history.peek(delta).map(str::to_string) else {
            return Ok(None);
        };
        let mounted = self.load(&location).await?;
        self.history.go(delta);
        Ok(Some(self.commit(mounted)))
    }

    async fn load(&self, location: &str) -> Result<Mounted, RouterError> {
        let matched = self.router.resolve(location)?;
        self.router.mount(&matched).await
    }

    fn commit(&mut self, mounted: Mounted) -> Mounted {
        tracing::debug!(
            route = %mounted.route,
            path = %mounted.full_path,
            "Navigation committed"
        );
        self.current = Some(mounted.clone());
        mounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpaConfig;
    use crate::routing::component::{LoadError, View, ViewLoader};
    use futures_util::future::BoxFuture;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Loader that can be switched into a failing state.
    #[derive(Debug, Default)]
    struct SwitchLoader {
        failing: AtomicBool,
        calls: AtomicUsize,
    }

    impl ViewLoader for SwitchLoader {
        fn load<'a>(
            &'a self,
            component: &'a str,
            chunk: &'a str,
        ) -> BoxFuture<'a, Result<View, LoadError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let failing = self.failing.load(Ordering::SeqCst);
            Box::pin(async move {
                if failing {
                    return Err(LoadError::NotFound {
                        component: component.to_string(),
                        chunk: chunk.to_string(),
                    });
                }
                Ok(View {
                    name: component.to_string(),
                    chunk: Some(chunk.to_string()),
                    code: Vec::new(),
                })
            })
        }
    }

    fn navigator(loader: Arc<SwitchLoader>) -> Navigator {
        let router = Router::from_config(&SpaConfig::default(), loader).unwrap();
        Navigator::new(Arc::new(router))
    }

    fn flight(id: &str) -> Params {
        Params::from([("flightId".to_string(), id.to_string())])
    }

    #[tokio::test]
    async fn test_navigate_by_name() {
        let loader = Arc::new(SwitchLoader::default());
        let mut nav = navigator(loader.clone());

        let home = nav.push("/").await.unwrap();
        assert_eq!(home.route, "FlightSearch");
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);

        let seats = nav.navigate("FlightSeats", &flight("42")).await.unwrap();
        assert_eq!(seats.route, "FlightSeats");
        assert_eq!(seats.full_path, "/flights/seats/42");
        assert_eq!(seats.props.get("flightId").map(String::as_str), Some("42"));
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
        assert_eq!(nav.current().map(|m| m.route.as_str()), Some("FlightSeats"));
    }

    #[tokio::test]
    async fn test_back_and_forward() {
        let mut nav = navigator(Arc::default());
        nav.push("/").await.unwrap();
        nav.navigate("FlightSeats", &flight("1")).await.unwrap();
        nav.navigate("FlightSeats", &flight("2")).await.unwrap();

        let back = nav.back().await.unwrap().unwrap();
        assert_eq!(back.full_path, "/flights/seats/1");
        let back = nav.back().await.unwrap().unwrap();
        assert_eq!(back.route, "FlightSearch");
        assert!(nav.back().await.unwrap().is_none());

        let fwd = nav.forward().await.unwrap().unwrap();
        assert_eq!(fwd.full_path, "/flights/seats/1");
        assert_eq!(nav.history().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_navigation_keeps_history() {
        let loader = Arc::new(SwitchLoader::default());
        let mut nav = navigator(loader.clone());
        nav.push("/").await.unwrap();

        loader.failing.store(true, Ordering::SeqCst);
        let err = nav.navigate("FlightSeats", &flight("42")).await.unwrap_err();
        assert!(matches!(err, RouterError::Load(_)));
        assert_eq!(nav.history().len(), 1);
        assert_eq!(nav.current().map(|m| m.route.as_str()), Some("FlightSearch"));

        loader.failing.store(false, Ordering::SeqCst);
        nav.navigate("FlightSeats", &flight("42")).await.unwrap();
        assert_eq!(nav.history().len(), 2);
        assert_eq!(loader.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unknown_location() {
        let mut nav = navigator(Arc::default());
        assert!(matches!(
            nav.push("/does-not-exist").await,
            Err(RouterError::NotFound { .. })
        ));
        assert!(nav.history().is_empty());
        assert!(nav.current().is_none());
    }

    #[tokio::test]
    async fn test_replace() {
        let mut nav = navigator(Arc::default());
        nav.push("/").await.unwrap();
        nav.replace("/flights/seats/5?passengers=2").await.unwrap();
        assert_eq!(nav.history().len(), 1);
        assert_eq!(nav.history().current(), Some("/flights/seats/5?passengers=2"));
    }
}
