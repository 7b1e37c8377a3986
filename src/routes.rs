//! Route registration that remembers what it registered, so `/` can list it.

use axum::{http::Method, routing::MethodRouter, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub methods: Vec<String>,
    pub middlewares: Vec<String>,
}

pub type Endpoints = Arc<Vec<Endpoint>>;

/// A `Router` plus the list of `(path, methods)` that went into it.
pub struct RouteTable<S> {
    router: Router<S>,
    endpoints: Vec<Endpoint>,
}

impl<S> Default for RouteTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self {
            router: Router::new(),
            endpoints: Vec::new(),
        }
    }
}

impl<S> RouteTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, path: &str, method: Method, route: MethodRouter<S>) -> Self {
        self.route_with(path, method, &[], route)
    }

    /// Same as `route`, also recording the names of middleware guarding it.
    pub fn route_with(
        mut self,
        path: &str,
        method: Method,
        middlewares: &[&str],
        route: MethodRouter<S>,
    ) -> Self {
        self.record(Endpoint {
            path: path.to_string(),
            methods: vec![method.as_str().to_string()],
            middlewares: middlewares.iter().map(|m| m.to_string()).collect(),
        });
        self.router = self.router.route(path, route);
        self
    }

    pub fn merge(mut self, other: RouteTable<S>) -> Self {
        for endpoint in other.endpoints {
            self.record(endpoint);
        }
        self.router = self.router.merge(other.router);
        self
    }

    #[cfg(test)]
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn into_parts(self) -> (Router<S>, Endpoints) {
        (self.router, Arc::new(self.endpoints))
    }

    fn record(&mut self, endpoint: Endpoint) {
        match self.endpoints.iter_mut().find(|e| e.path == endpoint.path) {
            Some(existing) => {
                for m in endpoint.methods {
                    if !existing.methods.contains(&m) {
                        existing.methods.push(m);
                    }
                }
                for m in endpoint.middlewares {
                    if !existing.middlewares.contains(&m) {
                        existing.middlewares.push(m);
                    }
                }
            }
            None => self.endpoints.push(endpoint),
        }
    }
}

pub async fn list_endpoints(Extension(endpoints): Extension<Endpoints>) -> Json<Vec<Endpoint>> {
    Json(endpoints.as_ref().clone())
}
