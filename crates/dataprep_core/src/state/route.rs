//! Route state record: where "back" navigation returns to.

use std::collections::BTreeMap;

pub const ROUTE_DATASETS: &str = "nav.index.datasets";
pub const ROUTE_PREPARATIONS: &str = "nav.index.preparations";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: String,
    pub params: BTreeMap<String, String>,
}

impl Route {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteState {
    previous: Option<Route>,
}

impl RouteState {
    pub fn previous(&self) -> Option<&Route> {
        self.previous.as_ref()
    }

    pub fn set_previous(&mut self, route: Route) {
        self.previous = Some(route);
    }
}
