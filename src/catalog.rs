//! Loading a serialized route catalog.
//!
//! A catalog is the JSON dump of the discovered API surface:
//!
//! ```json
//! {
//!   "source": { "name": "Sample.Api", "version": "1.0.0.0" },
//!   "routes": [
//!     {
//!       "method": "GET",
//!       "path": "api/Test/{id}",
//!       "controller": { "name": "Test", "type": "Sample.Api.TestController" },
//!       "action": "GetOne",
//!       "response_type": "Sample.Api.TestContent",
//!       "parameters": [ { "name": "id", "type": "System.Int32" } ],
//!       "locator": {
//!         "declaring_type": "Sample.Api.TestController",
//!         "member": "GetOne",
//!         "parameter_types": ["System.Int32"]
//!       }
//!     }
//!   ]
//! }
//! ```

use crate::error::{self, Error, Result};
use crate::model::RouteCatalog;
use std::path::{Path, PathBuf};

impl RouteCatalog {
    pub fn load(path: &Path) -> Result<Self> {
        let text = error::read_source("route catalog", path)?;
        Self::parse(&text).map_err(|source| Error::MalformedCatalog {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Number of distinct controllers, counted by name.
    pub fn controller_count(&self) -> usize {
        let mut seen: Vec<&str> = Vec::new();
        for route in &self.routes {
            if !seen.contains(&route.controller.name.as_str()) {
                seen.push(&route.controller.name);
            }
        }
        seen.len()
    }
}

/// Documentation file expected next to a catalog: same stem, `.xml` extension.
pub fn default_documentation_path(catalog: &Path) -> PathBuf {
    catalog.with_extension("xml")
}
