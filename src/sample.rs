//! Example body providers.
//!
//! Generating sample payloads from types is the host's business; the
//! assembler only asks a [`SampleProvider`] for text.

use crate::error::{self, Error, Result};
use crate::model::RouteDescription;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDirection {
    Request,
    Response,
}

pub trait SampleProvider {
    /// Sample body text for an operation, or `None` when there is none.
    fn sample(&self, route: &RouteDescription, direction: SampleDirection) -> Option<String>;
}

/// Provides no samples; every request is generated without a body.
pub struct NoSamples;

impl SampleProvider for NoSamples {
    fn sample(&self, _route: &RouteDescription, _direction: SampleDirection) -> Option<String> {
        None
    }
}

impl<F> SampleProvider for F
where
    F: Fn(&RouteDescription, SampleDirection) -> Option<String>,
{
    fn sample(&self, route: &RouteDescription, direction: SampleDirection) -> Option<String> {
        self(route, direction)
    }
}

/// Request samples keyed by `"<METHOD> <path>"`, e.g. `"POST api/Test"`.
///
/// String values are used verbatim; any other JSON value is pretty-printed.
#[derive(Debug, Default)]
pub struct SampleMap {
    samples: HashMap<String, String>,
}

impl SampleMap {
    pub fn load(path: &Path) -> Result<Self> {
        let text = error::read_source("sample file", path)?;
        Self::parse(&text).map_err(|source| Error::MalformedCatalog {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> serde_json::Result<Self> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(text)?;
        let mut samples = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let body = match value {
                serde_json::Value::String(s) => s,
                other => serde_json::to_string_pretty(&other)?,
            };
            samples.insert(normalize_key(&key), body);
        }
        Ok(Self { samples })
    }

    pub fn insert(&mut self, method: &str, path: &str, body: impl Into<String>) {
        self.samples
            .insert(sample_key(method, path), body.into());
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl SampleProvider for SampleMap {
    fn sample(&self, route: &RouteDescription, direction: SampleDirection) -> Option<String> {
        if direction != SampleDirection::Request {
            return None;
        }
        self.samples
            .get(&sample_key(&route.method, &route.path))
            .cloned()
    }
}

fn sample_key(method: &str, path: &str) -> String {
    format!("{} {}", method.to_ascii_uppercase(), path)
}

/// Accept `"post   api/Test"` as well as `"POST api/Test"`.
fn normalize_key(key: &str) -> String {
    match key.trim().split_once(char::is_whitespace) {
        Some((method, path)) => sample_key(method, path.trim()),
        None => key.trim().to_string(),
    }
}
