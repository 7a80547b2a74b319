//! Route path templates → Postman URLs.
//!
//! `items/{id}/tags?active={flag}` becomes the request name
//! `items/:id/tags?active=` and the URL `{{host}}/items/:id/tags?active=`.

use crate::docs::signature;
use crate::model::RouteDescription;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_PATH_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9\-_]+)\}").unwrap());

static RE_QUERY_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=\{([A-Za-z0-9\-_]+)\}").unwrap());

/// Any route template placeholder, including `{id?}` and `{id:int}` forms.
static RE_TEMPLATE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(/?)\{\*?([A-Za-z0-9\-_]+)[^}]*\}").unwrap());

/// A normalized request location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPath {
    /// Path with Postman variables, used as the request name
    pub name: String,
    /// `name` prefixed with the environment placeholder
    pub url: String,
}

/// Rewrite a raw relative path into Postman syntax.
///
/// Path placeholders become `:name` variables; query placeholders are
/// emptied (`key={value}` → `key=`). Nothing is reordered or encoded.
pub fn normalize(raw: &str, environment_key: &str) -> NormalizedPath {
    let name = match raw.split_once('?') {
        Some((path, query)) => format!(
            "{}?{}",
            RE_PATH_VARIABLE.replace_all(path, ":$1"),
            RE_QUERY_VARIABLE.replace_all(query, "=")
        ),
        None => RE_PATH_VARIABLE.replace_all(raw, ":$1").into_owned(),
    };
    NormalizedPath {
        url: format!("{}{}", environment_prefix(environment_key), name),
        name,
    }
}

/// `{{key}}/`, resolved by Postman from the active environment.
pub fn environment_prefix(environment_key: &str) -> String {
    format!("{{{{{}}}}}/", environment_key)
}

/// Build the raw path of a conventionally routed action from a route
/// template such as `api/{controller}/{id}`.
///
/// `{controller}` and `{action}` are filled in. Other placeholders survive
/// only when the action declares a parameter of that name; otherwise the
/// segment is dropped together with its leading `/`. Simple-typed parameters
/// the template does not mention are appended as `name={name}` query pairs
/// in declaration order.
pub fn expand_template(template: &str, route: &RouteDescription) -> String {
    let mut path = RE_TEMPLATE_SEGMENT
        .replace_all(template, |caps: &Captures| {
            let slash = &caps[1];
            let name = &caps[2];
            match name {
                "controller" => format!("{}{}", slash, route.controller.name),
                "action" => format!("{}{}", slash, route.action),
                _ if route.parameters.iter().any(|p| p.name == name) => {
                    format!("{}{{{}}}", slash, name)
                }
                _ => String::new(),
            }
        })
        .into_owned();

    let placeholders: Vec<&str> = RE_TEMPLATE_SEGMENT
        .captures_iter(template)
        .filter_map(|caps| caps.get(2).map(|m| m.as_str()))
        .collect();
    let query: Vec<String> = route
        .parameters
        .iter()
        .filter(|p| !placeholders.contains(&p.name.as_str()))
        .filter(|p| signature::is_simple_type(&p.type_ref))
        .map(|p| format!("{0}={{{0}}}", p.name))
        .collect();

    if !query.is_empty() {
        path.push(if path.contains('?') { '&' } else { '?' });
        path.push_str(&query.join("&"));
    }
    path
}
