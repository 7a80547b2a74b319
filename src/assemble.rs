//! Route catalog → Postman collection.
//!
//! One folder per controller, in order of first appearance in the catalog.
//! Within a folder, requests are ordered by HTTP method (GET, POST, PUT,
//! DELETE, then anything else), then by path, then by rendered description,
//! then by action name.

use crate::collection::*;
use crate::docs::{signature, DocIndex, DocResolver};
use crate::error::{Error, Result};
use crate::model::*;
use crate::path;
use crate::render::composer;
use crate::sample::{SampleDirection, SampleProvider};
use chrono::Utc;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use uuid::Uuid;

/// Display order of HTTP methods inside a folder.
const METHOD_ORDER: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

/// Scalar settings of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Postman environment variable holding the base URL
    pub environment_key: String,
    /// Conventional route template, e.g. `api/{controller}/{id}`
    pub route_template: String,
}

impl GeneratorConfig {
    pub fn new(environment_key: impl Into<String>, route_template: impl Into<String>) -> Self {
        Self {
            environment_key: environment_key.into(),
            route_template: route_template.into(),
        }
    }
}

/// Build a collection, loading documentation from `documentation`.
///
/// Arguments are validated and the documentation file is loaded before any
/// assembly work starts.
pub fn assemble(
    catalog: &RouteCatalog,
    documentation: &Path,
    samples: &dyn SampleProvider,
    config: &GeneratorConfig,
) -> Result<Collection> {
    validate(catalog, config)?;
    let index = DocIndex::load(documentation)?;
    assemble_with_index(catalog, &index, samples, config)
}

/// Build a collection against an already loaded documentation index.
pub fn assemble_with_index(
    catalog: &RouteCatalog,
    index: &DocIndex,
    samples: &dyn SampleProvider,
    config: &GeneratorConfig,
) -> Result<Collection> {
    validate(catalog, config)?;

    let timestamp = Utc::now().timestamp_millis();
    let resolver = DocResolver::new(index);

    let mut collection = Collection {
        id: Uuid::new_v4(),
        name: catalog.source.name.clone(),
        description: format!("{} Api v{}", catalog.source.name, catalog.source.version),
        timestamp,
        order: Vec::new(),
        folders: Vec::new(),
        requests: Vec::new(),
    };

    for (controller, routes) in group_by_controller(&catalog.routes) {
        let controller_docs = resolver.controller_docs(controller);
        let mut folder = Folder {
            id: Uuid::new_v4(),
            name: controller.name.clone(),
            description: composer::folder_description(&controller_docs),
            order: Vec::new(),
            collection_id: collection.id,
        };

        let mut operations: Vec<Operation> = routes
            .into_iter()
            .map(|route| Operation::prepare(route, &resolver, config))
            .collect();
        operations.sort_by(Operation::display_order);

        for op in operations {
            let location = path::normalize(&op.route.path, &config.environment_key);
            let request = Request {
                id: Uuid::new_v4(),
                headers: JSON_HEADERS.to_string(),
                url: location.url,
                method: op.route.method.clone(),
                raw_mode_data: samples.sample(&op.route, SampleDirection::Request),
                data_mode: DataMode::Raw,
                name: location.name,
                description: op.description,
                description_format: DescriptionFormat::Markdown,
                time: timestamp,
                responses: Vec::new(),
                collection_id: collection.id,
                folder: folder.id,
            };
            folder.order.push(request.id);
            collection.requests.push(request);
        }

        collection.folders.push(folder);
    }

    Ok(collection)
}

fn validate(catalog: &RouteCatalog, config: &GeneratorConfig) -> Result<()> {
    if config.environment_key.trim().is_empty() {
        return Err(Error::InvalidArgument("environment key"));
    }
    if config.route_template.trim().is_empty() {
        return Err(Error::InvalidArgument("route template"));
    }
    if catalog.source.name.trim().is_empty() {
        return Err(Error::InvalidArgument("catalog source name"));
    }
    Ok(())
}

/// Group routes by controller name, keeping catalog order for both the
/// groups and the routes inside them.
fn group_by_controller(
    routes: &[RouteDescription],
) -> Vec<(&ControllerDescriptor, Vec<&RouteDescription>)> {
    let mut groups: Vec<(&ControllerDescriptor, Vec<&RouteDescription>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for route in routes {
        match positions.get(route.controller.name.as_str()) {
            Some(&i) => groups[i].1.push(route),
            None => {
                positions.insert(&route.controller.name, groups.len());
                groups.push((&route.controller, vec![route]));
            }
        }
    }

    groups
}

/// A route with its resolved path and rendered description.
struct Operation<'a> {
    route: Cow<'a, RouteDescription>,
    description: String,
}

impl<'a> Operation<'a> {
    fn prepare(route: &'a RouteDescription, resolver: &DocResolver, config: &GeneratorConfig) -> Self {
        let route = if route.path.is_empty() {
            let mut expanded = route.clone();
            expanded.path = path::expand_template(&config.route_template, route);
            Cow::Owned(expanded)
        } else {
            Cow::Borrowed(route)
        };

        let record = resolver.record(&route);
        let response_type = signature::display_name(route.returned_type());
        let description = composer::compose(&record, &response_type);

        Self { route, description }
    }

    fn display_order(a: &Self, b: &Self) -> Ordering {
        method_rank(&a.route.method)
            .cmp(&method_rank(&b.route.method))
            .then_with(|| a.route.path.cmp(&b.route.path))
            .then_with(|| a.description.cmp(&b.description))
            .then_with(|| a.route.action.cmp(&b.route.action))
    }
}

/// Position in [`METHOD_ORDER`]; unknown methods sort last.
fn method_rank(method: &str) -> usize {
    METHOD_ORDER
        .iter()
        .position(|m| m.eq_ignore_ascii_case(method))
        .unwrap_or(METHOD_ORDER.len())
}
