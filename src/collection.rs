//! Postman collection document (v1 layout).
//!
//! Field order matches the serialized property order. Keys are camel-cased,
//! except `collection_id` on folders, which Postman expects in that spelling.

use serde::Serialize;
use uuid::Uuid;

/// Header block sent with every generated request.
pub const JSON_HEADERS: &str = "Content-Type: application/json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Creation time, milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Top-level item ids; only folder ids belong here. Assembly leaves it
    /// empty for the consumer to fill.
    pub order: Vec<Uuid>,
    pub folders: Vec<Folder>,
    pub requests: Vec<Request>,
}

impl Collection {
    pub fn folder(&self, id: Uuid) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Requests of a folder, in the folder's display order.
    pub fn folder_requests<'a>(&'a self, folder: &'a Folder) -> impl Iterator<Item = &'a Request> + 'a {
        folder
            .order
            .iter()
            .filter_map(move |id| self.requests.iter().find(|r| r.id == *id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Request ids in display order
    pub order: Vec<Uuid>,
    /// Snake case on folders, unlike `collectionId` on requests
    pub collection_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: Uuid,
    pub headers: String,
    pub url: String,
    pub method: String,
    /// Sample request body; serialized as `null` when absent
    pub raw_mode_data: Option<String>,
    pub data_mode: DataMode,
    pub name: String,
    pub description: String,
    pub description_format: DescriptionFormat,
    pub time: i64,
    pub responses: Vec<String>,
    pub collection_id: Uuid,
    pub folder: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionFormat {
    Markdown,
}
