//! postgen: build Postman collections from a Web API route catalog and the
//! XML documentation of the API's controllers.
//!
//! The pipeline, per operation:
//!
//! - [`docs`] resolves summary, remarks, returns and parameter docs from the
//!   XML documentation by member signature;
//! - [`markup`] turns embedded documentation markup into markdown;
//! - [`render::composer`] assembles the request description;
//! - [`path`] rewrites the route template into Postman variable syntax;
//! - [`assemble`] groups operations into one folder per controller.

pub mod assemble;
pub mod catalog;
pub mod collection;
pub mod docs;
pub mod error;
pub mod markup;
pub mod model;
pub mod path;
pub mod render;
pub mod sample;

pub use assemble::{assemble, assemble_with_index, GeneratorConfig};
pub use collection::{Collection, Folder, Request};
pub use docs::{DocIndex, DocResolver, MemberKind};
pub use error::{Error, Result};
pub use model::{RouteCatalog, RouteDescription};
pub use sample::{NoSamples, SampleDirection, SampleMap, SampleProvider};
