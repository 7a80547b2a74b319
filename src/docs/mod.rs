//! XML documentation: signature keys, the member index and the resolver.

pub mod index;
pub mod resolver;
pub mod signature;

pub use index::{DocIndex, DocTag, MemberNode};
pub use resolver::DocResolver;
pub use signature::MemberKind;
