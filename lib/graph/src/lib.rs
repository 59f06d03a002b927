mod error;
mod parse;
mod resource;
mod store;

pub use error::GraphError;
pub use parse::parse_document;
pub use resource::{Direction, Resource, ResourceSet, Step};
pub use store::Store;
