mod cache;
mod error;
mod fetch;
mod sparql;

pub use cache::{CacheEntry, DiskCache, MaxAge};
pub use error::ClientError;
pub use fetch::{FetchedDocument, Fetcher, RDF_ACCEPT};
pub use sparql::{ResultShape, Row, RowValue, SparqlClient, QUERY_DEADLINE};
