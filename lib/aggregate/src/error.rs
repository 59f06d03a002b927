use surfcast_client::ClientError;
use surfcast_graph::GraphError;

/// An error that aborts a whole status report.
///
/// Only failures on the critical path surface here. Optional report sections
/// degrade to empty values and log a warning instead.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// The start IRI dereferenced to a document with no triples.
    #[error("no data found at <{iri}>")]
    NotFound { iri: String },
    /// The graph is missing a property the report cannot be built without.
    #[error("<{iri}> is missing {missing}")]
    Shape { iri: String, missing: String },
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl AggregateError {
    pub(crate) fn shape(iri: impl Into<String>, missing: impl Into<String>) -> Self {
        Self::Shape {
            iri: iri.into(),
            missing: missing.into(),
        }
    }
}
