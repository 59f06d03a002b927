use oxrdfio::RdfParseError;
use surfcast_client::ClientError;
use surfcast_model::IriParseError;

/// An error raised while loading a document into a [`Store`](crate::store::Store).
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Fetching the document failed.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// The document body is not well-formed RDF.
    #[error(transparent)]
    Parse(#[from] RdfParseError),
    /// The base IRI is invalid.
    #[error("invalid base IRI '{iri}': {error}")]
    InvalidBaseIri {
        /// The IRI itself.
        iri: String,
        /// The parsing error.
        #[source]
        error: IriParseError,
    },
}
