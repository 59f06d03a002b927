use crate::error::GraphError;
use oxrdfio::{RdfFormat, RdfParser};
use surfcast_model::Triple;

/// Parses one dereferenced document into triples.
///
/// The format is taken from `content_type` when the server declared a usable
/// one and guessed from the body otherwise. Blank nodes are renamed to fresh
/// identifiers so that merging documents never conflates anonymous resources.
/// Named graphs in the input are flattened into plain triples.
pub fn parse_document(
    body: &str,
    content_type: Option<&str>,
    base_iri: &str,
) -> Result<Vec<Triple>, GraphError> {
    let format = content_type
        .and_then(format_from_content_type)
        .unwrap_or_else(|| sniff_format(body));
    let parser = RdfParser::from_format(format)
        .with_base_iri(base_iri)
        .map_err(|error| GraphError::InvalidBaseIri {
            iri: base_iri.to_owned(),
            error,
        })?
        .rename_blank_nodes();
    let mut triples = Vec::new();
    for quad in parser.for_reader(body.as_bytes()) {
        let quad = quad?;
        triples.push(Triple::new(quad.subject, quad.predicate, quad.object));
    }
    Ok(triples)
}

fn format_from_content_type(content_type: &str) -> Option<RdfFormat> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    match essence {
        // Both spellings are seen in the wild for Turtle.
        "text/turtle" | "application/x-turtle" => Some(RdfFormat::Turtle),
        "application/rdf+xml" => Some(RdfFormat::RdfXml),
        "application/n-triples" | "text/plain" => Some(RdfFormat::NTriples),
        _ => RdfFormat::from_media_type(essence),
    }
}

/// Guesses the format when the server declared no usable content type.
fn sniff_format(body: &str) -> RdfFormat {
    let head = body.trim_start();
    if head.starts_with("<?xml") || head.starts_with("<rdf:RDF") {
        RdfFormat::RdfXml
    } else {
        RdfFormat::Turtle
    }
}
