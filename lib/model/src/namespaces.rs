use crate::vocab;
use oxiri::Iri;
use oxrdf::{IriParseError, NamedNode};
use std::collections::BTreeMap;

/// Bidirectional mapping between short prefixes and namespace IRIs.
///
/// Both sides are unique: rebinding an existing prefix or an existing
/// namespace IRI replaces the previous pairing. Iteration is alphabetical by
/// prefix, which keeps generated `PREFIX` blocks stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    by_prefix: BTreeMap<String, String>,
    by_namespace: BTreeMap<String, String>,
}

impl NamespaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The namespace table of the surfcast deployment.
    pub fn surfcast() -> Self {
        let mut map = Self::new();
        for (prefix, namespace) in [
            ("geonames", "http://www.geonames.org/ontology#"),
            ("geo", vocab::geo::NAMESPACE),
            ("foaf", vocab::foaf::NAMESPACE),
            ("om", "http://www.opengis.net/om/1.0/"),
            ("om2", "http://rdf.channelcoast.org/ontology/om_tmp.owl#"),
            ("gml", "http://www.opengis.net/gml#"),
            ("xsi", "http://schemas.opengis.net/om/1.0.0/om.xsd#"),
            ("rdf", vocab::rdf::NAMESPACE),
            ("rdfs", vocab::rdfs::NAMESPACE),
            ("owl", vocab::owl::NAMESPACE),
            ("pv", "http://purl.org/net/provenance/ns#"),
            ("xsd", vocab::xsd::NAMESPACE),
            ("dc", "http://purl.org/dc/elements/1.1/"),
            ("lgdo", vocab::lgdo::NAMESPACE),
            ("georss", "http://www.georss.org/georss/"),
            ("eurostat", vocab::eurostat::NAMESPACE),
            ("postcode", vocab::postcode::NAMESPACE),
            ("admingeo", vocab::admingeo::NAMESPACE),
            ("skos", "http://www.w3.org/2004/02/skos/core#"),
            ("dbpedia-owl", "http://dbpedia.org/ontology/"),
            ("ssn", vocab::ssn::NAMESPACE),
            ("ssne", vocab::ssne::NAMESPACE),
            ("DUL", vocab::dul::NAMESPACE),
            ("time", vocab::time::NAMESPACE),
            ("sw", vocab::sw::NAMESPACE),
            ("id-semsorgrid", "http://id.semsorgrid.ecs.soton.ac.uk/"),
            ("osgb", "http://data.ordnancesurvey.co.uk/id/"),
        ] {
            map.bind_raw(prefix, namespace);
        }
        map
    }

    /// Binds `prefix` to `namespace` after validating the namespace IRI.
    pub fn bind(
        &mut self,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Result<(), IriParseError> {
        let prefix = prefix.into();
        let namespace = namespace.into();
        Iri::parse(namespace.as_str())?;
        self.bind_raw(&prefix, &namespace);
        Ok(())
    }

    fn bind_raw(&mut self, prefix: &str, namespace: &str) {
        if let Some(previous) = self
            .by_prefix
            .insert(prefix.to_owned(), namespace.to_owned())
        {
            if previous != namespace {
                self.by_namespace.remove(&previous);
            }
        }
        if let Some(previous) = self
            .by_namespace
            .insert(namespace.to_owned(), prefix.to_owned())
        {
            if previous != prefix {
                self.by_prefix.remove(&previous);
            }
        }
    }

    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.by_prefix.get(prefix).map(String::as_str)
    }

    pub fn prefix(&self, namespace: &str) -> Option<&str> {
        self.by_namespace.get(namespace).map(String::as_str)
    }

    /// Expands `prefix:local` into a named node.
    ///
    /// Returns `None` when the input carries no colon, the prefix is not
    /// bound, or the expansion is not a valid IRI.
    pub fn expand(&self, qname: &str) -> Option<NamedNode> {
        let (prefix, local) = qname.split_once(':')?;
        let namespace = self.by_prefix.get(prefix)?;
        NamedNode::new(format!("{namespace}{local}")).ok()
    }

    /// Shrinks an IRI to `prefix:local` using the longest bound namespace.
    pub fn shrink(&self, iri: &str) -> Option<String> {
        self.by_namespace
            .iter()
            .filter(|(namespace, _)| iri.starts_with(namespace.as_str()))
            .max_by_key(|(namespace, _)| namespace.len())
            .map(|(namespace, prefix)| format!("{prefix}:{}", &iri[namespace.len()..]))
    }

    /// `(prefix, namespace)` pairs in alphabetical prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_prefix
            .iter()
            .map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_prefix.is_empty()
    }
}
