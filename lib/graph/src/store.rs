use crate::error::GraphError;
use crate::parse::parse_document;
use crate::resource::Resource;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use surfcast_client::{Fetcher, MaxAge};
use surfcast_model::vocab::rdf;
use surfcast_model::{
    Graph, NamedNode, NamedNodeRef, NamespaceMap, Subject, SubjectRef, Term, TermRef, TripleRef,
};
use tracing::debug;

/// An RDF graph that grows by dereferencing IRIs on demand.
///
/// The store remembers which IRIs it has already loaded, so repeated loads of
/// the same document are free and a traversal can call [`Store::load`]
/// opportunistically. Lookups hand out owned terms and the internal lock is
/// never held across an await point, which keeps the store usable behind a
/// shared reference inside request handlers.
pub struct Store {
    inner: Mutex<Inner>,
    namespaces: NamespaceMap,
    fetcher: Fetcher,
    max_age: MaxAge,
}

#[derive(Default)]
struct Inner {
    graph: Graph,
    loaded: HashSet<NamedNode>,
}

impl Store {
    pub fn new(fetcher: Fetcher, namespaces: NamespaceMap, max_age: MaxAge) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            namespaces,
            fetcher,
            max_age,
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        // Every mutation is a single insert, so the data behind a poisoned
        // lock is still coherent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn namespaces(&self) -> &NamespaceMap {
        &self.namespaces
    }

    /// Shrinks an IRI to `prefix:local` when a bound namespace matches.
    pub fn shrink(&self, iri: &str) -> Option<String> {
        self.namespaces.shrink(iri)
    }

    /// Expands `prefix:local` into a named node.
    pub fn expand(&self, qname: &str) -> Option<NamedNode> {
        self.namespaces.expand(qname)
    }

    pub fn len(&self) -> usize {
        self.inner().graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner().graph.is_empty()
    }

    pub fn contains(&self, triple: TripleRef<'_>) -> bool {
        self.inner().graph.contains(triple)
    }

    /// Inserts one triple. Returns `false` when it was already present.
    pub fn insert(&self, triple: TripleRef<'_>) -> bool {
        self.inner().graph.insert(triple)
    }

    /// Whether `iri` has already been dereferenced into this store.
    pub fn is_loaded(&self, iri: &NamedNode) -> bool {
        self.inner().loaded.contains(iri)
    }

    /// Dereferences `iri` and merges the returned document.
    ///
    /// Already-loaded IRIs are skipped and report zero inserted triples. On
    /// failure nothing is inserted and the IRI stays unloaded, so a later
    /// call may retry.
    pub async fn load(&self, iri: &NamedNode) -> Result<usize, GraphError> {
        if self.is_loaded(iri) {
            return Ok(0);
        }
        let document = self.fetcher.fetch(iri.as_str(), self.max_age).await?;
        let triples =
            parse_document(&document.body, document.content_type.as_deref(), iri.as_str())?;

        let mut inner = self.inner();
        if !inner.loaded.insert(iri.clone()) {
            // Another task finished the same load while we were fetching.
            return Ok(0);
        }
        let mut added = 0;
        for triple in &triples {
            if inner.graph.insert(triple) {
                added += 1;
            }
        }
        drop(inner);
        debug!(iri = iri.as_str(), added, "loaded document");
        Ok(added)
    }

    /// Parses `body` against `base_iri` and merges the result, without going
    /// through HTTP. Returns the number of triples new to the store.
    ///
    /// Parsing happens before any insertion, so a malformed document leaves
    /// the store untouched.
    pub fn insert_document(
        &self,
        base_iri: &str,
        body: &str,
        content_type: Option<&str>,
    ) -> Result<usize, GraphError> {
        let triples = parse_document(body, content_type, base_iri)?;
        let mut inner = self.inner();
        let mut added = 0;
        for triple in &triples {
            if inner.graph.insert(triple) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// All objects of `(subject, predicate, ?)` triples.
    pub fn objects(&self, subject: SubjectRef<'_>, predicate: NamedNodeRef<'_>) -> Vec<Term> {
        self.inner()
            .graph
            .objects_for_subject_predicate(subject, predicate)
            .map(TermRef::into_owned)
            .collect()
    }

    /// All subjects of `(?, predicate, object)` triples.
    pub fn subjects_of(&self, predicate: NamedNodeRef<'_>, object: TermRef<'_>) -> Vec<Subject> {
        self.inner()
            .graph
            .subjects_for_predicate_object(predicate, object)
            .map(SubjectRef::into_owned)
            .collect()
    }

    /// A resource view anchored at `term`.
    pub fn resource(&self, term: impl Into<Term>) -> Resource<'_> {
        Resource::bound(self, term.into())
    }

    /// The resources declared `rdf:type class`.
    pub fn all_of_type(&self, class: NamedNodeRef<'_>) -> Vec<Resource<'_>> {
        self.subjects_of(rdf::TYPE, class.into())
            .into_iter()
            .map(|subject| self.resource(subject))
            .collect()
    }

    /// Every distinct subject in the store.
    pub fn subjects(&self) -> Vec<Resource<'_>> {
        let inner = self.inner();
        let mut seen = HashSet::new();
        let mut subjects = Vec::new();
        for triple in inner.graph.iter() {
            let subject = triple.subject.into_owned();
            if seen.insert(subject.clone()) {
                subjects.push(subject);
            }
        }
        drop(inner);
        subjects
            .into_iter()
            .map(|subject| self.resource(subject))
            .collect()
    }
}
