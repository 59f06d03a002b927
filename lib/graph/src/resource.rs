use crate::error::GraphError;
use crate::store::Store;
use chrono::{DateTime, NaiveDateTime};
use std::collections::HashSet;
use std::fmt;
use surfcast_model::vocab::{owl, rdf, rdfs};
use surfcast_model::{NamedNode, NamedNodeRef, SubjectRef, Term};

/// Direction a [`Step`] travels over its predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Anchor as subject, step to objects.
    Forward,
    /// Anchor as object, step to subjects.
    Backward,
}

/// One traversal step: a predicate tagged with a direction.
///
/// Vocabulary constants convert into forward steps, so plain property walks
/// read as `resource.get(ssn::OBSERVED_BY)` while inverse walks spell the
/// direction out with [`Step::backward`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'p> {
    pub direction: Direction,
    pub predicate: NamedNodeRef<'p>,
}

impl<'p> Step<'p> {
    pub const fn forward(predicate: NamedNodeRef<'p>) -> Self {
        Self {
            direction: Direction::Forward,
            predicate,
        }
    }

    pub const fn backward(predicate: NamedNodeRef<'p>) -> Self {
        Self {
            direction: Direction::Backward,
            predicate,
        }
    }
}

impl<'p> From<NamedNodeRef<'p>> for Step<'p> {
    fn from(predicate: NamedNodeRef<'p>) -> Self {
        Self::forward(predicate)
    }
}

/// A cursor over one node of a [`Store`], or the null resource.
///
/// Traversal is null-safe: a step with no match yields [`Resource::Null`],
/// and every operation on null yields null or nothing, so a chain of steps
/// needs a single check at the end instead of one per hop. Literals are
/// traversal leaves; stepping forward from one yields null.
#[derive(Clone)]
pub enum Resource<'g> {
    Bound { store: &'g Store, term: Term },
    Null,
}

impl<'g> Resource<'g> {
    pub(crate) fn bound(store: &'g Store, term: Term) -> Self {
        Resource::Bound { store, term }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Resource::Null)
    }

    /// The underlying term. Null has none.
    pub fn term(&self) -> Option<&Term> {
        match self {
            Resource::Bound { term, .. } => Some(term),
            Resource::Null => None,
        }
    }

    /// The underlying named node, when this resource is an IRI.
    pub fn named_node(&self) -> Option<&NamedNode> {
        match self.term() {
            Some(Term::NamedNode(node)) => Some(node),
            _ => None,
        }
    }

    /// The IRI of this resource, when it is an IRI.
    pub fn iri(&self) -> Option<&str> {
        self.named_node().map(NamedNode::as_str)
    }

    /// The lexical value, when this resource is a literal.
    pub fn as_str(&self) -> Option<&str> {
        match self.term() {
            Some(Term::Literal(literal)) => Some(literal.value()),
            _ => None,
        }
    }

    /// The literal value parsed as a float.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_str().and_then(|value| value.trim().parse().ok())
    }

    /// The literal value parsed as an `xsd:dateTime`, as a Unix epoch second.
    ///
    /// Accepts RFC 3339 values and treats offset-less values as UTC.
    pub fn epoch_seconds(&self) -> Option<i64> {
        self.as_str().and_then(parse_date_time)
    }

    /// Follows one step and returns the first match, or null.
    pub fn get<'p>(&self, step: impl Into<Step<'p>>) -> Resource<'g> {
        self.follow(step.into())
            .into_iter()
            .next()
            .unwrap_or(Resource::Null)
    }

    /// Follows every step and returns the union of the results, in
    /// first-seen order.
    pub fn all<'p>(&self, steps: impl IntoIterator<Item = Step<'p>>) -> ResourceSet<'g> {
        let mut items = Vec::new();
        for step in steps {
            items.extend(self.follow(step));
        }
        ResourceSet { items }.distinct()
    }

    fn follow(&self, step: Step<'_>) -> Vec<Resource<'g>> {
        let Resource::Bound { store, term } = self else {
            return Vec::new();
        };
        match step.direction {
            Direction::Forward => {
                let Some(subject) = subject_ref(term) else {
                    return Vec::new();
                };
                store
                    .objects(subject, step.predicate)
                    .into_iter()
                    .map(|object| Resource::bound(store, object))
                    .collect()
            }
            Direction::Backward => store
                .subjects_of(step.predicate, term.as_ref())
                .into_iter()
                .map(|subject| Resource::bound(store, subject.into()))
                .collect(),
        }
    }

    /// Whether this resource is declared `rdf:type class`.
    pub fn is_type(&self, class: NamedNodeRef<'_>) -> bool {
        self.follow(Step::forward(rdf::TYPE))
            .iter()
            .any(|declared| *declared == class)
    }

    /// A human-readable name: the lexical value for literals, `rdfs:label`
    /// when one is asserted, else the IRI shrunk to a qname, else the term
    /// itself. Null has no label.
    pub fn label(&self) -> Option<String> {
        let Resource::Bound { store, term } = self else {
            return None;
        };
        if let Term::Literal(literal) = term {
            return Some(literal.value().to_owned());
        }
        if let Some(label) = self.get(rdfs::LABEL).as_str() {
            return Some(label.to_owned());
        }
        match term {
            Term::NamedNode(node) => Some(
                store
                    .shrink(node.as_str())
                    .unwrap_or_else(|| node.as_str().to_owned()),
            ),
            _ => Some(term.to_string()),
        }
    }

    /// Dereferences this resource into its store.
    ///
    /// Only IRIs can be dereferenced; for anything else this is a no-op
    /// reporting zero triples.
    pub async fn load(&self) -> Result<usize, GraphError> {
        match self {
            Resource::Bound {
                store,
                term: Term::NamedNode(node),
            } => store.load(node).await,
            _ => Ok(0),
        }
    }

    /// Dereferences this resource, then each of its `owl:sameAs` neighbours,
    /// so statements published under alias IRIs land in the same store.
    pub async fn load_same_as(&self) -> Result<usize, GraphError> {
        let Resource::Bound { store, .. } = self else {
            return Ok(0);
        };
        let mut added = self.load().await?;
        for alias in self.follow(Step::forward(owl::SAME_AS)) {
            if let Resource::Bound {
                term: Term::NamedNode(node),
                ..
            } = &alias
            {
                added += store.load(node).await?;
            }
        }
        Ok(added)
    }
}

// Null compares unequal to everything, itself included, so `a == b` always
// means both sides are real and name the same term.
impl PartialEq for Resource<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Resource::Bound { term: left, .. }, Resource::Bound { term: right, .. }) => {
                left == right
            }
            _ => false,
        }
    }
}

impl PartialEq<NamedNodeRef<'_>> for Resource<'_> {
    fn eq(&self, other: &NamedNodeRef<'_>) -> bool {
        self.iri() == Some(other.as_str())
    }
}

impl PartialEq<&str> for Resource<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.iri() == Some(*other)
    }
}

impl fmt::Debug for Resource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Bound { term, .. } => f.debug_tuple("Resource").field(term).finish(),
            Resource::Null => f.write_str("Null"),
        }
    }
}

/// The ordered result of a traversal step.
#[derive(Debug, Clone)]
pub struct ResourceSet<'g> {
    items: Vec<Resource<'g>>,
}

impl<'g> ResourceSet<'g> {
    /// The first resource, or null when the set is empty.
    pub fn first(&self) -> Resource<'g> {
        self.items.first().cloned().unwrap_or(Resource::Null)
    }

    /// Drops duplicate terms, keeping first occurrences.
    #[must_use]
    pub fn distinct(self) -> Self {
        let mut seen = HashSet::new();
        let items = self
            .items
            .into_iter()
            .filter(|resource| match resource.term() {
                Some(term) => seen.insert(term.clone()),
                None => false,
            })
            .collect();
        Self { items }
    }

    /// Follows `step` from every member, concatenating the results.
    pub fn step<'p>(&self, step: impl Into<Step<'p>>) -> ResourceSet<'g> {
        let step = step.into();
        let mut items = Vec::new();
        for resource in &self.items {
            items.extend(resource.follow(step));
        }
        ResourceSet { items }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resource<'g>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'g> IntoIterator for ResourceSet<'g> {
    type Item = Resource<'g>;
    type IntoIter = std::vec::IntoIter<Resource<'g>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, 'g> IntoIterator for &'a ResourceSet<'g> {
    type Item = &'a Resource<'g>;
    type IntoIter = std::slice::Iter<'a, Resource<'g>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn subject_ref(term: &Term) -> Option<SubjectRef<'_>> {
    match term {
        Term::NamedNode(node) => Some(node.as_ref().into()),
        Term::BlankNode(node) => Some(node.as_ref().into()),
        _ => None,
    }
}

fn parse_date_time(value: &str) -> Option<i64> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.timestamp());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().timestamp())
}
