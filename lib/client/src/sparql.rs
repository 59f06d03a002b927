use crate::cache::{CacheEntry, DiskCache, MaxAge};
use crate::error::ClientError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sparesults::{QueryResultsFormat, QueryResultsParser, ReaderQueryResultsParserOutput};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;
use std::time::Duration;
use surfcast_model::{vocab, NamespaceMap, Term};
use tracing::warn;

/// Hard deadline for one SPARQL request, independent of the general HTTP
/// timeout.
pub const QUERY_DEADLINE: Duration = Duration::from_secs(120);

/// One result row, keyed by variable name.
pub type Row = BTreeMap<String, RowValue>;

/// One binding in a SPARQL result row.
///
/// The serialised form follows the term objects of the SPARQL 1.1 JSON
/// results format, which keeps cached result sets readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RowValue {
    #[serde(rename = "uri")]
    Iri { value: String },
    #[serde(rename = "bnode")]
    Blank { value: String },
    #[serde(rename = "literal")]
    Literal {
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
        #[serde(rename = "xml:lang", skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
    },
}

impl RowValue {
    fn from_term(term: &Term) -> Self {
        match term {
            Term::NamedNode(node) => RowValue::Iri {
                value: node.as_str().to_owned(),
            },
            Term::BlankNode(node) => RowValue::Blank {
                value: node.as_str().to_owned(),
            },
            Term::Literal(literal) => {
                let lang = literal.language().map(str::to_owned);
                let datatype = if lang.is_some() || literal.datatype() == vocab::xsd::STRING {
                    None
                } else {
                    Some(literal.datatype().as_str().to_owned())
                };
                RowValue::Literal {
                    value: literal.value().to_owned(),
                    datatype,
                    lang,
                }
            }
        }
    }

    /// The lexical value, whatever the term kind.
    pub fn as_str(&self) -> &str {
        match self {
            RowValue::Iri { value } | RowValue::Blank { value } => value,
            RowValue::Literal { value, .. } => value,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_str().parse().ok()
    }

    pub fn iri(&self) -> Option<&str> {
        match self {
            RowValue::Iri { value } => Some(value),
            _ => None,
        }
    }
}

/// Which shape the caller wants a result set in.
///
/// The shape takes part in the cache key, so `rows` and `row` reads of the
/// same query are cached independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    Rows,
    Row,
}

impl ResultShape {
    fn cache_token(self) -> &'static str {
        match self {
            ResultShape::Rows => "rows",
            ResultShape::Row => "row",
        }
    }
}

/// Client for one remote SPARQL endpoint.
///
/// Outgoing queries get missing `PREFIX` declarations injected from the
/// namespace map, and parsed result rows are cached on disk under a
/// per-endpoint subdirectory.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    endpoint: String,
    namespaces: NamespaceMap,
    http: reqwest::Client,
    cache: DiskCache,
    cache_namespace: String,
}

impl SparqlClient {
    pub fn new(
        endpoint: impl Into<String>,
        namespaces: NamespaceMap,
        http: reqwest::Client,
        cache: DiskCache,
    ) -> Self {
        let endpoint = endpoint.into();
        let cache_namespace = format!("sparql/{}", DiskCache::digest(&endpoint));
        Self {
            endpoint,
            namespaces,
            http,
            cache,
            cache_namespace,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The exact query text that would go out on the wire: the input with
    /// declarations for referenced-but-undeclared prefixes prepended.
    ///
    /// This text, plus the result shape, is also the cache key.
    pub fn prepare_query(&self, query: &str) -> String {
        let declared = declared_prefixes(query);
        let mut declarations = Vec::new();
        for prefix in referenced_prefixes(query) {
            if declared.contains(&prefix) {
                continue;
            }
            match self.namespaces.namespace(&prefix) {
                Some(namespace) => {
                    declarations.push(format!("PREFIX {prefix}: <{namespace}>\n"));
                }
                None => warn!(
                    prefix,
                    endpoint = self.endpoint,
                    "query references a prefix missing from the namespace map"
                ),
            }
        }
        if declarations.is_empty() {
            query.to_owned()
        } else {
            format!("{}{query}", declarations.concat())
        }
    }

    /// Runs a `SELECT` query and returns every result row.
    pub async fn select(&self, query: &str, max_age: MaxAge) -> Result<Vec<Row>, ClientError> {
        let query = self.prepare_query(query);
        let key = format!("{query}{}", ResultShape::Rows.cache_token());
        if let Some(entry) = self.cache.lookup(&self.cache_namespace, &key, max_age)? {
            return Ok(serde_json::from_str(&entry.body)?);
        }

        let rows = self.dispatch(&query).await?;
        let entry = CacheEntry::new(serde_json::to_string(&rows)?, None);
        self.cache
            .store(&self.cache_namespace, &key, &entry, max_age)?;
        Ok(rows)
    }

    /// Runs a `SELECT` query and returns the first result row, if any.
    pub async fn select_row(
        &self,
        query: &str,
        max_age: MaxAge,
    ) -> Result<Option<Row>, ClientError> {
        let query = self.prepare_query(query);
        let key = format!("{query}{}", ResultShape::Row.cache_token());
        if let Some(entry) = self.cache.lookup(&self.cache_namespace, &key, max_age)? {
            return Ok(serde_json::from_str(&entry.body)?);
        }

        let row = self.dispatch(&query).await?.into_iter().next();
        let entry = CacheEntry::new(serde_json::to_string(&row)?, None);
        self.cache
            .store(&self.cache_namespace, &key, &entry, max_age)?;
        Ok(row)
    }

    async fn dispatch(&self, query: &str) -> Result<Vec<Row>, ClientError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("query", query)])
            .header(reqwest::header::ACCEPT, "application/sparql-results+json")
            .timeout(QUERY_DEADLINE)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Endpoint {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                message: truncated(&body),
            });
        }
        parse_rows(&body)
    }
}

fn parse_rows(body: &str) -> Result<Vec<Row>, ClientError> {
    let parser = QueryResultsParser::from_format(QueryResultsFormat::Json);
    match parser.for_reader(body.as_bytes())? {
        ReaderQueryResultsParserOutput::Solutions(solutions) => {
            let mut rows = Vec::new();
            for solution in solutions {
                let solution = solution?;
                let mut row = Row::new();
                for (variable, term) in solution.iter() {
                    row.insert(variable.as_str().to_owned(), RowValue::from_term(term));
                }
                rows.push(row);
            }
            Ok(rows)
        }
        ReaderQueryResultsParserOutput::Boolean(_) => Err(ClientError::ResultShape(
            "expected solutions, endpoint returned a boolean".to_owned(),
        )),
    }
}

/// Prefixes declared by `PREFIX` clauses in the query text.
fn declared_prefixes(query: &str) -> BTreeSet<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\bprefix\s+([A-Za-z_][A-Za-z0-9_.-]*)?\s*:")
            .expect("prefix declaration pattern is valid")
    });
    pattern
        .captures_iter(query)
        .map(|captures| {
            captures
                .get(1)
                .map(|name| name.as_str().to_owned())
                .unwrap_or_default()
        })
        .collect()
}

/// Prefix names referenced as `name:local` in the query body, ignoring
/// IRI references, quoted strings, comments and variables.
fn referenced_prefixes(query: &str) -> BTreeSet<String> {
    let bytes = query.as_bytes();
    let mut found = BTreeSet::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => {
                while i < bytes.len() && bytes[i] != b'>' {
                    i += 1;
                }
                i += 1;
            }
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
            }
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'?' | b'$' => {
                i += 1;
                while i < bytes.len() && is_name_byte(bytes[i]) {
                    i += 1;
                }
            }
            start if is_name_start(start) => {
                let from = i;
                while i < bytes.len() && is_name_byte(bytes[i]) {
                    i += 1;
                }
                if i < bytes.len() && bytes[i] == b':' {
                    found.insert(query[from..i].to_owned());
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    found
}

fn is_name_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' || byte == b'.'
}

fn truncated(body: &str) -> String {
    const LIMIT: usize = 200;
    if body.len() <= LIMIT {
        body.to_owned()
    } else {
        let mut end = LIMIT;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}
