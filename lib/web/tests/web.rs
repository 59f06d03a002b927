use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use surfcast_aggregate::{Endpoints, SurfcastConfig};
use surfcast_client::{CacheEntry, DiskCache, MaxAge};
use surfcast_model::NamedNode;
use surfcast_web::{create_router, AppState};
use tempfile::TempDir;

const PREFIXES: &str = "\
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
@prefix ssn: <http://purl.oclc.org/NET/ssnx/ssn#> .\n\
@prefix ssne: <http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#> .\n\
@prefix dul: <http://www.loa-cnr.it/ontologies/DUL.owl#> .\n\
@prefix time: <http://www.w3.org/2006/time#> .\n\
@prefix ndbc: <http://marinemetadata.org/2005/08/ndbc_waves#> .\n\
@prefix sw: <http://sweet.jpl.nasa.gov/2.1/sweetAll.owl#> .\n\
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n";

const COLLECTION: &str = "http://waves.example/collections/today";
const SENSOR: &str = "http://waves.example/sensors/pier";

const TEN_O_CLOCK_MS: i64 = 1_306_922_400_000;
const ELEVEN_O_CLOCK_MS: i64 = 1_306_926_000_000;

/// Seeds the document cache so requests never touch the network. The SPARQL
/// endpoints stay unroutable, so the optional sections degrade to empty.
fn seed(cache: &DiskCache, url: &str, body: &str) {
    let entry = CacheEntry::new(format!("{PREFIXES}\n{body}"), Some("text/turtle".to_owned()));
    cache.store("graphite", url, &entry, MaxAge::Forever).unwrap();
}

fn test_server(dir: &TempDir) -> TestServer {
    let config = SurfcastConfig {
        cache_root: dir.path().to_path_buf(),
        default_max_age: MaxAge::Forever,
        endpoints: Endpoints {
            sensor: "http://127.0.0.1:1/sensors/sparql".to_owned(),
            eurostat: "http://127.0.0.1:1/eurostat/sparql".to_owned(),
            ordnance_survey: "http://127.0.0.1:1/os/sparql".to_owned(),
            linked_geo_data: "http://127.0.0.1:1/lgd/sparql".to_owned(),
        },
        postcode_url_template: "http://127.0.0.1:1/latlng/{lat},{lon}.rdf".to_owned(),
        http_timeout: Duration::from_secs(2),
        start_iri: NamedNode::new(COLLECTION).unwrap(),
        ..SurfcastConfig::default()
    };
    TestServer::new(create_router(AppState::new(config).unwrap())).unwrap()
}

fn collection_doc() -> String {
    format!(
        "<{COLLECTION}> a ssne:ObservationCollection ;\n\
         \tdul:hasMember <http://waves.example/obs/1>, <http://waves.example/obs/2> .\n\
         {obs1}{obs2}",
        obs1 = observation(1, "2011-06-01T09:30:00Z", "2011-06-01T10:00:00Z", 1.2),
        obs2 = observation(2, "2011-06-01T10:30:00Z", "2011-06-01T11:00:00Z", 1.5),
    )
}

fn observation(n: u32, begin: &str, end: &str, value: f64) -> String {
    format!(
        "<http://waves.example/obs/{n}> a ssn:Observation ;\n\
         \tssn:observedProperty ndbc:Wind_Wave_Height ;\n\
         \tssn:observedBy <{SENSOR}> ;\n\
         \tssn:observationResultTime <http://waves.example/times/{n}> ;\n\
         \tssn:observationResult <http://waves.example/results/{n}> .\n\
         <http://waves.example/times/{n}> a time:Interval ;\n\
         \ttime:hasBeginning \"{begin}\"^^xsd:dateTime ;\n\
         \ttime:hasEnd \"{end}\"^^xsd:dateTime .\n\
         <http://waves.example/results/{n}> ssn:hasValue <http://waves.example/values/{n}> .\n\
         <http://waves.example/values/{n}> ssne:hasQuantityValue \"{value}\"^^xsd:double .\n"
    )
}

fn sensor_doc(label: &str) -> String {
    format!(
        "<{SENSOR}> a ssn:SensingDevice ;\n\
         \trdfs:label \"{label}\" ;\n\
         \tssn:hasDeployment <http://waves.example/deployments/pier> .\n\
         <http://waves.example/deployments/pier> ssn:deployedOnPlatform \
         <http://waves.example/platforms/pier> .\n\
         <http://waves.example/platforms/pier> sw:hasLocation \
         <http://waves.example/locations/pier> .\n\
         <http://waves.example/locations/pier> \
         sw:coordinate1 <http://waves.example/locations/pier/lon> ;\n\
         \tsw:coordinate2 <http://waves.example/locations/pier/lat> .\n\
         <http://waves.example/locations/pier/lon> sw:hasNumericValue \"-1.8447\"^^xsd:double .\n\
         <http://waves.example/locations/pier/lat> sw:hasNumericValue \"50.7188\"^^xsd:double .\n"
    )
}

#[tokio::test]
async fn test_chart_mode_answers_with_the_series_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    seed(&cache, COLLECTION, &collection_doc());
    seed(&cache, SENSOR, &sensor_doc("Boscombe Pier wave radar"));

    let server = test_server(&dir);
    let response = server
        .get("/")
        .add_query_param("uri", COLLECTION)
        .add_query_param("chart", "1")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let payload: Value = response.json();
    assert_eq!(
        payload["data"],
        json!([[TEN_O_CLOCK_MS, 1.2], [ELEVEN_O_CLOCK_MS, 1.5]])
    );
    assert_eq!(payload["source"], COLLECTION);
    assert!(payload["prev"].is_null());
    assert!(payload["next"].is_null());
}

#[tokio::test]
async fn test_chart_mode_is_selected_by_any_chart_value() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    seed(&cache, COLLECTION, &collection_doc());
    seed(&cache, SENSOR, &sensor_doc("Boscombe Pier wave radar"));

    // No uri parameter either: the configured start IRI is used.
    let server = test_server(&dir);
    let response = server.get("/").add_query_param("chart", "").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let payload: Value = response.json();
    assert_eq!(payload["source"], COLLECTION);
}

#[tokio::test]
async fn test_page_mode_renders_the_report_with_escaping() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    seed(&cache, COLLECTION, &collection_doc());
    seed(&cache, SENSOR, &sensor_doc("Pier & radar <west>"));

    let server = test_server(&dir);
    let response = server.get("/").add_query_param("uri", COLLECTION).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let page = response.text();
    // The place name lookup degrades, so the sensor label becomes the title.
    assert!(page.contains("<h1>Pier &amp; radar &lt;west&gt; surf status</h1>"));
    assert!(!page.contains("<west>"));
    assert!(page.contains("<h2>Wave height data</h2>"));
    assert!(page.contains("<tr><td>10:00</td><td>1.2</td></tr>"));
    assert!(page.contains("<tr><td>11:00</td><td>1.5</td></tr>"));
    assert!(page.contains("<dd>50.7188, -1.8447</dd>"));
    assert!(page.contains("<p>Nothing found nearby</p>"));
}

#[tokio::test]
async fn test_invalid_start_iri_is_a_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server.get("/").add_query_param("uri", "not an iri").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_start_document_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    seed(&cache, COLLECTION, "");

    let server = test_server(&dir);
    let response = server.get("/").add_query_param("uri", COLLECTION).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
