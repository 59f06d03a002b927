use std::time::Duration;

use surfcast_aggregate::{build_report, AggregateError, Endpoints, PlaceNames, SurfcastConfig};
use surfcast_client::{CacheEntry, DiskCache, MaxAge};
use surfcast_model::NamedNode;
use tempfile::TempDir;

const PREFIXES: &str = "\
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
@prefix ssn: <http://purl.oclc.org/NET/ssnx/ssn#> .\n\
@prefix ssne: <http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#> .\n\
@prefix dul: <http://www.loa-cnr.it/ontologies/DUL.owl#> .\n\
@prefix time: <http://www.w3.org/2006/time#> .\n\
@prefix ndbc: <http://marinemetadata.org/2005/08/ndbc_waves#> .\n\
@prefix sw: <http://sweet.jpl.nasa.gov/2.1/sweetAll.owl#> .\n\
@prefix foaf: <http://xmlns.com/foaf/0.1/> .\n\
@prefix admingeo: <http://data.ordnancesurvey.co.uk/ontology/admingeo/> .\n\
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n";

const COLLECTION: &str = "http://waves.example/collections/today";
const SENSOR: &str = "http://waves.example/sensors/pier";

const TEN_O_CLOCK_MS: i64 = 1_306_922_400_000;
const ELEVEN_O_CLOCK_MS: i64 = 1_306_926_000_000;

/// Seeds the document cache so a report builds without touching the network.
/// The SPARQL endpoints stay unroutable, which is what the degradation
/// assertions rely on.
fn seed(cache: &DiskCache, url: &str, body: &str) {
    let entry = CacheEntry::new(format!("{PREFIXES}\n{body}"), Some("text/turtle".to_owned()));
    cache.store("graphite", url, &entry, MaxAge::Forever).unwrap();
}

fn test_config(dir: &TempDir, start: &str) -> SurfcastConfig {
    SurfcastConfig {
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
        start_iri: NamedNode::new(start).unwrap(),
        ..SurfcastConfig::default()
    }
}

/// A wave height observation over `begin..end` with its result chain.
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

fn sensor_doc() -> String {
    format!(
        "<{SENSOR}> a ssn:SensingDevice ;\n\
         \trdfs:label \"Boscombe Pier wave radar\" ;\n\
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
async fn test_collection_report_has_series_and_degraded_extras() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    let collection_doc = format!(
        "<{COLLECTION}> a ssne:ObservationCollection ;\n\
         \tdul:hasMember <http://waves.example/obs/1>, <http://waves.example/obs/2> .\n\
         {obs1}{obs2}",
        obs1 = observation(1, "2011-06-01T09:30:00Z", "2011-06-01T10:00:00Z", 1.2),
        obs2 = observation(2, "2011-06-01T10:30:00Z", "2011-06-01T11:00:00Z", 1.5),
    );
    seed(&cache, COLLECTION, &collection_doc);
    seed(&cache, SENSOR, &sensor_doc());

    let config = test_config(&dir, COLLECTION);
    let report = build_report(&config, &config.start_iri).await.unwrap();

    assert_eq!(report.source, COLLECTION);
    assert_eq!(
        report.series,
        vec![(TEN_O_CLOCK_MS, 1.2), (ELEVEN_O_CLOCK_MS, 1.5)]
    );
    assert_eq!(report.summary.start_ms, TEN_O_CLOCK_MS);
    assert_eq!(report.summary.end_ms, ELEVEN_O_CLOCK_MS);
    assert_eq!(report.summary.max_height, 1.8);
    assert_eq!(report.prev, None);
    assert_eq!(report.next, None);
    assert_eq!(report.mean_wave_height, None);

    assert_eq!(report.sensor.iri, SENSOR);
    assert_eq!(report.sensor.label, "Boscombe Pier wave radar");
    assert!((report.sensor.location.lat - 50.7188).abs() < 1e-9);
    assert!((report.sensor.location.lon + 1.8447).abs() < 1e-9);

    // Everything reachable only over the network degrades quietly.
    assert_eq!(report.place, PlaceNames::default());
    assert_eq!(report.accidents, None);
    assert!(report.peers.is_empty());
    assert_eq!(report.amenities.len(), 9);
    assert!(report.amenities.iter().all(|list| list.places.is_empty()));
    assert_eq!(
        report.amenities.first().map(|list| list.category.as_str()),
        Some("Pubs and bars")
    );
}

#[tokio::test]
async fn test_instants_and_other_properties_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    // obs/1 measures over an instant, obs/3 measures something else; only
    // obs/2 belongs on the chart.
    let collection_doc = format!(
        "<{COLLECTION}> a ssne:ObservationCollection ;\n\
         \tdul:hasMember <http://waves.example/obs/1>, <http://waves.example/obs/2>, \
         <http://waves.example/obs/3> .\n\
         <http://waves.example/obs/1> a ssn:Observation ;\n\
         \tssn:observedProperty ndbc:Wind_Wave_Height ;\n\
         \tssn:observedBy <{SENSOR}> ;\n\
         \tssn:observationResultTime <http://waves.example/times/1> ;\n\
         \tssn:observationResult <http://waves.example/results/1> .\n\
         <http://waves.example/times/1> a time:Instant ;\n\
         \ttime:hasEnd \"2011-06-01T10:00:00Z\"^^xsd:dateTime .\n\
         <http://waves.example/results/1> ssn:hasValue <http://waves.example/values/1> .\n\
         <http://waves.example/values/1> ssne:hasQuantityValue \"1.2\"^^xsd:double .\n\
         <http://waves.example/obs/3> a ssn:Observation ;\n\
         \tssn:observedProperty ndbc:Sea_Surface_Temperature ;\n\
         \tssn:observationResultTime <http://waves.example/times/3> .\n\
         <http://waves.example/times/3> a time:Interval ;\n\
         \ttime:hasEnd \"2011-06-01T11:30:00Z\"^^xsd:dateTime .\n\
         {obs2}",
        obs2 = observation(2, "2011-06-01T10:30:00Z", "2011-06-01T11:00:00Z", 1.5),
    );
    seed(&cache, COLLECTION, &collection_doc);
    seed(&cache, SENSOR, &sensor_doc());

    let config = test_config(&dir, COLLECTION);
    let report = build_report(&config, &config.start_iri).await.unwrap();

    assert_eq!(report.series, vec![(ELEVEN_O_CLOCK_MS, 1.5)]);
    assert_eq!(report.summary.start_ms, ELEVEN_O_CLOCK_MS);
    assert_eq!(report.summary.end_ms, ELEVEN_O_CLOCK_MS);
}

#[tokio::test]
async fn test_pagination_links_come_from_the_edge_observations() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    let collection_doc = format!(
        "<{COLLECTION}> a ssne:ObservationCollection ;\n\
         \tdul:hasMember <http://waves.example/obs/1>, <http://waves.example/obs/2> .\n\
         <http://waves.example/obs/1> dul:directlyFollows <http://waves.example/obs/0> .\n\
         <http://waves.example/obs/2> dul:directlyPrecedes <http://waves.example/obs/3> .\n\
         {obs1}{obs2}",
        obs1 = observation(1, "2011-06-01T09:30:00Z", "2011-06-01T10:00:00Z", 1.2),
        obs2 = observation(2, "2011-06-01T10:30:00Z", "2011-06-01T11:00:00Z", 1.5),
    );
    seed(&cache, COLLECTION, &collection_doc);
    seed(&cache, SENSOR, &sensor_doc());

    let config = test_config(&dir, COLLECTION);
    let report = build_report(&config, &config.start_iri).await.unwrap();

    assert_eq!(report.prev.as_deref(), Some("http://waves.example/obs/0"));
    assert_eq!(report.next.as_deref(), Some("http://waves.example/obs/3"));
}

#[tokio::test]
async fn test_nested_collections_are_walked_once() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    let yesterday = "http://waves.example/collections/yesterday";
    // The two pages link each other, so the walk has a cycle to survive.
    let today_doc = format!(
        "<{COLLECTION}> a ssne:ObservationCollection ;\n\
         \tdul:hasMember <http://waves.example/obs/2> ;\n\
         \tssne:includesCollection <{yesterday}> .\n\
         <{yesterday}> a ssne:ObservationCollection .\n\
         {obs2}",
        obs2 = observation(2, "2011-06-01T10:30:00Z", "2011-06-01T11:00:00Z", 1.5),
    );
    let yesterday_doc = format!(
        "<{yesterday}> a ssne:ObservationCollection ;\n\
         \tdul:hasMember <http://waves.example/obs/1> ;\n\
         \tssne:includesCollection <{COLLECTION}> .\n\
         <{COLLECTION}> a ssne:ObservationCollection .\n\
         {obs1}",
        obs1 = observation(1, "2011-06-01T09:30:00Z", "2011-06-01T10:00:00Z", 1.2),
    );
    seed(&cache, COLLECTION, &today_doc);
    seed(&cache, yesterday, &yesterday_doc);
    seed(&cache, SENSOR, &sensor_doc());

    let config = test_config(&dir, COLLECTION);
    let report = build_report(&config, &config.start_iri).await.unwrap();

    // Both pages contribute, ordered by interval beginning.
    assert_eq!(
        report.series,
        vec![(TEN_O_CLOCK_MS, 1.2), (ELEVEN_O_CLOCK_MS, 1.5)]
    );
}

#[tokio::test]
async fn test_sensor_start_follows_the_wave_height_summary() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    let latest = "http://waves.example/collections/latest";
    let wwh_summary = "http://waves.example/summaries/wwh";
    let period_summary = "http://waves.example/summaries/period";

    // The wave period summary's last observation ends later; the property
    // filter must still route to the wave height summary.
    let start_doc = format!(
        "{sensor}\
         <{wwh_summary}> a ssne:PropertySummary ;\n\
         \tssne:forMeasuredProperty ndbc:Wind_Wave_Height ;\n\
         \tssne:hasLastObservation <http://waves.example/obs/2> .\n\
         <{period_summary}> a ssne:PropertySummary ;\n\
         \tssne:forMeasuredProperty ndbc:Average_Wave_Period ;\n\
         \tssne:hasLastObservation <http://waves.example/obs/period> .\n\
         <http://waves.example/obs/period> ssn:observationResultTime \
         <http://waves.example/times/period> .\n\
         <http://waves.example/times/period> a time:Interval ;\n\
         \ttime:hasEnd \"2011-06-01T12:00:00Z\"^^xsd:dateTime .\n\
         <{latest}> ssne:hasPropertySummary <{wwh_summary}>, <{period_summary}> .\n",
        sensor = sensor_doc(),
    );
    let summary_doc = format!(
        "<{wwh_summary}> ssne:hasLastObservation <http://waves.example/obs/2> ;\n\
         \tssne:hasMeasuredMeanValue \"1.35\"^^xsd:double .\n"
    );
    let obs2_doc = format!(
        "<{latest}> dul:hasMember <http://waves.example/obs/2> .\n{obs2}",
        obs2 = observation(2, "2011-06-01T10:30:00Z", "2011-06-01T11:00:00Z", 1.5),
    );
    let latest_doc = format!(
        "<{latest}> a ssne:ObservationCollection ;\n\
         \tdul:hasMember <http://waves.example/obs/1>, <http://waves.example/obs/2> .\n"
    );
    let obs1_doc = observation(1, "2011-06-01T09:30:00Z", "2011-06-01T10:00:00Z", 1.2);

    seed(&cache, SENSOR, &start_doc);
    seed(&cache, wwh_summary, &summary_doc);
    seed(&cache, "http://waves.example/obs/2", &obs2_doc);
    seed(&cache, latest, &latest_doc);
    seed(&cache, "http://waves.example/obs/1", &obs1_doc);

    let config = test_config(&dir, SENSOR);
    let report = build_report(&config, &config.start_iri).await.unwrap();

    assert_eq!(report.source, SENSOR);
    assert_eq!(
        report.series,
        vec![(TEN_O_CLOCK_MS, 1.2), (ELEVEN_O_CLOCK_MS, 1.5)]
    );
    assert_eq!(report.mean_wave_height, Some(1.35));
    assert_eq!(report.sensor.iri, SENSOR);
}

#[tokio::test]
async fn test_place_names_come_from_the_based_near_feature() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    let feature = "http://waves.example/features/boscombe-beach";
    let collection_doc = format!(
        "<{COLLECTION}> a ssne:ObservationCollection ;\n\
         \tdul:hasMember <http://waves.example/obs/2> .\n\
         {obs2}",
        obs2 = observation(2, "2011-06-01T10:30:00Z", "2011-06-01T11:00:00Z", 1.5),
    );
    let sensor_with_feature = format!("{}<{SENSOR}> foaf:based_near <{feature}> .\n", sensor_doc());
    let feature_doc = format!(
        "<{feature}> rdfs:label \"Boscombe Beach\" ;\n\
         \tadmingeo:inDistrict <http://waves.example/districts/bournemouth> ;\n\
         \tadmingeo:inEuropeanRegion <http://waves.example/regions/south-west> .\n\
         <http://waves.example/districts/bournemouth> rdfs:label \"Bournemouth\" .\n\
         <http://waves.example/regions/south-west> rdfs:label \"South West (UK)\" .\n"
    );
    seed(&cache, COLLECTION, &collection_doc);
    seed(&cache, SENSOR, &sensor_with_feature);
    seed(&cache, feature, &feature_doc);

    let config = test_config(&dir, COLLECTION);
    let report = build_report(&config, &config.start_iri).await.unwrap();

    assert_eq!(report.place.place.as_deref(), Some("Boscombe Beach"));
    assert_eq!(report.place.district.as_deref(), Some("Bournemouth"));
    assert_eq!(
        report.place.european_region.as_deref(),
        Some("South West (UK)")
    );
    // The statistics endpoint is still unreachable.
    assert_eq!(report.accidents, None);
}

#[tokio::test]
async fn test_empty_start_document_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    seed(&cache, COLLECTION, "");

    let config = test_config(&dir, COLLECTION);
    match build_report(&config, &config.start_iri).await {
        Err(AggregateError::NotFound { iri }) => assert_eq!(iri, COLLECTION),
        other => panic!("expected a not-found error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_coordinates_are_a_shape_error() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    let collection_doc = format!(
        "<{COLLECTION}> a ssne:ObservationCollection ;\n\
         \tdul:hasMember <http://waves.example/obs/2> .\n\
         {obs2}",
        obs2 = observation(2, "2011-06-01T10:30:00Z", "2011-06-01T11:00:00Z", 1.5),
    );
    let bare_sensor = format!("<{SENSOR}> a ssn:SensingDevice ;\n\trdfs:label \"No deployment\" .\n");
    seed(&cache, COLLECTION, &collection_doc);
    seed(&cache, SENSOR, &bare_sensor);

    let config = test_config(&dir, COLLECTION);
    match build_report(&config, &config.start_iri).await {
        Err(AggregateError::Shape { iri, missing }) => {
            assert_eq!(iri, SENSOR);
            assert!(missing.contains("coordinates"), "got {missing:?}");
        }
        other => panic!("expected a shape error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_collection_without_observations_is_a_shape_error() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DiskCache::new(dir.path());
    let collection_doc = format!("<{COLLECTION}> a ssne:ObservationCollection .\n");
    seed(&cache, COLLECTION, &collection_doc);

    let config = test_config(&dir, COLLECTION);
    match build_report(&config, &config.start_iri).await {
        Err(AggregateError::Shape { iri, missing }) => {
            assert_eq!(iri, COLLECTION);
            assert!(missing.contains("observations"), "got {missing:?}");
        }
        other => panic!("expected a shape error, got {other:?}"),
    }
}
