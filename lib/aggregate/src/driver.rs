//! The aggregation driver: builds one [`StatusReport`] from linked data.

use std::collections::{HashSet, VecDeque};

use surfcast_client::{DiskCache, Fetcher, MaxAge, Row, RowValue, SparqlClient};
use surfcast_graph::{Resource, Step, Store};
use surfcast_model::vocab::{admingeo, dul, foaf, ndbc, postcode, rdf, rdfs, ssn, ssne, sw, time};
use surfcast_model::NamedNode;
use tracing::{debug, warn};

use crate::amenities::{amenities_from_rows, amenity_query, CATALOGUE};
use crate::config::SurfcastConfig;
use crate::error::AggregateError;
use crate::geo::LatLon;
use crate::report::{
    AccidentFigures, AccidentRates, AmenityList, PeerSensor, PlaceNames, SensorInfo, SeriesSummary,
    StatusReport,
};

/// Builds the full status report for `start_iri`.
///
/// The start IRI may name an observation collection or a sensor; a sensor is
/// resolved to its newest wave height collection first. Failures around the
/// core wave data are fatal, failures in the optional sections degrade to
/// empty sections and a warning in the log.
pub async fn build_report(
    config: &SurfcastConfig,
    start_iri: &NamedNode,
) -> Result<StatusReport, AggregateError> {
    let http = Fetcher::build_http_client(&config.user_agent, config.http_timeout)?;
    let cache = DiskCache::new(config.cache_root.clone());
    build_report_with(config, http, cache, start_iri).await
}

/// Like [`build_report`], but reusing an already built HTTP client and cache.
///
/// The web server constructs both once and shares them across requests.
pub async fn build_report_with(
    config: &SurfcastConfig,
    http: reqwest::Client,
    cache: DiskCache,
    start_iri: &NamedNode,
) -> Result<StatusReport, AggregateError> {
    let fetcher = Fetcher::new(http.clone(), cache.clone());
    let max_age = config.default_max_age;
    let store = Store::new(fetcher.clone(), config.namespaces.clone(), max_age);

    let sensor_endpoint = SparqlClient::new(
        config.endpoints.sensor.clone(),
        config.namespaces.clone(),
        http.clone(),
        cache.clone(),
    );
    let eurostat = SparqlClient::new(
        config.endpoints.eurostat.clone(),
        config.namespaces.clone(),
        http.clone(),
        cache.clone(),
    );
    let ordnance_survey = SparqlClient::new(
        config.endpoints.ordnance_survey.clone(),
        config.namespaces.clone(),
        http.clone(),
        cache.clone(),
    );
    let linked_geo_data = SparqlClient::new(
        config.endpoints.linked_geo_data.clone(),
        config.namespaces.clone(),
        http.clone(),
        cache.clone(),
    );

    if store.load(start_iri).await? == 0 {
        return Err(AggregateError::NotFound {
            iri: start_iri.as_str().to_owned(),
        });
    }

    let start = store.resource(start_iri.clone());
    let (current, top) = resolve_collections(&store, &start).await?;
    let mean_wave_height = summary_mean(&top).await;

    let observations = gather_observations(&current).await;
    if observations.is_empty() {
        return Err(AggregateError::shape(
            current.iri().unwrap_or(start_iri.as_str()),
            "wave height observations",
        ));
    }

    let series: Vec<(i64, f64)> = observations.iter().map(|o| (o.end_ms, o.value)).collect();
    let peak = observations.iter().map(|o| o.value).fold(f64::MIN, f64::max);
    let summary = SeriesSummary {
        start_ms: observations.first().map_or(0, |o| o.end_ms),
        end_ms: observations.last().map_or(0, |o| o.end_ms),
        max_height: (peak * 10.0 * 1.2).ceil() / 10.0,
    };
    let prev = observations.first().and_then(|o| {
        o.observation
            .get(dul::DIRECTLY_FOLLOWS)
            .iri()
            .map(str::to_owned)
    });
    let next = observations.last().and_then(|o| {
        o.observation
            .get(dul::DIRECTLY_PRECEDES)
            .iri()
            .map(str::to_owned)
    });

    let sensor = find_sensor(&observations, start_iri.as_str())?;
    sensor.load().await?;
    let location = sensor_location(&sensor)?;
    let sensor_iri = sensor.iri().unwrap_or_default().to_owned();
    let sensor_info = SensorInfo {
        label: sensor.label().unwrap_or_else(|| sensor_iri.clone()),
        iri: sensor_iri.clone(),
        location,
    };

    let place = place_names(config, &fetcher, &ordnance_survey, &sensor, location, max_age).await;

    let accidents = match place.european_region.as_deref() {
        Some(region) => accident_figures(&eurostat, region, max_age).await,
        None => {
            debug!("no European region name, skipping accident statistics");
            None
        }
    };

    let peers = match sensor_endpoint
        .select(&peers_query(&sensor_iri), max_age)
        .await
    {
        Ok(rows) => peer_sensors(&rows, &sensor_iri),
        Err(error) => {
            warn!(error = %error, "peer sensor lookup failed");
            Vec::new()
        }
    };

    let mut amenities = Vec::new();
    for category in CATALOGUE {
        let places = match linked_geo_data
            .select(&amenity_query(category, location), max_age)
            .await
        {
            Ok(rows) => amenities_from_rows(&rows, location),
            Err(error) => {
                warn!(category = category.label, error = %error, "amenity lookup failed");
                Vec::new()
            }
        };
        amenities.push(AmenityList {
            category: category.label.to_owned(),
            places,
        });
    }

    debug!(
        source = start_iri.as_str(),
        observations = observations.len(),
        "report assembled"
    );
    Ok(StatusReport {
        source: start_iri.as_str().to_owned(),
        series,
        summary,
        prev,
        next,
        mean_wave_height,
        sensor: sensor_info,
        place,
        accidents,
        peers,
        amenities,
    })
}

/// Finds the collection to chart and the collection carrying the summaries.
///
/// Starting from a sensor, the newest wave height summary leads to both via
/// its last observation. Starting anywhere else, the document is expected to
/// describe one observation collection, which plays both roles.
async fn resolve_collections<'g>(
    store: &'g Store,
    start: &Resource<'g>,
) -> Result<(Resource<'g>, Resource<'g>), AggregateError> {
    let start_iri = start.iri().unwrap_or_default().to_owned();
    if !start.is_type(ssn::SENSING_DEVICE) {
        let collection = store
            .all_of_type(ssne::OBSERVATION_COLLECTION)
            .into_iter()
            .next()
            .ok_or_else(|| AggregateError::shape(&start_iri, "an observation collection"))?;
        return Ok((collection.clone(), collection));
    }

    let mut newest: Option<(i64, Resource<'g>, Resource<'g>)> = None;
    for summary in store.all_of_type(ssne::PROPERTY_SUMMARY) {
        if summary.get(ssne::FOR_MEASURED_PROPERTY) != ndbc::WIND_WAVE_HEIGHT {
            continue;
        }
        if let Err(error) = summary.load().await {
            warn!(error = %error, "could not load a property summary");
            continue;
        }
        let last = summary.get(ssne::HAS_LAST_OBSERVATION);
        let Some(end) = observation_end(&last).await else {
            continue;
        };
        if newest.as_ref().map_or(true, |(best, _, _)| end > *best) {
            newest = Some((end, summary, last));
        }
    }
    let Some((_, summary, last)) = newest else {
        return Err(AggregateError::shape(
            &start_iri,
            "a wave height property summary",
        ));
    };

    last.load().await?;
    let current = last.get(Step::backward(dul::HAS_MEMBER));
    if current.is_null() {
        return Err(AggregateError::shape(
            last.iri().unwrap_or_default(),
            "a containing collection",
        ));
    }
    let top = summary.get(Step::backward(ssne::HAS_PROPERTY_SUMMARY));
    if top.is_null() {
        return Err(AggregateError::shape(
            summary.iri().unwrap_or_default(),
            "a collection linking the summary",
        ));
    }
    Ok((current, top))
}

/// End instant of an observation's result interval, dereferencing the
/// observation when the interval is not in the graph yet.
async fn observation_end(observation: &Resource<'_>) -> Option<i64> {
    let end = interval_end(observation);
    if end.is_some() {
        return end;
    }
    if let Err(error) = observation.load().await {
        warn!(error = %error, "could not load an observation");
        return None;
    }
    interval_end(observation)
}

fn interval_end(observation: &Resource<'_>) -> Option<i64> {
    observation
        .get(ssn::OBSERVATION_RESULT_TIME)
        .get(time::HAS_END)
        .epoch_seconds()
}

/// Mean wave height from the collection's property summary, if readable.
async fn summary_mean(top: &Resource<'_>) -> Option<f64> {
    for summary in top.all([Step::from(ssne::HAS_PROPERTY_SUMMARY)]) {
        if summary.get(ssne::FOR_MEASURED_PROPERTY).is_null() {
            if let Err(error) = summary.load().await {
                warn!(error = %error, "could not load a property summary");
                continue;
            }
        }
        if summary.get(ssne::FOR_MEASURED_PROPERTY) != ndbc::WIND_WAVE_HEIGHT {
            continue;
        }
        if summary.get(ssne::HAS_MEASURED_MEAN_VALUE).is_null() {
            if let Err(error) = summary.load().await {
                warn!(error = %error, "could not load a property summary");
                continue;
            }
        }
        return summary.get(ssne::HAS_MEASURED_MEAN_VALUE).as_f64();
    }
    None
}

/// One observation ready for charting.
struct Gathered<'g> {
    observation: Resource<'g>,
    /// Interval beginning, falling back to the end, as the sort key.
    order_key: i64,
    end_ms: i64,
    value: f64,
}

/// Walks the collection tree breadth-first and collects every wave height
/// observation with a usable interval and value, in time order.
///
/// Collections link observations with `dul:hasMember` and nested pages with
/// `ssne:includesCollection`; both are followed. Members without a known
/// type are dereferenced once, nested collections are loaded on first visit,
/// and a visited set keeps cyclic links from looping the walk.
async fn gather_observations<'g>(root: &Resource<'g>) -> Vec<Gathered<'g>> {
    if let Err(error) = root.load().await {
        warn!(error = %error, "could not load the observation collection");
    }
    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();
    if let Some(term) = root.term() {
        visited.insert(term.clone());
    }
    queue.push_back(root.clone());

    let mut found = Vec::new();
    while let Some(collection) = queue.pop_front() {
        for member in collection.all([
            Step::from(dul::HAS_MEMBER),
            Step::from(ssne::INCLUDES_COLLECTION),
        ]) {
            if member.get(rdf::TYPE).is_null() {
                if let Err(error) = member.load().await {
                    warn!(error = %error, "could not load a collection member");
                    continue;
                }
            }
            if member.is_type(ssn::OBSERVATION) {
                if let Some(gathered) = classify(member).await {
                    found.push(gathered);
                }
            } else if member.is_type(ssne::OBSERVATION_COLLECTION) {
                let Some(term) = member.term() else {
                    continue;
                };
                if !visited.insert(term.clone()) {
                    continue;
                }
                if let Err(error) = member.load().await {
                    warn!(error = %error, "could not load a nested collection");
                    continue;
                }
                queue.push_back(member);
            }
            // Members of any other type are someone else's data.
        }
    }
    found.sort_by_key(|o| (o.order_key, o.end_ms));
    found
}

/// Filters one member observation down to chartable data.
///
/// Anything that is not a wave height observation over a time interval is
/// skipped, as are observations with an unreadable end instant or value.
async fn classify(observation: Resource<'_>) -> Option<Gathered<'_>> {
    if observation.get(ssn::OBSERVED_PROPERTY).is_null()
        || observation.get(ssn::OBSERVATION_RESULT_TIME).is_null()
    {
        if let Err(error) = observation.load().await {
            warn!(error = %error, "could not load an observation");
            return None;
        }
    }
    if observation.get(ssn::OBSERVED_PROPERTY) != ndbc::WIND_WAVE_HEIGHT {
        return None;
    }
    let result_time = observation.get(ssn::OBSERVATION_RESULT_TIME);
    if !result_time.is_type(time::INTERVAL) {
        debug!(?observation, "result time is not an interval, skipping");
        return None;
    }
    let Some(end) = result_time.get(time::HAS_END).epoch_seconds() else {
        warn!(?observation, "observation interval has no readable end");
        return None;
    };
    let begin = result_time.get(time::HAS_BEGINNING).epoch_seconds();
    let Some(value) = observation
        .get(ssn::OBSERVATION_RESULT)
        .get(ssn::HAS_VALUE)
        .get(ssne::HAS_QUANTITY_VALUE)
        .as_f64()
    else {
        warn!(?observation, "observation has no readable value");
        return None;
    };
    Some(Gathered {
        observation,
        order_key: begin.unwrap_or(end),
        end_ms: end * 1000,
        value,
    })
}

/// The sensor behind the observations: the first non-null `ssn:observedBy`.
fn find_sensor<'g>(
    observations: &[Gathered<'g>],
    source: &str,
) -> Result<Resource<'g>, AggregateError> {
    observations
        .iter()
        .map(|o| o.observation.get(ssn::OBSERVED_BY))
        .find(|sensor| !sensor.is_null())
        .ok_or_else(|| AggregateError::shape(source, "an observing sensor"))
}

/// Coordinates from the sensor's deployment platform. Latitude sits in
/// `coordinate2`, longitude in `coordinate1`.
fn sensor_location(sensor: &Resource<'_>) -> Result<LatLon, AggregateError> {
    let location = sensor
        .get(ssn::HAS_DEPLOYMENT)
        .get(ssn::DEPLOYED_ON_PLATFORM)
        .get(sw::HAS_LOCATION);
    let lat = location
        .get(sw::COORDINATE_2)
        .get(sw::HAS_NUMERIC_VALUE)
        .as_f64();
    let lon = location
        .get(sw::COORDINATE_1)
        .get(sw::HAS_NUMERIC_VALUE)
        .as_f64();
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(LatLon { lat, lon }),
        _ => Err(AggregateError::shape(
            sensor.iri().unwrap_or_default(),
            "deployment coordinates",
        )),
    }
}

/// Resolves human-readable names for where the sensor sits.
///
/// The sensor's `foaf:based_near` feature is preferred; gaps are filled by a
/// reverse postcode lookup whose district feeds the administrative geography
/// endpoint. Every failure here degrades to an absent name.
async fn place_names(
    config: &SurfcastConfig,
    fetcher: &Fetcher,
    ordnance_survey: &SparqlClient,
    sensor: &Resource<'_>,
    location: LatLon,
    max_age: MaxAge,
) -> PlaceNames {
    let mut names = PlaceNames::default();

    let near = sensor.get(foaf::BASED_NEAR);
    if !near.is_null() {
        if let Err(error) = near.load().await {
            warn!(error = %error, "could not load the based_near feature");
        }
        names.place = near.label();
        names.district = loaded_label(&near.get(admingeo::IN_DISTRICT)).await;
        names.european_region = loaded_label(&near.get(admingeo::IN_EUROPEAN_REGION)).await;
    }

    if names.district.is_none() || names.european_region.is_none() {
        postcode_fallback(config, fetcher, ordnance_survey, location, max_age, &mut names).await;
    }
    if names.place.is_none() {
        names.place = names.district.clone();
    }
    names
}

/// A label for `resource`, dereferencing it first when none is in the graph.
async fn loaded_label(resource: &Resource<'_>) -> Option<String> {
    if resource.is_null() {
        return None;
    }
    if resource.get(rdfs::LABEL).is_null() {
        if let Err(error) = resource.load().await {
            warn!(error = %error, "could not load a label source");
        }
    }
    resource.label()
}

/// Reverse geocoding via the postcode service: the document for the
/// coordinates names a postcode unit whose district the administrative
/// geography endpoint can label.
///
/// The postcode document and its `owl:sameAs` aliases go into their own
/// store, keeping the alias walk away from the observation data.
async fn postcode_fallback(
    config: &SurfcastConfig,
    fetcher: &Fetcher,
    ordnance_survey: &SparqlClient,
    location: LatLon,
    max_age: MaxAge,
    names: &mut PlaceNames,
) {
    let url = config.postcode_url(location);
    let postcode_iri = match NamedNode::new(url) {
        Ok(iri) => iri,
        Err(error) => {
            warn!(error = %error, "postcode URL is not a valid IRI");
            return;
        }
    };
    let postcodes = Store::new(fetcher.clone(), config.namespaces.clone(), max_age);
    if let Err(error) = postcodes.load(&postcode_iri).await {
        warn!(error = %error, "postcode lookup failed");
        return;
    }
    for subject in postcodes.subjects() {
        if let Err(error) = subject.load_same_as().await {
            warn!(error = %error, "could not follow a sameAs alias");
        }
    }
    let Some(unit) = postcodes
        .all_of_type(postcode::POSTCODE_UNIT)
        .into_iter()
        .next()
    else {
        warn!("no postcode unit near the sensor");
        return;
    };
    let Some(district_iri) = unit.get(postcode::DISTRICT).iri().map(str::to_owned) else {
        warn!("postcode unit has no district");
        return;
    };

    let query = format!(
        "SELECT ?euroLabel ?distLabel WHERE {{\n\
         \t<{district_iri}> rdfs:label ?distLabel ;\n\
         \t\tadmingeo:inEuropeanRegion ?euroRegion .\n\
         \t?euroRegion rdfs:label ?euroLabel .\n\
         }}"
    );
    match ordnance_survey.select_row(&query, max_age).await {
        Ok(Some(row)) => {
            if names.district.is_none() {
                names.district = row.get("distLabel").map(|value| value.as_str().to_owned());
            }
            if names.european_region.is_none() {
                names.european_region = row.get("euroLabel").map(|value| value.as_str().to_owned());
            }
        }
        Ok(None) => warn!(
            district = district_iri,
            "district has no administrative geography"
        ),
        Err(error) => warn!(error = %error, "administrative geography lookup failed"),
    }
}

/// Road accident rates for the region set against the national mean.
///
/// Any gap in the statistics degrades to no accident section at all.
async fn accident_figures(
    eurostat: &SparqlClient,
    region_name: &str,
    max_age: MaxAge,
) -> Option<AccidentFigures> {
    let national_query = format!(
        "SELECT DISTINCT ?region ?injured ?killed ?population WHERE {{\n\
         \t?ourregion a eurostat:regions ;\n\
         \t\teurostat:name \"{name}\" ;\n\
         \t\teurostat:parentcountry ?country .\n\
         \t?region a eurostat:regions ;\n\
         \t\teurostat:parentcountry ?country ;\n\
         \t\teurostat:population_total ?population ;\n\
         \t\teurostat:injured_in_road_accidents ?injured ;\n\
         \t\teurostat:killed_in_road_accidents ?killed .\n\
         }}",
        name = escape_literal(region_name),
    );
    let national_rows = match eurostat.select(&national_query, max_age).await {
        Ok(rows) => rows,
        Err(error) => {
            warn!(error = %error, "national accident statistics lookup failed");
            return None;
        }
    };
    let Some(national) = national_average(&national_rows) else {
        warn!("no usable national accident rows");
        return None;
    };

    let regional_query = format!(
        "SELECT ?injuredtotal ?killedtotal ?population WHERE {{\n\
         \t?region a eurostat:regions ;\n\
         \t\teurostat:name \"{name}\" ;\n\
         \t\teurostat:population_total ?population ;\n\
         \t\teurostat:injured_in_road_accidents ?injuredtotal ;\n\
         \t\teurostat:killed_in_road_accidents ?killedtotal .\n\
         }}",
        name = escape_literal(region_name),
    );
    let row = match eurostat.select_row(&regional_query, max_age).await {
        Ok(Some(row)) => row,
        Ok(None) => {
            warn!(region = region_name, "no regional accident statistics");
            return None;
        }
        Err(error) => {
            warn!(error = %error, "regional accident statistics lookup failed");
            return None;
        }
    };
    let Some(region) = regional_rates(&row) else {
        warn!(region = region_name, "unusable regional accident row");
        return None;
    };

    let injured_deviation_pct = deviation_pct(region.injured, national.injured)?;
    let killed_deviation_pct = deviation_pct(region.killed, national.killed)?;
    Some(AccidentFigures {
        region,
        national,
        injured_deviation_pct,
        killed_deviation_pct,
    })
}

/// Mean casualty rates over every distinct region of the country.
fn national_average(rows: &[Row]) -> Option<AccidentRates> {
    let mut seen = HashSet::new();
    let mut injured_sum = 0.0;
    let mut killed_sum = 0.0;
    let mut count = 0u32;
    for row in rows {
        let Some(region) = row.get("region").map(RowValue::as_str) else {
            continue;
        };
        if !seen.insert(region.to_owned()) {
            continue;
        }
        let Some(rates) = casualty_rates(row, "injured", "killed") else {
            continue;
        };
        injured_sum += rates.injured;
        killed_sum += rates.killed;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(AccidentRates {
        injured: injured_sum / f64::from(count),
        killed: killed_sum / f64::from(count),
    })
}

fn regional_rates(row: &Row) -> Option<AccidentRates> {
    casualty_rates(row, "injuredtotal", "killedtotal")
}

/// Casualties per head from one row, guarding the division.
fn casualty_rates(row: &Row, injured_key: &str, killed_key: &str) -> Option<AccidentRates> {
    let population = row.get("population")?.as_f64()?;
    if population <= 0.0 {
        return None;
    }
    let injured = row.get(injured_key)?.as_f64()?;
    let killed = row.get(killed_key)?.as_f64()?;
    Some(AccidentRates {
        injured: injured / population,
        killed: killed / population,
    })
}

/// Signed percentage deviation of `value` from `baseline`.
fn deviation_pct(value: f64, baseline: f64) -> Option<f64> {
    let pct = 100.0 * (value - baseline) / baseline;
    pct.is_finite().then_some(pct)
}

/// Escapes a string for embedding in a double-quoted SPARQL literal.
fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn peers_query(sensor_iri: &str) -> String {
    format!(
        "SELECT DISTINCT ?sensor ?sensorname WHERE {{\n\
         \t?obs a ssn:Observation ;\n\
         \t\tssn:observedProperty <{property}> ;\n\
         \t\tssn:observedBy ?sensor .\n\
         \tOPTIONAL {{ ?sensor rdfs:label ?sensorname . }}\n\
         \tFILTER (?sensor != <{sensor_iri}>)\n\
         }}",
        property = ndbc::WIND_WAVE_HEIGHT.as_str(),
    )
}

/// One entry per distinct peer IRI; a missing label falls back to the IRI
/// tail.
fn peer_sensors(rows: &[Row], current: &str) -> Vec<PeerSensor> {
    let mut seen = HashSet::new();
    let mut peers = Vec::new();
    for row in rows {
        let Some(iri) = row.get("sensor").and_then(RowValue::iri) else {
            continue;
        };
        if iri == current || !seen.insert(iri.to_owned()) {
            continue;
        }
        let name = row.get("sensorname").map_or_else(
            || iri_tail(iri).to_owned(),
            |value| value.as_str().to_owned(),
        );
        peers.push(PeerSensor {
            iri: iri.to_owned(),
            name,
        });
    }
    peers
}

/// The last path or fragment segment of an IRI, for resources without
/// labels.
fn iri_tail(iri: &str) -> &str {
    let trimmed = iri.trim_end_matches(['/', '#']);
    trimmed.rsplit(['/', '#']).next().unwrap_or(trimmed)
}
