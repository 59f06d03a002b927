use std::path::PathBuf;
use std::time::Duration;

use surfcast_client::MaxAge;
use surfcast_model::{NamedNode, NamespaceMap};

use crate::geo::LatLon;

/// Observation collection the dashboard lands on when no IRI is given.
pub const DEFAULT_START_IRI: &str =
    "http://id.semsorgrid.ecs.soton.ac.uk/observations/cco/boscombe/Hs/latest";

/// SPARQL endpoints the aggregation talks to.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Endpoint holding the sensor network's observations.
    pub sensor: String,
    /// Eurostat wrapper with per-region accident statistics.
    pub eurostat: String,
    /// Ordnance Survey administrative geography.
    pub ordnance_survey: String,
    /// LinkedGeoData for nearby amenities.
    pub linked_geo_data: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            sensor: "http://semsorgrid.ecs.soton.ac.uk:8000/sparql/".to_owned(),
            eurostat: "http://www4.wiwiss.fu-berlin.de/eurostat/sparql".to_owned(),
            ordnance_survey: "http://api.talis.com/stores/ordnance-survey/services/sparql"
                .to_owned(),
            linked_geo_data: "http://linkedgeodata.org/sparql/".to_owned(),
        }
    }
}

/// Everything a report build needs to know about the outside world.
#[derive(Debug, Clone)]
pub struct SurfcastConfig {
    /// Directory the response cache lives under.
    pub cache_root: PathBuf,
    /// Cache policy applied to documents and query results alike.
    pub default_max_age: MaxAge,
    pub endpoints: Endpoints,
    /// Reverse geocoding URL with `{lat}` and `{lon}` placeholders.
    pub postcode_url_template: String,
    pub namespaces: NamespaceMap,
    pub user_agent: String,
    pub http_timeout: Duration,
    pub start_iri: NamedNode,
}

impl Default for SurfcastConfig {
    fn default() -> Self {
        Self {
            cache_root: PathBuf::from("cache"),
            default_max_age: MaxAge::Seconds(86400),
            endpoints: Endpoints::default(),
            postcode_url_template: "http://www.uk-postcodes.com/latlng/{lat},{lon}.rdf".to_owned(),
            namespaces: NamespaceMap::surfcast(),
            user_agent: concat!("surfcast/", env!("CARGO_PKG_VERSION")).to_owned(),
            http_timeout: Duration::from_secs(30),
            start_iri: NamedNode::new_unchecked(DEFAULT_START_IRI),
        }
    }
}

impl SurfcastConfig {
    /// The reverse geocoding URL for a coordinate pair.
    pub fn postcode_url(&self, location: LatLon) -> String {
        self.postcode_url_template
            .replace("{lat}", &location.lat.to_string())
            .replace("{lon}", &location.lon.to_string())
    }
}
