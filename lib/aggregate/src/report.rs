//! The assembled status report and its section types.
//!
//! Everything here is plain serializable data. Option-valued and list-valued
//! sections are the ones allowed to degrade when an upstream source is down.

use serde::Serialize;

use crate::geo::LatLon;

/// One page of wave height observations with everything shown around it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    /// The collection IRI this report was built from.
    pub source: String,
    /// Wave height samples as `(epoch milliseconds, metres)`, ascending.
    pub series: Vec<(i64, f64)>,
    pub summary: SeriesSummary,
    /// Collection holding the page of earlier observations, if linked.
    pub prev: Option<String>,
    /// Collection holding the page of later observations, if linked.
    pub next: Option<String>,
    /// Mean wave height from the collection's property summary.
    pub mean_wave_height: Option<f64>,
    pub sensor: SensorInfo,
    pub place: PlaceNames,
    pub accidents: Option<AccidentFigures>,
    pub peers: Vec<PeerSensor>,
    pub amenities: Vec<AmenityList>,
}

/// Chart framing derived from the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub start_ms: i64,
    pub end_ms: i64,
    /// Y axis ceiling: the peak value padded by a fifth and rounded up to
    /// the next tenth.
    pub max_height: f64,
}

/// The sensor the observations came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorInfo {
    pub iri: String,
    pub label: String,
    pub location: LatLon,
}

/// Human-readable names for where the sensor sits.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaceNames {
    pub place: Option<String>,
    pub district: Option<String>,
    pub european_region: Option<String>,
}

/// Road accident casualties per head of population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccidentRates {
    pub injured: f64,
    pub killed: f64,
}

/// Regional accident rates against the national average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccidentFigures {
    pub region: AccidentRates,
    pub national: AccidentRates,
    /// Signed percentage the region deviates from the national injury rate.
    pub injured_deviation_pct: f64,
    /// Signed percentage the region deviates from the national fatality rate.
    pub killed_deviation_pct: f64,
}

/// Another sensor observing the same property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerSensor {
    pub iri: String,
    pub name: String,
}

/// One amenity category with its matches, nearest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmenityList {
    pub category: String,
    pub places: Vec<Amenity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Amenity {
    pub iri: String,
    pub name: String,
    pub location: LatLon,
    pub distance_km: f64,
}
