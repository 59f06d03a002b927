mod amenities;
mod config;
mod driver;
mod error;
mod geo;
mod report;

pub use amenities::{amenities_from_rows, amenity_query, AmenityCategory, CATALOGUE};
pub use config::{Endpoints, SurfcastConfig, DEFAULT_START_IRI};
pub use driver::{build_report, build_report_with};
pub use error::AggregateError;
pub use geo::{distance_km, parse_point, LatLon, EARTH_RADIUS_KM};
pub use report::{
    AccidentFigures, AccidentRates, Amenity, AmenityList, PeerSensor, PlaceNames, SensorInfo,
    SeriesSummary, StatusReport,
};
