//! Nearby amenity lookup against LinkedGeoData.

use std::collections::HashMap;

use surfcast_client::{Row, RowValue};

use crate::geo::{distance_km, parse_point, LatLon};
use crate::report::Amenity;

/// One amenity category on the page: a label, a search radius and the
/// LinkedGeoData classes whose instances count as members.
#[derive(Debug, Clone, Copy)]
pub struct AmenityCategory {
    pub label: &'static str,
    pub radius_km: f64,
    pub classes: &'static [&'static str],
}

/// Categories in page order. Walkable things get a 3 km radius, things worth
/// a drive get 5 km.
pub const CATALOGUE: &[AmenityCategory] = &[
    AmenityCategory {
        label: "Pubs and bars",
        radius_km: 3.0,
        classes: &["lgdo:Pub", "lgdo:Bar"],
    },
    AmenityCategory {
        label: "Cafés",
        radius_km: 3.0,
        classes: &["lgdo:CoffeeShop", "lgdo:Cafe", "lgdo:InternetCafe"],
    },
    AmenityCategory {
        label: "Restaurants and fast food",
        radius_km: 3.0,
        classes: &[
            "lgdo:Restaurant",
            "lgdo:FastFood",
            "lgdo:Barbeque",
            "lgdo:IceCream",
        ],
    },
    AmenityCategory {
        label: "Food and drink shops",
        radius_km: 3.0,
        classes: &[
            "lgdo:Shops",
            "lgdo:Shop",
            "lgdo:Shopping",
            "lgdo:Supermarket",
            "lgdo:Bakery",
            "lgdo:Marketplace",
            "lgdo:PublicMarket",
            "lgdo:TakeAway",
            "lgdo:DrinkingWater",
            "lgdo:WaterFountain",
            "lgdo:WaterWell",
        ],
    },
    AmenityCategory {
        label: "Car parks",
        radius_km: 5.0,
        classes: &["lgdo:Parking", "lgdo:MotorcycleParking", "lgdo:BicycleParking"],
    },
    AmenityCategory {
        label: "Accommodation",
        radius_km: 5.0,
        classes: &["lgdo:Hotel", "lgdo:Campsite"],
    },
    AmenityCategory {
        label: "Transport",
        radius_km: 5.0,
        classes: &[
            "lgdo:FerryTerminal",
            "lgdo:Fuel",
            "lgdo:BicycleRental",
            "lgdo:BusStation",
            "lgdo:Taxi",
            "lgdo:CarRental",
            "lgdo:SkiRental",
            "lgdo:Airport",
            "lgdo:CarSharing",
        ],
    },
    AmenityCategory {
        label: "Health",
        radius_km: 5.0,
        classes: &["lgdo:Hospital", "lgdo:Doctor", "lgdo:Doctors"],
    },
    AmenityCategory {
        label: "Conveniences",
        radius_km: 5.0,
        classes: &[
            "lgdo:Toilets",
            "lgdo:Telephone",
            "lgdo:EmergencyTelephone",
            "lgdo:Bank",
            "lgdo:ATM",
            "lgdo:Atm",
            "lgdo:Internet",
            "lgdo:InternetCafe",
            "lgdo:InternetAccess",
            "lgdo:Shower",
            "lgdo:Showers",
            "lgdo:PostBox",
            "lgdo:PostOffice",
        ],
    },
];

/// The LinkedGeoData query for one category around a point.
///
/// Spatial filtering uses Virtuoso's `bif:st_intersects` built-in, which
/// takes a geometry column, a point and a radius in kilometres. WKT points
/// put longitude first.
pub fn amenity_query(category: &AmenityCategory, around: LatLon) -> String {
    let classes = category
        .classes
        .iter()
        .map(|class| format!("{{ ?place a {class} . }}"))
        .collect::<Vec<_>>()
        .join(" UNION ");
    format!(
        "SELECT * WHERE {{\n\
         \t{classes}\n\
         \t?place a ?type ;\n\
         \t\tgeo:geometry ?placegeo ;\n\
         \t\trdfs:label ?placename .\n\
         \tFILTER(<bif:st_intersects> (?placegeo, <bif:st_point> ({lon}, {lat}), {radius})) .\n\
         }}",
        lon = around.lon,
        lat = around.lat,
        radius = category.radius_km,
    )
}

/// Collapses result rows into one amenity per place, nearest first.
///
/// A place matching several classes comes back as several rows; later rows
/// replace earlier ones. Rows without a parseable geometry are dropped.
pub fn amenities_from_rows(rows: &[Row], origin: LatLon) -> Vec<Amenity> {
    let mut by_place: HashMap<String, Amenity> = HashMap::new();
    for row in rows {
        let Some(iri) = row.get("place").and_then(RowValue::iri) else {
            continue;
        };
        let Some(name) = row.get("placename") else {
            continue;
        };
        let Some(location) = row.get("placegeo").and_then(|geo| parse_point(geo.as_str())) else {
            continue;
        };
        by_place.insert(
            iri.to_owned(),
            Amenity {
                iri: iri.to_owned(),
                name: name.as_str().to_owned(),
                location,
                distance_km: distance_km(origin, location),
            },
        );
    }
    let mut places: Vec<Amenity> = by_place.into_values().collect();
    places.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    places
}
