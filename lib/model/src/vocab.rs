//! Vocabularies used by the surfcast aggregation pipeline.

/// [RDF](https://www.w3.org/TR/rdf11-concepts/) vocabulary.
pub mod rdf {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// The subject is an instance of a class.
    pub const TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
}

/// [RDFS](https://www.w3.org/TR/rdf-schema/) vocabulary.
pub mod rdfs {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// A human-readable name for the subject.
    pub const LABEL: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#label");
}

/// [OWL](https://www.w3.org/TR/owl2-overview/) vocabulary.
pub mod owl {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";

    /// The two subjects denote the same resource.
    pub const SAME_AS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#sameAs");
}

/// [XML Schema datatypes](https://www.w3.org/TR/xmlschema11-2/).
pub mod xsd {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

    pub const DATE_TIME: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#dateTime");
    pub const DOUBLE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#double");
    pub const STRING: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#string");
}

/// [OWL-Time](https://www.w3.org/TR/owl-time/) vocabulary.
pub mod time {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/2006/time#";

    pub const INTERVAL: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#Interval");
    pub const INSTANT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#Instant");
    pub const HAS_BEGINNING: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#hasBeginning");
    pub const HAS_END: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/time#hasEnd");
}

/// [Semantic Sensor Network](https://www.w3.org/2005/Incubator/ssn/ssnx/ssn)
/// ontology.
pub mod ssn {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://purl.oclc.org/NET/ssnx/ssn#";

    pub const OBSERVATION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.oclc.org/NET/ssnx/ssn#Observation");
    pub const SENSING_DEVICE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.oclc.org/NET/ssnx/ssn#SensingDevice");
    pub const OBSERVED_PROPERTY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.oclc.org/NET/ssnx/ssn#observedProperty");
    pub const OBSERVATION_RESULT_TIME: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.oclc.org/NET/ssnx/ssn#observationResultTime");
    pub const OBSERVATION_RESULT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.oclc.org/NET/ssnx/ssn#observationResult");
    pub const OBSERVED_BY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.oclc.org/NET/ssnx/ssn#observedBy");
    pub const HAS_DEPLOYMENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.oclc.org/NET/ssnx/ssn#hasDeployment");
    pub const DEPLOYED_ON_PLATFORM: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.oclc.org/NET/ssnx/ssn#deployedOnPlatform");
    pub const HAS_VALUE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.oclc.org/NET/ssnx/ssn#hasValue");
}

/// SemsorGrid4Env extension of the SSN ontology: observation collections and
/// per-property summaries.
pub mod ssne {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#";

    /// Tree node grouping observations and nested collections.
    pub const OBSERVATION_COLLECTION: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#ObservationCollection",
    );
    /// Min/max/mean/last roll-up of a collection for one measured property.
    pub const PROPERTY_SUMMARY: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#PropertySummary",
    );
    pub const HAS_PROPERTY_SUMMARY: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#hasPropertySummary",
    );
    pub const FOR_MEASURED_PROPERTY: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#forMeasuredProperty",
    );
    pub const HAS_LAST_OBSERVATION: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#hasLastObservation",
    );
    pub const HAS_MAX_OBSERVATION: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#hasMaxObservation",
    );
    pub const HAS_MIN_OBSERVATION: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#hasMinObservation",
    );
    pub const HAS_MEASURED_MEAN_VALUE: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#hasMeasuredMeanValue",
    );
    pub const COVERS_TEMPORAL_INTERVAL: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#coversTemporalInterval",
    );
    pub const INCLUDES_COLLECTION: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#includesCollection",
    );
    pub const HAS_QUANTITY_VALUE: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://www.semsorgrid4env.eu/ontologies/SsnExtension.owl#hasQuantityValue",
    );
}

/// DOLCE ultralite upper ontology, as referenced by the SSN ontology.
pub mod dul {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.loa-cnr.it/ontologies/DUL.owl#";

    pub const HAS_MEMBER: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.loa-cnr.it/ontologies/DUL.owl#hasMember");
    /// Links an observation to its predecessor in time.
    pub const DIRECTLY_FOLLOWS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.loa-cnr.it/ontologies/DUL.owl#directlyFollows");
    /// Links an observation to its successor in time.
    pub const DIRECTLY_PRECEDES: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.loa-cnr.it/ontologies/DUL.owl#directlyPrecedes");
}

/// NASA SWEET ontology, used by the sensor deployment descriptions.
pub mod sw {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://sweet.jpl.nasa.gov/2.1/sweetAll.owl#";

    pub const HAS_LOCATION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://sweet.jpl.nasa.gov/2.1/sweetAll.owl#hasLocation");
    /// Longitude of a location.
    pub const COORDINATE_1: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://sweet.jpl.nasa.gov/2.1/sweetAll.owl#coordinate1");
    /// Latitude of a location.
    pub const COORDINATE_2: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://sweet.jpl.nasa.gov/2.1/sweetAll.owl#coordinate2");
    pub const HAS_NUMERIC_VALUE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://sweet.jpl.nasa.gov/2.1/sweetAll.owl#hasNumericValue");
}

/// [FOAF](http://xmlns.com/foaf/spec/) vocabulary.
pub mod foaf {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://xmlns.com/foaf/0.1/";

    pub const BASED_NEAR: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/based_near");
}

/// W3C WGS84 geo positioning vocabulary.
pub mod geo {
    pub const NAMESPACE: &str = "http://www.w3.org/2003/01/geo/wgs84_pos#";
}

/// Ordnance Survey administrative geography ontology.
pub mod admingeo {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://data.ordnancesurvey.co.uk/ontology/admingeo/";

    pub const IN_DISTRICT: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://data.ordnancesurvey.co.uk/ontology/admingeo/inDistrict",
    );
    pub const IN_EUROPEAN_REGION: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://data.ordnancesurvey.co.uk/ontology/admingeo/inEuropeanRegion",
    );
}

/// Ordnance Survey postcode ontology.
pub mod postcode {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://data.ordnancesurvey.co.uk/ontology/postcode/";

    pub const POSTCODE_UNIT: NamedNodeRef<'static> = NamedNodeRef::new_unchecked(
        "http://data.ordnancesurvey.co.uk/ontology/postcode/PostcodeUnit",
    );
    pub const DISTRICT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://data.ordnancesurvey.co.uk/ontology/postcode/district");
}

/// LinkedGeoData ontology.
pub mod lgdo {
    pub const NAMESPACE: &str = "http://linkedgeodata.org/ontology/";
}

/// Eurostat RDF wrapper published by FU Berlin.
pub mod eurostat {
    pub const NAMESPACE: &str = "http://www4.wiwiss.fu-berlin.de/eurostat/resource/eurostat/";
}

/// NDBC wave measurement definitions from marinemetadata.org.
pub mod ndbc {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://marinemetadata.org/2005/08/ndbc_waves#";

    /// The one observed property this service reports on.
    pub const WIND_WAVE_HEIGHT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://marinemetadata.org/2005/08/ndbc_waves#Wind_Wave_Height");
}
