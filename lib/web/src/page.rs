//! The status page: server-rendered HTML, or chart data as JSON.

use std::fmt::Write;

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Json, Response};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use surfcast_aggregate::{build_report_with, StatusReport};
use surfcast_model::NamedNode;

use crate::error::ServerError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct PageParams {
    /// Start IRI override.
    uri: Option<String>,
    /// Present with any value: respond with chart data instead of the page.
    chart: Option<String>,
}

/// Body of the chart data response.
#[derive(Debug, Serialize)]
pub(crate) struct ChartPayload {
    /// `[epoch milliseconds, metres]` pairs, ascending.
    data: Vec<(i64, f64)>,
    source: String,
    prev: Option<String>,
    next: Option<String>,
}

pub(crate) enum PageResponse {
    Page(Html<String>),
    Chart(Json<ChartPayload>),
}

impl IntoResponse for PageResponse {
    fn into_response(self) -> Response {
        match self {
            PageResponse::Page(html) => html.into_response(),
            PageResponse::Chart(json) => json.into_response(),
        }
    }
}

pub(crate) async fn status_page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<PageResponse, ServerError> {
    let start_iri = match params.uri {
        Some(uri) => NamedNode::new(&uri)
            .map_err(|error| ServerError::BadRequest(format!("invalid start IRI {uri}: {error}")))?,
        None => state.config.start_iri.clone(),
    };

    let report = build_report_with(
        &state.config,
        state.http.clone(),
        state.cache.clone(),
        &start_iri,
    )
    .await?;

    if params.chart.is_some() {
        Ok(PageResponse::Chart(Json(ChartPayload {
            data: report.series,
            source: report.source,
            prev: report.prev,
            next: report.next,
        })))
    } else {
        let body = render(&report).map_err(|error| ServerError::Internal(error.into()))?;
        Ok(PageResponse::Page(Html(body)))
    }
}

/// Renders the report as a plain HTML page.
///
/// Writing into a `String` cannot actually fail, the `fmt::Result` is only
/// plumbing for the `write!` calls.
fn render(report: &StatusReport) -> Result<String, std::fmt::Error> {
    let title = escape(
        report
            .place
            .place
            .as_deref()
            .unwrap_or(&report.sensor.label),
    );

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    writeln!(page, "<title>{title} surf status</title>")?;
    page.push_str("</head>\n<body>\n");
    writeln!(page, "<h1>{title} surf status</h1>")?;

    page.push_str("<h2>Sensor data</h2>\n<dl>\n");
    let sensor_iri = escape(&report.sensor.iri);
    writeln!(
        page,
        "<dt>Sensor</dt>\n<dd>{} <a href=\"{sensor_iri}\">{sensor_iri}</a></dd>",
        escape(&report.sensor.label)
    )?;
    writeln!(
        page,
        "<dt>Coordinates</dt>\n<dd>{}, {}</dd>",
        report.sensor.location.lat, report.sensor.location.lon
    )?;
    if let Some(district) = &report.place.district {
        writeln!(page, "<dt>District</dt>\n<dd>{}</dd>", escape(district))?;
    }
    page.push_str("</dl>\n");

    page.push_str("<h2>Wave height data</h2>\n");
    let source = escape(&report.source);
    writeln!(
        page,
        "<p>Showing wave height data found at <a href=\"{source}\">{source}</a> in metres</p>"
    )?;
    page.push_str("<table>\n<tr><th>Time (UTC)</th><th>Height (m)</th></tr>\n");
    for (epoch_ms, height) in &report.series {
        writeln!(
            page,
            "<tr><td>{}</td><td>{height}</td></tr>",
            clock_time(*epoch_ms)
        )?;
    }
    page.push_str("</table>\n");
    if let Some(mean) = report.mean_wave_height {
        writeln!(page, "<p>Mean wave height: {mean}m</p>")?;
    }

    if let (Some(region), Some(accidents)) = (&report.place.european_region, &report.accidents) {
        page.push_str("<h2>Road accidents</h2>\n");
        writeln!(
            page,
            "<p>Road accident statistics for this region ({}) compared to the national average</p>",
            escape(region)
        )?;
        writeln!(
            page,
            "<dl>\n<dt>Injured</dt>\n<dd>{:+.2}%</dd>\n<dt>Killed</dt>\n<dd>{:+.2}%</dd>\n</dl>",
            accidents.injured_deviation_pct, accidents.killed_deviation_pct
        )?;
    }

    if !report.peers.is_empty() {
        page.push_str(
            "<h2>Other wave height sensors</h2>\n\
             <p>Other sensors found in the triplestore which measure wave height</p>\n<ul>\n",
        );
        for peer in &report.peers {
            writeln!(
                page,
                "<li><a href=\"{}\">{}</a></li>",
                escape(&peer.iri),
                escape(&peer.name)
            )?;
        }
        page.push_str("</ul>\n");
    }

    for list in &report.amenities {
        writeln!(page, "<h2>Nearby: {}</h2>", escape(&list.category))?;
        if list.places.is_empty() {
            page.push_str("<p>Nothing found nearby</p>\n");
        } else {
            page.push_str("<ul>\n");
            for amenity in &list.places {
                writeln!(
                    page,
                    "<li>{} ({:.2}km)</li>",
                    escape(&amenity.name),
                    amenity.distance_km
                )?;
            }
            page.push_str("</ul>\n");
        }
    }

    page.push_str("</body>\n</html>\n");
    Ok(page)
}

fn clock_time(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map_or_else(|| epoch_ms.to_string(), |t| t.format("%H:%M").to_string())
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
