/// Latest observation from a station.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    /// Air temperature (°C).
    pub temperature: Option<f64>,
    /// Wind speed as reported by the station.
    pub wind_speed: Option<f64>,
    /// Wind direction (degrees).
    pub wind_direction: Option<f64>,
    /// Visibility (meters).
    pub visibility: Option<f64>,
    /// Human-readable conditions, e.g. "Partly Cloudy".
    pub text_description: Option<String>,
    /// Undecoded METAR report.
    pub raw_message: Option<String>,
}

/// An active weather alert for a zone.
///
/// Only `id` matters for change detection; the rest is display data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alert {
    pub id: String,
    pub event: String,
    pub severity: String,
    pub headline: String,
    pub description: String,
    /// RFC 3339 timestamp.
    pub effective: String,
    /// RFC 3339 timestamp.
    pub expires: String,
}

/// One period ("Tonight", "Monday", ...) of a zone forecast.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastPeriod {
    pub name: String,
    pub temperature: Option<f64>,
    pub temperature_unit: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub detailed_forecast: Option<String>,
}
