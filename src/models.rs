// Data schema for the Amana Transportation dashboard.
// Mirrors the JSON delivered by the upstream API:
// https://amanabootcamp.org/api/fs-classwork-data/amana-transportation
//
// The upstream payload is treated as untrusted: every field defaults when
// absent so a partial payload still parses, and unrecognized status strings
// collapse into an Unknown variant instead of failing the whole document.

use serde::{Deserialize, Serialize};

// ============================================================================
// Top-level envelope
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransportationData {
    #[serde(default)]
    pub company_info: CompanyInfo,
    #[serde(default)]
    pub operational_summary: OperationalSummary,
    #[serde(default)]
    pub bus_lines: Vec<BusLine>,
    #[serde(default)]
    pub filters: Filters,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub founded: String,
    #[serde(default)]
    pub headquarters: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationalSummary {
    #[serde(default)]
    pub total_buses: u32,
    #[serde(default)]
    pub active_buses: u32,
    #[serde(default)]
    pub current_passengers: u32,
    #[serde(default)]
    pub average_utilization: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub available_statuses: Vec<String>,
    #[serde(default)]
    pub available_routes: Vec<String>,
}

// ============================================================================
// Bus lines
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusLine {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub route_number: String,
    #[serde(default)]
    pub status: BusStatus,
    #[serde(default)]
    pub current_location: Location,
    #[serde(default)]
    pub driver: Driver,
    #[serde(default)]
    pub passengers: Passengers,
    #[serde(default)]
    pub bus_stops: Vec<BusStop>,
    #[serde(default)]
    pub incidents: Vec<Incident>,
    #[serde(default)]
    pub route_info: RouteInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Driver {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub shift_start: String,
    #[serde(default)]
    pub shift_end: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Passengers {
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub capacity: u32,
    // Supplied pre-computed by the source; never recomputed here.
    #[serde(default)]
    pub utilization_percentage: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusStop {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub estimated_arrival: String,
    #[serde(default)]
    pub is_next_stop: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Incident {
    #[serde(default)]
    pub id: u32,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reported_by: String,
    #[serde(default)]
    pub reported_time: String,
    #[serde(default)]
    pub status: IncidentStatus,
    #[serde(default)]
    pub priority: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteInfo {
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub average_speed: f64,
    #[serde(default)]
    pub estimated_completion: String,
    #[serde(default)]
    pub frequency_minutes: u32,
}

// ============================================================================
// Status variants
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BusStatus {
    Active,
    Maintenance,
    OutOfService,
    #[default]
    Unknown,
}

impl From<String> for BusStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Active" => BusStatus::Active,
            "Maintenance" => BusStatus::Maintenance,
            "Out of Service" => BusStatus::OutOfService,
            _ => BusStatus::Unknown,
        }
    }
}

impl From<BusStatus> for String {
    fn from(status: BusStatus) -> Self {
        status.label().to_string()
    }
}

impl BusStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BusStatus::Active => "Active",
            BusStatus::Maintenance => "Maintenance",
            BusStatus::OutOfService => "Out of Service",
            BusStatus::Unknown => "Unknown",
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            BusStatus::Active => StatusColor::Emerald,
            BusStatus::Maintenance => StatusColor::Amber,
            BusStatus::OutOfService => StatusColor::Red,
            BusStatus::Unknown => StatusColor::Gray,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IncidentStatus {
    Reported,
    InProgress,
    Resolved,
    #[default]
    Unknown,
}

impl From<String> for IncidentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Reported" => IncidentStatus::Reported,
            "In Progress" => IncidentStatus::InProgress,
            "Resolved" => IncidentStatus::Resolved,
            _ => IncidentStatus::Unknown,
        }
    }
}

impl From<IncidentStatus> for String {
    fn from(status: IncidentStatus) -> Self {
        status.label().to_string()
    }
}

impl IncidentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            IncidentStatus::Reported => "Reported",
            IncidentStatus::InProgress => "In Progress",
            IncidentStatus::Resolved => "Resolved",
            IncidentStatus::Unknown => "Unknown",
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            IncidentStatus::Reported => StatusColor::Red,
            IncidentStatus::InProgress => StatusColor::Amber,
            IncidentStatus::Resolved => StatusColor::Green,
            IncidentStatus::Unknown => StatusColor::Gray,
        }
    }
}

// ============================================================================
// Color bands
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Emerald,
    Amber,
    Red,
    Green,
    Gray,
}

impl StatusColor {
    /// CSS classes for the status badges rendered by the frontend.
    pub fn badge_classes(&self) -> &'static str {
        match self {
            StatusColor::Emerald => "bg-emerald-100 text-emerald-800 border-emerald-200",
            StatusColor::Amber => "bg-amber-100 text-amber-800 border-amber-200",
            StatusColor::Red => "bg-red-100 text-red-800 border-red-200",
            StatusColor::Green => "bg-green-100 text-green-800 border-green-200",
            StatusColor::Gray => "bg-gray-100 text-gray-800 border-gray-200",
        }
    }

    pub fn text_class(&self) -> &'static str {
        match self {
            StatusColor::Emerald => "text-emerald-600",
            StatusColor::Amber => "text-amber-600",
            StatusColor::Red => "text-red-600",
            StatusColor::Green => "text-green-600",
            StatusColor::Gray => "text-gray-600",
        }
    }
}

/// Band for a utilization percentage. Boundaries are inclusive: 80 is red,
/// 60 is amber.
pub fn utilization_color(percentage: u32) -> StatusColor {
    if percentage >= 80 {
        StatusColor::Red
    } else if percentage >= 60 {
        StatusColor::Amber
    } else {
        StatusColor::Emerald
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_status_round_trips_wire_strings() {
        let active: BusStatus = serde_json::from_str("\"Active\"").unwrap();
        assert_eq!(active, BusStatus::Active);

        let oos: BusStatus = serde_json::from_str("\"Out of Service\"").unwrap();
        assert_eq!(oos, BusStatus::OutOfService);
        assert_eq!(serde_json::to_string(&oos).unwrap(), "\"Out of Service\"");
    }

    #[test]
    fn unrecognized_status_collapses_to_unknown() {
        let status: BusStatus = serde_json::from_str("\"Teleporting\"").unwrap();
        assert_eq!(status, BusStatus::Unknown);
        assert_eq!(status.color(), StatusColor::Gray);

        let incident: IncidentStatus = serde_json::from_str("\"Escalated\"").unwrap();
        assert_eq!(incident, IncidentStatus::Unknown);
    }

    #[test]
    fn status_color_table_is_fixed() {
        assert_eq!(BusStatus::Active.color(), StatusColor::Emerald);
        assert_eq!(BusStatus::Maintenance.color(), StatusColor::Amber);
        assert_eq!(BusStatus::OutOfService.color(), StatusColor::Red);

        assert_eq!(IncidentStatus::Reported.color(), StatusColor::Red);
        assert_eq!(IncidentStatus::Resolved.color(), StatusColor::Green);
    }

    #[test]
    fn utilization_bands_use_inclusive_boundaries() {
        assert_eq!(utilization_color(85), StatusColor::Red);
        assert_eq!(utilization_color(80), StatusColor::Red);
        assert_eq!(utilization_color(65), StatusColor::Amber);
        assert_eq!(utilization_color(60), StatusColor::Amber);
        assert_eq!(utilization_color(40), StatusColor::Emerald);
        assert_eq!(utilization_color(0), StatusColor::Emerald);
    }

    #[test]
    fn partial_payload_parses_with_defaults() {
        let data: TransportationData = serde_json::from_str(
            r#"{"bus_lines":[{"id":7,"name":"Line 7","status":"Active"}]}"#,
        )
        .unwrap();

        assert_eq!(data.bus_lines.len(), 1);
        assert_eq!(data.bus_lines[0].id, 7);
        assert_eq!(data.bus_lines[0].status, BusStatus::Active);
        assert!(data.bus_lines[0].bus_stops.is_empty());
        assert_eq!(data.company_info.name, "");
    }

    #[test]
    fn incident_type_keeps_wire_name() {
        let incident: Incident = serde_json::from_str(
            r#"{"id":1,"type":"Delay","description":"Heavy traffic","status":"Reported"}"#,
        )
        .unwrap();
        assert_eq!(incident.kind, "Delay");
        assert_eq!(incident.status, IncidentStatus::Reported);

        let back = serde_json::to_value(&incident).unwrap();
        assert_eq!(back["type"], "Delay");
    }
}
