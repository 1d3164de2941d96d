// Presentation view models, computed server-side as pure functions of the
// dashboard state. The embedded frontend renders these verbatim; everything
// it shows (badge classes, popup text, marker positions) is decided here.

use serde::Serialize;

use crate::models::{utilization_color, BusLine, TransportationData};
use crate::sources::DataOrigin;

pub const MAP_ZOOM: u8 = 12;
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

// ============================================================================
// View model types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub origin: DataOrigin,
    pub demo_mode: bool,
    pub header: HeaderView,
    pub routes: Vec<RouteButton>,
    pub selected_bus_id: Option<u32>,
    pub map: Option<MapView>,
    pub schedule: Option<ScheduleView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderView {
    pub company_name: String,
    pub founded: String,
    pub description: String,
    pub active_buses: u32,
    pub current_passengers: u32,
    pub average_utilization: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteButton {
    pub id: u32,
    pub route_number: String,
    pub status: &'static str,
    pub status_classes: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub tile_url: &'static str,
    pub tile_attribution: &'static str,
    pub title: String,
    pub route_number: String,
    pub stop_markers: Vec<StopMarker>,
    pub route_path: Vec<[f64; 2]>,
    pub bus_marker: BusMarker,
}

#[derive(Debug, Clone, Serialize)]
pub struct StopMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub is_next_stop: bool,
    /// Popup body: "Next Stop" for the flagged stop, "ETA: <time>" otherwise.
    pub popup: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BusMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub address: String,
    pub passenger_load: String,
    pub driver: String,
    pub utilization_percentage: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleView {
    pub route_number: String,
    pub name: String,
    pub current_passengers: u32,
    pub capacity: u32,
    pub utilization_percentage: u32,
    pub utilization_class: &'static str,
    pub estimated_completion: String,
    pub rows: Vec<ScheduleRow>,
    pub incidents: Vec<IncidentView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRow {
    pub name: String,
    pub arrival: String,
    pub badge: &'static str,
    pub badge_classes: &'static str,
    pub is_next_stop: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncidentView {
    pub kind: String,
    pub description: String,
    pub reported_by: String,
    pub reported_time: String,
    pub status: &'static str,
    pub status_classes: &'static str,
}

// ============================================================================
// Builders
// ============================================================================

/// Default selection rule: the first bus line whose status is Active, in
/// collection order. None when no line is active.
pub fn select_first_active(data: &TransportationData) -> Option<&BusLine> {
    data.bus_lines
        .iter()
        .find(|bus| bus.status == crate::models::BusStatus::Active)
}

/// Times coming off the wire may be empty or already "N/A"; both render as
/// "N/A".
pub fn format_time(time: &str) -> String {
    if time.is_empty() || time == "N/A" {
        "N/A".to_string()
    } else {
        time.to_string()
    }
}

pub fn header_view(data: &TransportationData) -> HeaderView {
    HeaderView {
        company_name: data.company_info.name.clone(),
        founded: data.company_info.founded.clone(),
        description: data.company_info.description.clone(),
        active_buses: data.operational_summary.active_buses,
        current_passengers: data.operational_summary.current_passengers,
        average_utilization: data.operational_summary.average_utilization,
    }
}

pub fn map_view(bus: &BusLine) -> MapView {
    let stop_markers = bus
        .bus_stops
        .iter()
        .map(|stop| StopMarker {
            latitude: stop.latitude,
            longitude: stop.longitude,
            name: stop.name.clone(),
            is_next_stop: stop.is_next_stop,
            popup: if stop.is_next_stop {
                "Next Stop".to_string()
            } else {
                format!("ETA: {}", format_time(&stop.estimated_arrival))
            },
        })
        .collect();

    let route_path = bus
        .bus_stops
        .iter()
        .map(|stop| [stop.latitude, stop.longitude])
        .collect();

    MapView {
        center: [bus.current_location.latitude, bus.current_location.longitude],
        zoom: MAP_ZOOM,
        tile_url: TILE_URL,
        tile_attribution: TILE_ATTRIBUTION,
        title: bus.name.clone(),
        route_number: bus.route_number.clone(),
        stop_markers,
        route_path,
        bus_marker: BusMarker {
            latitude: bus.current_location.latitude,
            longitude: bus.current_location.longitude,
            name: bus.name.clone(),
            address: bus.current_location.address.clone(),
            passenger_load: format!("{}/{}", bus.passengers.current, bus.passengers.capacity),
            driver: bus.driver.name.clone(),
            utilization_percentage: bus.passengers.utilization_percentage,
        },
    }
}

pub fn schedule_view(bus: &BusLine) -> ScheduleView {
    let rows = bus
        .bus_stops
        .iter()
        .map(|stop| ScheduleRow {
            name: stop.name.clone(),
            arrival: format_time(&stop.estimated_arrival),
            badge: if stop.is_next_stop { "Next Stop" } else { "Scheduled" },
            badge_classes: if stop.is_next_stop {
                "bg-indigo-100 text-indigo-800"
            } else {
                "bg-gray-100 text-gray-800"
            },
            is_next_stop: stop.is_next_stop,
        })
        .collect();

    let incidents = bus
        .incidents
        .iter()
        .map(|incident| IncidentView {
            kind: incident.kind.clone(),
            description: incident.description.clone(),
            reported_by: incident.reported_by.clone(),
            reported_time: incident.reported_time.clone(),
            status: incident.status.label(),
            status_classes: incident.status.color().badge_classes(),
        })
        .collect();

    ScheduleView {
        route_number: bus.route_number.clone(),
        name: bus.name.clone(),
        current_passengers: bus.passengers.current,
        capacity: bus.passengers.capacity,
        utilization_percentage: bus.passengers.utilization_percentage,
        utilization_class: utilization_color(bus.passengers.utilization_percentage).text_class(),
        estimated_completion: format_time(&bus.route_info.estimated_completion),
        rows,
        incidents,
    }
}

pub fn dashboard_view(
    data: &TransportationData,
    origin: DataOrigin,
    selected_bus_id: Option<u32>,
) -> DashboardView {
    let selected = selected_bus_id.and_then(|id| data.bus_lines.iter().find(|bus| bus.id == id));

    let routes = data
        .bus_lines
        .iter()
        .map(|bus| RouteButton {
            id: bus.id,
            route_number: bus.route_number.clone(),
            status: bus.status.label(),
            status_classes: bus.status.color().badge_classes(),
            selected: Some(bus.id) == selected_bus_id,
        })
        .collect();

    DashboardView {
        origin,
        demo_mode: origin == DataOrigin::Mock,
        header: header_view(data),
        routes,
        selected_bus_id: selected.map(|bus| bus.id),
        map: selected.map(map_view),
        schedule: selected.map(schedule_view),
    }
}

// ============================================================================
// Tests
// ============================================================================
