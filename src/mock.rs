// Bundled demo dataset, used as the last step of the acquisition chain when
// both the cached and direct upstream fetches fail. Pure fixture: no I/O, no
// configuration, always the same tree.

use crate::models::{
    BusLine, BusStatus, BusStop, CompanyInfo, Driver, Filters, Incident, IncidentStatus, Location,
    OperationalSummary, Passengers, RouteInfo, TransportationData,
};

fn stop(id: u32, name: &str, latitude: f64, longitude: f64, eta: &str, next: bool) -> BusStop {
    BusStop {
        id,
        name: name.to_string(),
        latitude,
        longitude,
        estimated_arrival: eta.to_string(),
        is_next_stop: next,
    }
}

fn incident(
    id: u32,
    kind: &str,
    description: &str,
    reported_by: &str,
    reported_time: &str,
    status: IncidentStatus,
    priority: &str,
) -> Incident {
    Incident {
        id,
        kind: kind.to_string(),
        description: description.to_string(),
        reported_by: reported_by.to_string(),
        reported_time: reported_time.to_string(),
        status,
        priority: priority.to_string(),
    }
}

/// The fixed demo dataset: Amana Transportation's Kuala Lumpur network with
/// every bus status represented and exactly one flagged next stop per line.
pub fn mock_data() -> TransportationData {
    TransportationData {
        company_info: CompanyInfo {
            name: "Amana Transportation".to_string(),
            founded: "2019".to_string(),
            headquarters: "Kuala Lumpur, Malaysia".to_string(),
            industry: "Public Transportation".to_string(),
            description: "Modern bus network serving Kuala Lumpur and surrounding areas \
                          with real-time tracking and passenger analytics."
                .to_string(),
        },
        operational_summary: OperationalSummary {
            total_buses: 5,
            active_buses: 3,
            current_passengers: 93,
            average_utilization: 61,
        },
        bus_lines: vec![
            BusLine {
                id: 1,
                name: "KLCC - Petaling Jaya Express".to_string(),
                route_number: "B101".to_string(),
                status: BusStatus::Active,
                current_location: Location {
                    latitude: 3.1578,
                    longitude: 101.7117,
                    address: "Jalan Ampang, Kuala Lumpur City Centre".to_string(),
                },
                driver: Driver {
                    name: "Ahmad Rahman".to_string(),
                    id: "DRV-001".to_string(),
                    shift_start: "06:00".to_string(),
                    shift_end: "14:00".to_string(),
                },
                passengers: Passengers {
                    current: 32,
                    capacity: 45,
                    utilization_percentage: 71,
                },
                bus_stops: vec![
                    stop(1, "KLCC Station", 3.1578, 101.7117, "14:20", false),
                    stop(2, "Pavilion KL", 3.1488, 101.7133, "14:28", true),
                    stop(3, "Mid Valley Megamall", 3.1177, 101.6778, "14:45", false),
                    stop(4, "KL Sentral", 3.1338, 101.6869, "15:02", false),
                    stop(5, "Universiti Malaya", 3.1204, 101.6535, "15:18", false),
                    stop(6, "Petaling Jaya SS2", 3.1147, 101.6241, "15:35", false),
                ],
                incidents: vec![incident(
                    1,
                    "Delay",
                    "Heavy traffic on Jalan Tun Razak causing 10 minute delay",
                    "Ahmad Rahman",
                    "2024-01-15 13:45",
                    IncidentStatus::Reported,
                    "Medium",
                )],
                route_info: RouteInfo {
                    total_distance: 28.5,
                    average_speed: 32.0,
                    estimated_completion: "16:00".to_string(),
                    frequency_minutes: 20,
                },
            },
            BusLine {
                id: 2,
                name: "Old Town - Mont Kiara Connector".to_string(),
                route_number: "B205".to_string(),
                status: BusStatus::Active,
                current_location: Location {
                    latitude: 3.1390,
                    longitude: 101.6869,
                    address: "Jalan Stesen Sentral, Brickfields".to_string(),
                },
                driver: Driver {
                    name: "Siti Aminah".to_string(),
                    id: "DRV-014".to_string(),
                    shift_start: "08:00".to_string(),
                    shift_end: "16:00".to_string(),
                },
                passengers: Passengers {
                    current: 38,
                    capacity: 45,
                    utilization_percentage: 84,
                },
                bus_stops: vec![
                    stop(1, "KL Sentral", 3.1338, 101.6869, "14:15", false),
                    stop(2, "Central Market", 3.1427, 101.6964, "14:25", false),
                    stop(3, "Dataran Merdeka", 3.1478, 101.6935, "14:33", true),
                    stop(4, "Bank Negara", 3.1553, 101.6937, "14:41", false),
                    stop(5, "Mont Kiara", 3.1727, 101.6509, "15:05", false),
                ],
                incidents: vec![],
                route_info: RouteInfo {
                    total_distance: 19.2,
                    average_speed: 28.0,
                    estimated_completion: "15:30".to_string(),
                    frequency_minutes: 25,
                },
            },
            BusLine {
                id: 3,
                name: "Airport Shuttle".to_string(),
                route_number: "B350".to_string(),
                status: BusStatus::Maintenance,
                current_location: Location {
                    latitude: 3.0738,
                    longitude: 101.6735,
                    address: "Amana Depot, Bandar Sunway".to_string(),
                },
                driver: Driver {
                    name: "Lim Wei Keong".to_string(),
                    id: "DRV-022".to_string(),
                    shift_start: "10:00".to_string(),
                    shift_end: "18:00".to_string(),
                },
                passengers: Passengers {
                    current: 0,
                    capacity: 55,
                    utilization_percentage: 0,
                },
                bus_stops: vec![
                    stop(1, "KL Sentral", 3.1338, 101.6869, "N/A", false),
                    stop(2, "Bandar Tasik Selatan", 3.0762, 101.7113, "N/A", false),
                    stop(3, "Putrajaya Sentral", 2.9312, 101.6711, "N/A", false),
                    stop(4, "KLIA Terminal 1", 2.7456, 101.7099, "N/A", false),
                ],
                incidents: vec![incident(
                    2,
                    "Mechanical",
                    "Air conditioning unit under repair, bus held at depot",
                    "Depot Supervisor",
                    "2024-01-15 09:30",
                    IncidentStatus::InProgress,
                    "High",
                )],
                route_info: RouteInfo {
                    total_distance: 62.0,
                    average_speed: 55.0,
                    estimated_completion: "N/A".to_string(),
                    frequency_minutes: 45,
                },
            },
            BusLine {
                id: 4,
                name: "Cheras - Ampang Loop".to_string(),
                route_number: "B410".to_string(),
                status: BusStatus::Active,
                current_location: Location {
                    latitude: 3.1069,
                    longitude: 101.7183,
                    address: "Jalan Cheras, Taman Connaught".to_string(),
                },
                driver: Driver {
                    name: "Rajesh Kumar".to_string(),
                    id: "DRV-009".to_string(),
                    shift_start: "07:00".to_string(),
                    shift_end: "15:00".to_string(),
                },
                passengers: Passengers {
                    current: 23,
                    capacity: 45,
                    utilization_percentage: 51,
                },
                bus_stops: vec![
                    stop(1, "Taman Connaught", 3.1069, 101.7183, "14:22", true),
                    stop(2, "Cheras Leisure Mall", 3.0912, 101.7410, "14:35", false),
                    stop(3, "Pandan Indah", 3.1286, 101.7585, "14:50", false),
                    stop(4, "Ampang Point", 3.1501, 101.7614, "15:05", false),
                    stop(5, "Gleneagles Hospital", 3.1592, 101.7416, "15:15", false),
                ],
                incidents: vec![],
                route_info: RouteInfo {
                    total_distance: 24.8,
                    average_speed: 26.0,
                    estimated_completion: "15:45".to_string(),
                    frequency_minutes: 30,
                },
            },
            BusLine {
                id: 5,
                name: "Subang Jaya Feeder".to_string(),
                route_number: "B520".to_string(),
                status: BusStatus::OutOfService,
                current_location: Location {
                    latitude: 3.0436,
                    longitude: 101.5810,
                    address: "Amana Depot, Subang Jaya".to_string(),
                },
                driver: Driver {
                    name: "Unassigned".to_string(),
                    id: "N/A".to_string(),
                    shift_start: "N/A".to_string(),
                    shift_end: "N/A".to_string(),
                },
                passengers: Passengers {
                    current: 0,
                    capacity: 30,
                    utilization_percentage: 0,
                },
                bus_stops: vec![
                    stop(1, "SS15 Courtyard", 3.0478, 101.5867, "N/A", false),
                    stop(2, "Subang Parade", 3.0823, 101.5852, "N/A", false),
                    stop(3, "Sunway Pyramid", 3.0731, 101.6070, "N/A", false),
                ],
                incidents: vec![incident(
                    3,
                    "Accident",
                    "Minor collision at SS15 junction, vehicle withdrawn pending inspection",
                    "Traffic Control",
                    "2024-01-14 17:20",
                    IncidentStatus::Resolved,
                    "High",
                )],
                route_info: RouteInfo {
                    total_distance: 12.4,
                    average_speed: 22.0,
                    estimated_completion: "N/A".to_string(),
                    frequency_minutes: 15,
                },
            },
        ],
        filters: Filters {
            available_statuses: vec![
                "Active".to_string(),
                "Maintenance".to_string(),
                "Out of Service".to_string(),
            ],
            available_routes: vec![
                "B101".to_string(),
                "B205".to_string(),
                "B350".to_string(),
                "B410".to_string(),
                "B520".to_string(),
            ],
        },
    }
}
