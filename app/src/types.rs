//! Records exchanged with the YouRide REST backend.
//!
//! Field names follow the backend serializers verbatim so the types can be
//! decoded straight from response bodies.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// === Enumerations ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Passenger,
    Driver,
    Admin,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Passenger, Self::Driver, Self::Admin];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passenger => "passenger",
            Self::Driver => "driver",
            Self::Admin => "admin",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Passenger => "Passenger",
            Self::Driver => "Driver",
            Self::Admin => "Admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Requested,
    InProgress,
    Completed,
    Cancelled,
    /// Any status this client does not know yet.
    #[serde(other)]
    Unknown,
}

impl TripStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Denied,
}

impl ApplicationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Luxury,
    #[default]
    Economy,
    Suv,
    Van,
    Electric,
}

impl VehicleType {
    pub const ALL: [Self; 5] = [
        Self::Luxury,
        Self::Economy,
        Self::Suv,
        Self::Van,
        Self::Electric,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Luxury => "luxury",
            Self::Economy => "economy",
            Self::Suv => "suv",
            Self::Van => "van",
            Self::Electric => "electric",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Luxury => "Luxury",
            Self::Economy => "Economy",
            Self::Suv => "SUV",
            Self::Van => "Van",
            Self::Electric => "Electric",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

// === List envelopes ===

/// A list endpoint answers either a bare array or a DRF page.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Page(Page<T>),
    Plain(Vec<T>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Total number of records on the server; a bare array counts itself.
    pub fn count(&self) -> u64 {
        match self {
            Self::Page(page) => page
                .count
                .unwrap_or(page.results.len() as u64),
            Self::Plain(items) => items.len() as u64,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page(page) => page.results,
            Self::Plain(items) => items,
        }
    }
}

/// `GET /profiles/all/` wraps its page in a `profiles` key.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilesEnvelope {
    pub profiles: ListResponse<Profile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileEnvelope {
    pub profile: Profile,
}

// === Auth ===

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
    pub password2: String,
}

// === Profiles & users ===

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub user_pkid: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Editable profile fields sent as multipart to `/profiles/me/update/`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub about_me: String,
    pub gender: String,
    pub country: String,
    pub city: String,
    pub photo: Option<Upload>,
}

/// A file picked in the browser, read into memory for multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminUser {
    pub pkid: i64,
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub username: Option<String>,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    pub date_joined: String,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct AdminUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// === Locations & routes ===

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub id: Uuid,
    pub pk: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LocationForm {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    pub id: Uuid,
    pub pk: i64,
    pub pickup: Location,
    pub drop: Location,
    pub price_af: String,
    #[serde(default)]
    pub drivers: Vec<i64>,
    #[serde(default)]
    pub vehicles: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteForm {
    pub pickup_id: i64,
    pub drop_id: i64,
    pub price_af: String,
    pub drivers: Vec<i64>,
    pub vehicles: Vec<i64>,
}

// === Vehicles ===

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub pk: i64,
    #[serde(default)]
    pub driver: Option<i64>,
    #[serde(default)]
    pub driver_name: Option<String>,
    pub model: String,
    pub plate_number: String,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
}

/// Multipart body for vehicle create/update.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleForm {
    pub model: String,
    pub plate_number: String,
    pub vehicle_type: VehicleType,
    pub driver: Option<i64>,
    pub license: Option<Upload>,
}

// === Trips ===

/// Passenger's own trips (`GET /vehicle/trips/`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PassengerTrip {
    pub id: Uuid,
    #[serde(default)]
    pub route: Option<Route>,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub fare: Option<String>,
    pub status: TripStatus,
    pub request_time: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default = "one")]
    pub passenger_count: u8,
    #[serde(default)]
    pub notes_for_driver: String,
    #[serde(default)]
    pub scheduled_for: Option<String>,
}

/// Trip as seen on the driver board (available and assigned lists).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverTrip {
    pub id: Uuid,
    pub pk: i64,
    #[serde(default)]
    pub passenger_name: Option<String>,
    #[serde(default)]
    pub route: Option<Route>,
    #[serde(default)]
    pub fare: Option<String>,
    #[serde(default = "one")]
    pub passenger_count: u8,
    #[serde(default)]
    pub notes_for_driver: String,
    #[serde(default)]
    pub scheduled_for: Option<String>,
    #[serde(default)]
    pub request_time: Option<String>,
    pub status: TripStatus,
}

/// Trip as listed on the admin trip management page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminTrip {
    pub id: Uuid,
    pub passenger: String,
    #[serde(default)]
    pub driver: Option<i64>,
    #[serde(default)]
    pub driver_name: Option<String>,
    pub route: Route,
    #[serde(default)]
    pub fare: Option<String>,
    pub status: TripStatus,
    pub request_time: String,
    #[serde(default = "one")]
    pub passenger_count: u8,
    #[serde(default)]
    pub notes_for_driver: String,
    #[serde(default)]
    pub scheduled_for: Option<String>,
}

const fn one() -> u8 {
    1
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TripRequest {
    pub route_id: i64,
    pub passenger_count: u8,
    pub notes_for_driver: String,
    pub scheduled_for: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TripStatusUpdate {
    pub status: TripStatus,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TripAssignment {
    pub driver: i64,
    pub status: TripStatus,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Detail {
    pub detail: String,
}

// === Driver applications ===

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverApplication {
    pub id: Uuid,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    pub applicant_email: Option<String>,
    pub license_number: String,
    pub years_of_experience: u32,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub reviewed_by: Option<i64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DriverApplicationForm {
    pub license_number: String,
    pub years_of_experience: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ApplicationReview {
    pub status: ApplicationStatus,
}

// === Contact ===

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

// === Admin dashboard ===

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Kpi {
    pub total_users: u64,
    pub total_drivers: u64,
    pub total_passengers: u64,
    pub total_trips: u64,
    pub pending_applications: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentTrip {
    pub id: Uuid,
    pub passenger_name: String,
    pub route_display: String,
    pub status: TripStatus,
    pub request_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartPoint {
    pub date: String,
    pub trips: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub kpi: Kpi,
    #[serde(default)]
    pub recent_trips: Vec<RecentTrip>,
    #[serde(default)]
    pub chart_data: Vec<ChartPoint>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_plain_array() {
        let json = r#"[{"id": "6f1c1b52-6f7a-4a55-8f3a-6a0c1d8e9b10", "pk": 1, "name": "Kabul"}]"#;
        let list: ListResponse<Location> = serde_json::from_str(json).unwrap();
        assert_eq!(list.count(), 1);
        assert_eq!(list.into_items()[0].name, "Kabul");
    }

    #[test]
    fn test_list_response_paged() {
        let json = r#"{
            "count": 23,
            "next": "http://127.0.0.1:8000/api/v1/vehicle/locations/?page=2",
            "previous": null,
            "results": [{"id": "6f1c1b52-6f7a-4a55-8f3a-6a0c1d8e9b10", "pk": 1, "name": "Herat"}]
        }"#;
        let list: ListResponse<Location> = serde_json::from_str(json).unwrap();
        assert_eq!(list.count(), 23);
        assert_eq!(list.into_items().len(), 1);
    }

    #[test]
    fn test_trip_status_wire_format() {
        let status: TripStatus = serde_json::from_str(r#""in_progress""#).unwrap();
        assert_eq!(status, TripStatus::InProgress);
        assert_eq!(
            serde_json::to_string(&TripStatusUpdate {
                status: TripStatus::Completed
            })
            .unwrap(),
            r#"{"status":"completed"}"#
        );
    }

    #[test]
    fn test_unrecognised_trip_status_decodes_as_unknown() {
        let status: TripStatus = serde_json::from_str(r#""pending""#).unwrap();
        assert_eq!(status, TripStatus::Unknown);
    }

    #[test]
    fn test_vehicle_type_field_is_renamed() {
        let json = r#"{
            "id": "0b3f7a34-8d4e-4b6f-9a0f-5e1c2d3b4a59",
            "pk": 4,
            "driver": 12,
            "driver_name": "Ahmad Karimi",
            "model": "Toyota Corolla",
            "plate_number": "KBL-1234",
            "license": "/media/license/a.png",
            "type": "suv"
        }"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.vehicle_type, VehicleType::Suv);
        assert_eq!(vehicle.driver, Some(12));
    }

    #[test]
    fn test_profile_tolerates_missing_optional_fields() {
        let json = r#"{"user_pkid": 7, "first_name": "Sara", "last_name": "Ahmadi", "role": "driver", "full_name": "Sara Ahmadi", "email": "sara@youride.af"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role, Role::Driver);
        assert!(profile.profile_photo.is_none());
    }

    #[test]
    fn test_admin_user_update_skips_unset_fields() {
        let update = AdminUserUpdate {
            is_active: Some(false),
            ..AdminUserUpdate::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"is_active":false}"#);
    }

    #[test]
    fn test_trip_request_serializes_null_schedule() {
        let request = TripRequest {
            route_id: 3,
            passenger_count: 2,
            notes_for_driver: String::new(),
            scheduled_for: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["scheduled_for"].is_null());
        assert_eq!(json["route_id"], 3);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("superuser"), None);
    }
}
