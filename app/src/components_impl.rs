//! Business logic extracted from Leptos components for testability.
//!
//! Badge styles, labels, filters and form validation live here as plain
//! functions so they can be unit-tested without a reactive runtime.

use crate::config::MAX_PASSENGERS;
use crate::types::{
    AdminTrip, AdminUser, ApplicationStatus, ContactMessage, DriverApplicationForm, Location,
    Profile, ProfileUpdate, Registration, Role, Route, RouteForm, TripRequest, TripStatus,
    Upload, Vehicle, VehicleForm, VehicleType,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

// === String Helpers ===

/// Convert an empty (or blank) string to None, otherwise Some(string).
pub fn optional_string(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

/// `in_progress` → `In progress`. Only the first underscore is replaced.
pub fn status_label(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => {
            let rest: String = chars.collect();
            format!("{}{}", first.to_uppercase(), rest.replacen('_', " ", 1))
        }
        None => "Unknown".to_string(),
    }
}

pub fn initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

// === UI Status Helpers ===

pub fn trip_status_badge_class(status: TripStatus) -> &'static str {
    match status {
        TripStatus::Requested => "badge bg-blue-100 text-blue-800",
        TripStatus::InProgress => "badge bg-yellow-100 text-yellow-800",
        TripStatus::Completed => "badge bg-green-100 text-green-800",
        TripStatus::Cancelled => "badge bg-red-100 text-red-800",
        TripStatus::Unknown => "badge bg-gray-100 text-gray-800",
    }
}

pub fn trip_status_label(status: TripStatus) -> String {
    match status {
        TripStatus::Unknown => "Unknown".to_string(),
        known => status_label(known.as_str()),
    }
}

pub fn application_status_badge_class(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Pending => "badge bg-yellow-100 text-yellow-800",
        ApplicationStatus::Approved => "badge bg-green-100 text-green-700",
        ApplicationStatus::Denied => "badge bg-red-100 text-red-700",
    }
}

pub fn application_status_label(status: ApplicationStatus) -> String {
    status_label(status.as_str())
}

pub fn role_badge_class(role: Role) -> &'static str {
    match role {
        Role::Admin => "badge bg-purple-100 text-purple-800",
        Role::Driver => "badge bg-yellow-100 text-yellow-800",
        Role::Passenger => "badge bg-green-100 text-green-800",
    }
}

pub fn user_status_badge_class(active: bool) -> &'static str {
    if active {
        "badge bg-green-100 text-green-800"
    } else {
        "badge bg-red-100 text-red-800"
    }
}

pub fn user_status_text(active: bool) -> &'static str {
    if active { "Active" } else { "Inactive" }
}

// === Routes & Fares ===

pub fn route_label(route: &Route) -> String {
    format!("{} ➜ {}", route.pickup.name, route.drop.name)
}

pub fn fare_label(fare: Option<&str>) -> String {
    match fare.map(str::trim) {
        Some(f) if !f.is_empty() => format!("{f} AF"),
        _ => "-".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOption {
    pub pk: i64,
    pub label: String,
    pub price: String,
    pub driver_count: usize,
}

/// Routes a passenger can book: those with at least one driver.
pub fn bookable_routes(routes: &[Route]) -> Vec<RouteOption> {
    routes
        .iter()
        .filter(|r| !r.drivers.is_empty())
        .map(|r| RouteOption {
            pk: r.pk,
            label: route_label(r),
            price: r.price_af.clone(),
            driver_count: r.drivers.len(),
        })
        .collect()
}

// === City Booking ===

/// Distinct pickup locations, in the order the routes list them.
pub fn pickup_locations(routes: &[Route]) -> Vec<Location> {
    let mut pickups: Vec<Location> = Vec::new();
    for route in routes {
        if !pickups.iter().any(|l| l.pk == route.pickup.pk) {
            pickups.push(route.pickup.clone());
        }
    }
    pickups
}

/// Drop-off locations reachable from `pickup`. Empty until a pickup is chosen.
pub fn dropoff_locations(routes: &[Route], pickup: Option<i64>) -> Vec<Location> {
    let Some(pickup) = pickup else {
        return Vec::new();
    };
    routes
        .iter()
        .filter(|r| r.pickup.pk == pickup)
        .map(|r| r.drop.clone())
        .collect()
}

pub fn find_route(routes: &[Route], pickup: Option<i64>, dropoff: Option<i64>) -> Option<Route> {
    let (pickup, dropoff) = (pickup?, dropoff?);
    routes
        .iter()
        .find(|r| r.pickup.pk == pickup && r.drop.pk == dropoff)
        .cloned()
}

// === Trip Filters ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripFilter {
    #[default]
    All,
    Status(TripStatus),
}

impl TripFilter {
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::Status(TripStatus::Requested),
        Self::Status(TripStatus::InProgress),
        Self::Status(TripStatus::Completed),
        Self::Status(TripStatus::Cancelled),
    ];

    pub fn label(self) -> String {
        match self {
            Self::All => "All".to_string(),
            Self::Status(status) => trip_status_label(status),
        }
    }

    pub fn matches(self, status: TripStatus) -> bool {
        match self {
            Self::All => true,
            Self::Status(wanted) => wanted == status,
        }
    }
}

pub fn filter_trips_by_status(trips: &[AdminTrip], filter: TripFilter) -> Vec<AdminTrip> {
    trips
        .iter()
        .filter(|t| filter.matches(t.status))
        .cloned()
        .collect()
}

/// Drivers may only complete a trip that is underway.
pub fn can_complete(status: TripStatus) -> bool {
    status == TripStatus::InProgress
}

/// Confirmation question and success toast for a driver closing a trip.
/// Only completing and cancelling are driver actions.
pub fn finish_prompts(status: TripStatus) -> Option<(&'static str, &'static str)> {
    match status {
        TripStatus::Completed => Some(("Mark this trip as completed?", "Trip marked as completed.")),
        TripStatus::Cancelled => Some(("Cancel this trip?", "Trip has been cancelled.")),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverTab {
    #[default]
    Available,
    Assigned,
}

impl DriverTab {
    pub fn label(self, count: usize) -> String {
        match self {
            Self::Available => format!("Available trips ({count})"),
            Self::Assigned => format!("My assigned trips ({count})"),
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Available => "No available trips at the moment.",
            Self::Assigned => "You have no assigned trips.",
        }
    }
}

// === Users ===

/// Case-insensitive match on full name or email; a blank term keeps everyone.
pub fn search_users(users: &[AdminUser], term: &str) -> Vec<AdminUser> {
    let term = term.trim().to_lowercase();
    users
        .iter()
        .filter(|u| {
            term.is_empty()
                || u.full_name.to_lowercase().contains(&term)
                || u.email.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

pub fn drivers_only(users: &[AdminUser]) -> Vec<AdminUser> {
    users
        .iter()
        .filter(|u| u.role == Role::Driver)
        .cloned()
        .collect()
}

// === Select Options ===

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: i64,
    pub label: String,
}

pub fn driver_options(profiles: &[Profile]) -> Vec<SelectOption> {
    profiles
        .iter()
        .filter(|p| p.role == Role::Driver)
        .map(|p| SelectOption {
            value: p.user_pkid,
            label: p.full_name.clone(),
        })
        .collect()
}

pub fn location_options(locations: &[Location]) -> Vec<SelectOption> {
    locations
        .iter()
        .map(|l| SelectOption {
            value: l.pk,
            label: l.name.clone(),
        })
        .collect()
}

pub fn vehicle_options(vehicles: &[Vehicle]) -> Vec<SelectOption> {
    vehicles
        .iter()
        .map(|v| SelectOption {
            value: v.pk,
            label: format!("{} ({})", v.model, v.plate_number),
        })
        .collect()
}

/// Parse the value of a `<select>`; the empty placeholder maps to `None`.
pub fn parse_select(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Add `value` to a multi-select if absent, remove it otherwise.
pub fn toggle_id(ids: &mut Vec<i64>, value: i64) {
    if let Some(pos) = ids.iter().position(|&id| id == value) {
        ids.remove(pos);
    } else {
        ids.push(value);
    }
}

// === Pagination ===

pub fn total_pages(count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

// === Trip Requests ===

pub fn validate_trip_request(
    route_id: Option<i64>,
    passenger_count: &str,
    notes: String,
    is_scheduled: bool,
    scheduled_for: String,
) -> Result<TripRequest, String> {
    let route_id = route_id.ok_or_else(|| "Please choose a route.".to_string())?;

    let passenger_count = passenger_count
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|n| (1..=MAX_PASSENGERS).contains(n))
        .ok_or_else(|| format!("Passenger count must be between 1 and {MAX_PASSENGERS}."))?;

    let scheduled_for = if is_scheduled {
        Some(optional_string(scheduled_for).ok_or_else(|| {
            "Please specify the date and time for the scheduled trip.".to_string()
        })?)
    } else {
        None
    };

    Ok(TripRequest {
        route_id,
        passenger_count,
        notes_for_driver: notes,
        scheduled_for,
    })
}

// === Route Form ===

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteFormState {
    pub pickup: Option<i64>,
    pub drop: Option<i64>,
    pub price_af: String,
    pub drivers: Vec<i64>,
    pub vehicles: Vec<i64>,
}

pub fn extract_route_form_state(route: Option<&Route>) -> RouteFormState {
    route.map_or_else(RouteFormState::default, |r| RouteFormState {
        pickup: Some(r.pickup.pk),
        drop: Some(r.drop.pk),
        price_af: r.price_af.clone(),
        drivers: r.drivers.clone(),
        vehicles: r.vehicles.clone(),
    })
}

pub fn validate_route_form(state: &RouteFormState) -> Result<RouteForm, String> {
    let (Some(pickup_id), Some(drop_id)) = (state.pickup, state.drop) else {
        return Err("Please select pickup, drop-off, and set a price.".to_string());
    };
    if state.price_af.trim().is_empty() {
        return Err("Please select pickup, drop-off, and set a price.".to_string());
    }
    if pickup_id == drop_id {
        return Err("Pickup and Drop-off locations cannot be the same.".to_string());
    }

    Ok(RouteForm {
        pickup_id,
        drop_id,
        price_af: state.price_af.trim().to_string(),
        drivers: state.drivers.clone(),
        vehicles: state.vehicles.clone(),
    })
}

// === Vehicle Form ===

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleFormState {
    pub model: String,
    pub plate_number: String,
    pub vehicle_type: VehicleType,
    pub driver: Option<i64>,
}

pub fn extract_vehicle_form_state(vehicle: Option<&Vehicle>) -> VehicleFormState {
    vehicle.map_or_else(VehicleFormState::default, |v| VehicleFormState {
        model: v.model.clone(),
        plate_number: v.plate_number.clone(),
        vehicle_type: v.vehicle_type,
        driver: v.driver,
    })
}

/// Admins creating a vehicle must pick its driver; edits keep the current one.
pub fn validate_vehicle_form(
    state: &VehicleFormState,
    role: Role,
    editing: bool,
    license: Option<Upload>,
) -> Result<VehicleForm, String> {
    if role == Role::Admin && !editing && state.driver.is_none() {
        return Err(
            "As an admin, you must select a driver when creating a new vehicle.".to_string(),
        );
    }
    if state.model.trim().is_empty() || state.plate_number.trim().is_empty() {
        return Err("Model and plate number are required.".to_string());
    }

    Ok(VehicleForm {
        model: state.model.trim().to_string(),
        plate_number: state.plate_number.trim().to_string(),
        vehicle_type: state.vehicle_type,
        driver: state.driver.filter(|_| role == Role::Admin),
        license,
    })
}

// === Driver Applications ===

pub fn validate_application(
    license_number: &str,
    years_of_experience: &str,
) -> Result<DriverApplicationForm, String> {
    let license_number = license_number.trim();
    if license_number.is_empty() {
        return Err("License number is required.".to_string());
    }
    let years_of_experience = years_of_experience
        .trim()
        .parse::<u32>()
        .map_err(|_| "Years of experience must be a whole number.".to_string())?;

    Ok(DriverApplicationForm {
        license_number: license_number.to_string(),
        years_of_experience,
    })
}

// === Contact ===

pub fn validate_contact_message(
    name: &str,
    email: &str,
    message: &str,
) -> Result<ContactMessage, String> {
    let (name, email, message) = (name.trim(), email.trim(), message.trim());
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err("Please fill in all fields.".to_string());
    }
    Ok(ContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

// === Registration ===

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpFormState {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
    pub password2: String,
}

pub fn validate_registration(state: SignUpFormState) -> Result<Registration, String> {
    let required = [
        &state.username,
        &state.first_name,
        &state.last_name,
        &state.email,
        &state.password,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err("Please fill in all fields.".to_string());
    }
    if state.password != state.password2 {
        return Err("Passwords do not match.".to_string());
    }
    if state.role == Role::Admin {
        return Err("Accounts can only be created as passenger or driver.".to_string());
    }

    Ok(Registration {
        username: state.username.trim().to_string(),
        first_name: state.first_name.trim().to_string(),
        last_name: state.last_name.trim().to_string(),
        email: state.email.trim().to_string(),
        role: state.role,
        password: state.password,
        password2: state.password2,
    })
}

// === Profile Form ===

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFormState {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub about_me: String,
    pub gender: String,
    pub country: String,
    pub city: String,
}

pub fn extract_profile_form_state(profile: Option<&Profile>) -> ProfileFormState {
    profile.map_or_else(ProfileFormState::default, |p| ProfileFormState {
        first_name: p.first_name.clone(),
        last_name: p.last_name.clone(),
        phone_number: p.phone_number.clone().unwrap_or_default(),
        about_me: p.about_me.clone().unwrap_or_default(),
        gender: p.gender.clone().unwrap_or_default(),
        country: p.country.clone().unwrap_or_default(),
        city: p.city.clone().unwrap_or_default(),
    })
}

pub fn build_profile_update(state: ProfileFormState, photo: Option<Upload>) -> ProfileUpdate {
    ProfileUpdate {
        first_name: state.first_name,
        last_name: state.last_name,
        phone_number: state.phone_number,
        about_me: state.about_me,
        gender: state.gender,
        country: state.country,
        city: state.city,
        photo,
    }
}

/// The backend sends media paths relative to its own origin.
pub fn profile_photo_url(base_url: &str, photo: Option<&str>) -> Option<String> {
    let photo = photo.map(str::trim).filter(|p| !p.is_empty())?;
    if photo.starts_with("http://") || photo.starts_with("https://") {
        Some(photo.to_string())
    } else if photo.starts_with('/') {
        Some(format!("{base_url}{photo}"))
    } else {
        Some(format!("{base_url}/{photo}"))
    }
}

// === Date Formatting ===

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").ok())
}

/// `2025-01-15T08:30:00Z` → `2025-01-15 08:30`; unparseable input is returned as is.
pub fn format_datetime(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || raw.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
    )
}

pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        .map_or_else(|| raw.to_string(), |d| d.format("%Y-%m-%d").to_string())
}

/// Heading and formatted time for a trip's date column.
pub fn trip_time_display(scheduled_for: Option<&str>, request_time: Option<&str>) -> (&'static str, String) {
    match scheduled_for.filter(|s| !s.trim().is_empty()) {
        Some(at) => ("Scheduled", format_datetime(at)),
        None => (
            "Requested",
            request_time.map_or_else(|| "-".to_string(), format_datetime),
        ),
    }
}

// === Chart ===

/// Height of a bar as a percentage of the tallest one.
pub fn chart_bar_percent(value: u64, max: u64) -> u32 {
    if max == 0 {
        return 0;
    }
    ((value.min(max) * 100) / max) as u32
}

// === Dashboard Sections ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Reporting,
    Users,
    Drivers,
    Trips,
    Applications,
    Vehicles,
    Locations,
    Routes,
    TripRequests,
    RequestTrip,
    MyTrips,
    Profile,
}

impl Section {
    /// Sidebar order.
    pub const ALL: [Self; 12] = [
        Self::Reporting,
        Self::Users,
        Self::Drivers,
        Self::Trips,
        Self::Applications,
        Self::TripRequests,
        Self::RequestTrip,
        Self::MyTrips,
        Self::Vehicles,
        Self::Locations,
        Self::Routes,
        Self::Profile,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Reporting => "reporting",
            Self::Users => "users",
            Self::Drivers => "drivers",
            Self::Trips => "trips",
            Self::Applications => "applications",
            Self::Vehicles => "vehicles",
            Self::Locations => "locations",
            Self::Routes => "routes",
            Self::TripRequests => "trip-requests",
            Self::RequestTrip => "request-trip",
            Self::MyTrips => "my-trips",
            Self::Profile => "profile",
        }
    }

    pub fn label(self, role: Role) -> &'static str {
        match self {
            Self::Reporting => "Dashboard",
            Self::Users => "User management",
            Self::Drivers => "Driver management",
            Self::Trips => "Trip management",
            Self::Applications => "Driver applications",
            Self::Vehicles if role == Role::Driver => "My vehicles",
            Self::Vehicles => "Vehicle management",
            Self::Locations => "Locations",
            Self::Routes => "Routes",
            Self::TripRequests => "Available trips",
            Self::RequestTrip => "Request a trip",
            Self::MyTrips => "My trips",
            Self::Profile => "Profile",
        }
    }

    pub fn parse(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn allowed(self, role: Role) -> bool {
        match self {
            Self::Reporting
            | Self::Users
            | Self::Drivers
            | Self::Trips
            | Self::Applications
            | Self::Locations
            | Self::Routes => role == Role::Admin,
            Self::Vehicles => matches!(role, Role::Admin | Role::Driver),
            Self::TripRequests => role == Role::Driver,
            Self::RequestTrip | Self::MyTrips => role == Role::Passenger,
            Self::Profile => true,
        }
    }

    pub fn href(self) -> String {
        format!("/dashboard/{}", self.slug())
    }
}

pub fn default_section(role: Role) -> Section {
    match role {
        Role::Admin => Section::Reporting,
        Role::Driver => Section::TripRequests,
        Role::Passenger => Section::RequestTrip,
    }
}

/// Unknown or forbidden sections fall back to the role's landing page.
pub fn resolve_section(slug: Option<&str>, role: Role) -> Section {
    slug.and_then(Section::parse)
        .filter(|s| s.allowed(role))
        .unwrap_or_else(|| default_section(role))
}

pub fn menu_items(role: Role) -> Vec<Section> {
    Section::ALL
        .into_iter()
        .filter(|s| s.allowed(role))
        .collect()
}
