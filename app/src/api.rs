//! REST client for the YouRide backend.
//!
//! Every request goes through [`ApiClient::request`], which attaches
//! `Authorization: Bearer <token>` whenever the client carries a token.
//! Non-2xx answers become [`ApiError::Status`] with the message extracted
//! from the body, ready to be shown in a toast.

use crate::error::{ApiError, Result, error_message};
use crate::types::{
    AdminTrip, AdminUser, AdminUserUpdate, ApplicationReview, ApplicationStatus, ContactMessage,
    Credentials, DashboardStats, Detail, DriverApplication, DriverApplicationForm, DriverTrip,
    ListResponse, Location, LocationForm, PassengerTrip, Profile, ProfileEnvelope, ProfileUpdate,
    ProfilesEnvelope, Registration, Role, Route, RouteForm, TokenPair, TripAssignment,
    TripRequest, TripStatus, TripStatusUpdate, Upload, Vehicle, VehicleForm,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

/// Everything the route management form needs before it can render.
#[derive(Debug, Clone, Default)]
pub struct RouteFormData {
    pub locations: Vec<Location>,
    pub profiles: Vec<Profile>,
    pub vehicles: Vec<Vehicle>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: crate::config::normalize_base_url(&base_url.into()),
            token: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn require_token(&self) -> Result<()> {
        if self.has_token() {
            Ok(())
        } else {
            Err(ApiError::Unauthorized)
        }
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T> {
        let response = check_status(builder.send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_empty(builder: RequestBuilder) -> Result<()> {
        check_status(builder.send().await?).await?;
        Ok(())
    }

    // === Auth ===

    pub async fn obtain_token(&self, credentials: &Credentials) -> Result<TokenPair> {
        Self::send(
            self.request(Method::POST, "/api/v1/auth/token/")
                .json(credentials),
        )
        .await
    }

    pub async fn register(&self, registration: &Registration) -> Result<()> {
        Self::send_empty(
            self.request(Method::POST, "/api/v1/auth/register/")
                .json(registration),
        )
        .await
    }

    // === Profiles ===

    pub async fn my_profile(&self) -> Result<Profile> {
        self.require_token()?;
        let envelope: ProfileEnvelope =
            Self::send(self.request(Method::GET, "/api/v1/profiles/me/")).await?;
        Ok(envelope.profile)
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<()> {
        self.require_token()?;
        let form = profile_form(update)?;
        Self::send_empty(
            self.request(Method::PUT, "/api/v1/profiles/me/update/")
                .multipart(form),
        )
        .await
    }

    pub async fn all_profiles(&self) -> Result<Vec<Profile>> {
        let envelope: ProfilesEnvelope =
            Self::send(self.request(Method::GET, "/api/v1/profiles/all/")).await?;
        Ok(envelope.profiles.into_items())
    }

    pub async fn admin_users(&self) -> Result<Vec<AdminUser>> {
        let list: ListResponse<AdminUser> =
            Self::send(self.request(Method::GET, "/api/v1/profiles/admin/users/")).await?;
        Ok(list.into_items())
    }

    pub async fn update_admin_user(&self, pkid: i64, update: &AdminUserUpdate) -> Result<()> {
        Self::send_empty(
            self.request(Method::PATCH, &format!("/api/v1/profiles/admin/users/{pkid}/"))
                .json(update),
        )
        .await
    }

    // === Locations ===

    /// One page of locations plus the total count reported by the server.
    pub async fn locations_page(&self, page: u32, page_size: u32) -> Result<(Vec<Location>, u64)> {
        let list: ListResponse<Location> = Self::send(
            self.request(Method::GET, "/api/v1/vehicle/locations/")
                .query(&[("page", page), ("page_size", page_size)]),
        )
        .await?;
        let count = list.count();
        Ok((list.into_items(), count))
    }

    pub async fn locations(&self) -> Result<Vec<Location>> {
        let list: ListResponse<Location> =
            Self::send(self.request(Method::GET, "/api/v1/vehicle/locations/")).await?;
        Ok(list.into_items())
    }

    pub async fn create_location(&self, form: &LocationForm) -> Result<Location> {
        Self::send(
            self.request(Method::POST, "/api/v1/vehicle/locations/")
                .json(form),
        )
        .await
    }

    pub async fn update_location(&self, id: Uuid, form: &LocationForm) -> Result<Location> {
        Self::send(
            self.request(Method::PUT, &format!("/api/v1/vehicle/locations/{id}/"))
                .json(form),
        )
        .await
    }

    pub async fn delete_location(&self, id: Uuid) -> Result<()> {
        Self::send_empty(self.request(Method::DELETE, &format!("/api/v1/vehicle/locations/{id}/")))
            .await
    }

    // === Routes ===

    pub async fn routes(&self) -> Result<Vec<Route>> {
        let list: ListResponse<Route> =
            Self::send(self.request(Method::GET, "/api/v1/vehicle/vehicle/routes/")).await?;
        Ok(list.into_items())
    }

    pub async fn create_route(&self, form: &RouteForm) -> Result<Route> {
        Self::send(
            self.request(Method::POST, "/api/v1/vehicle/vehicle/routes/")
                .json(form),
        )
        .await
    }

    pub async fn update_route(&self, pk: i64, form: &RouteForm) -> Result<Route> {
        Self::send(
            self.request(Method::PUT, &format!("/api/v1/vehicle/vehicle/routes/{pk}/"))
                .json(form),
        )
        .await
    }

    pub async fn delete_route(&self, pk: i64) -> Result<()> {
        Self::send_empty(
            self.request(Method::DELETE, &format!("/api/v1/vehicle/vehicle/routes/{pk}/")),
        )
        .await
    }

    /// Locations, profiles and vehicles, loaded together.
    pub async fn route_form_data(&self) -> Result<RouteFormData> {
        let (locations, profiles, vehicles) = futures::try_join!(
            self.locations(),
            self.all_profiles(),
            self.vehicles_for(Role::Admin)
        )?;
        Ok(RouteFormData {
            locations,
            profiles,
            vehicles,
        })
    }

    // === Vehicles ===

    /// Admins see every vehicle, drivers only their own.
    pub async fn vehicles_for(&self, role: Role) -> Result<Vec<Vehicle>> {
        let list: ListResponse<Vehicle> =
            Self::send(self.request(Method::GET, vehicles_path(role))).await?;
        Ok(list.into_items())
    }

    pub async fn create_vehicle(&self, role: Role, form: VehicleForm) -> Result<Vehicle> {
        let body = vehicle_form(form, role == Role::Admin)?;
        Self::send(self.request(Method::POST, vehicles_path(role)).multipart(body)).await
    }

    pub async fn update_vehicle(&self, id: Uuid, role: Role, form: VehicleForm) -> Result<Vehicle> {
        let body = vehicle_form(form, role == Role::Admin)?;
        Self::send(
            self.request(Method::PATCH, &format!("/api/v1/vehicle/vehicles/{id}/"))
                .multipart(body),
        )
        .await
    }

    pub async fn delete_vehicle(&self, id: Uuid) -> Result<()> {
        Self::send_empty(self.request(Method::DELETE, &format!("/api/v1/vehicle/vehicles/{id}/")))
            .await
    }

    // === Trips ===

    pub async fn my_trips(&self) -> Result<Vec<PassengerTrip>> {
        let list: ListResponse<PassengerTrip> =
            Self::send(self.request(Method::GET, "/api/v1/vehicle/trips/")).await?;
        Ok(list.into_items())
    }

    pub async fn request_trip(&self, request: &TripRequest) -> Result<PassengerTrip> {
        Self::send(
            self.request(Method::POST, "/api/v1/vehicle/trips/")
                .json(request),
        )
        .await
    }

    pub async fn admin_trips(&self) -> Result<Vec<AdminTrip>> {
        let list: ListResponse<AdminTrip> =
            Self::send(self.request(Method::GET, "/api/v1/vehicle/admin/trips/")).await?;
        Ok(list.into_items())
    }

    /// Admin trip list together with the profiles drivers are picked from.
    pub async fn admin_trip_board(&self) -> Result<(Vec<AdminTrip>, Vec<Profile>)> {
        futures::try_join!(self.admin_trips(), self.all_profiles())
    }

    pub async fn available_trips(&self) -> Result<Vec<DriverTrip>> {
        let list: ListResponse<DriverTrip> = Self::send(
            self.request(Method::GET, "/api/v1/vehicle/driver/available-trips/"),
        )
        .await?;
        Ok(list.into_items())
    }

    pub async fn assigned_trips(&self) -> Result<Vec<DriverTrip>> {
        let list: ListResponse<DriverTrip> =
            Self::send(self.request(Method::GET, "/api/v1/vehicle/driver/trips/")).await?;
        Ok(list.into_items())
    }

    /// Available and assigned trips for the signed-in driver, loaded together.
    pub async fn driver_board(&self) -> Result<(Vec<DriverTrip>, Vec<DriverTrip>)> {
        futures::try_join!(self.available_trips(), self.assigned_trips())
    }

    pub async fn accept_trip(&self, pk: i64) -> Result<String> {
        let detail: Detail = Self::send(
            self.request(Method::POST, &format!("/api/v1/vehicle/trips/{pk}/accept/")),
        )
        .await?;
        Ok(detail.detail)
    }

    pub async fn update_trip_status(&self, id: Uuid, status: TripStatus) -> Result<()> {
        Self::send_empty(
            self.request(Method::PATCH, &format!("/api/v1/vehicle/trips/{id}/"))
                .json(&TripStatusUpdate { status }),
        )
        .await
    }

    /// Assigning a driver always moves the trip to `in_progress`.
    pub async fn assign_driver(&self, id: Uuid, driver: i64) -> Result<()> {
        Self::send_empty(
            self.request(Method::PATCH, &format!("/api/v1/vehicle/trips/{id}/"))
                .json(&TripAssignment {
                    driver,
                    status: TripStatus::InProgress,
                }),
        )
        .await
    }

    // === Driver applications ===

    pub async fn apply_as_driver(&self, form: &DriverApplicationForm) -> Result<()> {
        Self::send_empty(
            self.request(Method::POST, "/api/v1/vehicle/driver/apply/")
                .json(form),
        )
        .await
    }

    pub async fn applications(&self) -> Result<Vec<DriverApplication>> {
        let list: ListResponse<DriverApplication> =
            Self::send(self.request(Method::GET, "/api/v1/vehicle/admin/applications/")).await?;
        Ok(list.into_items())
    }

    pub async fn review_application(&self, id: Uuid, status: ApplicationStatus) -> Result<()> {
        Self::send_empty(
            self.request(
                Method::PATCH,
                &format!("/api/v1/vehicle/admin/applications/{id}/"),
            )
            .json(&ApplicationReview { status }),
        )
        .await
    }

    // === Contact ===

    /// Anonymous visitors may write in too; no token is required.
    pub async fn send_contact_message(&self, message: &ContactMessage) -> Result<()> {
        Self::send_empty(
            self.request(Method::POST, "/api/v1/notification/contacts/")
                .json(message),
        )
        .await
    }

    // === Reporting ===

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        Self::send(self.request(Method::GET, "/api/v1/vehicle/admin/dashboard-stats/")).await
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);
    warn!("Request rejected with {}: {}", status, message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

pub fn vehicles_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/api/v1/vehicle/admin/vehicles/",
        Role::Driver | Role::Passenger => "/api/v1/vehicle/driver/vehicles/",
    }
}

fn upload_part(upload: Upload) -> Result<Part> {
    Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str(&upload.mime)
        .map_err(|e| ApiError::Validation(format!("Invalid file type: {e}")))
}

/// Only admins may set the driver; drivers are assigned server-side.
fn vehicle_form(form: VehicleForm, include_driver: bool) -> Result<Form> {
    let mut body = Form::new()
        .text("model", form.model)
        .text("plate_number", form.plate_number)
        .text("type", form.vehicle_type.as_str());

    if let Some(driver) = form.driver.filter(|_| include_driver) {
        body = body.text("driver", driver.to_string());
    }

    if let Some(license) = form.license {
        body = body.part("license", upload_part(license)?);
    }

    Ok(body)
}

/// Blank fields are left out, like the multipart the backend already expects.
fn profile_form(update: ProfileUpdate) -> Result<Form> {
    let fields = [
        ("first_name", update.first_name),
        ("last_name", update.last_name),
        ("phone_number", update.phone_number),
        ("about_me", update.about_me),
        ("gender", update.gender),
        ("country", update.country),
        ("city", update.city),
    ];

    let mut body = Form::new();
    for (key, value) in fields {
        if !value.trim().is_empty() {
            body = body.text(key, value);
        }
    }

    if let Some(photo) = update.photo {
        body = body.part("profile_photo", upload_part(photo)?);
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token_ignores_empty_token() {
        let client = ApiClient::new("http://localhost:8000").with_token(Some(String::new()));
        assert!(!client.has_token());
    }

    #[test]
    fn test_with_token_keeps_token() {
        let client = ApiClient::new("http://localhost:8000").with_token(Some("abc".to_string()));
        assert!(client.has_token());
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.url("/api/v1/profiles/me/"),
            "http://localhost:8000/api/v1/profiles/me/"
        );
    }

    #[test]
    fn test_vehicles_path_by_role() {
        assert_eq!(vehicles_path(Role::Admin), "/api/v1/vehicle/admin/vehicles/");
        assert_eq!(vehicles_path(Role::Driver), "/api/v1/vehicle/driver/vehicles/");
    }

    #[test]
    fn test_require_token_without_token() {
        let client = ApiClient::new("http://localhost:8000");
        assert!(matches!(client.require_token(), Err(ApiError::Unauthorized)));
    }
}
