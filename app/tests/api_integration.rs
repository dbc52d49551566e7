//! Integration tests for the REST client using wiremock
//!
//! Tests HTTP interactions with a mocked YouRide backend

#![allow(clippy::unwrap_used)]

use app::api::ApiClient;
use app::error::ApiError;
use app::store::authenticate;
use app::types::{
    AdminUserUpdate, ApplicationStatus, ContactMessage, Credentials, DriverApplicationForm,
    LocationForm, ProfileUpdate, Role, RouteForm, TripRequest, TripStatus, Upload, VehicleForm,
    VehicleType,
};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{
    body_json, body_string_contains, header, header_exists, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRIP_ID: &str = "1d7c9f6e-2b3a-4c5d-8e9f-0a1b2c3d4e5f";

fn location_json(pk: i64, name: &str) -> serde_json::Value {
    json!({"id": Uuid::new_v4(), "pk": pk, "name": name})
}

fn profile_json(pkid: i64, name: &str, role: &str) -> serde_json::Value {
    json!({
        "user_pkid": pkid,
        "first_name": name,
        "last_name": "Karimi",
        "full_name": format!("{name} Karimi"),
        "email": format!("{}@youride.af", name.to_lowercase()),
        "role": role
    })
}

/// A route the way the backend's route serializer writes it.
fn route_json(pk: i64) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "pk": pk,
        "pickup": location_json(1, "Kabul"),
        "drop": location_json(2, "Herat"),
        "price_af": "1500.00",
        "drivers": [3],
        "vehicles": [5]
    })
}

/// A trip from the passenger trip list (`GET /vehicle/trips/`).
fn passenger_trip_json(status: &str) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "route": route_json(4),
        "distance_km": 0.0,
        "fare": "1500.00",
        "status": status,
        "request_time": "2025-01-15T08:30:00.123456Z",
        "start_time": null,
        "end_time": null,
        "passenger_count": 2,
        "notes_for_driver": "",
        "scheduled_for": null
    })
}

/// A trip from the admin trip list, before a driver is assigned.
fn admin_trip_json() -> serde_json::Value {
    json!({
        "id": TRIP_ID,
        "passenger": "Zahra Karimi",
        "driver": null,
        "driver_name": null,
        "route": route_json(4),
        "fare": "1500.00",
        "status": "requested",
        "request_time": "2025-01-15T08:30:00Z",
        "passenger_count": 1,
        "notes_for_driver": "Near the blue gate",
        "scheduled_for": "2025-01-16T06:00:00Z"
    })
}

fn vehicle_json(pk: i64) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "pk": pk,
        "driver": 3,
        "driver_name": "Ahmad Karimi",
        "model": "Toyota Corolla",
        "plate_number": "KBL-1234",
        "license": null,
        "type": "economy"
    })
}

fn authed(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri()).with_token(Some("access-token".to_string()))
}

// === Auth ===

#[tokio::test]
async fn test_authenticate_fetches_profile_with_new_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/token/"))
        .and(body_json(json!({"email": "sara@youride.af", "password": "secret"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "new-access", "refresh": "new-refresh"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/profiles/me/"))
        .and(header("Authorization", "Bearer new-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"profile": profile_json(7, "Sara", "driver")})))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let credentials = Credentials {
        email: "sara@youride.af".to_string(),
        password: "secret".to_string(),
    };
    let (tokens, profile) = authenticate(&client, &credentials).await.unwrap();

    assert_eq!(tokens.access, "new-access");
    assert_eq!(tokens.refresh, "new-refresh");
    assert_eq!(profile.role, Role::Driver);
    assert_eq!(profile.full_name, "Sara Karimi");
}

#[tokio::test]
async fn test_bad_credentials_surface_backend_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = authenticate(&client, &Credentials::default()).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "No active account found with the given credentials");
}

#[tokio::test]
async fn test_register_sends_no_authorization_header() {
    let server = MockServer::start().await;

    // Mounted first so it wins if the header leaks.
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register/"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(400))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register/"))
        .and(body_string_contains("\"role\":\"passenger\""))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let registration = app::types::Registration {
        username: "sara".to_string(),
        first_name: "Sara".to_string(),
        last_name: "Ahmadi".to_string(),
        email: "sara@youride.af".to_string(),
        role: Role::Passenger,
        password: "pw".to_string(),
        password2: "pw".to_string(),
    };
    ApiClient::new(server.uri()).register(&registration).await.unwrap();
}

#[tokio::test]
async fn test_register_field_errors_are_joined() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "email": ["user with this email already exists."]
        })))
        .mount(&server)
        .await;

    let registration = app::types::Registration {
        username: "sara".to_string(),
        first_name: "Sara".to_string(),
        last_name: "Ahmadi".to_string(),
        email: "sara@youride.af".to_string(),
        role: Role::Passenger,
        password: "pw".to_string(),
        password2: "pw".to_string(),
    };
    let err = ApiClient::new(server.uri()).register(&registration).await.unwrap_err();

    assert_eq!(err.to_string(), "email: user with this email already exists.");
}

// === Profiles ===

#[tokio::test]
async fn test_my_profile_without_token_is_rejected_locally() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/profiles/me/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = ApiClient::new(server.uri()).my_profile().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn test_update_profile_sends_multipart_without_blank_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/profiles/me/update/"))
        .and(header("Authorization", "Bearer access-token"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let update = ProfileUpdate {
        first_name: "Sara".to_string(),
        last_name: "Ahmadi".to_string(),
        city: "Herat".to_string(),
        photo: Some(Upload {
            file_name: "me.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }),
        ..ProfileUpdate::default()
    };
    authed(&server).update_profile(update).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"first_name\""));
    assert!(body.contains("Herat"));
    assert!(body.contains("name=\"profile_photo\"; filename=\"me.png\""));
    assert!(!body.contains("name=\"phone_number\""));
}

#[tokio::test]
async fn test_all_profiles_unwraps_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/profiles/all/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "profiles": {
                "count": 2,
                "next": null,
                "previous": null,
                "results": [profile_json(3, "Ahmad", "driver"), profile_json(4, "Zahra", "passenger")]
            }
        })))
        .mount(&server)
        .await;

    let profiles = authed(&server).all_profiles().await.unwrap();
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].user_pkid, 3);
}

#[tokio::test]
async fn test_update_admin_user_patches_only_given_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/profiles/admin/users/12/"))
        .and(body_json(json!({"is_active": false})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let update = AdminUserUpdate {
        is_active: Some(false),
        ..AdminUserUpdate::default()
    };
    authed(&server).update_admin_user(12, &update).await.unwrap();
}

// === Locations & routes ===

#[tokio::test]
async fn test_locations_page_reads_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/locations/"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 14,
            "next": null,
            "previous": "http://127.0.0.1:8000/api/v1/vehicle/locations/?page=1",
            "results": [location_json(11, "Kandahar"), location_json(12, "Bamyan")]
        })))
        .mount(&server)
        .await;

    let (locations, count) = authed(&server).locations_page(2, 10).await.unwrap();
    assert_eq!(count, 14);
    assert_eq!(locations[1].name, "Bamyan");
}

#[tokio::test]
async fn test_locations_accepts_plain_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/locations/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([location_json(1, "Kabul"), location_json(2, "Herat")])),
        )
        .mount(&server)
        .await;

    let locations = authed(&server).locations().await.unwrap();
    assert_eq!(locations.len(), 2);
}

#[tokio::test]
async fn test_route_form_data_fails_when_any_part_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/locations/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([location_json(1, "Kabul")])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/profiles/all/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/admin/vehicles/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = authed(&server).route_form_data().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "boom");
}

#[tokio::test]
async fn test_create_route_posts_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/vehicle/vehicle/routes/"))
        .and(body_json(json!({
            "pickup_id": 1,
            "drop_id": 2,
            "price_af": "1500",
            "drivers": [3],
            "vehicles": []
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": Uuid::new_v4(),
            "pk": 9,
            "pickup": location_json(1, "Kabul"),
            "drop": location_json(2, "Herat"),
            "price_af": "1500.00",
            "drivers": [3],
            "vehicles": []
        })))
        .mount(&server)
        .await;

    let form = RouteForm {
        pickup_id: 1,
        drop_id: 2,
        price_af: "1500".to_string(),
        drivers: vec![3],
        vehicles: vec![],
    };
    let route = authed(&server).create_route(&form).await.unwrap();
    assert_eq!(route.pk, 9);
    assert_eq!(route.drop.name, "Herat");
}

// === Vehicles ===

#[tokio::test]
async fn test_driver_vehicle_form_omits_driver_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/vehicle/driver/vehicles/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": Uuid::new_v4(),
            "pk": 5,
            "driver": 7,
            "model": "Toyota Corolla",
            "plate_number": "KBL-1234",
            "type": "economy"
        })))
        .mount(&server)
        .await;

    let form = VehicleForm {
        model: "Toyota Corolla".to_string(),
        plate_number: "KBL-1234".to_string(),
        vehicle_type: VehicleType::Economy,
        driver: Some(99),
        license: None,
    };
    let vehicle = authed(&server).create_vehicle(Role::Driver, form).await.unwrap();
    assert_eq!(vehicle.pk, 5);

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"plate_number\""));
    assert!(!body.contains("name=\"driver\""));
}

#[tokio::test]
async fn test_admin_vehicle_form_includes_driver() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/vehicle/admin/vehicles/"))
        .and(body_string_contains("name=\"driver\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": Uuid::new_v4(),
            "pk": 6,
            "driver": 99,
            "model": "Hyundai H1",
            "plate_number": "HRT-77",
            "type": "van"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let form = VehicleForm {
        model: "Hyundai H1".to_string(),
        plate_number: "HRT-77".to_string(),
        vehicle_type: VehicleType::Van,
        driver: Some(99),
        license: None,
    };
    authed(&server).create_vehicle(Role::Admin, form).await.unwrap();
}

// === Trips ===

#[tokio::test]
async fn test_request_trip_posts_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/vehicle/trips/"))
        .and(header("Authorization", "Bearer access-token"))
        .and(body_json(json!({
            "route_id": 4,
            "passenger_count": 2,
            "notes_for_driver": "Two bags",
            "scheduled_for": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": TRIP_ID,
            "status": "requested",
            "request_time": "2025-01-15T08:30:00Z",
            "passenger_count": 2,
            "notes_for_driver": "Two bags"
        })))
        .mount(&server)
        .await;

    let request = TripRequest {
        route_id: 4,
        passenger_count: 2,
        notes_for_driver: "Two bags".to_string(),
        scheduled_for: None,
    };
    let trip = authed(&server).request_trip(&request).await.unwrap();
    assert_eq!(trip.status, TripStatus::Requested);
}

#[tokio::test]
async fn test_accept_trip_returns_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/vehicle/trips/42/accept/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "Trip accepted."})))
        .mount(&server)
        .await;

    let detail = authed(&server).accept_trip(42).await.unwrap();
    assert_eq!(detail, "Trip accepted.");
}

#[tokio::test]
async fn test_assign_driver_moves_trip_in_progress() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(format!("/api/v1/vehicle/trips/{TRIP_ID}/")))
        .and(body_json(json!({"driver": 3, "status": "in_progress"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let id = Uuid::parse_str(TRIP_ID).unwrap();
    authed(&server).assign_driver(id, 3).await.unwrap();
}

#[tokio::test]
async fn test_driver_board_loads_both_lists() {
    let server = MockServer::start().await;

    let trip = |pk: i64, status: &str| {
        json!({
            "id": Uuid::new_v4(),
            "pk": pk,
            "passenger_name": "Zahra",
            "status": status,
            "notes_for_driver": ""
        })
    };

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/driver/available-trips/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([trip(1, "requested"), trip(2, "requested")])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/driver/trips/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [trip(3, "in_progress")]
        })))
        .mount(&server)
        .await;

    let (available, assigned) = authed(&server).driver_board().await.unwrap();
    assert_eq!(available.len(), 2);
    assert_eq!(assigned[0].status, TripStatus::InProgress);
}

// === Applications & reporting ===

#[tokio::test]
async fn test_review_application_patches_status() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(format!("/api/v1/vehicle/admin/applications/{TRIP_ID}/")))
        .and(body_json(json!({"status": "approved"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let id = Uuid::parse_str(TRIP_ID).unwrap();
    authed(&server)
        .review_application(id, ApplicationStatus::Approved)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dashboard_stats_decodes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/admin/dashboard-stats/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kpi": {
                "total_users": 40,
                "total_drivers": 8,
                "total_passengers": 31,
                "total_trips": 120,
                "pending_applications": 2
            },
            "recent_trips": [],
            "chart_data": [{"date": "2025-01-14", "trips": 7}]
        })))
        .mount(&server)
        .await;

    let stats = authed(&server).dashboard_stats().await.unwrap();
    assert_eq!(stats.kpi.total_trips, 120);
    assert_eq!(stats.chart_data[0].trips, 7);
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/admin/dashboard-stats/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = authed(&server).dashboard_stats().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.status(), None);
}

// === Trip lists ===

#[tokio::test]
async fn test_my_trips_decodes_backend_trip_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/trips/"))
        .and(header("Authorization", "Bearer access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [passenger_trip_json("completed"), passenger_trip_json("in_progress")]
        })))
        .mount(&server)
        .await;

    let trips = authed(&server).my_trips().await.unwrap();
    assert_eq!(trips.len(), 2);
    assert_eq!(trips[0].status, TripStatus::Completed);
    assert_eq!(trips[0].fare.as_deref(), Some("1500.00"));
    assert_eq!(trips[0].route.as_ref().unwrap().drivers, vec![3]);
    assert_eq!(trips[1].passenger_count, 2);
}

#[tokio::test]
async fn test_unrecognised_status_keeps_the_rest_of_the_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/trips/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            passenger_trip_json("completed"),
            passenger_trip_json("pending")
        ])))
        .mount(&server)
        .await;

    let trips = authed(&server).my_trips().await.unwrap();
    assert_eq!(trips.len(), 2);
    assert_eq!(trips[0].status, TripStatus::Completed);
    assert_eq!(trips[1].status, TripStatus::Unknown);
}

#[tokio::test]
async fn test_admin_trip_board_loads_trips_and_profiles() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/admin/trips/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [admin_trip_json()]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/profiles/all/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "profiles": [profile_json(3, "Ahmad", "driver")]
        })))
        .mount(&server)
        .await;

    let (trips, profiles) = authed(&server).admin_trip_board().await.unwrap();
    assert_eq!(trips[0].passenger, "Zahra Karimi");
    assert_eq!(trips[0].driver, None);
    assert_eq!(trips[0].route.pk, 4);
    assert_eq!(trips[0].scheduled_for.as_deref(), Some("2025-01-16T06:00:00Z"));
    assert_eq!(profiles[0].role, Role::Driver);
}

#[tokio::test]
async fn test_admin_trip_board_fails_when_profiles_fail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/admin/trips/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([admin_trip_json()])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/profiles/all/"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"detail": "You do not have permission to perform this action."})),
        )
        .mount(&server)
        .await;

    let err = authed(&server).admin_trip_board().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "You do not have permission to perform this action.");
}

#[tokio::test]
async fn test_update_trip_status_patches_cancelled() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(format!("/api/v1/vehicle/trips/{TRIP_ID}/")))
        .and(body_json(json!({"status": "cancelled"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "cancelled"})))
        .expect(1)
        .mount(&server)
        .await;

    let id = Uuid::parse_str(TRIP_ID).unwrap();
    authed(&server)
        .update_trip_status(id, TripStatus::Cancelled)
        .await
        .unwrap();
}

// === Users, applications & vehicles ===

#[tokio::test]
async fn test_admin_users_decodes_user_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/profiles/admin/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "pkid": 12,
            "id": Uuid::new_v4(),
            "username": "sara",
            "email": "sara@youride.af",
            "full_name": "Sara Ahmadi",
            "role": "driver",
            "is_active": false,
            "date_joined": "2025-01-01T09:00:00Z"
        }])))
        .mount(&server)
        .await;

    let users = authed(&server).admin_users().await.unwrap();
    assert_eq!(users[0].pkid, 12);
    assert_eq!(users[0].role, Role::Driver);
    assert!(!users[0].is_active);
}

#[tokio::test]
async fn test_apply_as_driver_posts_application() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/vehicle/driver/apply/"))
        .and(header("Authorization", "Bearer access-token"))
        .and(body_json(json!({"license_number": "LIC-9", "years_of_experience": 4})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": Uuid::new_v4(),
            "license_number": "LIC-9",
            "years_of_experience": 4,
            "status": "pending"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let form = DriverApplicationForm {
        license_number: "LIC-9".to_string(),
        years_of_experience: 4,
    };
    authed(&server).apply_as_driver(&form).await.unwrap();
}

#[tokio::test]
async fn test_second_application_is_rejected_with_backend_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/vehicle/driver/apply/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!(["You have already submitted an application."])),
        )
        .mount(&server)
        .await;

    let form = DriverApplicationForm {
        license_number: "LIC-9".to_string(),
        years_of_experience: 4,
    };
    let err = authed(&server).apply_as_driver(&form).await.unwrap_err();
    assert_eq!(err.to_string(), "You have already submitted an application.");
}

#[tokio::test]
async fn test_applications_decodes_admin_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/admin/applications/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": TRIP_ID,
            "applicant_name": "Farid Noori",
            "license_number": "LIC-1",
            "years_of_experience": 6,
            "status": "pending",
            "reviewed_by": null
        }])))
        .mount(&server)
        .await;

    let applications = authed(&server).applications().await.unwrap();
    assert_eq!(applications[0].applicant_name.as_deref(), Some("Farid Noori"));
    assert_eq!(applications[0].status, ApplicationStatus::Pending);
    assert_eq!(applications[0].reviewed_by, None);
}

#[tokio::test]
async fn test_driver_vehicles_use_driver_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicle/driver/vehicles/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([vehicle_json(5)])))
        .expect(1)
        .mount(&server)
        .await;

    let vehicles = authed(&server).vehicles_for(Role::Driver).await.unwrap();
    assert_eq!(vehicles[0].plate_number, "KBL-1234");
    assert_eq!(vehicles[0].vehicle_type, VehicleType::Economy);
}

// === Updates & deletes ===

#[tokio::test]
async fn test_location_update_and_delete_use_detail_path() {
    let server = MockServer::start().await;
    let id = Uuid::parse_str(TRIP_ID).unwrap();

    Mock::given(method("PUT"))
        .and(path(format!("/api/v1/vehicle/locations/{TRIP_ID}/")))
        .and(body_json(json!({"name": "Mazar-i-Sharif"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": TRIP_ID,
            "pk": 7,
            "name": "Mazar-i-Sharif"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/vehicle/locations/{TRIP_ID}/")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed(&server);
    let form = LocationForm {
        name: "Mazar-i-Sharif".to_string(),
    };
    let location = client.update_location(id, &form).await.unwrap();
    assert_eq!(location.pk, 7);
    client.delete_location(id).await.unwrap();
}

#[tokio::test]
async fn test_route_update_and_delete_use_pk() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/vehicle/vehicle/routes/4/"))
        .and(body_json(json!({
            "pickup_id": 1,
            "drop_id": 2,
            "price_af": "1800",
            "drivers": [3],
            "vehicles": [5]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(route_json(4)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/vehicle/vehicle/routes/4/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed(&server);
    let form = RouteForm {
        pickup_id: 1,
        drop_id: 2,
        price_af: "1800".to_string(),
        drivers: vec![3],
        vehicles: vec![5],
    };
    client.update_route(4, &form).await.unwrap();
    client.delete_route(4).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_route_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/vehicle/vehicle/routes/4/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "non_field_errors": ["This route already exists."]
        })))
        .mount(&server)
        .await;

    let form = RouteForm {
        pickup_id: 1,
        drop_id: 2,
        price_af: "1800".to_string(),
        drivers: vec![],
        vehicles: vec![],
    };
    let err = authed(&server).update_route(4, &form).await.unwrap_err();
    assert_eq!(err.to_string(), "non_field_errors: This route already exists.");
}

#[tokio::test]
async fn test_vehicle_update_patches_multipart_and_delete() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(format!("/api/v1/vehicle/vehicles/{TRIP_ID}/")))
        .and(header_exists("content-type"))
        .and(body_string_contains("name=\"model\""))
        .and(body_string_contains("filename=\"license.pdf\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(vehicle_json(5)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/vehicle/vehicles/{TRIP_ID}/")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed(&server);
    let id = Uuid::parse_str(TRIP_ID).unwrap();
    let form = VehicleForm {
        model: "Toyota Corolla".to_string(),
        plate_number: "KBL-1234".to_string(),
        vehicle_type: VehicleType::Economy,
        driver: None,
        license: Some(Upload {
            file_name: "license.pdf".to_string(),
            mime: "application/pdf".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        }),
    };
    let vehicle = client.update_vehicle(id, Role::Driver, form).await.unwrap();
    assert_eq!(vehicle.pk, 5);
    client.delete_vehicle(id).await.unwrap();
}

// === Contact ===

#[tokio::test]
async fn test_contact_message_is_posted_anonymously() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/notification/contacts/"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(400))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/notification/contacts/"))
        .and(body_json(json!({
            "name": "Mariam",
            "email": "mariam@example.com",
            "message": "Do you drive to Bamyan?"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let message = ContactMessage {
        name: "Mariam".to_string(),
        email: "mariam@example.com".to_string(),
        message: "Do you drive to Bamyan?".to_string(),
    };
    ApiClient::new(server.uri())
        .send_contact_message(&message)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_contact_email_error_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/notification/contacts/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"email": ["Enter a valid email address."]})),
        )
        .mount(&server)
        .await;

    let message = ContactMessage {
        name: "Mariam".to_string(),
        email: "not-an-email".to_string(),
        message: "Hello".to_string(),
    };
    let err = ApiClient::new(server.uri())
        .send_contact_message(&message)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "email: Enter a valid email address.");
}
