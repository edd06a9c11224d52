use std::str::FromStr;

use actix_web::{
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test, web, App,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use supremo_booking::{checkout::CheckoutClient, db, routes, state::AppState};

async fn seeded_state(checkout_base: &str) -> AppState {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    db::run_migrations(&pool).await.unwrap();
    db::seed_defaults(&pool).await.unwrap();

    AppState {
        db: pool,
        checkout: CheckoutClient::new(checkout_base),
    }
}

async fn booking_app(
    checkout_base: &str,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let state = seeded_state(checkout_base).await;
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::public::configure),
    )
    .await
}

fn full_form(step: &str, action: &str) -> Vec<(&'static str, String)> {
    vec![
        ("step", step.to_string()),
        ("action", action.to_string()),
        ("guest_name", "Jane Doe".to_string()),
        ("guest_phone", "+63 9171234567".to_string()),
        ("haircut_id", "buzz".to_string()),
        ("service_id", "classic-cut".to_string()),
        ("date", "2026-08-15".to_string()),
        ("time", "10:00".to_string()),
        ("barber_id", "marco-reyes".to_string()),
    ]
}

async fn post_book(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    form: &[(&str, String)],
) -> ServiceResponse {
    let req = test::TestRequest::post()
        .uri("/book")
        .set_form(form)
        .to_request();
    test::call_service(app, req).await
}

async fn body_text(response: ServiceResponse) -> String {
    let body = test::read_body(response).await;
    String::from_utf8_lossy(&body).to_string()
}

#[actix_web::test]
async fn home_page_is_static_markup() {
    let app = booking_app("http://127.0.0.1:1").await;
    let req = test::TestRequest::get().uri("/").to_request();
    let body = body_text(test::call_service(&app, req).await).await;

    assert!(body.contains("Supremo Barbershop"));
    assert!(body.contains("Guest Booking"));
    assert!(body.contains("No account needed"));
    // Account entry points are presentational only; there is no login flow.
    assert!(body.contains("Customer Login"));
    assert!(body.contains("Staff Login"));
}

#[actix_web::test]
async fn fresh_wizard_opens_on_guest_details() {
    let app = booking_app("http://127.0.0.1:1").await;
    let req = test::TestRequest::get().uri("/book").to_request();
    let body = body_text(test::call_service(&app, req).await).await;

    assert!(body.contains("Guest Information"));
    assert!(body.contains("Select Haircut Style"));
}

#[actix_web::test]
async fn missing_name_blocks_the_first_step() {
    let app = booking_app("http://127.0.0.1:1").await;
    let mut form = full_form("1", "next");
    form.retain(|(key, _)| *key != "guest_name");

    let body = body_text(post_book(&app, &form).await).await;
    assert!(body.contains("Full Name is required to proceed."));
    assert!(body.contains("Guest Information"));
}

#[actix_web::test]
async fn missing_style_blocks_the_first_step() {
    let app = booking_app("http://127.0.0.1:1").await;
    let mut form = full_form("1", "next");
    form.retain(|(key, _)| *key != "haircut_id");

    let body = body_text(post_book(&app, &form).await).await;
    assert!(body.contains("Please select a haircut style."));
}

#[actix_web::test]
async fn complete_first_step_reaches_service_selection() {
    let app = booking_app("http://127.0.0.1:1").await;
    let body = body_text(post_book(&app, &full_form("1", "next")).await).await;

    assert!(body.contains("Select Service"));
    assert!(body.contains("Classic Cut"));
    assert!(body.contains("Skin Fade"));
    // Only haircut-category services are offered.
    assert!(!body.contains("Beard Trim"));
    assert!(!body.contains("Hot Towel Shave"));
}

#[actix_web::test]
async fn incomplete_schedule_blocks_the_second_step() {
    let app = booking_app("http://127.0.0.1:1").await;
    let mut form = full_form("2", "next");
    form.retain(|(key, _)| *key != "time");

    let body = body_text(post_book(&app, &form).await).await;
    assert!(body.contains("Please select service, date, and time"));
}

#[actix_web::test]
async fn complete_schedule_reaches_barber_selection() {
    let app = booking_app("http://127.0.0.1:1").await;
    let body = body_text(post_book(&app, &full_form("2", "next")).await).await;

    assert!(body.contains("Select Your Barber"));
    assert!(body.contains("Marco Reyes"));
}

#[actix_web::test]
async fn missing_barber_blocks_the_third_step() {
    let app = booking_app("http://127.0.0.1:1").await;
    let mut form = full_form("3", "next");
    form.retain(|(key, _)| *key != "barber_id");

    let body = body_text(post_book(&app, &form).await).await;
    assert!(body.contains("Please select a barber"));
}

#[actix_web::test]
async fn going_back_keeps_everything_already_entered() {
    let app = booking_app("http://127.0.0.1:1").await;
    let body = body_text(post_book(&app, &full_form("2", "back")).await).await;

    // Back on step 1 with the name filled in and the style still checked.
    assert!(body.contains("Guest Information"));
    assert!(body.contains(r#"value="Jane Doe""#));
    assert!(body.contains("checked"));
    // Later-step choices ride along in the form.
    assert!(body.contains(r#"name="service_id" value="classic-cut""#));
    assert!(body.contains(r#"name="barber_id" value="marco-reyes""#));
}

#[actix_web::test]
async fn successful_checkout_redirects_to_the_receipt() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/guest/checkout")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"data":{"guest_transaction_id":"T123"}}"#)
        .create_async()
        .await;

    let app = booking_app(&server.url()).await;
    let response = post_book(&app, &full_form("4", "checkout")).await;

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap();
    assert_eq!(location, "/receipt?transaction_id=T123&email=Jane+Doe");
}

#[actix_web::test]
async fn rejected_checkout_stays_on_the_confirmation_step() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/guest/checkout")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":false,"error":"Slot taken"}"#)
        .create_async()
        .await;

    let app = booking_app(&server.url()).await;
    let response = post_book(&app, &full_form("4", "checkout")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Confirm Your Booking"));
    assert!(body.contains("Slot taken"));
    // Controls are live again for a manual retry.
    assert!(!body.contains("disabled"));
}

#[actix_web::test]
async fn unreachable_checkout_api_reports_the_generic_error() {
    // Nothing listens on this port; the transport error must degrade to the
    // generic message instead of a 5xx.
    let app = booking_app("http://127.0.0.1:1").await;
    let response = post_book(&app, &full_form("4", "checkout")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("An error occurred during checkout"));
}

#[actix_web::test]
async fn receipt_page_echoes_the_transaction() {
    let app = booking_app("http://127.0.0.1:1").await;
    let req = test::TestRequest::get()
        .uri("/receipt?transaction_id=T123&email=Jane+Doe")
        .to_request();
    let body = body_text(test::call_service(&app, req).await).await;

    assert!(body.contains("T123"));
    assert!(body.contains("Jane Doe"));
}

#[actix_web::test]
async fn health_endpoint_answers() {
    let app = booking_app("http://127.0.0.1:1").await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert_eq!(body, "ok");
}
