mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::assert_problem_details;
use common::{bearer, init_app, seed_user, state_with_db};
use serde_json::{json, Value};

fn spotted_cat() -> Value {
    json!({
        "animalType": "cat",
        "color": ["orange"],
        "dateSpotted": "2025-04-12T18:30:00Z",
        "location": "Stanley Park",
        "locationCoords": { "lat": 49.3043, "lng": -123.1443 },
        "city": "Vancouver",
        "provinceOrState": "BC",
        "country": "Canada",
        "description": "Skittish, no collar"
    })
}

#[actix_web::test]
async fn sighting_without_name_is_created_with_city() {
    let state = state_with_db().await;
    seed_user(&state, "finder@example.com").await;
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/sighting-listing")
        .insert_header(("Authorization", bearer("finder@example.com")))
        .set_json(spotted_cat())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["message"], "Sighting created");
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/sighting-listing/{id}"))
        .insert_header(("Authorization", bearer("finder@example.com")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let data = &body["data"];
    assert!(data.get("pet_name").is_none());
    assert_eq!(data["animal_type"], "cat");
    assert_eq!(data["date_spotted"], "2025-04-12T18:30:00Z");
    assert_eq!(data["location"]["street_address"], "Stanley Park");
    assert!(data["location"]["city_id"].is_number());
}

#[actix_web::test]
async fn sighting_requires_date_spotted() {
    let state = state_with_db().await;
    seed_user(&state, "finder@example.com").await;
    let app = init_app(state).await;

    let mut body = spotted_cat();
    body.as_object_mut().unwrap().remove("dateSpotted");
    let req = test::TestRequest::post()
        .uri("/api/sighting-listing")
        .insert_header(("Authorization", bearer("finder@example.com")))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    let problem = assert_problem_details(resp, "VALIDATION_ERROR", StatusCode::BAD_REQUEST).await;
    assert!(problem.detail.contains("dateSpotted"));
}

#[actix_web::test]
async fn only_the_reporter_may_edit_a_sighting() {
    let state = state_with_db().await;
    seed_user(&state, "finder@example.com").await;
    seed_user(&state, "other@example.com").await;
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/sighting-listing")
        .insert_header(("Authorization", bearer("finder@example.com")))
        .set_json(spotted_cat())
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/sighting-listing/{id}"))
        .insert_header(("Authorization", bearer("other@example.com")))
        .set_json(json!({ "description": "mine now" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem = assert_problem_details(resp, "FORBIDDEN", StatusCode::FORBIDDEN).await;
    assert_eq!(problem.detail, "You do not have permission to modify this listing");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/sighting-listing/{id}"))
        .insert_header(("Authorization", bearer("finder@example.com")))
        .set_json(json!({ "name": "Ginger" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/sighting-listing/{id}"))
        .insert_header(("Authorization", bearer("other@example.com")))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["pet_name"], "Ginger");
    assert_eq!(body["data"]["description"], "Skittish, no collar");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/sighting-listing/{id}"))
        .insert_header(("Authorization", bearer("finder@example.com")))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["message"], "Sighting deleted successfully");
}

#[actix_web::test]
async fn mine_filter_for_user_without_row_is_not_found() {
    let app = init_app(state_with_db().await).await;

    let req = test::TestRequest::get()
        .uri("/api/sighting-listing?mine=true")
        .insert_header(("Authorization", bearer("ghost@example.com")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, "USER_NOT_FOUND", StatusCode::NOT_FOUND).await;
}

#[actix_web::test]
async fn listing_kinds_are_separate() {
    let state = state_with_db().await;
    seed_user(&state, "finder@example.com").await;
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/sighting-listing")
        .insert_header(("Authorization", bearer("finder@example.com")))
        .set_json(spotted_cat())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/lost-listing")
        .insert_header(("Authorization", bearer("finder@example.com")))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["count"], 0);

    let req = test::TestRequest::get()
        .uri("/api/sighting-listing")
        .insert_header(("Authorization", bearer("finder@example.com")))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["count"], 1);
}
