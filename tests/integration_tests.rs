// Integration tests for DogMate Algo

use actix_web::{test, web, App};
use dogmate_algo::config::MatchingSettings;
use dogmate_algo::core::{
    AddressResolver, BulkGeocodeCoordinator, FallbackTable, GeocodeEvent, Matcher, SearchLimits,
};
use dogmate_algo::models::{BreedRecord, Dog, DogStatus, Gender};
use dogmate_algo::routes::{configure_routes, AppState};
use dogmate_algo::services::{CatalogCache, EntityStore, InMemoryStore, NominatimClient};
use mockito::Matcher as UrlMatcher;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

const USER_AGENT: &str = "DogMate/1.0 (dog-breeding-website)";

fn create_dog(name: &str, gender: Gender, breed: &str, city: &str) -> Dog {
    Dog {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        name: name.to_string(),
        breed: breed.to_string(),
        gender,
        age: 3,
        available: true,
        vaccinated: true,
        neutered: false,
        temperament: vec!["Friendly".to_string()],
        status: DogStatus::Active,
        address: None,
        city: Some(city.to_string()),
        county: None,
        postcode: None,
        country: Some("UK".to_string()),
        latitude: None,
        longitude: None,
    }
}

fn located(mut dog: Dog, lat: f64, lon: f64) -> Dog {
    dog.latitude = Some(lat);
    dog.longitude = Some(lon);
    dog
}

fn coordinator(endpoint: &str, store: Arc<InMemoryStore>, interval: Duration) -> BulkGeocodeCoordinator {
    let provider = NominatimClient::new(endpoint, USER_AGENT, Duration::from_secs(2)).unwrap();

    BulkGeocodeCoordinator::new(
        AddressResolver::new(Arc::new(provider), "gb"),
        Arc::new(FallbackTable::uk_cities()),
        store,
        interval,
    )
}

#[tokio::test]
async fn test_manchester_resolves_through_fallback_when_provider_unreachable() {
    let dog = create_dog("Rex", Gender::Male, "Beagle", "Manchester");
    let dog_id = dog.id;
    let store = Arc::new(InMemoryStore::with_dogs(vec![dog]));

    // Nothing listens on port 1, so every provider call fails fast
    let coordinator = coordinator("http://127.0.0.1:1", store.clone(), Duration::from_millis(1000));

    let mut events = Vec::new();
    let report = coordinator.run(|event| events.push(event)).await.unwrap();

    assert_eq!(report.success_count, 1);
    assert_eq!(report.failure_count, 0);
    assert!(matches!(&events[0], GeocodeEvent::FallbackUsed { city, .. } if city == "Manchester"));

    let stored = store.get_dog(dog_id).await.unwrap().unwrap();
    assert_eq!(stored.latitude, Some(53.4808));
    assert_eq!(stored.longitude, Some(-2.2426));
}

#[tokio::test]
async fn test_batch_with_provider_errors_counts_fallback_hits() {
    let mut server = mockito::Server::new_async().await;
    let provider_mock = server
        .mock("GET", "/search")
        .match_query(UrlMatcher::Any)
        .match_header("user-agent", USER_AGENT)
        .with_status(500)
        .expect(3)
        .create_async()
        .await;

    let dogs = vec![
        create_dog("Rex", Gender::Male, "Beagle", "London"),
        create_dog("Nemo", Gender::Male, "Beagle", "Atlantis"),
        create_dog("Bella", Gender::Female, "Beagle", "Leeds"),
    ];
    let store = Arc::new(InMemoryStore::with_dogs(dogs));
    let interval = Duration::from_millis(1000);
    let coordinator = coordinator(&server.url(), store.clone(), interval);

    let started = Instant::now();
    let mut events = Vec::new();
    let report = coordinator.run(|event| events.push(event)).await.unwrap();
    let elapsed = started.elapsed();

    provider_mock.assert_async().await;
    assert_eq!(report.success_count, 2);
    assert_eq!(report.failure_count, 1);
    assert_eq!(report.total_processed, 3);
    assert!(elapsed >= interval * 2, "Batch took {:?}", elapsed);

    assert!(matches!(&events[1], GeocodeEvent::Failed { name, .. } if name == "Nemo"));
    assert_eq!(store.dogs_missing_coordinates().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_provider_result_wins_over_fallback() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search")
        .match_query(UrlMatcher::AllOf(vec![
            UrlMatcher::UrlEncoded("q".into(), "Leeds, UK".into()),
            UrlMatcher::UrlEncoded("countrycodes".into(), "gb".into()),
        ]))
        .with_status(200)
        .with_body(r#"[{"lat": "53.7974185", "lon": "-1.5437941"}]"#)
        .create_async()
        .await;

    let dog = create_dog("Bella", Gender::Female, "Beagle", "Leeds");
    let dog_id = dog.id;
    let store = Arc::new(InMemoryStore::with_dogs(vec![dog]));

    let mut events = Vec::new();
    let report = coordinator(&server.url(), store.clone(), Duration::from_millis(1000))
        .run(|event| events.push(event))
        .await
        .unwrap();

    assert_eq!(report.success_count, 1);
    assert!(matches!(events[0], GeocodeEvent::Resolved { .. }));

    let stored = store.get_dog(dog_id).await.unwrap().unwrap();
    assert_eq!(stored.latitude, Some(53.7974185));
}

async fn seeded_state() -> (AppState, Dog) {
    let source = located(create_dog("Rex", Gender::Male, "Beagle", "Manchester"), 53.4808, -2.2426);

    let mut neutered = located(create_dog("Neutered", Gender::Female, "Beagle", "Salford"), 53.4875, -2.2901);
    neutered.neutered = true;

    let dogs = vec![
        source.clone(),
        located(create_dog("Daisy", Gender::Female, "Beagle", "Salford"), 53.4875, -2.2901),
        located(create_dog("Bella", Gender::Female, "Pug", "Leeds"), 53.8008, -1.5491),
        located(create_dog("Max", Gender::Male, "Beagle", "Stockport"), 53.4106, -2.1575),
        located(create_dog("Lola", Gender::Female, "Beagle", "London"), 51.5074, -0.1278),
        neutered,
    ];
    let store = Arc::new(InMemoryStore::with_dogs(dogs));

    let mut retriever = BreedRecord::new("Labrador Retriever", "Gundog");
    retriever.size = Some("Large".to_string());
    retriever.reindex();
    let mut pug = BreedRecord::new("Pug", "Toy");
    pug.size = Some("Small".to_string());
    pug.reindex();
    for breed in [retriever, pug, BreedRecord::new("Golden Retriever", "Gundog")] {
        store.upsert_breed(breed).await.unwrap();
    }

    let store: Arc<dyn EntityStore> = store;
    let state = AppState {
        catalog: Arc::new(CatalogCache::new(store.clone(), 4, Duration::from_secs(60))),
        store,
        matcher: Matcher::with_default_weights(),
        search: SearchLimits::default(),
        matching: MatchingSettings::default(),
    };

    (state, source)
}

#[actix_web::test]
async fn test_api_breed_search() {
    let (state, _) = seeded_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/breeds/search?q=retriever").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 2);
    assert_eq!(body["data"][0]["name"], "Golden Retriever");
    assert_eq!(body["data"][1]["name"], "Labrador Retriever");

    let req = test::TestRequest::get().uri("/api/v1/breeds/search?q=%20%20").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::get().uri("/api/v1/breeds/search?q=pug&limit=0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_api_breed_listing_and_lookup() {
    let (state, _) = seeded_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/breeds?type=Gundog&sortBy=name&order=desc").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["total"], 2);
    assert_eq!(body["data"][0]["name"], "Labrador Retriever");

    let req = test::TestRequest::get().uri("/api/v1/breeds?size=SMALL&limit=1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["slug"], "pug");
    assert_eq!(body["pagination"]["totalPages"], 1);

    let req = test::TestRequest::get().uri("/api/v1/breeds/types").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["types"][0]["name"], "Gundog");
    assert_eq!(body["types"][0]["count"], 2);
    assert_eq!(body["sizes"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get().uri("/api/v1/breeds/labrador-retriever").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["type"], "Gundog");
    assert_eq!(body["sizeClass"], "large");

    let req = test::TestRequest::get().uri("/api/v1/breeds/golden-retriever").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["sizeClass"].is_null());

    let req = test::TestRequest::get().uri("/api/v1/breeds/no-such-breed").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_api_find_matches_and_stats() {
    let (state, source) = seeded_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let uri = format!("/api/v1/matches/{}?limit=10&minScore=0", source.id);
    let req = test::TestRequest::get().uri(&uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["sourceDog"]["name"], "Rex");
    assert_eq!(body["total"], 3);
    assert_eq!(body["matches"][0]["dog"]["name"], "Daisy");
    assert!(body["matches"][0]["matchReasons"].as_array().unwrap().len() <= 3);

    let uri = format!("/api/v1/matches/{}/stats", source.id);
    let req = test::TestRequest::get().uri(&uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["stats"]["totalPotential"], 3);
    assert_eq!(body["stats"]["sameBreed"], 2);
    assert_eq!(body["stats"]["breedCompatibility"], 67);

    let req = test::TestRequest::get().uri("/api/v1/matches/not-a-uuid").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let uri = format!("/api/v1/matches/{}", Uuid::new_v4());
    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_api_nearby_dogs() {
    let (state, _) = seeded_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/dogs/nearby?latitude=53.4808&longitude=-2.2426&radius=100&gender=female")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let names: Vec<&str> = body["dogs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|dog| dog["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Daisy", "Neutered", "Bella"]);
    assert_eq!(body["pagination"]["total"], 3);

    let req = test::TestRequest::get()
        .uri("/api/v1/dogs/nearby?latitude=95&longitude=0")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_api_health() {
    let (state, _) = seeded_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}
