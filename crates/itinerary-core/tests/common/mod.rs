use itinerary_core::{params::CreateTrip, Planner, PlannerBuilder, TravelMode, Trip};
use jiff::civil::date;
use tempfile::TempDir;

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// A four-day trip in Kyoto.
pub async fn create_kyoto_trip(planner: &Planner) -> Trip {
    planner
        .create_trip(&CreateTrip {
            name: "Kyoto".to_string(),
            country_id: Some("JP".to_string()),
            start_date: date(2024, 11, 10),
            end_date: date(2024, 11, 13),
            preferred_transport: TravelMode::Transit,
        })
        .await
        .expect("Failed to create trip")
}
