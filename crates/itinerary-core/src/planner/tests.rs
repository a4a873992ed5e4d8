//! Tests for the planner module.

use async_trait::async_trait;
use jiff::civil::{date, DateTime};
use tempfile::TempDir;

use super::*;
use crate::{
    drag::MoveDirection,
    hours::{BusinessHours, BusinessHoursStatus},
    models::{
        ItemPatch, ItineraryItem, OptimizationMode, OptimizationRequest, OptimizationResult,
        OptimizationSuggestion, Place, SuggestedPlace, TravelMode, Trip,
    },
    params::{
        AddItem, CreatePlace, CreateTrip, DayQuery, Id, MoveItem, NudgeItem, Optimize,
        ReorderDay, TripItem, UpdateItem,
    },
    session::Optimizer,
};

/// Helper function to create a test planner
async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

async fn create_trip(planner: &Planner) -> Trip {
    planner
        .create_trip(&CreateTrip {
            name: "Seoul".to_string(),
            country_id: Some("KR".to_string()),
            start_date: date(2024, 5, 1),
            end_date: date(2024, 5, 3),
            preferred_transport: TravelMode::Transit,
        })
        .await
        .expect("Failed to create trip")
}

async fn create_place(planner: &Planner, name: &str) -> Place {
    planner
        .add_place(&CreatePlace {
            name: name.to_string(),
            latitude: 37.57,
            longitude: 126.98,
            business_hours: Some(
                BusinessHours::parse("09:00", "18:00").expect("Failed to parse hours"),
            ),
            estimated_duration: Some(90),
            ..Default::default()
        })
        .await
        .expect("Failed to add place")
}

fn at(day: i8, hour: i8, minute: i8) -> DateTime {
    date(2024, 5, day).at(hour, minute, 0, 0)
}

fn add_params(trip: &Trip, place: &Place, day: u32, start: DateTime) -> AddItem {
    AddItem {
        trip_id: trip.id.clone(),
        day_number: day,
        place_id: Some(place.id.clone()),
        accommodation_id: None,
        start_time: start,
        end_time: None,
        travel_mode: None,
        travel_duration: None,
        notes: None,
        position: None,
    }
}

async fn add_item(planner: &Planner, trip: &Trip, place: &Place, day: u32, hour: i8) -> ItineraryItem {
    planner
        .add_item(&add_params(trip, place, day, at(day as i8, hour, 0)))
        .await
        .expect("Failed to add item")
}

struct StaticOptimizer(OptimizationResult);

#[async_trait]
impl Optimizer for StaticOptimizer {
    async fn optimize(&self, _request: &OptimizationRequest) -> Result<OptimizationResult> {
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn test_create_and_list_trips() {
    let (_temp_dir, planner) = create_test_planner().await;

    let trip = create_trip(&planner).await;
    assert_eq!(trip.day_count(), 3);

    let fetched = planner
        .get_trip(&Id { id: trip.id.clone() })
        .await
        .expect("Failed to get trip")
        .expect("Trip should exist");
    assert_eq!(fetched, trip);

    let trips = planner.list_trips().await.expect("Failed to list trips");
    assert_eq!(trips.len(), 1);
}

#[tokio::test]
async fn test_create_trip_rejects_inverted_dates() {
    let (_temp_dir, planner) = create_test_planner().await;

    let result = planner
        .create_trip(&CreateTrip {
            name: "Backwards".to_string(),
            country_id: None,
            start_date: date(2024, 5, 3),
            end_date: date(2024, 5, 1),
            preferred_transport: TravelMode::Walking,
        })
        .await;

    assert!(matches!(result, Err(ItineraryError::InvalidInput { .. })));
    assert!(planner.list_trips().await.expect("Failed to list trips").is_empty());
}

#[tokio::test]
async fn test_add_item_defaults() {
    let (_temp_dir, planner) = create_test_planner().await;
    let trip = create_trip(&planner).await;
    let palace = create_place(&planner, "Gyeongbokgung").await;

    let item = add_item(&planner, &trip, &palace, 1, 10).await;

    assert_eq!(item.order, 0);
    assert_eq!(item.end_time, at(1, 11, 30));
    assert_eq!(item.travel_mode, TravelMode::Transit);

    let day = planner
        .day_timeline(&DayQuery {
            trip_id: trip.id.clone(),
            day_number: 1,
        })
        .await
        .expect("Failed to load day");
    assert_eq!(day.item_ids(), vec![item.id.as_str()]);
    assert_eq!(day.date, Some(date(2024, 5, 1)));
    assert_eq!(day.entries[0].status, Some(BusinessHoursStatus::Open));
}

#[tokio::test]
async fn test_add_item_rejects_unknown_place_and_day() {
    let (_temp_dir, planner) = create_test_planner().await;
    let trip = create_trip(&planner).await;
    let palace = create_place(&planner, "Gyeongbokgung").await;

    let mut params = add_params(&trip, &palace, 1, at(1, 10, 0));
    params.place_id = Some("missing".to_string());
    assert!(matches!(
        planner.add_item(&params).await,
        Err(ItineraryError::InvalidInput { .. })
    ));

    let params = add_params(&trip, &palace, 4, at(4, 10, 0));
    assert!(matches!(
        planner.add_item(&params).await,
        Err(ItineraryError::InvalidInput { .. })
    ));

    let missing_trip = AddItem {
        trip_id: "nope".to_string(),
        ..add_params(&trip, &palace, 1, at(1, 10, 0))
    };
    assert!(matches!(
        planner.add_item(&missing_trip).await,
        Err(ItineraryError::TripNotFound { .. })
    ));
}

#[tokio::test]
async fn test_insert_at_position_shifts_later_items() {
    let (_temp_dir, planner) = create_test_planner().await;
    let trip = create_trip(&planner).await;
    let palace = create_place(&planner, "Gyeongbokgung").await;

    let first = add_item(&planner, &trip, &palace, 1, 9).await;
    let second = add_item(&planner, &trip, &palace, 1, 12).await;

    let mut params = add_params(&trip, &palace, 1, at(1, 8, 0));
    params.position = Some(0);
    let inserted = planner.add_item(&params).await.expect("Failed to insert item");

    let day = planner
        .day_timeline(&DayQuery {
            trip_id: trip.id.clone(),
            day_number: 1,
        })
        .await
        .expect("Failed to load day");
    assert_eq!(
        day.item_ids(),
        vec![inserted.id.as_str(), first.id.as_str(), second.id.as_str()]
    );
}

#[tokio::test]
async fn test_update_item_reports_changes() {
    let (_temp_dir, planner) = create_test_planner().await;
    let trip = create_trip(&planner).await;
    let palace = create_place(&planner, "Gyeongbokgung").await;
    let item = add_item(&planner, &trip, &palace, 1, 10).await;

    let result = planner
        .update_item(&UpdateItem {
            trip_id: trip.id.clone(),
            item_id: item.id.clone(),
            patch: ItemPatch {
                notes: Some("Hanbok rental nearby".to_string()),
                ..Default::default()
            },
        })
        .await
        .expect("Failed to update item");

    assert_eq!(result.resource.notes.as_deref(), Some("Hanbok rental nearby"));
    assert_eq!(result.changes, vec!["Notes updated".to_string()]);

    let invalid = planner
        .update_item(&UpdateItem {
            trip_id: trip.id.clone(),
            item_id: item.id.clone(),
            patch: ItemPatch {
                end_time: Some(at(1, 9, 0)),
                ..Default::default()
            },
        })
        .await;
    assert!(matches!(invalid, Err(ItineraryError::InvariantViolation { .. })));
}

#[tokio::test]
async fn test_remove_item_renormalizes_day() {
    let (_temp_dir, planner) = create_test_planner().await;
    let trip = create_trip(&planner).await;
    let palace = create_place(&planner, "Gyeongbokgung").await;

    let a = add_item(&planner, &trip, &palace, 1, 9).await;
    let b = add_item(&planner, &trip, &palace, 1, 11).await;
    let c = add_item(&planner, &trip, &palace, 1, 13).await;

    planner
        .remove_item(&TripItem {
            trip_id: trip.id.clone(),
            item_id: b.id.clone(),
        })
        .await
        .expect("Failed to remove item");

    let session = planner.open_session(&trip.id).await.expect("Failed to open session");
    let items = session.day_items(1);
    assert_eq!(items.len(), 2);
    assert_eq!((items[0].id.as_str(), items[0].order), (a.id.as_str(), 0));
    assert_eq!((items[1].id.as_str(), items[1].order), (c.id.as_str(), 1));
}

#[tokio::test]
async fn test_reorder_and_nudge() {
    let (_temp_dir, planner) = create_test_planner().await;
    let trip = create_trip(&planner).await;
    let palace = create_place(&planner, "Gyeongbokgung").await;

    let a = add_item(&planner, &trip, &palace, 2, 9).await;
    let b = add_item(&planner, &trip, &palace, 2, 11).await;
    let c = add_item(&planner, &trip, &palace, 2, 13).await;

    let day = planner
        .reorder_day(&ReorderDay {
            trip_id: trip.id.clone(),
            day_number: 2,
            item_ids: vec![c.id.clone(), a.id.clone(), b.id.clone()],
        })
        .await
        .expect("Failed to reorder day");
    assert_eq!(day.item_ids(), vec![c.id.as_str(), a.id.as_str(), b.id.as_str()]);

    let day = planner
        .nudge_item(&NudgeItem {
            trip_id: trip.id.clone(),
            item_id: b.id.clone(),
            direction: MoveDirection::Up,
        })
        .await
        .expect("Failed to nudge item");
    assert_eq!(day.item_ids(), vec![c.id.as_str(), b.id.as_str(), a.id.as_str()]);

    let partial = planner
        .reorder_day(&ReorderDay {
            trip_id: trip.id.clone(),
            day_number: 2,
            item_ids: vec![a.id.clone(), b.id.clone()],
        })
        .await;
    assert!(matches!(partial, Err(ItineraryError::InvariantViolation { .. })));
}

#[tokio::test]
async fn test_move_item_between_days() {
    let (_temp_dir, planner) = create_test_planner().await;
    let trip = create_trip(&planner).await;
    let palace = create_place(&planner, "Gyeongbokgung").await;

    let a = add_item(&planner, &trip, &palace, 1, 9).await;
    let b = add_item(&planner, &trip, &palace, 1, 11).await;
    let c = add_item(&planner, &trip, &palace, 3, 10).await;

    let moved = planner
        .move_item(&MoveItem {
            trip_id: trip.id.clone(),
            item_id: a.id.clone(),
            day_number: 3,
        })
        .await
        .expect("Failed to move item");
    assert_eq!(moved.day_number, 3);
    assert_eq!(moved.order, 1);
    assert_eq!(moved.start_time, at(3, 9, 0));

    let itinerary = planner
        .trip_itinerary(&Id { id: trip.id.clone() })
        .await
        .expect("Failed to load itinerary");
    assert_eq!(itinerary.days.len(), 3);
    assert_eq!(itinerary.days[0].item_ids(), vec![b.id.as_str()]);
    assert!(itinerary.days[1].is_empty());
    assert_eq!(itinerary.days[2].item_ids(), vec![c.id.as_str(), a.id.as_str()]);
}

#[tokio::test]
async fn test_optimize_applies_and_persists() {
    let (_temp_dir, planner) = create_test_planner().await;
    let trip = create_trip(&planner).await;
    let palace = create_place(&planner, "Gyeongbokgung").await;

    let a = add_item(&planner, &trip, &palace, 1, 9).await;
    let b = add_item(&planner, &trip, &palace, 1, 11).await;

    let optimizer = StaticOptimizer(OptimizationResult {
        suggestions: vec![
            OptimizationSuggestion::remove(a.id.clone(), "Closed on Tuesdays"),
            OptimizationSuggestion::add(SuggestedPlace::new("Bukchon", 37.58, 126.98), 1, "Nearby"),
        ],
        reasoning: "Swap the palace for the village".to_string(),
        estimated_time_saved: Some(20),
        estimated_distance_saved: None,
    });

    let outcome = planner
        .optimize(
            &Optimize {
                trip_id: trip.id.clone(),
                mode: OptimizationMode::SuggestAndOptimize,
                constraints: None,
                dry_run: false,
            },
            &optimizer,
        )
        .await
        .expect("Failed to optimize");

    let summary = outcome.applied.expect("Suggestions should be applied");
    assert_eq!((summary.added, summary.removed), (1, 1));
    assert_eq!(outcome.plan.len(), 2);

    let session = planner.open_session(&trip.id).await.expect("Failed to open session");
    let items = session.day_items(1);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, b.id);
    assert_eq!(items[1].id, summary.new_item_ids[0]);
    assert_eq!(items[1].start_time, b.end_time);

    let places = planner.list_places().await.expect("Failed to list places");
    assert_eq!(places.len(), 2);
}

#[tokio::test]
async fn test_day_start_places_suggestions_on_empty_day() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("late.db")))
        .with_day_start(Some(jiff::civil::time(10, 30, 0, 0)))
        .build()
        .await
        .expect("Failed to create planner");
    assert_eq!(planner.day_start(), jiff::civil::time(10, 30, 0, 0));
    let trip = create_trip(&planner).await;

    let optimizer = StaticOptimizer(OptimizationResult {
        suggestions: vec![OptimizationSuggestion::add(
            SuggestedPlace::new("Bukchon", 37.58, 126.98),
            2,
            "Quiet morning",
        )],
        ..Default::default()
    });
    let outcome = planner
        .optimize(
            &Optimize {
                trip_id: trip.id.clone(),
                ..Default::default()
            },
            &optimizer,
        )
        .await
        .expect("Failed to optimize");
    assert!(outcome.applied.is_some());

    let session = planner.open_session(&trip.id).await.expect("Failed to open session");
    let items = session.day_items(2);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].start_time, at(2, 10, 30));
}

#[tokio::test]
async fn test_optimize_dry_run_and_rejections_save_nothing() {
    let (_temp_dir, planner) = create_test_planner().await;
    let trip = create_trip(&planner).await;
    let palace = create_place(&planner, "Gyeongbokgung").await;
    let a = add_item(&planner, &trip, &palace, 1, 9).await;

    let params = Optimize {
        trip_id: trip.id.clone(),
        dry_run: true,
        ..Default::default()
    };
    let dry = StaticOptimizer(OptimizationResult {
        suggestions: vec![OptimizationSuggestion::remove(a.id.clone(), "Too early")],
        ..Default::default()
    });
    let outcome = planner.optimize(&params, &dry).await.expect("Failed to preview");
    assert!(outcome.applied.is_none());
    assert_eq!(outcome.plan.len(), 1);

    let bad = StaticOptimizer(OptimizationResult {
        suggestions: vec![
            OptimizationSuggestion::remove(a.id.clone(), "Too early"),
            OptimizationSuggestion::remove("ghost", "Does not exist"),
        ],
        ..Default::default()
    });
    let params = Optimize {
        dry_run: false,
        ..params
    };
    match planner.optimize(&params, &bad).await {
        Err(ItineraryError::Validation { rejections }) => {
            assert_eq!(rejections.len(), 1);
            assert_eq!(rejections[0].index, 1);
        }
        other => panic!("Expected validation error, got {other:?}"),
    }

    let session = planner.open_session(&trip.id).await.expect("Failed to open session");
    assert_eq!(session.store().len(), 1);
}

#[tokio::test]
async fn test_session_round_trip() {
    let (_temp_dir, planner) = create_test_planner().await;
    let trip = create_trip(&planner).await;
    let palace = create_place(&planner, "Gyeongbokgung").await;
    let a = add_item(&planner, &trip, &palace, 1, 9).await;

    let mut session = planner.open_session(&trip.id).await.expect("Failed to open session");
    session
        .store_mut()
        .update_item(
            &a.id,
            &ItemPatch {
                travel_duration: Some(15),
                ..Default::default()
            },
        )
        .expect("Failed to update item");

    let written = planner
        .save_session(&mut session)
        .await
        .expect("Failed to save session");
    assert_eq!(written, 1);
    assert!(!session.store().has_pending_changes());

    let reloaded = planner.open_session(&trip.id).await.expect("Failed to open session");
    let item = reloaded.get_item(&a.id).expect("Item should exist");
    assert_eq!(item.travel_duration, Some(15));
}
