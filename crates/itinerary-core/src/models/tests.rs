#[cfg(test)]
mod model_tests {
    use jiff::civil::date;

    use crate::models::{
        ItemPatch, ItineraryChange, ItineraryItem, OptimizationResult, PlaceCategory,
        SuggestedHours, SuggestedPlace, SuggestionKind, SuggestionRejection, TravelMode,
    };

    fn create_test_item() -> ItineraryItem {
        ItineraryItem {
            id: "item-1".to_string(),
            trip_id: "trip-1".to_string(),
            day_number: 2,
            order: 1,
            place_id: Some("museum".to_string()),
            accommodation_id: None,
            start_time: date(2024, 5, 2).at(10, 0, 0, 0),
            end_time: date(2024, 5, 2).at(12, 30, 0, 0),
            travel_mode: TravelMode::Walking,
            travel_duration: Some(15),
            notes: None,
        }
    }

    #[test]
    fn test_item_duration() {
        let item = create_test_item();
        assert_eq!(item.duration().as_mins(), 150);
        assert!(!item.is_placeholder());
    }

    #[test]
    fn test_patch_switching_to_accommodation_clears_place() {
        let item = create_test_item();
        let patch = ItemPatch {
            accommodation_id: Some("hotel".to_string()),
            ..Default::default()
        };
        let updated = patch.applied_to(&item);
        assert_eq!(updated.place_id, None);
        assert_eq!(updated.accommodation_id.as_deref(), Some("hotel"));
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let item = create_test_item();
        let patch = ItemPatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.applied_to(&item), item);
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let json = serde_json::to_value(create_test_item()).expect("serialize");
        assert_eq!(json["dayNumber"], 2);
        assert_eq!(json["tripId"], "trip-1");
        assert_eq!(json["startTime"], "2024-05-02T10:00:00");
        assert_eq!(json["travelMode"], "walking");
        assert!(json.get("accommodationId").is_none());
    }

    #[test]
    fn test_optimizer_payload_parses() {
        let payload = r#"{
            "suggestions": [
                {
                    "type": "reorder",
                    "itemId": "1",
                    "newOrder": 2,
                    "reasoning": "Moving this activity later reduces total travel time by 15 minutes"
                },
                {
                    "type": "add",
                    "newPlace": {
                        "name": "Local Café",
                        "category": "restaurant",
                        "latitude": 37.5665,
                        "longitude": 126.978
                    },
                    "newDay": 1,
                    "reasoning": "This café is on the way and highly rated for breakfast"
                }
            ],
            "reasoning": "Optimized route to minimize travel time.",
            "estimatedTimeSaved": 25,
            "estimatedDistanceSaved": 1200
        }"#;

        let result: OptimizationResult = serde_json::from_str(payload).expect("parse");
        assert_eq!(result.suggestions.len(), 2);
        assert_eq!(result.suggestions[0].kind, SuggestionKind::Reorder);
        assert_eq!(result.suggestions[0].new_order, Some(2));
        let place = result.suggestions[1].new_place.as_ref().expect("new place");
        assert_eq!(place.category.as_deref(), Some("restaurant"));
        assert_eq!(result.estimated_time_saved, Some(25));
    }

    #[test]
    fn test_negative_day_survives_parsing() {
        let payload = r#"{"type":"add","newDay":-1,"reasoning":"r"}"#;
        let suggestion: crate::models::OptimizationSuggestion =
            serde_json::from_str(payload).expect("parse");
        assert_eq!(suggestion.new_day, Some(-1));
    }

    #[test]
    fn test_suggested_place_checks() {
        let id = || "p-1".to_string();
        assert!(SuggestedPlace::new("Café", 37.5, 126.9).to_place(id()).is_ok());
        assert!(SuggestedPlace::new("  ", 37.5, 126.9).to_place(id()).is_err());
        assert!(SuggestedPlace::new("Café", 95.0, 126.9).to_place(id()).is_err());

        let no_coordinates = SuggestedPlace {
            name: Some("Café".to_string()),
            ..Default::default()
        };
        assert!(no_coordinates.to_place(id()).is_err());

        let half_hours = SuggestedPlace {
            business_hours: Some(SuggestedHours {
                open: Some("09:00".to_string()),
                close: None,
            }),
            ..SuggestedPlace::new("Café", 37.5, 126.9)
        };
        assert!(half_hours.to_place(id()).is_err());

        let zero_visit = SuggestedPlace {
            estimated_duration: Some(0),
            ..SuggestedPlace::new("Café", 37.5, 126.9)
        };
        assert!(zero_visit.to_place(id()).is_err());
    }

    #[test]
    fn test_suggested_place_defaults() {
        let place = SuggestedPlace::new("Café", 37.5, 126.9)
            .to_place("p-9".to_string())
            .expect("valid place");
        assert_eq!(place.id, "p-9");
        assert_eq!(place.estimated_duration, 60);
        assert_eq!(place.category, PlaceCategory::Other);
        assert!(place.business_hours.is_none());
    }

    #[test]
    fn test_bad_place_fields_survive_parsing() {
        let payload = r#"{"type":"add","newDay":1,"reasoning":"r","newPlace":{"id":"museum","name":"Bar",
            "latitude":1.0,"longitude":1.0,"category":"nightlife","estimatedDuration":-5,
            "businessHours":{"open":"25:00","close":"02:00"}}}"#;
        let suggestion: crate::models::OptimizationSuggestion =
            serde_json::from_str(payload).expect("parse");
        let place = suggestion.new_place.expect("new place");
        assert_eq!(place.category.as_deref(), Some("nightlife"));
        assert_eq!(place.estimated_duration, Some(-5));
        assert!(place.to_place("p-1".to_string()).is_err());
    }

    #[test]
    fn test_rejection_display() {
        let rejection = SuggestionRejection {
            index: 0,
            kind: SuggestionKind::Reorder,
            item_id: Some("ghost".to_string()),
            reason: "item does not exist".to_string(),
        };
        assert_eq!(rejection.to_string(), "#1 reorder (ghost): item does not exist");
    }

    #[test]
    fn test_change_item_id() {
        let change = ItineraryChange::Removed {
            id: "gone".to_string(),
        };
        assert_eq!(change.item_id(), "gone");
        assert_eq!(
            ItineraryChange::Upserted(create_test_item()).item_id(),
            "item-1"
        );
    }
}
