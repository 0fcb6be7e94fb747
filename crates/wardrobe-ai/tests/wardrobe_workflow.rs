//! End-to-end wardrobe scenarios driven through the public service facade and HTTP router:
//! import a closet, ask for suggestions, save one, and wear it.

mod common {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use wardrobe_ai::wardrobe::{
        ItemId, Outfit, OutfitId, OutfitRuleBook, RepositoryError, RuleBasedSuggester, UserId,
        WardrobeItem, WardrobeRepository, WardrobeService,
    };

    pub(super) const CLOSET_CSV: &str = "\
name,category,color,brand,size,season,tags,times_worn,favorite
Oxford shirt,tops,white,Brooks,M,all,work,5,no
Linen shirt,tops,sand,,M,summer,,1,yes
Chinos,bottoms,khaki,,32,,,2,
Wool trousers,bottoms,charcoal,,32,winter,,0,
Loafers,shoes,brown,,10,,,3,yes
Field jacket,outerwear,olive,,M,fall,,0,
";

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        items: Mutex<BTreeMap<ItemId, WardrobeItem>>,
        outfits: Mutex<BTreeMap<OutfitId, Outfit>>,
    }

    impl WardrobeRepository for MemoryRepository {
        fn insert_item(&self, item: WardrobeItem) -> Result<WardrobeItem, RepositoryError> {
            let mut guard = self.items.lock().expect("lock");
            if guard.contains_key(&item.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(item.id, item.clone());
            Ok(item)
        }

        fn update_item(&self, item: WardrobeItem) -> Result<(), RepositoryError> {
            self.items.lock().expect("lock").insert(item.id, item);
            Ok(())
        }

        fn fetch_item(
            &self,
            user: UserId,
            id: ItemId,
        ) -> Result<Option<WardrobeItem>, RepositoryError> {
            let guard = self.items.lock().expect("lock");
            Ok(guard.get(&id).filter(|item| item.user_id == user).cloned())
        }

        fn delete_item(&self, _user: UserId, id: ItemId) -> Result<(), RepositoryError> {
            self.items
                .lock()
                .expect("lock")
                .remove(&id)
                .map(|_| ())
                .ok_or(RepositoryError::NotFound)
        }

        fn items_for_user(&self, user: UserId) -> Result<Vec<WardrobeItem>, RepositoryError> {
            let guard = self.items.lock().expect("lock");
            Ok(guard
                .values()
                .filter(|item| item.user_id == user)
                .cloned()
                .collect())
        }

        fn insert_outfit(&self, outfit: Outfit) -> Result<Outfit, RepositoryError> {
            self.outfits
                .lock()
                .expect("lock")
                .insert(outfit.id, outfit.clone());
            Ok(outfit)
        }

        fn update_outfit(&self, outfit: Outfit) -> Result<(), RepositoryError> {
            self.outfits.lock().expect("lock").insert(outfit.id, outfit);
            Ok(())
        }

        fn fetch_outfit(
            &self,
            user: UserId,
            id: OutfitId,
        ) -> Result<Option<Outfit>, RepositoryError> {
            let guard = self.outfits.lock().expect("lock");
            Ok(guard.get(&id).filter(|outfit| outfit.user_id == user).cloned())
        }

        fn outfits_for_user(&self, user: UserId) -> Result<Vec<Outfit>, RepositoryError> {
            let guard = self.outfits.lock().expect("lock");
            Ok(guard
                .values()
                .filter(|outfit| outfit.user_id == user)
                .cloned()
                .collect())
        }
    }

    pub(super) fn service() -> Arc<WardrobeService<MemoryRepository>> {
        let rules = Arc::new(OutfitRuleBook::standard());
        Arc::new(WardrobeService::new(
            Arc::new(MemoryRepository::default()),
            Arc::new(RuleBasedSuggester::with_seed(rules, 2024)),
        ))
    }
}

use std::io::Cursor;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{service, CLOSET_CSV};
use wardrobe_ai::wardrobe::{
    wardrobe_router, ItemFilter, NewOutfit, Season, UserId, WardrobeServiceError,
};

const USER: UserId = UserId(41);

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn imported_closet_produces_work_outfits_that_can_be_worn() {
    let service = service();
    let summary = service
        .import_items(USER, Cursor::new(CLOSET_CSV))
        .expect("import");
    assert_eq!(summary.added.len(), 6);

    let suggestions = service
        .suggest_outfits(USER, "work", "fall", "classic")
        .await
        .expect("suggestions");
    assert_eq!(suggestions.len(), 3);

    let names: Vec<&str> = suggestions[0]
        .items
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    // Least-worn top and bottom, the only shoes, then the first optional category.
    assert_eq!(
        names,
        vec!["Linen shirt", "Wool trousers", "Loafers", "Field jacket"]
    );

    let saved = service
        .save_suggestion(
            USER,
            NewOutfit {
                name: suggestions[0].name.clone(),
                description: suggestions[0].description.clone(),
                occasion: "work".to_string(),
                season: Season::Fall,
                item_ids: suggestions[0].item_ids.clone(),
            },
        )
        .expect("save");
    assert!(saved.ai_generated);

    let worn_on = NaiveDate::from_ymd_opt(2025, 10, 2).expect("date");
    let detail = service
        .mark_outfit_worn(USER, saved.id, worn_on)
        .expect("wear");
    assert!(detail.items.iter().all(|item| item.last_worn == Some(worn_on)));

    let linen = service
        .list_items(USER, &ItemFilter::default())
        .expect("items")
        .into_iter()
        .find(|item| item.name == "Linen shirt")
        .expect("linen shirt");
    assert_eq!(linen.times_worn, 2);
}

#[tokio::test]
async fn reimporting_the_same_closet_only_skips() {
    let service = service();
    service
        .import_items(USER, Cursor::new(CLOSET_CSV))
        .expect("first import");

    let again = service
        .import_items(USER, Cursor::new(CLOSET_CSV))
        .expect("second import");

    assert!(again.added.is_empty());
    assert_eq!(again.skipped_duplicates, 6);
}

#[tokio::test]
async fn empty_wardrobe_cannot_be_styled() {
    let err = service()
        .suggest_outfits(USER, "date", "", "")
        .await
        .expect_err("empty");

    assert!(matches!(err, WardrobeServiceError::EmptyWardrobe));
}

#[tokio::test]
async fn router_serves_dashboard_and_weather_for_an_imported_closet() {
    let service = service();
    service
        .import_items(USER, Cursor::new(CLOSET_CSV))
        .expect("import");
    let router = wardrobe_router(service);

    let dashboard = router
        .clone()
        .oneshot(
            Request::get("/api/v1/wardrobe/41/dashboard")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("dashboard response");
    assert_eq!(dashboard.status(), StatusCode::OK);
    let dashboard = read_json(dashboard).await;
    assert_eq!(dashboard["total_items"], 6);
    assert_eq!(dashboard["favorites"], 2);
    assert_eq!(dashboard["most_worn"][0]["name"], "Oxford shirt");

    let weather = router
        .oneshot(
            Request::post("/api/v1/wardrobe/41/weather")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "city": "Chicago",
                        "temperature_c": 15.0,
                        "condition": "Light rain"
                    })
                    .to_string(),
                ))
                .expect("request"),
        )
        .await
        .expect("weather response");
    assert_eq!(weather.status(), StatusCode::OK);
    let weather = read_json(weather).await;
    assert_eq!(weather["city"], "Chicago");
    assert_eq!(weather["condition"], "rainy");
    assert!(weather["recommended_categories"]
        .as_array()
        .expect("categories")
        .contains(&json!("outerwear")));
}
