use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::wardrobe::domain::{
    Category, ItemId, NewWardrobeItem, Outfit, OutfitId, UserId, WardrobeItem,
};
use crate::wardrobe::repository::{RepositoryError, WardrobeRepository};
use crate::wardrobe::rules::OutfitRuleBook;
use crate::wardrobe::suggestions::{
    OutfitSuggester, OutfitSuggestion, RuleBasedSuggester, SuggestionError, SuggestionRequest,
};
use crate::wardrobe::{wardrobe_router, WardrobeService};

pub(super) const OWNER: UserId = UserId(7);
pub(super) const STRANGER: UserId = UserId(8);

pub(super) fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).expect("valid date")
}

pub(super) fn item(id: u64, category: Category, times_worn: u32) -> WardrobeItem {
    let mut item = NewWardrobeItem::new(format!("{} #{id}", category.label()), category)
        .into_item(ItemId(id), OWNER, date(1));
    item.times_worn = times_worn;
    item
}

pub(super) fn favorite(id: u64, category: Category, times_worn: u32) -> WardrobeItem {
    let mut item = item(id, category, times_worn);
    item.favorite = true;
    item
}

pub(super) fn rules() -> Arc<OutfitRuleBook> {
    Arc::new(OutfitRuleBook::standard())
}

pub(super) fn seeded(seed: u64) -> RuleBasedSuggester {
    RuleBasedSuggester::with_seed(rules(), seed)
}

pub(super) fn request<'a>(items: &'a [WardrobeItem], occasion: &'a str) -> SuggestionRequest<'a> {
    SuggestionRequest {
        items,
        occasion,
        season: "summer",
        style: "relaxed",
    }
}

pub(super) fn ids(suggestion: &OutfitSuggestion) -> Vec<u64> {
    suggestion.item_ids.iter().map(|id| id.0).collect()
}

pub(super) fn new_item(name: &str, category: Category) -> NewWardrobeItem {
    let mut item = NewWardrobeItem::new(name, category);
    item.color = "navy".to_string();
    item.size = "M".to_string();
    item
}

pub(super) fn build_service() -> (WardrobeService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = WardrobeService::new(repository.clone(), Arc::new(seeded(11)));
    (service, repository)
}

pub(super) fn router_with_service(service: WardrobeService<MemoryRepository>) -> axum::Router {
    wardrobe_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    items: Arc<Mutex<BTreeMap<ItemId, WardrobeItem>>>,
    outfits: Arc<Mutex<BTreeMap<OutfitId, Outfit>>>,
}

impl WardrobeRepository for MemoryRepository {
    fn insert_item(&self, item: WardrobeItem) -> Result<WardrobeItem, RepositoryError> {
        let mut guard = self.items.lock().expect("repository mutex poisoned");
        if guard.contains_key(&item.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(item.id, item.clone());
        Ok(item)
    }

    fn update_item(&self, item: WardrobeItem) -> Result<(), RepositoryError> {
        let mut guard = self.items.lock().expect("repository mutex poisoned");
        guard.insert(item.id, item);
        Ok(())
    }

    fn fetch_item(&self, user: UserId, id: ItemId) -> Result<Option<WardrobeItem>, RepositoryError> {
        let guard = self.items.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).filter(|item| item.user_id == user).cloned())
    }

    fn delete_item(&self, user: UserId, id: ItemId) -> Result<(), RepositoryError> {
        let mut guard = self.items.lock().expect("repository mutex poisoned");
        match guard.get(&id) {
            Some(item) if item.user_id == user => {
                guard.remove(&id);
                Ok(())
            }
            _ => Err(RepositoryError::NotFound),
        }
    }

    fn items_for_user(&self, user: UserId) -> Result<Vec<WardrobeItem>, RepositoryError> {
        let guard = self.items.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|item| item.user_id == user)
            .cloned()
            .collect())
    }

    fn insert_outfit(&self, outfit: Outfit) -> Result<Outfit, RepositoryError> {
        let mut guard = self.outfits.lock().expect("repository mutex poisoned");
        guard.insert(outfit.id, outfit.clone());
        Ok(outfit)
    }

    fn update_outfit(&self, outfit: Outfit) -> Result<(), RepositoryError> {
        let mut guard = self.outfits.lock().expect("repository mutex poisoned");
        guard.insert(outfit.id, outfit);
        Ok(())
    }

    fn fetch_outfit(&self, user: UserId, id: OutfitId) -> Result<Option<Outfit>, RepositoryError> {
        let guard = self.outfits.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).filter(|outfit| outfit.user_id == user).cloned())
    }

    fn outfits_for_user(&self, user: UserId) -> Result<Vec<Outfit>, RepositoryError> {
        let guard = self.outfits.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|outfit| outfit.user_id == user)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl WardrobeRepository for UnavailableRepository {
    fn insert_item(&self, _item: WardrobeItem) -> Result<WardrobeItem, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_item(&self, _item: WardrobeItem) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_item(&self, _user: UserId, _id: ItemId) -> Result<Option<WardrobeItem>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete_item(&self, _user: UserId, _id: ItemId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn items_for_user(&self, _user: UserId) -> Result<Vec<WardrobeItem>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_outfit(&self, _outfit: Outfit) -> Result<Outfit, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_outfit(&self, _outfit: Outfit) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_outfit(&self, _user: UserId, _id: OutfitId) -> Result<Option<Outfit>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn outfits_for_user(&self, _user: UserId) -> Result<Vec<Outfit>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Primary suggester stub that always errors.
pub(super) struct FailingSuggester;

#[async_trait]
impl OutfitSuggester for FailingSuggester {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn suggest(
        &self,
        _request: &SuggestionRequest<'_>,
    ) -> Result<Vec<OutfitSuggestion>, SuggestionError> {
        Err(SuggestionError::Status(503))
    }
}

/// Primary suggester stub returning a canned answer.
pub(super) struct CannedSuggester(pub(super) Vec<OutfitSuggestion>);

#[async_trait]
impl OutfitSuggester for CannedSuggester {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn suggest(
        &self,
        _request: &SuggestionRequest<'_>,
    ) -> Result<Vec<OutfitSuggestion>, SuggestionError> {
        Ok(self.0.clone())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
