use std::collections::HashSet;
use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{
    ItemFilter, ItemId, NewOutfit, NewWardrobeItem, Outfit, OutfitId, UserId, WardrobeItem,
};
use super::import::{ImportError, WardrobeCsvImporter};
use super::repository::{RepositoryError, WardrobeRepository};
use super::rules::OutfitRuleBook;
use super::suggestions::{
    OutfitSuggester, OutfitSuggestion, RuleBasedSuggester, SuggestionError, SuggestionRequest,
};
use super::views::{OutfitDetail, WardrobeDashboard};
use crate::weather::{self, DressRecommendation, WeatherSnapshot};

/// Service composing the repository and the configured outfit suggester.
pub struct WardrobeService<R> {
    repository: Arc<R>,
    suggester: Arc<dyn OutfitSuggester>,
    // Serializes the duplicate check with the insert that follows it.
    item_writes: Mutex<()>,
}

static ITEM_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static OUTFIT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_item_id() -> ItemId {
    ItemId(ITEM_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

fn next_outfit_id() -> OutfitId {
    OutfitId(OUTFIT_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Outcome of a bulk CSV import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub added: Vec<WardrobeItem>,
    pub skipped_duplicates: usize,
}

impl<R> WardrobeService<R>
where
    R: WardrobeRepository + 'static,
{
    pub fn new(repository: Arc<R>, suggester: Arc<dyn OutfitSuggester>) -> Self {
        Self {
            repository,
            suggester,
            item_writes: Mutex::new(()),
        }
    }

    /// Service answering suggestions with the local rules only.
    pub fn with_rules(repository: Arc<R>, rules: Arc<OutfitRuleBook>) -> Self {
        Self::new(repository, Arc::new(RuleBasedSuggester::new(rules)))
    }

    /// Add a manually entered item. Items matching an existing one by name, category, color,
    /// and size are rejected as duplicates.
    pub fn add_item(
        &self,
        user: UserId,
        new_item: NewWardrobeItem,
    ) -> Result<WardrobeItem, WardrobeServiceError> {
        if new_item.name.trim().is_empty() {
            return Err(WardrobeServiceError::Validation(
                "item name is required".to_string(),
            ));
        }

        let _guard = self
            .item_writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let existing = self.repository.items_for_user(user)?;
        if let Some(duplicate) = existing.iter().find(|item| item.is_duplicate_of(&new_item)) {
            return Err(WardrobeServiceError::DuplicateItem(duplicate.id));
        }

        let item = new_item.into_item(next_item_id(), user, today());
        let stored = self.repository.insert_item(item)?;
        debug!(user = user.0, item = stored.id.0, category = %stored.category, "wardrobe item added");
        Ok(stored)
    }

    /// Import items from a CSV export, skipping rows already present in the wardrobe.
    pub fn import_items<Rd: Read>(
        &self,
        user: UserId,
        reader: Rd,
    ) -> Result<ImportSummary, WardrobeServiceError> {
        let rows = WardrobeCsvImporter::from_reader(reader)?;
        let mut summary = ImportSummary {
            added: Vec::new(),
            skipped_duplicates: 0,
        };

        for row in rows {
            match self.add_item(user, row) {
                Ok(item) => summary.added.push(item),
                Err(WardrobeServiceError::DuplicateItem(_)) => summary.skipped_duplicates += 1,
                Err(other) => return Err(other),
            }
        }

        info!(
            user = user.0,
            added = summary.added.len(),
            skipped = summary.skipped_duplicates,
            "wardrobe import finished"
        );
        Ok(summary)
    }

    pub fn list_items(
        &self,
        user: UserId,
        filter: &ItemFilter,
    ) -> Result<Vec<WardrobeItem>, WardrobeServiceError> {
        let items = self.repository.items_for_user(user)?;
        Ok(items.into_iter().filter(|item| filter.matches(item)).collect())
    }

    pub fn get_item(&self, user: UserId, id: ItemId) -> Result<WardrobeItem, WardrobeServiceError> {
        self.repository
            .fetch_item(user, id)?
            .ok_or(WardrobeServiceError::ItemNotFound(id))
    }

    pub fn update_notes(
        &self,
        user: UserId,
        id: ItemId,
        description: String,
    ) -> Result<WardrobeItem, WardrobeServiceError> {
        let mut item = self.get_item(user, id)?;
        item.description = description;
        self.repository.update_item(item.clone())?;
        Ok(item)
    }

    /// Delete an item and detach it from any outfit that referenced it.
    pub fn remove_item(&self, user: UserId, id: ItemId) -> Result<(), WardrobeServiceError> {
        self.get_item(user, id)?;
        self.repository.delete_item(user, id)?;

        for mut outfit in self.repository.outfits_for_user(user)? {
            if outfit.item_ids.contains(&id) {
                outfit.item_ids.retain(|item_id| *item_id != id);
                self.repository.update_outfit(outfit)?;
            }
        }

        Ok(())
    }

    /// Flip the favorite flag, returning the new value.
    pub fn toggle_favorite(&self, user: UserId, id: ItemId) -> Result<bool, WardrobeServiceError> {
        let mut item = self.get_item(user, id)?;
        item.favorite = !item.favorite;
        let favorite = item.favorite;
        self.repository.update_item(item)?;
        Ok(favorite)
    }

    /// Record a wear, returning the new count.
    pub fn mark_worn(
        &self,
        user: UserId,
        id: ItemId,
        on: NaiveDate,
    ) -> Result<u32, WardrobeServiceError> {
        let mut item = self.get_item(user, id)?;
        item.record_wear(on);
        let times_worn = item.times_worn;
        self.repository.update_item(item)?;
        Ok(times_worn)
    }

    pub fn dashboard(&self, user: UserId) -> Result<WardrobeDashboard, WardrobeServiceError> {
        let items = self.repository.items_for_user(user)?;
        let outfits = self.repository.outfits_for_user(user)?;
        Ok(WardrobeDashboard::build(items, outfits))
    }

    /// Save a hand-assembled outfit. Ids that are unknown or owned by someone else are dropped.
    pub fn create_outfit(
        &self,
        user: UserId,
        request: NewOutfit,
    ) -> Result<Outfit, WardrobeServiceError> {
        self.store_outfit(user, request, false)
    }

    /// Save one of the generated suggestions, with the same id filtering as manual outfits.
    pub fn save_suggestion(
        &self,
        user: UserId,
        request: NewOutfit,
    ) -> Result<Outfit, WardrobeServiceError> {
        self.store_outfit(user, request, true)
    }

    fn store_outfit(
        &self,
        user: UserId,
        request: NewOutfit,
        ai_generated: bool,
    ) -> Result<Outfit, WardrobeServiceError> {
        if request.name.trim().is_empty() {
            return Err(WardrobeServiceError::Validation(
                "outfit name is required".to_string(),
            ));
        }

        let owned: HashSet<ItemId> = self
            .repository
            .items_for_user(user)?
            .into_iter()
            .map(|item| item.id)
            .collect();

        let mut item_ids = Vec::with_capacity(request.item_ids.len());
        for id in request.item_ids {
            if owned.contains(&id) && !item_ids.contains(&id) {
                item_ids.push(id);
            }
        }

        if item_ids.is_empty() {
            return Err(WardrobeServiceError::Validation(
                "outfit must include at least one of your wardrobe items".to_string(),
            ));
        }

        let outfit = Outfit {
            id: next_outfit_id(),
            user_id: user,
            name: request.name.trim().to_string(),
            description: request.description,
            occasion: request.occasion,
            season: request.season,
            item_ids,
            times_worn: 0,
            ai_generated,
            created_on: today(),
            last_worn: None,
        };

        let stored = self.repository.insert_outfit(outfit)?;
        info!(user = user.0, outfit = stored.id.0, ai_generated, "outfit saved");
        Ok(stored)
    }

    pub fn list_outfits(&self, user: UserId) -> Result<Vec<Outfit>, WardrobeServiceError> {
        Ok(self.repository.outfits_for_user(user)?)
    }

    pub fn get_outfit(
        &self,
        user: UserId,
        id: OutfitId,
    ) -> Result<OutfitDetail, WardrobeServiceError> {
        let outfit = self
            .repository
            .fetch_outfit(user, id)?
            .ok_or(WardrobeServiceError::OutfitNotFound(id))?;

        let mut items = Vec::with_capacity(outfit.item_ids.len());
        for item_id in &outfit.item_ids {
            if let Some(item) = self.repository.fetch_item(user, *item_id)? {
                items.push(item);
            }
        }

        Ok(OutfitDetail { outfit, items })
    }

    /// Record a wear of the outfit; every member item is marked worn as well.
    pub fn mark_outfit_worn(
        &self,
        user: UserId,
        id: OutfitId,
        on: NaiveDate,
    ) -> Result<OutfitDetail, WardrobeServiceError> {
        let mut detail = self.get_outfit(user, id)?;

        detail.outfit.times_worn = detail.outfit.times_worn.saturating_add(1);
        detail.outfit.last_worn = Some(on);
        for item in &mut detail.items {
            item.record_wear(on);
            self.repository.update_item(item.clone())?;
        }
        self.repository.update_outfit(detail.outfit.clone())?;

        Ok(detail)
    }

    /// Suggest outfits for the user's wardrobe. An empty wardrobe is reported instead of
    /// attempting generation.
    pub async fn suggest_outfits(
        &self,
        user: UserId,
        occasion: &str,
        season: &str,
        style: &str,
    ) -> Result<Vec<OutfitSuggestion>, WardrobeServiceError> {
        let items = self.repository.items_for_user(user)?;
        if items.is_empty() {
            return Err(WardrobeServiceError::EmptyWardrobe);
        }

        let request = SuggestionRequest {
            items: &items,
            occasion,
            season,
            style,
        };
        let suggestions = self.suggester.suggest(&request).await?;
        debug!(
            user = user.0,
            suggester = self.suggester.name(),
            count = suggestions.len(),
            "outfit suggestions generated"
        );
        Ok(suggestions)
    }

    pub fn weather_recommendation(
        &self,
        user: UserId,
        snapshot: &WeatherSnapshot,
    ) -> Result<DressRecommendation, WardrobeServiceError> {
        let items = self.repository.items_for_user(user)?;
        Ok(weather::recommend(snapshot, &items))
    }
}

/// Error raised by the wardrobe service.
#[derive(Debug, thiserror::Error)]
pub enum WardrobeServiceError {
    #[error("item is already in your wardrobe (item {0})")]
    DuplicateItem(ItemId),
    #[error("{0}")]
    Validation(String),
    #[error("wardrobe is empty; add items before requesting outfit suggestions")]
    EmptyWardrobe,
    #[error("wardrobe item {0} not found")]
    ItemNotFound(ItemId),
    #[error("outfit {0} not found")]
    OutfitNotFound(OutfitId),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Suggestion(#[from] SuggestionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
