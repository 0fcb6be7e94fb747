use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use wardrobe_ai::wardrobe::{
    ItemId, Outfit, OutfitId, RepositoryError, UserId, WardrobeItem, WardrobeRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local storage. Maps are keyed by id, so listings come back in insertion order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryWardrobeRepository {
    items: Arc<Mutex<BTreeMap<ItemId, WardrobeItem>>>,
    outfits: Arc<Mutex<BTreeMap<OutfitId, Outfit>>>,
}

impl InMemoryWardrobeRepository {
    fn items(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<ItemId, WardrobeItem>>, RepositoryError> {
        self.items
            .lock()
            .map_err(|_| RepositoryError::Unavailable("item store lock poisoned".to_string()))
    }

    fn outfits(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<OutfitId, Outfit>>, RepositoryError> {
        self.outfits
            .lock()
            .map_err(|_| RepositoryError::Unavailable("outfit store lock poisoned".to_string()))
    }
}

impl WardrobeRepository for InMemoryWardrobeRepository {
    fn insert_item(&self, item: WardrobeItem) -> Result<WardrobeItem, RepositoryError> {
        let mut guard = self.items()?;
        if guard.contains_key(&item.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(item.id, item.clone());
        Ok(item)
    }

    fn update_item(&self, item: WardrobeItem) -> Result<(), RepositoryError> {
        let mut guard = self.items()?;
        match guard.get_mut(&item.id) {
            Some(existing) if existing.user_id == item.user_id => {
                *existing = item;
                Ok(())
            }
            _ => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_item(&self, user: UserId, id: ItemId) -> Result<Option<WardrobeItem>, RepositoryError> {
        let guard = self.items()?;
        Ok(guard.get(&id).filter(|item| item.user_id == user).cloned())
    }

    fn delete_item(&self, user: UserId, id: ItemId) -> Result<(), RepositoryError> {
        let mut guard = self.items()?;
        match guard.get(&id) {
            Some(item) if item.user_id == user => {
                guard.remove(&id);
                Ok(())
            }
            _ => Err(RepositoryError::NotFound),
        }
    }

    fn items_for_user(&self, user: UserId) -> Result<Vec<WardrobeItem>, RepositoryError> {
        let guard = self.items()?;
        Ok(guard
            .values()
            .filter(|item| item.user_id == user)
            .cloned()
            .collect())
    }

    fn insert_outfit(&self, outfit: Outfit) -> Result<Outfit, RepositoryError> {
        let mut guard = self.outfits()?;
        if guard.contains_key(&outfit.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(outfit.id, outfit.clone());
        Ok(outfit)
    }

    fn update_outfit(&self, outfit: Outfit) -> Result<(), RepositoryError> {
        let mut guard = self.outfits()?;
        match guard.get_mut(&outfit.id) {
            Some(existing) if existing.user_id == outfit.user_id => {
                *existing = outfit;
                Ok(())
            }
            _ => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_outfit(&self, user: UserId, id: OutfitId) -> Result<Option<Outfit>, RepositoryError> {
        let guard = self.outfits()?;
        Ok(guard.get(&id).filter(|outfit| outfit.user_id == user).cloned())
    }

    fn outfits_for_user(&self, user: UserId) -> Result<Vec<Outfit>, RepositoryError> {
        let guard = self.outfits()?;
        Ok(guard
            .values()
            .filter(|outfit| outfit.user_id == user)
            .cloned()
            .collect())
    }
}
