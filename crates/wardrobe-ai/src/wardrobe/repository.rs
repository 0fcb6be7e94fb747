use super::domain::{ItemId, Outfit, OutfitId, UserId, WardrobeItem};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Listings are expected in insertion order; suggestion tie-breaks rely on it.
pub trait WardrobeRepository: Send + Sync {
    fn insert_item(&self, item: WardrobeItem) -> Result<WardrobeItem, RepositoryError>;
    fn update_item(&self, item: WardrobeItem) -> Result<(), RepositoryError>;
    fn fetch_item(&self, user: UserId, id: ItemId) -> Result<Option<WardrobeItem>, RepositoryError>;
    fn delete_item(&self, user: UserId, id: ItemId) -> Result<(), RepositoryError>;
    fn items_for_user(&self, user: UserId) -> Result<Vec<WardrobeItem>, RepositoryError>;

    fn insert_outfit(&self, outfit: Outfit) -> Result<Outfit, RepositoryError>;
    fn update_outfit(&self, outfit: Outfit) -> Result<(), RepositoryError>;
    fn fetch_outfit(&self, user: UserId, id: OutfitId) -> Result<Option<Outfit>, RepositoryError>;
    fn outfits_for_user(&self, user: UserId) -> Result<Vec<Outfit>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
