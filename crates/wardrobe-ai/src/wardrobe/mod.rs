//! Wardrobe items, outfits, and the outfit suggestion engine.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod rules;
pub mod service;
pub mod suggestions;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    Category, ItemFilter, ItemId, NewOutfit, NewWardrobeItem, Outfit, OutfitId, Season, UserId,
    WardrobeItem,
};
pub use import::{ImportError, WardrobeCsvImporter};
pub use repository::{RepositoryError, WardrobeRepository};
pub use router::wardrobe_router;
pub use rules::{OutfitRule, OutfitRuleBook, RuleBookError};
pub use service::{ImportSummary, WardrobeService, WardrobeServiceError};
pub use suggestions::{
    build_suggester, FallbackSuggester, OutfitSuggester, OutfitSuggestion, RemoteSuggester,
    RuleBasedSuggester, SuggestionError, SuggestionRequest,
};
pub use views::{OutfitDetail, WardrobeDashboard};
