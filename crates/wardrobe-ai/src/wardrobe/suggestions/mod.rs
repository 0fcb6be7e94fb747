//! Outfit suggestion capability.
//!
//! Every suggester implements [`OutfitSuggester`]. The rule-based suggester is total for any
//! non-empty wardrobe; the remote suggester delegates to a text-generation service and is only
//! ever used behind a [`FallbackSuggester`] so a failed call degrades to the local rules.

mod fallback;
mod local;
mod prompt;
mod remote;

pub use fallback::FallbackSuggester;
pub use local::{RuleBasedSuggester, SelectionStrategy};
pub use remote::RemoteSuggester;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use super::domain::{Category, ItemId, WardrobeItem};
use super::rules::OutfitRuleBook;
use crate::config::{SuggestionConfig, SuggestionProvider};

/// Maximum number of suggestions returned for a single request.
pub const MAX_SUGGESTIONS: usize = 3;
/// Minimum number of distinct items for a suggestion to be kept.
pub const MIN_OUTFIT_ITEMS: usize = 2;

/// Inputs shared by every suggester implementation.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionRequest<'a> {
    pub items: &'a [WardrobeItem],
    pub occasion: &'a str,
    pub season: &'a str,
    pub style: &'a str,
}

/// Compact item reference embedded in a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedItem {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    pub color: String,
    pub favorite: bool,
}

impl From<&WardrobeItem> for SuggestedItem {
    fn from(item: &WardrobeItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            category: item.category,
            color: item.color.clone(),
            favorite: item.favorite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutfitSuggestion {
    pub name: String,
    pub description: String,
    pub style_notes: String,
    pub items: Vec<SuggestedItem>,
    pub item_ids: Vec<ItemId>,
}

impl OutfitSuggestion {
    pub(crate) fn from_items(
        name: String,
        description: String,
        style_notes: String,
        items: &[&WardrobeItem],
    ) -> Self {
        Self {
            name,
            description,
            style_notes,
            items: items.iter().map(|item| SuggestedItem::from(*item)).collect(),
            item_ids: items.iter().map(|item| item.id).collect(),
        }
    }

    pub(crate) fn sorted_ids(&self) -> Vec<ItemId> {
        let mut ids = self.item_ids.clone();
        ids.sort_unstable();
        ids
    }
}

#[async_trait]
pub trait OutfitSuggester: Send + Sync {
    /// Short provider label used in logs.
    fn name(&self) -> &'static str;

    async fn suggest(
        &self,
        request: &SuggestionRequest<'_>,
    ) -> Result<Vec<OutfitSuggestion>, SuggestionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error("suggestion provider unavailable: {0}")]
    Unavailable(String),
    #[error("suggestion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("suggestion provider responded with status {0}")]
    Status(u16),
    #[error("suggestion response could not be used: {0}")]
    Malformed(String),
}

/// Builds the configured suggester. Remote providers are always wrapped with the rule-based
/// fallback.
pub fn build_suggester(
    config: &SuggestionConfig,
    rules: Arc<OutfitRuleBook>,
) -> Result<Arc<dyn OutfitSuggester>, SuggestionError> {
    let local = match config.seed {
        Some(seed) => RuleBasedSuggester::with_seed(rules, seed),
        None => RuleBasedSuggester::new(rules),
    };

    match &config.provider {
        SuggestionProvider::Local => Ok(Arc::new(local)),
        SuggestionProvider::Remote(remote) => {
            let primary = RemoteSuggester::new(remote)?;
            Ok(Arc::new(FallbackSuggester::new(primary, local)))
        }
    }
}
