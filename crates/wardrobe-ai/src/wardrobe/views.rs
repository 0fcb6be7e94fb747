use serde::Serialize;

use super::domain::{Category, Outfit, WardrobeItem};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub label: &'static str,
    pub count: usize,
}

/// Wardrobe overview for a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WardrobeDashboard {
    pub total_items: usize,
    pub favorites: usize,
    pub total_outfits: usize,
    pub categories: Vec<CategoryCount>,
    pub most_worn: Vec<WardrobeItem>,
    pub least_worn: Vec<WardrobeItem>,
    pub recent_outfits: Vec<Outfit>,
}

const HIGHLIGHT_COUNT: usize = 5;

impl WardrobeDashboard {
    pub(crate) fn build(items: Vec<WardrobeItem>, outfits: Vec<Outfit>) -> Self {
        let categories = Category::ordered()
            .into_iter()
            .map(|category| CategoryCount {
                category,
                label: category.label(),
                count: items.iter().filter(|item| item.category == category).count(),
            })
            .filter(|entry| entry.count > 0)
            .collect();

        // Stable sorts keep insertion order among equal counts.
        let mut by_wear = items.clone();
        by_wear.sort_by_key(|item| item.times_worn);
        let least_worn = by_wear.iter().take(HIGHLIGHT_COUNT).cloned().collect();
        by_wear.sort_by(|a, b| b.times_worn.cmp(&a.times_worn));
        let most_worn = by_wear
            .into_iter()
            .filter(|item| item.times_worn > 0)
            .take(HIGHLIGHT_COUNT)
            .collect();

        let mut recent_outfits = outfits.clone();
        recent_outfits.sort_by(|a, b| b.created_on.cmp(&a.created_on).then(b.id.cmp(&a.id)));
        recent_outfits.truncate(HIGHLIGHT_COUNT);

        Self {
            total_items: items.len(),
            favorites: items.iter().filter(|item| item.favorite).count(),
            total_outfits: outfits.len(),
            categories,
            most_worn,
            least_worn,
            recent_outfits,
        }
    }
}

/// Outfit with its member items resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutfitDetail {
    #[serde(flatten)]
    pub outfit: Outfit,
    pub items: Vec<WardrobeItem>,
}
