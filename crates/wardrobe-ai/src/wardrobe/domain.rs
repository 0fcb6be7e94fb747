use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for the owner of a wardrobe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

/// Identifier wrapper for a single wardrobe item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// Identifier wrapper for a saved outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutfitId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OutfitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed clothing categories used for grouping and outfit rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Tops,
    Bottoms,
    Dresses,
    Outerwear,
    Shoes,
    Accessories,
    Activewear,
    Formal,
}

impl Category {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Tops,
            Self::Bottoms,
            Self::Dresses,
            Self::Outerwear,
            Self::Shoes,
            Self::Accessories,
            Self::Activewear,
            Self::Formal,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Tops => "tops",
            Self::Bottoms => "bottoms",
            Self::Dresses => "dresses",
            Self::Outerwear => "outerwear",
            Self::Shoes => "shoes",
            Self::Accessories => "accessories",
            Self::Activewear => "activewear",
            Self::Formal => "formal",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tops => "Tops",
            Self::Bottoms => "Bottoms",
            Self::Dresses => "Dresses",
            Self::Outerwear => "Outerwear",
            Self::Shoes => "Shoes",
            Self::Accessories => "Accessories",
            Self::Activewear => "Activewear",
            Self::Formal => "Formal Wear",
        }
    }

    /// Lenient parser accepting singular forms and a few common aliases.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tops" | "top" | "shirt" | "shirts" => Some(Self::Tops),
            "bottoms" | "bottom" | "pants" | "trousers" => Some(Self::Bottoms),
            "dresses" | "dress" => Some(Self::Dresses),
            "outerwear" | "outer wear" | "jacket" | "jackets" | "coat" | "coats" => {
                Some(Self::Outerwear)
            }
            "shoes" | "shoe" | "footwear" => Some(Self::Shoes),
            "accessories" | "accessory" => Some(Self::Accessories),
            "activewear" | "active wear" | "sportswear" => Some(Self::Activewear),
            "formal" | "formal wear" | "formalwear" => Some(Self::Formal),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    #[default]
    AllSeason,
}

impl Season {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
            Self::AllSeason => "all_season",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "spring" => Some(Self::Spring),
            "summer" => Some(Self::Summer),
            "fall" | "autumn" => Some(Self::Fall),
            "winter" => Some(Self::Winter),
            "" | "all" | "all_season" | "all-season" | "all season" => Some(Self::AllSeason),
            _ => None,
        }
    }
}

/// A single owned clothing article with usage and favorite metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardrobeItem {
    pub id: ItemId,
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub season: Season,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub times_worn: u32,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub last_worn: Option<NaiveDate>,
    #[serde(default)]
    pub added_on: Option<NaiveDate>,
}

impl WardrobeItem {
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Two items are duplicates when name, category, color, and size all match.
    pub fn is_duplicate_of(&self, candidate: &NewWardrobeItem) -> bool {
        self.category == candidate.category
            && self.name.trim().eq_ignore_ascii_case(candidate.name.trim())
            && self.color.trim().eq_ignore_ascii_case(candidate.color.trim())
            && self.size.trim().eq_ignore_ascii_case(candidate.size.trim())
    }

    pub(crate) fn record_wear(&mut self, on: NaiveDate) {
        self.times_worn = self.times_worn.saturating_add(1);
        self.last_worn = Some(on);
    }
}

/// Payload for manual entry or store-purchase import of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWardrobeItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub season: Season,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub times_worn: u32,
    #[serde(default)]
    pub favorite: bool,
}

impl NewWardrobeItem {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category,
            color: String::new(),
            brand: String::new(),
            size: String::new(),
            season: Season::AllSeason,
            tags: String::new(),
            times_worn: 0,
            favorite: false,
        }
    }

    pub(crate) fn into_item(self, id: ItemId, user_id: UserId, added_on: NaiveDate) -> WardrobeItem {
        WardrobeItem {
            id,
            user_id,
            name: self.name.trim().to_string(),
            description: self.description,
            category: self.category,
            color: self.color,
            brand: self.brand,
            size: self.size,
            season: self.season,
            tags: self.tags,
            times_worn: self.times_worn,
            favorite: self.favorite,
            last_worn: None,
            added_on: Some(added_on),
        }
    }
}

/// A named set of wardrobe items intended to be worn together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outfit {
    pub id: OutfitId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub occasion: String,
    pub season: Season,
    pub item_ids: Vec<ItemId>,
    pub times_worn: u32,
    pub ai_generated: bool,
    pub created_on: NaiveDate,
    pub last_worn: Option<NaiveDate>,
}

/// Request to persist an outfit, either hand-assembled or taken from a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOutfit {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub occasion: String,
    #[serde(default)]
    pub season: Season,
    pub item_ids: Vec<ItemId>,
}

/// Narrowing options for item listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ItemFilter {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub favorites_only: bool,
}

impl ItemFilter {
    pub fn matches(&self, item: &WardrobeItem) -> bool {
        if let Some(category) = self.category {
            if item.category != category {
                return false;
            }
        }
        if let Some(season) = self.season {
            if item.season != season && item.season != Season::AllSeason {
                return false;
            }
        }
        !self.favorites_only || item.favorite
    }
}
