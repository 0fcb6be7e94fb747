use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{
    OutfitSuggester, OutfitSuggestion, SuggestionError, SuggestionRequest, MAX_SUGGESTIONS,
    MIN_OUTFIT_ITEMS,
};
use crate::wardrobe::domain::{Category, WardrobeItem};
use crate::wardrobe::rules::{OutfitRule, OutfitRuleBook};

const MAX_OUTFIT_ITEMS: usize = 4;
const BACKFILL_SAMPLE_SIZE: usize = 3;
const MAX_BACKFILL_ATTEMPTS: usize = 12;

/// How optional categories are filled for a given suggestion slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStrategy {
    LeastWorn,
    FavoriteBiased,
    Random,
}

impl SelectionStrategy {
    /// Strategy per slot, in output order.
    pub const SLOTS: [Self; MAX_SUGGESTIONS] =
        [Self::LeastWorn, Self::FavoriteBiased, Self::Random];

    const fn title(self) -> &'static str {
        match self {
            Self::LeastWorn => "Fresh Rotation",
            Self::FavoriteBiased => "Favorites Forward",
            Self::Random => "Wildcard Mix",
        }
    }

    const fn tip(self) -> &'static str {
        match self {
            Self::LeastWorn => "Built from the pieces you reach for least.",
            Self::FavoriteBiased => "Leans on the pieces you marked as favorites.",
            Self::Random => "A wildcard pairing to shake up your routine.",
        }
    }

    fn pick<'a, R: Rng + ?Sized>(
        self,
        candidates: &[&'a WardrobeItem],
        chosen: &[&WardrobeItem],
        rng: &mut R,
    ) -> Option<&'a WardrobeItem> {
        match self {
            Self::LeastWorn => least_worn(candidates, chosen),
            Self::FavoriteBiased => {
                let favorites: Vec<&'a WardrobeItem> = unused(candidates, chosen)
                    .into_iter()
                    .filter(|item| item.favorite)
                    .collect();
                match favorites.choose(rng) {
                    Some(item) => Some(*item),
                    None => random_unused(candidates, chosen, rng),
                }
            }
            Self::Random => random_unused(candidates, chosen, rng),
        }
    }
}

/// Local rule-driven suggester. Never fails; an empty wardrobe yields no suggestions.
pub struct RuleBasedSuggester {
    rules: Arc<OutfitRuleBook>,
    rng: Mutex<StdRng>,
}

impl RuleBasedSuggester {
    pub fn new(rules: Arc<OutfitRuleBook>) -> Self {
        Self {
            rules,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seeded construction for reproducible suggestions.
    pub fn with_seed(rules: Arc<OutfitRuleBook>, seed: u64) -> Self {
        Self {
            rules,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn generate(&self, request: &SuggestionRequest<'_>) -> Vec<OutfitSuggestion> {
        let rule = self.rules.resolve(request.occasion);
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        build_suggestions(request, rule, &mut *rng)
    }
}

#[async_trait]
impl OutfitSuggester for RuleBasedSuggester {
    fn name(&self) -> &'static str {
        "rules"
    }

    async fn suggest(
        &self,
        request: &SuggestionRequest<'_>,
    ) -> Result<Vec<OutfitSuggestion>, SuggestionError> {
        Ok(self.generate(request))
    }
}

pub(crate) fn build_suggestions<R: Rng + ?Sized>(
    request: &SuggestionRequest<'_>,
    rule: &OutfitRule,
    rng: &mut R,
) -> Vec<OutfitSuggestion> {
    let by_category = group_by_category(request.items);
    let mut suggestions = Vec::with_capacity(MAX_SUGGESTIONS);

    for strategy in SelectionStrategy::SLOTS {
        let mut chosen: Vec<&WardrobeItem> = Vec::new();

        for category in &rule.required {
            if let Some(candidates) = by_category.get(category) {
                if let Some(item) = least_worn(candidates, &chosen) {
                    chosen.push(item);
                }
            }
        }

        for category in &rule.optional {
            if chosen.len() >= MAX_OUTFIT_ITEMS {
                break;
            }
            if let Some(candidates) = by_category.get(category) {
                if let Some(item) = strategy.pick(candidates, &chosen, rng) {
                    chosen.push(item);
                }
            }
        }

        if chosen.len() < MIN_OUTFIT_ITEMS {
            debug!(?strategy, size = chosen.len(), "discarding undersized outfit");
            continue;
        }

        suggestions.push(OutfitSuggestion::from_items(
            format!("{} {}", title_case(&rule.occasion), strategy.title()),
            describe(request, &rule.occasion, &chosen),
            format!("{} {}", rule.notes, strategy.tip()).trim().to_string(),
            &chosen,
        ));
    }

    if suggestions.len() < MAX_SUGGESTIONS && request.items.len() >= MIN_OUTFIT_ITEMS {
        backfill(request, &mut suggestions, rng);
    }

    suggestions
}

fn backfill<R: Rng + ?Sized>(
    request: &SuggestionRequest<'_>,
    suggestions: &mut Vec<OutfitSuggestion>,
    rng: &mut R,
) {
    let sample_size = request.items.len().min(BACKFILL_SAMPLE_SIZE);
    let mut attempts = 0;

    while suggestions.len() < MAX_SUGGESTIONS && attempts < MAX_BACKFILL_ATTEMPTS {
        attempts += 1;

        let mut sample: Vec<&WardrobeItem> = Vec::with_capacity(sample_size);
        for item in request.items.choose_multiple(rng, sample_size) {
            if sample.iter().all(|existing| existing.id != item.id) {
                sample.push(item);
            }
        }
        if sample.len() < MIN_OUTFIT_ITEMS {
            continue;
        }

        let mut ids: Vec<_> = sample.iter().map(|item| item.id).collect();
        ids.sort_unstable();
        if suggestions.iter().any(|existing| existing.sorted_ids() == ids) {
            continue;
        }

        let number = suggestions.len() + 1;
        suggestions.push(OutfitSuggestion::from_items(
            format!("Mix & Match {number}"),
            describe(request, "everyday", &sample),
            "A random combination from your wardrobe. Try it before you dismiss it.".to_string(),
            &sample,
        ));
    }
}

/// Groups items by category, keeping input order inside each group.
fn group_by_category(items: &[WardrobeItem]) -> BTreeMap<Category, Vec<&WardrobeItem>> {
    let mut groups: BTreeMap<Category, Vec<&WardrobeItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.category).or_default().push(item);
    }
    groups
}

fn unused<'a>(candidates: &[&'a WardrobeItem], chosen: &[&WardrobeItem]) -> Vec<&'a WardrobeItem> {
    candidates
        .iter()
        .copied()
        .filter(|item| chosen.iter().all(|used| used.id != item.id))
        .collect()
}

// min_by_key keeps the first minimum, so ties go to input order.
fn least_worn<'a>(
    candidates: &[&'a WardrobeItem],
    chosen: &[&WardrobeItem],
) -> Option<&'a WardrobeItem> {
    unused(candidates, chosen)
        .into_iter()
        .min_by_key(|item| item.times_worn)
}

fn random_unused<'a, R: Rng + ?Sized>(
    candidates: &[&'a WardrobeItem],
    chosen: &[&WardrobeItem],
    rng: &mut R,
) -> Option<&'a WardrobeItem> {
    unused(candidates, chosen).choose(rng).copied()
}

fn describe(request: &SuggestionRequest<'_>, occasion: &str, items: &[&WardrobeItem]) -> String {
    let pieces = items
        .iter()
        .map(|item| {
            if item.color.trim().is_empty() {
                item.name.clone()
            } else {
                format!("{} {}", item.color.trim(), item.name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut look = String::new();
    if !request.style.trim().is_empty() {
        look.push_str(request.style.trim());
        look.push(' ');
    }
    look.push_str(occasion);

    let mut description = format!("Pair your {pieces} for a {look} look");
    if !request.season.trim().is_empty() {
        description.push_str(&format!(" this {}", request.season.trim()));
    }
    description.push('.');
    description
}

fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
