use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    OutfitSuggestion, SuggestionError, SuggestionRequest, MAX_SUGGESTIONS, MIN_OUTFIT_ITEMS,
};
use crate::wardrobe::domain::{ItemId, WardrobeItem};

pub(crate) fn build_prompt(request: &SuggestionRequest<'_>) -> String {
    let wardrobe: Vec<Value> = request
        .items
        .iter()
        .map(|item| {
            json!({
                "id": item.id.0,
                "name": item.name,
                "category": item.category.key(),
                "color": item.color,
                "brand": item.brand,
                "season": item.season.key(),
                "tags": item.tag_list(),
                "times_worn": item.times_worn,
                "favorite": item.favorite,
            })
        })
        .collect();

    let wardrobe_json = serde_json::to_string_pretty(&wardrobe).unwrap_or_else(|_| "[]".into());

    format!(
        "You are a personal stylist. Using only the wardrobe items below, suggest up to \
{MAX_SUGGESTIONS} outfits.\n\
Occasion: {occasion}\n\
Season: {season}\n\
Style preference: {style}\n\n\
Wardrobe items (JSON):\n{wardrobe_json}\n\n\
Rules:\n\
- every outfit uses at least {MIN_OUTFIT_ITEMS} different items from the list\n\
- refer to items by their numeric id\n\
- prefer items that have been worn less often\n\n\
Respond with a JSON array only, no commentary, shaped like:\n\
[{{\"name\": \"...\", \"description\": \"...\", \"style_notes\": \"...\", \"item_ids\": [1, 2]}}]",
        occasion = request.occasion,
        season = request.season,
        style = request.style,
    )
}

#[derive(Debug, Deserialize)]
struct GeneratedOutfit {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    style_notes: String,
    #[serde(default)]
    item_ids: Vec<Value>,
}

/// Turns generated text into suggestions. Unknown or repeated ids are dropped and outfits with
/// too few usable items are skipped; an answer with no usable outfit is an error.
pub(crate) fn parse_response(
    text: &str,
    items: &[WardrobeItem],
) -> Result<Vec<OutfitSuggestion>, SuggestionError> {
    let generated = extract_outfits(text)?;

    let lookup: HashMap<ItemId, &WardrobeItem> = items.iter().map(|item| (item.id, item)).collect();
    let mut suggestions = Vec::new();

    for outfit in generated {
        let mut chosen: Vec<&WardrobeItem> = Vec::new();
        for raw in &outfit.item_ids {
            let Some(id) = parse_item_id(raw) else {
                continue;
            };
            if let Some(item) = lookup.get(&id).copied() {
                if chosen.iter().all(|existing| existing.id != id) {
                    chosen.push(item);
                }
            }
        }

        if chosen.len() < MIN_OUTFIT_ITEMS {
            continue;
        }

        suggestions.push(OutfitSuggestion::from_items(
            outfit.name.trim().to_string(),
            outfit.description.trim().to_string(),
            outfit.style_notes.trim().to_string(),
            &chosen,
        ));

        if suggestions.len() == MAX_SUGGESTIONS {
            break;
        }
    }

    if suggestions.is_empty() {
        return Err(SuggestionError::Malformed(
            "no generated outfit referenced enough wardrobe items".into(),
        ));
    }

    Ok(suggestions)
}

// Models wrap the array in markdown fences or prose that may itself contain brackets, so
// every `[` is tried until one starts a non-empty outfit list. Trailing text is ignored.
fn extract_outfits(text: &str) -> Result<Vec<GeneratedOutfit>, SuggestionError> {
    let mut last_error = None;

    for (start, _) in text.match_indices('[') {
        let mut stream =
            serde_json::Deserializer::from_str(&text[start..]).into_iter::<Vec<GeneratedOutfit>>();
        match stream.next() {
            Some(Ok(outfits)) if !outfits.is_empty() => return Ok(outfits),
            Some(Err(err)) => last_error = Some(err),
            _ => {}
        }
    }

    Err(match last_error {
        Some(err) => SuggestionError::Malformed(format!("unexpected outfit shape: {err}")),
        None => SuggestionError::Malformed("response contains no JSON array".into()),
    })
}

fn parse_item_id(value: &Value) -> Option<ItemId> {
    match value {
        Value::Number(number) => number.as_u64().map(ItemId),
        Value::String(raw) => raw.trim().parse::<u64>().ok().map(ItemId),
        _ => None,
    }
}
