//! Weather-driven dress recommendations.
//!
//! Weather readings are supplied by the caller; fetching them from a provider is not part of
//! this crate.

mod rules;

pub use rules::WeatherOutfitRule;

use serde::{Deserialize, Serialize};

use crate::wardrobe::domain::{Category, WardrobeItem};
use crate::wardrobe::suggestions::SuggestedItem;

const MAX_RECOMMENDED_ITEMS: usize = 6;
const FEELS_LIKE_NOTE_THRESHOLD: f32 = 2.0;

/// A single weather observation for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(default = "default_city")]
    pub city: String,
    pub temperature_c: f32,
    pub condition: String,
    #[serde(default)]
    pub humidity: Option<u8>,
    #[serde(default)]
    pub wind_speed_kph: Option<f32>,
    #[serde(default)]
    pub feels_like_c: Option<f32>,
}

fn default_city() -> String {
    "New York".to_string()
}

impl WeatherSnapshot {
    pub fn temperature_f(&self) -> f32 {
        self.temperature_c * 9.0 / 5.0 + 32.0
    }

    pub fn band(&self) -> TemperatureBand {
        TemperatureBand::classify(self.temperature_c)
    }

    pub fn parsed_condition(&self) -> WeatherCondition {
        WeatherCondition::parse(&self.condition)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    VeryCold,
    Cold,
    Cool,
    Mild,
    Warm,
    Hot,
}

impl TemperatureBand {
    pub fn classify(celsius: f32) -> Self {
        if celsius < 0.0 {
            Self::VeryCold
        } else if celsius < 10.0 {
            Self::Cold
        } else if celsius < 20.0 {
            Self::Cool
        } else if celsius < 25.0 {
            Self::Mild
        } else if celsius < 30.0 {
            Self::Warm
        } else {
            Self::Hot
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryCold => "Very Cold (< 0°C)",
            Self::Cold => "Cold (0-10°C)",
            Self::Cool => "Cool (10-20°C)",
            Self::Mild => "Mild (20-25°C)",
            Self::Warm => "Warm (25-30°C)",
            Self::Hot => "Hot (> 30°C)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Windy,
    Foggy,
    Other,
}

impl WeatherCondition {
    /// Accepts provider wording such as "Clear", "light rain", or "Drizzle".
    pub fn parse(value: &str) -> Self {
        let lowered = value.trim().to_ascii_lowercase();
        if lowered.contains("snow") || lowered.contains("sleet") {
            Self::Snowy
        } else if lowered.contains("rain") || lowered.contains("drizzle") || lowered.contains("storm")
        {
            Self::Rainy
        } else if lowered.contains("sun") || lowered.contains("clear") {
            Self::Sunny
        } else if lowered.contains("cloud") || lowered.contains("overcast") {
            Self::Cloudy
        } else if lowered.contains("wind") {
            Self::Windy
        } else if lowered.contains("fog") || lowered.contains("mist") || lowered.contains("haze") {
            Self::Foggy
        } else {
            Self::Other
        }
    }
}

/// Weather-based advice plus the matching pieces from a user's wardrobe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DressRecommendation {
    pub city: String,
    pub temperature_band: TemperatureBand,
    pub condition: WeatherCondition,
    pub recommendation_text: String,
    pub style_tips: String,
    pub color_suggestions: String,
    pub fabric_suggestions: String,
    pub recommended_categories: Vec<Category>,
    pub items: Vec<SuggestedItem>,
}

/// Builds a recommendation for the snapshot and picks wardrobe items in the recommended
/// categories, least worn first.
pub fn recommend(snapshot: &WeatherSnapshot, wardrobe: &[WardrobeItem]) -> DressRecommendation {
    let band = snapshot.band();
    let condition = snapshot.parsed_condition();
    let rule = rules::outfit_rule(condition, band);

    let mut matching: Vec<&WardrobeItem> = wardrobe
        .iter()
        .filter(|item| rule.categories.contains(&item.category))
        .collect();
    matching.sort_by_key(|item| item.times_worn);

    DressRecommendation {
        city: snapshot.city.clone(),
        temperature_band: band,
        condition,
        recommendation_text: recommendation_text(snapshot, band, condition),
        style_tips: rule.style_advice.to_string(),
        color_suggestions: rule.colors.to_string(),
        fabric_suggestions: rule.fabrics.to_string(),
        recommended_categories: rule.categories.to_vec(),
        items: matching
            .into_iter()
            .take(MAX_RECOMMENDED_ITEMS)
            .map(SuggestedItem::from)
            .collect(),
    }
}

pub fn recommendation_text(
    snapshot: &WeatherSnapshot,
    band: TemperatureBand,
    condition: WeatherCondition,
) -> String {
    let temperature = snapshot.temperature_c;
    let mut text = format!(
        "{} {}",
        rules::temperature_advice(band, temperature),
        rules::condition_advice(condition)
    );

    if let Some(feels_like) = snapshot.feels_like_c {
        if (feels_like - temperature).abs() > FEELS_LIKE_NOTE_THRESHOLD {
            text.push_str(&format!(
                " It feels like {feels_like:.1}°C due to humidity and wind conditions."
            ));
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wardrobe::domain::{ItemId, NewWardrobeItem, UserId};
    use chrono::NaiveDate;

    fn snapshot(temperature_c: f32, condition: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Des Moines".to_string(),
            temperature_c,
            condition: condition.to_string(),
            humidity: Some(60),
            wind_speed_kph: Some(12.0),
            feels_like_c: None,
        }
    }

    #[test]
    fn classifies_temperature_band_boundaries() {
        assert_eq!(TemperatureBand::classify(-0.5), TemperatureBand::VeryCold);
        assert_eq!(TemperatureBand::classify(0.0), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::classify(19.9), TemperatureBand::Cool);
        assert_eq!(TemperatureBand::classify(20.0), TemperatureBand::Mild);
        assert_eq!(TemperatureBand::classify(29.9), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::classify(30.0), TemperatureBand::Hot);
    }

    #[test]
    fn parses_provider_condition_wording() {
        assert_eq!(WeatherCondition::parse("Clear"), WeatherCondition::Sunny);
        assert_eq!(WeatherCondition::parse("light drizzle"), WeatherCondition::Rainy);
        assert_eq!(WeatherCondition::parse("Overcast clouds"), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::parse("volcanic ash"), WeatherCondition::Other);
    }

    #[test]
    fn feels_like_note_only_when_gap_is_large() {
        let mut reading = snapshot(12.0, "cloudy");
        reading.feels_like_c = Some(13.5);
        let text = recommendation_text(&reading, reading.band(), reading.parsed_condition());
        assert!(!text.contains("feels like"));

        reading.feels_like_c = Some(8.0);
        let text = recommendation_text(&reading, reading.band(), reading.parsed_condition());
        assert!(text.contains("It feels like 8.0°C"));
        assert!(text.starts_with("Cool and comfortable at 12.0°C."));
    }

    #[test]
    fn recommend_picks_least_worn_items_in_rule_categories() {
        let added = NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date");
        let mut raincoat = NewWardrobeItem::new("Raincoat", Category::Outerwear)
            .into_item(ItemId(1), UserId(3), added);
        raincoat.times_worn = 5;
        let boots = NewWardrobeItem::new("Boots", Category::Shoes).into_item(ItemId(2), UserId(3), added);
        let dress = NewWardrobeItem::new("Sundress", Category::Dresses)
            .into_item(ItemId(3), UserId(3), added);

        let recommendation = recommend(&snapshot(15.0, "rain"), &[raincoat, boots, dress]);

        assert_eq!(recommendation.condition, WeatherCondition::Rainy);
        assert_eq!(recommendation.temperature_band, TemperatureBand::Cool);
        assert!(recommendation.style_tips.contains("waterproof"));
        let ids: Vec<ItemId> = recommendation.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![ItemId(2), ItemId(1)]);
    }

    #[test]
    fn unmatched_weather_uses_fallback_rule() {
        let recommendation = recommend(&snapshot(5.0, "foggy"), &[]);
        assert_eq!(
            recommendation.recommended_categories,
            vec![Category::Tops, Category::Bottoms]
        );
        assert!(recommendation.items.is_empty());
    }
}
