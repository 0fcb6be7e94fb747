use super::{TemperatureBand, WeatherCondition};
use crate::wardrobe::domain::Category;

/// Clothing guidance for one weather condition and temperature band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherOutfitRule {
    pub categories: &'static [Category],
    pub colors: &'static str,
    pub fabrics: &'static str,
    pub style_advice: &'static str,
}

const SUNNY_HOT: WeatherOutfitRule = WeatherOutfitRule {
    categories: &[Category::Tops, Category::Bottoms, Category::Dresses],
    colors: "light colors, white, pastels, bright colors",
    fabrics: "cotton, linen, breathable fabrics",
    style_advice: "Choose light, breathable fabrics and bright colors. Avoid dark colors that absorb heat. Consider sun protection with hats and sunglasses.",
};

const SUNNY_WARM: WeatherOutfitRule = WeatherOutfitRule {
    categories: &[Category::Tops, Category::Bottoms, Category::Dresses],
    colors: "light colors, bright colors, summer tones",
    fabrics: "cotton, linen, light fabrics",
    style_advice: "Perfect weather for light, comfortable clothing. Mix and match bright colors and breathable fabrics.",
};

const RAINY_COOL: WeatherOutfitRule = WeatherOutfitRule {
    categories: &[
        Category::Outerwear,
        Category::Tops,
        Category::Bottoms,
        Category::Shoes,
    ],
    colors: "darker colors, navy, black",
    fabrics: "waterproof, synthetic, quick-dry",
    style_advice: "Layer up with waterproof outer layers. Choose darker colors that won't show water stains. Don't forget waterproof shoes!",
};

const SNOWY_VERY_COLD: WeatherOutfitRule = WeatherOutfitRule {
    categories: &[
        Category::Outerwear,
        Category::Formal,
        Category::Tops,
        Category::Bottoms,
    ],
    colors: "dark colors, warm tones, layering colors",
    fabrics: "wool, fleece, insulated materials",
    style_advice: "Layer multiple pieces for warmth. Choose insulated fabrics and don't forget accessories like scarves and gloves.",
};

const CLOUDY_MILD: WeatherOutfitRule = WeatherOutfitRule {
    categories: &[Category::Tops, Category::Bottoms, Category::Outerwear],
    colors: "versatile colors, neutrals, earth tones",
    fabrics: "cotton, blends, comfortable materials",
    style_advice: "Great weather for versatile outfits. You can layer or go light depending on your comfort.",
};

const FALLBACK: WeatherOutfitRule = WeatherOutfitRule {
    categories: &[Category::Tops, Category::Bottoms],
    colors: "versatile colors, neutrals",
    fabrics: "comfortable materials",
    style_advice: "Choose comfortable, weather-appropriate clothing that makes you feel confident.",
};

pub(super) fn outfit_rule(condition: WeatherCondition, band: TemperatureBand) -> WeatherOutfitRule {
    use TemperatureBand::*;
    use WeatherCondition::*;

    match (condition, band) {
        (Sunny, Hot) => SUNNY_HOT,
        (Sunny, Warm) => SUNNY_WARM,
        (Rainy, Cool) => RAINY_COOL,
        (Snowy, VeryCold) => SNOWY_VERY_COLD,
        (Cloudy, Mild) => CLOUDY_MILD,
        _ => FALLBACK,
    }
}

pub(super) fn temperature_advice(band: TemperatureBand, temperature: f32) -> String {
    match band {
        TemperatureBand::VeryCold => format!(
            "It's freezing at {temperature:.1}°C! Bundle up in warm layers, thick coats, and don't forget your winter accessories."
        ),
        TemperatureBand::Cold => format!(
            "Chilly at {temperature:.1}°C. Perfect for cozy sweaters, warm jackets, and comfortable boots."
        ),
        TemperatureBand::Cool => format!(
            "Cool and comfortable at {temperature:.1}°C. Great weather for light layers and transitional pieces."
        ),
        TemperatureBand::Mild => format!(
            "Pleasant {temperature:.1}°C weather! You have lots of flexibility, so go with what feels comfortable."
        ),
        TemperatureBand::Warm => format!(
            "Lovely {temperature:.1}°C weather. Perfect for light, breathable fabrics and comfortable styles."
        ),
        TemperatureBand::Hot => format!(
            "It's hot at {temperature:.1}°C! Stay cool with light colors, breathable fabrics, and minimal layers."
        ),
    }
}

pub(super) fn condition_advice(condition: WeatherCondition) -> &'static str {
    match condition {
        WeatherCondition::Sunny => "The sun is shining! Consider sun protection and light colors that won't absorb too much heat.",
        WeatherCondition::Cloudy => "Overcast skies provide natural shade. Great day for versatile outfits.",
        WeatherCondition::Rainy => "Rain is expected! Waterproof layers and darker colors are your best friends today.",
        WeatherCondition::Snowy => "Snow is falling! Time for your warmest, most weather-resistant pieces.",
        WeatherCondition::Windy => "It's windy out there! Secure layers and avoid loose, flowing pieces that might be troublesome.",
        WeatherCondition::Foggy | WeatherCondition::Other => {
            "Check the weather conditions before heading out."
        }
    }
}
