//! One-shot CLI commands: style a wardrobe export, or dress for a weather reading.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tracing::{info, warn};
use wardrobe_ai::config::{AppConfig, SuggestionProvider};
use wardrobe_ai::error::AppError;
use wardrobe_ai::telemetry::{self, LogSink};
use wardrobe_ai::wardrobe::rules::DEFAULT_OCCASION;
use wardrobe_ai::wardrobe::{
    build_suggester, OutfitRuleBook, OutfitSuggester, OutfitSuggestion, UserId, WardrobeService,
};
use wardrobe_ai::weather::{DressRecommendation, WeatherSnapshot};

use crate::infra::InMemoryWardrobeRepository;

/// Owner id for wardrobes loaded from a file on the command line.
const CLI_USER: UserId = UserId(1);

#[derive(Args, Debug)]
pub(crate) struct SuggestArgs {
    /// Wardrobe CSV (name,category,color,brand,size,season,tags,times_worn,favorite)
    #[arg(long)]
    pub(crate) wardrobe_csv: PathBuf,
    /// Occasion to dress for; unknown occasions use the casual rules
    #[arg(long, default_value = DEFAULT_OCCASION)]
    pub(crate) occasion: String,
    #[arg(long, default_value = "")]
    pub(crate) season: String,
    #[arg(long, default_value = "")]
    pub(crate) style: String,
    /// Seed the rule-based suggester for reproducible output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Use the local rules even when a remote provider is configured
    #[arg(long)]
    pub(crate) local: bool,
    /// Print JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct WeatherArgs {
    /// Air temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) temperature: f32,
    /// Provider wording such as "clear" or "light rain"
    #[arg(long)]
    pub(crate) condition: String,
    #[arg(long, default_value = "New York")]
    pub(crate) city: String,
    /// Apparent temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) feels_like: Option<f32>,
    #[arg(long)]
    pub(crate) humidity: Option<u8>,
    /// Wind speed in km/h
    #[arg(long)]
    pub(crate) wind_speed: Option<f32>,
    /// Optional wardrobe CSV to pick matching pieces from
    #[arg(long)]
    pub(crate) wardrobe_csv: Option<PathBuf>,
    /// Print JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct SuggestOutput<'a> {
    occasion: &'a str,
    season: &'a str,
    style: &'a str,
    suggestions: &'a [OutfitSuggestion],
}

pub(crate) async fn run_suggest(args: SuggestArgs) -> Result<(), AppError> {
    let SuggestArgs {
        wardrobe_csv,
        occasion,
        season,
        style,
        seed,
        local,
        json,
    } = args;

    let mut config = AppConfig::load()?;
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;

    if seed.is_some() {
        config.suggestions.seed = seed;
    }
    if local {
        config.suggestions.provider = SuggestionProvider::Local;
    }

    let rules = Arc::new(OutfitRuleBook::load(&config.suggestions)?);
    if !rules.is_known(&occasion) {
        warn!(%occasion, "unknown occasion, using the casual rules");
    }
    let suggester = build_suggester(&config.suggestions, rules)?;
    let service = load_wardrobe(Some(&wardrobe_csv), suggester)?;

    let suggestions = service
        .suggest_outfits(CLI_USER, &occasion, &season, &style)
        .await?;

    if json {
        let output = SuggestOutput {
            occasion: &occasion,
            season: &season,
            style: &style,
            suggestions: &suggestions,
        };
        println!("{}", to_pretty_json(&output)?);
    } else {
        print!("{}", describe_suggestions(&occasion, &suggestions));
    }

    Ok(())
}

pub(crate) fn run_weather(args: WeatherArgs) -> Result<(), AppError> {
    let WeatherArgs {
        temperature,
        condition,
        city,
        feels_like,
        humidity,
        wind_speed,
        wardrobe_csv,
        json,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;

    let rules = Arc::new(OutfitRuleBook::load(&config.suggestions)?);
    let suggester = build_suggester(&config.suggestions, rules)?;
    let service = load_wardrobe(wardrobe_csv.as_deref(), suggester)?;

    let snapshot = WeatherSnapshot {
        city,
        temperature_c: temperature,
        condition,
        humidity,
        wind_speed_kph: wind_speed,
        feels_like_c: feels_like,
    };
    let recommendation = service.weather_recommendation(CLI_USER, &snapshot)?;

    if json {
        println!("{}", to_pretty_json(&recommendation)?);
    } else {
        print!("{}", describe_recommendation(&snapshot, &recommendation));
    }

    Ok(())
}

fn load_wardrobe(
    path: Option<&Path>,
    suggester: Arc<dyn OutfitSuggester>,
) -> Result<WardrobeService<InMemoryWardrobeRepository>, AppError> {
    let service = WardrobeService::new(Arc::new(InMemoryWardrobeRepository::default()), suggester);

    if let Some(path) = path {
        let file = File::open(path)?;
        let summary = service.import_items(CLI_USER, file)?;
        info!(
            path = %path.display(),
            added = summary.added.len(),
            skipped = summary.skipped_duplicates,
            "wardrobe loaded"
        );
    }

    Ok(service)
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Io(err.into()))
}

fn describe_suggestions(occasion: &str, suggestions: &[OutfitSuggestion]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Outfit ideas for {occasion}\n"));

    if suggestions.is_empty() {
        out.push_str("- Not enough distinct pieces to build an outfit yet.\n");
        return out;
    }

    for (index, suggestion) in suggestions.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", index + 1, suggestion.name));
        out.push_str(&format!("   {}\n", suggestion.description));
        for item in &suggestion.items {
            let favorite = if item.favorite { " ★" } else { "" };
            out.push_str(&format!(
                "   - [{}] {} ({}){}\n",
                item.id, item.name, item.category, favorite
            ));
        }
        if !suggestion.style_notes.is_empty() {
            out.push_str(&format!("   Notes: {}\n", suggestion.style_notes));
        }
    }

    out
}

fn describe_recommendation(
    snapshot: &WeatherSnapshot,
    recommendation: &DressRecommendation,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}: {:.1}°C / {:.0}°F, {} ({})\n",
        recommendation.city,
        snapshot.temperature_c,
        snapshot.temperature_f(),
        snapshot.condition,
        recommendation.temperature_band.label()
    ));
    out.push_str(&format!("{}\n", recommendation.recommendation_text));
    out.push_str(&format!("Style: {}\n", recommendation.style_tips));
    out.push_str(&format!("Colors: {}\n", recommendation.color_suggestions));
    out.push_str(&format!("Fabrics: {}\n", recommendation.fabric_suggestions));

    let categories = recommendation
        .recommended_categories
        .iter()
        .map(|category| category.label())
        .collect::<Vec<_>>()
        .join(", ");
    out.push_str(&format!("Reach for: {categories}\n"));

    if !recommendation.items.is_empty() {
        out.push_str("From your wardrobe:\n");
        for item in &recommendation.items {
            out.push_str(&format!("- [{}] {} ({})\n", item.id, item.name, item.category));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use wardrobe_ai::wardrobe::RuleBasedSuggester;

    fn styled_service() -> WardrobeService<InMemoryWardrobeRepository> {
        let rules = Arc::new(OutfitRuleBook::standard());
        let service = WardrobeService::new(
            Arc::new(InMemoryWardrobeRepository::default()),
            Arc::new(RuleBasedSuggester::with_seed(rules, 3)),
        );
        let csv = "name,category,color,brand,size,season,tags,times_worn,favorite\n\
                   Polo,tops,green,,M,,,1,yes\n\
                   Shorts,bottoms,tan,,32,,,0,\n";
        service
            .import_items(CLI_USER, Cursor::new(csv))
            .expect("import");
        service
    }

    #[tokio::test]
    async fn suggestion_summary_lists_each_outfit() {
        let service = styled_service();
        let suggestions = service
            .suggest_outfits(CLI_USER, "casual", "summer", "")
            .await
            .expect("suggestions");

        let text = describe_suggestions("casual", &suggestions);

        assert!(text.starts_with("Outfit ideas for casual"));
        assert!(text.contains("1. Casual Fresh Rotation"));
        assert!(text.contains("Polo (tops) ★"));
        assert!(text.contains("Notes: Comfortable and relaxed."));
    }

    #[test]
    fn empty_suggestion_summary_says_so() {
        let text = describe_suggestions("work", &[]);
        assert!(text.contains("Not enough distinct pieces"));
    }

    #[test]
    fn weather_summary_includes_matching_pieces() {
        let service = styled_service();
        let snapshot = WeatherSnapshot {
            city: "Austin".to_string(),
            temperature_c: 33.0,
            condition: "Clear".to_string(),
            humidity: None,
            wind_speed_kph: None,
            feels_like_c: Some(37.0),
        };
        let recommendation = service
            .weather_recommendation(CLI_USER, &snapshot)
            .expect("recommendation");

        let text = describe_recommendation(&snapshot, &recommendation);

        assert!(text.starts_with("Austin: 33.0°C / 91°F, Clear (Hot (> 30°C))"));
        assert!(text.contains("It feels like 37.0°C"));
        assert!(text.contains("Shorts (bottoms)"));
    }

    #[test]
    fn loading_without_a_file_gives_an_empty_wardrobe() {
        let rules = Arc::new(OutfitRuleBook::standard());
        let service = load_wardrobe(None, Arc::new(RuleBasedSuggester::new(rules))).expect("load");

        let dashboard = service.dashboard(CLI_USER).expect("dashboard");
        assert_eq!(dashboard.total_items, 0);
    }
}
