use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::Category;
use crate::config::SuggestionConfig;

pub const DEFAULT_OCCASION: &str = "casual";

/// Required and optional categories plus advisory text for one occasion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitRule {
    pub occasion: String,
    pub required: Vec<Category>,
    #[serde(default)]
    pub optional: Vec<Category>,
    #[serde(default)]
    pub notes: String,
}

/// Occasion-keyed rule table, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct OutfitRuleBook {
    rules: BTreeMap<String, OutfitRule>,
    default_rule: OutfitRule,
}

impl OutfitRuleBook {
    pub fn standard() -> Self {
        let rules = standard_rules();
        let default_rule = rules[0].clone();
        Self {
            rules: rules
                .into_iter()
                .map(|rule| (rule.occasion.clone(), rule))
                .collect(),
            default_rule,
        }
    }

    /// Builds a rule book from an explicit list. The list must contain a `casual` entry,
    /// which doubles as the fallback for unknown occasions.
    pub fn from_rules(rules: Vec<OutfitRule>) -> Result<Self, RuleBookError> {
        let mut table = BTreeMap::new();
        for mut rule in rules {
            let key = normalize_occasion(&rule.occasion);
            if key.is_empty() {
                return Err(RuleBookError::BlankOccasion);
            }
            if rule.required.is_empty() && rule.optional.is_empty() {
                return Err(RuleBookError::EmptyRule(key));
            }
            rule.occasion = key.clone();
            if table.insert(key.clone(), rule).is_some() {
                return Err(RuleBookError::DuplicateOccasion(key));
            }
        }

        let default_rule = table
            .get(DEFAULT_OCCASION)
            .cloned()
            .ok_or(RuleBookError::MissingDefault)?;

        Ok(Self {
            rules: table,
            default_rule,
        })
    }

    /// Rule book for the configured rules file, or the standard table when none is set.
    pub fn load(config: &SuggestionConfig) -> Result<Self, RuleBookError> {
        match &config.rules_path {
            Some(path) => Self::from_json_path(path),
            None => Ok(Self::standard()),
        }
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, RuleBookError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RuleBookError> {
        let rules: Vec<OutfitRule> = serde_json::from_str(raw)?;
        Self::from_rules(rules)
    }

    /// Resolves the rule for an occasion, falling back to the casual rule set.
    pub fn resolve(&self, occasion: &str) -> &OutfitRule {
        self.rules
            .get(&normalize_occasion(occasion))
            .unwrap_or(&self.default_rule)
    }

    pub fn is_known(&self, occasion: &str) -> bool {
        self.rules.contains_key(&normalize_occasion(occasion))
    }

    pub fn occasions(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

impl Default for OutfitRuleBook {
    fn default() -> Self {
        Self::standard()
    }
}

fn normalize_occasion(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

#[derive(Debug, thiserror::Error)]
pub enum RuleBookError {
    #[error("failed to read outfit rules: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid outfit rules JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("outfit rules must define the 'casual' occasion")]
    MissingDefault,
    #[error("outfit rule has a blank occasion")]
    BlankOccasion,
    #[error("occasion '{0}' is defined more than once")]
    DuplicateOccasion(String),
    #[error("occasion '{0}' lists no categories")]
    EmptyRule(String),
}

// The casual rule must stay first; it is the fallback for unknown occasions.
fn standard_rules() -> Vec<OutfitRule> {
    use Category::*;

    vec![
        OutfitRule {
            occasion: "casual".to_string(),
            required: vec![Tops, Bottoms],
            optional: vec![Shoes, Outerwear, Accessories],
            notes: "Comfortable and relaxed. Mix textures and keep the palette easy.".to_string(),
        },
        OutfitRule {
            occasion: "work".to_string(),
            required: vec![Tops, Bottoms, Shoes],
            optional: vec![Outerwear, Accessories],
            notes: "Polished and professional. Neutral colors and clean lines work best."
                .to_string(),
        },
        OutfitRule {
            occasion: "formal".to_string(),
            required: vec![Formal, Shoes],
            optional: vec![Accessories, Outerwear],
            notes: "Elegant and refined. Choose well-fitted pieces and minimal accessories."
                .to_string(),
        },
        OutfitRule {
            occasion: "party".to_string(),
            required: vec![Tops, Bottoms],
            optional: vec![Shoes, Accessories, Outerwear],
            notes: "Have fun with statement pieces, bold colors, and eye-catching accessories."
                .to_string(),
        },
        OutfitRule {
            occasion: "date".to_string(),
            required: vec![Tops, Bottoms],
            optional: vec![Shoes, Accessories, Outerwear],
            notes: "Dress to feel confident. One standout piece keeps the look intentional."
                .to_string(),
        },
        OutfitRule {
            occasion: "sport".to_string(),
            required: vec![Activewear, Shoes],
            optional: vec![Outerwear, Accessories],
            notes: "Prioritize breathable fabrics and freedom of movement.".to_string(),
        },
    ]
}
