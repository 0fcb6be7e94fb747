//! Bulk import of wardrobe items from a CSV export (store purchase history or a spreadsheet).

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{Category, NewWardrobeItem, Season};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read wardrobe export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid wardrobe CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

pub struct WardrobeCsvImporter;

impl WardrobeCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<NewWardrobeItem>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses rows with the header `name,category,color,brand,size,season,tags,times_worn,favorite`.
    /// Only `name` and `category` are mandatory.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<NewWardrobeItem>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut items = Vec::new();

        for (index, record) in csv_reader.deserialize::<WardrobeRow>().enumerate() {
            // Header is row 1.
            let row_number = index + 2;
            let row = record?;
            items.push(row.into_new_item(row_number)?);
        }

        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct WardrobeRow {
    name: String,
    category: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    brand: String,
    #[serde(default)]
    size: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    season: Option<String>,
    #[serde(default)]
    tags: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    times_worn: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    favorite: Option<String>,
}

impl WardrobeRow {
    fn into_new_item(self, row: usize) -> Result<NewWardrobeItem, ImportError> {
        if self.name.trim().is_empty() {
            return Err(invalid(row, "name is required".to_string()));
        }

        let category = Category::parse(&self.category)
            .ok_or_else(|| invalid(row, format!("unknown category '{}'", self.category)))?;

        let season = match self.season.as_deref() {
            Some(raw) => {
                Season::parse(raw).ok_or_else(|| invalid(row, format!("unknown season '{raw}'")))?
            }
            None => Season::AllSeason,
        };

        let times_worn = match self.times_worn.as_deref() {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| invalid(row, format!("times_worn '{raw}' is not a whole number")))?,
            None => 0,
        };

        let favorite = match self.favorite.as_deref() {
            Some(raw) => parse_flag(raw)
                .ok_or_else(|| invalid(row, format!("favorite '{raw}' is not a yes/no value")))?,
            None => false,
        };

        Ok(NewWardrobeItem {
            name: self.name,
            description: String::new(),
            category,
            color: self.color,
            brand: self.brand,
            size: self.size,
            season,
            tags: self.tags,
            times_worn,
            favorite,
        })
    }
}

fn invalid(row: usize, reason: String) -> ImportError {
    ImportError::InvalidRow { row, reason }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
