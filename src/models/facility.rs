use crate::models::DistanceKm;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FacilityCategory {
    Pharmacy,
    Hospital,
}

impl FacilityCategory {
    /// Capitalized form used in fallback names, e.g. "Unnamed Pharmacy"
    pub fn label(&self) -> &'static str {
        match self {
            FacilityCategory::Pharmacy => "Pharmacy",
            FacilityCategory::Hospital => "Hospital",
        }
    }

    /// OSM `amenity` tag value
    pub fn amenity(&self) -> &'static str {
        match self {
            FacilityCategory::Pharmacy => "pharmacy",
            FacilityCategory::Hospital => "hospital",
        }
    }
}

impl fmt::Display for FacilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amenity())
    }
}

/// Which facility categories a search covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    All,
    Only(FacilityCategory),
    /// A search type naming no known category; matches nothing
    Unmatched,
}

impl SearchScope {
    /// Categories in result order: pharmacies before hospitals
    pub fn categories(&self) -> Vec<FacilityCategory> {
        match self {
            SearchScope::All => vec![FacilityCategory::Pharmacy, FacilityCategory::Hospital],
            SearchScope::Only(category) => vec![*category],
            SearchScope::Unmatched => Vec::new(),
        }
    }
}

/// Case-insensitive; anything other than all/pharmacy/hospital is `Unmatched`.
impl From<&str> for SearchScope {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "all" => SearchScope::All,
            "pharmacy" => SearchScope::Only(FacilityCategory::Pharmacy),
            "hospital" => SearchScope::Only(FacilityCategory::Hospital),
            _ => SearchScope::Unmatched,
        }
    }
}

/// A nearby pharmacy or hospital, normalized from one map feature
#[derive(Debug, Clone, Serialize)]
pub struct FacilityRecord {
    #[serde(rename = "type")]
    pub category: FacilityCategory,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub hours: String,
    /// Distance from the search center, rendered as `"1.3 km"`
    pub distance: DistanceKm,
    pub latitude: f64,
    pub longitude: f64,
}
