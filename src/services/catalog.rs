//! Marketplace catalog — the public list of purchasable carbon credits.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarbonCredit {
    pub id: u32,
    pub title: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub location: &'static str,
    /// Price per ton, USD.
    pub price: u32,
    /// Tons available.
    pub available: u32,
    pub rating: f32,
    pub verified: bool,
    pub seller: &'static str,
    pub description: &'static str,
}

pub static CREDITS: [CarbonCredit; 6] = [
    CarbonCredit {
        id: 1,
        title: "Amazon Rainforest Conservation",
        kind: "Nature-based",
        location: "Brazil",
        price: 95,
        available: 2450,
        rating: 4.9,
        verified: true,
        seller: "Forest Conservation Inc.",
        description: "High-quality carbon credits from protected rainforest areas with satellite monitoring.",
    },
    CarbonCredit {
        id: 2,
        title: "Renewable Energy Project",
        kind: "Technology-based",
        location: "Costa Rica",
        price: 78,
        available: 1890,
        rating: 4.7,
        verified: true,
        seller: "Green Energy Solutions",
        description: "Carbon credits generated from wind and solar energy installations.",
    },
    CarbonCredit {
        id: 3,
        title: "Mangrove Restoration",
        kind: "Nature-based",
        location: "Philippines",
        price: 112,
        available: 856,
        rating: 4.8,
        verified: true,
        seller: "Coastal Restoration Org",
        description: "Mangrove reforestation project with community involvement and biodiversity benefits.",
    },
    CarbonCredit {
        id: 4,
        title: "Urban Forest Initiative",
        kind: "Nature-based",
        location: "USA",
        price: 89,
        available: 1250,
        rating: 4.6,
        verified: true,
        seller: "City Green Projects",
        description: "Urban reforestation and tree planting in metropolitan areas.",
    },
    CarbonCredit {
        id: 5,
        title: "Soil Carbon Sequestration",
        kind: "Agriculture-based",
        location: "Canada",
        price: 67,
        available: 3240,
        rating: 4.5,
        verified: true,
        seller: "AgriCarbon Co.",
        description: "Carbon sequestration through sustainable farming practices and soil health improvement.",
    },
    CarbonCredit {
        id: 6,
        title: "Peat Bog Restoration",
        kind: "Nature-based",
        location: "Scotland",
        price: 134,
        available: 789,
        rating: 4.9,
        verified: true,
        seller: "Highland Conservation",
        description: "Peat bog restoration with exceptional carbon storage capacity and biodiversity benefits.",
    },
];

/// Marketplace filters. Blank disables a filter; `all` also disables `type`
/// and `location`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreditQuery {
    #[serde(default)]
    pub search: Option<String>,
    /// `nature`, `technology`, `agriculture`; matched against the credit type.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Exact location name.
    #[serde(default)]
    pub location: Option<String>,
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn active_filter(raw: Option<&str>) -> Option<&str> {
    non_blank(raw).filter(|v| *v != "all")
}

/// Credits matching every active filter, in catalog order.
#[must_use]
pub fn filter_credits(query: &CreditQuery) -> Vec<&'static CarbonCredit> {
    let search = non_blank(query.search.as_deref()).map(str::to_lowercase);
    let kind = active_filter(query.kind.as_deref()).map(str::to_lowercase);
    let location = active_filter(query.location.as_deref());

    CREDITS
        .iter()
        .filter(|c| {
            search.as_deref().is_none_or(|s| {
                c.title.to_lowercase().contains(s) || c.location.to_lowercase().contains(s)
            })
        })
        .filter(|c| kind.as_deref().is_none_or(|k| c.kind.to_lowercase().contains(k)))
        .filter(|c| location.is_none_or(|l| c.location == l))
        .collect()
}

/// Distinct locations in catalog order, for the location filter.
#[must_use]
pub fn locations() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for credit in &CREDITS {
        if !out.contains(&credit.location) {
            out.push(credit.location);
        }
    }
    out
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
