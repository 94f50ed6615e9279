//! Listings manager — an asset owner's own carbon-credit listings.
//!
//! Each authenticated asset owner gets a workspace seeded with sample
//! listings. Deletes only affect that session's copy.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Pending,
    Sold,
    Draft,
}

impl ListingStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Sold => "sold",
            Self::Draft => "draft",
        }
    }

    #[must_use]
    pub fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "pending" => Some(Self::Pending),
            "sold" => Some(Self::Sold),
            "draft" => Some(Self::Draft),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    pub area: String,
    /// Price per ton, USD.
    pub price: u32,
    /// Tons available.
    pub available: u32,
    pub status: ListingStatus,
    pub views: u32,
    pub inquiries: u32,
    pub rating: f32,
    pub created_at: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingStats {
    pub total: usize,
    pub active: usize,
    pub total_views: u64,
    pub total_inquiries: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("listing not found: {0}")]
    NotFound(String),
    #[error("unknown listing status: {0}")]
    InvalidStatus(String),
}

/// Search and status filter. Blank or `all` disables a filter.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListingBook {
    listings: Vec<Listing>,
}

impl ListingBook {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn seeded() -> Self {
        Self { listings: seed_listings() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    #[must_use]
    pub fn all(&self) -> &[Listing] {
        &self.listings
    }

    /// Listings matching the query, in seed order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatus` if the status filter names no known status.
    pub fn filter(&self, query: &ListingQuery) -> Result<Vec<&Listing>, ListingError> {
        let status = match query.status.as_deref().map(str::trim) {
            None | Some("" | "all") => None,
            Some(raw) => Some(ListingStatus::from_str(raw).ok_or_else(|| ListingError::InvalidStatus(raw.to_owned()))?),
        };
        let search = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();

        Ok(self
            .listings
            .iter()
            .filter(|l| {
                search.is_empty()
                    || l.title.to_lowercase().contains(&search)
                    || l.location.to_lowercase().contains(&search)
            })
            .filter(|l| status.is_none_or(|s| l.status == s))
            .collect())
    }

    #[must_use]
    pub fn stats(&self) -> ListingStats {
        ListingStats {
            total: self.listings.len(),
            active: self
                .listings
                .iter()
                .filter(|l| l.status == ListingStatus::Active)
                .count(),
            total_views: self.listings.iter().map(|l| u64::from(l.views)).sum(),
            total_inquiries: self.listings.iter().map(|l| u64::from(l.inquiries)).sum(),
        }
    }

    /// Remove a listing by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no listing has that id.
    pub fn delete(&mut self, id: &str) -> Result<Listing, ListingError> {
        let idx = self
            .listings
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| ListingError::NotFound(id.to_owned()))?;
        Ok(self.listings.remove(idx))
    }
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    title: &str,
    location: &str,
    area: &str,
    price: u32,
    status: ListingStatus,
    (views, inquiries): (u32, u32),
    rating: f32,
    (created_at, last_updated): (&str, &str),
) -> Listing {
    let available = area
        .split_whitespace()
        .next()
        .and_then(|n| n.replace(',', "").parse().ok())
        .unwrap_or_default();
    Listing {
        id: id.to_owned(),
        title: title.to_owned(),
        kind: "Nature-based".to_owned(),
        location: location.to_owned(),
        area: area.to_owned(),
        price,
        available,
        status,
        views,
        inquiries,
        rating,
        created_at: created_at.to_owned(),
        last_updated: last_updated.to_owned(),
    }
}

fn seed_listings() -> Vec<Listing> {
    vec![
        listing(
            "1",
            "Amazon Rainforest Conservation",
            "Brazil",
            "2,450 hectares",
            95,
            ListingStatus::Active,
            (1247, 23),
            4.9,
            ("2025-01-10", "2025-01-15"),
        ),
        listing(
            "2",
            "Mangrove Restoration Project",
            "Philippines",
            "856 hectares",
            112,
            ListingStatus::Active,
            (892, 18),
            4.8,
            ("2025-01-08", "2025-01-14"),
        ),
        listing(
            "3",
            "Urban Forest Initiative",
            "USA",
            "1,250 hectares",
            89,
            ListingStatus::Pending,
            (634, 12),
            4.6,
            ("2025-01-12", "2025-01-13"),
        ),
    ]
}

#[cfg(test)]
#[path = "listings_test.rs"]
mod tests;
