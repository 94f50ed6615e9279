//! View resolution — maps a requested path and identity to what gets rendered.

use serde::Serialize;

use super::{Identity, Role};

/// Every page surface the shell knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Landing,
    Marketplace,
    CarbonEstimator,
    Analytics,
    Support,
    Settings,
    RetailerDashboard,
    AssetOwnerDashboard,
    ManageListings,
    NotFound,
}

impl View {
    /// Canonical path for this view. `NotFound` has none.
    #[must_use]
    pub fn path(self) -> Option<&'static str> {
        match self {
            Self::Landing => Some("/"),
            Self::Marketplace => Some("/marketplace"),
            Self::CarbonEstimator => Some("/carbon-estimator"),
            Self::Analytics => Some("/analytics"),
            Self::Support => Some("/support"),
            Self::Settings => Some("/settings"),
            Self::RetailerDashboard => Some("/retailer-dashboard"),
            Self::AssetOwnerDashboard => Some("/asset-owner-dashboard"),
            Self::ManageListings => Some("/manage-listings"),
            Self::NotFound => None,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Landing => "Verified Carbon Credits, Simplified",
            Self::Marketplace => "Carbon Credit Marketplace",
            Self::CarbonEstimator => "AI Carbon Footprint Estimator",
            Self::Analytics => "Market Analytics",
            Self::Support => "Support",
            Self::Settings => "Settings",
            Self::RetailerDashboard => "Retailer Dashboard",
            Self::AssetOwnerDashboard => "Asset Owner Dashboard",
            Self::ManageListings => "Manage My Listings",
            Self::NotFound => "Page Not Found",
        }
    }

    /// Role required to render this view, if any.
    #[must_use]
    pub fn required_role(self) -> Option<Role> {
        match self {
            Self::RetailerDashboard => Some(Role::Retailer),
            Self::AssetOwnerDashboard | Self::ManageListings => Some(Role::AssetOwner),
            _ => None,
        }
    }

    fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Landing,
            "/marketplace" => Self::Marketplace,
            "/carbon-estimator" => Self::CarbonEstimator,
            "/analytics" => Self::Analytics,
            "/support" => Self::Support,
            "/settings" => Self::Settings,
            "/retailer-dashboard" => Self::RetailerDashboard,
            "/asset-owner-dashboard" => Self::AssetOwnerDashboard,
            "/manage-listings" => Self::ManageListings,
            _ => Self::NotFound,
        }
    }
}

/// Outcome of evaluating a navigation request against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "camelCase")]
pub enum ViewDecision {
    /// Render the requested view.
    Render { view: View },
    /// The requested view is gated; render the landing view instead.
    Landing { denied: View },
}

impl ViewDecision {
    /// The view that actually gets rendered.
    #[must_use]
    pub fn view(self) -> View {
        match self {
            Self::Render { view } => view,
            Self::Landing { .. } => View::Landing,
        }
    }

    #[must_use]
    pub fn is_denied(self) -> bool {
        matches!(self, Self::Landing { .. })
    }
}

/// Strip query/fragment and trailing slashes, lowercase. Empty becomes `/`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_owned();
    }
    let lowered = trimmed.to_ascii_lowercase();
    if lowered.starts_with('/') { lowered } else { format!("/{lowered}") }
}

/// Decide what to render for `path` given the caller-supplied identity.
#[must_use]
pub fn resolve_view(path: &str, identity: Option<&Identity>) -> ViewDecision {
    let requested = View::from_path(&normalize_path(path));
    match requested.required_role() {
        None => ViewDecision::Render { view: requested },
        Some(role) if identity.is_some_and(|i| i.role == role) => ViewDecision::Render { view: requested },
        Some(_) => ViewDecision::Landing { denied: requested },
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
