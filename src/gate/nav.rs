//! Header navigation, user menu, and breadcrumb derivation.

use serde::Serialize;

use super::view::normalize_path;
use super::{Identity, Role};

/// One header or menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub highlighted: bool,
}

impl NavItem {
    const fn plain(label: &'static str, path: &'static str) -> Self {
        Self { label, path, highlighted: false }
    }

    const fn highlight(label: &'static str, path: &'static str) -> Self {
        Self { label, path, highlighted: true }
    }
}

const ANONYMOUS_NAV: [NavItem; 4] = [
    NavItem::plain("Marketplace", "/marketplace"),
    NavItem::plain("Carbon Estimator", "/carbon-estimator"),
    NavItem::plain("Analytics", "/analytics"),
    NavItem::plain("Support", "/support"),
];

const RETAILER_NAV: [NavItem; 5] = [
    NavItem::plain("Dashboard", "/retailer-dashboard"),
    NavItem::plain("Marketplace", "/marketplace"),
    NavItem::plain("Carbon Estimator", "/carbon-estimator"),
    NavItem::plain("Analytics", "/analytics"),
    NavItem::plain("Support", "/support"),
];

const ASSET_OWNER_NAV: [NavItem; 5] = [
    NavItem::plain("Dashboard", "/asset-owner-dashboard"),
    NavItem::highlight("Manage My Listings", "/manage-listings"),
    NavItem::plain("Marketplace", "/marketplace"),
    NavItem::plain("Analytics", "/analytics"),
    NavItem::plain("Support", "/support"),
];

/// Ordered header entries for the visitor.
#[must_use]
pub fn navigation_items(identity: Option<&Identity>) -> Vec<NavItem> {
    match identity.map(|i| i.role) {
        None => ANONYMOUS_NAV.to_vec(),
        Some(Role::Retailer) => RETAILER_NAV.to_vec(),
        Some(Role::AssetOwner) => ASSET_OWNER_NAV.to_vec(),
    }
}

/// Role dashboard, or `/` for anonymous visitors.
#[must_use]
pub fn dashboard_path(identity: Option<&Identity>) -> &'static str {
    match identity.map(|i| i.role) {
        None => "/",
        Some(Role::Retailer) => "/retailer-dashboard",
        Some(Role::AssetOwner) => "/asset-owner-dashboard",
    }
}

/// Entries of the signed-in user dropdown. Empty for anonymous visitors.
///
/// "Sign Out" is a form post in the rendered shell, so its path is the
/// logout endpoint rather than a page.
#[must_use]
pub fn user_menu_items(identity: Option<&Identity>) -> Vec<NavItem> {
    let Some(identity) = identity else {
        return Vec::new();
    };
    let mut items = vec![NavItem::plain("Dashboard", dashboard_path(Some(identity)))];
    if identity.role == Role::AssetOwner {
        items.push(NavItem::plain("Manage Listings", "/manage-listings"));
    }
    items.push(NavItem::plain("Profile Settings", "/settings"));
    items.push(NavItem::plain("Sign Out", "/auth/logout"));
    items
}

/// One breadcrumb. The last crumb carries no link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// `Home` plus one crumb per path segment. Empty when only `Home` remains.
#[must_use]
pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let path = normalize_path(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Vec::new();
    }

    let mut crumbs = vec![Breadcrumb { label: "Home".to_owned(), href: Some("/".to_owned()) }];
    let mut current = String::new();
    for (idx, segment) in segments.iter().enumerate() {
        current.push('/');
        current.push_str(segment);
        let last = idx == segments.len() - 1;
        crumbs.push(Breadcrumb { label: title_case(segment), href: (!last).then(|| current.clone()) });
    }
    crumbs
}

fn title_case(segment: &str) -> String {
    segment
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "nav_test.rs"]
mod tests;
