//! Server-rendered page shell.
//!
//! Pages are plain HTML assembled from `templates/page.html`. The header,
//! user menu and breadcrumbs come straight from the gate so the rendered
//! shell and the JSON API never disagree about what a visitor may see.

use std::fmt::Write;

use crate::gate::{
    self, AuthMode, Identity, NavItem, Role, SessionContext, View, ViewDecision, breadcrumbs, navigation_items,
    user_menu_items,
};
use crate::services::catalog::CREDITS;
use crate::services::estimator::Emissions;
use crate::services::listings::ListingBook;

const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");

/// Everything needed to render one page.
pub struct Page<'a> {
    /// Normalized request path.
    pub path: &'a str,
    pub decision: ViewDecision,
    pub context: &'a SessionContext,
    /// The visitor's listings; only consulted for the listings manager.
    pub listings: Option<&'a ListingBook>,
    /// Validation message shown inside the auth surface.
    pub auth_error: Option<&'a str>,
    /// Result of an estimator form submission.
    pub emissions: Option<&'a Emissions>,
}

/// Escape text for HTML bodies and attributes. Braces are escaped too so
/// user text can never form a template placeholder.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

#[must_use]
pub fn render_page(page: &Page<'_>) -> String {
    let view = page.decision.view();
    let identity = page.context.identity();

    PAGE_TEMPLATE
        .replace("{{VIEW}}", view_slug(view))
        .replace("{{NAV}}", &render_nav(&navigation_items(identity), page.path))
        .replace("{{ACCOUNT}}", &render_account(identity))
        .replace("{{AUTH}}", &render_auth_surface(page.context, page.auth_error))
        .replace("{{BREADCRUMBS}}", &render_breadcrumbs(view, page.path))
        .replace("{{BODY}}", &render_body(view, identity, page))
        .replace("{{TITLE}}", view.title())
}

fn view_slug(view: View) -> &'static str {
    view.path()
        .map_or("not-found", |p| if p == "/" { "landing" } else { &p[1..] })
}

fn render_nav(items: &[NavItem], current: &str) -> String {
    let mut out = String::new();
    for item in items {
        let mut class = String::from("nav-link");
        if item.highlighted {
            class.push_str(" highlighted");
        }
        if item.path == current {
            class.push_str(" active");
        }
        let _ = write!(out, r#"<a class="{class}" href="{}">{}</a>"#, item.path, item.label);
    }
    out
}

fn begin_auth_button(mode: AuthMode, role: Role, label: &str) -> String {
    let mode = match mode {
        AuthMode::Login => "login",
        AuthMode::Register => "register",
    };
    format!(
        r#"<form method="post" action="/auth/begin"><input type="hidden" name="mode" value="{mode}"><input type="hidden" name="role" value="{}"><button type="submit">{label}</button></form>"#,
        role.as_str()
    )
}

fn render_account(identity: Option<&Identity>) -> String {
    let Some(identity) = identity else {
        return format!(
            r#"<div class="sign-in"><span>Sign In</span>{}{}</div>"#,
            begin_auth_button(AuthMode::Login, Role::Retailer, "As Retailer"),
            begin_auth_button(AuthMode::Login, Role::AssetOwner, "As Asset Owner"),
        );
    };

    let mut menu = String::new();
    for item in user_menu_items(Some(identity)) {
        if item.path == "/auth/logout" {
            let _ = write!(
                menu,
                r#"<form method="post" action="/auth/logout"><button type="submit">{}</button></form>"#,
                item.label
            );
        } else {
            let _ = write!(menu, r#"<a href="{}">{}</a>"#, item.path, item.label);
        }
    }
    format!(
        r#"<div class="user-menu"><span class="user-name">{}</span><span class="user-role">{}</span>{menu}</div>"#,
        escape(&identity.name),
        identity.role.label(),
    )
}

struct AuthCopy {
    title: &'static str,
    subtitle: &'static str,
    organization_label: &'static str,
    features: [&'static str; 4],
}

fn auth_copy(mode: AuthMode, role: Role) -> AuthCopy {
    match role {
        Role::AssetOwner => AuthCopy {
            title: if mode == AuthMode::Login { "Asset Owner Portal" } else { "Join as Asset Owner" },
            subtitle: "Manage your green assets and earn from carbon credits",
            organization_label: "Property / Organization Name",
            features: [
                "List and manage your forest assets",
                "Track carbon sequestration metrics",
                "Earn revenue from verified credits",
                "Satellite monitoring and verification",
            ],
        },
        Role::Retailer => AuthCopy {
            title: if mode == AuthMode::Login { "Retailer Portal" } else { "Join as Retailer" },
            subtitle: "Track emissions and purchase carbon credits",
            organization_label: "Company Name",
            features: [
                "AI-powered carbon footprint tracking",
                "Access verified carbon credit marketplace",
                "ESG compliance reporting",
                "Supply chain emission analysis",
            ],
        },
    }
}

fn render_auth_surface(context: &SessionContext, error: Option<&str>) -> String {
    if !context.auth_open() {
        return String::new();
    }
    let intent = context.intent();
    let copy = auth_copy(intent.mode, intent.role);

    let mut fields = String::new();
    if intent.mode == AuthMode::Register {
        fields.push_str(r#"<label>Full Name <input type="text" name="name" required></label>"#);
    }
    fields.push_str(r#"<label>Email Address <input type="email" name="email" required></label>"#);
    fields.push_str(r#"<label>Password <input type="password" name="password" required></label>"#);
    if intent.mode == AuthMode::Register {
        let _ = write!(fields, r#"<label>{} <input type="text" name="organization" required></label>"#, copy.organization_label);
    }

    let features: String = copy.features.iter().map(|f| format!("<li>{f}</li>")).collect();
    let error = error
        .map(|e| format!(r#"<p class="auth-error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    let submit = if intent.mode == AuthMode::Login { "Sign In" } else { "Create Account" };

    format!(
        r#"<section class="auth-surface" data-role="{role}"><h2>{title}</h2><p>{subtitle}</p>{error}<form method="post" action="/auth/complete">{fields}<button type="submit">{submit}</button></form><form method="post" action="/auth/close"><button type="submit">Close</button></form><ul>{features}</ul></section>"#,
        role = intent.role.as_str(),
        title = copy.title,
        subtitle = copy.subtitle,
    )
}

fn render_breadcrumbs(view: View, path: &str) -> String {
    // Gated requests render the landing page; crumbs for the denied path would lie.
    if view == View::Landing || view == View::NotFound {
        return String::new();
    }
    let crumbs = breadcrumbs(path);
    if crumbs.is_empty() {
        return String::new();
    }
    let mut out = String::from(r#"<nav class="breadcrumbs">"#);
    for crumb in crumbs {
        match crumb.href {
            Some(href) => {
                let _ = write!(out, r#"<a href="{}">{}</a>"#, escape(&href), escape(&crumb.label));
            }
            None => {
                let _ = write!(out, "<span>{}</span>", escape(&crumb.label));
            }
        }
    }
    out.push_str("</nav>");
    out
}

fn render_body(view: View, identity: Option<&Identity>, page: &Page<'_>) -> String {
    match view {
        View::Landing => format!(
            r#"<p>Connect retailers who need to offset emissions with asset owners who sequester carbon.</p><div class="cta">{}{}</div>"#,
            begin_auth_button(AuthMode::Register, Role::Retailer, "Start as Retailer"),
            begin_auth_button(AuthMode::Register, Role::AssetOwner, "List Your Green Assets"),
        ),
        View::Marketplace => render_marketplace(),
        View::CarbonEstimator => render_estimator(page.emissions),
        View::Analytics => "<p>Market prices, trading volume and credit retirements across verified projects.</p>".to_owned(),
        View::Support => "<p>Browse the FAQ or contact our sustainability team for help with your account.</p>".to_owned(),
        View::Settings => "<p>Manage your profile, notification preferences and organization details.</p>".to_owned(),
        View::RetailerDashboard | View::AssetOwnerDashboard => render_dashboard(identity),
        View::ManageListings => render_listings(page.listings),
        View::NotFound => format!(r#"<p>That page does not exist. <a href="{}">Go home</a>.</p>"#, gate::dashboard_path(identity)),
    }
}

fn render_marketplace() -> String {
    let mut out = String::from(r#"<ul class="credits">"#);
    for credit in &CREDITS {
        let _ = write!(
            out,
            r#"<li><h3>{}</h3><p>{}</p><p>{} &middot; {} &middot; ${}/ton &middot; {} tons available</p><p>Sold by: {}</p></li>"#,
            credit.title, credit.description, credit.kind, credit.location, credit.price, credit.available, credit.seller
        );
    }
    out.push_str("</ul>");
    out
}

const ESTIMATOR_GROUPS: [(&str, &[(&str, &str)]); 4] = [
    (
        "Transportation",
        &[
            ("distance", "Average Distance per Trip (km)"),
            ("fuel_consumption", "Fuel Consumption (L/100km)"),
            ("trips", "Monthly Trips"),
        ],
    ),
    (
        "Energy",
        &[
            ("electricity", "Monthly Electricity (kWh)"),
            ("gas", "Natural Gas (m³)"),
            ("heating", "Heating Oil (L)"),
            ("renewable", "Renewable Energy (%)"),
        ],
    ),
    (
        "Waste",
        &[
            ("general", "General Waste (kg/month)"),
            ("recyclable", "Recyclable Waste (kg/month)"),
            ("organic", "Organic Waste (kg/month)"),
        ],
    ),
    (
        "Operations",
        &[
            ("employees", "Number of Employees"),
            ("business_travel", "Business Travel (km/month)"),
            ("facilities", "Facility Size (m²)"),
        ],
    ),
];

fn render_estimator(emissions: Option<&Emissions>) -> String {
    let mut out = String::from(
        r#"<p>Input your business data to estimate your carbon footprint.</p><form class="estimator" method="post" action="/carbon-estimator">"#,
    );
    for (group, fields) in ESTIMATOR_GROUPS {
        let _ = write!(out, "<fieldset><legend>{group}</legend>");
        for (name, label) in fields {
            let _ = write!(out, r#"<label>{label} <input type="number" step="any" name="{name}"></label>"#);
        }
        out.push_str("</fieldset>");
    }
    out.push_str(r#"<button type="submit">Calculate Emissions</button></form>"#);

    if let Some(e) = emissions {
        let _ = write!(
            out,
            r#"<dl class="emissions"><dt>Transportation</dt><dd>{:.2} t CO2</dd><dt>Energy</dt><dd>{:.2} t CO2</dd><dt>Waste</dt><dd>{:.2} t CO2</dd><dt>Operations</dt><dd>{:.2} t CO2</dd><dt>Total</dt><dd>{:.2} t CO2</dd></dl>"#,
            e.transportation, e.energy, e.waste, e.operations, e.total
        );
    }
    out
}

fn render_dashboard(identity: Option<&Identity>) -> String {
    let Some(identity) = identity else {
        return String::new();
    };
    let org = identity
        .organization
        .as_deref()
        .map(|o| format!(" ({})", escape(o)))
        .unwrap_or_default();
    format!("<p>Welcome back, {}{org}.</p>", escape(&identity.name))
}

fn render_listings(listings: Option<&ListingBook>) -> String {
    let Some(book) = listings else {
        return String::new();
    };
    let stats = book.stats();
    let mut out = format!(
        r#"<dl class="listing-stats"><dt>Total Listings</dt><dd>{}</dd><dt>Active Listings</dt><dd>{}</dd><dt>Total Views</dt><dd>{}</dd><dt>Total Inquiries</dt><dd>{}</dd></dl>"#,
        stats.total, stats.active, stats.total_views, stats.total_inquiries
    );
    if book.is_empty() {
        out.push_str(r#"<p class="empty">No listings yet.</p>"#);
        return out;
    }
    out.push_str(r#"<table class="listings"><tr><th>Title</th><th>Location</th><th>Area</th><th>Price</th><th>Status</th></tr>"#);
    for l in book.all() {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>${}</td><td>{}</td></tr>",
            escape(&l.title),
            escape(&l.location),
            escape(&l.area),
            l.price,
            l.status.as_str()
        );
    }
    out.push_str("</table>");
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
