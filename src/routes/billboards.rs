//! Billboard inventory and booking route handlers

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;

use crate::error::Result;
use crate::models::{Billboard, BillboardStatus};
use crate::pricing::requests::QuoteQuery;
use crate::pricing::{format_dinars, grand_total, quote_lines, CustomerTier, PeriodBucket};
use crate::AppState;

/// Form body for booking mutations. Bucket and tier ride along so the
/// redirect lands back on the same summary view.
#[derive(Debug, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
}

struct BillboardCard {
    id: String,
    name: String,
    city: String,
    district: String,
    landmark: String,
    size: String,
    level: String,
    faces: String,
    status_label: &'static str,
    available: bool,
    selected: bool,
    map_url: String,
    image_url: String,
    has_image: bool,
    price_display: String,
}

struct BookingLine {
    id: String,
    name: String,
    size: String,
    district: String,
    price_display: String,
}

struct PeriodOption {
    code: &'static str,
    label: &'static str,
    selected: bool,
}

struct TierOption {
    slug: &'static str,
    label: &'static str,
    selected: bool,
}

/// Inventory page with the booking summary card
#[derive(Template)]
#[template(path = "billboards/list.html")]
struct BillboardListTemplate {
    billboards: Vec<BillboardCard>,
    has_selection: bool,
    selection_count: usize,
    booking_lines: Vec<BookingLine>,
    total_display: String,
    periods: Vec<PeriodOption>,
    tiers: Vec<TierOption>,
    bucket_code: &'static str,
    tier_slug: &'static str,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Html<String>> {
    let bucket = query.bucket();
    let tier = query.tier();
    let selection = state.selection();

    let billboards = state
        .inventory
        .all()
        .iter()
        .map(|b| card(&state, b, &selection, tier, bucket))
        .collect();

    let selected: Vec<&Billboard> = selection
        .iter()
        .filter_map(|id| state.inventory.find(id))
        .collect();
    let lines = quote_lines(&state.engine, selected.iter().copied(), tier, bucket);
    let total_display = format_dinars(Some(grand_total(&lines)));
    let booking_lines = lines
        .iter()
        .map(|line| BookingLine {
            id: line.billboard.id.clone(),
            name: line.billboard.name.clone(),
            size: line.billboard.size.clone(),
            district: line.billboard.district.clone(),
            price_display: format_dinars(line.price),
        })
        .collect();

    let template = BillboardListTemplate {
        billboards,
        has_selection: !selection.is_empty(),
        selection_count: selection.len(),
        booking_lines,
        total_display,
        periods: period_options(bucket),
        tiers: tier_options(tier),
        bucket_code: bucket.code(),
        tier_slug: tier.slug(),
    };

    Ok(Html(template.render()?))
}

pub async fn add_to_booking(
    State(state): State<AppState>,
    Form(form): Form<BookingForm>,
) -> Redirect {
    if state.inventory.find(&form.id).is_some() {
        state.select(&form.id);
        tracing::debug!(id = %form.id, "billboard added to booking");
    }
    back_to_summary(&form)
}

pub async fn remove_from_booking(
    State(state): State<AppState>,
    Form(form): Form<BookingForm>,
) -> Redirect {
    state.deselect(&form.id);
    back_to_summary(&form)
}

pub async fn clear_booking(
    State(state): State<AppState>,
    Form(form): Form<BookingForm>,
) -> Redirect {
    state.clear_selection();
    back_to_summary(&form)
}

fn back_to_summary(form: &BookingForm) -> Redirect {
    let bucket = form
        .bucket
        .as_deref()
        .and_then(PeriodBucket::from_code)
        .unwrap_or(PeriodBucket::OneMonth);
    let tier = form
        .tier
        .as_deref()
        .and_then(CustomerTier::from_slug)
        .unwrap_or(CustomerTier::Standard);
    Redirect::to(&format!("/?bucket={}&tier={}", bucket.code(), tier.slug()))
}

fn card(
    state: &AppState,
    billboard: &Billboard,
    selection: &[String],
    tier: CustomerTier,
    bucket: PeriodBucket,
) -> BillboardCard {
    let price = state
        .engine
        .resolve(&billboard.level, &billboard.size, tier, bucket);
    BillboardCard {
        id: billboard.id.clone(),
        name: billboard.name.clone(),
        city: billboard.city.clone(),
        district: billboard.district.clone(),
        landmark: billboard.landmark.clone(),
        size: billboard.size.clone(),
        level: billboard.level.clone(),
        faces: billboard.faces.clone(),
        status_label: billboard.status.label(),
        available: billboard.status == BillboardStatus::Available,
        selected: selection.iter().any(|id| id == &billboard.id),
        map_url: billboard.map_url(),
        has_image: !billboard.image_url.is_empty(),
        image_url: billboard.image_url.clone(),
        price_display: format_dinars(price),
    }
}

fn period_options(current: PeriodBucket) -> Vec<PeriodOption> {
    PeriodBucket::SELECTABLE
        .into_iter()
        .map(|b| PeriodOption {
            code: b.code(),
            label: b.label(),
            selected: b == current,
        })
        .collect()
}

fn tier_options(current: CustomerTier) -> Vec<TierOption> {
    CustomerTier::ALL
        .into_iter()
        .map(|t| TierOption {
            slug: t.slug(),
            label: t.label(),
            selected: t == current,
        })
        .collect()
}
