//! Pricing list route handlers

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};

use crate::error::{AppError, Result};
use crate::pricing::requests::{OverrideForm, PricingListQuery};
use crate::pricing::{format_dinars, CustomerTier, PeriodBucket};
use crate::AppState;

/// One editable price cell.
struct PriceCell {
    tier_slug: &'static str,
    /// Raw numeric text for the edit input; empty when the price is unknown.
    input_value: String,
    display: String,
    overridden: bool,
}

struct SizeRow {
    size: String,
    cells: Vec<PriceCell>,
}

struct LevelTab {
    level: String,
    selected: bool,
}

struct BucketTab {
    code: &'static str,
    label: &'static str,
    selected: bool,
}

struct TierColumn {
    label: &'static str,
}

/// Pricing list template
#[derive(Template)]
#[template(path = "pricing/list.html")]
struct PricingListTemplate {
    levels: Vec<LevelTab>,
    buckets: Vec<BucketTab>,
    tiers: Vec<TierColumn>,
    rows: Vec<SizeRow>,
    has_rows: bool,
    selected_level: String,
    selected_bucket_code: &'static str,
}

/// Pricing list page: one level at a time, tiers as columns, sizes as rows,
/// every cell editable in place.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PricingListQuery>,
) -> Result<Html<String>> {
    let table = state.engine.table();
    let levels = table.levels();
    let selected_level = query
        .level
        .clone()
        .filter(|l| levels.contains(l))
        .or_else(|| levels.first().cloned())
        .unwrap_or_default();
    let bucket = query.bucket();

    let rows: Vec<SizeRow> = table
        .sizes_for_level(&selected_level)
        .into_iter()
        .map(|size| {
            let cells = CustomerTier::ALL
                .into_iter()
                .map(|tier| {
                    let price = state.engine.resolve(&selected_level, &size, tier, bucket);
                    PriceCell {
                        tier_slug: tier.slug(),
                        input_value: price.map(|p| p.normalize().to_string()).unwrap_or_default(),
                        display: format_dinars(price),
                        overridden: state.engine.has_override(&selected_level, &size, tier, bucket),
                    }
                })
                .collect();
            SizeRow { size, cells }
        })
        .collect();

    let template = PricingListTemplate {
        levels: levels
            .iter()
            .map(|level| LevelTab {
                selected: *level == selected_level,
                level: level.clone(),
            })
            .collect(),
        buckets: PeriodBucket::SELECTABLE
            .into_iter()
            .map(|b| BucketTab {
                code: b.code(),
                label: b.label(),
                selected: b == bucket,
            })
            .collect(),
        tiers: CustomerTier::ALL
            .into_iter()
            .map(|t| TierColumn { label: t.label() })
            .collect(),
        has_rows: !rows.is_empty(),
        rows,
        selected_level,
        selected_bucket_code: bucket.code(),
    };

    Ok(Html(template.render()?))
}

/// Store or clear one override cell, then land back on the same view.
pub async fn set_override(
    State(state): State<AppState>,
    Form(form): Form<OverrideForm>,
) -> Result<Redirect> {
    let tier = form
        .tier()
        .ok_or_else(|| AppError::Internal(format!("unknown customer tier: {}", form.tier)))?;
    let bucket = form
        .bucket()
        .ok_or_else(|| AppError::Internal(format!("unknown period bucket: {}", form.bucket)))?;

    let value = form.parsed_value();
    state
        .engine
        .set_override(&form.level, &form.size, tier, bucket, value)?;

    tracing::info!(
        level = %form.level,
        size = %form.size,
        tier = %form.tier,
        bucket = %form.bucket,
        cleared = value.is_none(),
        "price override updated"
    );

    Ok(Redirect::to(&format!(
        "/pricing?level={}&bucket={}",
        form.level, form.bucket
    )))
}
