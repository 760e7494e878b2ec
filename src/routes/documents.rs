//! Printable offer (rental contract) and invoice documents
//!
//! Both documents quote the current booking selection through the pricing
//! engine only; layout lives in the templates. Map links are rendered as QR
//! codes so they survive printing.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::{Datelike, Duration, Local, Months, NaiveDate, Utc};

use crate::error::Result;
use crate::models::Billboard;
use crate::pricing::requests::QuoteQuery;
use crate::pricing::{
    format_dinars, grand_total, quote_lines, CustomerTier, PeriodBucket, QuotedLine,
};
use crate::qr;
use crate::AppState;

const COMPANY_NAME: &str = "شركة الفارس الذهبي للدعاية والإعلان";
const COMPANY_ADDRESS: &str = "طرابلس، طريق المطار، حي الزهور";
const COMPANY_REP: &str = "جمال امحمد زحيلق (المدير العام)";
const IBAN: &str = "LY15014051021405100053401";

struct DocumentRow {
    index: usize,
    code: String,
    name: String,
    city: String,
    municipality: String,
    district: String,
    landmark: String,
    size: String,
    level: String,
    faces: String,
    status_label: &'static str,
    price_display: String,
    end_date: String,
    map_url: String,
    qr_data_uri: String,
    has_qr: bool,
    image_url: String,
    has_image: bool,
}

/// Offer (rental contract) template
#[derive(Template)]
#[template(path = "documents/offer.html")]
struct OfferTemplate {
    company_name: &'static str,
    company_address: &'static str,
    company_rep: &'static str,
    iban: &'static str,
    date_display: String,
    contract_number: String,
    period_label: &'static str,
    tier_label: &'static str,
    start_date: String,
    end_date: String,
    grand_total_display: String,
    rows: Vec<DocumentRow>,
    has_rows: bool,
}

/// Invoice template
#[derive(Template)]
#[template(path = "documents/invoice.html")]
struct InvoiceTemplate {
    date_display: String,
    period_label: &'static str,
    tier_label: &'static str,
    grand_total_display: String,
    rows: Vec<DocumentRow>,
    has_rows: bool,
}

pub async fn offer(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Html<String>> {
    let bucket = query.bucket();
    let tier = query.tier();

    let today = Local::now().date_naive();
    let end = rental_end(today, bucket);
    let lines = selected_lines(&state, tier, bucket);

    let template = OfferTemplate {
        company_name: COMPANY_NAME,
        company_address: COMPANY_ADDRESS,
        company_rep: COMPANY_REP,
        iban: IBAN,
        date_display: today.format("%Y/%m/%d").to_string(),
        contract_number: contract_number(),
        period_label: bucket.label(),
        tier_label: tier.label(),
        start_date: today.format("%Y/%m/%d").to_string(),
        end_date: end.format("%Y/%m/%d").to_string(),
        grand_total_display: format_dinars(Some(grand_total(&lines))),
        has_rows: !lines.is_empty(),
        rows: document_rows(&lines, end),
    };

    Ok(Html(template.render()?))
}

pub async fn invoice(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Html<String>> {
    let bucket = query.bucket();
    let tier = query.tier();

    let today = Local::now().date_naive();
    let end = rental_end(today, bucket);
    let lines = selected_lines(&state, tier, bucket);

    let template = InvoiceTemplate {
        date_display: today.format("%Y/%m/%d").to_string(),
        period_label: bucket.label(),
        tier_label: tier.label(),
        grand_total_display: format_dinars(Some(grand_total(&lines))),
        has_rows: !lines.is_empty(),
        rows: document_rows(&lines, end),
    };

    Ok(Html(template.render()?))
}

fn selected_lines<'a>(
    state: &'a AppState,
    tier: CustomerTier,
    bucket: PeriodBucket,
) -> Vec<QuotedLine<'a>> {
    let selected: Vec<&Billboard> = state
        .selection()
        .iter()
        .filter_map(|id| state.inventory.find(id))
        .collect();
    quote_lines(&state.engine, selected, tier, bucket)
}

fn document_rows(lines: &[QuotedLine<'_>], end: NaiveDate) -> Vec<DocumentRow> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let b = line.billboard;
            let map_url = b.map_url();
            let qr_data_uri = qr::data_uri(&map_url).unwrap_or_default();
            DocumentRow {
                index: i + 1,
                code: b.id.clone(),
                name: b.name.clone(),
                city: b.city.clone(),
                municipality: b.municipality.clone(),
                district: b.district.clone(),
                landmark: b.landmark.clone(),
                size: b.size.clone(),
                level: b.level.clone(),
                faces: b.faces.clone(),
                status_label: b.status.label(),
                price_display: format_dinars(line.price),
                end_date: end.format("%Y-%m-%d").to_string(),
                has_qr: !qr_data_uri.is_empty(),
                qr_data_uri,
                map_url,
                has_image: !b.image_url.is_empty(),
                image_url: b.image_url.clone(),
            }
        })
        .collect()
}

/// Rental end date for a bucket starting today.
fn rental_end(start: NaiveDate, bucket: PeriodBucket) -> NaiveDate {
    match bucket {
        PeriodBucket::OneDay => start + Duration::days(1),
        other => start
            .checked_add_months(Months::new(other.months()))
            .unwrap_or(start),
    }
}

/// Human-readable contract number: the year plus a short time-derived tail.
fn contract_number() -> String {
    let now = Utc::now();
    format!("{}-{:04}", now.year(), now.timestamp() % 10_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rental_end_advances_by_whole_months() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date");
        assert_eq!(
            rental_end(start, PeriodBucket::ThreeMonths),
            NaiveDate::from_ymd_opt(2026, 4, 15).expect("valid date")
        );
        assert_eq!(
            rental_end(start, PeriodBucket::FullYear),
            NaiveDate::from_ymd_opt(2027, 1, 15).expect("valid date")
        );
        assert_eq!(
            rental_end(start, PeriodBucket::OneDay),
            NaiveDate::from_ymd_opt(2026, 1, 16).expect("valid date")
        );
    }

    #[test]
    fn month_end_clamps_instead_of_overflowing() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 31).expect("valid date");
        assert_eq!(
            rental_end(start, PeriodBucket::OneMonth),
            NaiveDate::from_ymd_opt(2026, 2, 28).expect("valid date")
        );
    }
}
