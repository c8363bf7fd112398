use std::cmp::Ordering;
use std::future::{ready, Future};

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::entities::request::{PageResponse, RequestParams, SortOrder};
use crate::domain::entities::vendor::{Vendor, VendorId, VendorStatus};
use crate::usecase::ports::fetcher::{FetchError, PageFetcher};

const VENDOR_SEED: &[(&str, &str, &str)] = &[
    ("Apex Steel Supply", "Structural Steel", "Mei Chen"),
    ("Bayside Concrete", "Concrete", "Omar Haddad"),
    ("Cobalt Electrical", "Electrical", "Priya Nair"),
    ("Delta Formwork", "Formwork", "Jonas Berg"),
    ("Evergreen Timber", "Timber", "Ana Souza"),
    ("Fulcrum Cranes", "Equipment Rental", "Liam O'Neill"),
    ("Granite Aggregates", "Aggregates", "Sara Kim"),
    ("Harbor Glazing", "Glazing", "Tomás Ruiz"),
    ("Ironclad Fasteners", "Fasteners", "Yuki Tanaka"),
    ("Junction Plumbing", "Plumbing", "Grace Okafor"),
    ("Keystone Masonry", "Masonry", "Pavel Novak"),
    ("Lumen Lighting", "Electrical", "Hana Sato"),
    ("Meridian HVAC", "HVAC", "Diego Alvarez"),
    ("Northwind Insulation", "Insulation", "Ingrid Larsen"),
    ("Orbit Surveying", "Surveying", "Kwame Mensah"),
];

const STATUS_CYCLE: [VendorStatus; 5] = [
    VendorStatus::Active,
    VendorStatus::Active,
    VendorStatus::Pending,
    VendorStatus::Active,
    VendorStatus::Suspended,
];

/// Builds the demo vendor directory. Each seed is repeated per region so the
/// directory spans several pages.
pub fn seed_vendors() -> Vec<Vendor> {
    let regions = ["North", "Central", "South"];
    let mut vendors = Vec::with_capacity(VENDOR_SEED.len() * regions.len());

    for (region_idx, region) in regions.iter().enumerate() {
        for (seed_idx, (name, category, contact)) in VENDOR_SEED.iter().enumerate() {
            let n = region_idx * VENDOR_SEED.len() + seed_idx;
            let month = (n % 12) as u32 + 1;
            let day = (n * 7 % 28) as u32 + 1;
            vendors.push(Vendor {
                id: VendorId(n as u32 + 1),
                name: format!("{name} ({region})"),
                category: (*category).to_string(),
                status: STATUS_CYCLE[n % STATUS_CYCLE.len()],
                contact: (*contact).to_string(),
                rating: 2.5 + ((n * 3) % 26) as f32 / 10.0,
                onboarded: NaiveDate::from_ymd_opt(2021 + (n % 4) as i32, month, day)
                    .unwrap_or_default(),
            });
        }
    }

    vendors
}

/// In-memory stand-in for the procurement vendor endpoint.
#[derive(Debug, Clone)]
pub struct MockVendorApi {
    vendors: Vec<Vendor>,
}

impl MockVendorApi {
    pub fn new(vendors: Vec<Vendor>) -> Self {
        Self { vendors }
    }

    pub fn seeded() -> Self {
        Self::new(seed_vendors())
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn query(&self, params: &RequestParams) -> Result<PageResponse<Vendor>, FetchError> {
        if params.page_size == 0 {
            return Err(FetchError::message("pageSize must be greater than zero"));
        }
        if params.page == 0 {
            return Err(FetchError::message("page is 1-based"));
        }

        let search = params
            .search
            .as_deref()
            .map(|text| text.trim().to_lowercase())
            .filter(|text| !text.is_empty());

        let mut matched = Vec::new();
        for vendor in &self.vendors {
            if let Some(search) = &search {
                if !matches_search(vendor, search) {
                    continue;
                }
            }
            if let Some(filters) = &params.filters {
                let mut keep = true;
                for (column, value) in filters {
                    if !matches_filter(vendor, column, value)? {
                        keep = false;
                        break;
                    }
                }
                if !keep {
                    continue;
                }
            }
            matched.push(vendor.clone());
        }

        if let Some(sort_by) = params.sort_by.as_deref() {
            let descending = params.sort_order == Some(SortOrder::Desc);
            let compare = sort_comparator(sort_by)?;
            matched.sort_by(|a, b| {
                let ordering = compare(a, b);
                let ordering = if descending { ordering.reverse() } else { ordering };
                ordering.then_with(|| a.id.0.cmp(&b.id.0))
            });
        }

        Ok(PageResponse::from_slice(&matched, params))
    }
}

impl PageFetcher<Vendor> for MockVendorApi {
    fn fetch_page(
        &self,
        params: RequestParams,
    ) -> impl Future<Output = Result<PageResponse<Vendor>, FetchError>> {
        ready(self.query(&params))
    }
}

fn matches_search(vendor: &Vendor, needle: &str) -> bool {
    [
        vendor.name.as_str(),
        vendor.category.as_str(),
        vendor.contact.as_str(),
        vendor.status.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

fn matches_filter(vendor: &Vendor, column: &str, value: &Value) -> Result<bool, FetchError> {
    let terms: Vec<String> = match value {
        Value::String(text) => vec![text.trim().to_lowercase()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|text| text.trim().to_lowercase())
            .collect(),
        Value::Null => return Ok(true),
        other => {
            return Err(FetchError::message(format!(
                "unsupported filter value for {column}: {other}"
            )))
        }
    };
    let terms: Vec<String> = terms.into_iter().filter(|term| !term.is_empty()).collect();
    if terms.is_empty() {
        return Ok(true);
    }

    let matched = match column {
        "category" => terms.iter().any(|t| vendor.category.to_lowercase() == *t),
        "status" => terms.iter().any(|t| vendor.status.as_str() == t.as_str()),
        "name" => terms.iter().any(|t| vendor.name.to_lowercase().contains(t)),
        "contact" => terms.iter().any(|t| vendor.contact.to_lowercase().contains(t)),
        other => return Err(FetchError::message(format!("unknown filter column: {other}"))),
    };
    Ok(matched)
}

type VendorComparator = fn(&Vendor, &Vendor) -> Ordering;

fn sort_comparator(column: &str) -> Result<VendorComparator, FetchError> {
    let compare: VendorComparator = match column {
        "name" => |a: &Vendor, b: &Vendor| a.name.cmp(&b.name),
        "category" => |a: &Vendor, b: &Vendor| a.category.cmp(&b.category),
        "status" => |a: &Vendor, b: &Vendor| a.status.as_str().cmp(b.status.as_str()),
        "rating" => |a: &Vendor, b: &Vendor| a.rating.total_cmp(&b.rating),
        "onboarded" => |a: &Vendor, b: &Vendor| a.onboarded.cmp(&b.onboarded),
        other => return Err(FetchError::message(format!("unknown sort column: {other}"))),
    };
    Ok(compare)
}
