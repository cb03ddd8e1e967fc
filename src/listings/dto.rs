use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::User;
use crate::listings::repo_types::{Category, Condition, Listing, ListingStatus, ListingWithSeller};

#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    pub author: String,
    pub category: Category,
    #[serde(rename = "examType", default = "default_exam_type")]
    pub exam_type: String,
    pub condition: Condition,
    pub price: i64,
    #[serde(default)]
    pub mrp: i64,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub address: String,
    pub city: String,
    pub pincode: String,
}

fn default_exam_type() -> String {
    "General Reading".into()
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: ListingStatus,
}

/// Query parameters for GET /listings. Every filter is optional and the
/// active ones are AND-composed.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub exam: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<i64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<i64>,
    pub sort: Option<String>,
}

impl SearchParams {
    /// "All" (and the empty string) mean no filter at all.
    fn exact(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty() && *v != "All")
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|v| !v.is_empty())
    }

    pub fn category_filter(&self) -> Option<&str> {
        Self::exact(&self.category)
    }

    pub fn exam_filter(&self) -> Option<&str> {
        Self::exact(&self.exam)
    }

    pub fn price_ascending(&self) -> bool {
        self.sort.as_deref() == Some("price_low")
    }
}

/// Owner snapshot embedded in every listing response. `rating` is carried
/// for the client's benefit but never populated by this service.
#[derive(Debug, Serialize)]
pub struct Seller {
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ListingView {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub category: Category,
    #[serde(rename = "examType")]
    pub exam_type: String,
    pub condition: Condition,
    pub price: i64,
    pub mrp: i64,
    pub description: String,
    pub images: Vec<String>,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub status: ListingStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub seller: Seller,
}

impl ListingView {
    pub fn new(listing: Listing, seller: Seller) -> Self {
        Self {
            id: listing.id,
            title: listing.title,
            author: listing.author,
            category: listing.category,
            exam_type: listing.exam_type,
            condition: listing.condition,
            price: listing.price,
            mrp: listing.mrp,
            description: listing.description,
            images: listing.images,
            address: listing.address,
            city: listing.city,
            pincode: listing.pincode,
            status: listing.status,
            created_at: listing.created_at,
            seller,
        }
    }

    pub fn with_owner(listing: Listing, owner: &User) -> Self {
        Self::new(
            listing,
            Seller {
                name: owner.name.clone(),
                email: owner.email.clone(),
                avatar: owner.avatar.clone(),
                city: owner.city.clone(),
                rating: None,
            },
        )
    }
}

impl From<ListingWithSeller> for ListingView {
    fn from(row: ListingWithSeller) -> Self {
        Self::new(
            row.listing,
            Seller {
                name: row.seller_name,
                email: row.seller_email,
                avatar: row.seller_avatar,
                city: row.seller_city,
                rating: None,
            },
        )
    }
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_defaults_exam_type_mrp_and_images() {
        let req: CreateListingRequest = serde_json::from_value(json!({
            "title": "Calc I",
            "author": "Stewart",
            "category": "Exam Prep",
            "condition": "Good",
            "price": 300,
            "description": "used",
            "address": "1 Rd",
            "city": "X",
            "pincode": "100000"
        }))
        .unwrap();
        assert_eq!(req.exam_type, "General Reading");
        assert_eq!(req.mrp, 0);
        assert!(req.images.is_empty());
    }

    #[test]
    fn create_request_requires_price() {
        let err = serde_json::from_value::<CreateListingRequest>(json!({
            "title": "Calc I",
            "author": "Stewart",
            "category": "Exam Prep",
            "condition": "Good",
            "description": "used",
            "address": "1 Rd",
            "city": "X",
            "pincode": "100000"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn all_sentinel_disables_category_and_exam_filters() {
        let p = SearchParams {
            category: Some("All".into()),
            exam: Some("All".into()),
            ..Default::default()
        };
        assert!(p.category_filter().is_none());
        assert!(p.exam_filter().is_none());

        let p = SearchParams {
            category: Some("Reference".into()),
            exam: Some("JEE".into()),
            ..Default::default()
        };
        assert_eq!(p.category_filter(), Some("Reference"));
        assert_eq!(p.exam_filter(), Some("JEE"));
    }

    #[test]
    fn empty_search_term_is_ignored() {
        let p = SearchParams {
            search: Some(String::new()),
            ..Default::default()
        };
        assert!(p.search_term().is_none());
    }

    #[test]
    fn sort_defaults_to_newest_first() {
        assert!(SearchParams {
            sort: Some("price_low".into()),
            ..Default::default()
        }
        .price_ascending());
        assert!(!SearchParams {
            sort: Some("price_high".into()),
            ..Default::default()
        }
        .price_ascending());
        assert!(!SearchParams::default().price_ascending());
    }

    #[test]
    fn seller_rating_is_omitted_when_absent() {
        let json = serde_json::to_value(Seller {
            name: "Ana".into(),
            email: "a@x.com".into(),
            avatar: "".into(),
            city: "X".into(),
            rating: None,
        })
        .unwrap();
        assert!(json.get("rating").is_none());
    }

    #[test]
    fn search_params_use_camel_case_price_bounds() {
        let p: SearchParams = serde_json::from_value(json!({
            "search": "calc",
            "category": "All",
            "minPrice": 100,
            "maxPrice": 500,
            "sort": "price_low"
        }))
        .unwrap();
        assert_eq!(p.search_term(), Some("calc"));
        assert!(p.category_filter().is_none());
        assert_eq!(p.min_price, Some(100));
        assert_eq!(p.max_price, Some(500));
        assert!(p.price_ascending());
    }
}
