use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Closed set of book categories. Unknown values are rejected at JSON
/// deserialization, before anything touches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Category {
    #[serde(rename = "Exam Prep")]
    #[sqlx(rename = "Exam Prep")]
    ExamPrep,
    #[serde(rename = "School Textbooks")]
    #[sqlx(rename = "School Textbooks")]
    SchoolTextbooks,
    #[serde(rename = "Novels/Fiction")]
    #[sqlx(rename = "Novels/Fiction")]
    NovelsFiction,
    #[serde(rename = "Reference")]
    #[sqlx(rename = "Reference")]
    Reference,
    #[serde(rename = "Other")]
    #[sqlx(rename = "Other")]
    Other,
}

/// Physical condition of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Condition {
    #[serde(rename = "Like New")]
    #[sqlx(rename = "Like New")]
    LikeNew,
    #[serde(rename = "Good")]
    #[sqlx(rename = "Good")]
    Good,
    #[serde(rename = "Fair")]
    #[sqlx(rename = "Fair")]
    Fair,
    #[serde(rename = "Readable")]
    #[sqlx(rename = "Readable")]
    Readable,
}

/// Listing lifecycle. Both transition directions are allowed, and only the
/// owner may trigger them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ListingStatus {
    Available,
    Sold,
}

/// Listing row. `user_id` is assigned at creation and never updated.
#[derive(Debug, Clone, FromRow)]
pub struct Listing {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub author: String,
    pub category: Category,
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
    pub created_at: OffsetDateTime,
}

/// Listing joined with the owner's public profile columns.
#[derive(Debug, FromRow)]
pub struct ListingWithSeller {
    #[sqlx(flatten)]
    pub listing: Listing,
    pub seller_name: String,
    pub seller_email: String,
    pub seller_avatar: String,
    pub seller_city: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serde_uses_display_names() {
        let c: Category = serde_json::from_str(r#""Novels/Fiction""#).unwrap();
        assert_eq!(c, Category::NovelsFiction);
        assert_eq!(
            serde_json::to_string(&Category::ExamPrep).unwrap(),
            r#""Exam Prep""#
        );
    }

    #[test]
    fn category_rejects_unknown_values() {
        assert!(serde_json::from_str::<Category>(r#""Comics""#).is_err());
    }

    #[test]
    fn condition_rejects_unknown_values() {
        assert!(serde_json::from_str::<Condition>(r#""Mint""#).is_err());
        let c: Condition = serde_json::from_str(r#""Like New""#).unwrap();
        assert_eq!(c, Condition::LikeNew);
    }

    #[test]
    fn status_serde_is_lowercase_and_closed() {
        let s: ListingStatus = serde_json::from_str(r#""sold""#).unwrap();
        assert_eq!(s, ListingStatus::Sold);
        assert_eq!(
            serde_json::to_string(&ListingStatus::Available).unwrap(),
            r#""available""#
        );
        assert!(serde_json::from_str::<ListingStatus>(r#""traded""#).is_err());
    }
}
