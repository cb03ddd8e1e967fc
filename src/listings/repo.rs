use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::listings::dto::{CreateListingRequest, SearchParams};
use crate::listings::repo_types::{Listing, ListingStatus, ListingWithSeller};

const LISTING_COLUMNS: &str = "id, user_id, title, author, category, exam_type, condition, \
     price, mrp, description, images, address, city, pincode, status, created_at";

const LISTING_WITH_SELLER: &str = "SELECT l.id, l.user_id, l.title, l.author, l.category, l.exam_type, l.condition, \
            l.price, l.mrp, l.description, l.images, l.address, l.city, l.pincode, \
            l.status, l.created_at, \
            u.name AS seller_name, u.email AS seller_email, \
            u.avatar AS seller_avatar, u.city AS seller_city \
     FROM listings l JOIN users u ON u.id = l.user_id";

impl Listing {
    /// Insert a listing owned by `user_id`. The owner comes from the access
    /// gate, never from the request body.
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        req: &CreateListingRequest,
    ) -> anyhow::Result<Listing> {
        let listing = sqlx::query_as::<_, Listing>(&format!(
            r#"
            INSERT INTO listings
                (user_id, title, author, category, exam_type, condition,
                 price, mrp, description, images, address, city, pincode)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {LISTING_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&req.title)
        .bind(&req.author)
        .bind(req.category)
        .bind(&req.exam_type)
        .bind(req.condition)
        .bind(req.price)
        .bind(req.mrp)
        .bind(&req.description)
        .bind(&req.images)
        .bind(&req.address)
        .bind(&req.city)
        .bind(&req.pincode)
        .fetch_one(db)
        .await?;
        Ok(listing)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Listing>> {
        let listing = sqlx::query_as::<_, Listing>(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(listing)
    }

    /// Public catalog search. Restricted to available listings; filters are
    /// AND-composed from the query parameters.
    pub async fn search(db: &PgPool, params: &SearchParams) -> anyhow::Result<Vec<ListingWithSeller>> {
        let mut qb = QueryBuilder::<Postgres>::new(LISTING_WITH_SELLER);
        qb.push(" WHERE l.status = ").push_bind(ListingStatus::Available);

        if let Some(term) = params.search_term() {
            let pattern = format!("%{}%", escape_like(term));
            qb.push(" AND (l.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR l.author ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(category) = params.category_filter() {
            qb.push(" AND l.category = ").push_bind(category.to_string());
        }
        if let Some(exam) = params.exam_filter() {
            qb.push(" AND l.exam_type = ").push_bind(exam.to_string());
        }
        if let Some(min) = params.min_price {
            qb.push(" AND l.price >= ").push_bind(min);
        }
        if let Some(max) = params.max_price {
            qb.push(" AND l.price <= ").push_bind(max);
        }

        if params.price_ascending() {
            qb.push(" ORDER BY l.price ASC");
        } else {
            qb.push(" ORDER BY l.created_at DESC");
        }

        let rows = qb
            .build_query_as::<ListingWithSeller>()
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    /// All listings owned by `user_id`, any status, newest first.
    pub async fn list_by_owner(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<ListingWithSeller>> {
        let rows = sqlx::query_as::<_, ListingWithSeller>(&format!(
            "{LISTING_WITH_SELLER} WHERE l.user_id = $1 ORDER BY l.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn set_status(db: &PgPool, id: Uuid, status: ListingStatus) -> anyhow::Result<()> {
        sqlx::query("UPDATE listings SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(db)
            .await?;
        Ok(())
    }
}

/// Escape LIKE wildcards so a search term matches as a literal substring.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
