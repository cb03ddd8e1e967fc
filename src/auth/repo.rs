use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Account row. Deliberately not `Serialize`: responses go through
/// `UserView`, which has no password field to leak.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub preferences: String,
    pub avatar: String,
    pub created_at: OffsetDateTime,
}

/// Profile fields mutable via PUT /auth/profile. Absent fields are left
/// untouched; email and password are not reachable from this path.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
    pub preferences: Option<String>,
}

const USER_COLUMNS: &str =
    "id, name, email, password_hash, phone, address, city, pincode, preferences, avatar, created_at";

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a new account. A concurrent signup with the same email loses
    /// the race at the UNIQUE constraint and surfaces as a database error
    /// the caller maps to a duplicate-email failure.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        avatar: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, avatar)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(avatar)
        .fetch_one(db)
        .await
    }

    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        update: ProfileUpdate,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET phone       = COALESCE($2, phone),
                address     = COALESCE($3, address),
                city        = COALESCE($4, city),
                pincode     = COALESCE($5, pincode),
                preferences = COALESCE($6, preferences)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.phone)
        .bind(update.address)
        .bind(update.city)
        .bind(update.pincode)
        .bind(update.preferences)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}
