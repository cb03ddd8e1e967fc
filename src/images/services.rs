use bytes::Bytes;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

pub const MAX_IMAGES: usize = 5;

pub struct UploadItem {
    pub body: Bytes,
    pub content_type: String,
}

/// Store each file in the blob store and return the durable URLs in
/// submission order. Nothing here links the URLs to a listing; the client
/// passes them along when it creates one.
pub async fn store_images(
    st: &AppState,
    user_id: Uuid,
    images: Vec<UploadItem>,
) -> Result<Vec<String>, ApiError> {
    let mut urls = Vec::with_capacity(images.len());
    for img in images {
        let ext = ext_from_mime(&img.content_type).ok_or_else(|| {
            ApiError::Validation(format!("Unsupported image type: {}", img.content_type))
        })?;
        let key = format!("listings/{}/{}.{}", user_id, Uuid::new_v4(), ext);
        let url = st
            .storage
            .store(&key, img.body, &img.content_type)
            .await
            .map_err(ApiError::Upload)?;
        urls.push(url);
    }
    Ok(urls)
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn ext_from_mime_allows_only_the_closed_set() {
        assert_eq!(ext_from_mime("image/jpeg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/jpg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/png"), Some("png"));
        assert_eq!(ext_from_mime("image/webp"), Some("webp"));
        assert_eq!(ext_from_mime("image/gif"), None);
        assert_eq!(ext_from_mime("application/octet-stream"), None);
    }

    #[tokio::test]
    async fn store_images_returns_urls_in_submission_order() {
        let state = AppState::fake();
        let user_id = Uuid::new_v4();
        let urls = store_images(
            &state,
            user_id,
            vec![
                UploadItem {
                    body: Bytes::from_static(b"a"),
                    content_type: "image/png".into(),
                },
                UploadItem {
                    body: Bytes::from_static(b"b"),
                    content_type: "image/webp".into(),
                },
            ],
        )
        .await
        .unwrap();
        assert_eq!(urls.len(), 2);
        assert!(urls[0].ends_with(".png"));
        assert!(urls[1].ends_with(".webp"));
        assert!(urls[0].contains(&user_id.to_string()));
    }

    #[tokio::test]
    async fn store_images_rejects_unsupported_types() {
        let state = AppState::fake();
        let err = store_images(
            &state,
            Uuid::new_v4(),
            vec![UploadItem {
                body: Bytes::from_static(b"gif89a"),
                content_type: "image/gif".into(),
            }],
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Unsupported image type"));
    }
}
