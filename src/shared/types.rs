use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope shared by every JSON endpoint.
///
/// Successful responses carry `data` (and `count` for collections); failed
/// responses carry `error`. Absent fields are omitted from the wire.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            count: None,
            data: None,
            error: Some(message),
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Success envelope for collections, with `count` set to the item count
    pub fn collection(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            data: Some(items),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_sets_count() {
        let body = serde_json::to_value(ApiResponse::collection(vec![1, 2, 3])).unwrap();
        assert_eq!(body, json!({ "success": true, "count": 3, "data": [1, 2, 3] }));
    }

    #[test]
    fn test_single_item_omits_count_and_error() {
        let body = serde_json::to_value(ApiResponse::success("ok")).unwrap();
        assert_eq!(body, json!({ "success": true, "data": "ok" }));
    }
}
