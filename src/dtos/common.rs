use serde::{Deserialize, Serialize};
use validator::Validate;

//Response wrappers
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}

#[derive(Serialize, Deserialize, Validate)]
pub struct PageQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<u32>,
}

impl PageQueryDto {
    pub fn limit_offset(&self) -> (i64, i64) {
        // A page of 0 slips past callers that skip validation; clamp
        // instead of underflowing.
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(20);
        (limit as i64, ((page - 1) * limit) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_offset_defaults() {
        let query = PageQueryDto {
            page: None,
            limit: None,
        };
        assert_eq!(query.limit_offset(), (20, 0));
    }

    #[test]
    fn test_limit_offset_pagination() {
        let query = PageQueryDto {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(query.limit_offset(), (10, 20));
    }

    #[test]
    fn test_page_zero_clamps_to_first_page() {
        let query = PageQueryDto {
            page: Some(0),
            limit: Some(10),
        };
        assert_eq!(query.limit_offset(), (10, 0));
    }
}
