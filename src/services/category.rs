//! Category service
//!
//! CRUD over `/categories`. Listing falls back to the mock categories when
//! the backend is unavailable.

use crate::api::{ApiClient, ApiResponse};
use crate::config::FallbackMode;
use crate::error::{FinanzError, FinanzResult};
use crate::models::{Category, CreateCategoryRequest, UpdateCategoryRequest};

use super::fallback::or_mock;
use super::mock_data;

const ENDPOINT: &str = "/categories";

/// Service for category management
pub struct CategoryService<'a> {
    client: &'a ApiClient,
    fallback: FallbackMode,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(client: &'a ApiClient, fallback: FallbackMode) -> Self {
        Self { client, fallback }
    }

    /// List all categories
    pub fn list(&self) -> FinanzResult<ApiResponse<Vec<Category>>> {
        or_mock(
            self.fallback,
            "categories.list",
            self.client.get(ENDPOINT),
            mock_data::categories,
        )
    }

    /// Categories offered for income transactions
    pub fn income_categories(&self) -> FinanzResult<ApiResponse<Vec<Category>>> {
        let response = self.list()?;
        if response.origin.is_live() {
            Ok(response)
        } else {
            Ok(response.map(|_| mock_data::income_categories()))
        }
    }

    /// Categories offered for expense transactions
    pub fn expense_categories(&self) -> FinanzResult<ApiResponse<Vec<Category>>> {
        let response = self.list()?;
        if response.origin.is_live() {
            Ok(response)
        } else {
            Ok(response.map(|_| mock_data::expense_categories()))
        }
    }

    pub fn get(&self, id: &str) -> FinanzResult<Category> {
        self.client
            .get(&format!("{}/{}", ENDPOINT, id))
            .map(ApiResponse::into_data)
            .map_err(|e| not_found_as(e, id))
    }

    /// Find a category by ID or name
    pub fn find(&self, identifier: &str) -> FinanzResult<Category> {
        self.list()?
            .data
            .into_iter()
            .find(|c| c.matches(identifier))
            .ok_or_else(|| FinanzError::category_not_found(identifier))
    }

    pub fn create(&self, request: &CreateCategoryRequest) -> FinanzResult<Category> {
        request
            .validate()
            .map_err(|e| FinanzError::Validation(e.to_string()))?;
        Ok(self.client.post(ENDPOINT, request)?.into_data())
    }

    pub fn update(&self, id: &str, request: &UpdateCategoryRequest) -> FinanzResult<Category> {
        if request.is_empty() {
            return Err(FinanzError::Validation("Nothing to update".into()));
        }
        if let Some(name) = &request.name {
            if name.trim().is_empty() {
                return Err(FinanzError::Validation(
                    "Category name cannot be empty".into(),
                ));
            }
        }

        self.client
            .put(&format!("{}/{}", ENDPOINT, id), request)
            .map(ApiResponse::into_data)
            .map_err(|e| not_found_as(e, id))
    }

    pub fn delete(&self, id: &str) -> FinanzResult<()> {
        self.client
            .delete::<serde_json::Value>(&format!("{}/{}", ENDPOINT, id))
            .map(|_| ())
            .map_err(|e| not_found_as(e, id))
    }
}

fn not_found_as(error: FinanzError, id: &str) -> FinanzError {
    if error.is_not_found() {
        FinanzError::category_not_found(id)
    } else {
        error
    }
}
