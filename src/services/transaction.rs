//! Transaction service
//!
//! CRUD, summaries, statistics and CSV export over `/transactions`. In
//! `Simulate` mode an unavailable backend yields simulated results instead
//! of errors.

use chrono::Utc;

use crate::api::{ApiClient, ApiResponse, Download};
use crate::config::FallbackMode;
use crate::error::{FinanzError, FinanzResult};
use crate::models::{
    simulated_stats, CategoryTotal, CreateTransactionRequest, DateRangeRequest, Page, Transaction,
    TransactionFilter, TransactionId, TransactionStats, TransactionSummary,
    UpdateTransactionRequest, UserId,
};

use super::fallback::or_simulated;
use super::mock_data;

const ENDPOINT: &str = "/transactions";

/// Filename for the server-side CSV export
pub const CSV_EXPORT_NAME: &str = "transactions.csv";

/// Service for transaction management
pub struct TransactionService<'a> {
    client: &'a ApiClient,
    fallback: FallbackMode,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(client: &'a ApiClient, fallback: FallbackMode) -> Self {
        Self { client, fallback }
    }

    /// List transactions matching the filter
    pub fn list(&self, filter: &TransactionFilter) -> FinanzResult<ApiResponse<Vec<Transaction>>> {
        or_simulated(
            self.fallback,
            "transactions.list",
            self.client.get_with_query(ENDPOINT, &filter.to_query()),
            Vec::new,
        )
    }

    pub fn get(&self, id: &str) -> FinanzResult<ApiResponse<Transaction>> {
        let result = self
            .client
            .get(&format!("{}/{}", ENDPOINT, id))
            .map_err(|e| not_found_as(e, id));
        or_simulated(self.fallback, "transactions.get", result, || {
            mock_data::mock_transaction(id)
        })
    }

    pub fn create(
        &self,
        request: &CreateTransactionRequest,
    ) -> FinanzResult<ApiResponse<Transaction>> {
        request.validate().map_err(FinanzError::Validation)?;

        or_simulated(
            self.fallback,
            "transactions.create",
            self.client.post(ENDPOINT, request),
            || simulated_transaction(request),
        )
    }

    pub fn update(
        &self,
        id: &str,
        request: &UpdateTransactionRequest,
    ) -> FinanzResult<ApiResponse<Transaction>> {
        if request.is_empty() {
            return Err(FinanzError::Validation("Nothing to update".into()));
        }
        if let Some(amount) = request.amount {
            if !amount.is_positive() {
                return Err(FinanzError::Validation(format!(
                    "Amount must be greater than zero, got {}",
                    amount
                )));
            }
        }

        let result = self
            .client
            .put(&format!("{}/{}", ENDPOINT, id), request)
            .map_err(|e| not_found_as(e, id));
        or_simulated(self.fallback, "transactions.update", result, || {
            let mut txn = mock_data::mock_transaction(id);
            txn.apply(request);
            txn
        })
    }

    pub fn delete(&self, id: &str) -> FinanzResult<ApiResponse<()>> {
        let result = self
            .client
            .delete::<serde_json::Value>(&format!("{}/{}", ENDPOINT, id))
            .map(|response| response.map(|_| ()))
            .map_err(|e| not_found_as(e, id));
        or_simulated(self.fallback, "transactions.delete", result, || ())
    }

    /// Dashboard summary
    pub fn summary(&self) -> FinanzResult<ApiResponse<TransactionSummary>> {
        or_simulated(
            self.fallback,
            "transactions.summary",
            self.client.get(&format!("{}/summary", ENDPOINT)),
            TransactionSummary::simulated,
        )
    }

    /// One page of transactions; `total` is the number returned
    pub fn page(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> FinanzResult<ApiResponse<Page<Transaction>>> {
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit".to_string(), limit.to_string()));
        }

        let result = self
            .client
            .get_with_query::<Vec<Transaction>>(ENDPOINT, &query)
            .map(|response| response.map(Page::from_vec));
        or_simulated(self.fallback, "transactions.page", result, Page::empty)
    }

    pub fn by_date_range(
        &self,
        range: &DateRangeRequest,
    ) -> FinanzResult<ApiResponse<Page<Transaction>>> {
        let result = self
            .client
            .get_with_query::<Vec<Transaction>>(
                &format!("{}/date-range", ENDPOINT),
                &range.to_query(),
            )
            .map(|response| response.map(Page::from_vec));
        or_simulated(self.fallback, "transactions.by_date_range", result, Page::empty)
    }

    pub fn stats(&self, range: &DateRangeRequest) -> FinanzResult<ApiResponse<TransactionStats>> {
        or_simulated(
            self.fallback,
            "transactions.stats",
            self.client
                .get_with_query(&format!("{}/stats", ENDPOINT), &range.to_query()),
            simulated_stats,
        )
    }

    pub fn summary_by_category(
        &self,
        range: &DateRangeRequest,
    ) -> FinanzResult<Vec<CategoryTotal>> {
        Ok(self
            .client
            .get_with_query(&format!("{}/summary/category", ENDPOINT), &range.to_query())?
            .into_data())
    }

    /// Download the server-generated CSV for a date range
    pub fn export_csv(&self, range: &DateRangeRequest) -> FinanzResult<Download> {
        self.client.download_file(
            &format!("{}/export/csv", ENDPOINT),
            &range.to_query(),
            Some(CSV_EXPORT_NAME),
        )
    }
}

/// The record a create would have produced, for simulate mode
fn simulated_transaction(request: &CreateTransactionRequest) -> Transaction {
    let now = Utc::now();
    Transaction {
        id: TransactionId::mock(),
        amount: request.amount,
        description: request
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| "Simulated transaction".to_string()),
        date: request.date,
        transaction_type: request.transaction_type,
        category_id: Some(request.category_id.clone()),
        payment_method_id: request.payment_method_id.clone(),
        currency_id: Some(request.currency_id.clone()),
        user_id: Some(UserId::from(mock_data::SIMULATED_USER_ID)),
        created_at: Some(now),
        updated_at: Some(now),
        category: None,
        payment_method: None,
        currency: None,
    }
}

fn not_found_as(error: FinanzError, id: &str) -> FinanzError {
    if error.is_not_found() {
        FinanzError::transaction_not_found(id)
    } else {
        error
    }
}
