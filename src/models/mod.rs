//! Core data models for FinanzCLI
//!
//! This module contains the records exchanged with the FinanzApp backend:
//! transactions, categories, currencies, payment methods, users and the
//! aggregate summaries built from them.

pub mod category;
pub mod currency;
pub mod ids;
pub mod money;
pub mod payment_method;
pub mod summary;
pub mod transaction;
pub mod user;

pub use category::{
    Category, CategoryValidationError, CreateCategoryRequest, UpdateCategoryRequest,
};
pub use currency::{CreateCurrencyRequest, Currency, UpdateCurrencyRequest};
pub use ids::{CategoryId, CurrencyId, PaymentMethodId, TransactionId, UserId, MOCK_ID_PREFIX};
pub use money::{Money, MoneyParseError};
pub use payment_method::{CreatePaymentMethodRequest, PaymentMethod, UpdatePaymentMethodRequest};
pub use summary::{
    simulated_stats, CategoryExpense, CategoryTotal, Page, TransactionStats, TransactionSummary,
};
pub use transaction::{
    format_wire_date, parse_wire_date, CreateTransactionRequest, DateRangeRequest, EmbeddedRef,
    Transaction, TransactionFilter, TransactionType, UpdateTransactionRequest,
};
pub use user::{
    AuthResponse, ChangePasswordRequest, LoginRequest, RefreshResponse, RegisterRequest,
    UpdateUserRequest, User,
};
