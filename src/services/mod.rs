//! Service layer for FinanzCLI
//!
//! Services wrap the API client with validation, not-found mapping and the
//! offline fallback policy. Each borrows the shared `ApiClient`.

pub mod ai;
pub mod auth;
pub mod category;
pub mod currency;
pub mod fallback;
pub mod mock_data;
pub mod payment_method;
pub mod stats;
pub mod transaction;
pub mod user;

pub use ai::{
    AiContext, AiService, AiTransactionResponse, AudioInput, CompletionBackend, ImageInput,
    OpenAiBackend,
};
pub use auth::AuthService;
pub use category::CategoryService;
pub use currency::CurrencyService;
pub use payment_method::PaymentMethodService;
pub use stats::{DashboardStats, ExpenseSlice, Totals};
pub use transaction::TransactionService;
pub use user::UserService;
