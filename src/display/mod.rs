//! Display formatting for terminal output
//!
//! Formatters return `String`s; the CLI handlers print them. Every list
//! formatter has an empty-state message.

pub mod ai;
pub mod category;
pub mod currency;
pub mod format;
pub mod summary;
pub mod transaction;
pub mod user;

pub use ai::format_ai_response;
pub use category::{format_category_details, format_category_list};
pub use currency::{
    format_currency_details, format_currency_list, format_payment_method_details,
    format_payment_method_list,
};
pub use format::{
    format_currency, format_date, format_percentage, format_relative_date, origin_banner,
    truncate_text, with_banner,
};
pub use summary::{format_category_totals, format_dashboard, format_stats, format_summary};
pub use transaction::TransactionView;
pub use user::format_user;
