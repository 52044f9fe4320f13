//! Static records substituted when the backend is unavailable
//!
//! The IDs are the same ones the backend seeds, and the AI prompt names
//! them as defaults, so simulated records stay consistent with real ones.

use chrono::Utc;

use crate::models::{
    Category, CategoryId, CreatePaymentMethodRequest, Currency, CurrencyId, Money, PaymentMethod,
    PaymentMethodId, Transaction, TransactionId, TransactionType, UpdatePaymentMethodRequest,
    UserId,
};

/// Category used when none can be inferred (Entertainment)
pub const DEFAULT_CATEGORY_ID: &str = "55555555-5555-5555-5555-555555555505";

/// Payment method used when none can be inferred (Cash)
pub const DEFAULT_PAYMENT_METHOD_ID: &str = "33333333-3333-3333-3333-333333333333";

/// Currency used when none can be inferred (US Dollar)
pub const DEFAULT_CURRENCY_ID: &str = "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11";

/// Owner recorded on simulated transactions
pub const SIMULATED_USER_ID: &str = "current-user";

/// Number of expense categories at the start of `categories()`
const EXPENSE_CATEGORY_COUNT: usize = 5;

const CATEGORIES: [(&str, &str, &str, &str); 8] = [
    ("55555555-5555-5555-5555-555555555501", "Food", "Food and drink", "🍔"),
    ("55555555-5555-5555-5555-555555555502", "Transport", "Getting around", "🚗"),
    ("55555555-5555-5555-5555-555555555503", "Housing", "Home and rent", "🏠"),
    ("55555555-5555-5555-5555-555555555504", "Health", "Medical and health costs", "⚕️"),
    ("55555555-5555-5555-5555-555555555505", "Entertainment", "Leisure activities", "🎮"),
    ("55555555-5555-5555-5555-555555555601", "Salary", "Income from work", "💰"),
    ("55555555-5555-5555-5555-555555555602", "Investments", "Investment returns", "📈"),
    ("55555555-5555-5555-5555-555555555603", "Gifts", "Gifts received", "🎁"),
];

const PAYMENT_METHODS: [(&str, &str, &str, &str); 3] = [
    ("33333333-3333-3333-3333-333333333333", "Cash", "Paid in physical money", "💵"),
    ("33333333-3333-3333-3333-333333333334", "Credit card", "Paid by credit card", "💳"),
    ("33333333-3333-3333-3333-333333333335", "Bank transfer", "Paid by bank transfer", "🏦"),
];

const CURRENCIES: [(&str, &str, &str, &str, bool); 3] = [
    ("a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11", "US Dollar", "USD", "$", true),
    ("a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a12", "Euro", "EUR", "€", false),
    ("a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a13", "Guatemalan Quetzal", "GTQ", "Q", false),
];

/// Icon given to simulated payment methods that don't name one
const DEFAULT_PAYMENT_ICON: &str = "💳";

/// Name given to a simulated payment-method update that doesn't set one
const UPDATED_METHOD_NAME: &str = "Updated method";

/// All mock categories: five expense categories, then three income ones
pub fn categories() -> Vec<Category> {
    let now = Utc::now();
    CATEGORIES
        .iter()
        .map(|(id, name, description, icon)| Category {
            description: description.to_string(),
            icon: icon.to_string(),
            created_at: Some(now),
            updated_at: Some(now),
            ..Category::new(*id, *name)
        })
        .collect()
}

pub fn expense_categories() -> Vec<Category> {
    categories().into_iter().take(EXPENSE_CATEGORY_COUNT).collect()
}

pub fn income_categories() -> Vec<Category> {
    categories().into_iter().skip(EXPENSE_CATEGORY_COUNT).collect()
}

pub fn payment_methods() -> Vec<PaymentMethod> {
    let now = Utc::now();
    PAYMENT_METHODS
        .iter()
        .map(|(id, name, description, icon)| PaymentMethod {
            id: PaymentMethodId::from(*id),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            is_active: true,
            user_id: None,
            created_at: Some(now),
            updated_at: Some(now),
        })
        .collect()
}

/// The mock payment method with `id`, or the first one
pub fn payment_method(id: &str) -> PaymentMethod {
    let mut methods = payment_methods();
    let index = methods.iter().position(|m| m.id.as_str() == id).unwrap_or(0);
    methods.swap_remove(index)
}

pub fn currencies() -> Vec<Currency> {
    let now = Utc::now();
    CURRENCIES
        .iter()
        .map(|(id, name, code, symbol, is_default)| Currency {
            id: CurrencyId::from(*id),
            name: name.to_string(),
            code: code.to_string(),
            symbol: symbol.to_string(),
            is_default: *is_default,
            is_active: true,
            created_at: Some(now),
            updated_at: Some(now),
        })
        .collect()
}

/// A placeholder expense of 100 in the default category, method and currency
pub fn mock_transaction(id: &str) -> Transaction {
    let now = Utc::now();
    Transaction {
        id: TransactionId::from(id),
        amount: Money::from_units_cents(100, 0),
        description: "Simulated transaction".to_string(),
        date: now,
        transaction_type: TransactionType::Expense,
        category_id: Some(CategoryId::from(CATEGORIES[0].0)),
        payment_method_id: Some(PaymentMethodId::from(DEFAULT_PAYMENT_METHOD_ID)),
        currency_id: Some(CurrencyId::from(DEFAULT_CURRENCY_ID)),
        user_id: Some(UserId::from(SIMULATED_USER_ID)),
        created_at: Some(now),
        updated_at: Some(now),
        category: None,
        payment_method: None,
        currency: None,
    }
}

/// A locally built payment method for a create that never reached the backend
pub fn simulated_payment_method(request: &CreatePaymentMethodRequest) -> PaymentMethod {
    let now = Utc::now();
    PaymentMethod {
        id: PaymentMethodId::mock(),
        name: request.name.clone(),
        description: request.description.clone().unwrap_or_default(),
        icon: request
            .icon
            .clone()
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| DEFAULT_PAYMENT_ICON.to_string()),
        is_active: true,
        user_id: None,
        created_at: Some(now),
        updated_at: Some(now),
    }
}

/// A locally built payment method for an update that never reached the backend
pub fn simulated_payment_method_update(
    id: &PaymentMethodId,
    request: &UpdatePaymentMethodRequest,
) -> PaymentMethod {
    let now = Utc::now();
    PaymentMethod {
        id: id.clone(),
        name: request
            .name
            .clone()
            .unwrap_or_else(|| UPDATED_METHOD_NAME.to_string()),
        description: request.description.clone().unwrap_or_default(),
        icon: request
            .icon
            .clone()
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| DEFAULT_PAYMENT_ICON.to_string()),
        is_active: request.is_active.unwrap_or(true),
        user_id: None,
        created_at: Some(now),
        updated_at: Some(now),
    }
}
