//! AI result formatting

use crate::services::ai::ContextEntry;
use crate::services::{AiContext, AiTransactionResponse};

use super::format::format_currency;

fn name_for<'a>(entries: &'a [ContextEntry], id: &'a str) -> &'a str {
    entries
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.name.as_str())
        .unwrap_or(id)
}

/// Format the parsed draft, resolving IDs against the context when given
pub fn format_ai_response(
    response: &AiTransactionResponse,
    context: Option<&AiContext>,
    symbol: &str,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", response.message));

    let Some(draft) = &response.transaction else {
        output.push_str("\nNo transaction was extracted.\n");
        return output;
    };

    let empty = AiContext::default();
    let context = context.unwrap_or(&empty);

    output.push_str("\nDraft transaction:\n");
    output.push_str(&format!("  Type:           {}\n", draft.transaction_type));
    output.push_str(&format!(
        "  Amount:         {}\n",
        format_currency(draft.amount, symbol)
    ));
    if let Some(description) = draft.description.as_deref().filter(|d| !d.is_empty()) {
        output.push_str(&format!("  Description:    {}\n", description));
    }
    output.push_str(&format!("  Date:           {}\n", draft.date.format("%Y-%m-%d %H:%M")));
    output.push_str(&format!(
        "  Category:       {}\n",
        name_for(&context.categories, draft.category_id.as_str())
    ));
    if let Some(method) = &draft.payment_method_id {
        output.push_str(&format!(
            "  Payment method: {}\n",
            name_for(&context.payment_methods, method.as_str())
        ));
    }
    output.push_str(&format!(
        "  Currency:       {}\n",
        name_for(&context.currencies, draft.currency_id.as_str())
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ai::{parse_completion, CompletionKind};
    use crate::services::mock_data;
    use serde_json::json;

    fn draft() -> AiTransactionResponse {
        let content = json!({
            "transaction": {
                "amount": 12.5,
                "description": "Lunch",
                "category_id": "55555555-5555-5555-5555-555555555501",
                "type": "EXPENSE",
                "payment_method_id": "33333333-3333-3333-3333-333333333333",
                "currency_id": "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11",
                "date": "2025-05-10T13:00:00Z"
            },
            "message": "Got it"
        });
        parse_completion(&content.to_string(), CompletionKind::Text)
    }

    #[test]
    fn test_resolves_names_from_context() {
        let context = AiContext::from_lists(
            &mock_data::categories(),
            &mock_data::payment_methods(),
            &mock_data::currencies(),
        );
        let output = format_ai_response(&draft(), Some(&context), "$");
        assert!(output.starts_with("Got it\n"));
        assert!(output.contains("Category:       Food"));
        assert!(output.contains("Payment method: Cash"));
        assert!(output.contains("Currency:       US Dollar"));
        assert!(output.contains("$ 12.50"));
    }

    #[test]
    fn test_falls_back_to_ids() {
        let output = format_ai_response(&draft(), None, "$");
        assert!(output.contains("Category:       55555555-5555-5555-5555-555555555501"));
    }

    #[test]
    fn test_message_only() {
        let response = parse_completion(r#"{"message": "Not a transaction"}"#, CompletionKind::Text);
        let output = format_ai_response(&response, None, "$");
        assert!(output.contains("No transaction was extracted."));
    }
}
