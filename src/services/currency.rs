//! Currency service

use crate::api::{ApiClient, ApiResponse};
use crate::config::FallbackMode;
use crate::error::{FinanzError, FinanzResult};
use crate::models::{CreateCurrencyRequest, Currency, UpdateCurrencyRequest};

use super::fallback::or_mock;
use super::mock_data;

const ENDPOINT: &str = "/currencies";

/// Service for the `/currencies` endpoints
pub struct CurrencyService<'a> {
    client: &'a ApiClient,
    fallback: FallbackMode,
}

impl<'a> CurrencyService<'a> {
    pub fn new(client: &'a ApiClient, fallback: FallbackMode) -> Self {
        Self { client, fallback }
    }

    /// List all currencies, falling back to the mock set
    pub fn list(&self) -> FinanzResult<ApiResponse<Vec<Currency>>> {
        or_mock(
            self.fallback,
            "currencies.list",
            self.client.get(ENDPOINT),
            mock_data::currencies,
        )
    }

    pub fn get(&self, id: &str) -> FinanzResult<Currency> {
        self.client
            .get(&format!("{}/{}", ENDPOINT, id))
            .map(ApiResponse::into_data)
            .map_err(|e| not_found_as(e, id))
    }

    /// Find a currency by ID, ISO code or name
    pub fn find(&self, identifier: &str) -> FinanzResult<Currency> {
        self.list()?
            .data
            .into_iter()
            .find(|c| c.matches(identifier))
            .ok_or_else(|| FinanzError::currency_not_found(identifier))
    }

    /// The currency flagged as default, if any
    pub fn default_currency(&self) -> FinanzResult<Option<Currency>> {
        Ok(self.list()?.data.into_iter().find(|c| c.is_default))
    }

    pub fn create(&self, request: &CreateCurrencyRequest) -> FinanzResult<Currency> {
        request.validate().map_err(FinanzError::Validation)?;
        let request = CreateCurrencyRequest {
            code: request.code.trim().to_uppercase(),
            ..request.clone()
        };
        Ok(self.client.post(ENDPOINT, &request)?.into_data())
    }

    pub fn update(&self, id: &str, request: &UpdateCurrencyRequest) -> FinanzResult<Currency> {
        let check = CreateCurrencyRequest {
            code: request.code.clone(),
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            is_active: request.is_active,
        };
        check.validate().map_err(FinanzError::Validation)?;

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

    /// Make `id` the default currency
    pub fn set_default(&self, id: &str) -> FinanzResult<Currency> {
        self.client
            .patch(
                &format!("{}/{}/set-default", ENDPOINT, id),
                &serde_json::json!({}),
            )
            .map(ApiResponse::into_data)
            .map_err(|e| not_found_as(e, id))
    }
}

fn not_found_as(error: FinanzError, id: &str) -> FinanzError {
    if error.is_not_found() {
        FinanzError::currency_not_found(id)
    } else {
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{logged_in_client, ScriptedTransport};
    use crate::api::{Method, Origin};
    use serde_json::json;

    fn euro() -> serde_json::Value {
        json!({"id": "cur-2", "name": "Euro", "code": "EUR", "symbol": "€", "is_default": true})
    }

    #[test]
    fn test_list_falls_back_on_server_error() {
        let transport = ScriptedTransport::new();
        transport.push_status(503);
        let client = logged_in_client(&transport);

        let response = CurrencyService::new(&client, FallbackMode::ReadOnly)
            .list()
            .unwrap();
        assert_eq!(response.origin, Origin::Mock);
        assert_eq!(response.data[0].code, "USD");
    }

    #[test]
    fn test_find_by_code() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!([euro()]));
        let client = logged_in_client(&transport);

        let currency = CurrencyService::new(&client, FallbackMode::ReadOnly)
            .find("eur")
            .unwrap();
        assert_eq!(currency.id.as_str(), "cur-2");
    }

    #[test]
    fn test_set_default_patches_empty_body() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, euro());
        let client = logged_in_client(&transport);

        let currency = CurrencyService::new(&client, FallbackMode::ReadOnly)
            .set_default("cur-2")
            .unwrap();
        assert!(currency.is_default);

        let request = transport.request(0);
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.url, "http://api.test/currencies/cur-2/set-default");
        assert_eq!(request.json_body(), Some(&json!({})));
    }

    #[test]
    fn test_create_uppercases_code() {
        let transport = ScriptedTransport::new();
        transport.push_json(201, euro());
        let client = logged_in_client(&transport);

        CurrencyService::new(&client, FallbackMode::ReadOnly)
            .create(&CreateCurrencyRequest {
                code: "eur".into(),
                name: "Euro".into(),
                symbol: "€".into(),
                is_active: None,
            })
            .unwrap();
        assert_eq!(transport.request(0).json_body().unwrap()["code"], "EUR");
    }

    #[test]
    fn test_update_sends_full_record() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, euro());
        let client = logged_in_client(&transport);
        let current: Currency = serde_json::from_value(euro()).unwrap();

        let mut request = UpdateCurrencyRequest::from_current(&current);
        request.symbol = "EUR€".into();
        CurrencyService::new(&client, FallbackMode::ReadOnly)
            .update("cur-2", &request)
            .unwrap();

        assert_eq!(
            transport.request(0).json_body(),
            Some(&json!({"code": "EUR", "name": "Euro", "symbol": "EUR€", "is_active": true}))
        );
    }
}
