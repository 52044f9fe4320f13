//! Payment method service
//!
//! In `Simulate` mode payment methods never touch the network: reads return
//! the mock set and writes return locally built records.

use tracing::info;

use crate::api::{ApiClient, ApiResponse};
use crate::config::FallbackMode;
use crate::error::{FinanzError, FinanzResult};
use crate::models::{
    CreatePaymentMethodRequest, PaymentMethod, PaymentMethodId, UpdatePaymentMethodRequest,
};

use super::fallback::or_mock;
use super::mock_data;

const ENDPOINT: &str = "/payment-methods";

/// Service for the `/payment-methods` endpoints
pub struct PaymentMethodService<'a> {
    client: &'a ApiClient,
    fallback: FallbackMode,
}

impl<'a> PaymentMethodService<'a> {
    pub fn new(client: &'a ApiClient, fallback: FallbackMode) -> Self {
        Self { client, fallback }
    }

    pub fn list(&self) -> FinanzResult<ApiResponse<Vec<PaymentMethod>>> {
        if self.fallback.is_simulated() {
            info!("simulate mode, listing mock payment methods");
            return Ok(ApiResponse::simulated(mock_data::payment_methods()));
        }

        or_mock(
            self.fallback,
            "payment_methods.list",
            self.client.get(ENDPOINT),
            mock_data::payment_methods,
        )
    }

    /// Get one payment method. Falls back to the mock with that ID, or the
    /// first mock.
    pub fn get(&self, id: &str) -> FinanzResult<ApiResponse<PaymentMethod>> {
        if self.fallback.is_simulated() {
            return Ok(ApiResponse::simulated(mock_data::payment_method(id)));
        }

        let result = self
            .client
            .get(&format!("{}/{}", ENDPOINT, id))
            .map_err(|e| not_found_as(e, id));
        or_mock(self.fallback, "payment_methods.get", result, || {
            mock_data::payment_method(id)
        })
    }

    pub fn find(&self, identifier: &str) -> FinanzResult<PaymentMethod> {
        self.list()?
            .data
            .into_iter()
            .find(|m| m.matches(identifier))
            .ok_or_else(|| FinanzError::payment_method_not_found(identifier))
    }

    pub fn create(
        &self,
        request: &CreatePaymentMethodRequest,
    ) -> FinanzResult<ApiResponse<PaymentMethod>> {
        if request.name.trim().is_empty() {
            return Err(FinanzError::Validation(
                "Payment method name cannot be empty".into(),
            ));
        }

        if self.fallback.is_simulated() {
            return Ok(ApiResponse::simulated(mock_data::simulated_payment_method(
                request,
            )));
        }

        self.client.post(ENDPOINT, request)
    }

    pub fn update(
        &self,
        id: &str,
        request: &UpdatePaymentMethodRequest,
    ) -> FinanzResult<ApiResponse<PaymentMethod>> {
        if self.fallback.is_simulated() {
            return Ok(ApiResponse::simulated(
                mock_data::simulated_payment_method_update(&PaymentMethodId::from(id), request),
            ));
        }

        self.client
            .put(&format!("{}/{}", ENDPOINT, id), request)
            .map_err(|e| not_found_as(e, id))
    }

    pub fn delete(&self, id: &str) -> FinanzResult<ApiResponse<()>> {
        if self.fallback.is_simulated() {
            return Ok(ApiResponse::simulated(()));
        }

        self.client
            .delete::<serde_json::Value>(&format!("{}/{}", ENDPOINT, id))
            .map(|response| response.map(|_| ()))
            .map_err(|e| not_found_as(e, id))
    }
}

fn not_found_as(error: FinanzError, id: &str) -> FinanzError {
    if error.is_not_found() {
        FinanzError::payment_method_not_found(id)
    } else {
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{logged_in_client, ScriptedTransport};
    use crate::api::Origin;
    use serde_json::json;

    #[test]
    fn test_simulate_mode_skips_network() {
        let transport = ScriptedTransport::new();
        let client = logged_in_client(&transport);
        let service = PaymentMethodService::new(&client, FallbackMode::Simulate);

        assert_eq!(service.list().unwrap().data.len(), 3);
        assert_eq!(
            service.get("33333333-3333-3333-3333-333333333334").unwrap().data.name,
            "Credit card"
        );
        let created = service
            .create(&CreatePaymentMethodRequest {
                name: "Wallet".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(created.origin, Origin::Simulated);
        assert!(created.data.id.is_mock());
        assert_eq!(service.delete("pm-1").unwrap().origin, Origin::Simulated);

        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_get_falls_back_to_first_mock() {
        let transport = ScriptedTransport::new();
        transport.push_offline();
        let client = logged_in_client(&transport);

        let response = PaymentMethodService::new(&client, FallbackMode::ReadOnly)
            .get("unknown")
            .unwrap();
        assert_eq!(response.origin, Origin::Mock);
        assert_eq!(response.data.name, "Cash");
    }

    #[test]
    fn test_get_404_is_not_masked() {
        let transport = ScriptedTransport::new();
        transport.push_status(404);
        let client = logged_in_client(&transport);

        let err = PaymentMethodService::new(&client, FallbackMode::ReadOnly)
            .get("pm-x")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_read_only_propagates_failure() {
        let transport = ScriptedTransport::new();
        transport.push_offline();
        let client = logged_in_client(&transport);

        let result = PaymentMethodService::new(&client, FallbackMode::ReadOnly).create(
            &CreatePaymentMethodRequest {
                name: "Wallet".into(),
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_update_live() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"id": "pm-1", "name": "Debit", "is_active": false}));
        let client = logged_in_client(&transport);

        let response = PaymentMethodService::new(&client, FallbackMode::ReadOnly)
            .update(
                "pm-1",
                &UpdatePaymentMethodRequest {
                    name: Some("Debit".into()),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(response.origin, Origin::Live);
        assert!(!response.data.is_active);
    }

    #[test]
    fn test_empty_name_rejected() {
        let transport = ScriptedTransport::new();
        let client = logged_in_client(&transport);
        let err = PaymentMethodService::new(&client, FallbackMode::Simulate)
            .create(&CreatePaymentMethodRequest::default())
            .unwrap_err();
        assert!(err.is_validation());
    }
}
