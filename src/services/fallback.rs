//! Mock-data substitution when the backend is unavailable

use tracing::warn;

use crate::api::ApiResponse;
use crate::config::FallbackMode;
use crate::error::FinanzResult;

/// Replace an unavailable-backend failure with mock data, if `mode` allows
/// mock reads. Other errors propagate unchanged.
pub fn or_mock<T, F>(
    mode: FallbackMode,
    operation: &str,
    result: FinanzResult<ApiResponse<T>>,
    mock: F,
) -> FinanzResult<ApiResponse<T>>
where
    F: FnOnce() -> T,
{
    match result {
        Err(e) if mode.allows_mock_reads() && e.is_backend_unavailable() => {
            warn!(operation, error = %e, "backend unavailable, using mock data");
            Ok(ApiResponse::mock(mock()))
        }
        other => other,
    }
}

/// Replace an unavailable-backend failure with a simulated result, only in
/// `Simulate` mode
pub fn or_simulated<T, F>(
    mode: FallbackMode,
    operation: &str,
    result: FinanzResult<ApiResponse<T>>,
    simulated: F,
) -> FinanzResult<ApiResponse<T>>
where
    F: FnOnce() -> T,
{
    match result {
        Err(e) if mode.is_simulated() && e.is_backend_unavailable() => {
            warn!(operation, error = %e, "backend unavailable, simulating response");
            Ok(ApiResponse::simulated(simulated()))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Origin;
    use crate::error::FinanzError;

    fn offline() -> FinanzResult<ApiResponse<u32>> {
        Err(FinanzError::Network("refused".into()))
    }

    #[test]
    fn test_mock_in_read_only_mode() {
        let response = or_mock(FallbackMode::ReadOnly, "list", offline(), || 7).unwrap();
        assert_eq!(response.data, 7);
        assert_eq!(response.origin, Origin::Mock);
    }

    #[test]
    fn test_off_mode_propagates() {
        assert!(or_mock(FallbackMode::Off, "list", offline(), || 7).is_err());
    }

    #[test]
    fn test_auth_errors_are_never_masked() {
        let expired: FinanzResult<ApiResponse<u32>> =
            Err(FinanzError::SessionExpired("gone".into()));
        let err = or_mock(FallbackMode::Simulate, "list", expired, || 7).unwrap_err();
        assert!(err.is_auth());
    }

    #[test]
    fn test_client_errors_propagate() {
        let bad: FinanzResult<ApiResponse<u32>> = Err(FinanzError::Http {
            status: 422,
            message: "invalid".into(),
        });
        assert!(or_mock(FallbackMode::ReadOnly, "list", bad, || 7).is_err());
    }

    #[test]
    fn test_simulated_only_in_simulate_mode() {
        assert!(or_simulated(FallbackMode::ReadOnly, "create", offline(), || 1).is_err());

        let response = or_simulated(FallbackMode::Simulate, "create", offline(), || 1).unwrap();
        assert_eq!(response.origin, Origin::Simulated);
    }

    #[test]
    fn test_live_result_untouched() {
        let live = Ok(ApiResponse::live(3, 200));
        assert_eq!(
            or_mock(FallbackMode::ReadOnly, "list", live, || 7).unwrap().origin,
            Origin::Live
        );
    }
}
