//! Error handling utilities

use tracing::error;

/// Hint printed after errors that may clear up on their own
fn retry_hint(error: &crate::error::RelibotError) -> Option<&'static str> {
    error
        .is_recoverable()
        .then_some("The backend may be temporarily unavailable; try again later.")
}

/// Handle fatal errors and exit with appropriate status code
///
/// - For `RelibotError`: shows the user message, a retry hint for transient
///   backend failures, and the full cause chain in verbose mode
/// - For other errors: shows the error message and exits with 1
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    use crate::error::RelibotError;

    error!("Fatal error: {}", error);

    let exit_code = if let Some(relibot_err) = error.downcast_ref::<RelibotError>() {
        eprintln!("{}", relibot_err.user_message());
        if let Some(hint) = retry_hint(relibot_err) {
            eprintln!("{}", hint);
        }

        if verbose >= 1 {
            eprintln!("\nContext Chain:\n{}", relibot_err.developer_message());
        }

        relibot_err.exit_code()
    } else {
        eprintln!("Error: {error}");

        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }

        1
    };

    std::process::exit(exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, RelibotError};

    #[test]
    fn test_retry_hint_only_for_transient_backend_errors() {
        let busy = RelibotError::storage_with_code(
            ErrorCode::STORAGE_TEMPORARY,
            "Backend responded with HTTP 503",
            None,
        );
        assert!(retry_hint(&busy).is_some());

        let rejected = RelibotError::storage_with_code(
            ErrorCode::STORAGE_UNAUTHORIZED,
            "Backend responded with HTTP 401",
            None,
        );
        assert!(retry_hint(&rejected).is_none());
        assert!(retry_hint(&RelibotError::other("receiver stopped")).is_none());
    }
}
