//! Error types for the selection core
//!
//! Failures here are programming-contract violations, surfaced
//! synchronously to the immediate caller. No operation retries: every
//! public operation is a deterministic function of its inputs and the
//! current state.

/// Errors produced by selector operations
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    /// Operation attempted on a disposed selector
    #[error("selector already disposed")]
    Disposed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposed_display() {
        let err = SelectorError::Disposed;
        assert_eq!(err.to_string(), "selector already disposed");
    }
}
