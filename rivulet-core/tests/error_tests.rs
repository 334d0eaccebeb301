// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Result, RivuletError};

#[test]
fn test_error_display() {
    let err = RivuletError::stream_error("processing failed");
    assert_eq!(err.to_string(), "Stream processing error: processing failed");

    let err = RivuletError::configuration_error("zero workers");
    assert_eq!(err.to_string(), "Configuration error: zero workers");

    let err = RivuletError::timeout_error("5s");
    assert_eq!(err.to_string(), "Timeout error: 5s");
}

#[test]
fn test_clone_keeps_variant_and_context() {
    let errors = [
        RivuletError::stream_error("broken"),
        RivuletError::timeout_error("late"),
        RivuletError::configuration_error("zero workers"),
    ];

    for err in errors {
        assert_eq!(err.clone(), err);
    }
}

#[test]
fn test_question_mark_propagates_configuration_error() {
    fn workers(count: usize) -> Result<usize> {
        if count == 0 {
            return Err(RivuletError::configuration_error("worker count must be positive"));
        }
        Ok(count)
    }

    fn pool_size(count: usize) -> Result<usize> {
        Ok(workers(count)? * 2)
    }

    assert_eq!(pool_size(4), Ok(8));
    assert!(matches!(pool_size(0), Err(RivuletError::ConfigurationError { .. })));
}
