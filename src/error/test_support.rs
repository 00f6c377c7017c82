use super::{AuthError, BenchmarkError, ConfigError, StoreError, ValidationError};

impl From<&'static str> for ValidationError {
    fn from(message: &'static str) -> Self {
        ValidationError::TestExpectation { message }
    }
}

impl From<String> for ValidationError {
    fn from(value: String) -> Self {
        ValidationError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for ConfigError {
    fn from(message: &'static str) -> Self {
        ConfigError::TestExpectation { message }
    }
}

impl From<String> for ConfigError {
    fn from(value: String) -> Self {
        ConfigError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for AuthError {
    fn from(message: &'static str) -> Self {
        AuthError::TestExpectation { message }
    }
}

impl From<String> for AuthError {
    fn from(value: String) -> Self {
        AuthError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for StoreError {
    fn from(message: &'static str) -> Self {
        StoreError::TestExpectation { message }
    }
}

impl From<String> for StoreError {
    fn from(value: String) -> Self {
        StoreError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for BenchmarkError {
    fn from(message: &'static str) -> Self {
        BenchmarkError::TestExpectation { message }
    }
}

impl From<String> for BenchmarkError {
    fn from(value: String) -> Self {
        BenchmarkError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}
