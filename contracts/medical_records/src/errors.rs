use soroban_sdk::{contracttype, Address, Env, String};

use crate::events;

/// Error categories used to classify failures in `ERROR` events.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Contract lifecycle: missing or repeated initialization
    Lifecycle = 1,
    /// Authorization errors: the caller lacks the required role or grant
    Authorization = 2,
    /// Not found errors: unknown patient, out-of-range index
    NotFound = 3,
    /// State conflict errors: duplicate registrations
    StateConflict = 4,
    /// Validation errors: malformed ranges, empty required fields
    Validation = 5,
    /// The ciphertext backend refused the submitted material
    External = 6,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    Low = 1,
    Medium = 2,
    High = 3,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ErrorContext {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub message: String,
    pub user: Option<Address>,
    pub resource_id: Option<String>,
    pub timestamp: u64,
    pub retryable: bool,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    PermissionDenied = 3,
    DuplicateEntry = 4,
    NotFound = 5,
    InvalidCiphertext = 6,
    InvalidArgument = 7,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Lifecycle
            }
            ContractError::PermissionDenied => ErrorCategory::Authorization,
            ContractError::NotFound => ErrorCategory::NotFound,
            ContractError::DuplicateEntry => ErrorCategory::StateConflict,
            ContractError::InvalidArgument => ErrorCategory::Validation,
            ContractError::InvalidCiphertext => ErrorCategory::External,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::NotFound
            | ContractError::InvalidArgument
            | ContractError::DuplicateEntry
            | ContractError::AlreadyInitialized => ErrorSeverity::Low,
            ContractError::PermissionDenied | ContractError::InvalidCiphertext => {
                ErrorSeverity::Medium
            }
            ContractError::NotInitialized => ErrorSeverity::High,
        }
    }

    /// Returns whether resubmitting with a fresh proof may succeed.
    pub fn retryable(&self) -> bool {
        matches!(self, ContractError::InvalidCiphertext)
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::PermissionDenied => "Caller is not authorized for this operation",
            ContractError::DuplicateEntry => "Patient is already registered",
            ContractError::NotFound => "Patient or record not found",
            ContractError::InvalidCiphertext => "Encrypted input was rejected by the verifier",
            ContractError::InvalidArgument => "Invalid input parameters provided",
        }
    }
}

/// Creates an ErrorContext from an error and optional user/resource information.
pub fn create_error_context(
    env: &Env,
    error: ContractError,
    user: Option<Address>,
    resource_id: Option<String>,
) -> ErrorContext {
    ErrorContext {
        category: error.category(),
        severity: error.severity(),
        message: String::from_str(env, error.message()),
        user,
        resource_id,
        timestamp: env.ledger().timestamp(),
        retryable: error.retryable(),
    }
}

/// Publishes an `ERROR` event for `error` and hands the error back so call
/// sites can write `return Err(errors::report(..))`.
pub fn report(env: &Env, error: ContractError, user: Option<Address>, operation: &str) -> ContractError {
    let context = create_error_context(env, error, user, Some(String::from_str(env, operation)));
    events::publish_error(env, error as u32, context);
    error
}
