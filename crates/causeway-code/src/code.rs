//! The universal error code type.
//!
//! A code is a plain value: an integer, a brief message, and an optional
//! detail payload. Codes never validate their payload; they are carried by
//! errors and interpreted by whoever receives them.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A structured error code.
///
/// Codes compare by value, message, and detail. The sentinel [`Code::NIL`]
/// marks the absence of a code and is the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    value: i32,
    message: Cow<'static, str>,
    detail: Option<Value>,
}

impl Code {
    /// No error code specified.
    pub const NIL: Code = Code::reserved(-1, "");
    /// Everything is fine.
    pub const OK: Code = Code::reserved(0, "OK");
    /// An internal error occurred.
    pub const INTERNAL_ERROR: Code = Code::reserved(50, "Internal Error");
    /// Data validation failed.
    pub const VALIDATION_FAILED: Code = Code::reserved(51, "Validation Failed");
    /// A database operation error occurred.
    pub const DB_OPERATION_ERROR: Code = Code::reserved(52, "Database Operation Error");
    /// The given parameter for the current operation is invalid.
    pub const INVALID_PARAMETER: Code = Code::reserved(53, "Invalid Parameter");
    /// A required parameter for the current operation is missing.
    pub const MISSING_PARAMETER: Code = Code::reserved(54, "Missing Parameter");
    /// The function cannot be used in this manner.
    pub const INVALID_OPERATION: Code = Code::reserved(55, "Invalid Operation");
    /// The configuration is invalid for the current operation.
    pub const INVALID_CONFIGURATION: Code = Code::reserved(56, "Invalid Configuration");
    /// A required configuration is missing for the current operation.
    pub const MISSING_CONFIGURATION: Code = Code::reserved(57, "Missing Configuration");
    /// The operation is not implemented yet.
    pub const NOT_IMPLEMENTED: Code = Code::reserved(58, "Not Implemented");
    /// The operation is not supported yet.
    pub const NOT_SUPPORTED: Code = Code::reserved(59, "Not Supported");
    /// The operation failed.
    pub const OPERATION_FAILED: Code = Code::reserved(60, "Operation Failed");
    /// Authorization is required but not provided.
    pub const NOT_AUTHORIZED: Code = Code::reserved(61, "Not Authorized");
    /// The operation was blocked for security reasons.
    pub const SECURITY_REASON: Code = Code::reserved(62, "Security Reason");
    /// The server is busy, please try again later.
    pub const SERVER_BUSY: Code = Code::reserved(63, "Server Is Busy");
    /// An unknown error occurred.
    pub const UNKNOWN: Code = Code::reserved(64, "Unknown Error");
    /// The requested resource does not exist.
    pub const NOT_FOUND: Code = Code::reserved(65, "Not Found");
    /// The request is invalid.
    pub const INVALID_REQUEST: Code = Code::reserved(66, "Invalid Request");
    /// A required package is not imported.
    pub const NECESSARY_PACKAGE_NOT_IMPORT: Code = Code::reserved(67, "Necessary Package Not Import");
    /// An internal panic occurred.
    pub const INTERNAL_PANIC: Code = Code::reserved(68, "Internal Panic");
    /// Business validation failed.
    pub const BUSINESS_VALIDATION_FAILED: Code = Code::reserved(300, "Business Validation Failed");

    const fn reserved(value: i32, message: &'static str) -> Self {
        Self {
            value,
            message: Cow::Borrowed(message),
            detail: None,
        }
    }

    /// Create a new error code.
    pub fn new(value: i32, message: impl Into<Cow<'static, str>>, detail: Option<Value>) -> Self {
        Self {
            value,
            message: message.into(),
            detail,
        }
    }

    /// Derive a new code from this one, keeping value and message but
    /// replacing the detail payload.
    pub fn with_detail(&self, detail: Value) -> Self {
        Self {
            value: self.value,
            message: self.message.clone(),
            detail: Some(detail),
        }
    }

    /// The integer value of this code.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// The brief message of this code.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The detail payload, if any.
    pub fn detail(&self) -> Option<&Value> {
        self.detail.as_ref()
    }

    /// Whether this is the [`Code::NIL`] sentinel.
    pub fn is_nil(&self) -> bool {
        *self == Code::NIL
    }
}

impl Default for Code {
    fn default() -> Self {
        Code::NIL
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(detail) = &self.detail {
            write!(f, "{}:{} {}", self.value, self.message, detail)
        } else if !self.message.is_empty() {
            write!(f, "{}:{}", self.value, self.message)
        } else {
            write!(f, "{}", self.value)
        }
    }
}
