//! Unified application error types for RentBoard.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Named business failures are
//! expressed as [`DomainError`] values and converted into an `AppError`
//! that keeps the original reason attached.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Authentication failed (missing or invalid token).
    Authentication,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// Input validation failed.
    Validation,
    /// The resource is in a state that does not allow the operation.
    Conflict,
    /// The caller has to pay before the operation is allowed.
    PaymentRequired,
    /// A rate limit was exceeded.
    RateLimit,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A cache error occurred.
    Cache,
    /// A blob storage error occurred.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::PaymentRequired => write!(f, "PAYMENT_REQUIRED"),
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Cache => write!(f, "CACHE"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// Named business failures raised by the advertisement engine.
///
/// Each variant maps to exactly one [`ErrorKind`] through [`DomainError::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, serde::Serialize, serde::Deserialize)]
pub enum DomainError {
    // Media
    #[error("Too many images were attached to the advertisement")]
    ImageLimitExceeded,
    #[error("At least one image is required")]
    NoImages,
    #[error("An image exceeds the allowed size")]
    OversizedImage,
    #[error("The video exceeds the allowed size")]
    OversizedVideo,
    #[error("Unsupported image format")]
    UnsupportedImageFormat,
    #[error("Unsupported video format")]
    UnsupportedVideoFormat,

    // Pricing and availability
    #[error("At least one of the price fields must be set")]
    NoPriceSet,
    #[error("Prices cannot be negative")]
    NegativePrice,
    #[error("At least one available day is required")]
    NoDays,
    #[error("A week price requires at least 7 available days")]
    InsufficientDaysForWeekRate,
    #[error("A month price requires at least 30 available days")]
    InsufficientDaysForMonthRate,
    #[error("The same day was supplied more than once")]
    DuplicateCalendarDay,
    #[error("Price ranges must be written as \"min,max\"")]
    InvalidPriceRange,

    // Lookup
    #[error("There is no category with the provided name")]
    UnknownCategory,
    #[error("There is no advertisement with the provided info")]
    AdvertisementNotFound,
    #[error("There is no category with the provided info")]
    CategoryNotFound,
    #[error("There is no category with the provided parent category name")]
    InvalidParentCategoryName,
    #[error("There is no user with the provided id")]
    UserNotFound,

    // Ownership and state
    #[error("You are not the owner of this advertisement")]
    NotOwner,
    #[error("The advertisement can only be edited after an admin comment")]
    NotEligibleForUpdate,
    #[error("The advertisement has been deleted")]
    AdvertisementDeleted,
    #[error("The comment cannot be empty")]
    EmptyComment,
    #[error("Category name field is unique")]
    DuplicateCategoryName,
    #[error("The category is the parent of other categories")]
    CategoryInUse,

    // Billing
    #[error("You have to pay the subscription fee first")]
    PaymentRequired,
    #[error("The subscription fee is already paid")]
    AlreadyPaid,

    // Rate limits
    #[error("Too many phone number requests in the last hour")]
    HourlyRateLimit,
    #[error("Too many phone number requests in the last day")]
    DailyRateLimit,

    // Blob storage
    #[error("The advertisement was saved but uploading its media failed")]
    UploadFailed,
}

impl DomainError {
    /// Returns the error category this failure belongs to.
    pub fn kind(self) -> ErrorKind {
        match self {
            Self::ImageLimitExceeded
            | Self::NoImages
            | Self::OversizedImage
            | Self::OversizedVideo
            | Self::UnsupportedImageFormat
            | Self::UnsupportedVideoFormat
            | Self::NoPriceSet
            | Self::NegativePrice
            | Self::NoDays
            | Self::InsufficientDaysForWeekRate
            | Self::InsufficientDaysForMonthRate
            | Self::DuplicateCalendarDay
            | Self::InvalidPriceRange
            | Self::EmptyComment
            | Self::AlreadyPaid => ErrorKind::Validation,
            Self::UnknownCategory
            | Self::AdvertisementNotFound
            | Self::CategoryNotFound
            | Self::InvalidParentCategoryName
            | Self::UserNotFound => ErrorKind::NotFound,
            Self::NotOwner => ErrorKind::Authorization,
            Self::NotEligibleForUpdate
            | Self::AdvertisementDeleted
            | Self::DuplicateCategoryName
            | Self::CategoryInUse => ErrorKind::Conflict,
            Self::PaymentRequired => ErrorKind::PaymentRequired,
            Self::HourlyRateLimit | Self::DailyRateLimit => ErrorKind::RateLimit,
            Self::UploadFailed => ErrorKind::Storage,
        }
    }
}

/// The unified application error used throughout RentBoard.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. When the error originates from a named
/// business rule, `reason` carries the [`DomainError`].
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// The named business failure, if any.
    pub reason: Option<DomainError>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            reason: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            reason: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create an error for a named business failure with an underlying cause.
    pub fn domain_with_source(
        reason: DomainError,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::from(reason)
        }
    }

    /// Returns `true` if this error carries the given business failure.
    pub fn is(&self, reason: DomainError) -> bool {
        self.reason == Some(reason)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a cache error.
    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cache, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl From<DomainError> for AppError {
    fn from(reason: DomainError) -> Self {
        Self {
            kind: reason.kind(),
            message: reason.to_string(),
            reason: Some(reason),
            source: None,
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            reason: self.reason,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
