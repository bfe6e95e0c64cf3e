//! Error types for ffcompose-core.

use std::path::PathBuf;

use crate::capability::Scope;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving resources or assembling settings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No registered container type matches the path's extension.
    #[error("cannot derive resource type from {}: no container registered for extension '{extension}'", path.display())]
    UnknownResourceType { path: PathBuf, extension: String },

    /// A setting's declared resource or stream capability does not match the
    /// resource it is validated against.
    #[error("setting -{flag} requires {requirement}, which {target} does not provide")]
    SettingApplicability {
        flag: String,
        requirement: String,
        target: String,
    },

    /// A setting or collection was combined with a collection of another scope.
    #[error("scope mismatch: expected {expected}, found {found}")]
    ScopeMismatch { expected: Scope, found: Scope },

    /// A setting, collection or template was declared without a concrete
    /// input/output scope.
    #[error("invalid scope configuration: {0}")]
    InvalidScopeConfiguration(String),

    /// A setting declaration is malformed or unknown.
    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    /// No template is known under the requested name.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

impl Error {
    /// Create an unknown resource type error.
    pub fn unknown_resource_type(path: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self::UnknownResourceType {
            path: path.into(),
            extension: extension.into(),
        }
    }

    /// Create a setting applicability error.
    pub fn applicability(
        flag: impl Into<String>,
        requirement: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::SettingApplicability {
            flag: flag.into(),
            requirement: requirement.into(),
            target: target.into(),
        }
    }

    /// Create an invalid scope configuration error.
    pub fn invalid_scope(message: impl Into<String>) -> Self {
        Self::InvalidScopeConfiguration(message.into())
    }
}
