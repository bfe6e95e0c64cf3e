//! Settings: single command options with fixed applicability.
//!
//! Every concrete setting kind is a [`SettingDeclaration`] fixed at definition
//! time: its flag, the resource and stream capability it needs, its phase and
//! its scope. Only the [`SettingValue`] varies per call. A [`Setting`] reads
//! its applicability from the declaration's capability tags when it is built
//! and is immutable afterwards.

pub mod kinds;
mod value;

use serde::Serialize;
use std::fmt;

use crate::capability::{
    get_tag, CapabilityTag, Phase, ResourceKind, Scope, SettingsScope, StreamKind, TagKind, Tagged,
};
use crate::resource::Resource;
use crate::{Error, Result};

pub use value::SettingValue;

/// The fixed description of a setting kind.
///
/// Built with const methods so kinds can declare it as an associated const:
///
/// ```
/// use ffcompose_core::capability::{Phase, SettingsScope, StreamKind};
/// use ffcompose_core::setting::SettingDeclaration;
///
/// const TUNE: SettingDeclaration = SettingDeclaration::new("tune")
///     .for_stream(StreamKind::Video)
///     .in_scope(SettingsScope::Output);
///
/// assert_eq!(TUNE.phase, Phase::Pre);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingDeclaration {
    /// Flag name without the leading dash, e.g. `c:v`.
    pub flag: &'static str,
    /// Resource capability the target must have.
    pub resource: Option<ResourceKind>,
    /// Stream capability the target must have.
    pub stream: Option<StreamKind>,
    /// Position relative to the resource path token.
    pub phase: Phase,
    /// Declared scope; `None` means the setting fits either scope.
    pub scope: Option<SettingsScope>,
}

impl SettingDeclaration {
    /// A `Pre`-phase declaration with no requirements.
    pub const fn new(flag: &'static str) -> Self {
        Self {
            flag,
            resource: None,
            stream: None,
            phase: Phase::Pre,
            scope: None,
        }
    }

    /// Require a resource capability.
    pub const fn for_resource(mut self, kind: ResourceKind) -> Self {
        self.resource = Some(kind);
        self
    }

    /// Require a stream capability.
    pub const fn for_stream(mut self, kind: StreamKind) -> Self {
        self.stream = Some(kind);
        self
    }

    /// Set the phase.
    pub const fn in_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    /// Restrict to a scope.
    pub const fn in_scope(mut self, scope: SettingsScope) -> Self {
        self.scope = Some(scope);
        self
    }
}

impl Tagged for SettingDeclaration {
    fn capability_tags(&self) -> Vec<CapabilityTag> {
        let mut tags = Vec::with_capacity(4);
        if let Some(kind) = self.resource {
            tags.push(CapabilityTag::Resource(kind));
        }
        if let Some(kind) = self.stream {
            tags.push(CapabilityTag::Stream(kind));
        }
        tags.push(CapabilityTag::Phase(self.phase));
        if let Some(scope) = self.scope {
            tags.push(CapabilityTag::Scope(scope));
        }
        tags
    }
}

/// A concrete setting kind with a fixed declaration.
pub trait SettingKind {
    /// Name used to refer to the kind from configuration, e.g. `codec_video`.
    const NAME: &'static str;
    /// The kind's applicability.
    const DECLARATION: SettingDeclaration;
}

/// One configured command option.
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    flag: String,
    value: SettingValue,
    resource: Option<ResourceKind>,
    stream: Option<StreamKind>,
    phase: Phase,
    scope: Option<Scope>,
}

impl Setting {
    /// Build a setting of kind `K`.
    ///
    /// # Errors
    ///
    /// See [`Setting::from_declaration`].
    pub fn new<K: SettingKind>(value: impl Into<SettingValue>) -> Result<Self> {
        Self::from_declaration(&K::DECLARATION, value)
    }

    /// Build a setting from a declaration.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSetting`] if the flag is empty.
    /// - [`Error::InvalidScopeConfiguration`] if the declaration's scope is
    ///   [`SettingsScope::Any`].
    pub fn from_declaration(
        declaration: &SettingDeclaration,
        value: impl Into<SettingValue>,
    ) -> Result<Self> {
        let flag = declaration.flag.trim_start_matches('-');
        if flag.is_empty() {
            return Err(Error::InvalidSetting(
                "setting declared without a flag name".to_string(),
            ));
        }

        let resource = match get_tag(declaration, TagKind::Resource) {
            Some(CapabilityTag::Resource(kind)) => Some(kind),
            _ => None,
        };
        let stream = match get_tag(declaration, TagKind::Stream) {
            Some(CapabilityTag::Stream(kind)) => Some(kind),
            _ => None,
        };
        let phase = match get_tag(declaration, TagKind::Phase) {
            Some(CapabilityTag::Phase(phase)) => phase,
            _ => Phase::Pre,
        };
        let scope = match get_tag(declaration, TagKind::Scope) {
            Some(CapabilityTag::Scope(declared)) => Some(Scope::resolve(declared).map_err(|_| {
                Error::invalid_scope(format!(
                    "setting -{flag} declares scope 'any'; declare input, output, or no scope"
                ))
            })?),
            _ => None,
        };

        Ok(Self {
            flag: flag.to_string(),
            value: value.into(),
            resource,
            stream,
            phase,
            scope,
        })
    }

    /// Flag name without the leading dash.
    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// The configured value.
    pub fn value(&self) -> &SettingValue {
        &self.value
    }

    /// Required resource capability.
    pub fn resource(&self) -> Option<ResourceKind> {
        self.resource
    }

    /// Required stream capability.
    pub fn stream(&self) -> Option<StreamKind> {
        self.stream
    }

    /// Emission phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Restricted scope; `None` for scope-agnostic settings.
    pub fn scope(&self) -> Option<Scope> {
        self.scope
    }

    /// Whether the setting may live in a collection of `scope`.
    pub fn fits_scope(&self, scope: Scope) -> bool {
        self.scope.map_or(true, |own| own == scope)
    }

    /// Check the declared capabilities against a resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SettingApplicability`] naming the first unmet
    /// requirement.
    pub fn check_applicable(&self, target: &Resource) -> Result<()> {
        if let Some(kind) = self.resource {
            if !target.resource_kinds().contains(&kind) {
                return Err(Error::applicability(
                    &self.flag,
                    kind.describe(),
                    target.to_string(),
                ));
            }
        }
        if let Some(kind) = self.stream {
            if !target.stream_kinds().contains(&kind) {
                return Err(Error::applicability(
                    &self.flag,
                    kind.describe(),
                    target.to_string(),
                ));
            }
        }
        Ok(())
    }

    /// The flag token followed by the value token when the value is non-empty.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = vec![format!("-{}", self.flag)];
        if let Some(value) = self.value.format() {
            tokens.push(value);
        }
        tokens
    }
}

impl Tagged for Setting {
    fn capability_tags(&self) -> Vec<CapabilityTag> {
        let mut tags = Vec::with_capacity(4);
        if let Some(kind) = self.resource {
            tags.push(CapabilityTag::Resource(kind));
        }
        if let Some(kind) = self.stream {
            tags.push(CapabilityTag::Stream(kind));
        }
        tags.push(CapabilityTag::Phase(self.phase));
        if let Some(scope) = self.scope {
            tags.push(CapabilityTag::Scope(scope.into()));
        }
        tags
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}
