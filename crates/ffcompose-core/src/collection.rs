//! Scope-bound, ordered collections of settings.
//!
//! A [`SettingsCollection`] belongs to one side of the command (input or
//! output). Settings are validated when they enter the collection: their scope
//! must fit, and once the collection is bound to a [`Resource`] their resource
//! and stream requirements must be met by it. A rejected setting leaves the
//! collection untouched.
//!
//! Serialization emits every `Pre` setting in insertion order, then every
//! `Post` setting in insertion order. The resource path belongs between the
//! two groups; [`SettingsCollection::serialize_around`] places it there.

use crate::capability::{Phase, Scope, SettingsScope};
use crate::resource::Resource;
use crate::setting::Setting;
use crate::{Error, Result};

/// Ordered settings for one scope.
///
/// # Example
///
/// ```
/// use ffcompose_core::setting::kinds::{BitRateAudio, CodecVideo};
/// use ffcompose_core::SettingsCollection;
///
/// let mut output = SettingsCollection::for_output();
/// output.add(CodecVideo::new("libx264")?)?;
/// output.add(BitRateAudio::kbps(128)?)?;
///
/// assert_eq!(output.serialize(), ["-c:v", "libx264", "-b:a", "128k"]);
/// # Ok::<(), ffcompose_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SettingsCollection {
    scope: Scope,
    entries: Vec<Setting>,
    target: Option<Resource>,
}

impl SettingsCollection {
    /// An empty input collection.
    pub fn for_input() -> Self {
        Self::scoped(Scope::Input)
    }

    /// An empty output collection.
    pub fn for_output() -> Self {
        Self::scoped(Scope::Output)
    }

    /// An empty collection for a declared scope.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScopeConfiguration`] for [`SettingsScope::Any`];
    /// there is no unscoped collection.
    pub fn new(scope: SettingsScope) -> Result<Self> {
        let scope = Scope::resolve(scope).map_err(|_| {
            Error::invalid_scope("cannot create a settings collection with scope 'any'")
        })?;
        Ok(Self::scoped(scope))
    }

    fn scoped(scope: Scope) -> Self {
        Self {
            scope,
            entries: Vec::new(),
            target: None,
        }
    }

    /// The collection's scope.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// The resource entries are validated against, once bound.
    pub fn target(&self) -> Option<&Resource> {
        self.target.as_ref()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Setting> {
        self.entries.iter()
    }

    /// Whether any entry uses `flag` (with or without the leading dash).
    pub fn contains_flag(&self, flag: &str) -> bool {
        let flag = flag.trim_start_matches('-');
        self.entries.iter().any(|s| s.flag() == flag)
    }

    fn admit(&self, setting: &Setting) -> Result<()> {
        if let Some(own) = setting.scope() {
            if own != self.scope {
                return Err(Error::ScopeMismatch {
                    expected: self.scope,
                    found: own,
                });
            }
        }
        if let Some(target) = &self.target {
            setting.check_applicable(target)?;
        }
        Ok(())
    }

    /// Append a setting.
    ///
    /// # Errors
    ///
    /// - [`Error::ScopeMismatch`] if the setting is restricted to the other
    ///   scope.
    /// - [`Error::SettingApplicability`] if the collection is bound and the
    ///   resource lacks a capability the setting requires.
    pub fn add(&mut self, setting: Setting) -> Result<()> {
        if let Err(e) = self.admit(&setting) {
            tracing::debug!("Rejected -{} for {} settings: {}", setting.flag(), self.scope, e);
            return Err(e);
        }
        tracing::trace!("Added -{} to {} settings", setting.flag(), self.scope);
        self.entries.push(setting);
        Ok(())
    }

    /// Builder form of [`SettingsCollection::add`].
    pub fn with(mut self, setting: Setting) -> Result<Self> {
        self.add(setting)?;
        Ok(self)
    }

    /// Append every entry of `other`, keeping its relative order.
    ///
    /// Either all entries are appended or none are.
    ///
    /// # Errors
    ///
    /// - [`Error::ScopeMismatch`] if the collections' scopes differ.
    /// - [`Error::SettingApplicability`] if this collection is bound and any
    ///   incoming entry does not apply to its resource.
    pub fn merge(&mut self, other: &SettingsCollection) -> Result<()> {
        if other.scope != self.scope {
            return Err(Error::ScopeMismatch {
                expected: self.scope,
                found: other.scope,
            });
        }
        for setting in &other.entries {
            self.admit(setting)?;
        }
        self.entries.extend(other.entries.iter().cloned());
        Ok(())
    }

    /// Bind the collection to the resource it will be emitted for.
    ///
    /// Every existing entry is checked first; on failure the collection is
    /// left unbound and unchanged. Later additions are checked on entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SettingApplicability`] for the first entry that does
    /// not apply to `resource`.
    pub fn bind(&mut self, resource: &Resource) -> Result<()> {
        for setting in &self.entries {
            setting.check_applicable(resource)?;
        }
        tracing::debug!("Bound {} settings to {}", self.scope, resource);
        self.target = Some(resource.clone());
        Ok(())
    }

    /// By-value form of [`SettingsCollection::bind`].
    pub fn with_target(mut self, resource: &Resource) -> Result<Self> {
        self.bind(resource)?;
        Ok(self)
    }

    fn phase_tokens(&self, phase: Phase) -> Vec<String> {
        self.entries
            .iter()
            .filter(|s| s.phase() == phase)
            .flat_map(Setting::tokens)
            .collect()
    }

    /// Tokens emitted before the resource path.
    pub fn pre_tokens(&self) -> Vec<String> {
        self.phase_tokens(Phase::Pre)
    }

    /// Tokens emitted after the resource path.
    pub fn post_tokens(&self) -> Vec<String> {
        self.phase_tokens(Phase::Post)
    }

    /// All tokens: `Pre` entries, then `Post` entries, each in insertion
    /// order, with the path omitted.
    pub fn serialize(&self) -> Vec<String> {
        let mut tokens = self.pre_tokens();
        tokens.extend(self.post_tokens());
        tokens
    }

    /// All tokens with `path` placed between the `Pre` and `Post` groups.
    pub fn serialize_around(&self, path: impl Into<String>) -> Vec<String> {
        let mut tokens = self.pre_tokens();
        tokens.push(path.into());
        tokens.extend(self.post_tokens());
        tokens
    }
}

impl<'a> IntoIterator for &'a SettingsCollection {
    type Item = &'a Setting;
    type IntoIter = std::slice::Iter<'a, Setting>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
