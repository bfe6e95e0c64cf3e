//! Capability tags and the lookup index over them.
//!
//! Containers and setting declarations describe their role once, as a list of
//! [`CapabilityTag`]s returned from [`Tagged::capability_tags`]. Everything
//! else in the crate asks questions through [`get_tag`] and [`get_tags`]
//! instead of hard-coding per-type checks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

// ---------------------------------------------------------------------------
// ResourceKind
// ---------------------------------------------------------------------------

/// Kind of content a resource (container) can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Video,
    Audio,
    Image,
    Text,
}

impl ResourceKind {
    /// Phrase used in applicability errors, e.g. "a video resource".
    pub fn describe(&self) -> String {
        format!("{} {} resource", article(&self.to_string()), self)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
            Self::Image => write!(f, "image"),
            Self::Text => write!(f, "text"),
        }
    }
}

// ---------------------------------------------------------------------------
// StreamKind
// ---------------------------------------------------------------------------

/// Kind of elementary stream a container can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
    Data,
}

impl StreamKind {
    /// Phrase used in applicability errors, e.g. "a video stream".
    pub fn describe(&self) -> String {
        format!("{} {} stream", article(&self.to_string()), self)
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
            Self::Subtitle => write!(f, "subtitle"),
            Self::Data => write!(f, "data"),
        }
    }
}

fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Whether a setting is emitted before or after the resource path token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Pre,
    Post,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pre => write!(f, "pre"),
            Self::Post => write!(f, "post"),
        }
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Scope as it may be written in a declaration, including the union `Any`.
///
/// `Any` exists only so that misuse can be named and rejected: no setting,
/// collection or template can be built with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsScope {
    Input,
    Output,
    Any,
}

impl fmt::Display for SettingsScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
            Self::Any => write!(f, "any"),
        }
    }
}

/// A concrete side of the command being assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Input,
    Output,
}

impl Scope {
    /// Resolve a declared scope, failing for `Any`.
    pub fn resolve(declared: SettingsScope) -> Result<Self> {
        match declared {
            SettingsScope::Input => Ok(Self::Input),
            SettingsScope::Output => Ok(Self::Output),
            SettingsScope::Any => Err(Error::invalid_scope(
                "scope 'any' is not supported; use input or output",
            )),
        }
    }
}

impl TryFrom<SettingsScope> for Scope {
    type Error = Error;

    fn try_from(declared: SettingsScope) -> Result<Self> {
        Self::resolve(declared)
    }
}

impl From<Scope> for SettingsScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Input => Self::Input,
            Scope::Output => Self::Output,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&SettingsScope::from(*self), f)
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// A single piece of declarative metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "tag", content = "value", rename_all = "lowercase")]
pub enum CapabilityTag {
    /// The item is a resource container.
    Container,
    /// The item holds, or applies to, this kind of resource.
    Resource(ResourceKind),
    /// The item carries, or applies to, this kind of stream.
    Stream(StreamKind),
    /// The item is emitted in this phase.
    Phase(Phase),
    /// The item belongs to this scope.
    Scope(SettingsScope),
}

/// Discriminant of [`CapabilityTag`], used as the lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Container,
    Resource,
    Stream,
    Phase,
    Scope,
}

impl CapabilityTag {
    /// The kind this tag is looked up by.
    pub fn kind(&self) -> TagKind {
        match self {
            Self::Container => TagKind::Container,
            Self::Resource(_) => TagKind::Resource,
            Self::Stream(_) => TagKind::Stream,
            Self::Phase(_) => TagKind::Phase,
            Self::Scope(_) => TagKind::Scope,
        }
    }
}

/// Anything that declares capability tags.
pub trait Tagged {
    /// All tags declared by this item, in declaration order.
    fn capability_tags(&self) -> Vec<CapabilityTag>;
}

/// Return the first tag of `kind` declared by `item`, if any.
pub fn get_tag<T: Tagged + ?Sized>(item: &T, kind: TagKind) -> Option<CapabilityTag> {
    item.capability_tags()
        .into_iter()
        .find(|tag| tag.kind() == kind)
}

/// Return every tag of `kind` declared by `item`; empty when there are none.
pub fn get_tags<T: Tagged + ?Sized>(item: &T, kind: TagKind) -> Vec<CapabilityTag> {
    item.capability_tags()
        .into_iter()
        .filter(|tag| tag.kind() == kind)
        .collect()
}

/// Resource kinds declared by `item`.
pub fn resource_kinds<T: Tagged + ?Sized>(item: &T) -> Vec<ResourceKind> {
    get_tags(item, TagKind::Resource)
        .into_iter()
        .filter_map(|tag| match tag {
            CapabilityTag::Resource(kind) => Some(kind),
            _ => None,
        })
        .collect()
}

/// Stream kinds declared by `item`.
pub fn stream_kinds<T: Tagged + ?Sized>(item: &T) -> Vec<StreamKind> {
    get_tags(item, TagKind::Stream)
        .into_iter()
        .filter_map(|tag| match tag {
            CapabilityTag::Stream(kind) => Some(kind),
            _ => None,
        })
        .collect()
}

/// Whether `item` declares itself a container.
pub fn is_container<T: Tagged + ?Sized>(item: &T) -> bool {
    get_tag(item, TagKind::Container).is_some()
}
