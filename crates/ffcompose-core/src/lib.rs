//! # ffcompose-core
//!
//! Declarative assembly of ffmpeg command tokens.
//!
//! This crate provides functionality for:
//! - Resolving a file path into a typed resource (MP4, MP3, PNG, ...) through
//!   a lazily populated container registry
//! - Describing settings (`-c:v`, `-b:a`, `-map`, ...) by the resource and
//!   stream capabilities they require, their phase and their scope
//! - Collecting settings per input or output, validating each against the
//!   bound resource as it is added
//! - Reusable named templates and built-in presets
//! - Laying out a complete argument list around the resource paths
//!
//! Nothing here runs ffmpeg; the output is a `Vec<String>`.
//!
//! ## Example
//!
//! ```
//! use ffcompose_core::setting::kinds::{BitRateAudio, CodecVideo};
//! use ffcompose_core::{builtin_registry, Invocation, SettingsCollection};
//!
//! let input = builtin_registry().resolve("/media/clip.MOV")?;
//! let output = builtin_registry().resolve("/renders/clip.mp4")?;
//!
//! let settings = SettingsCollection::for_output()
//!     .with(CodecVideo::new("libx264")?)?
//!     .with(BitRateAudio::kbps(128)?)?;
//!
//! let mut invocation = Invocation::new();
//! invocation.input(input, SettingsCollection::for_input())?;
//! invocation.output(output, settings)?;
//!
//! assert_eq!(
//!     invocation.tokens_with_program("ffmpeg").join(" "),
//!     "ffmpeg -i /media/clip.MOV -c:v libx264 -b:a 128k /renders/clip.mp4"
//! );
//! # Ok::<(), ffcompose_core::Error>(())
//! ```

pub mod capability;
pub mod collection;
pub mod command;
mod error;
pub mod resource;
pub mod setting;
pub mod template;

// Re-exports
pub use capability::{
    get_tag, get_tags, CapabilityTag, Phase, ResourceKind, Scope, SettingsScope, StreamKind,
    TagKind, Tagged,
};
pub use collection::SettingsCollection;
pub use command::{Invocation, InvocationPlan};
pub use error::{Error, Result};
pub use resource::{
    builtin_registry, Container, ContainerRegistration, ContainerRegistry, Resource,
    ResourceLocations,
};
pub use setting::{Setting, SettingDeclaration, SettingKind, SettingValue};
pub use template::{compose, SettingsTemplate};
