//! Assembly of a complete argument list.
//!
//! An [`Invocation`] collects global options, inputs and outputs, each input
//! and output with its own bound [`SettingsCollection`], and lays the tokens
//! out in the order ffmpeg expects:
//!
//! ```text
//! [global] [pre -i input post]... [pre output post]...
//! ```
//!
//! Nothing is executed here; the caller decides how to run the tokens.

use serde::Serialize;

use crate::capability::{Phase, Scope};
use crate::collection::SettingsCollection;
use crate::resource::Resource;
use crate::setting::Setting;
use crate::{Error, Result};

/// One resource and the settings emitted around its path.
#[derive(Debug, Clone)]
pub struct Segment {
    resource: Resource,
    settings: SettingsCollection,
}

impl Segment {
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn settings(&self) -> &SettingsCollection {
        &self.settings
    }

    fn path_token(&self) -> String {
        self.resource.full_path().to_string_lossy().into_owned()
    }
}

/// A command line under assembly.
///
/// # Example
///
/// ```
/// use ffcompose_core::resource::containers::{Mp3, Mp4};
/// use ffcompose_core::resource::Resource;
/// use ffcompose_core::setting::kinds::{CodecAudio, DisableVideo, Overwrite};
/// use ffcompose_core::{Invocation, SettingsCollection};
///
/// let mut invocation = Invocation::new();
/// invocation.global(Overwrite::flag()?)?;
/// invocation.input(Resource::create::<Mp4>("/in/talk.mp4"), SettingsCollection::for_input())?;
/// invocation.output(
///     Resource::create::<Mp3>("/out/talk.mp3"),
///     SettingsCollection::for_output()
///         .with(DisableVideo::flag()?)?
///         .with(CodecAudio::new("libmp3lame")?)?,
/// )?;
///
/// assert_eq!(
///     invocation.tokens(),
///     ["-y", "-i", "/in/talk.mp4", "-vn", "-c:a", "libmp3lame", "/out/talk.mp3"]
/// );
/// # Ok::<(), ffcompose_core::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    globals: Vec<Setting>,
    inputs: Vec<Segment>,
    outputs: Vec<Segment>,
}

impl Invocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option emitted before every input, such as `-y`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] if the setting is restricted to a
    /// scope, requires a resource or stream capability, or is in the `Post`
    /// phase.
    pub fn global(&mut self, setting: Setting) -> Result<&mut Self> {
        let reason = if let Some(scope) = setting.scope() {
            Some(format!("it belongs to the {scope} scope"))
        } else if setting.resource().is_some() || setting.stream().is_some() {
            Some("it requires a resource or stream capability".to_string())
        } else if setting.phase() == Phase::Post {
            Some("it must follow a resource path".to_string())
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(Error::InvalidSetting(format!(
                "-{} cannot be a global option: {reason}",
                setting.flag()
            )));
        }

        self.globals.push(setting);
        Ok(self)
    }

    /// Add an input with its settings.
    ///
    /// # Errors
    ///
    /// - [`Error::ScopeMismatch`] if `settings` is not an input collection.
    /// - [`Error::SettingApplicability`] if any setting does not apply to
    ///   `resource`.
    pub fn input(&mut self, resource: Resource, settings: SettingsCollection) -> Result<&mut Self> {
        let segment = Self::segment(Scope::Input, resource, settings)?;
        self.inputs.push(segment);
        Ok(self)
    }

    /// Add an output with its settings.
    ///
    /// # Errors
    ///
    /// - [`Error::ScopeMismatch`] if `settings` is not an output collection.
    /// - [`Error::SettingApplicability`] if any setting does not apply to
    ///   `resource`.
    pub fn output(&mut self, resource: Resource, settings: SettingsCollection) -> Result<&mut Self> {
        let segment = Self::segment(Scope::Output, resource, settings)?;
        self.outputs.push(segment);
        Ok(self)
    }

    fn segment(scope: Scope, resource: Resource, mut settings: SettingsCollection) -> Result<Segment> {
        if settings.scope() != scope {
            return Err(Error::ScopeMismatch {
                expected: scope,
                found: settings.scope(),
            });
        }
        settings.bind(&resource)?;
        Ok(Segment { resource, settings })
    }

    pub fn inputs(&self) -> &[Segment] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Segment] {
        &self.outputs
    }

    /// The full argument list, without a program name.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = self.globals.iter().flat_map(Setting::tokens).collect();

        for input in &self.inputs {
            tokens.extend(input.settings.pre_tokens());
            tokens.push("-i".to_string());
            tokens.push(input.path_token());
            tokens.extend(input.settings.post_tokens());
        }
        for output in &self.outputs {
            tokens.extend(output.settings.serialize_around(output.path_token()));
        }

        tokens
    }

    /// The full argument list prefixed with `program`.
    pub fn tokens_with_program(&self, program: &str) -> Vec<String> {
        let mut tokens = vec![program.to_string()];
        tokens.extend(self.tokens());
        tokens
    }

    /// Serializable summary of the invocation.
    pub fn plan(&self) -> InvocationPlan {
        let describe = |segment: &Segment| SegmentPlan {
            path: segment.path_token(),
            container: segment.resource.key(),
            tokens: segment.settings.serialize(),
        };
        InvocationPlan {
            inputs: self.inputs.iter().map(describe).collect(),
            outputs: self.outputs.iter().map(describe).collect(),
            tokens: self.tokens(),
        }
    }
}

/// JSON-friendly view of an [`Invocation`].
#[derive(Debug, Clone, Serialize)]
pub struct InvocationPlan {
    pub inputs: Vec<SegmentPlan>,
    pub outputs: Vec<SegmentPlan>,
    pub tokens: Vec<String>,
}

/// JSON-friendly view of a [`Segment`].
#[derive(Debug, Clone, Serialize)]
pub struct SegmentPlan {
    pub path: String,
    pub container: &'static str,
    pub tokens: Vec<String>,
}
