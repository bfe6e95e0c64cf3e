//! Named, reusable bundles of settings.
//!
//! A [`SettingsTemplate`] is built once (a preset, or a template defined in a
//! configuration file) and then reused read-only. Its settings live in one
//! embedded [`SettingsCollection`] fixed to a single scope, so the same scope
//! and applicability rules apply as for any collection. Getting at the
//! collection is always explicit: [`SettingsTemplate::settings`],
//! [`SettingsTemplate::into_settings`] or `From`.

use crate::capability::{Scope, SettingsScope};
use crate::collection::SettingsCollection;
use crate::setting::Setting;
use crate::{Error, Result};

/// A named settings bundle for one scope.
///
/// # Example
///
/// ```
/// use ffcompose_core::capability::SettingsScope;
/// use ffcompose_core::setting::kinds::{BitRateAudio, CodecAudio};
/// use ffcompose_core::SettingsTemplate;
///
/// let podcast = SettingsTemplate::new("podcast", SettingsScope::Output)?
///     .with(CodecAudio::new("libmp3lame")?)?
///     .with(BitRateAudio::kbps(96)?)?;
///
/// assert_eq!(podcast.settings().serialize(), ["-c:a", "libmp3lame", "-b:a", "96k"]);
/// # Ok::<(), ffcompose_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SettingsTemplate {
    name: String,
    base: SettingsCollection,
}

impl SettingsTemplate {
    /// An empty template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScopeConfiguration`] for [`SettingsScope::Any`].
    pub fn new(name: impl Into<String>, scope: SettingsScope) -> Result<Self> {
        let name = name.into();
        let base = SettingsCollection::new(scope).map_err(|_| {
            Error::invalid_scope(format!(
                "template '{name}' declares scope 'any'; templates must be input or output"
            ))
        })?;
        Ok(Self { name, base })
    }

    /// Add a setting while defining the template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScopeMismatch`] if the setting belongs to the other
    /// scope.
    pub fn add(&mut self, setting: Setting) -> Result<()> {
        self.base.add(setting)
    }

    /// Builder form of [`SettingsTemplate::add`].
    pub fn with(mut self, setting: Setting) -> Result<Self> {
        self.add(setting)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Scope {
        self.base.scope()
    }

    /// The template's settings.
    pub fn settings(&self) -> &SettingsCollection {
        &self.base
    }

    /// Consume the template, keeping its settings.
    pub fn into_settings(self) -> SettingsCollection {
        self.base
    }
}

impl From<SettingsTemplate> for SettingsCollection {
    fn from(template: SettingsTemplate) -> Self {
        template.into_settings()
    }
}

impl AsRef<SettingsCollection> for SettingsTemplate {
    fn as_ref(&self) -> &SettingsCollection {
        &self.base
    }
}

/// Merge several templates, in order, into one fresh collection.
///
/// # Errors
///
/// - [`Error::InvalidScopeConfiguration`] for [`SettingsScope::Any`].
/// - [`Error::ScopeMismatch`] if any template has a different scope.
pub fn compose<'a, I>(scope: SettingsScope, templates: I) -> Result<SettingsCollection>
where
    I: IntoIterator<Item = &'a SettingsTemplate>,
{
    let mut collection = SettingsCollection::new(scope)?;
    for template in templates {
        collection.merge(template.settings())?;
        tracing::trace!("Composed template '{}' into {} settings", template.name, collection.scope());
    }
    Ok(collection)
}

/// Built-in templates.
pub mod presets {
    use super::SettingsTemplate;
    use crate::capability::SettingsScope;
    use crate::setting::kinds::{
        BitRateAudio, BitRateVideo, CodecAudio, CodecVideo, DisableVideo, Format, FormatType,
        MovFlags, PixelFormat, SampleRate,
    };
    use crate::{Error, Result};

    const PRESETS: &[(&str, fn() -> Result<SettingsTemplate>)] = &[
        ("broadcast_h264", broadcast_h264),
        ("web_vp9", web_vp9),
        ("audio_aac", audio_aac),
        ("audio_mp3", audio_mp3),
        ("concat_input", concat_input),
    ];

    /// H.264/AAC in a streaming-friendly MP4 layout.
    pub fn broadcast_h264() -> Result<SettingsTemplate> {
        SettingsTemplate::new("broadcast_h264", SettingsScope::Output)?
            .with(CodecVideo::new("libx264")?)?
            .with(PixelFormat::new("yuv420p")?)?
            .with(BitRateVideo::kbps(5000)?)?
            .with(CodecAudio::new("aac")?)?
            .with(BitRateAudio::kbps(192)?)?
            .with(SampleRate::hz(48_000)?)?
            .with(MovFlags::faststart()?)
    }

    /// VP9/Opus for WebM delivery.
    pub fn web_vp9() -> Result<SettingsTemplate> {
        SettingsTemplate::new("web_vp9", SettingsScope::Output)?
            .with(CodecVideo::new("libvpx-vp9")?)?
            .with(BitRateVideo::kbps(2000)?)?
            .with(CodecAudio::new("libopus")?)?
            .with(BitRateAudio::kbps(128)?)
    }

    /// Audio-only AAC extraction.
    pub fn audio_aac() -> Result<SettingsTemplate> {
        SettingsTemplate::new("audio_aac", SettingsScope::Output)?
            .with(DisableVideo::flag()?)?
            .with(CodecAudio::new("aac")?)?
            .with(BitRateAudio::kbps(192)?)?
            .with(SampleRate::hz(48_000)?)
    }

    /// Audio-only MP3 extraction.
    pub fn audio_mp3() -> Result<SettingsTemplate> {
        SettingsTemplate::new("audio_mp3", SettingsScope::Output)?
            .with(DisableVideo::flag()?)?
            .with(CodecAudio::new("libmp3lame")?)?
            .with(BitRateAudio::kbps(192)?)
    }

    /// Read the input as a concat demuxer file list.
    pub fn concat_input() -> Result<SettingsTemplate> {
        SettingsTemplate::new("concat_input", SettingsScope::Input)?
            .with(Format::of(FormatType::Concat)?)
    }

    /// Build the preset registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTemplate`] if no preset has that name.
    pub fn preset_by_name(name: &str) -> Result<SettingsTemplate> {
        let (_, build) = PRESETS
            .iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownTemplate(name.to_string()))?;
        build()
    }

    /// Names of every preset.
    pub fn preset_names() -> Vec<&'static str> {
        PRESETS.iter().map(|(name, _)| *name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::presets::*;
    use super::*;
    use crate::resource::containers::{Mp3, Mp4, Txt};
    use crate::resource::Resource;
    use crate::setting::kinds::{CodecVideo, LoopImage, Map};

    #[test]
    fn any_scope_fails() {
        assert!(matches!(
            SettingsTemplate::new("broken", SettingsScope::Any),
            Err(Error::InvalidScopeConfiguration(_))
        ));
    }

    #[test]
    fn template_rejects_other_scope_at_definition() {
        let mut template = SettingsTemplate::new("still", SettingsScope::Output).unwrap();
        assert!(matches!(
            template.add(LoopImage::enabled().unwrap()),
            Err(Error::ScopeMismatch { .. })
        ));
        assert!(template.settings().is_empty());
    }

    #[test]
    fn explicit_coercion() {
        let template = SettingsTemplate::new("t", SettingsScope::Output)
            .unwrap()
            .with(CodecVideo::copy().unwrap())
            .unwrap();
        let borrowed: &SettingsCollection = template.as_ref();
        assert_eq!(borrowed.len(), 1);

        let owned: SettingsCollection = template.into();
        assert_eq!(owned.serialize(), ["-c:v", "copy"]);
    }

    #[test]
    fn compose_merges_in_order() {
        let video = SettingsTemplate::new("v", SettingsScope::Output)
            .unwrap()
            .with(CodecVideo::new("libx264").unwrap())
            .unwrap()
            .with(Map::new("0:v").unwrap())
            .unwrap();
        let audio = audio_mp3().unwrap();

        let collection = compose(SettingsScope::Output, [&video, &audio]).unwrap();
        assert_eq!(
            collection.serialize(),
            [
                "-c:v",
                "libx264",
                "-map",
                "0:v",
                "-vn",
                "-c:a",
                "libmp3lame",
                "-b:a",
                "192k"
            ]
        );
    }

    #[test]
    fn compose_rejects_mixed_scopes() {
        let input = concat_input().unwrap();
        let output = broadcast_h264().unwrap();
        assert!(matches!(
            compose(SettingsScope::Output, [&output, &input]),
            Err(Error::ScopeMismatch { .. })
        ));
    }

    #[test]
    fn every_preset_builds() {
        for name in preset_names() {
            let template = preset_by_name(name).unwrap();
            assert_eq!(template.name(), name);
            assert!(!template.settings().is_empty());
        }
    }

    #[test]
    fn unknown_preset() {
        assert!(matches!(
            preset_by_name("vhs"),
            Err(Error::UnknownTemplate(ref name)) if name == "vhs"
        ));
    }

    #[test]
    fn presets_apply_to_matching_resources() {
        let mp4 = Resource::create::<Mp4>("/out/final.mp4");
        let mp3 = Resource::create::<Mp3>("/out/final.mp3");
        let list = Resource::create::<Txt>("/tmp/list.txt");

        broadcast_h264().unwrap().into_settings().bind(&mp4).unwrap();
        audio_mp3().unwrap().into_settings().bind(&mp3).unwrap();
        concat_input().unwrap().into_settings().bind(&list).unwrap();

        assert!(broadcast_h264()
            .unwrap()
            .into_settings()
            .bind(&mp3)
            .is_err());
    }

    #[test]
    fn concat_input_forces_format() {
        let template = concat_input().unwrap();
        assert_eq!(template.scope(), Scope::Input);
        assert_eq!(template.settings().serialize(), ["-f", "concat"]);
    }
}
