//! Built-in setting kinds.
//!
//! Each kind is a unit struct carrying a fixed [`SettingDeclaration`] and a
//! few typed constructors. Kinds can also be looked up by their snake_case
//! name, which is how configuration files refer to them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Setting, SettingDeclaration, SettingKind, SettingValue};
use crate::capability::{ResourceKind, SettingsScope, StreamKind};
use crate::{Error, Result};

/// Generate setting kind unit structs and the name lookup table.
macro_rules! setting_kinds {
    ($(
        $(#[doc = $doc:expr])*
        $name:ident ($snake:literal) => $declaration:expr
    ),+ $(,)?) => {
        $(
            $(#[doc = $doc])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl SettingKind for $name {
                const NAME: &'static str = $snake;
                const DECLARATION: SettingDeclaration = $declaration;
            }
        )+

        const KINDS: &[(&str, SettingDeclaration)] = &[
            $(($name::NAME, $name::DECLARATION)),+
        ];
    };
}

setting_kinds! {
    /// Video codec (`-c:v`).
    CodecVideo("codec_video") => SettingDeclaration::new("c:v")
        .for_stream(StreamKind::Video),
    /// Audio codec (`-c:a`).
    CodecAudio("codec_audio") => SettingDeclaration::new("c:a")
        .for_stream(StreamKind::Audio),
    /// Subtitle codec (`-c:s`).
    CodecSubtitle("codec_subtitle") => SettingDeclaration::new("c:s")
        .for_stream(StreamKind::Subtitle),
    /// Target video bit rate (`-b:v`).
    BitRateVideo("bit_rate_video") => SettingDeclaration::new("b:v")
        .for_resource(ResourceKind::Video)
        .in_scope(SettingsScope::Output),
    /// Target audio bit rate (`-b:a`).
    BitRateAudio("bit_rate_audio") => SettingDeclaration::new("b:a")
        .for_resource(ResourceKind::Audio)
        .in_scope(SettingsScope::Output),
    /// Frame rate (`-r`).
    FrameRate("frame_rate") => SettingDeclaration::new("r")
        .for_resource(ResourceKind::Video),
    /// Pixel format (`-pix_fmt`).
    PixelFormat("pixel_format") => SettingDeclaration::new("pix_fmt")
        .for_stream(StreamKind::Video)
        .in_scope(SettingsScope::Output),
    /// Audio sample rate (`-ar`).
    SampleRate("sample_rate") => SettingDeclaration::new("ar")
        .for_resource(ResourceKind::Audio),
    /// Audio channel count (`-ac`).
    AudioChannels("audio_channels") => SettingDeclaration::new("ac")
        .for_resource(ResourceKind::Audio),
    /// Forced container format (`-f`).
    Format("format") => SettingDeclaration::new("f"),
    /// Start offset (`-ss`).
    StartAt("start_at") => SettingDeclaration::new("ss"),
    /// Maximum length (`-t`).
    DurationLimit("duration") => SettingDeclaration::new("t"),
    /// Loop a still image input (`-loop`).
    LoopImage("loop_image") => SettingDeclaration::new("loop")
        .for_resource(ResourceKind::Image)
        .in_scope(SettingsScope::Input),
    /// Drop audio from the output (`-an`).
    DisableAudio("disable_audio") => SettingDeclaration::new("an")
        .in_scope(SettingsScope::Output),
    /// Drop video from the output (`-vn`).
    DisableVideo("disable_video") => SettingDeclaration::new("vn")
        .in_scope(SettingsScope::Output),
    /// MOV/MP4 muxer flags (`-movflags`).
    MovFlags("mov_flags") => SettingDeclaration::new("movflags")
        .for_resource(ResourceKind::Video)
        .in_scope(SettingsScope::Output),
    /// Stream selection (`-map`). Must precede the output path; ffmpeg
    /// ignores options trailing the last output.
    Map("map") => SettingDeclaration::new("map")
        .in_scope(SettingsScope::Output),
    /// Overwrite outputs without asking (`-y`); a global option.
    Overwrite("overwrite") => SettingDeclaration::new("y"),
}

/// Known format libraries beyond the container's own muxer/demuxer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatType {
    /// The input is a concat demuxer file list.
    Concat,
}

impl FormatType {
    /// The library name passed to `-f`.
    pub fn library(&self) -> &'static str {
        match self {
            Self::Concat => "concat",
        }
    }
}

impl CodecVideo {
    /// Encode (or decode) video with `codec`, e.g. `libx264`.
    pub fn new(codec: impl Into<String>) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::text(codec))
    }

    /// Copy the video stream without re-encoding.
    pub fn copy() -> Result<Setting> {
        Self::new("copy")
    }
}

impl CodecAudio {
    /// Encode (or decode) audio with `codec`, e.g. `aac`.
    pub fn new(codec: impl Into<String>) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::text(codec))
    }

    /// Copy the audio stream without re-encoding.
    pub fn copy() -> Result<Setting> {
        Self::new("copy")
    }
}

impl CodecSubtitle {
    /// Encode subtitles with `codec`, e.g. `mov_text`.
    pub fn new(codec: impl Into<String>) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::text(codec))
    }
}

impl BitRateVideo {
    /// Video bit rate in kilobits per second.
    pub fn kbps(rate: u32) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::Kilobits(rate))
    }
}

impl BitRateAudio {
    /// Audio bit rate in kilobits per second.
    pub fn kbps(rate: u32) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::Kilobits(rate))
    }
}

impl FrameRate {
    /// Frames per second.
    pub fn fps(rate: f64) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::Decimal(rate))
    }
}

impl PixelFormat {
    /// Pixel format name, e.g. `yuv420p`.
    pub fn new(format: impl Into<String>) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::text(format))
    }
}

impl SampleRate {
    /// Sample rate in hertz.
    pub fn hz(rate: u32) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::Integer(i64::from(rate)))
    }
}

impl AudioChannels {
    /// Number of output channels.
    pub fn count(channels: u8) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::Integer(i64::from(channels)))
    }
}

impl Format {
    /// Force a muxer/demuxer by name.
    pub fn new(format: impl Into<String>) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::text(format))
    }

    /// Force one of the known format libraries.
    pub fn of(format: FormatType) -> Result<Setting> {
        Self::new(format.library())
    }
}

impl StartAt {
    /// Start `offset` into the resource.
    pub fn at(offset: Duration) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::Time(offset))
    }
}

impl DurationLimit {
    /// Stop after `length`.
    pub fn of(length: Duration) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::Time(length))
    }
}

impl LoopImage {
    /// Loop the image input indefinitely.
    pub fn enabled() -> Result<Setting> {
        Setting::new::<Self>(SettingValue::Integer(1))
    }
}

impl DisableAudio {
    /// Emit `-an`.
    pub fn flag() -> Result<Setting> {
        Setting::new::<Self>(SettingValue::Flag)
    }
}

impl DisableVideo {
    /// Emit `-vn`.
    pub fn flag() -> Result<Setting> {
        Setting::new::<Self>(SettingValue::Flag)
    }
}

impl MovFlags {
    /// Raw flag expression, e.g. `+faststart+frag_keyframe`.
    pub fn new(flags: impl Into<String>) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::text(flags))
    }

    /// Move the index to the front of the file for progressive playback.
    pub fn faststart() -> Result<Setting> {
        Self::new("+faststart")
    }
}

impl Map {
    /// Stream specifier, e.g. `0:a:0`.
    pub fn new(specifier: impl Into<String>) -> Result<Setting> {
        Setting::new::<Self>(SettingValue::text(specifier))
    }
}

impl Overwrite {
    /// Emit `-y`.
    pub fn flag() -> Result<Setting> {
        Setting::new::<Self>(SettingValue::Flag)
    }
}

/// Declaration of the kind registered under `name`, if any.
pub fn kind_by_name(name: &str) -> Option<&'static SettingDeclaration> {
    KINDS
        .iter()
        .find(|(kind, _)| kind.eq_ignore_ascii_case(name))
        .map(|(_, declaration)| declaration)
}

/// Names and declarations of every built-in kind, in definition order.
pub fn kinds() -> impl Iterator<Item = (&'static str, &'static SettingDeclaration)> {
    KINDS.iter().map(|(name, declaration)| (*name, declaration))
}

/// Names of every built-in kind, in definition order.
pub fn kind_names() -> Vec<&'static str> {
    KINDS.iter().map(|(name, _)| *name).collect()
}

/// Build a setting of the kind registered under `name` from a textual value.
///
/// An empty value produces a flag-only setting.
///
/// # Errors
///
/// Returns [`Error::InvalidSetting`] if no kind has that name.
pub fn setting_from_name(name: &str, value: &str) -> Result<Setting> {
    let declaration = kind_by_name(name)
        .ok_or_else(|| Error::InvalidSetting(format!("unknown setting kind '{name}'")))?;
    let value = if value.is_empty() {
        SettingValue::Flag
    } else {
        SettingValue::text(value)
    };
    Setting::from_declaration(declaration, value)
}
