//! Built-in container types.
//!
//! Each type is a unit struct whose name doubles as its registry key. The key
//! is matched case-insensitively against file extensions, so `Mp4` resolves
//! `clip.mp4`, `clip.Mp4` and `clip.MP4` alike.

use crate::capability::{CapabilityTag, ResourceKind, StreamKind, Tagged};

use super::registry::ContainerRegistration;
use super::Container;

/// Generate container unit structs with their capability tags.
///
/// The macro produces, for each entry:
/// - a `Debug`, `Clone`, `Copy`, `Default`, `PartialEq`, `Eq` unit struct
/// - a [`Tagged`] impl declaring `Container` plus the listed resource and
///   stream kinds, in order
/// - a [`Container`] impl returning the key
///
/// It also produces [`builtin_registrations`] covering every entry.
macro_rules! container_types {
    ($(
        $(#[doc = $doc:expr])*
        $name:ident => $key:literal {
            resources: [$($resource:ident),* $(,)?],
            streams: [$($stream:ident),* $(,)?] $(,)?
        }
    ),+ $(,)?) => {
        $(
            $(#[doc = $doc])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl Tagged for $name {
                fn capability_tags(&self) -> Vec<CapabilityTag> {
                    let mut tags = vec![CapabilityTag::Container];
                    $(tags.push(CapabilityTag::Resource(ResourceKind::$resource));)*
                    $(tags.push(CapabilityTag::Stream(StreamKind::$stream));)*
                    tags
                }
            }

            impl Container for $name {
                fn key(&self) -> &'static str {
                    $key
                }
            }
        )+

        /// Registrations for every built-in container type.
        pub fn builtin_registrations() -> Vec<ContainerRegistration> {
            vec![$(ContainerRegistration::of::<$name>()),+]
        }
    };
}

container_types! {
    /// MPEG-4 Part 14 container.
    Mp4 => "MP4" {
        resources: [Video, Audio],
        streams: [Video, Audio, Subtitle, Data],
    },
    /// QuickTime container.
    Mov => "MOV" {
        resources: [Video, Audio],
        streams: [Video, Audio, Data],
    },
    /// Matroska container.
    Mkv => "MKV" {
        resources: [Video, Audio],
        streams: [Video, Audio, Subtitle, Data],
    },
    /// WebM container.
    Webm => "WEBM" {
        resources: [Video, Audio],
        streams: [Video, Audio, Subtitle],
    },
    /// MPEG transport stream.
    Ts => "TS" {
        resources: [Video, Audio],
        streams: [Video, Audio, Subtitle, Data],
    },
    /// AVI container.
    Avi => "AVI" {
        resources: [Video, Audio],
        streams: [Video, Audio],
    },
    /// MPEG-4 audio-only container.
    M4a => "M4A" {
        resources: [Audio],
        streams: [Audio],
    },
    /// MPEG-1 Layer III audio.
    Mp3 => "MP3" {
        resources: [Audio],
        streams: [Audio],
    },
    /// Waveform audio.
    Wav => "WAV" {
        resources: [Audio],
        streams: [Audio],
    },
    /// Raw ADTS AAC audio.
    Aac => "AAC" {
        resources: [Audio],
        streams: [Audio],
    },
    /// Free Lossless Audio Codec.
    Flac => "FLAC" {
        resources: [Audio],
        streams: [Audio],
    },
    /// Ogg container.
    Ogg => "OGG" {
        resources: [Audio],
        streams: [Audio],
    },
    /// PNG still image; decoded as a single-frame video stream.
    Png => "PNG" {
        resources: [Image],
        streams: [Video],
    },
    /// JPEG still image; decoded as a single-frame video stream.
    Jpg => "JPG" {
        resources: [Image],
        streams: [Video],
    },
    /// GIF image, possibly animated.
    Gif => "GIF" {
        resources: [Image, Video],
        streams: [Video],
    },
    /// SubRip subtitles.
    Srt => "SRT" {
        resources: [Text],
        streams: [Subtitle],
    },
    /// Plain text, e.g. a concat demuxer file list.
    Txt => "TXT" {
        resources: [Text],
        streams: [Data],
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{self, get_tags, TagKind};

    #[test]
    fn every_builtin_is_a_container() {
        for registration in builtin_registrations() {
            let container = registration.instantiate();
            assert!(
                capability::is_container(container.as_ref()),
                "{} is missing the container tag",
                registration.key()
            );
        }
    }

    #[test]
    fn builtin_keys_are_unique() {
        let mut keys: Vec<_> = builtin_registrations()
            .iter()
            .map(|r| r.key().to_string())
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn audio_only_containers_carry_no_video() {
        for container in [&Mp3 as &dyn Container, &Wav, &Flac, &M4a] {
            assert_eq!(
                capability::resource_kinds(container),
                vec![ResourceKind::Audio],
                "{}",
                container.key()
            );
            assert!(!capability::stream_kinds(container).contains(&StreamKind::Video));
        }
    }

    #[test]
    fn mp4_declares_multiple_resource_tags() {
        assert_eq!(get_tags(&Mp4, TagKind::Resource).len(), 2);
        assert_eq!(Mp4.extension(), "mp4");
    }
}
