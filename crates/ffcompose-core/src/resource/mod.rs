//! Resources: named, typed I/O endpoints resolved from file paths.
//!
//! A [`Container`] type describes one container format (MP4, WAV, PNG, ...)
//! through its capability tags. A [`Resource`] is an instance of such a type
//! bound to a directory and a file name.

pub mod containers;
pub mod paths;
pub mod registry;

use std::any::TypeId;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::capability::{self, CapabilityTag, ResourceKind, StreamKind, Tagged};
use paths::split_full_path;

pub use registry::{
    builtin_registry, ContainerRegistration, ContainerRegistry, ContainerRegistryBuilder,
};

/// A concrete container type.
///
/// Implementors must declare [`CapabilityTag::Container`] among their tags
/// and are normally unit structs implementing `Default`, so that registries
/// can construct them from a zero-argument factory.
pub trait Container: Tagged + fmt::Debug + Send + Sync + 'static {
    /// Short type name, e.g. `"MP4"`.
    ///
    /// This is the registry key and is matched case-insensitively against
    /// file extensions.
    fn key(&self) -> &'static str;

    /// Extension used when a resource of this type is created by name.
    fn extension(&self) -> String {
        self.key().to_ascii_lowercase()
    }
}

/// A resolved resource: a container instance with a name and a directory.
#[derive(Debug, Clone)]
pub struct Resource {
    container: Arc<dyn Container>,
    type_id: TypeId,
    name: String,
    path: PathBuf,
    extension: String,
}

impl Resource {
    pub(crate) fn from_parts(
        container: Arc<dyn Container>,
        type_id: TypeId,
        name: String,
        path: PathBuf,
        extension: String,
    ) -> Self {
        Self {
            container,
            type_id,
            name,
            path,
            extension,
        }
    }

    /// Create a resource of a known type from a full path.
    ///
    /// Does not consult any registry: the type is given, not derived from
    /// the extension. A missing extension falls back to the container's own.
    pub fn create<T: Container + Default>(full_path: impl AsRef<Path>) -> Self {
        let parts = split_full_path(full_path.as_ref());
        let container = T::default();
        let extension = if parts.extension.is_empty() {
            container.extension()
        } else {
            parts.extension
        };

        Self::from_parts(
            Arc::new(container),
            TypeId::of::<T>(),
            parts.stem,
            parts.directory,
            extension,
        )
    }

    /// Create a resource of a known type from a directory and a file name
    /// (without extension).
    pub fn create_in<T: Container + Default>(
        directory: impl Into<PathBuf>,
        name: impl Into<String>,
    ) -> Self {
        ContainerRegistration::of::<T>().create_in(directory, name)
    }

    /// The container instance.
    pub fn container(&self) -> &dyn Container {
        self.container.as_ref()
    }

    /// Registry key of the container type.
    pub fn key(&self) -> &'static str {
        self.container.key()
    }

    /// Whether the container is of concrete type `T`.
    pub fn is<T: Container>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// File name without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Containing directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extension without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name with extension.
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.extension)
        }
    }

    /// Directory joined with the file name.
    pub fn full_path(&self) -> PathBuf {
        self.path.join(self.file_name())
    }

    /// Resource kinds the container holds.
    pub fn resource_kinds(&self) -> Vec<ResourceKind> {
        capability::resource_kinds(self)
    }

    /// Stream kinds the container carries.
    pub fn stream_kinds(&self) -> Vec<StreamKind> {
        capability::stream_kinds(self)
    }
}

impl Tagged for Resource {
    fn capability_tags(&self) -> Vec<CapabilityTag> {
        self.container.capability_tags()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} resource '{}'", self.key(), self.file_name())
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_temp_dir() -> PathBuf {
    std::env::temp_dir()
}

/// Directories used when creating resources that have no caller-chosen path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLocations {
    /// Where generated output resources are placed.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Where intermediate resources are placed.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,
}

impl Default for ResourceLocations {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            temp_dir: default_temp_dir(),
        }
    }
}

impl ResourceLocations {
    /// Locations with explicit directories.
    pub fn new(output_dir: impl Into<PathBuf>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            temp_dir: temp_dir.into(),
        }
    }

    /// A uniquely named resource of type `T` in the output directory.
    pub fn create_output<T: Container + Default>(&self) -> Resource {
        self.create_output_of(&ContainerRegistration::of::<T>())
    }

    /// A uniquely named resource of type `T` in the temp directory.
    pub fn create_temporary<T: Container + Default>(&self) -> Resource {
        self.create_temporary_of(&ContainerRegistration::of::<T>())
    }

    /// A uniquely named resource of a registered type in the output directory.
    pub fn create_output_of(&self, registration: &ContainerRegistration) -> Resource {
        registration.create_in(self.output_dir.clone(), unique_name())
    }

    /// A uniquely named resource of a registered type in the temp directory.
    pub fn create_temporary_of(&self, registration: &ContainerRegistration) -> Resource {
        registration.create_in(self.temp_dir.clone(), unique_name())
    }
}

fn unique_name() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
