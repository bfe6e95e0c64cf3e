//! Registry mapping file extensions to container types.
//!
//! Container types are registered explicitly, each as a key plus a
//! zero-argument factory. The lookup catalog is built from those registrations
//! lazily, exactly once, on first use; concurrent first callers wait for that
//! single population and never see a partial catalog. After population every
//! lookup is a plain read.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use super::containers::builtin_registrations;
use super::paths::{extension_key, split_full_path};
use super::{Container, Resource};
use crate::capability;
use crate::{Error, Result};

/// A container type known to a registry: its key and how to build one.
#[derive(Debug, Clone, Copy)]
pub struct ContainerRegistration {
    key: &'static str,
    type_id: TypeId,
    factory: fn() -> Arc<dyn Container>,
}

impl ContainerRegistration {
    /// Registration for the container type `T`.
    pub fn of<T: Container + Default>() -> Self {
        Self {
            key: T::default().key(),
            type_id: TypeId::of::<T>(),
            factory: instantiate_default::<T>,
        }
    }

    /// The type's key, e.g. `"MP4"`.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Build a fresh instance of the registered type.
    pub fn instantiate(&self) -> Arc<dyn Container> {
        (self.factory)()
    }

    /// A resource of the registered type named `name` in `directory`, with
    /// the container's own extension.
    pub fn create_in(&self, directory: impl Into<PathBuf>, name: impl Into<String>) -> Resource {
        let container = self.instantiate();
        let extension = container.extension();
        Resource::from_parts(container, self.type_id, name.into(), directory.into(), extension)
    }
}

fn instantiate_default<T: Container + Default>() -> Arc<dyn Container> {
    Arc::new(T::default())
}

type RegistrationSource = Box<dyn Fn() -> Vec<ContainerRegistration> + Send + Sync>;

/// Catalog built once from a registry's source.
struct Catalog {
    entries: HashMap<String, ContainerRegistration>,
}

impl Catalog {
    fn populate(registrations: Vec<ContainerRegistration>) -> Self {
        let mut entries = HashMap::with_capacity(registrations.len());

        for registration in registrations {
            if !capability::is_container(registration.instantiate().as_ref()) {
                tracing::warn!(
                    "Skipping {}: type does not declare the container capability",
                    registration.key
                );
                continue;
            }

            let key = extension_key(registration.key);
            if entries.contains_key(&key) {
                tracing::warn!("Duplicate container registration for {}; keeping the first", key);
                continue;
            }
            entries.insert(key, registration);
        }

        tracing::debug!("Populated container registry with {} types", entries.len());
        Self { entries }
    }
}

/// Registry of container types, keyed case-insensitively by extension.
///
/// # Example
///
/// ```
/// use ffcompose_core::resource::containers::{Mov, Mp4};
/// use ffcompose_core::resource::ContainerRegistry;
///
/// let registry = ContainerRegistry::builder()
///     .register::<Mp4>()
///     .register::<Mov>()
///     .build();
///
/// let resource = registry.resolve("/tmp/clip.MP4")?;
/// assert!(resource.is::<Mp4>());
/// assert_eq!(resource.name(), "clip");
/// # Ok::<(), ffcompose_core::Error>(())
/// ```
pub struct ContainerRegistry {
    source: RegistrationSource,
    catalog: OnceLock<Catalog>,
}

impl ContainerRegistry {
    /// Start building a registry from explicit registrations.
    pub fn builder() -> ContainerRegistryBuilder {
        ContainerRegistryBuilder::default()
    }

    /// A registry whose registrations are produced by `source` on first use.
    ///
    /// `source` runs at most once per registry.
    pub fn with_source<F>(source: F) -> Self
    where
        F: Fn() -> Vec<ContainerRegistration> + Send + Sync + 'static,
    {
        Self {
            source: Box::new(source),
            catalog: OnceLock::new(),
        }
    }

    /// A registry of every built-in container type.
    pub fn builtin() -> Self {
        Self::with_source(builtin_registrations)
    }

    fn catalog(&self) -> &Catalog {
        self.catalog
            .get_or_init(|| Catalog::populate((self.source)()))
    }

    /// Whether the catalog has been built yet.
    pub fn is_populated(&self) -> bool {
        self.catalog.get().is_some()
    }

    /// Resolve a full path into a resource whose type matches its extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownResourceType`] if no registered type matches
    /// the extension (or the path has none).
    pub fn resolve(&self, full_path: impl AsRef<Path>) -> Result<Resource> {
        let full_path = full_path.as_ref();
        let parts = split_full_path(full_path);

        let registration = self
            .lookup(&parts.extension)
            .ok_or_else(|| Error::unknown_resource_type(full_path, parts.extension.as_str()))?;

        tracing::debug!("Resolved {:?} as {}", full_path, registration.key);

        Ok(Resource::from_parts(
            registration.instantiate(),
            registration.type_id,
            parts.stem,
            parts.directory,
            parts.extension,
        ))
    }

    /// Find the registration for an extension, ignoring case.
    pub fn lookup(&self, extension: &str) -> Option<&ContainerRegistration> {
        if extension.is_empty() {
            return None;
        }
        self.catalog().entries.get(&extension_key(extension))
    }

    /// Whether a type is registered for `extension`.
    pub fn contains(&self, extension: &str) -> bool {
        self.lookup(extension).is_some()
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self.catalog().entries.values().map(|r| r.key).collect();
        keys.sort_unstable();
        keys
    }

    /// Registrations, sorted by key.
    pub fn registrations(&self) -> Vec<ContainerRegistration> {
        let mut registrations: Vec<_> = self.catalog().entries.values().copied().collect();
        registrations.sort_unstable_by_key(|r| r.key);
        registrations
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.catalog().entries.len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ContainerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for ContainerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerRegistry")
            .field("populated", &self.is_populated())
            .finish_non_exhaustive()
    }
}

/// Collects registrations for a [`ContainerRegistry`].
#[derive(Debug, Default)]
pub struct ContainerRegistryBuilder {
    registrations: Vec<ContainerRegistration>,
}

impl ContainerRegistryBuilder {
    /// Register container type `T`.
    pub fn register<T: Container + Default>(mut self) -> Self {
        self.registrations.push(ContainerRegistration::of::<T>());
        self
    }

    /// Add a prepared registration.
    pub fn registration(mut self, registration: ContainerRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Register every built-in container type.
    pub fn with_builtins(mut self) -> Self {
        self.registrations.extend(builtin_registrations());
        self
    }

    /// Finish the registry. The catalog is still built lazily.
    pub fn build(self) -> ContainerRegistry {
        let registrations = self.registrations;
        ContainerRegistry::with_source(move || registrations.clone())
    }
}

/// Process-wide registry of the built-in container types.
///
/// For callers that do not own a registry; components that can take one by
/// reference should.
pub fn builtin_registry() -> &'static ContainerRegistry {
    static REGISTRY: OnceLock<ContainerRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ContainerRegistry::builtin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{CapabilityTag, ResourceKind, Tagged};
    use crate::resource::containers::{Mkv, Mov, Mp3, Mp4};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct NotAContainer;

    impl Tagged for NotAContainer {
        fn capability_tags(&self) -> Vec<CapabilityTag> {
            vec![CapabilityTag::Resource(ResourceKind::Video)]
        }
    }

    impl Container for NotAContainer {
        fn key(&self) -> &'static str {
            "BOGUS"
        }
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let registry = ContainerRegistry::builder().register::<Mp4>().build();

        for path in ["/tmp/a.mp4", "/tmp/a.Mp4", "/tmp/a.MP4"] {
            let resource = registry.resolve(path).unwrap();
            assert!(resource.is::<Mp4>(), "{path}");
        }
    }

    #[test]
    fn unknown_extension_fails() {
        let registry = ContainerRegistry::builder().register::<Mp4>().build();
        let err = registry.resolve("/tmp/clip.xyz").unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownResourceType { ref extension, .. } if extension == "xyz"
        ));
    }

    #[test]
    fn missing_extension_fails() {
        let registry = ContainerRegistry::builtin();
        assert!(matches!(
            registry.resolve("/tmp/clip"),
            Err(Error::UnknownResourceType { .. })
        ));
    }

    #[test]
    fn population_is_lazy() {
        let registry = ContainerRegistry::builder().register::<Mkv>().build();
        assert!(!registry.is_populated());
        assert!(registry.contains("mkv"));
        assert!(registry.is_populated());
    }

    #[test]
    fn source_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = ContainerRegistry::with_source(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            vec![ContainerRegistration::of::<Mp3>()]
        });

        registry.resolve("/a.mp3").unwrap();
        registry.resolve("/b.MP3").unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn duplicate_registrations_keep_first() {
        let registry = ContainerRegistry::builder()
            .register::<Mov>()
            .register::<Mov>()
            .register::<Mp4>()
            .build();
        assert_eq!(registry.keys(), vec!["MOV", "MP4"]);
    }

    #[test]
    fn types_without_container_tag_are_skipped() {
        let registry = ContainerRegistry::builder()
            .register::<NotAContainer>()
            .register::<Mp4>()
            .build();
        assert!(!registry.contains("bogus"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registration_creates_named_resource() {
        let registry = ContainerRegistry::builtin();
        let resource = registry.lookup("MKV").unwrap().create_in("/renders", "take2");
        assert!(resource.is::<Mkv>());
        assert_eq!(resource.full_path(), Path::new("/renders/take2.mkv"));
    }

    #[test]
    fn builtin_registry_is_shared() {
        let a = builtin_registry() as *const ContainerRegistry;
        let b = builtin_registry() as *const ContainerRegistry;
        assert_eq!(a, b);
        assert!(builtin_registry().contains("webm"));
    }
}
