//! Schema providers - compiled blueprints on demand.
//!
//! [`DirectProvider`] loads and compiles on every call. [`CachedProvider`]
//! wraps one and guarantees a single compilation per [`SchemaIdentity`]:
//! concurrent callers for the same identity wait for the first one and all
//! receive the same `Arc<Blueprint>`.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use schemata_blueprint::Blueprint;
use tracing::{debug, info};

use crate::{Pipeline, ProviderError};

/// Identifies one schema, e.g. a module path or tenant name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaIdentity(String);

impl SchemaIdentity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SchemaIdentity {
    fn from(identity: &str) -> Self {
        Self::new(identity)
    }
}

impl From<String> for SchemaIdentity {
    fn from(identity: String) -> Self {
        Self(identity)
    }
}

/// Hands out compiled blueprints.
pub trait SchemaProvider: Send + Sync {
    /// The compiled blueprint for `identity`.
    ///
    /// # Errors
    ///
    /// Fails if the schema cannot be loaded or does not compile.
    fn get_compiled_blueprint(
        &self,
        identity: &SchemaIdentity,
    ) -> Result<Arc<Blueprint>, ProviderError>;
}

/// Loads the uncompiled blueprint for an identity.
pub trait SchemaSource: Send + Sync {
    fn load(&self, identity: &SchemaIdentity) -> Result<Blueprint, ProviderError>;
}

impl<F> SchemaSource for F
where
    F: Fn(&SchemaIdentity) -> Result<Blueprint, ProviderError> + Send + Sync,
{
    fn load(&self, identity: &SchemaIdentity) -> Result<Blueprint, ProviderError> {
        self(identity)
    }
}

/// Compiles on every call.
#[derive(Clone)]
pub struct DirectProvider {
    source: Arc<dyn SchemaSource>,
    pipeline: Pipeline,
}

impl DirectProvider {
    pub fn new(source: impl SchemaSource + 'static, pipeline: Pipeline) -> Self {
        Self {
            source: Arc::new(source),
            pipeline,
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

impl SchemaProvider for DirectProvider {
    fn get_compiled_blueprint(
        &self,
        identity: &SchemaIdentity,
    ) -> Result<Arc<Blueprint>, ProviderError> {
        let blueprint = self.source.load(identity)?;
        info!(%identity, "compiling schema");
        let compiled = self.pipeline.run(blueprint)?;
        Ok(Arc::new(compiled))
    }
}

impl fmt::Debug for DirectProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectProvider")
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

/// Storage for compiled blueprints behind a [`CachedProvider`].
pub trait BlueprintStore: Send + Sync {
    /// A previously stored blueprint, if any.
    fn get(&self, identity: &SchemaIdentity) -> Result<Option<Arc<Blueprint>>, ProviderError>;

    /// Store a compiled blueprint.
    fn put(
        &self,
        identity: &SchemaIdentity,
        blueprint: Arc<Blueprint>,
    ) -> Result<(), ProviderError>;
}

/// In-process [`BlueprintStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<SchemaIdentity, Arc<Blueprint>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlueprintStore for MemoryStore {
    fn get(&self, identity: &SchemaIdentity) -> Result<Option<Arc<Blueprint>>, ProviderError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(identity).cloned())
    }

    fn put(
        &self,
        identity: &SchemaIdentity,
        blueprint: Arc<Blueprint>,
    ) -> Result<(), ProviderError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(identity.clone(), blueprint);
        Ok(())
    }
}

type Cell = Arc<OnceLock<Result<Arc<Blueprint>, ProviderError>>>;

/// Single-flight cache in front of a [`DirectProvider`].
///
/// The in-flight map lock is only held to fetch or insert a cell, never while
/// compiling. A failed compilation is shared with everyone already waiting on
/// it, then evicted so the next call retries.
pub struct CachedProvider {
    compiler: DirectProvider,
    store: Arc<dyn BlueprintStore>,
    inflight: Mutex<HashMap<SchemaIdentity, Cell>>,
}

impl CachedProvider {
    pub fn new(compiler: DirectProvider, store: impl BlueprintStore + 'static) -> Self {
        Self::with_store(compiler, Arc::new(store))
    }

    /// Use a store shared with other providers.
    pub fn with_store(compiler: DirectProvider, store: Arc<dyn BlueprintStore>) -> Self {
        Self {
            compiler,
            store,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Cache in a fresh [`MemoryStore`].
    pub fn in_memory(compiler: DirectProvider) -> Self {
        Self::new(compiler, MemoryStore::new())
    }

    fn cell(&self, identity: &SchemaIdentity) -> Cell {
        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(inflight.entry(identity.clone()).or_default())
    }

    fn evict(&self, identity: &SchemaIdentity, cell: &Cell) {
        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        if inflight
            .get(identity)
            .is_some_and(|current| Arc::ptr_eq(current, cell))
        {
            inflight.remove(identity);
        }
    }

    fn load(&self, identity: &SchemaIdentity) -> Result<Arc<Blueprint>, ProviderError> {
        if let Some(blueprint) = self.store.get(identity)? {
            debug!(%identity, "blueprint store hit");
            return Ok(blueprint);
        }

        debug!(%identity, "blueprint store miss");
        let blueprint = self.compiler.get_compiled_blueprint(identity)?;
        self.store.put(identity, Arc::clone(&blueprint))?;
        Ok(blueprint)
    }
}

impl SchemaProvider for CachedProvider {
    fn get_compiled_blueprint(
        &self,
        identity: &SchemaIdentity,
    ) -> Result<Arc<Blueprint>, ProviderError> {
        let cell = self.cell(identity);
        let result = cell.get_or_init(|| self.load(identity)).clone();
        if result.is_err() {
            self.evict(identity, &cell);
        }
        result
    }
}

impl fmt::Debug for CachedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedProvider")
            .field("compiler", &self.compiler)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use schemata_blueprint::{FieldDefinition, ObjectType, SchemaDefinition, TypeRef};

    use super::*;

    fn counting_source(
        calls: Arc<AtomicUsize>,
    ) -> impl Fn(&SchemaIdentity) -> Result<Blueprint, ProviderError> + Send + Sync {
        move |identity: &SchemaIdentity| {
            calls.fetch_add(1, Ordering::SeqCst);
            if identity.as_str() == "missing" {
                return Err(ProviderError::Source {
                    identity: identity.to_string(),
                    message: "not found".into(),
                });
            }
            Ok(Blueprint::new()
                .with_schema(SchemaDefinition::default().with_query("Query"))
                .add_type(
                    ObjectType::new("Query")
                        .with_field(FieldDefinition::new("hello", TypeRef::named("String"))),
                )
                .unwrap())
        }
    }

    struct BrokenStore;

    impl BlueprintStore for BrokenStore {
        fn get(&self, identity: &SchemaIdentity) -> Result<Option<Arc<Blueprint>>, ProviderError> {
            Err(ProviderError::Store {
                identity: identity.to_string(),
                message: "disk on fire".into(),
            })
        }

        fn put(&self, _: &SchemaIdentity, _: Arc<Blueprint>) -> Result<(), ProviderError> {
            Ok(())
        }
    }

    #[test]
    fn test_direct_provider_compiles_every_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = DirectProvider::new(counting_source(calls.clone()), Pipeline::new());
        let id = SchemaIdentity::from("app");

        let first = provider.get_compiled_blueprint(&id).unwrap();
        let second = provider.get_compiled_blueprint(&id).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_cached_provider_compiles_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = Arc::new(MemoryStore::new());
        let provider = CachedProvider::with_store(
            DirectProvider::new(counting_source(calls.clone()), Pipeline::new()),
            store.clone(),
        );
        let id = SchemaIdentity::from("app");

        let first = provider.get_compiled_blueprint(&id).unwrap();
        let second = provider.get_compiled_blueprint(&id).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_hit_skips_compilation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = Arc::new(MemoryStore::new());
        let id = SchemaIdentity::from("app");
        store.put(&id, Arc::new(Blueprint::new())).unwrap();

        let provider = CachedProvider::with_store(
            DirectProvider::new(counting_source(calls.clone()), Pipeline::new()),
            store,
        );

        let blueprint = provider.get_compiled_blueprint(&id).unwrap();
        assert_eq!(*blueprint, Blueprint::new());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failures_are_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = CachedProvider::in_memory(DirectProvider::new(
            counting_source(calls.clone()),
            Pipeline::new(),
        ));
        let id = SchemaIdentity::from("missing");

        assert!(matches!(
            provider.get_compiled_blueprint(&id),
            Err(ProviderError::Source { .. })
        ));
        assert!(provider.get_compiled_blueprint(&id).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_compile_errors_surface() {
        let source = |_: &SchemaIdentity| -> Result<Blueprint, ProviderError> {
            Ok(Blueprint::new())
        };
        let provider = CachedProvider::in_memory(DirectProvider::new(source, Pipeline::new()));

        let err = provider
            .get_compiled_blueprint(&SchemaIdentity::from("empty"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "phase `link` failed: schema has no query root type"
        );
    }

    #[test]
    fn test_store_errors_surface() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = CachedProvider::new(
            DirectProvider::new(counting_source(calls.clone()), Pipeline::new()),
            BrokenStore,
        );

        let err = provider
            .get_compiled_blueprint(&SchemaIdentity::from("app"))
            .unwrap_err();
        assert!(matches!(err, ProviderError::Store { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
