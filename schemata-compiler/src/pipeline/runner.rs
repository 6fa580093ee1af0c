//! Pipeline orchestrator.

use std::{fmt, sync::Arc};

use schemata_blueprint::Blueprint;
use tracing::{debug, info_span};

use super::{
    Phase, PhaseInfo, Plugin,
    phases::{ConformancePhase, DefaultsPhase, ImportsPhase, LinkPhase, ValidatePhase},
};
use crate::{
    Error, PipelineError, Result,
    hydrate::{HydratePhase, Hydration},
};

/// The compilation pipeline orchestrator.
///
/// The pipeline owns an ordered list of uniquely named phases and a list of
/// plugins. Splicing operations return a new pipeline and never touch the
/// order of the phases they do not name.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .insert_before("hydrate", MyCustomPhase)?
///     .plugin(MyPlugin::new());
///
/// let blueprint = pipeline.run(blueprint)?;
/// ```
#[derive(Clone)]
pub struct Pipeline {
    phases: Vec<Arc<dyn Phase>>,
    plugins: Vec<Arc<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with the built-in phases.
    pub fn new() -> Self {
        Self {
            phases: vec![
                Arc::new(ImportsPhase),
                Arc::new(LinkPhase),
                Arc::new(ValidatePhase::new()),
                Arc::new(ConformancePhase),
                Arc::new(DefaultsPhase),
                Arc::new(HydratePhase::new(Hydration::new())),
            ],
            plugins: Vec::new(),
        }
    }

    /// Create a pipeline with no phases.
    pub fn empty() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after all others.
    pub fn append(mut self, phase: impl Phase + 'static) -> Result<Self> {
        self.ensure_unique(phase.name())?;
        self.phases.push(Arc::new(phase));
        Ok(self)
    }

    /// Insert a phase directly after `anchor`.
    ///
    /// # Errors
    ///
    /// - [`Error::AnchorNotFound`] if no phase is named `anchor`
    /// - [`Error::DuplicatePhase`] if the new phase's name is taken
    pub fn insert_after(&self, anchor: &str, phase: impl Phase + 'static) -> Result<Self> {
        self.insert_at(anchor, phase, 1)
    }

    /// Insert a phase directly before `anchor`.
    ///
    /// # Errors
    ///
    /// Same as [`Pipeline::insert_after`].
    pub fn insert_before(&self, anchor: &str, phase: impl Phase + 'static) -> Result<Self> {
        self.insert_at(anchor, phase, 0)
    }

    /// Swap the phase named `name` for another one.
    pub fn replace(&self, name: &str, phase: impl Phase + 'static) -> Result<Self> {
        let index = self.position(name).ok_or_else(|| Error::PhaseNotFound {
            name: name.to_string(),
        })?;
        if phase.name() != name {
            self.ensure_unique(phase.name())?;
        }

        let mut pipeline = self.clone();
        pipeline.phases[index] = Arc::new(phase);
        Ok(pipeline)
    }

    /// Drop the phase named `name`.
    pub fn remove(&self, name: &str) -> Result<Self> {
        let index = self.position(name).ok_or_else(|| Error::PhaseNotFound {
            name: name.to_string(),
        })?;

        let mut pipeline = self.clone();
        pipeline.phases.remove(index);
        Ok(pipeline)
    }

    /// Use `hydration` for the `hydrate` phase, appending one if missing.
    pub fn with_hydration(&self, hydration: Hydration) -> Self {
        let phase: Arc<dyn Phase> = Arc::new(HydratePhase::new(hydration));
        let mut pipeline = self.clone();
        match self.position(HydratePhase::NAME) {
            Some(index) => pipeline.phases[index] = phase,
            None => pipeline.phases.push(phase),
        }
        pipeline
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    /// Phase names in execution order.
    pub fn phase_names(&self) -> Vec<&str> {
        self.phases.iter().map(|p| p.name()).collect()
    }

    /// Get information about all phases in execution order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        self.phases.iter().map(|p| p.info()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Run every phase in order on `blueprint`.
    ///
    /// Plugin hooks are called before and after each phase.
    ///
    /// # Errors
    ///
    /// Stops at the first failing phase and returns all of its errors. A
    /// plugin error is attributed to the phase it was hooked around.
    pub fn run(&self, blueprint: Blueprint) -> Result<Blueprint, PipelineError> {
        let mut blueprint = blueprint;
        for phase in &self.phases {
            blueprint = self.run_phase(phase.as_ref(), blueprint)?;
        }
        Ok(blueprint)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(
        &self,
        phase: &dyn Phase,
        blueprint: Blueprint,
    ) -> Result<Blueprint, PipelineError> {
        let name = phase.name();
        let _span = info_span!("phase", name).entered();
        debug!(types = blueprint.type_count(), "starting phase");

        for plugin in &self.plugins {
            plugin
                .on_before_phase(name, &blueprint)
                .map_err(|err| plugin_error(name, plugin.as_ref(), &err))?;
        }

        let blueprint = phase
            .run(blueprint)
            .map_err(|errors| PipelineError::new(name, errors))?;

        for plugin in &self.plugins {
            plugin
                .on_after_phase(name, &blueprint)
                .map_err(|err| plugin_error(name, plugin.as_ref(), &err))?;
        }

        debug!(types = blueprint.type_count(), "finished phase");
        Ok(blueprint)
    }

    fn insert_at(&self, anchor: &str, phase: impl Phase + 'static, offset: usize) -> Result<Self> {
        let index = self.position(anchor).ok_or_else(|| Error::AnchorNotFound {
            anchor: anchor.to_string(),
            phase: phase.name().to_string(),
        })?;
        self.ensure_unique(phase.name())?;

        let mut pipeline = self.clone();
        pipeline.phases.insert(index + offset, Arc::new(phase));
        Ok(pipeline)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.phases.iter().position(|p| p.name() == name)
    }

    fn ensure_unique(&self, name: &str) -> Result<()> {
        if self.contains(name) {
            return Err(Error::DuplicatePhase {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

fn plugin_error(phase: &str, plugin: &dyn Plugin, err: &eyre::Report) -> PipelineError {
    PipelineError::new(
        phase,
        Error::Plugin {
            plugin: plugin.name().to_string(),
            message: err.to_string(),
        },
    )
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("phases", &self.phase_names())
            .field(
                "plugins",
                &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use schemata_blueprint::{FieldDefinition, ObjectType, SchemaDefinition, TypeRef};

    use super::*;
    use crate::pipeline::phase_fn;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _blueprint: &Blueprint) -> eyre::Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _blueprint: &Blueprint) -> eyre::Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingPlugin;

    impl Plugin for FailingPlugin {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn on_after_phase(&self, phase: &str, _blueprint: &Blueprint) -> eyre::Result<()> {
            if phase == "link" {
                eyre::bail!("refusing to continue");
            }
            Ok(())
        }
    }

    fn noop(name: &str) -> impl Phase + 'static {
        phase_fn(name, "Does nothing", Ok)
    }

    fn make_test_blueprint() -> Blueprint {
        Blueprint::new()
            .with_schema(SchemaDefinition::default().with_query("Query"))
            .add_type(
                ObjectType::new("Query")
                    .with_field(FieldDefinition::new("hello", TypeRef::named("String"))),
            )
            .unwrap()
    }

    #[test]
    fn test_builtin_phase_order() {
        assert_eq!(
            Pipeline::new().phase_names(),
            ["imports", "link", "validate", "conformance", "defaults", "hydrate"]
        );
        assert!(Pipeline::empty().is_empty());
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let bp = Pipeline::new().run(make_test_blueprint()).unwrap();
        assert!(bp.find_field("Query", "hello").is_some());
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        pipeline.run(make_test_blueprint()).unwrap();

        // 6 built-in phases = 6 before + 6 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 6);
        assert_eq!(after_count.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_plugin_error_aborts_at_phase() {
        let pipeline = Pipeline::new().plugin(FailingPlugin);
        let err = pipeline.run(make_test_blueprint()).unwrap_err();

        assert_eq!(err.phase, "link");
        assert_eq!(
            err.errors,
            [Error::Plugin {
                plugin: "failing".into(),
                message: "refusing to continue".into(),
            }]
        );
    }

    #[test]
    fn test_insert_after_keeps_order() {
        let pipeline = Pipeline::new();
        let extended = pipeline.insert_after("validate", noop("mod")).unwrap();

        assert_eq!(extended.len(), pipeline.len() + 1);
        assert_eq!(
            extended.phase_names(),
            ["imports", "link", "validate", "mod", "conformance", "defaults", "hydrate"]
        );
        // The original is untouched.
        assert!(!pipeline.contains("mod"));
    }

    #[test]
    fn test_insert_before() {
        let pipeline = Pipeline::new().insert_before("imports", noop("first")).unwrap();
        assert_eq!(pipeline.phase_names()[0], "first");
    }

    #[test]
    fn test_insert_missing_anchor() {
        let err = Pipeline::new().insert_after("nope", noop("mod")).unwrap_err();
        assert_eq!(
            err,
            Error::AnchorNotFound {
                anchor: "nope".into(),
                phase: "mod".into(),
            }
        );
    }

    #[test]
    fn test_insert_duplicate_name() {
        let err = Pipeline::new().insert_after("link", noop("validate")).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicatePhase {
                name: "validate".into()
            }
        );
    }

    #[test]
    fn test_replace_and_remove() {
        let pipeline = Pipeline::new().replace("validate", noop("validate")).unwrap();
        assert_eq!(pipeline.len(), 6);

        let pipeline = pipeline.remove("validate").unwrap();
        assert!(!pipeline.contains("validate"));

        assert!(matches!(
            pipeline.remove("validate"),
            Err(Error::PhaseNotFound { .. })
        ));
    }

    #[test]
    fn test_with_hydration_appends_when_missing() {
        let pipeline = Pipeline::new().remove("hydrate").unwrap();
        let pipeline = pipeline.with_hydration(Hydration::new());
        assert_eq!(pipeline.phase_names().last(), Some(&"hydrate"));
        assert_eq!(pipeline.len(), 6);
    }

    #[test]
    fn test_first_failing_phase_stops_run() {
        let (plugin, before_count, _) = CountingPlugin::new();
        let pipeline = Pipeline::empty()
            .append(phase_fn("fail", "Always fails", |_| {
                Err(vec![Error::custom("one"), Error::custom("two")].into())
            }))
            .unwrap()
            .append(noop("never"))
            .unwrap()
            .plugin(plugin);

        let err = pipeline.run(Blueprint::new()).unwrap_err();
        assert_eq!(err.phase, "fail");
        assert_eq!(err.errors.len(), 2);
        assert_eq!(before_count.load(Ordering::SeqCst), 1);
    }
}
