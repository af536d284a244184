//! Batch assembly: render many specifications in one run
//!
//! Entries are processed in input order. A bad entry (unknown framework,
//! failed validation) is recorded against its index and never stops the
//! rest of the batch. Entries that share a subject and framework are merged
//! into one suite unless [`MergePolicy::Separate`] is requested.

use crate::error::{Error, Result};
use crate::registry::{registry, Registry};
use crate::render::{RenderOptions, RenderedSuite, Renderer};
use crate::spec::{FeatureFlags, SpecInput, TestSpecification};
use std::collections::HashMap;

/// Where an entry's specification comes from
#[derive(Debug, Clone)]
pub enum EntrySource {
    /// Already validated
    Spec(TestSpecification),
    /// Declarative input, validated when the batch runs
    Input(SpecInput),
}

/// One `(specification, framework)` pair
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub source: EntrySource,
    /// Framework identifier, resolved when the batch runs
    pub framework: String,
}

impl BatchEntry {
    pub fn new(spec: TestSpecification, framework: impl Into<String>) -> Self {
        Self {
            source: EntrySource::Spec(spec),
            framework: framework.into(),
        }
    }

    pub fn from_input(input: SpecInput, framework: impl Into<String>) -> Self {
        Self {
            source: EntrySource::Input(input),
            framework: framework.into(),
        }
    }

    /// Subject name, when the entry names one
    pub fn subject(&self) -> Option<String> {
        let subject = match &self.source {
            EntrySource::Spec(spec) => spec.subject(),
            EntrySource::Input(input) => input.class_name.trim(),
        };
        (!subject.is_empty()).then(|| subject.to_string())
    }
}

/// Ordered collection of entries submitted together
#[derive(Debug, Clone, Default)]
pub struct GenerationBatch {
    entries: Vec<BatchEntry>,
}

impl GenerationBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batch from declarative inputs; an input without its own `framework`
    /// uses `default_framework`
    pub fn from_inputs<I>(inputs: I, default_framework: &str) -> Self
    where
        I: IntoIterator<Item = SpecInput>,
    {
        let entries = inputs
            .into_iter()
            .map(|input| {
                let framework = input
                    .framework
                    .clone()
                    .unwrap_or_else(|| default_framework.to_string());
                BatchEntry::from_input(input, framework)
            })
            .collect();
        Self { entries }
    }

    pub fn push(&mut self, entry: BatchEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// How entries with the same subject and framework are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Merge into the first occurrence (members de-duplicated by name)
    #[default]
    Consolidate,
    /// One suite per entry
    Separate,
}

/// A rejected entry
#[derive(Debug)]
pub struct BatchFailure {
    /// 0-based position in the batch
    pub index: usize,
    pub subject: Option<String>,
    pub error: Error,
}

/// Result of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Rendered suites in order of first occurrence
    pub suites: Vec<RenderedSuite>,
    /// Failures in input order
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolves, validates, merges and renders a [`GenerationBatch`]
#[derive(Debug)]
pub struct BatchAssembler<'r> {
    registry: &'r Registry,
    options: RenderOptions,
    policy: MergePolicy,
    defaults: FeatureFlags,
}

impl Default for BatchAssembler<'static> {
    fn default() -> Self {
        Self::new(registry())
    }
}

impl<'r> BatchAssembler<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            options: RenderOptions::default(),
            policy: MergePolicy::default(),
            defaults: FeatureFlags::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Feature flags for declarative inputs that leave `include_*` unset
    pub fn with_defaults(mut self, defaults: FeatureFlags) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn run(&self, batch: &GenerationBatch) -> BatchReport {
        let mut pending: Vec<(&dyn Renderer, TestSpecification)> = Vec::new();
        let mut slots: HashMap<(String, String), usize> = HashMap::new();
        let mut failures = Vec::new();

        for (index, entry) in batch.entries().iter().enumerate() {
            let (renderer, spec) = match self.prepare(entry) {
                Ok(prepared) => prepared,
                Err(error) => {
                    failures.push(BatchFailure {
                        index,
                        subject: entry.subject(),
                        error,
                    });
                    continue;
                }
            };

            if self.policy == MergePolicy::Consolidate {
                let key = (
                    spec.subject().to_string(),
                    renderer.framework().id().to_string(),
                );
                if let Some(&slot) = slots.get(&key) {
                    let merged = pending[slot].1.merged_with(&spec);
                    pending[slot].1 = merged;
                    continue;
                }
                slots.insert(key, pending.len());
            }
            pending.push((renderer, spec));
        }

        let suites = pending
            .iter()
            .map(|(renderer, spec)| renderer.render(spec, &self.options))
            .collect();
        BatchReport { suites, failures }
    }

    /// Resolve and validate every entry without rendering
    pub fn validate(&self, batch: &GenerationBatch) -> Vec<BatchFailure> {
        batch
            .entries()
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                self.prepare(entry).err().map(|error| BatchFailure {
                    index,
                    subject: entry.subject(),
                    error,
                })
            })
            .collect()
    }

    /// Resolve the framework first, then validate the specification
    fn prepare(&self, entry: &BatchEntry) -> Result<(&'r dyn Renderer, TestSpecification)> {
        let renderer = self.registry.resolve(&entry.framework)?;
        let spec = match &entry.source {
            EntrySource::Spec(spec) => spec.clone(),
            EntrySource::Input(input) => {
                TestSpecification::parse_with_defaults(input, self.defaults)?
            }
        };
        Ok((renderer, spec))
    }
}
