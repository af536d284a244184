// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # suitegen: test suite scaffolding from specifications
//!
//! A specification names a subject under test and the members to cover.
//! From that one spec, suitegen renders a ready-to-edit test suite for
//! pytest, unittest, Jest or JUnit 5.
//!
//! ## Quick Start
//!
//! ```rust
//! use suitegen::{render, Framework, Member, RenderOptions, TestSpecification};
//!
//! let spec = TestSpecification::builder("Calculator")
//!     .member(Member::new("add").with_body_line("assert add(2, 3) == 5"))
//!     .methods(["subtract"])
//!     .build()?;
//!
//! let suite = render(&spec, Framework::Pytest, &RenderOptions::default());
//! assert_eq!(suite.file_name, "test_calculator.py");
//! assert!(suite.source.contains("def test_add(self):"));
//! # Ok::<(), suitegen::Error>(())
//! ```
//!
//! ## Spec Format
//!
//! Spec files are JSON or YAML, holding one spec or an array of them:
//!
//! ```json
//! {
//!   "class_name": "Calculator",
//!   "test_cases": [
//!     {"name": "add", "assertions": ["assert add(2,3)==5"]},
//!     "subtract"
//!   ],
//!   "include_parametrize": true
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! spec file / CLI flags / builder
//!        │
//!        ▼
//! TestSpecification ──► Registry::resolve(id) ──► dyn Renderer
//!        │                                             │
//!        └──────────────► BatchAssembler ◄─────────────┘
//!                               │
//!                               ▼
//!                         RenderedSuite ──► sink::persist ──► file
//! ```
//!
//! Everything up to [`RenderedSuite`] is pure. Only the sink and the config
//! loader touch the filesystem.

pub mod batch;
pub mod config;
pub mod error;
pub mod framework;
pub mod registry;
pub mod render;
pub mod sink;
pub mod spec;
pub mod util;

// Re-exports
pub use batch::{
    BatchAssembler, BatchEntry, BatchFailure, BatchReport, EntrySource, GenerationBatch,
    MergePolicy,
};
pub use config::{DefaultsConfig, Overrides, ProjectConfig, Settings, CONFIG_FILE};
pub use error::{Error, Result};
pub use framework::Framework;
pub use registry::{registry, resolve, Registry};
pub use render::{render, PytestLayout, RenderOptions, RenderedSuite, Renderer};
pub use sink::{persist, persist_as};
pub use spec::{
    CaseInput, FeatureFlags, Member, SpecBuilder, SpecDocument, SpecInput, TestKind,
    TestSpecification,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
