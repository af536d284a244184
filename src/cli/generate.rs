//! Generate command: inline flags or spec file in, suites out

use super::util::{split_methods, OutputTarget};
use crate::Cli;
use suitegen::*;

pub fn cmd_generate(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let settings = config.merge(&overrides(cli)?);
    tracing::debug!(?settings, "effective settings");

    let inputs = collect_inputs(cli)?;
    tracing::info!(specs = inputs.len(), framework = %settings.framework, "loaded specs");

    let batch = GenerationBatch::from_inputs(inputs, settings.framework.id());
    let assembler = BatchAssembler::default()
        .with_options(settings.render_options())
        .with_policy(settings.merge_policy)
        .with_defaults(settings.features);

    if cli.check {
        let failures = assembler.validate(&batch);
        if failures.is_empty() {
            println!("✓ {} spec(s) valid", batch.len());
        }
        return finish(&failures, batch.len());
    }

    let report = assembler.run(&batch);
    let target = OutputTarget::resolve(settings.output.as_deref(), cli.filename.as_deref());

    if cli.dry_run && target != OutputTarget::Stdout {
        for suite in &report.suites {
            if let Some(path) = target.path_for(suite) {
                eprintln!("Would write: {}", path.display());
            }
        }
    } else {
        target.emit(&report.suites)?;
    }

    finish(&report.failures, batch.len())
}

fn load_config(cli: &Cli) -> Result<ProjectConfig> {
    if let Some(path) = &cli.config {
        return ProjectConfig::load(path);
    }
    let cwd = std::env::current_dir().map_err(Error::Io)?;
    Ok(ProjectConfig::load_from_dir(&cwd)?.unwrap_or_default())
}

fn overrides(cli: &Cli) -> Result<Overrides> {
    let framework = cli
        .framework
        .as_deref()
        .map(str::parse::<Framework>)
        .transpose()?;
    Ok(Overrides {
        framework,
        output: cli.output.clone(),
        pytest_layout: cli.pytest_functions.then_some(PytestLayout::Functions),
        timestamp: cli.timestamp.then_some(true),
        merge: cli.separate.then_some(false),
        features: FeatureFlags {
            fixtures: cli.fixtures,
            mocks: cli.mocks,
            parametrize: cli.parametrize,
        },
    })
}

/// Spec inputs from `--spec`, or one inline spec from `--name`/`--methods`
fn collect_inputs(cli: &Cli) -> Result<Vec<SpecInput>> {
    if let Some(path) = &cli.spec {
        let document = SpecDocument::from_path(path)?;
        if document.specs.is_empty() {
            return Err(Error::SpecParse(format!(
                "{}: no specifications found",
                path.display()
            )));
        }
        return Ok(document.specs);
    }

    let name = cli
        .name
        .as_deref()
        .ok_or("Either --spec or --name is required")?;
    let mut input = SpecInput::from_methods(name, split_methods(&cli.methods));
    if let Some(kind) = &cli.test_type {
        input.test_type = kind.parse()?;
    }
    input.module_path = cli.module.clone();
    Ok(vec![input])
}

/// Report per-entry failures; any failure makes the run fail
fn finish(failures: &[BatchFailure], total: usize) -> Result<()> {
    if failures.is_empty() {
        return Ok(());
    }
    for failure in failures {
        match &failure.subject {
            Some(subject) => eprintln!(
                "✗ entry {} ({}): {}",
                failure.index + 1,
                subject,
                failure.error
            ),
            None => eprintln!("✗ entry {}: {}", failure.index + 1, failure.error),
        }
    }
    Err(Error::Other(format!(
        "{} of {} spec(s) failed",
        failures.len(),
        total
    )))
}
