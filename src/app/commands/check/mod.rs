mod collection_rules;
mod device_rules;
mod diagnostics;
mod setup_rules;

use crate::app::AppContext;
use crate::ports::{DeviceClassCatalog, SetupRegistry};

pub use diagnostics::{Diagnostic, Diagnostics, Severity};

#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Treat warnings as failures.
    pub strict: bool,
}

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub exit_code: i32,
}

/// Run every check without printing anything.
pub fn collect<R, C>(ctx: &AppContext<R, C>) -> Diagnostics
where
    R: SetupRegistry,
    C: DeviceClassCatalog,
{
    let registry = ctx.setups();
    let mut diagnostics = Diagnostics::default();

    collection_rules::unreadable_checks(registry, &mut diagnostics);
    for setup in registry.setups() {
        setup_rules::setup_checks(setup, registry, &mut diagnostics);
        device_rules::device_checks(setup, ctx.classes(), &mut diagnostics);
    }
    collection_rules::duplicate_device_checks(registry, &mut diagnostics);
    collection_rules::resolution_checks(registry, ctx.classes(), &mut diagnostics);

    diagnostics
}

/// Check all setups, report findings on stderr and compute the exit code.
pub fn execute<R, C>(ctx: &AppContext<R, C>, options: CheckOptions) -> CheckOutcome
where
    R: SetupRegistry,
    C: DeviceClassCatalog,
{
    let diagnostics = collect(ctx);
    diagnostics.emit();

    let errors = diagnostics.error_count();
    let warnings = diagnostics.warning_count();
    let exit_code = exit_code(errors, warnings, options.strict);

    if errors == 0 && warnings == 0 {
        println!("All checks passed.");
    } else if errors == 0 && !options.strict {
        eprintln!("Check completed with {} warning(s).", warnings);
    } else {
        eprintln!("Check failed: {} error(s), {} warning(s) found.", errors, warnings);
    }

    CheckOutcome {
        errors: diagnostics.errors().to_vec(),
        warnings: diagnostics.warnings().to_vec(),
        exit_code,
    }
}

fn exit_code(errors: usize, warnings: usize, strict: bool) -> i32 {
    if errors > 0 {
        1
    } else if warnings > 0 && strict {
        2
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::setup::{Setup, SetupGroup};
    use crate::testing::{MemoryClassCatalog, MemorySetupRegistry, SetupBuilder};

    fn context(setups: Vec<Setup>) -> AppContext<MemorySetupRegistry, MemoryClassCatalog> {
        AppContext::new(MemorySetupRegistry::new(setups), MemoryClassCatalog::default())
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exit_code(0, 0, true), 0);
        assert_eq!(exit_code(0, 3, false), 0);
        assert_eq!(exit_code(0, 3, true), 2);
        assert_eq!(exit_code(1, 3, true), 1);
    }

    #[test]
    fn clean_catalog_passes_strict() {
        let ctx = context(vec![
            SetupBuilder::new("system")
                .group(SetupGroup::Lowlevel)
                .description("system setup")
                .build(),
            SetupBuilder::new("toftof").description("TOFTOF").include("system").build(),
        ]);
        let outcome = execute(&ctx, CheckOptions { strict: true });
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
        assert_eq!(outcome.exit_code, 0);
    }

    #[test]
    fn warnings_fail_only_in_strict_mode() {
        let setups = || {
            vec![SetupBuilder::new("cryo").description("Cryostat").exclude("nothing").build()]
        };
        assert_eq!(execute(&context(setups()), CheckOptions::default()).exit_code, 0);
        assert_eq!(execute(&context(setups()), CheckOptions { strict: true }).exit_code, 2);
    }

    #[test]
    fn errors_set_exit_code_one() {
        let ctx = context(vec![SetupBuilder::new("cryo").include("missing").build()]);
        let outcome = execute(&ctx, CheckOptions::default());
        assert_eq!(outcome.exit_code, 1);
        // missing description, unknown include, resolution failure
        assert_eq!(outcome.errors.len(), 3);
        assert!(outcome.errors.iter().all(|d| d.severity == Severity::Error));
    }
}
