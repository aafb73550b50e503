//! Include/exclude resolution of setups into a [`ResolvedConfiguration`].

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use super::resolved::{ResolvedConfiguration, ResolvedDevice, StartupBlock};
use crate::domain::AppError;
use crate::domain::device::DeviceSpec;
use crate::domain::setup::{Setup, SetupGroup};
use crate::ports::{DeviceClassCatalog, SetupRegistry};

/// Setup that holds the basic system configuration.
pub const SYSTEM_SETUP: &str = "system";

/// Switches for a resolution run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Permit setups of the `special` group.
    pub allow_special: bool,
    /// Load the `system` setup first when it exists.
    pub autoload_system: bool,
}

/// Domain logic for resolving setups and their include graph.
pub struct SetupResolver;

impl SetupResolver {
    /// Resolve a single setup with default options.
    pub fn resolve<R, C>(
        name: &str,
        registry: &R,
        classes: &C,
    ) -> Result<ResolvedConfiguration, AppError>
    where
        R: SetupRegistry + ?Sized,
        C: DeviceClassCatalog + ?Sized,
    {
        Self::resolve_all(&[name], registry, classes, ResolveOptions::default())
    }

    /// Resolve several setups into one configuration.
    ///
    /// Includes are traversed depth first and merged dependencies first, so
    /// a setup overrides the devices of the setups it includes and later
    /// roots override earlier ones. Excludes are registered when a setup is
    /// entered, before its includes, so the requesting setup's excludes bind
    /// everything it pulls in.
    pub fn resolve_all<R, C, S>(
        names: &[S],
        registry: &R,
        classes: &C,
        options: ResolveOptions,
    ) -> Result<ResolvedConfiguration, AppError>
    where
        R: SetupRegistry + ?Sized,
        C: DeviceClassCatalog + ?Sized,
        S: AsRef<str>,
    {
        if names.is_empty() {
            return Err(AppError::config_error("No setup requested"));
        }
        for name in names {
            registry.lookup(name.as_ref(), None)?;
        }

        let mut walk = Walk::new(registry, classes, options);
        walk.config.roots = names.iter().map(|n| n.as_ref().to_string()).collect();

        let mut load_order: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        if options.autoload_system
            && registry.contains(SYSTEM_SETUP)
            && !load_order.contains(&SYSTEM_SETUP)
        {
            load_order.insert(0, SYSTEM_SETUP);
        }

        for name in load_order {
            let setup = registry.lookup(name, None)?;
            info!(setup = name, "loading setup ({})", setup.description());
            walk.visit(name, None)?;
        }

        walk.finish()
    }
}

struct Walk<'a, R: ?Sized, C: ?Sized> {
    registry: &'a R,
    classes: &'a C,
    options: ResolveOptions,
    /// Setups entered so far, finished or not.
    entered: BTreeSet<String>,
    /// Excluded setup mapped to the setup that excluded it first.
    excluded: BTreeMap<String, String>,
    /// Current include path, for cycle reports.
    stack: Vec<String>,
    config: ResolvedConfiguration,
}

impl<'a, R, C> Walk<'a, R, C>
where
    R: SetupRegistry + ?Sized,
    C: DeviceClassCatalog + ?Sized,
{
    fn new(registry: &'a R, classes: &'a C, options: ResolveOptions) -> Self {
        Self {
            registry,
            classes,
            options,
            entered: BTreeSet::new(),
            excluded: BTreeMap::new(),
            stack: Vec::new(),
            config: ResolvedConfiguration::default(),
        }
    }

    fn visit(&mut self, name: &str, included_by: Option<&str>) -> Result<(), AppError> {
        if self.stack.iter().any(|s| s == name) {
            let mut path = self.stack.clone();
            path.push(name.to_string());
            return Err(AppError::CyclicInclude(path.join(" -> ")));
        }
        if self.entered.contains(name) {
            return Ok(());
        }

        let registry = self.registry;
        let setup = registry.lookup(name, included_by)?;
        if included_by.is_some() {
            debug!(setup = name, "loading include setup ({})", setup.description());
        }
        self.check_loadable(setup)?;

        self.entered.insert(name.to_string());
        for exclude in &setup.excludes {
            self.excluded.entry(exclude.clone()).or_insert_with(|| name.to_string());
        }

        self.stack.push(name.to_string());
        for include in &setup.includes {
            self.visit(include, Some(name))?;
        }
        self.stack.pop();

        self.merge(setup)
    }

    fn check_loadable(&self, setup: &Setup) -> Result<(), AppError> {
        let name = setup.name.as_str();
        if let Some(by) = self.excluded.get(name) {
            return Err(AppError::Conflict {
                setup: name.to_string(),
                other: by.clone(),
                reason: format!("'{}' is excluded by setup '{}'", name, by),
            });
        }
        match setup.group {
            SetupGroup::Special if !self.options.allow_special => {
                return Err(AppError::SpecialSetup(name.to_string()));
            }
            SetupGroup::Configdata => return Err(AppError::DataOnlySetup(name.to_string())),
            _ => {}
        }
        if let Some(other) = setup.excludes.iter().find(|e| self.entered.contains(e.as_str())) {
            return Err(AppError::Conflict {
                setup: name.to_string(),
                other: other.clone(),
                reason: format!("'{}' excludes setup '{}' which is already loaded", name, other),
            });
        }
        if let Some((device, reason)) = setup.malformed.iter().next() {
            return Err(AppError::MalformedDeclaration {
                setup: name.to_string(),
                device: device.clone(),
                reason: reason.clone(),
            });
        }
        Ok(())
    }

    fn merge(&mut self, setup: &Setup) -> Result<(), AppError> {
        let name = setup.name.as_str();

        for module in &setup.modules {
            if !self.config.modules.contains(module) {
                self.config.modules.push(module.clone());
            }
        }

        for (device, declaration) in &setup.devices {
            let class = self.classes.get(&declaration.class);
            let spec = DeviceSpec::classify(declaration, class).map_err(|reason| {
                AppError::MalformedDeclaration {
                    setup: name.to_string(),
                    device: device.clone(),
                    reason,
                }
            })?;
            let references =
                class.map(|c| c.device_references(&declaration.params)).unwrap_or_default();
            let resolved = ResolvedDevice {
                setup: name.to_string(),
                declaration: declaration.clone(),
                spec,
                references,
            };
            if let Some(previous) = self.config.devices.insert(device.clone(), resolved) {
                debug!(
                    device = %device,
                    "setup '{}' overrides the declaration from '{}'",
                    name,
                    previous.setup
                );
            }
        }

        self.config.sysconfig.merge(&setup.sysconfig);
        if !setup.startupcode.trim().is_empty() {
            self.config.startup.push(StartupBlock {
                setup: name.to_string(),
                code: setup.startupcode.clone(),
            });
        }
        self.config.aliases.add_setup(name, &setup.alias_config);
        self.config.loaded.push(name.to_string());
        Ok(())
    }

    fn finish(mut self) -> Result<ResolvedConfiguration, AppError> {
        self.config.aliases.sort();
        self.config.sysconfig.validate()?;
        for reference in self.config.unresolved_references() {
            warn!(
                device = %reference.source,
                "parameter '{}' refers to device '{}' which is not configured",
                reference.param,
                reference.target
            );
        }
        Ok(self.config)
    }
}
