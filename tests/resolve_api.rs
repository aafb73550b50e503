mod common;

use std::collections::BTreeSet;

use common::{TestContext, common_setups, toftof_setups};
use labsetup::domain::ParamValue;
use labsetup::domain::device::{Capability, DeviceSpec, Moveable, Switchable};
use labsetup::ports::SetupRegistry;
use labsetup::{AppError, ResolveOptions, ResolvedConfiguration, load_context, resolve_setups};

const TOFTOF_INCLUDES: [&str; 11] = [
    "detector",
    "chopper",
    "vacuum",
    "voltage",
    "safety",
    "reactor",
    "table",
    "slit",
    "collimator",
    "rc",
    "samplememograph",
];

fn resolve(names: &[&str]) -> Result<ResolvedConfiguration, AppError> {
    resolve_setups(&[toftof_setups()], names, ResolveOptions::default())
}

#[test]
fn toftof_resolves_to_union_of_included_devices() {
    let ctx = load_context(&[toftof_setups()]).unwrap();
    let config = resolve(&["toftof"]).unwrap();

    // every device declared in toftof's include closure
    let mut expected = BTreeSet::new();
    let mut pending: Vec<String> = TOFTOF_INCLUDES.iter().map(|s| s.to_string()).collect();
    let mut seen = BTreeSet::new();
    while let Some(name) = pending.pop() {
        if !seen.insert(name.clone()) {
            continue;
        }
        let setup = ctx.setups().lookup(&name, None).unwrap();
        expected.extend(setup.devices.keys().cloned());
        pending.extend(setup.includes.iter().cloned());
    }

    let actual: BTreeSet<String> = config.devices.keys().cloned().collect();
    assert_eq!(actual, expected);
    assert!(!actual.contains("tisane_fg"));
    assert!(!actual.contains("tisane_delay"));
    assert!(!config.is_loaded("tisane"));
}

#[test]
fn toftof_load_order_and_startup_code() {
    let config = resolve(&["toftof"]).unwrap();

    assert_eq!(config.roots, ["toftof"]);
    assert_eq!(config.loaded.last().map(String::as_str), Some("toftof"));
    assert_eq!(&config.loaded[..2], ["notifiers", "system"]);
    let position = |name: &str| config.loaded.iter().position(|s| s == name).unwrap();
    assert!(position("tofcounter") < position("detector"));
    assert!(position("motorbus") < position("table"));

    assert_eq!(config.startup_code(), "SetDetectors(det)\nprintinfo('TOFTOF ready')");
    assert_eq!(config.modules, ["nicos_mlz.toftof.commands"]);
}

#[test]
fn toftof_sysconfig_and_typed_devices() {
    let config = resolve(&["toftof"]).unwrap();

    assert_eq!(config.sysconfig.cache.as_deref(), Some("tofhw.toftof.frm2.tum.de"));
    assert_eq!(config.sysconfig.experiment.as_deref(), Some("Exp"));
    assert_eq!(config.sysconfig.datasinks.len(), 3);
    assert!(config.unresolved_references().is_empty());

    let gx = config.device("gx").unwrap();
    assert_eq!(gx.setup, "table");
    let moveable = gx.spec.as_moveable().unwrap();
    assert_eq!(moveable.user_limits().map(|l| (l.min, l.max)), Some((-15.0, 15.0)));

    let ngc = config.device("ngc").unwrap();
    assert_eq!(ngc.spec.capability(), Some(Capability::Switchable));
    assert_eq!(ngc.spec.as_switchable().unwrap().states(), ["linear", "focus"]);

    let det = config.device("det").unwrap();
    assert_eq!(det.spec, DeviceSpec::Generic);

    // rendered from the chopper setup's vars
    let ch = config.device("ch").unwrap();
    assert_eq!(ch.declaration.param("wavelength"), Some(&ParamValue::Float(6.0)));
}

#[test]
fn sibling_setup_excluding_tisane_conflicts_with_it() {
    let err = resolve(&["toftof_flat", "tisane"]).unwrap_err();
    match err {
        AppError::Conflict { setup, other, .. } => {
            assert_eq!(setup, "tisane");
            assert_eq!(other, "toftof_flat");
        }
        other => panic!("expected conflict, got {other}"),
    }

    let err = resolve(&["tisane", "toftof_flat"]).unwrap_err();
    assert!(matches!(err, AppError::Conflict { ref other, .. } if other == "tisane"));

    assert!(resolve(&["toftof", "tisane"]).unwrap().is_loaded("tisane"));
}

#[test]
fn resolution_is_idempotent() {
    let first = resolve(&["toftof"]).unwrap();
    let second = resolve(&["toftof"]).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
    let flat = resolve(&["toftof_flat"]).unwrap();
    assert_ne!(first.fingerprint().unwrap(), flat.fingerprint().unwrap());
}

#[test]
fn special_setups_need_opt_in() {
    let err = resolve(&["cache"]).unwrap_err();
    assert!(matches!(err, AppError::SpecialSetup(ref name) if name == "cache"));

    let options = ResolveOptions { allow_special: true, ..Default::default() };
    let config = resolve_setups(&[toftof_setups()], &["cache"], options).unwrap();
    assert_eq!(config.device_names(), ["DB"]);
}

#[test]
fn system_is_autoloaded_on_request() {
    let options = ResolveOptions { autoload_system: true, ..Default::default() };
    let config = resolve_setups(&[toftof_setups()], &["ccr"], options).unwrap();
    assert_eq!(config.loaded, ["notifiers", "system", "ccr"]);
    assert_eq!(config.roots, ["ccr"]);
    assert_eq!(config.aliases.preferred("T").map(|t| t.device.as_str()), Some("T_ccr"));
}

#[test]
fn unknown_setup_lists_available_names() {
    let err = resolve(&["panda"]).unwrap_err();
    assert!(matches!(err, AppError::SetupNotFound { included_by: None, .. }));
    assert!(err.to_string().contains("toftof"));
}

#[test]
fn later_root_extends_same_named_setup() {
    let roots = [toftof_setups(), common_setups()];
    let config = resolve_setups(&roots, &["reactor"], ResolveOptions::default()).unwrap();

    let power = config.device("ReactorPower").unwrap();
    assert_eq!(power.declaration.description(), Some("FRM II reactor power (shared)"));
    assert_eq!(config.startup_code(), "printinfo('reactor power readout active')");
}

#[test]
fn include_cycle_is_reported_with_path() {
    let ctx = TestContext::new();
    ctx.write_setup("a.toml", "description = 'a'\nincludes = ['b']");
    ctx.write_setup("b.toml", "description = 'b'\nincludes = ['c']");
    ctx.write_setup("c.toml", "description = 'c'\nincludes = ['a']");

    let err = resolve_setups(&[ctx.setups_dir()], &["a"], ResolveOptions::default()).unwrap_err();
    match err {
        AppError::CyclicInclude(path) => assert_eq!(path, "a -> b -> c -> a"),
        other => panic!("expected cycle, got {other}"),
    }
}

#[test]
fn device_without_type_is_malformed() {
    let ctx = TestContext::new();
    ctx.write_setup("motors.yaml", "description: motors\ndevices:\n  m1:\n    unit: mm\n");
    ctx.write_setup("inst.toml", "description = 'inst'\nincludes = ['motors']");

    let err =
        resolve_setups(&[ctx.setups_dir()], &["inst"], ResolveOptions::default()).unwrap_err();
    match err {
        AppError::MalformedDeclaration { setup, device, reason } => {
            assert_eq!((setup.as_str(), device.as_str()), ("motors", "m1"));
            assert!(reason.contains("type"));
        }
        other => panic!("expected malformed declaration, got {other}"),
    }
}

#[test]
fn unreadable_setup_only_fails_its_users() {
    let ctx = TestContext::new();
    ctx.write_setup("broken.toml", "devices = [");
    ctx.write_setup("user.toml", "description = 'user'\nincludes = ['broken']");
    ctx.write_setup("fine.toml", "description = 'fine'");

    let roots = [ctx.setups_dir()];
    assert!(resolve_setups(&roots, &["fine"], ResolveOptions::default()).is_ok());
    let err = resolve_setups(&roots, &["user"], ResolveOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::UnreadableSetup { ref name, .. } if name == "broken"));
}

#[test]
fn root_overrides_included_device_entirely() {
    let ctx = TestContext::new();
    ctx.write_setup("b.toml", "[devices.X]\ntype = 'Dev'\np = 1\nq = 'only in b'");
    ctx.write_setup("a.toml", "includes = ['b']\n[devices.X]\ntype = 'Dev'\np = 2");

    let config = resolve_setups(&[ctx.setups_dir()], &["a"], ResolveOptions::default()).unwrap();
    let x = config.device("X").unwrap();
    assert_eq!(x.setup, "a");
    assert_eq!(x.declaration.param("p"), Some(&ParamValue::Integer(2)));
    assert_eq!(x.declaration.param("q"), None);
}

#[test]
fn yaml_null_parameters_resolve_as_unset() {
    let ctx = TestContext::new();
    ctx.write_setup(
        "motors.yaml",
        "description: motors\ndevices:\n  m1:\n    type: nicos.devices.generic.VirtualMotor\n    \
         unit: mm\n    abslimits: [0, 10]\n    pollinterval: null\n    userlimits: ~\n",
    );

    let config =
        resolve_setups(&[ctx.setups_dir()], &["motors"], ResolveOptions::default()).unwrap();
    let m1 = config.device("m1").unwrap();
    assert!(m1.declaration.param("pollinterval").is_none());
    let moveable = m1.spec.as_moveable().unwrap();
    assert!(moveable.user_limits().is_none());
}
