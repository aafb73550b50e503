mod common;

use common::{TestContext, toftof_setups};
use labsetup::{CheckOptions, check_setups};

#[test]
fn toftof_fixture_has_no_errors() {
    let outcome = check_setups(&[toftof_setups()], CheckOptions::default()).unwrap();
    assert!(outcome.errors.is_empty(), "{:#?}", outcome.errors);
    assert_eq!(outcome.exit_code, 0);

    // instrument-specific classes are outside the embedded catalog
    assert!(outcome.warnings.iter().any(|d| d.message.contains("not in the catalog")));
    let strict = check_setups(&[toftof_setups()], CheckOptions { strict: true }).unwrap();
    assert_eq!(strict.exit_code, 2);
}

#[test]
fn reports_errors_per_setup() {
    let ctx = TestContext::new();
    ctx.write_setup(
        "system.toml",
        r#"
description = "system setup"
group = "basic"

[sysconfig]
experiment = "Experiment"
"#,
    );
    ctx.write_setup(
        "table.toml",
        r#"
description = "Sample table"
require = ["motorbus"]
display_order = 300

[devices.stx]
type = "nicos.devices.vendor.ipc.Motor"
description = "Sample x"
bus = "motorbus"
addr = "sixty-eight"
slope = 200.0
unit = "mm"
abslimits = [-10, 10]
fmtstr = "%q"

[devices.sty]
description = "Sample y"
"#,
    );
    ctx.write_setup("empty.yaml", "group: lowlevel\n");

    let outcome = check_setups(&[ctx.setups_dir()], CheckOptions::default()).unwrap();
    assert_eq!(outcome.exit_code, 1);

    let errors: Vec<String> =
        outcome.errors.iter().map(|d| format!("{}: {}", d.location, d.message)).collect();
    let has = |needle: &str| errors.iter().any(|e| e.contains(needle));

    assert!(has("system: 'system' is not in 'lowlevel' setup group"), "{errors:#?}");
    assert!(has("system: setup does not resolve: Invalid sysconfig"), "{errors:#?}");
    assert!(has("table: 'require' should be substituted by 'includes'"), "{errors:#?}");
    assert!(has("table: display_order should be an integer between 0 and 100"), "{errors:#?}");
    assert!(has("table: stx: parameter 'addr'"), "{errors:#?}");
    assert!(has("table: stx: invalid fmtstr"), "{errors:#?}");
    assert!(has("table: sty: device entry is missing its 'type' reference"), "{errors:#?}");
    assert!(has("table: setup does not resolve"), "{errors:#?}");
    assert!(has("empty: missing user-friendly setup description"), "{errors:#?}");
}

#[test]
fn duplicate_devices_are_warnings() {
    let ctx = TestContext::new();
    for name in ["cryo", "htf"] {
        ctx.write_setup(
            &format!("{name}.toml"),
            "description = 'sample environment'\n[devices.T]\ntype = 'Sensor'\ndescription = 'T'\n",
        );
    }

    let outcome = check_setups(&[ctx.setups_dir()], CheckOptions::default()).unwrap();
    assert!(outcome.errors.is_empty(), "{:#?}", outcome.errors);
    assert!(
        outcome
            .warnings
            .iter()
            .any(|d| d.location == "htf" && d.message == "device name T duplicate: also in cryo")
    );
}
