//! Loading bindings files and turning them into runnable action lists.

use std::io::Write;

use fwm_actions::{
    ActionData, ActionError, ActionSystem, BindingsConfig, BindingsError, ConfigError, Flow,
    Gesture, RunAction,
};
use fwm_core::host::WindowManager;
use fwm_core::host::testing::RecordingHost;
use fwm_core::trigger::{FrameContext, UserAction};

struct Desktop {
    target: i64,
}

impl RunAction for Desktop {
    fn run(&self, _data: &ActionData, _wm: &mut dyn WindowManager) -> Flow {
        let _ = self.target;
        Flow::Continue
    }
}

fn system() -> ActionSystem {
    let mut system = ActionSystem::new();
    system
        .registry_mut()
        .register("Desktop", |config| {
            let target = config.require_int("to")?;
            if target < 1 {
                return Err(ConfigError::invalid("to", "desktops are numbered from 1"));
            }
            Ok(Box::new(Desktop { target }))
        })
        .unwrap();
    system.registry_mut().startup(false);
    system
}

const TOML: &str = r#"
[[binding]]
trigger = "W-1"

[[binding.actions]]
name = "Desktop"
to = 1

[[binding]]
trigger = "W-2"

[[binding.actions]]
name = "Desktop"
to = 2

[[binding.actions]]
name = "Teleport"

[[binding]]
trigger = "W-0"

[[binding.actions]]
name = "Desktop"
to = 0

[[binding]]
trigger = "Left"
context = "titlebar"

[[binding.actions]]
name = "Desktop"
to = 3
"#;

#[test]
fn toml_file_builds_bindings_and_reports_broken_actions() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TOML.as_bytes()).unwrap();

    let config = BindingsConfig::from_toml_file(file.path()).unwrap();
    assert!(config.validate().is_empty());

    let system = system();
    let (bindings, errors) = config.build(system.registry());

    let triggers: Vec<_> = bindings.iter().map(|b| b.trigger.as_str()).collect();
    assert_eq!(triggers, vec!["W-1", "W-2", "Left"]);
    assert_eq!(bindings[1].actions.len(), 1);
    assert_eq!(bindings[2].context, FrameContext::Titlebar);

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], ActionError::UnknownActionKind("Teleport".into()));
    assert!(matches!(
        &errors[1],
        ActionError::InvalidConfig {
            source: ConfigError::Invalid { key, .. },
            ..
        } if key == "to"
    ));
    assert_eq!(system.registry().live_instances(), 3);

    drop(bindings);
    assert_eq!(system.registry().live_instances(), 0);
}

#[test]
fn json_file_loads_the_same_shape() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"binding": [{{"trigger": "W-1", "actions": [{{"name": "Desktop", "to": 4}}]}}]}}"#
    )
    .unwrap();

    let config = BindingsConfig::from_json_file(file.path()).unwrap();
    let mut system = system();
    let (bindings, errors) = config.build(system.registry());
    assert!(errors.is_empty());

    let mut host = RecordingHost::default();
    let started = system.run_acts(
        &bindings[0].actions,
        Gesture::new(UserAction::KeyboardKey),
        &mut host,
    );
    assert!(!started);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = BindingsConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, BindingsError::Io(_)));
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = BindingsConfig::from_json_str("{\"binding\": [").unwrap_err();
    assert!(matches!(err, BindingsError::Json(_)));
}
