//! Lookups racing reloads must always see one complete trigger set.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use blocktrigger_data::TriggerFile;
use blocktrigger_engine as bt;
use bt::loader::parse_trigger_file;
use bt::registry::TriggerRegistry;

const COUNT: i32 = 32;

fn file(prefix: &str) -> TriggerFile {
    let mut text = String::new();
    for i in 0..COUNT {
        text.push_str(&format!(
            "[[triggers]]\nname = \"{prefix}-{i}\"\nworld = \"w\"\nat = [{i}, 0, 0]\ntype = \"move\"\n\n"
        ));
    }
    parse_trigger_file(&text).expect("parse")
}

/// Odd generations load `old`, even ones load `new`.
fn expected_prefix(generation: u64) -> &'static str {
    if generation % 2 == 1 { "old" } else { "new" }
}

#[test]
fn test_lookups_never_see_a_mixed_set() {
    let registry = TriggerRegistry::new();
    let old = file("old");
    let new = file("new");
    registry.reload(&old).expect("initial load");
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        s.spawn(|| {
            for round in 0..200 {
                let next = if round % 2 == 0 { &new } else { &old };
                registry.reload(next).expect("reload");
            }
            done.store(true, Ordering::SeqCst);
        });

        for _ in 0..4 {
            s.spawn(|| {
                while !done.load(Ordering::SeqCst) {
                    let set = registry.snapshot();
                    let prefix = expected_prefix(set.generation());
                    assert_eq!(set.len(), COUNT as usize);
                    assert!(set.names().all(|n| n.starts_with(prefix)));
                    assert!(set.iter().all(|t| t.id.generation == set.generation()));

                    for x in [0, COUNT / 2, COUNT - 1] {
                        let trigger = registry.lookup("w", x, 0, 0).expect("always covered");
                        assert_eq!(trigger.name(), format!("{}-{x}", expected_prefix(trigger.id.generation)));
                    }
                }
            });
        }
    });

    assert_eq!(registry.generation(), 201);
    assert!(registry.names()[0].starts_with("old"));
}

#[test]
fn test_reloads_are_serialized() {
    let registry = TriggerRegistry::new();
    let old = file("old");

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..25 {
                    registry.reload(&old).expect("reload");
                }
            });
        }
    });

    assert_eq!(registry.generation(), 200);
}
