#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use blocktrigger_engine as bt;
use bt::clock::ManualClock;
use bt::{BlockTrigger, EngineConfig, PlayerRef};
pub use bt::host;
use tempfile::TempDir;
use uuid::Uuid;

#[path = "../../src/testing.rs"]
mod testing;

pub use testing::{Call, RecordingHost};

/// An engine reading triggers from a file in a private temp directory.
pub struct Harness {
    pub dir: TempDir,
    pub path: PathBuf,
    pub host: Arc<RecordingHost>,
    pub clock: Arc<ManualClock>,
    pub engine: BlockTrigger,
}

impl Harness {
    pub fn new(triggers: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("triggers.toml");
        fs::write(&path, triggers).expect("write triggers");
        let host = Arc::new(RecordingHost::default());
        let clock = Arc::new(ManualClock::default());
        let engine = BlockTrigger::new(EngineConfig::with_path(&path), host.clone(), clock.clone());
        Self {
            dir,
            path,
            host,
            clock,
            engine,
        }
    }

    pub fn loaded(triggers: &str) -> Self {
        let harness = Self::new(triggers);
        harness.engine.reload().expect("reload");
        harness
    }

    pub fn rewrite(&self, triggers: &str) {
        fs::write(&self.path, triggers).expect("rewrite triggers");
    }
}

pub fn ann() -> PlayerRef {
    PlayerRef::new(Uuid::from_u128(1), "Ann")
}

pub fn bob() -> PlayerRef {
    PlayerRef::new(Uuid::from_u128(2), "Bob")
}
