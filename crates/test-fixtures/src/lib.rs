//! Test fixture loader for dsfusion golden datasets.
//!
//! Provides typed deserialization of the fixture JSON files and helpers for
//! turning them into evidence batches in tests across crates.

use std::path::PathBuf;

use dsfusion_core::{EvidenceBatch, MassFunction, RuleKind};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

// ── Sensor scenario ──────────────────────────────────────────────────────

/// One sensor reading of the reference scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorFixture {
    pub id: u64,
    pub mass: MassFunction,
}

/// The five-sensor reference scenario over the frame {a, b, c}.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorScenario {
    pub frame: Vec<String>,
    pub sensors: Vec<SensorFixture>,
}

impl SensorScenario {
    pub fn load() -> Self {
        load_fixture("golden/sensors.json")
    }

    /// Mass function of sensor `id`.
    ///
    /// # Panics
    /// Panics if the scenario has no such sensor.
    pub fn sensor(&self, id: u64) -> &MassFunction {
        self.sensors
            .iter()
            .find(|s| s.id == id)
            .map(|s| &s.mass)
            .unwrap_or_else(|| panic!("no sensor {id} in the reference scenario"))
    }

    /// The first `count` sensors as a single batch keyed by sensor id.
    pub fn batch(&self, count: usize) -> EvidenceBatch {
        self.sensors
            .iter()
            .take(count)
            .map(|s| (s.id, s.mass.clone()))
            .collect()
    }

    /// Sensor `id` alone as a batch.
    pub fn single(&self, id: u64) -> EvidenceBatch {
        EvidenceBatch::new().with(id, self.sensor(id).clone())
    }
}

// ── Reference outputs ────────────────────────────────────────────────────

/// Expected output of one rule after fusing the first `sensors` readings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceCase {
    pub rule: RuleKind,
    pub sensors: usize,
    /// Only the focal sets listed here are checked.
    pub expected: MassFunction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceFusion {
    pub tolerance: f64,
    pub cases: Vec<ReferenceCase>,
}

impl ReferenceFusion {
    pub fn load() -> Self {
        load_fixture("golden/reference_fusion.json")
    }

    pub fn cases_for(&self, rule: RuleKind) -> impl Iterator<Item = &ReferenceCase> {
        self.cases.iter().filter(move |c| c.rule == rule)
    }
}

/// Assert that every focal set listed in `expected` has the same mass in
/// `actual` within `tolerance`.
///
/// # Panics
/// Panics naming the first focal set that differs.
pub fn assert_masses_close(
    actual: &MassFunction,
    expected: &MassFunction,
    tolerance: f64,
    context: &str,
) {
    for (focal, want) in expected {
        let got = actual.get(focal);
        assert!(
            (got - want).abs() <= tolerance,
            "{context}: {focal} expected {want}, got {got} (tolerance {tolerance})"
        );
    }
}
