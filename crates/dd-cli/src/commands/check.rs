//! `dispatch check`: batch-solve a directory of test cases.
//!
//! Every `test_case_<n>.json` is solved with the plain solver and the result
//! is validated: one assignment per package, covering exactly the input
//! package ids.  Per-case results go to `test_results.json` in the same
//! directory.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::debug;

use dd_core::{Assignment, Package, PackageId};
use dd_engine::EngineConfig;
use dd_input::load_input;
use dd_output::{Report, group_by_agent};

use super::build_engine;

pub const RESULTS_FILE: &str = "test_results.json";

/// One line of `test_results.json`.
#[derive(Debug, Serialize)]
pub(crate) struct CaseResult {
    pub test:    String,
    pub passed:  bool,
    pub message: String,
    pub output:  Option<Report>,
}

pub fn execute(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!("Test directory not found: {}", dir.display());
    }
    let cases = find_test_cases(dir)?;
    if cases.is_empty() {
        println!("No test cases found in {}", dir.display());
        return Ok(());
    }

    let rule = "=".repeat(80);
    println!("{rule}\nRUNNING {} TEST CASES\n{rule}\n", cases.len());

    let mut results = Vec::with_capacity(cases.len());
    for (n, path) in cases.iter().enumerate() {
        let result = run_case(path);
        let verdict = if result.passed { "PASS" } else { "FAIL" };
        println!(
            "[{}/{}] {} ... {verdict} - {}",
            n + 1,
            cases.len(),
            result.test,
            result.message
        );
        results.push(result);
    }

    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;
    println!("\n{rule}\nTEST SUMMARY\n{rule}");
    println!("Total Tests: {}", results.len());
    println!("Passed: {passed}");
    println!("Failed: {failed}");
    println!("Success Rate: {:.1}%", passed as f64 / results.len() as f64 * 100.0);
    println!("{rule}\n");

    let results_path = dir.join(RESULTS_FILE);
    write_results(&results_path, &results)
        .with_context(|| format!("Failed to write {}", results_path.display()))?;
    println!("Detailed results saved to: {}", results_path.display());

    if failed > 0 {
        bail!("{failed} of {} test cases failed", results.len());
    }
    Ok(())
}

/// `test_case_*.json` files in `dir`, ordered by their trailing number.
///
/// Files whose suffix is not a number sort after the numbered ones, by name.
pub(crate) fn find_test_cases(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut cases: Vec<(Option<u64>, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !(name.starts_with("test_case_") && name.ends_with(".json")) || !path.is_file() {
            continue;
        }
        cases.push((case_number(&path), path));
    }
    cases.sort_by(|(na, pa), (nb, pb)| {
        na.is_none()
            .cmp(&nb.is_none())
            .then(na.cmp(nb))
            .then_with(|| pa.cmp(pb))
    });
    Ok(cases.into_iter().map(|(_, path)| path).collect())
}

fn case_number(path: &Path) -> Option<u64> {
    path.file_stem()?.to_str()?.rsplit('_').next()?.parse().ok()
}

/// Solve one case; failures become a failed result, never an error.
pub(crate) fn run_case(path: &Path) -> CaseResult {
    let test = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!(case = %test, "running test case");

    match solve_case(path) {
        Ok(report) => CaseResult {
            test,
            passed: true,
            message: format!("Total distance: {:.2}", report.total_distance),
            output: Some(report),
        },
        Err(message) => CaseResult {
            test,
            passed: false,
            message,
            output: None,
        },
    }
}

fn solve_case(path: &Path) -> Result<Report, String> {
    let input = load_input(path).map_err(|e| format!("Error: {e}"))?;
    if input.warehouses.is_empty() {
        return Err("No warehouses found".into());
    }
    if input.agents.is_empty() {
        return Err("No agents found".into());
    }
    if input.packages.is_empty() {
        return Err("No packages found".into());
    }

    let mut engine =
        build_engine(&input, EngineConfig::default()).map_err(|e| format!("Error: {e:#}"))?;
    let assignments = engine.solve().map_err(|e| format!("Error: {e}"))?;
    validate_solution(&input.packages, &assignments)?;

    let groups = group_by_agent(&assignments, engine.agent_ids());
    Ok(Report::new(&groups, input.warehouses.len(), input.packages.len()))
}

/// One assignment per package, and the assigned ids are exactly the input ids.
pub(crate) fn validate_solution(packages: &[Package], assignments: &[Assignment]) -> Result<(), String> {
    if assignments.len() != packages.len() {
        return Err(format!(
            "Expected {} assignments, got {}",
            packages.len(),
            assignments.len()
        ));
    }
    let assigned: HashSet<&PackageId> = assignments.iter().map(|a| &a.package).collect();
    let expected: HashSet<&PackageId> = packages.iter().map(|p| &p.id).collect();
    if assigned != expected {
        return Err("Not all packages were assigned".into());
    }
    Ok(())
}

fn write_results(path: &Path, results: &[CaseResult]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, results)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
