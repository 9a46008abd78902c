//! `dispatch visualize`: text rendering of every agent's route.

use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::path::Path;

use anyhow::{Context, Result};

use dd_core::{Assignment, Location, PackageId, WarehouseId};
use dd_engine::EngineConfig;
use dd_input::{ProblemInput, load_input};
use dd_output::group_by_agent;

use super::build_engine;

pub fn execute(input_path: &Path) -> Result<()> {
    let input = load_input(input_path)
        .with_context(|| format!("Failed to load {}", input_path.display()))?;
    let assignments = build_engine(&input, EngineConfig::default())?.solve()?;

    let title = input_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input_path.display().to_string());
    print!("{}", render_routes(&title, &input, &assignments)?);
    Ok(())
}

/// Initial state followed by each agent's legs, agents sorted by id.
pub(crate) fn render_routes(
    title:       &str,
    input:       &ProblemInput,
    assignments: &[Assignment],
) -> Result<String, fmt::Error> {
    let rule = "=".repeat(80);
    let thin = "-".repeat(80);
    let warehouse_at: HashMap<&WarehouseId, Location> =
        input.warehouses.iter().map(|w| (&w.id, w.location)).collect();
    let destination_of: HashMap<&PackageId, Location> =
        input.packages.iter().map(|p| (&p.id, p.destination)).collect();

    let mut out = String::new();
    writeln!(out, "\n{rule}\nDELIVERY VISUALIZATION: {title}\n{rule}\n")?;

    writeln!(out, "INITIAL STATE:\n{thin}")?;
    for agent in &input.agents {
        writeln!(out, "  {}: at location {}", agent.id, agent.location)?;
    }
    writeln!(out)?;
    for warehouse in &input.warehouses {
        let held: Vec<&str> = input
            .packages
            .iter()
            .filter(|p| p.warehouse == warehouse.id)
            .map(|p| p.id.as_str())
            .collect();
        writeln!(
            out,
            "  {}: at {}, has packages [{}]",
            warehouse.id,
            warehouse.location,
            held.join(", ")
        )?;
    }

    writeln!(out, "\nASSIGNMENTS:\n{thin}")?;
    let groups = group_by_agent(assignments, input.agents.iter().map(|a| a.id.clone()));
    let mut agents: Vec<_> = input.agents.iter().collect();
    agents.sort_by(|a, b| a.id.cmp(&b.id));

    let mut total = 0.0;
    for agent in agents {
        let legs = groups.get(&agent.id).unwrap_or_default();
        if legs.is_empty() {
            writeln!(out, "\n{}: No packages assigned", agent.id)?;
            continue;
        }

        let distance: f64 = legs.iter().map(|a| a.distance).sum();
        total += distance;
        writeln!(
            out,
            "\n{}: {} package(s), total distance: {distance:.2}",
            agent.id,
            legs.len()
        )?;

        let mut from = agent.location;
        for (n, leg) in legs.iter().enumerate() {
            let (Some(&warehouse), Some(&destination)) =
                (warehouse_at.get(&leg.warehouse), destination_of.get(&leg.package))
            else {
                continue;
            };
            writeln!(out, "  {}. {}:", n + 1, leg.package)?;
            writeln!(
                out,
                "     Route: {from} → {warehouse} ({}) → {destination}",
                leg.warehouse
            )?;
            writeln!(out, "     Distance: {:.2}", leg.distance)?;
            from = destination;
        }
    }

    writeln!(out, "\n{thin}\nTOTAL DISTANCE: {total:.2} units\n{rule}")?;
    Ok(out)
}
