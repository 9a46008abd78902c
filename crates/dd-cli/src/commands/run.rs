//! `dispatch run`: solve one problem file and report it.

use std::collections::HashSet;
use std::fmt::{self, Write as _};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use dd_core::{Agent, AgentId, Location};
use dd_engine::{EngineConfig, EngineObserver, Registration};
use dd_input::load_input;
use dd_output::{
    AgentGroups, AgentSummaryRow, CsvWriter, OutputWriter, Report, Summary, agent_summaries,
    assignment_rows, group_by_agent, summarize,
};

use super::build_engine;

/// Demo dynamic agents are only added to runs with more packages than this.
const DEMO_MIN_PACKAGES: usize = 3;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input JSON file with warehouses, agents and packages
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the JSON report to FILE
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Export one row per assignment to FILE
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Export one row per agent to FILE
    #[arg(long, value_name = "FILE")]
    pub csv_summary: Option<PathBuf>,

    /// Attach a random delivery delay to every assignment
    #[arg(long)]
    pub delays: bool,

    /// Smallest delay in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 5.0)]
    pub min_delay: f64,

    /// Largest delay in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 30.0)]
    pub max_delay: f64,

    /// Seed for the delay generator
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Add an extra agent part-way through the run
    #[arg(long)]
    pub dynamic_agents: bool,

    /// Package index at which the extra agent joins (default: half the packages)
    #[arg(long, value_name = "N", requires = "dynamic_agents")]
    pub join_at: Option<usize>,
}

impl RunArgs {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            delays_enabled:         self.delays,
            min_delay:              self.min_delay,
            max_delay:              self.max_delay,
            dynamic_agents_enabled: self.dynamic_agents,
            seed:                   self.seed,
        }
    }
}

pub fn execute(args: &RunArgs) -> Result<()> {
    println!("Loading input from: {}", args.input.display());
    let input = load_input(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    println!(
        "Loaded: {} warehouses, {} agents, {} packages",
        input.warehouses.len(),
        input.agents.len(),
        input.packages.len()
    );

    let mut features = Vec::new();
    if args.delays {
        features.push("random delays");
    }
    if args.dynamic_agents {
        features.push("dynamic agents");
    }
    if !features.is_empty() {
        println!("Features enabled: {}", features.join(", "));
    }

    let mut engine = build_engine(&input, args.engine_config())?;

    if args.dynamic_agents {
        if let Some((agent, join_after)) =
            demo_dynamic_agent(&input.agents, input.packages.len(), args.join_at)
        {
            let id = agent.id.clone();
            if let Registration::Scheduled { join_after } =
                engine.register_dynamic_agent(agent, join_after)?
            {
                println!("Dynamic agent {id} scheduled to join at package #{}", join_after + 1);
            }
        }
    }

    println!("Solving delivery assignment problem...");
    let mut joins = JoinLog::default();
    let assignments = engine.solve_with(&mut joins)?;
    info!(packages = assignments.len(), "run complete");

    let dynamic: HashSet<AgentId> = engine.pending().iter().map(|p| p.agent.id.clone()).collect();
    let groups = group_by_agent(&assignments, engine.agent_ids());
    let summary = summarize(&assignments, input.packages.len());

    print!("{}", render_summary(&groups, &summary, &dynamic, &joins.joined, args.delays)?);

    if let Some(path) = &args.output {
        Report::new(&groups, input.warehouses.len(), input.packages.len())
            .write_json(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("JSON output saved to: {}", path.display());
    }

    if args.csv.is_some() || args.csv_summary.is_some() {
        let mut writer = CsvWriter::new(args.csv.as_deref(), args.csv_summary.as_deref())
            .context("Failed to create CSV output")?;
        writer.write_assignments(&assignment_rows(&assignments, &input.warehouses, &input.packages)?)?;
        let rows: Vec<AgentSummaryRow> = agent_summaries(&groups).iter().map(Into::into).collect();
        writer.write_agent_summaries(&rows)?;
        writer.finish()?;

        if let Some(path) = &args.csv {
            println!("Assignments exported to: {}", path.display());
        }
        if let Some(path) = &args.csv_summary {
            println!("Agent summary exported to: {}", path.display());
        }
    }

    Ok(())
}

/// Records when dynamic agents entered the active set.
#[derive(Debug, Default)]
struct JoinLog {
    joined: Vec<(AgentId, usize)>,
}

impl EngineObserver for JoinLog {
    fn on_agent_admitted(&mut self, agent: &AgentId, index: usize) {
        self.joined.push((agent.clone(), index));
    }
}

/// The extra agent added by `--dynamic-agents`: `A{n+1}_DYNAMIC` at the
/// centroid of the initial agents.
///
/// Without `--join-at` it joins halfway through and only when the run has
/// more than [`DEMO_MIN_PACKAGES`] packages.  `None` when there are no
/// initial agents to take a centroid of.
pub(crate) fn demo_dynamic_agent(
    agents:        &[Agent],
    package_count: usize,
    join_at:       Option<usize>,
) -> Option<(Agent, usize)> {
    let join_after = match join_at {
        Some(index) => index,
        None if package_count > DEMO_MIN_PACKAGES => package_count / 2,
        None => return None,
    };
    let location = centroid(agents)?;
    let id = format!("A{}_DYNAMIC", agents.len() + 1);
    Some((Agent::new(id, location), join_after))
}

/// Mean position of `agents`, or `None` for an empty slice.
pub(crate) fn centroid(agents: &[Agent]) -> Option<Location> {
    if agents.is_empty() {
        return None;
    }
    let n = agents.len() as f64;
    let (sx, sy) = agents
        .iter()
        .fold((0.0, 0.0), |(sx, sy), a| (sx + a.location.x, sy + a.location.y));
    Some(Location::new(sx / n, sy / n))
}

/// The console report printed after a run.
pub(crate) fn render_summary(
    groups:  &AgentGroups<'_>,
    summary: &Summary,
    dynamic: &HashSet<AgentId>,
    joined:  &[(AgentId, usize)],
    delays:  bool,
) -> Result<String, fmt::Error> {
    let rule = "=".repeat(60);
    let mut out = String::new();

    writeln!(out, "\n{rule}\nSOLUTION SUMMARY\n{rule}")?;
    writeln!(out, "Total Distance: {:.2} units", summary.total_distance)?;
    writeln!(
        out,
        "Average Distance per Package: {:.2} units",
        summary.average_distance
    )?;
    if delays {
        writeln!(out, "Total Delivery Delays: {:.2} seconds", summary.total_delay)?;
        writeln!(out, "Average Delay per Package: {:.2} seconds", summary.average_delay)?;
    }
    for (agent, index) in joined {
        writeln!(out, "Dynamic agent {agent} joined before package #{}", index + 1)?;
    }

    writeln!(out, "\nAssignments by Agent:")?;
    for (agent, list) in groups.iter() {
        let tag = if dynamic.contains(agent) { " (DYNAMIC)" } else { "" };
        if list.is_empty() {
            writeln!(out, "\n  {agent}{tag}: No packages assigned")?;
            continue;
        }

        let distance: f64 = list.iter().map(|a| a.distance).sum();
        let delay: f64 = list.iter().map(|a| a.delay).sum();
        let delay_note = if delays { format!(", delay: {delay:.2}s") } else { String::new() };
        writeln!(
            out,
            "\n  {agent}{tag}: {} package(s), distance: {distance:.2}{delay_note}",
            list.len()
        )?;
        for a in list {
            let delay_note = if delays { format!(", delay: {:.2}s", a.delay) } else { String::new() };
            writeln!(
                out,
                "    - {} from {}, distance: {:.2}{delay_note}",
                a.package, a.warehouse, a.distance
            )?;
        }
    }
    writeln!(out, "\n{rule}")?;
    Ok(out)
}
