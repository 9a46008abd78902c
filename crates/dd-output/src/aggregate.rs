//! Grouping and summary statistics over a solved assignment list.

use std::collections::HashMap;

use dd_core::{AgentId, Assignment};

// ── Grouping ──────────────────────────────────────────────────────────────────

/// Assignments partitioned by agent.
///
/// Groups are ordered by first appearance: the `known_agents` passed to
/// [`group_by_agent`] first, then any agent only seen in the assignments.
/// Within a group, assignments keep solve order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentGroups<'a> {
    groups: Vec<(AgentId, Vec<&'a Assignment>)>,
}

impl<'a> AgentGroups<'a> {
    /// Assignments for `agent`, or `None` if the agent is unknown.
    pub fn get(&self, agent: &AgentId) -> Option<&[&'a Assignment]> {
        self.groups
            .iter()
            .find(|(id, _)| id == agent)
            .map(|(_, list)| list.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, &[&'a Assignment])> {
        self.groups.iter().map(|(id, list)| (id, list.as_slice()))
    }

    /// Number of agents, including those with no assignments.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of assignments across all groups.
    pub fn assignment_count(&self) -> usize {
        self.groups.iter().map(|(_, list)| list.len()).sum()
    }
}

/// Partition `assignments` by agent.
///
/// Every agent in `known_agents` gets a group, even if it delivered nothing.
pub fn group_by_agent<'a, I>(assignments: &'a [Assignment], known_agents: I) -> AgentGroups<'a>
where
    I: IntoIterator<Item = AgentId>,
{
    let mut groups: Vec<(AgentId, Vec<&'a Assignment>)> = Vec::new();
    let mut slot_of: HashMap<AgentId, usize> = HashMap::new();

    for agent in known_agents {
        if !slot_of.contains_key(&agent) {
            slot_of.insert(agent.clone(), groups.len());
            groups.push((agent, Vec::new()));
        }
    }

    for a in assignments {
        let slot = *slot_of.entry(a.agent.clone()).or_insert_with(|| {
            groups.push((a.agent.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(a);
    }

    AgentGroups { groups }
}

// ── Run summary ───────────────────────────────────────────────────────────────

/// Aggregate statistics for a whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    pub package_count:    usize,
    pub total_distance:   f64,
    pub total_delay:      f64,
    /// `total_distance / package_count`, or 0 when there are no packages.
    pub average_distance: f64,
    /// `total_delay / package_count`, or 0 when there are no packages.
    pub average_delay:    f64,
}

pub fn summarize(assignments: &[Assignment], package_count: usize) -> Summary {
    let total_distance: f64 = assignments.iter().map(|a| a.distance).sum();
    let total_delay: f64 = assignments.iter().map(|a| a.delay).sum();
    Summary {
        package_count,
        total_distance,
        total_delay,
        average_distance: per_item(total_distance, package_count),
        average_delay:    per_item(total_delay, package_count),
    }
}

// ── Per-agent summary ─────────────────────────────────────────────────────────

/// Statistics for one agent.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSummary {
    pub agent:            AgentId,
    pub packages:         usize,
    pub total_distance:   f64,
    pub total_delay:      f64,
    /// 0 for an agent that delivered nothing.
    pub average_distance: f64,
}

/// One [`AgentSummary`] per group, in group order.
pub fn agent_summaries(groups: &AgentGroups<'_>) -> Vec<AgentSummary> {
    groups
        .iter()
        .map(|(agent, list)| {
            let total_distance: f64 = list.iter().map(|a| a.distance).sum();
            AgentSummary {
                agent:            agent.clone(),
                packages:         list.len(),
                total_distance,
                total_delay:      list.iter().map(|a| a.delay).sum(),
                average_distance: per_item(total_distance, list.len()),
            }
        })
        .collect()
}

fn per_item(total: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}
