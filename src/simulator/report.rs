//! Simulation report generation.

use super::runner::{RunEnd, RunRecord};
use crate::config::SimTargets;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated results for one hero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSummary {
    pub hero_key: String,
    pub runs: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub avg_floors: f64,
    pub avg_turns: f64,
    /// Total turns over total combats, across every run.
    pub avg_turns_per_combat: f64,
    pub avg_gold: f64,
    pub defeats: u32,
    pub timeouts: u32,
    /// Floor → number of runs that ended there without clearing.
    pub run_endings: BTreeMap<u32, u32>,
    pub win_rate_on_target: bool,
    pub pace_on_target: bool,
}

impl HeroSummary {
    pub fn from_runs(hero_key: &str, runs: &[RunRecord], targets: &SimTargets) -> Self {
        let n = runs.len().max(1) as f64;
        let wins = runs.iter().filter(|r| r.won).count() as u32;
        let ended_by = |end: RunEnd| runs.iter().filter(|r| r.ended_by == end).count() as u32;
        let defeats = ended_by(RunEnd::Defeated);
        let timeouts = ended_by(RunEnd::TurnCap);

        let total_turns: u64 = runs.iter().map(|r| r.total_turns as u64).sum();
        let total_combats: u64 = runs.iter().map(|r| r.combats as u64).sum();

        let mut run_endings = BTreeMap::new();
        for run in runs.iter().filter(|r| !r.won) {
            *run_endings.entry(run.end_floor).or_insert(0) += 1;
        }

        let win_rate = if runs.is_empty() { 0.0 } else { wins as f64 / n };
        let avg_turns_per_combat = total_turns as f64 / total_combats.max(1) as f64;

        Self {
            hero_key: hero_key.to_string(),
            runs: runs.len() as u32,
            wins,
            win_rate,
            avg_floors: runs.iter().map(|r| r.floors_cleared as f64).sum::<f64>() / n,
            avg_turns: total_turns as f64 / n,
            avg_turns_per_combat,
            avg_gold: runs.iter().map(|r| r.gold as f64).sum::<f64>() / n,
            defeats,
            timeouts,
            run_endings,
            win_rate_on_target: (targets.win_rate_min..=targets.win_rate_max).contains(&win_rate),
            pace_on_target: (targets.turns_per_combat_min..=targets.turns_per_combat_max)
                .contains(&avg_turns_per_combat),
        }
    }
}

/// Aggregated results from a whole simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    pub runs_per_hero: u32,
    pub seed: Option<u64>,
    pub heroes: Vec<HeroSummary>,
    pub targets: SimTargets,
}

impl SimReport {
    pub fn new(
        runs_per_hero: u32,
        seed: Option<u64>,
        heroes: Vec<HeroSummary>,
        targets: SimTargets,
    ) -> Self {
        Self {
            runs_per_hero,
            seed,
            heroes,
            targets,
        }
    }

    pub fn hero(&self, key: &str) -> Option<&HeroSummary> {
        self.heroes.iter().find(|h| h.hero_key == key)
    }

    /// True if every hero lands inside both target bands.
    pub fn on_target(&self) -> bool {
        self.heroes
            .iter()
            .all(|h| h.win_rate_on_target && h.pace_on_target)
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Runs per hero: {}\n", self.runs_per_hero));
        if let Some(seed) = self.seed {
            report.push_str(&format!("Seed:          {}\n", seed));
        }
        report.push('\n');

        report.push_str("── RESULTS ──────────────────────────────────────────────────────\n");
        report.push_str("  Hero        Win%   Floors   Turns   Turns/Fight   Deaths   Timeouts\n");
        report.push_str("  ────        ────   ──────   ─────   ───────────   ──────   ────────\n");
        for h in &self.heroes {
            report.push_str(&format!(
                "  {:<10} {:5.1}   {:6.1}   {:5.0}   {:11.1}   {:6}   {:8}\n",
                h.hero_key,
                h.win_rate * 100.0,
                h.avg_floors,
                h.avg_turns,
                h.avg_turns_per_combat,
                h.defeats,
                h.timeouts
            ));
        }
        report.push('\n');

        report.push_str("── WHERE RUNS END ───────────────────────────────────────────────\n");
        for h in &self.heroes {
            let lost = h.runs - h.wins;
            report.push_str(&format!("  {} ({} lost)\n", h.hero_key, lost));
            for (floor, count) in &h.run_endings {
                let pct = *count as f64 / h.runs.max(1) as f64 * 100.0;
                let bar: String = "█".repeat((pct / 2.0) as usize);
                report.push_str(&format!("    Floor {:2}: {:>5.1}% {}\n", floor, pct, bar));
            }
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Targets: win rate {:.0}-{:.0}%, {:.0}-{:.0} turns per fight\n",
            self.targets.win_rate_min * 100.0,
            self.targets.win_rate_max * 100.0,
            self.targets.turns_per_combat_min,
            self.targets.turns_per_combat_max
        ));
        for h in &self.heroes {
            if h.win_rate < self.targets.win_rate_min {
                report.push_str(&format!(
                    "  ⚠️  {} wins too rarely ({:.1}%)\n",
                    h.hero_key,
                    h.win_rate * 100.0
                ));
            } else if h.win_rate > self.targets.win_rate_max {
                report.push_str(&format!(
                    "  ⚠️  {} wins too often ({:.1}%)\n",
                    h.hero_key,
                    h.win_rate * 100.0
                ));
            }
            if !h.pace_on_target {
                report.push_str(&format!(
                    "  ⚠️  {} fights last {:.1} turns on average\n",
                    h.hero_key, h.avg_turns_per_combat
                ));
            }
            if h.timeouts > h.defeats {
                report.push_str(&format!(
                    "  ⚠️  {} loses more to the turn cap than to enemies\n",
                    h.hero_key
                ));
            }
        }
        if self.on_target() {
            report.push_str("  All heroes within targets\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
