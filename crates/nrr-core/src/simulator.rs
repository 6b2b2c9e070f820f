// Match simulation: apply one hypothetical fixture to a clone of the base
// table and re-rank it.

use tracing::trace;

use crate::error::ScenarioError;
use crate::standings::{
    find_team_index, recompute_table_nrr, sort_standings, team_position, BaseStandings,
    TeamStanding,
};

/// Points for a win. A tie gives each side half of this.
pub const POINTS_FOR_WIN: u32 = 2;
pub const POINTS_FOR_TIE: u32 = 1;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One hypothetical completed fixture between two teams in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDetail {
    pub your_team: String,
    pub opponent_team: String,
    pub your_runs: u32,
    pub your_balls: u32,
    pub opponent_runs: u32,
    pub opponent_balls: u32,
    /// Your team batted second. Reaching the opponent's total exactly then
    /// counts as a successful chase rather than a tie.
    pub your_team_chasing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    YourWin,
    OpponentWin,
    Tie,
}

/// The table after one simulated match.
#[derive(Debug, Clone)]
pub struct SimulatedMatch {
    /// Mutated clone, still in seed order.
    pub standings: Vec<TeamStanding>,
    /// The same rows in rank order.
    pub sorted_standings: Vec<TeamStanding>,
    pub your_team_standing: TeamStanding,
    pub opponent_standing: TeamStanding,
    pub outcome: MatchOutcome,
}

impl SimulatedMatch {
    /// Your team's 1-based position in the re-ranked table.
    pub fn your_position(&self) -> Option<usize> {
        team_position(&self.sorted_standings, &self.your_team_standing.team)
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

pub fn resolve_outcome(detail: &MatchDetail) -> MatchOutcome {
    if detail.your_runs > detail.opponent_runs {
        MatchOutcome::YourWin
    } else if detail.your_runs < detail.opponent_runs {
        MatchOutcome::OpponentWin
    } else if detail.your_team_chasing {
        MatchOutcome::YourWin
    } else {
        MatchOutcome::Tie
    }
}

/// Play `detail` against a fresh clone of `base`. The base table is never
/// touched, so repeated calls are independent what-ifs.
pub fn simulate_match(
    base: &BaseStandings,
    detail: &MatchDetail,
) -> Result<SimulatedMatch, ScenarioError> {
    let mut standings = base.clone_standings();

    let your_idx = locate(&standings, &detail.your_team)?;
    let opp_idx = locate(&standings, &detail.opponent_team)?;

    // Rows are addressed by index so each update lands exactly once per side.
    standings[your_idx].matches = standings[your_idx].matches.saturating_add(1);
    standings[opp_idx].matches = standings[opp_idx].matches.saturating_add(1);

    {
        let your = &mut standings[your_idx];
        your.for_runs = your.for_runs.saturating_add(detail.your_runs);
        your.for_balls = your.for_balls.saturating_add(detail.your_balls);
        your.against_runs = your.against_runs.saturating_add(detail.opponent_runs);
        your.against_balls = your.against_balls.saturating_add(detail.opponent_balls);
    }
    {
        let opp = &mut standings[opp_idx];
        opp.for_runs = opp.for_runs.saturating_add(detail.opponent_runs);
        opp.for_balls = opp.for_balls.saturating_add(detail.opponent_balls);
        opp.against_runs = opp.against_runs.saturating_add(detail.your_runs);
        opp.against_balls = opp.against_balls.saturating_add(detail.your_balls);
    }

    let outcome = resolve_outcome(detail);
    apply_outcome(&mut standings, your_idx, opp_idx, outcome);

    recompute_table_nrr(&mut standings);
    let sorted_standings = sort_standings(&standings);

    let your_team_standing = refresh(&standings, &detail.your_team)?;
    let opponent_standing = refresh(&standings, &detail.opponent_team)?;

    trace!(
        your_team = %your_team_standing.team,
        opponent = %opponent_standing.team,
        ?outcome,
        your_nrr = your_team_standing.nrr(),
        "simulated match"
    );

    Ok(SimulatedMatch {
        standings,
        sorted_standings,
        your_team_standing,
        opponent_standing,
        outcome,
    })
}

fn locate(standings: &[TeamStanding], team: &str) -> Result<usize, ScenarioError> {
    find_team_index(standings, team).ok_or_else(|| ScenarioError::TeamNotFound {
        team: team.to_string(),
    })
}

fn refresh(standings: &[TeamStanding], team: &str) -> Result<TeamStanding, ScenarioError> {
    find_team_index(standings, team)
        .map(|idx| standings[idx].clone())
        .ok_or_else(|| ScenarioError::RefreshFailed {
            team: team.to_string(),
        })
}

fn apply_outcome(
    standings: &mut [TeamStanding],
    your_idx: usize,
    opp_idx: usize,
    outcome: MatchOutcome,
) {
    match outcome {
        MatchOutcome::YourWin => credit_result(standings, your_idx, opp_idx),
        MatchOutcome::OpponentWin => credit_result(standings, opp_idx, your_idx),
        MatchOutcome::Tie => {
            for idx in [your_idx, opp_idx] {
                let row = &mut standings[idx];
                row.points = row.points.saturating_add(POINTS_FOR_TIE);
            }
        }
    }
}

fn credit_result(standings: &mut [TeamStanding], winner: usize, loser: usize) {
    let row = &mut standings[winner];
    row.won = row.won.saturating_add(1);
    row.points = row.points.saturating_add(POINTS_FOR_WIN);

    let row = &mut standings[loser];
    row.lost = row.lost.saturating_add(1);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
