// Scenario service: the boundary a transport talks to. Lists teams, validates
// scenario requests, and dispatches them to the matching search.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::error::ScenarioError;
use crate::overs::{round_to_thousandths, Overs};
use crate::search::{find_chase_range, find_restriction_range, ChaseConfig, RestrictionConfig};
use crate::standings::{sort_standings, BaseStandings, TeamStanding};

// ---------------------------------------------------------------------------
// Toss
// ---------------------------------------------------------------------------

/// Which innings your team plays first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Toss {
    BattingFirst,
    BowlingFirst,
}

impl Toss {
    pub fn as_str(self) -> &'static str {
        match self {
            Toss::BattingFirst => "batting-first",
            Toss::BowlingFirst => "bowling-first",
        }
    }
}

impl fmt::Display for Toss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Toss {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "batting-first" => Ok(Toss::BattingFirst),
            "bowling-first" => Ok(Toss::BowlingFirst),
            other => Err(format!(
                "unknown toss `{other}`; expected `batting-first` or `bowling-first`"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Team listing
// ---------------------------------------------------------------------------

/// Public projection of a table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub team: String,
    pub matches: u32,
    pub won: u32,
    pub lost: u32,
    pub nrr: f64,
    pub points: u32,
}

impl From<&TeamStanding> for TeamSummary {
    fn from(s: &TeamStanding) -> Self {
        TeamSummary {
            team: s.team.clone(),
            matches: s.matches,
            won: s.won,
            lost: s.lost,
            nrr: s.nrr(),
            points: s.points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTeam {
    pub position: usize,
    #[serde(flatten)]
    pub summary: TeamSummary,
}

/// Every team in seed order.
pub fn get_teams(base: &BaseStandings) -> Vec<TeamSummary> {
    base.rows().iter().map(TeamSummary::from).collect()
}

/// Every team in rank order with its 1-based position.
pub fn ranked_teams(base: &BaseStandings) -> Vec<RankedTeam> {
    sort_standings(base.rows())
        .iter()
        .enumerate()
        .map(|(idx, s)| RankedTeam {
            position: idx + 1,
            summary: TeamSummary::from(s),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Requests and validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRequest {
    pub your_team: String,
    pub opponent_team: String,
    pub total_overs: u32,
    pub desired_position: usize,
    pub toss: Toss,
    /// Runs your team scores when batting first, or the target it chases
    /// when bowling first.
    pub runs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

/// Every problem found in a request, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid scenario request: {}", summarize(.issues))]
pub struct ValidationErrors {
    pub issues: Vec<ValidationIssue>,
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{} {}", i.field, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ScenarioRequest {
    pub fn validate(&self, max_overs: u32) -> Result<(), ValidationErrors> {
        let mut issues = Vec::new();
        let mut push = |field: &str, message: String| {
            issues.push(ValidationIssue {
                field: field.to_string(),
                message,
            })
        };

        if self.your_team.trim().is_empty() {
            push("yourTeam", "must not be empty".into());
        }
        if self.opponent_team.trim().is_empty() {
            push("opponentTeam", "must not be empty".into());
        }
        if !self.your_team.trim().is_empty()
            && self.your_team.trim().to_lowercase() == self.opponent_team.trim().to_lowercase()
        {
            push("opponentTeam", "must differ from yourTeam".into());
        }
        if self.total_overs == 0 || self.total_overs > max_overs {
            push(
                "totalOvers",
                format!("must be between 1 and {max_overs}, got {}", self.total_overs),
            );
        }
        if self.desired_position == 0 {
            push("desiredPosition", "must be a positive integer".into());
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { issues })
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NrrRange {
    pub min: f64,
    pub max: f64,
}

impl NrrRange {
    fn rounded(min: f64, max: f64) -> Self {
        NrrRange {
            min: round_to_thousandths(min),
            max: round_to_thousandths(max),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionSummary {
    pub min_runs: u32,
    pub max_runs: u32,
    pub overs: u32,
    pub nrr_range: NrrRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaseSummary {
    pub runs: u32,
    pub min_overs: Overs,
    pub max_overs: Overs,
    pub nrr_range: NrrRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "scenarioType")]
pub enum ScenarioResult {
    #[serde(rename = "batting-first", rename_all = "camelCase")]
    BattingFirst { restriction_range: RestrictionSummary },
    #[serde(rename = "bowling-first", rename_all = "camelCase")]
    BowlingFirst { chase_range: ChaseSummary },
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run the search matching `request.toss` and shape its result. The request
/// is assumed to have passed [`ScenarioRequest::validate`]. Team names are
/// matched with surrounding whitespace trimmed, the same form `validate`
/// checks.
pub fn calculate_scenario(
    base: &BaseStandings,
    request: &ScenarioRequest,
) -> Result<ScenarioResult, ScenarioError> {
    info!(
        your_team = %request.your_team,
        opponent = %request.opponent_team,
        toss = %request.toss,
        overs = request.total_overs,
        position = request.desired_position,
        runs = request.runs,
        "calculating scenario"
    );

    let your_team = request.your_team.trim();
    let opponent_team = request.opponent_team.trim();

    match request.toss {
        Toss::BattingFirst => {
            let range = find_restriction_range(
                base,
                &RestrictionConfig {
                    your_team: your_team.to_string(),
                    opponent_team: opponent_team.to_string(),
                    total_overs: request.total_overs,
                    desired_position: request.desired_position,
                    your_runs: request.runs,
                },
            )?;
            Ok(ScenarioResult::BattingFirst {
                restriction_range: RestrictionSummary {
                    min_runs: range.min_runs,
                    max_runs: range.max_runs,
                    overs: request.total_overs,
                    nrr_range: NrrRange::rounded(range.min_nrr, range.max_nrr),
                },
            })
        }
        Toss::BowlingFirst => {
            let range = find_chase_range(
                base,
                &ChaseConfig {
                    your_team: your_team.to_string(),
                    opponent_team: opponent_team.to_string(),
                    total_overs: request.total_overs,
                    desired_position: request.desired_position,
                    target_runs: request.runs,
                },
            )?;
            Ok(ScenarioResult::BowlingFirst {
                chase_range: ChaseSummary {
                    runs: request.runs,
                    min_overs: range.min_overs,
                    max_overs: range.max_overs,
                    nrr_range: NrrRange::rounded(range.min_nrr, range.max_nrr),
                },
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
