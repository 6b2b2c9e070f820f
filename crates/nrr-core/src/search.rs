// Scenario search: sweep every possible outcome of the next fixture and keep
// the ones that land your team on the requested table position.
//
// Rank depends on NRR, which moves non-monotonically with the swept value
// once other rows in the table are involved, so both searches walk the full
// range instead of bisecting it.

use tracing::debug;

use crate::error::ScenarioError;
use crate::overs::{Overs, BALLS_PER_OVER};
use crate::scenario::Toss;
use crate::simulator::{simulate_match, MatchDetail, SimulatedMatch};
use crate::standings::BaseStandings;

// ---------------------------------------------------------------------------
// Inputs and results
// ---------------------------------------------------------------------------

/// Batting first: your team posts `your_runs`; how few must the opponent
/// score?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictionConfig {
    pub your_team: String,
    pub opponent_team: String,
    pub total_overs: u32,
    /// 1-based table position.
    pub desired_position: usize,
    pub your_runs: u32,
}

/// Bowling first: the opponent posts `target_runs`; how quickly must your
/// team chase it?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaseConfig {
    pub your_team: String,
    pub opponent_team: String,
    pub total_overs: u32,
    /// 1-based table position.
    pub desired_position: usize,
    pub target_runs: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestrictionRange {
    pub min_runs: u32,
    pub max_runs: u32,
    pub min_nrr: f64,
    pub max_nrr: f64,
}

/// Ball-count bounds of qualifying chases. `min_overs` is the fastest chase,
/// `max_overs` the slowest.
#[derive(Debug, Clone, PartialEq)]
pub struct ChaseRange {
    pub min_overs: Overs,
    pub max_overs: Overs,
    pub min_nrr: f64,
    pub max_nrr: f64,
}

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

/// Running min/max over the swept value and the NRR it produced.
#[derive(Debug, Default)]
struct RangeAccumulator {
    bounds: Option<(u32, u32)>,
    nrr: Option<(f64, f64)>,
    hits: usize,
}

impl RangeAccumulator {
    fn record(&mut self, value: u32, nrr: f64) {
        self.bounds = Some(match self.bounds {
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
            None => (value, value),
        });
        self.nrr = Some(match self.nrr {
            Some((lo, hi)) => (lo.min(nrr), hi.max(nrr)),
            None => (nrr, nrr),
        });
        self.hits += 1;
    }

    fn finish(self) -> Option<((u32, u32), (f64, f64))> {
        Some((self.bounds?, self.nrr?))
    }
}

/// Record `value` when the simulated table puts your team at `desired`.
fn record_if_placed(
    acc: &mut RangeAccumulator,
    result: &SimulatedMatch,
    desired: usize,
    value: u32,
) {
    if result.your_position() == Some(desired) {
        acc.record(value, result.your_team_standing.nrr());
    }
}

// ---------------------------------------------------------------------------
// Searches
// ---------------------------------------------------------------------------

/// Sweep the opponent's score from 0 to `your_runs`, both innings lasting the
/// full allocation, and bound the scores that leave your team at
/// `desired_position`.
pub fn find_restriction_range(
    base: &BaseStandings,
    config: &RestrictionConfig,
) -> Result<RestrictionRange, ScenarioError> {
    let total_balls = config.total_overs.saturating_mul(BALLS_PER_OVER);
    let mut acc = RangeAccumulator::default();

    for opponent_runs in 0..=config.your_runs {
        let result = simulate_match(
            base,
            &MatchDetail {
                your_team: config.your_team.clone(),
                opponent_team: config.opponent_team.clone(),
                your_runs: config.your_runs,
                your_balls: total_balls,
                opponent_runs,
                opponent_balls: total_balls,
                your_team_chasing: false,
            },
        )?;
        record_if_placed(&mut acc, &result, config.desired_position, opponent_runs);
    }

    debug!(
        your_team = %config.your_team,
        opponent = %config.opponent_team,
        swept = u64::from(config.your_runs) + 1,
        qualifying = acc.hits,
        "restriction sweep finished"
    );

    let ((min_runs, max_runs), (min_nrr, max_nrr)) =
        acc.finish().ok_or(ScenarioError::NoSolution {
            toss: Toss::BattingFirst,
            desired_position: config.desired_position,
        })?;

    Ok(RestrictionRange {
        min_runs,
        max_runs,
        min_nrr,
        max_nrr,
    })
}

/// Sweep the balls your team takes to reach `target_runs`, from one ball to
/// the full allocation, and bound the chases that leave your team at
/// `desired_position`.
pub fn find_chase_range(
    base: &BaseStandings,
    config: &ChaseConfig,
) -> Result<ChaseRange, ScenarioError> {
    let total_balls = config.total_overs.saturating_mul(BALLS_PER_OVER);
    let mut acc = RangeAccumulator::default();

    for balls in 1..=total_balls {
        let result = simulate_match(
            base,
            &MatchDetail {
                your_team: config.your_team.clone(),
                opponent_team: config.opponent_team.clone(),
                your_runs: config.target_runs,
                your_balls: balls,
                opponent_runs: config.target_runs,
                opponent_balls: total_balls,
                your_team_chasing: true,
            },
        )?;
        record_if_placed(&mut acc, &result, config.desired_position, balls);
    }

    debug!(
        your_team = %config.your_team,
        opponent = %config.opponent_team,
        swept = total_balls,
        qualifying = acc.hits,
        "chase sweep finished"
    );

    let ((min_balls, max_balls), (min_nrr, max_nrr)) =
        acc.finish().ok_or(ScenarioError::NoSolution {
            toss: Toss::BowlingFirst,
            desired_position: config.desired_position,
        })?;

    Ok(ChaseRange {
        min_overs: Overs::from_balls(min_balls),
        max_overs: Overs::from_balls(max_balls),
        min_nrr,
        max_nrr,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overs::RunsBalls;
    use crate::standings::TeamStanding;

    // Alpha (4 pts, NRR 0.0) trails Bravo (6 pts, NRR 0.75) and faces
    // Charlie (2 pts, NRR -0.75). A win lifts Alpha level with Bravo on
    // points, so first place comes down to NRR.
    fn fixture() -> BaseStandings {
        let rb = |runs, balls| RunsBalls { runs, balls };
        BaseStandings::new(vec![
            TeamStanding::new("Alpha", 2, 2, 0, 4, rb(300, 240), rb(300, 240)),
            TeamStanding::new("Bravo", 3, 3, 0, 6, rb(330, 240), rb(300, 240)),
            TeamStanding::new("Charlie", 2, 1, 1, 2, rb(280, 240), rb(310, 240)),
        ])
    }

    fn restriction(position: usize) -> RestrictionConfig {
        RestrictionConfig {
            your_team: "Alpha".into(),
            opponent_team: "Charlie".into(),
            total_overs: 20,
            desired_position: position,
            your_runs: 150,
        }
    }

    fn chase(position: usize) -> ChaseConfig {
        ChaseConfig {
            your_team: "Alpha".into(),
            opponent_team: "Charlie".into(),
            total_overs: 20,
            desired_position: position,
            target_runs: 150,
        }
    }

    #[test]
    fn restriction_range_for_top_spot() {
        let base = fixture();
        let range = find_restriction_range(&base, &restriction(1)).unwrap();
        assert_eq!(range.min_runs, 0);
        assert_eq!(range.max_runs, 105);
        assert_eq!(range.min_nrr, 0.75);
        assert_eq!(range.max_nrr, 2.5);
    }

    #[test]
    fn one_run_past_max_changes_position() {
        let base = fixture();
        let range = find_restriction_range(&base, &restriction(1)).unwrap();
        let result = simulate_match(
            &base,
            &MatchDetail {
                your_team: "Alpha".into(),
                opponent_team: "Charlie".into(),
                your_runs: 150,
                your_balls: 120,
                opponent_runs: range.max_runs + 1,
                opponent_balls: 120,
                your_team_chasing: false,
            },
        )
        .unwrap();
        assert_eq!(result.your_position(), Some(2));
    }

    #[test]
    fn restriction_range_for_second_spot() {
        let base = fixture();
        let range = find_restriction_range(&base, &restriction(2)).unwrap();
        assert_eq!(range.min_runs, 106);
        assert_eq!(range.max_runs, 150);
        assert_eq!(range.min_nrr, 0.0);
        assert_eq!(range.max_nrr, 0.733);
    }

    #[test]
    fn chase_range_for_top_spot() {
        let base = fixture();
        let range = find_chase_range(&base, &chase(1)).unwrap();
        assert_eq!(range.min_overs.balls(), 1);
        assert_eq!(range.max_overs.balls(), 87);
        assert_eq!(range.min_overs.as_decimal(), 0.1);
        assert_eq!(range.max_overs.as_decimal(), 14.3);
        assert_eq!(range.min_nrr, 0.757);
        assert_eq!(range.max_nrr, 3.703);
    }

    #[test]
    fn chase_range_for_second_spot() {
        let base = fixture();
        let range = find_chase_range(&base, &chase(2)).unwrap();
        assert!(range.min_overs.balls() < range.max_overs.balls());
        assert_eq!(range.min_overs.to_string(), "14.4");
        assert_eq!(range.max_overs.to_string(), "20.0");
        assert_eq!(range.min_nrr, 0.0);
        assert_eq!(range.max_nrr, 0.732);
    }

    #[test]
    fn unreachable_position_has_no_solution() {
        let base = fixture();
        let err = find_restriction_range(&base, &restriction(3)).unwrap_err();
        assert!(err.is_no_solution());

        let err = find_chase_range(&base, &chase(4)).unwrap_err();
        assert_eq!(
            err,
            ScenarioError::NoSolution {
                toss: Toss::BowlingFirst,
                desired_position: 4,
            }
        );
    }

    #[test]
    fn zero_overs_chase_has_no_solution() {
        let base = fixture();
        let mut config = chase(1);
        config.total_overs = 0;
        assert!(find_chase_range(&base, &config).unwrap_err().is_no_solution());
    }

    #[test]
    fn unknown_team_fails_before_sweeping() {
        let base = fixture();
        let mut config = restriction(1);
        config.opponent_team = "Delta".into();
        assert_eq!(
            find_restriction_range(&base, &config).unwrap_err(),
            ScenarioError::TeamNotFound {
                team: "Delta".into()
            }
        );
    }
}
