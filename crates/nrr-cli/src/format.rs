// Human-readable rendering of team tables and scenario results.

use std::fmt::Write;

use nrr_core::overs::{round_to_thousandths, Overs};
use nrr_core::scenario::{RankedTeam, ScenarioRequest, ScenarioResult};

/// `"150"` when both ends agree, otherwise `"120 to 140"`.
pub fn format_runs_range(min: u32, max: u32) -> String {
    if min == max {
        min.to_string()
    } else {
        format!("{min} to {max}")
    }
}

/// Three-decimal NRR band, collapsed to one value when both ends render the
/// same.
pub fn format_nrr_range(min: f64, max: f64) -> String {
    let min_str = format!("{:.3}", round_to_thousandths(min));
    let max_str = format!("{:.3}", round_to_thousandths(max));
    if min_str == max_str {
        min_str
    } else {
        format!("{min_str} to {max_str}")
    }
}

pub fn render_teams(teams: &[RankedTeam]) -> String {
    let width = teams
        .iter()
        .map(|t| t.summary.team.chars().count())
        .max()
        .unwrap_or(0)
        .max("Team".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<width$} {:>3} {:>3} {:>3} {:>7} {:>4}",
        "Pos", "Team", "M", "W", "L", "NRR", "Pts"
    );
    for t in teams {
        let s = &t.summary;
        let _ = writeln!(
            out,
            "{:<4} {:<width$} {:>3} {:>3} {:>3} {:>7.3} {:>4}",
            t.position, s.team, s.matches, s.won, s.lost, s.nrr, s.points
        );
    }
    out
}

pub fn render_scenario(request: &ScenarioRequest, result: &ScenarioResult) -> String {
    let your = &request.your_team;
    match result {
        ScenarioResult::BattingFirst { restriction_range: r } => format!(
            "If {your} score {} runs in {} overs, {your} need to restrict {} between {} runs in {} overs.\n\
             Revised NRR of {your} will be between {}.\n",
            request.runs,
            Overs::whole(request.total_overs),
            request.opponent_team,
            format_runs_range(r.min_runs, r.max_runs),
            Overs::whole(r.overs),
            format_nrr_range(r.nrr_range.min, r.nrr_range.max),
        ),
        ScenarioResult::BowlingFirst { chase_range: c } => format!(
            "{your} need to chase {} runs between {} and {} overs.\n\
             Revised NRR for {your} will be between {}.\n",
            c.runs,
            c.min_overs,
            c.max_overs,
            format_nrr_range(c.nrr_range.min, c.nrr_range.max),
        ),
    }
}
