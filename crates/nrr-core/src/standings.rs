// League table rows and the repository operations over them: cloning, NRR
// recomputation, ranking, and lookup by name.

use std::cmp::Ordering;

use crate::overs::{calculate_net_run_rate, RunsBalls};

// ---------------------------------------------------------------------------
// TeamStanding
// ---------------------------------------------------------------------------

/// One row of the league table.
///
/// The cumulative fields are public so a simulation can add a match to them;
/// `nrr` is derived and only changes through [`TeamStanding::recompute_nrr`].
#[derive(Debug, Clone, PartialEq)]
pub struct TeamStanding {
    pub team: String,
    pub matches: u32,
    pub won: u32,
    pub lost: u32,
    pub points: u32,
    /// Runs scored across all matches.
    pub for_runs: u32,
    /// Balls faced across all matches.
    pub for_balls: u32,
    /// Runs conceded across all matches.
    pub against_runs: u32,
    /// Balls bowled across all matches.
    pub against_balls: u32,
    nrr: f64,
}

impl TeamStanding {
    pub fn new(
        team: impl Into<String>,
        matches: u32,
        won: u32,
        lost: u32,
        points: u32,
        scored: RunsBalls,
        conceded: RunsBalls,
    ) -> Self {
        let mut standing = TeamStanding {
            team: team.into(),
            matches,
            won,
            lost,
            points,
            for_runs: scored.runs,
            for_balls: scored.balls,
            against_runs: conceded.runs,
            against_balls: conceded.balls,
            nrr: 0.0,
        };
        standing.recompute_nrr();
        standing
    }

    pub fn nrr(&self) -> f64 {
        self.nrr
    }

    /// Re-derive `nrr` from the current cumulative runs and balls.
    pub fn recompute_nrr(&mut self) {
        self.nrr = calculate_net_run_rate(
            self.for_runs,
            self.for_balls,
            self.against_runs,
            self.against_balls,
        );
    }

    /// Case-insensitive name match.
    pub fn is_named(&self, name: &str) -> bool {
        self.team.to_lowercase() == name.to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// BaseStandings
// ---------------------------------------------------------------------------

/// The canonical league table, in seed order.
///
/// Only shared access is offered: callers that want to change a row get a
/// clone via [`BaseStandings::clone_standings`].
#[derive(Debug)]
pub struct BaseStandings {
    rows: Vec<TeamStanding>,
}

impl BaseStandings {
    pub fn new(mut rows: Vec<TeamStanding>) -> Self {
        recompute_table_nrr(&mut rows);
        BaseStandings { rows }
    }

    pub fn rows(&self) -> &[TeamStanding] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clone_standings(&self) -> Vec<TeamStanding> {
        clone_standings(&self.rows)
    }

    pub fn find(&self, name: &str) -> Option<&TeamStanding> {
        find_team_standing(&self.rows, name)
    }
}

// ---------------------------------------------------------------------------
// Table operations
// ---------------------------------------------------------------------------

/// Deep copy of a table. Rows own all their data, so the copy shares nothing
/// with the source.
pub fn clone_standings(standings: &[TeamStanding]) -> Vec<TeamStanding> {
    standings.to_vec()
}

pub fn recompute_team_nrr(standing: &mut TeamStanding) {
    standing.recompute_nrr();
}

pub fn recompute_table_nrr(standings: &mut [TeamStanding]) {
    standings.iter_mut().for_each(recompute_team_nrr);
}

/// Ranked copy of a table: points descending, then NRR descending, then team
/// name ascending. The sort is stable and leaves the input untouched.
pub fn sort_standings(standings: &[TeamStanding]) -> Vec<TeamStanding> {
    let mut sorted = standings.to_vec();
    sorted.sort_by(compare_rank);
    sorted
}

/// Ranking comparator used by [`sort_standings`].
pub fn compare_rank(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.nrr.partial_cmp(&a.nrr).unwrap_or(Ordering::Equal))
        .then_with(|| compare_team_names(&a.team, &b.team))
}

/// Dictionary-style name ordering: letters compare without regard to case
/// first, and a case-only difference puts lowercase ahead of uppercase.
/// Punctuation and symbols compare by code point, so `~` or `{` sort after
/// letters rather than before them as a locale collator would place them.
pub fn compare_team_names(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a
        .cmp(folded_b)
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Case-insensitive lookup. Absence is an ordinary outcome, not an error.
pub fn find_team_standing<'a>(standings: &'a [TeamStanding], team: &str) -> Option<&'a TeamStanding> {
    standings.iter().find(|s| s.is_named(team))
}

pub fn find_team_index(standings: &[TeamStanding], team: &str) -> Option<usize> {
    standings.iter().position(|s| s.is_named(team))
}

/// 1-based table position of `team` within an already-ranked table.
pub fn team_position(sorted: &[TeamStanding], team: &str) -> Option<usize> {
    find_team_index(sorted, team).map(|idx| idx + 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn row(team: &str, points: u32, scored: (u32, u32), conceded: (u32, u32)) -> TeamStanding {
        TeamStanding::new(
            team,
            points / 2,
            points / 2,
            0,
            points,
            RunsBalls { runs: scored.0, balls: scored.1 },
            RunsBalls { runs: conceded.0, balls: conceded.1 },
        )
    }

    fn names(table: &[TeamStanding]) -> Vec<&str> {
        table.iter().map(|s| s.team.as_str()).collect()
    }

    #[test]
    fn new_derives_nrr_from_cumulative_fields() {
        let standing = row("Chennai Super Kings", 10, (1130, 799), (1071, 833));
        assert_eq!(standing.nrr(), 0.771);
    }

    #[test]
    fn recompute_follows_mutation() {
        let mut standing = row("Alpha", 4, (300, 240), (300, 240));
        assert_eq!(standing.nrr(), 0.0);
        standing.for_runs += 150;
        standing.for_balls += 120;
        standing.against_runs += 140;
        standing.against_balls += 120;
        recompute_team_nrr(&mut standing);
        assert_eq!(standing.nrr(), 0.167);
    }

    #[test]
    fn clone_does_not_alias_source() {
        let base = BaseStandings::new(vec![
            row("Alpha", 4, (300, 240), (300, 240)),
            row("Bravo", 2, (280, 240), (300, 240)),
        ]);
        let mut first = base.clone_standings();
        let second = base.clone_standings();

        first[0].points += 2;
        first[0].team.push_str(" XI");
        first[1].for_runs = 0;
        recompute_table_nrr(&mut first);

        assert_eq!(base.rows()[0].points, 4);
        assert_eq!(base.rows()[0].team, "Alpha");
        assert_eq!(base.rows()[1].for_runs, 280);
        assert_eq!(second, base.rows());
    }

    #[test]
    fn sort_orders_by_points_then_nrr() {
        let table = vec![
            row("Delhi Capitals", 8, (1085, 756), (1136, 822)),
            row("Mumbai Indians", 4, (1003, 932), (1134, 829)),
            row("Royal Challengers Bangalore", 8, (1217, 840), (1066, 790)),
            row("Chennai Super Kings", 10, (1130, 799), (1071, 833)),
        ];
        let sorted = sort_standings(&table);
        assert_eq!(
            names(&sorted),
            vec![
                "Chennai Super Kings",
                "Royal Challengers Bangalore",
                "Delhi Capitals",
                "Mumbai Indians",
            ]
        );
        // Input order is preserved.
        assert_eq!(table[0].team, "Delhi Capitals");
    }

    #[test]
    fn sort_breaks_full_ties_by_name() {
        let table = vec![
            row("charlie", 4, (300, 240), (300, 240)),
            row("Bravo", 4, (300, 240), (300, 240)),
            row("alpha", 4, (300, 240), (300, 240)),
        ];
        assert_eq!(names(&sort_standings(&table)), vec!["alpha", "Bravo", "charlie"]);
    }

    #[test]
    fn sort_is_idempotent() {
        let table = vec![
            row("Bravo", 6, (330, 240), (300, 240)),
            row("Alpha", 4, (300, 240), (300, 240)),
            row("Charlie", 4, (300, 240), (300, 240)),
            row("Delta", 2, (280, 240), (310, 240)),
        ];
        let once = sort_standings(&table);
        let twice = sort_standings(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn name_collation_is_case_insensitive_first() {
        assert_eq!(compare_team_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_team_names("Banana", "apple"), Ordering::Greater);
        assert_eq!(compare_team_names("alpha", "Alpha"), Ordering::Less);
        assert_eq!(compare_team_names("Alpha", "Alpha"), Ordering::Equal);
    }

    #[test]
    fn name_collation_puts_symbols_after_letters() {
        assert_eq!(compare_team_names("Team~", "Teamz"), Ordering::Greater);
        assert_eq!(compare_team_names("{XI}", "Zulu"), Ordering::Greater);
        assert_eq!(compare_team_names("Team 1", "Team A"), Ordering::Less);
    }

    #[test]
    fn find_is_case_insensitive() {
        let table = vec![
            row("Rajasthan Royals", 6, (1066, 770), (1094, 823)),
            row("Delhi Capitals", 8, (1085, 756), (1136, 822)),
        ];
        let found = find_team_standing(&table, "delhi CAPITALS").unwrap();
        assert_eq!(found.team, "Delhi Capitals");
        assert_eq!(find_team_index(&table, "RAJASTHAN royals"), Some(0));
        assert!(find_team_standing(&table, "Delhi").is_none());
    }

    #[test]
    fn position_is_one_based() {
        let sorted = sort_standings(&[
            row("Alpha", 4, (300, 240), (300, 240)),
            row("Bravo", 6, (330, 240), (300, 240)),
        ]);
        assert_eq!(team_position(&sorted, "bravo"), Some(1));
        assert_eq!(team_position(&sorted, "Alpha"), Some(2));
        assert_eq!(team_position(&sorted, "Zulu"), None);
    }
}
