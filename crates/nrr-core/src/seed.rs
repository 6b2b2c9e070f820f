// Seed table loading.
//
// The starting points table is a CSV with one row per team and the
// cumulative batting/bowling totals in "runs/overs" notation:
//
//   team,matches,won,lost,for,against,points,nrr
//   Chennai Super Kings,7,5,2,1130/133.1,1071/138.5,10,0.771
//
// The notation is parsed here, once; the rest of the crate only sees whole
// runs and balls. The `nrr` column is informational and always recomputed.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::LeagueConfig;
use crate::error::ScenarioError;
use crate::overs::parse_runs_overs;
use crate::standings::{BaseStandings, TeamStanding};

/// The table shipped with the crate, used when no seed path is configured.
const EMBEDDED_SEED: &str = include_str!("../data/points_table.csv");

/// Largest gap tolerated between a recorded and a recomputed NRR before the
/// row is flagged.
const NRR_TOLERANCE: f64 = 0.0005;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in seed table: {0}")]
    Csv(#[from] csv::Error),

    #[error("seed row for {team}: bad `{field}` value: {source}")]
    Record {
        team: String,
        field: &'static str,
        source: ScenarioError,
    },

    #[error("duplicate team in seed table: {team}")]
    DuplicateTeam { team: String },

    #[error("seed table produced zero rows")]
    Empty,
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One raw seed row, before the "runs/overs" strings are parsed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedRecord {
    pub team: String,
    pub matches: u32,
    pub won: u32,
    pub lost: u32,
    #[serde(rename = "for")]
    pub scored: String,
    #[serde(rename = "against")]
    pub conceded: String,
    pub points: u32,
    #[serde(default)]
    pub nrr: Option<f64>,
}

fn records_from_reader<R: Read>(rdr: R) -> Result<Vec<SeedRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    reader.deserialize().collect()
}

fn standing_from_record(record: &SeedRecord) -> Result<TeamStanding, SeedError> {
    let field_error = |field: &'static str| {
        let team = record.team.clone();
        move |source: ScenarioError| SeedError::Record {
            team,
            field,
            source,
        }
    };

    let scored = parse_runs_overs(&record.scored).map_err(field_error("for"))?;
    let conceded = parse_runs_overs(&record.conceded).map_err(field_error("against"))?;

    let standing = TeamStanding::new(
        record.team.clone(),
        record.matches,
        record.won,
        record.lost,
        record.points,
        scored,
        conceded,
    );

    if let Some(recorded) = record.nrr {
        if (recorded - standing.nrr()).abs() > NRR_TOLERANCE {
            warn!(
                "seed NRR for '{}' is {:.3} but its totals give {:.3}; using {:.3}",
                record.team,
                recorded,
                standing.nrr(),
                standing.nrr()
            );
        }
    }

    Ok(standing)
}

// ---------------------------------------------------------------------------
// Public loaders
// ---------------------------------------------------------------------------

/// Build the base table from raw records, keeping their order.
pub fn load_base_standings(records: &[SeedRecord]) -> Result<BaseStandings, SeedError> {
    if records.is_empty() {
        return Err(SeedError::Empty);
    }

    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.team.to_lowercase()) {
            return Err(SeedError::DuplicateTeam {
                team: record.team.clone(),
            });
        }
        rows.push(standing_from_record(record)?);
    }

    Ok(BaseStandings::new(rows))
}

/// Parse a seed CSV from any reader.
pub fn load_from_reader<R: Read>(rdr: R) -> Result<BaseStandings, SeedError> {
    let records = records_from_reader(rdr)?;
    load_base_standings(&records)
}

/// Parse a seed CSV file.
pub fn load_from_path(path: &Path) -> Result<BaseStandings, SeedError> {
    let file = std::fs::File::open(path).map_err(|e| SeedError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_from_reader(file)
}

/// The table shipped with the crate.
pub fn load_embedded() -> Result<BaseStandings, SeedError> {
    load_from_reader(EMBEDDED_SEED.as_bytes())
}

/// Load the seed the league config points at, falling back to the embedded
/// table when no path is set.
pub fn load_seed(league: &LeagueConfig) -> Result<BaseStandings, SeedError> {
    let base = match &league.seed_path {
        Some(path) => load_from_path(Path::new(path))?,
        None => load_embedded()?,
    };
    info!(
        "Loaded {} teams for {} from {}",
        base.len(),
        league.name,
        league.seed_path.as_deref().unwrap_or("embedded seed")
    );
    Ok(base)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_seed_loads_in_seed_order() {
        let base = load_embedded().unwrap();
        let names: Vec<_> = base.rows().iter().map(|s| s.team.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Chennai Super Kings",
                "Royal Challengers Bangalore",
                "Delhi Capitals",
                "Rajasthan Royals",
                "Mumbai Indians",
            ]
        );
    }

    #[test]
    fn embedded_seed_parses_overs_into_balls() {
        let base = load_embedded().unwrap();
        let csk = base.find("chennai super kings").unwrap();
        assert_eq!((csk.for_runs, csk.for_balls), (1130, 799));
        assert_eq!((csk.against_runs, csk.against_balls), (1071, 833));
        assert_eq!(csk.points, 10);

        let mi = base.find("Mumbai Indians").unwrap();
        assert_eq!((mi.for_balls, mi.against_balls), (932, 829));
    }

    #[test]
    fn embedded_seed_nrr_is_recomputed() {
        let base = load_embedded().unwrap();
        let nrrs: Vec<f64> = base.rows().iter().map(|s| s.nrr()).collect();
        assert_eq!(nrrs, vec![0.771, 0.597, 0.319, 0.331, -1.75]);
    }

    #[test]
    fn recorded_nrr_does_not_override_totals() {
        let csv_data = "\
team,matches,won,lost,for,against,points,nrr
Alpha,2,2,0,300/40,300/40,4,9.999";
        let base = load_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(base.rows()[0].nrr(), 0.0);
    }

    #[test]
    fn nrr_column_is_optional() {
        let csv_data = "\
team,matches,won,lost,for,against,points
Alpha,2,2,0,300/40,280/40,4";
        let base = load_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(base.rows()[0].nrr(), 0.5);
    }

    #[test]
    fn bad_overs_names_team_and_field() {
        let csv_data = "\
team,matches,won,lost,for,against,points,nrr
Alpha,2,2,0,300/40,280/39.6,4,0.5";
        let err = load_from_reader(csv_data.as_bytes()).unwrap_err();
        match err {
            SeedError::Record { team, field, source } => {
                assert_eq!(team, "Alpha");
                assert_eq!(field, "against");
                assert!(matches!(source, ScenarioError::InvalidFormat { .. }));
            }
            other => panic!("expected Record error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_column_is_csv_error() {
        let csv_data = "\
team,matches,won,lost,for,against,points,nrr
Alpha,two,2,0,300/40,280/40,4,0.5";
        assert!(matches!(
            load_from_reader(csv_data.as_bytes()),
            Err(SeedError::Csv(_))
        ));
    }

    #[test]
    fn empty_seed_is_rejected() {
        let csv_data = "team,matches,won,lost,for,against,points,nrr\n";
        assert!(matches!(
            load_from_reader(csv_data.as_bytes()),
            Err(SeedError::Empty)
        ));
    }

    #[test]
    fn duplicate_team_is_rejected() {
        let csv_data = "\
team,matches,won,lost,for,against,points,nrr
Alpha,2,2,0,300/40,280/40,4,0.5
ALPHA,2,2,0,300/40,280/40,4,0.5";
        assert!(matches!(
            load_from_reader(csv_data.as_bytes()),
            Err(SeedError::DuplicateTeam { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("nrr_seed_test_missing.csv");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(load_from_path(&path), Err(SeedError::Io { .. })));
    }
}
