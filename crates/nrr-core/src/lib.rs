// Library root: the standings, simulation, and scenario-search engine behind
// the NRR calculator, plus the seed and config loaders that feed it.

pub mod config;
pub mod error;
pub mod overs;
pub mod scenario;
pub mod search;
pub mod seed;
pub mod simulator;
pub mod standings;

pub use error::ScenarioError;
pub use overs::{Overs, RunsBalls, BALLS_PER_OVER};
pub use scenario::{
    calculate_scenario, get_teams, ranked_teams, ScenarioRequest, ScenarioResult, Toss,
    ValidationErrors,
};
pub use search::{find_chase_range, find_restriction_range, ChaseConfig, RestrictionConfig};
pub use simulator::{simulate_match, MatchDetail, MatchOutcome, SimulatedMatch};
pub use standings::{BaseStandings, TeamStanding};
