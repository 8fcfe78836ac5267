// Core algorithm exports
pub mod matcher;
pub mod qualification;
pub mod scoring;

pub use matcher::{compute_matches, MatchOutcome, MatchResult};
pub use qualification::{qualify, Qualification};
pub use scoring::match_percentage;
