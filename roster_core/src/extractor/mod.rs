pub mod roster_extractor;

pub use roster_extractor::RosterExtractor;
