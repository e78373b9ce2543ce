//! Multi-source aggregation and CPM scoring engine.
//!
//! Merges partial channel records from priority-ordered providers into one
//! canonical [`tgcpm_core::ChannelProfile`], gates it through the eligibility
//! checker, derives normalized quality sub-scores, and turns them into a
//! three-tier CPM recommendation in TON with a USD equivalent.

pub mod aggregator;
pub mod config;
pub mod cpm;
pub mod eligibility;
pub mod error;
pub mod pipeline;
pub mod scorer;
pub mod types;

pub use aggregator::aggregate;
pub use config::{AnalysisConfig, ScoreWeights};
pub use cpm::{fiat_tiers, recommend};
pub use eligibility::check_eligibility;
pub use error::AnalysisError;
pub use pipeline::{analyze_channel, AnalysisStore, StoreError};
pub use scorer::score_profile;
pub use types::{
    AnalysisReport, CpmRecommendation, EligibilityResult, EligibilityStatus, EngagementBand,
    FiatTiers, Requirement, ScoreSet,
};
