//! 게임 데이터 모듈
//!
//! - Baseline config / rules / roster loading (YAML, JSON)
//! - Built-in demo rosters

pub mod demo;
pub mod loader;

pub use demo::{demo_matchup, demo_team};
pub use loader::{
    config_to_string, default_config, load_config_file, load_config_str, load_rules_file,
    load_rules_str, load_team_file, load_team_str, DataFormat,
};
