//! Tests for available, forces, dates and config.

use super::parse;
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_available() {
    match parse(&["stopsearch", "available"]) {
        CliCommand::Available { export } => assert!(export.is_none()),
        _ => panic!("expected Available"),
    }
}

#[test]
fn cli_parse_available_export() {
    match parse(&["stopsearch", "available", "--export", "available.csv"]) {
        CliCommand::Available { export } => {
            assert_eq!(export.as_deref(), Some(Path::new("available.csv")))
        }
        _ => panic!("expected Available with --export"),
    }
}

#[test]
fn cli_parse_forces_dates_config() {
    assert!(matches!(parse(&["stopsearch", "forces"]), CliCommand::Forces));
    assert!(matches!(parse(&["stopsearch", "dates"]), CliCommand::Dates));
    assert!(matches!(parse(&["stopsearch", "config"]), CliCommand::Config));
}
