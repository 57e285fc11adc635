//! Shared fixtures for integration tests.
//!
//! - `assets_with()` - temp assets directory holding placeholder PDFs
//! - `catalogue_resolver()` - resolver with the production alias table and keywords
//! - `unreachable_postgres()` / `live_postgres()` - recorder fixtures for the Postgres sink
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;
use tempfile::TempDir;

use leadgate::config::{DEFAULT_ALIASES, DEFAULT_FALLBACK_KEYWORDS};
use leadgate::recorder::Recorder;
use leadgate::resolver::Resolver;

/// Every file named by the alias table.
pub const CATALOGUE: &[&str] = &[
    "Air-Cool .pdf",
    "Cutter compactor.pdf",
    "Force Feeder GE-RE-V Series .pdf",
    "DRY WASH .pdf",
    "Size reduction Equipments.pdf",
    "Palletizing Equipement  .pdf",
];

/// Body written into each fixture file, so responses can be matched to files.
pub fn pdf_bytes(file_name: &str) -> Vec<u8> {
    format!("%PDF-1.4\n% {file_name}\n").into_bytes()
}

pub fn assets_with(files: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for f in files {
        fs::write(dir.path().join(f), pdf_bytes(f)).expect("Failed to write asset");
    }
    dir
}

pub fn catalogue_resolver(assets_dir: &Path) -> Resolver {
    Resolver::new(
        assets_dir,
        DEFAULT_ALIASES.iter().map(|(k, v)| (k.to_string(), v.to_string())),
        DEFAULT_FALLBACK_KEYWORDS.iter().map(|k| k.to_string()).collect(),
    )
}

/// Postgres sink pointed at a closed local port.
pub fn unreachable_postgres() -> Recorder {
    Recorder::postgres(Some(
        PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("leads")
            .password("leads")
            .database("leads"),
    ))
}

/// Postgres sink from DATABASE_URL, or `None` when no database is available.
pub fn live_postgres() -> Option<Recorder> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let options = PgConnectOptions::from_str(&url).expect("Invalid DATABASE_URL");
    Some(Recorder::postgres(Some(options)))
}
