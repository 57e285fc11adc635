use std::path::PathBuf;

use sqlx::postgres::PgConnectOptions;

/// Short request keys mapped to exact file names inside the assets directory.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("air-cool", "Air-Cool .pdf"),
    ("cutter-compactor", "Cutter compactor.pdf"),
    ("force-feeder", "Force Feeder GE-RE-V Series .pdf"),
    ("dry-wash", "DRY WASH .pdf"),
    ("size-reduction", "Size reduction Equipments.pdf"),
    ("palletizing", "Palletizing Equipement  .pdf"),
];

/// Generic product-line fragments tried in order when a key matches nothing.
pub const DEFAULT_FALLBACK_KEYWORDS: &[&str] = &[
    "air", "cutter", "compactor", "force", "feeder", "dry", "wash", "size", "pallet",
];

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_ASSETS_DIR: &str = "assets";
const DEFAULT_CSV_PATH: &str = "data/submissions.csv";

/// Postgres connection settings. Host, user and database name are required
/// before a connection is attempted.
#[derive(Debug, Clone, Default)]
pub struct DbConfig {
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub password: String,
    pub name: Option<String>,
}

impl DbConfig {
    /// Connect options, or `None` when DB_HOST/DB_USER/DB_NAME are missing.
    pub fn connect_options(&self) -> Option<PgConnectOptions> {
        let host = self.host.as_deref()?;
        let user = self.user.as_deref()?;
        let name = self.name.as_deref()?;
        Some(
            PgConnectOptions::new()
                .host(host)
                .port(self.port)
                .username(user)
                .password(&self.password)
                .database(name),
        )
    }
}

/// Where submissions are recorded.
#[derive(Debug, Clone)]
pub enum SinkConfig {
    Postgres(DbConfig),
    Csv { path: PathBuf },
    Disabled,
}

/// Process-wide configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub assets_dir: PathBuf,
    pub aliases: Vec<(String, String)>,
    pub fallback_keywords: Vec<String>,
    pub sink: SinkConfig,
}

impl AppConfig {
    /// Read configuration from the process environment (after `.env` has been loaded).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let db = DbConfig {
            host: get("DB_HOST"),
            port: parse_port(get("DB_PORT"), "DB_PORT", DEFAULT_DB_PORT),
            user: get("DB_USER"),
            password: lookup("DB_PASS").unwrap_or_default(),
            name: get("DB_NAME"),
        };

        let sink = match get("SUBMISSIONS_SINK").map(|s| s.to_lowercase()).as_deref() {
            None | Some("postgres") | Some("pg") => SinkConfig::Postgres(db),
            Some("csv") => SinkConfig::Csv {
                path: get("SUBMISSIONS_CSV")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH)),
            },
            Some("none") | Some("off") => SinkConfig::Disabled,
            Some(other) => {
                log::warn!("Unknown SUBMISSIONS_SINK {other:?}, recording disabled");
                SinkConfig::Disabled
            }
        };

        AppConfig {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_port(get("PORT"), "PORT", DEFAULT_PORT),
            debug: parse_bool(get("DEBUG").as_deref()),
            assets_dir: get("ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR)),
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            fallback_keywords: DEFAULT_FALLBACK_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            sink,
        }
    }

    /// Log the effective settings. The database password is never printed.
    pub fn log_summary(&self) {
        log::info!(
            "Config: bind={}:{} debug={} assets_dir={}",
            self.host,
            self.port,
            self.debug,
            self.assets_dir.display()
        );
        match &self.sink {
            SinkConfig::Postgres(db) => log::info!(
                "DB config: host={:?} port={} user={:?} db={:?}",
                db.host,
                db.port,
                db.user,
                db.name
            ),
            SinkConfig::Csv { path } => log::info!("Recording submissions to {}", path.display()),
            SinkConfig::Disabled => log::info!("Submission recording disabled"),
        }
    }
}

/// "1", "true" and "yes" (any case) are truthy; everything else is false.
pub fn parse_bool(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("1") | Some("true") | Some("yes")
    )
}

fn parse_port(value: Option<String>, key: &str, default: u16) -> u16 {
    match value {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {key} value {raw:?}, using {default}");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5000);
        assert!(!cfg.debug);
        assert_eq!(cfg.assets_dir, PathBuf::from("assets"));
        assert_eq!(cfg.aliases.len(), 6);
        assert_eq!(cfg.fallback_keywords.first().map(String::as_str), Some("air"));
        match cfg.sink {
            SinkConfig::Postgres(db) => {
                assert_eq!(db.port, 5432);
                assert!(db.connect_options().is_none());
            }
            other => panic!("expected postgres sink, got {other:?}"),
        }
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        let cfg = config_from(&[("PORT", "eighty"), ("DB_PORT", "-1")]);
        assert_eq!(cfg.port, 5000);
        match cfg.sink {
            SinkConfig::Postgres(db) => assert_eq!(db.port, 5432),
            other => panic!("expected postgres sink, got {other:?}"),
        }
    }

    #[test]
    fn debug_flag_accepts_common_truthy_values() {
        assert!(parse_bool(Some("1")));
        assert!(parse_bool(Some("TRUE")));
        assert!(parse_bool(Some(" yes ")));
        assert!(!parse_bool(Some("no")));
        assert!(!parse_bool(Some("")));
        assert!(!parse_bool(None));
    }

    #[test]
    fn complete_db_settings_produce_connect_options() {
        let cfg = config_from(&[
            ("DB_HOST", "db.internal"),
            ("DB_USER", "leads"),
            ("DB_NAME", "leads"),
            ("DB_PORT", "6543"),
        ]);
        match cfg.sink {
            SinkConfig::Postgres(db) => {
                assert_eq!(db.port, 6543);
                assert!(db.connect_options().is_some());
            }
            other => panic!("expected postgres sink, got {other:?}"),
        }
    }

    #[test]
    fn csv_sink_uses_configured_path() {
        let cfg = config_from(&[("SUBMISSIONS_SINK", "CSV"), ("SUBMISSIONS_CSV", "/tmp/leads.csv")]);
        match cfg.sink {
            SinkConfig::Csv { path } => assert_eq!(path, PathBuf::from("/tmp/leads.csv")),
            other => panic!("expected csv sink, got {other:?}"),
        }
    }

    #[test]
    fn unknown_sink_disables_recording() {
        let cfg = config_from(&[("SUBMISSIONS_SINK", "spreadsheet")]);
        assert!(matches!(cfg.sink, SinkConfig::Disabled));
    }
}
