use anyhow::{anyhow, Result};
use std::{env, fs, io::ErrorKind, net::IpAddr, path::Path};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "vulnboard.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

pub struct Config {
    pub db: Db,
    pub webserver: WebServer,
    pub lab: Lab,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct WebServer {
    pub address: IpAddr,
    pub port: u16,
    pub workers: usize,
}

pub struct Lab {
    pub enable_probes: bool,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config { db, webserver, lab } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();

        if connection_pool_size == 0 {
            return Err(anyhow!("The connection pool needs at least one connection"));
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::WebServer {
            address,
            port,
            workers,
        } = webserver.unwrap_or_default();

        if workers == 0 {
            return Err(anyhow!("The web server needs at least one worker"));
        }
        let webserver = WebServer {
            address,
            port,
            workers,
        };

        let raw::Lab { enable_probes } = lab.unwrap_or_default();
        let lab = Lab { enable_probes };

        Ok(Self { db, webserver, lab })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<Config> {
        let raw: raw::Config = toml::from_str(toml)?;
        Config::try_from(raw)
    }

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = None;
        let _: Config = Config::try_load_from_file_or_default(file).unwrap();
    }

    #[test]
    fn default_values() {
        let cfg = Config::try_from(raw::Config::default()).unwrap();
        assert_eq!(cfg.db.conn_sqlite, "comentarios.db");
        assert_eq!(cfg.db.conn_pool_size, 1);
        assert_eq!(cfg.webserver.port, 8080);
        assert_eq!(cfg.webserver.workers, 1);
        assert!(cfg.lab.enable_probes);
    }

    #[test]
    fn fill_missing_sections_with_defaults() {
        let cfg = parse(
            r#"
            [lab]
            enable-probes = false
            "#,
        )
        .unwrap();
        assert!(!cfg.lab.enable_probes);
        assert_eq!(cfg.webserver.port, 8080);
        assert_eq!(cfg.db.conn_pool_size, 1);
    }

    #[test]
    fn read_kebab_case_keys() {
        let cfg = parse(
            r#"
            [db]
            connection-sqlite = "/tmp/board.db"
            connection-pool-size = 4

            [webserver]
            address = "0.0.0.0"
            port = 9000
            workers = 2
            "#,
        )
        .unwrap();
        assert_eq!(cfg.db.conn_sqlite, "/tmp/board.db");
        assert_eq!(cfg.db.conn_pool_size, 4);
        assert_eq!(cfg.webserver.address.to_string(), "0.0.0.0");
        assert_eq!(cfg.webserver.port, 9000);
        assert_eq!(cfg.webserver.workers, 2);
    }

    #[test]
    fn reject_empty_connection_pool() {
        let res = parse(
            r#"
            [db]
            connection-sqlite = "board.db"
            connection-pool-size = 0
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn reject_zero_workers() {
        let res = parse(
            r#"
            [webserver]
            address = "127.0.0.1"
            port = 8080
            workers = 0
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vulnboard.toml");
        fs::write(&path, "[lab]\nenable-probes = false\n").unwrap();
        let cfg = Config::try_load_from_file_or_default(Some(&path)).unwrap();
        assert!(!cfg.lab.enable_probes);
    }

    #[test]
    fn reject_malformed_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vulnboard.toml");
        fs::write(&path, "[db\n").unwrap();
        assert!(Config::try_load_from_file_or_default(Some(&path)).is_err());
    }
}
