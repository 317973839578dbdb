//! Basic example of the Registrar service registry.
//!
//! Run with `RUST_LOG=registrar_container=trace` to see every bind,
//! resolve and cache hit.

use registrar::prelude::*;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

// === Define your traits and types ===

trait Log: Send + Sync {
    fn info(&self, msg: &str);
}

struct ConsoleLog;

impl Log for ConsoleLog {
    fn info(&self, msg: &str) {
        println!("[LOG] {msg}");
    }
}

#[derive(Clone)]
struct Config {
    database_url: String,
    debug: bool,
}

struct Database {
    url: String,
    log: Arc<dyn Log>,
}

impl Database {
    fn query(&self, sql: &str) -> String {
        self.log.info(&format!("Executing: {sql}"));
        format!("Results from {}", self.url)
    }
}

struct UserService {
    db: Arc<Database>,
    log: Arc<dyn Log>,
}

impl UserService {
    fn get_user(&self, id: u64) -> String {
        self.log.info(&format!("Getting user {id}"));
        self.db.query(&format!("SELECT * FROM users WHERE id = {id}"))
    }
}

// === The closed set of service names ===

mod services {
    use super::*;

    pub const CONFIG: ServiceKey<Config> = ServiceKey::new("config");
    pub const LOGGER: ServiceKey<Arc<dyn Log>> = ServiceKey::new("logger");
    pub const DATABASE: ServiceKey<Arc<Database>> = ServiceKey::new("database");
    pub const USERS: ServiceKey<UserService> = ServiceKey::new("users");
}

struct InfrastructureProvider;

impl Provider for InfrastructureProvider {
    fn register(&self, registry: &mut Registry) -> Result<()> {
        registry
            .singleton(services::CONFIG, |_| {
                Ok(Config {
                    database_url: "postgres://localhost/myapp".to_string(),
                    debug: true,
                })
            })?
            .singleton(services::LOGGER, |_| Ok(Arc::new(ConsoleLog) as Arc<dyn Log>))?
            .singleton(services::DATABASE, |r| {
                let config = r.resolve(services::CONFIG)?;
                Ok(Arc::new(Database {
                    url: config.database_url,
                    log: r.resolve(services::LOGGER)?,
                }))
            })?;
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("registrar_container=debug,basic=info")),
        )
        .init();

    let mut registry = Registry::builder()
        .provider(InfrastructureProvider)
        .build()?;

    // UserService is transient (new each time)
    registry.bind(services::USERS, |r| {
        Ok(UserService {
            db: r.resolve(services::DATABASE)?,
            log: r.resolve(services::LOGGER)?,
        })
    });

    info!(?registry, "Registry ready");

    let config = registry.resolve(services::CONFIG)?;
    info!(url = %config.database_url, debug = config.debug, "Config loaded");

    let first = registry.resolve(services::USERS)?;
    println!("{}", first.get_user(42));

    let second = registry.resolve(services::USERS)?;
    println!("{}", second.get_user(7));
    assert!(Arc::ptr_eq(&first.db, &second.db));

    if let Err(err) = registry.resolve(ServiceKey::<String>::new("user")) {
        println!("{err}");
    }

    registry.drop();
    info!(id = registry.instance_id(), bound = registry.len(), "Registry dropped");
    Ok(())
}
