//! Deployment environment, recorded once at startup.

use clap::ValueEnum;
use once_cell::sync::OnceCell;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Environment {
    Development,
    Production,
}

static ENVIRONMENT: OnceCell<Environment> = OnceCell::new();

/// Later calls keep the first value, so tests may initialise repeatedly.
pub fn init_environment(environment: Environment) {
    let _ = ENVIRONMENT.set(environment);
}

/// Error views only expose internal detail when this returns true; an
/// uninitialised environment counts as production.
pub fn is_development() -> bool {
    matches!(ENVIRONMENT.get(), Some(Environment::Development))
}
