//! `verdant version` command - Display version information.

use crate::error::CliResult;
use crate::output::{self, field};

/// Package version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the version command
pub async fn run() -> CliResult<()> {
    output::title("Verdant");

    field("Version", VERSION);
    field("Binary", "verdant");

    #[cfg(debug_assertions)]
    let build_mode = "debug";
    #[cfg(not(debug_assertions))]
    let build_mode = "release";

    field("Build", build_mode);

    let mut drivers = Vec::new();

    #[cfg(feature = "postgres")]
    drivers.push("postgres");

    #[cfg(feature = "mysql")]
    drivers.push("mysql");

    if drivers.is_empty() {
        drivers.push("none");
    }

    field("Drivers", &drivers.join(", "));

    output::blank();
    output::muted(env!("CARGO_PKG_REPOSITORY"));

    Ok(())
}
