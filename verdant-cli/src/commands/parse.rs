//! `verdant parse` command - Show how the connection string is read.

use verdant_probe::{ConnectionConfig, DEFAULT_ENV_VAR};

use crate::cli::ParseArgs;
use crate::connector::DriverConnector;
use crate::error::CliResult;
use crate::output::{self, field};

/// Run the parse command
pub async fn run(args: ParseArgs) -> CliResult<()> {
    let mut file = super::load_file_config(args.config.as_deref())?;
    if let Some(var) = args.env_var {
        file.database.env_var = var;
    }

    let config = super::resolve_connection(args.url.as_deref(), &file.database.env_var)?;
    let source = if args.url.is_some() {
        "--url"
    } else {
        file.database.env_var.as_str()
    };

    output::title("Connection string");
    show(&config, source);

    if !DriverConnector::supports(config.driver) {
        output::blank();
        output::caution(&format!(
            "This build cannot connect to {} databases",
            config.driver
        ));
    }

    Ok(())
}

fn show(config: &ConnectionConfig, source: &str) {
    let source = if source == DEFAULT_ENV_VAR {
        format!("{} (default)", source)
    } else {
        source.to_string()
    };

    field("Source", &source);
    field("URL", &config.redacted());
    field("Driver", config.driver.name());
    field("Host", &config.host);
    field("Port", &config.port.to_string());
    field("Database", &config.database);
    field("User", &config.user);
    field(
        "Password",
        if config.password.is_some() { "***" } else { "(none)" },
    );
    if let Some(timeout) = config.connect_timeout {
        field("Connect timeout", &format!("{}s", timeout.as_secs()));
    }

    if !config.params.is_empty() {
        output::blank();
        output::group("Parameters");
        for (key, value) in &config.params {
            field(key, value);
        }
    }
}
