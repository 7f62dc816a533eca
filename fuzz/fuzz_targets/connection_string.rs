//! Fuzz target for the connection string parser.
//!
//! Feeds arbitrary strings, and URL-shaped strings assembled from arbitrary
//! parts, to `ConnectionConfig::parse`.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_connection_string
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use verdant_probe::ConnectionConfig;

#[derive(Debug, Arbitrary)]
enum Input<'a> {
    Raw(&'a str),
    Parts {
        scheme: &'a str,
        user: &'a str,
        password: Option<&'a str>,
        host: &'a str,
        port: Option<u32>,
        database: &'a str,
        query: Option<&'a str>,
    },
}

impl Input<'_> {
    fn render(&self) -> String {
        match self {
            Input::Raw(s) => s.to_string(),
            Input::Parts {
                scheme,
                user,
                password,
                host,
                port,
                database,
                query,
            } => {
                let mut url = format!("{}://{}", scheme, user);
                if let Some(password) = password {
                    url.push(':');
                    url.push_str(password);
                }
                url.push('@');
                url.push_str(host);
                if let Some(port) = port {
                    url.push_str(&format!(":{}", port));
                }
                url.push('/');
                url.push_str(database);
                if let Some(query) = query {
                    url.push('?');
                    url.push_str(query);
                }
                url
            }
        }
    }
}

fuzz_target!(|input: Input<'_>| {
    let url = input.render();

    // The parser should never panic, only return errors
    if let Ok(config) = ConnectionConfig::parse(&url) {
        assert_ne!(config.port, 0);
        assert!(!config.host.is_empty());
        assert!(!config.database.is_empty());

        let _ = config.redacted();
        let _ = config.address();
    }
});
