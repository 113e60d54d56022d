/// Application name used for the confy config file location.
pub const TCREI_CLI: &str = "tcrei-cli";

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV_VAR: &str = "TCREI_API_KEY";
