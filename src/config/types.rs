use serde::Deserialize;

use crate::benchmark::MalformedElapsedPolicy;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub token_path: Option<String>,
    pub key_path: Option<String>,
    pub results_path: Option<String>,
    pub elapsed_marker: Option<String>,
    pub malformed_elapsed: Option<MalformedElapsedPolicy>,
    pub identity: Option<IdentityConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    pub client_id: Option<String>,
    pub authority: Option<String>,
    pub scopes: Option<Vec<String>>,
}
