//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Name of a variable that is referenced but not set.
struct Unset(String);

/// Expand environment variable references in a config value.
///
/// Values without `${` are returned unchanged, so a bare `$` (as in a
/// literal path) never triggers expansion. `field` names the config key in
/// the error.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |name: &str| -> Result<Option<String>, Unset> {
        std::env::var(name)
            .map(Some)
            .map_err(|_| Unset(name.to_owned()))
    };

    shellexpand::env_with_context(value, lookup)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause.0),
        })
}
