use crate::config;

/// Settings for this run, plus a description of the problem when the
/// configured ones could not be used and defaults were substituted.
pub fn load_settings() -> (config::Settings, Option<String>) {
    let loaded = config::Settings::load()
        .map_err(|e| format!("failed to load config: {e}"))
        .and_then(|s| match s.validate() {
            Ok(()) => Ok(s),
            Err(msg) => Err(format!("invalid config: {msg}")),
        });

    match loaded {
        Ok(settings) => (settings, None),
        // Config is optional; a broken file must not keep the widget from starting.
        Err(problem) => (config::Settings::default(), Some(problem)),
    }
}
