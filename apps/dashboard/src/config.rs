use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use shared::error::DashboardError;
use sim_core::ScriptTiming;

pub const SETTINGS_FILE_NAME: &str = "aegis.toml";
pub const MIN_WINDOW_WIDTH: f32 = 980.0;
pub const MIN_WINDOW_HEIGHT: f32 = 640.0;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "aegis-dashboard", about = "Aegis self-healing infrastructure dashboard")]
pub struct StartupConfig {
    /// Settings file; replaces the `aegis.toml` lookup.
    #[arg(long)]
    pub settings: Option<PathBuf>,
    #[arg(long)]
    pub time_scale: Option<f64>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub time_scale: f64,
    pub seed: Option<u64>,
    pub log_filter: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            seed: None,
            log_filter: "info".into(),
            window_width: 1440.0,
            window_height: 900.0,
        }
    }
}

impl Settings {
    pub fn timing(&self) -> Result<ScriptTiming, DashboardError> {
        ScriptTiming::default().scaled(self.time_scale)
    }
}

/// Settings plus what happened while loading them. Warnings are kept until
/// logging is up, since the log filter is itself a setting.
#[derive(Debug, Clone, Default)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

pub fn load_settings(startup: &StartupConfig) -> LoadedSettings {
    let candidates = match &startup.settings {
        Some(path) => vec![path.clone()],
        None => default_candidates(),
    };
    load_settings_from(startup, &candidates, |key| std::env::var(key).ok())
}

fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(SETTINGS_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("aegis").join(SETTINGS_FILE_NAME));
    }
    candidates
}

/// Defaults, then the first readable settings file, then `AEGIS_*` variables,
/// then command-line flags.
pub fn load_settings_from(
    startup: &StartupConfig,
    candidates: &[PathBuf],
    env: impl Fn(&str) -> Option<String>,
) -> LoadedSettings {
    let mut loaded = LoadedSettings::default();

    match candidates.iter().find(|path| path.is_file()) {
        Some(path) => match fs::read_to_string(path) {
            Ok(raw) => {
                apply_file(&mut loaded, path, &raw);
                loaded.source = Some(path.clone());
            }
            Err(err) => loaded
                .warnings
                .push(format!("could not read settings file {}: {err}", path.display())),
        },
        None => {
            if let Some(path) = &startup.settings {
                loaded.warnings.push(format!(
                    "settings file {} not found, using defaults",
                    path.display()
                ));
            }
        }
    }

    if let Some(raw) = env("AEGIS_TIME_SCALE") {
        match raw.trim().parse::<f64>() {
            Ok(scale) => set_time_scale(&mut loaded, scale, "AEGIS_TIME_SCALE"),
            Err(_) => loaded
                .warnings
                .push(format!("ignoring AEGIS_TIME_SCALE={raw:?}: not a number")),
        }
    }
    if let Some(raw) = env("AEGIS_SEED") {
        match raw.trim().parse::<u64>() {
            Ok(seed) => loaded.settings.seed = Some(seed),
            Err(_) => loaded
                .warnings
                .push(format!("ignoring AEGIS_SEED={raw:?}: not an unsigned integer")),
        }
    }
    if let Some(raw) = env("AEGIS_LOG") {
        if !raw.trim().is_empty() {
            loaded.settings.log_filter = raw;
        }
    }

    if let Some(scale) = startup.time_scale {
        set_time_scale(&mut loaded, scale, "--time-scale");
    }
    if let Some(seed) = startup.seed {
        loaded.settings.seed = Some(seed);
    }
    if let Some(filter) = &startup.log_filter {
        loaded.settings.log_filter = filter.clone();
    }

    loaded
}

fn apply_file(loaded: &mut LoadedSettings, path: &Path, raw: &str) {
    let table = match raw.parse::<toml::Table>() {
        Ok(table) => table,
        Err(err) => {
            loaded
                .warnings
                .push(format!("ignoring malformed settings file {}: {err}", path.display()));
            return;
        }
    };

    for (key, value) in table {
        match (key.as_str(), &value) {
            ("time_scale", value) => match as_f64(value) {
                Some(scale) => set_time_scale(loaded, scale, "time_scale"),
                None => loaded
                    .warnings
                    .push(format!("ignoring time_scale = {value}: not a number")),
            },
            ("seed", toml::Value::Integer(seed)) if *seed >= 0 => {
                loaded.settings.seed = Some(*seed as u64);
            }
            ("log_filter", toml::Value::String(filter)) => {
                loaded.settings.log_filter = filter.clone();
            }
            ("window_width", value) => match as_f64(value) {
                Some(width) if width as f32 >= MIN_WINDOW_WIDTH => {
                    loaded.settings.window_width = width as f32;
                }
                _ => loaded.warnings.push(format!(
                    "ignoring window_width = {value}: expected a number >= {MIN_WINDOW_WIDTH}"
                )),
            },
            ("window_height", value) => match as_f64(value) {
                Some(height) if height as f32 >= MIN_WINDOW_HEIGHT => {
                    loaded.settings.window_height = height as f32;
                }
                _ => loaded.warnings.push(format!(
                    "ignoring window_height = {value}: expected a number >= {MIN_WINDOW_HEIGHT}"
                )),
            },
            (key, value) => loaded
                .warnings
                .push(format!("ignoring settings key {key} = {value}")),
        }
    }
}

fn as_f64(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Float(v) => Some(*v),
        toml::Value::Integer(v) => Some(*v as f64),
        _ => None,
    }
}

fn set_time_scale(loaded: &mut LoadedSettings, scale: f64, origin: &str) {
    if scale.is_finite() && scale > 0.0 {
        loaded.settings.time_scale = scale;
    } else {
        loaded
            .warnings
            .push(format!("ignoring {origin} = {scale}: must be positive"));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_settings(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, body).expect("write settings");
        path
    }

    #[test]
    fn defaults_apply_without_any_source() {
        let loaded = load_settings_from(&StartupConfig::default(), &[], no_env);
        assert_eq!(loaded.settings, Settings::default());
        assert!(loaded.source.is_none());
        assert!(loaded.warnings.is_empty());
        assert_eq!(
            loaded.settings.timing().expect("timing"),
            ScriptTiming::default()
        );
    }

    #[test]
    fn file_then_env_then_cli_take_precedence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_settings(
            &dir,
            "time_scale = 0.5\nseed = 7\nlog_filter = \"debug\"\nwindow_width = 1280\n",
        );
        let env = HashMap::from([
            ("AEGIS_SEED", "11".to_string()),
            ("AEGIS_LOG", "sim_core=trace".to_string()),
        ]);
        let startup = StartupConfig {
            log_filter: Some("warn".into()),
            ..Default::default()
        };

        let loaded = load_settings_from(&startup, &[path.clone()], |key| env.get(key).cloned());
        assert_eq!(loaded.source, Some(path));
        assert_eq!(loaded.settings.time_scale, 0.5);
        assert_eq!(loaded.settings.seed, Some(11));
        assert_eq!(loaded.settings.log_filter, "warn");
        assert_eq!(loaded.settings.window_width, 1280.0);
        assert!(loaded.warnings.is_empty(), "{:?}", loaded.warnings);
    }

    #[test]
    fn first_existing_candidate_wins() {
        let missing = tempfile::tempdir().expect("tempdir");
        let present = tempfile::tempdir().expect("tempdir");
        let path = write_settings(&present, "seed = 3\n");
        let candidates = [missing.path().join(SETTINGS_FILE_NAME), path.clone()];

        let loaded = load_settings_from(&StartupConfig::default(), &candidates, no_env);
        assert_eq!(loaded.source, Some(path));
        assert_eq!(loaded.settings.seed, Some(3));
    }

    #[test]
    fn bad_values_are_ignored_with_warnings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_settings(
            &dir,
            "time_scale = -2.0\nwindow_height = 100\nnarrative = \"rewrite\"\n",
        );
        let env = HashMap::from([("AEGIS_TIME_SCALE", "fast".to_string())]);
        let startup = StartupConfig {
            time_scale: Some(0.0),
            ..Default::default()
        };

        let loaded = load_settings_from(&startup, &[path], |key| env.get(key).cloned());
        assert_eq!(loaded.settings.time_scale, 1.0);
        assert_eq!(loaded.settings.window_height, Settings::default().window_height);
        assert_eq!(loaded.warnings.len(), 5, "{:?}", loaded.warnings);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_settings(&dir, "time_scale = [unterminated");

        let loaded = load_settings_from(&StartupConfig::default(), &[path], no_env);
        assert_eq!(loaded.settings, Settings::default());
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn explicit_missing_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let startup = StartupConfig {
            settings: Some(dir.path().join("absent.toml")),
            ..Default::default()
        };
        let candidates = vec![dir.path().join("absent.toml")];

        let loaded = load_settings_from(&startup, &candidates, no_env);
        assert!(loaded.source.is_none());
        assert!(loaded.warnings[0].contains("not found"));
    }

    #[test]
    fn scaled_settings_produce_scaled_timing() {
        let settings = Settings {
            time_scale: 0.5,
            ..Default::default()
        };
        let timing = settings.timing().expect("timing");
        assert_eq!(timing.settle_delay, std::time::Duration::from_millis(500));
    }
}
