use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_decimals")]
    pub decimals: usize,
    #[serde(default = "default_bar_width")]
    pub bar_width: u16,
}

fn default_theme() -> String {
    "dark".into()
}
fn default_decimals() -> usize {
    2
}
fn default_bar_width() -> u16 {
    7
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            decimals: default_decimals(),
            bar_width: default_bar_width(),
        }
    }
}

pub const COUNT_ADJUSTMENT_MIN: i32 = -5;
pub const COUNT_ADJUSTMENT_MAX: i32 = 5;
pub const WIDTH_ADJUSTMENT_MIN: f64 = -5.0;
pub const WIDTH_ADJUSTMENT_MAX: f64 = 5.0;
pub const WIDTH_ADJUSTMENT_STEP: f64 = 0.1;

/// Knobs applied on top of Sturges' rule.
///
/// The binning engine takes these as-is. Values coming from the config file or
/// the command line are checked with [`BinningConfig::validate`] first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BinningConfig {
    #[serde(default)]
    pub manual_intervals: bool,
    #[serde(default)]
    pub interval_count_adjustment: i32,
    #[serde(default)]
    pub round_up_width: bool,
    #[serde(default)]
    pub interval_width_adjustment: f64,
}

impl BinningConfig {
    pub fn step_count_adjustment(&mut self, delta: i32) {
        self.interval_count_adjustment = (self.interval_count_adjustment + delta)
            .clamp(COUNT_ADJUSTMENT_MIN, COUNT_ADJUSTMENT_MAX);
    }

    /// Moves the width adjustment by `steps` increments of 0.1, snapped to one decimal.
    pub fn step_width_adjustment(&mut self, steps: i32) {
        let tenths = (self.interval_width_adjustment / WIDTH_ADJUSTMENT_STEP).round() as i64
            + steps as i64;
        let v = tenths as f64 * WIDTH_ADJUSTMENT_STEP;
        // snap again so repeated steps never print as 0.30000000000000004
        let v = (v * 10.0).round() / 10.0;
        self.interval_width_adjustment = v.clamp(WIDTH_ADJUSTMENT_MIN, WIDTH_ADJUSTMENT_MAX);
    }

    /// Count adjustment must sit in `COUNT_ADJUSTMENT_MIN..=COUNT_ADJUSTMENT_MAX`
    /// and the width adjustment must be finite.
    pub fn validate(&self) -> crate::Result<()> {
        let count = self.interval_count_adjustment;
        if !(COUNT_ADJUSTMENT_MIN..=COUNT_ADJUSTMENT_MAX).contains(&count) {
            return Err(crate::FreqLensError::Config(format!(
                "binning.interval_count_adjustment must be in [{COUNT_ADJUSTMENT_MIN}, {COUNT_ADJUSTMENT_MAX}], got {count}"
            )));
        }
        if !self.interval_width_adjustment.is_finite() {
            return Err(crate::FreqLensError::Config(format!(
                "binning.interval_width_adjustment must be finite, got {}",
                self.interval_width_adjustment
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_format() -> String {
    "json".into()
}
fn default_output_dir() -> String {
    ".".into()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub binning: BinningConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        if let Ok(env_path) = std::env::var("FREQLENS_CONFIG") {
            return PathBuf::from(env_path); // $FREQLENS_CONFIG overrides default config path
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("freqlens")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let cfg: Self =
            toml::from_str(&content).map_err(|e| crate::FreqLensError::Config(e.to_string()))?;
        cfg.binning.validate()?;
        Ok(cfg)
    }

    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::FreqLensError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.display.theme, "dark");
        assert_eq!(cfg.display.decimals, 2);
        assert_eq!(cfg.binning, BinningConfig::default());
        assert_eq!(cfg.export.format, "json");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[binning]\nround_up_width = true\ninterval_width_adjustment = -0.5\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert!(cfg.binning.round_up_width);
        assert!(!cfg.binning.manual_intervals);
        assert_eq!(cfg.binning.interval_width_adjustment, -0.5);
        assert_eq!(cfg.display.theme, "dark");
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[binning\nmanual_intervals = ").unwrap();
        assert!(matches!(Config::load_from(&path), Err(crate::FreqLensError::Config(_))));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.display.theme = "light".into();
        cfg.binning.manual_intervals = true;
        cfg.binning.interval_count_adjustment = -2;
        cfg.save_to(&path).unwrap();
        let back = Config::load_from(&path).unwrap();
        assert_eq!(back.display.theme, "light");
        assert_eq!(back.binning, cfg.binning);
    }

    #[test]
    fn out_of_range_count_adjustment_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[binning]\nmanual_intervals = true\ninterval_count_adjustment = 2147483647\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("interval_count_adjustment"));
        std::fs::write(&path, "[binning]\ninterval_count_adjustment = -6\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(crate::FreqLensError::Config(_))));
        std::fs::write(&path, "[binning]\ninterval_count_adjustment = -5\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().binning.interval_count_adjustment, -5);
    }

    #[test]
    fn non_finite_width_adjustment_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        for w in ["nan", "inf", "-inf"] {
            std::fs::write(&path, format!("[binning]\ninterval_width_adjustment = {w}\n")).unwrap();
            let err = Config::load_from(&path).unwrap_err();
            assert!(err.to_string().contains("must be finite"), "{w}: {err}");
        }
    }

    #[test]
    fn count_adjustment_clamps() {
        let mut b = BinningConfig::default();
        for _ in 0..8 { b.step_count_adjustment(1); }
        assert_eq!(b.interval_count_adjustment, COUNT_ADJUSTMENT_MAX);
        for _ in 0..20 { b.step_count_adjustment(-1); }
        assert_eq!(b.interval_count_adjustment, COUNT_ADJUSTMENT_MIN);
    }

    #[test]
    fn width_adjustment_snaps_to_tenths() {
        let mut b = BinningConfig::default();
        for _ in 0..3 { b.step_width_adjustment(1); }
        assert_eq!(b.interval_width_adjustment, 0.3);
        b.step_width_adjustment(-5);
        assert_eq!(b.interval_width_adjustment, -0.2);
        b.step_width_adjustment(-100);
        assert_eq!(b.interval_width_adjustment, WIDTH_ADJUSTMENT_MIN);
    }
}
