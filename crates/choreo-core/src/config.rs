use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub snap: SnapConfig,
    #[serde(default)]
    pub scrub: ScrubConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (preview logs are written here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Simulated browser viewport, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_viewport_width")]
    pub width: f64,
    #[serde(default = "default_viewport_height")]
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
        }
    }
}

/// Page-wide scroll snap behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Install the global snap at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Forgiveness around each pinned range, in normalized scroll units
    #[serde(default = "default_snap_buffer")]
    pub buffer: f64,
    /// Shortest snap transition
    #[serde(default = "default_snap_min_duration")]
    pub min_duration_ms: u64,
    /// Longest snap transition
    #[serde(default = "default_snap_max_duration")]
    pub max_duration_ms: u64,
    /// Normalized distance at which the transition takes `max_duration_ms`
    #[serde(default = "default_snap_full_distance")]
    pub full_duration_distance: f64,
    /// Easing of the snap transition
    #[serde(default = "default_snap_easing")]
    pub easing: EasingType,
    /// Delay after mount before pinned ranges are collected
    #[serde(default = "default_snapshot_delay")]
    pub snapshot_delay_ms: u64,
    /// Idle time after the last scroll input before snapping
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            buffer: default_snap_buffer(),
            min_duration_ms: default_snap_min_duration(),
            max_duration_ms: default_snap_max_duration(),
            full_duration_distance: default_snap_full_distance(),
            easing: default_snap_easing(),
            snapshot_delay_ms: default_snapshot_delay(),
            settle_delay_ms: default_settle_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubConfig {
    /// Let scrubbed progress trail the scroll position (false = apply immediately)
    #[serde(default = "default_true")]
    pub smoothing: bool,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            smoothing: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Show the element inspector panel on start
    #[serde(default = "default_true")]
    pub show_inspector: bool,
    /// Theme name
    #[serde(default = "default_theme_name")]
    pub theme: String,
    /// Keyboard scrolling
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            show_inspector: default_true(),
            theme: default_theme_name(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curves shared by tracks and scroll transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Holds the start value until the end
    Step,
    /// Constant rate
    Linear,
    /// f(t) = t³
    Power2In,
    /// f(t) = 1 - (1-t)³
    #[serde(alias = "cubic")]
    Power2Out,
    /// Cubic in for the first half, cubic out for the second
    Power2InOut,
    /// f(t) = 1 - (1-t)⁵
    Quintic,
    /// f(t) = 1 - 2^(-10t)
    EaseOut,
}

/// Keyboard-driven scrolling in the preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    #[serde(default = "default_scroll_easing")]
    pub easing: EasingType,
    /// Page pixels moved per line step
    #[serde(default = "default_scroll_step")]
    pub scroll_step_px: f64,
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: default_scroll_easing(),
            scroll_step_px: default_scroll_step(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Jump to the next section anchor
    #[serde(default = "default_key_next_section")]
    pub next_section: String,
    /// Jump to the previous section anchor
    #[serde(default = "default_key_prev_section")]
    pub prev_section: String,
    #[serde(default = "default_key_toggle_inspector")]
    pub toggle_inspector: String,
    /// Recollect pinned ranges after a layout change
    #[serde(default = "default_key_recompute_snap")]
    pub recompute_snap: String,
    /// Tear the page down and mount it again
    #[serde(default = "default_key_remount")]
    pub remount: String,
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            next_section: default_key_next_section(),
            prev_section: default_key_prev_section(),
            toggle_inspector: default_key_toggle_inspector(),
            recompute_snap: default_key_recompute_snap(),
            remount: default_key_remount(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_scroll_page_down() -> String { "<C-f>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_next_section() -> String { "<C-j>".to_string() }
fn default_key_prev_section() -> String { "<C-k>".to_string() }
fn default_key_toggle_inspector() -> String { "i".to_string() }
fn default_key_recompute_snap() -> String { "r".to_string() }
fn default_key_remount() -> String { "m".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("choreo")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_viewport_width() -> f64 {
    1440.0
}

fn default_viewport_height() -> f64 {
    900.0
}

fn default_snap_buffer() -> f64 {
    0.02
}

fn default_snap_min_duration() -> u64 {
    150
}

fn default_snap_max_duration() -> u64 {
    350
}

fn default_snap_full_distance() -> f64 {
    0.1
}

fn default_snap_easing() -> EasingType {
    EasingType::Power2Out
}

fn default_snapshot_delay() -> u64 {
    100
}

fn default_settle_delay() -> u64 {
    120
}

fn default_tick_rate() -> u64 {
    100
}

fn default_theme_name() -> String {
    "midnight".to_string()
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_easing() -> EasingType {
    EasingType::Power2Out
}

fn default_scroll_step() -> f64 {
    40.0
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(crate::Error::Config(format!(
                "viewport must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !(0.0..0.5).contains(&self.snap.buffer) {
            return Err(crate::Error::Config(format!(
                "snap.buffer must be in [0, 0.5), got {}",
                self.snap.buffer
            )));
        }
        if self.snap.min_duration_ms > self.snap.max_duration_ms {
            return Err(crate::Error::Config(format!(
                "snap.min_duration_ms ({}) exceeds snap.max_duration_ms ({})",
                self.snap.min_duration_ms, self.snap.max_duration_ms
            )));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/choreo/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("choreo")
            .join("config.toml")
    }

    /// Get the preview log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("choreo.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.snap.enabled);
        assert!((config.snap.buffer - 0.02).abs() < f64::EPSILON);
        assert_eq!(config.snap.min_duration_ms, 150);
        assert_eq!(config.snap.max_duration_ms, 350);
        assert_eq!(config.snap.snapshot_delay_ms, 100);
        assert_eq!(config.snap.easing, EasingType::Power2Out);
        assert_eq!(config.ui.scroll.animation_fps, 60);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [viewport]
            height = 1080

            [snap]
            buffer = 0.05
            easing = "cubic"
            "#,
        )
        .unwrap();

        assert!((config.viewport.height - 1080.0).abs() < f64::EPSILON);
        assert!((config.viewport.width - 1440.0).abs() < f64::EPSILON);
        assert!((config.snap.buffer - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.snap.easing, EasingType::Power2Out);
        assert_eq!(config.keymap.quit, "q");
    }

    #[test]
    fn test_invalid_durations_rejected() {
        let result = AppConfig::from_toml(
            r#"
            [snap]
            min_duration_ms = 500
            max_duration_ms = 100
            "#,
        );
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.keymap.next_section, config.keymap.next_section);
        assert_eq!(parsed.viewport, config.viewport);
    }
}
