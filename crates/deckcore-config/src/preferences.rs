use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Dark,
    Light,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTheme {
    pub id: String,
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultView {
    Grid,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbnailQuality {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleClickAction {
    Open,
    Preview,
    Select,
}

/// Process-wide user preferences. Values are stored as given; range checks
/// (grid columns, volume) belong to whoever renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub theme: Theme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<CustomTheme>,
    pub sidebar_width: u32,
    pub grid_size: GridSize,
    pub auto_play: bool,
    pub show_thumbnails: bool,
    pub enable_animations: bool,
    pub keyboard_shortcuts: bool,
    pub default_view: DefaultView,
    pub auto_save: bool,
    pub backup_enabled: bool,
    pub thumbnail_quality: ThumbnailQuality,
    pub grid_columns: u32,
    pub show_file_extensions: bool,
    pub show_file_sizes: bool,
    pub enable_hover_preview: bool,
    pub video_auto_play: bool,
    /// 0.0 - 1.0
    pub video_volume: f32,
    pub image_transitions: bool,
    pub enable_gestures: bool,
    pub double_click_action: DoubleClickAction,
    pub card_spacing: u32,
    pub border_radius: u32,
    pub show_metadata: bool,
    pub enable_virtualization: bool,
    pub preload_thumbnails: bool,
    pub max_thumbnail_size: u32,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            custom_theme: None,
            sidebar_width: 280,
            grid_size: GridSize::Medium,
            auto_play: false,
            show_thumbnails: true,
            enable_animations: true,
            keyboard_shortcuts: true,
            default_view: DefaultView::Grid,
            auto_save: true,
            backup_enabled: true,
            thumbnail_quality: ThumbnailQuality::High,
            grid_columns: 4,
            show_file_extensions: true,
            show_file_sizes: true,
            enable_hover_preview: true,
            video_auto_play: false,
            video_volume: 0.8,
            image_transitions: true,
            enable_gestures: true,
            double_click_action: DoubleClickAction::Open,
            card_spacing: 16,
            border_radius: 12,
            show_metadata: true,
            enable_virtualization: true,
            preload_thumbnails: true,
            max_thumbnail_size: 400,
        }
    }
}

impl UserPreferences {
    /// Shallow merge: every field present in `patch` overwrites ours.
    pub fn apply(&mut self, patch: &PreferencesPatch) {
        if let Some(v) = patch.theme {
            self.theme = v;
        }
        if let Some(v) = &patch.custom_theme {
            self.custom_theme = Some(v.clone());
        }
        if let Some(v) = patch.sidebar_width {
            self.sidebar_width = v;
        }
        if let Some(v) = patch.grid_size {
            self.grid_size = v;
        }
        if let Some(v) = patch.auto_play {
            self.auto_play = v;
        }
        if let Some(v) = patch.show_thumbnails {
            self.show_thumbnails = v;
        }
        if let Some(v) = patch.enable_animations {
            self.enable_animations = v;
        }
        if let Some(v) = patch.keyboard_shortcuts {
            self.keyboard_shortcuts = v;
        }
        if let Some(v) = patch.default_view {
            self.default_view = v;
        }
        if let Some(v) = patch.auto_save {
            self.auto_save = v;
        }
        if let Some(v) = patch.backup_enabled {
            self.backup_enabled = v;
        }
        if let Some(v) = patch.thumbnail_quality {
            self.thumbnail_quality = v;
        }
        if let Some(v) = patch.grid_columns {
            self.grid_columns = v;
        }
        if let Some(v) = patch.show_file_extensions {
            self.show_file_extensions = v;
        }
        if let Some(v) = patch.show_file_sizes {
            self.show_file_sizes = v;
        }
        if let Some(v) = patch.enable_hover_preview {
            self.enable_hover_preview = v;
        }
        if let Some(v) = patch.video_auto_play {
            self.video_auto_play = v;
        }
        if let Some(v) = patch.video_volume {
            self.video_volume = v;
        }
        if let Some(v) = patch.image_transitions {
            self.image_transitions = v;
        }
        if let Some(v) = patch.enable_gestures {
            self.enable_gestures = v;
        }
        if let Some(v) = patch.double_click_action {
            self.double_click_action = v;
        }
        if let Some(v) = patch.card_spacing {
            self.card_spacing = v;
        }
        if let Some(v) = patch.border_radius {
            self.border_radius = v;
        }
        if let Some(v) = patch.show_metadata {
            self.show_metadata = v;
        }
        if let Some(v) = patch.enable_virtualization {
            self.enable_virtualization = v;
        }
        if let Some(v) = patch.preload_thumbnails {
            self.preload_thumbnails = v;
        }
        if let Some(v) = patch.max_thumbnail_size {
            self.max_thumbnail_size = v;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesPatch {
    pub theme: Option<Theme>,
    pub custom_theme: Option<CustomTheme>,
    pub sidebar_width: Option<u32>,
    pub grid_size: Option<GridSize>,
    pub auto_play: Option<bool>,
    pub show_thumbnails: Option<bool>,
    pub enable_animations: Option<bool>,
    pub keyboard_shortcuts: Option<bool>,
    pub default_view: Option<DefaultView>,
    pub auto_save: Option<bool>,
    pub backup_enabled: Option<bool>,
    pub thumbnail_quality: Option<ThumbnailQuality>,
    pub grid_columns: Option<u32>,
    pub show_file_extensions: Option<bool>,
    pub show_file_sizes: Option<bool>,
    pub enable_hover_preview: Option<bool>,
    pub video_auto_play: Option<bool>,
    pub video_volume: Option<f32>,
    pub image_transitions: Option<bool>,
    pub enable_gestures: Option<bool>,
    pub double_click_action: Option<DoubleClickAction>,
    pub card_spacing: Option<u32>,
    pub border_radius: Option<u32>,
    pub show_metadata: Option<bool>,
    pub enable_virtualization: Option<bool>,
    pub preload_thumbnails: Option<bool>,
    pub max_thumbnail_size: Option<u32>,
}

impl PreferencesPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_merges_without_touching_other_fields() {
        let mut prefs = UserPreferences::default();
        let patch = PreferencesPatch {
            theme: Some(Theme::Light),
            grid_columns: Some(6),
            ..PreferencesPatch::default()
        };
        prefs.apply(&patch);

        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.grid_columns, 6);
        assert_eq!(prefs.sidebar_width, 280);
        assert!(prefs.enable_virtualization);
    }

    #[test]
    fn out_of_range_values_are_kept() {
        let mut prefs = UserPreferences::default();
        prefs.apply(&PreferencesPatch {
            grid_columns: Some(0),
            video_volume: Some(7.5),
            ..PreferencesPatch::default()
        });
        assert_eq!(prefs.grid_columns, 0);
        assert_eq!(prefs.video_volume, 7.5);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut prefs = UserPreferences::default();
        let patch = PreferencesPatch::default();
        assert!(patch.is_empty());
        prefs.apply(&patch);
        assert_eq!(prefs, UserPreferences::default());
    }
}
