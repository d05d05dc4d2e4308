//! Built-in theme attributes.
//!
//! Every theme starts from the same typed attribute set: sizes, fonts, a
//! surface palette chosen by variant, semantic colors with their ramps, the
//! accent ramp and the icon file names used by the default stylesheets.
//! [`ThemeAttributes::to_options`] flattens it into template options.

use std::collections::BTreeMap;

use lacquer_render::color::{fade, ramp, RAMP_STEPS};
use lacquer_render::{ColorToken, OptionValue, Options};

use super::variant::Variant;

/// Named base colors.
pub struct Swatch;

impl Swatch {
    pub const BLUE: ColorToken = ColorToken::rgb(0x18, 0x90, 0xFF);
    pub const PURPLE: ColorToken = ColorToken::rgb(0x72, 0x2E, 0xD1);
    pub const CYAN: ColorToken = ColorToken::rgb(0x13, 0xC2, 0xC2);
    pub const GREEN: ColorToken = ColorToken::rgb(0x36, 0x7F, 0x12);
    pub const MAGENTA: ColorToken = ColorToken::rgb(0xEB, 0x2F, 0x96);
    pub const PINK: ColorToken = ColorToken::rgb(0xEF, 0x5B, 0x97);
    pub const RED: ColorToken = ColorToken::rgb(0xF5, 0x22, 0x2D);
    pub const ORANGE: ColorToken = ColorToken::rgb(0xFA, 0x8C, 0x16);
    pub const YELLOW: ColorToken = ColorToken::rgb(0xFA, 0xDB, 0x14);
    pub const VOLCANO: ColorToken = ColorToken::rgb(0xFA, 0x54, 0x1C);
    pub const GEEK_BLUE: ColorToken = ColorToken::rgb(0x2F, 0x54, 0xEB);
    pub const LIME: ColorToken = ColorToken::rgb(0xA0, 0xD9, 0x11);
    pub const GOLD: ColorToken = ColorToken::rgb(0xFA, 0xAD, 0x14);
}

/// Widget sizes in unscaled pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sizes {
    pub tiny: i64,
    pub small: i64,
    pub medium: i64,
    pub large: i64,
    pub huge: i64,
    pub tiny_icon: i64,
    pub small_icon: i64,
    pub medium_icon: i64,
    pub large_icon: i64,
    pub huge_icon: i64,
    pub border_radius_large: i64,
    pub border_radius_base: i64,
    pub border_radius_small: i64,
    pub window_dragger_rounded_corners: i64,
    pub window_dragger_font_size: i64,
    pub window_rounded_corners: i64,
    pub button_padding: i64,
    pub default_size: i64,
}

impl Sizes {
    pub const TINY: i64 = 18;
    pub const SMALL: i64 = 24;
    pub const MEDIUM: i64 = 32;
    pub const LARGE: i64 = 40;
    pub const HUGE: i64 = 48;
}

impl Default for Sizes {
    fn default() -> Self {
        Self {
            tiny: Self::TINY,
            small: Self::SMALL,
            medium: Self::MEDIUM,
            large: Self::LARGE,
            huge: Self::HUGE,
            tiny_icon: Self::TINY - 8,
            small_icon: Self::SMALL - 10,
            medium_icon: Self::MEDIUM - 12,
            large_icon: Self::LARGE - 16,
            huge_icon: Self::HUGE - 20,
            border_radius_large: 8,
            border_radius_base: 4,
            border_radius_small: 2,
            window_dragger_rounded_corners: 5,
            window_dragger_font_size: 12,
            window_rounded_corners: 5,
            button_padding: 4,
            default_size: Self::SMALL,
        }
    }
}

/// Font family and sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fonts {
    pub family: String,
    pub size_base: i64,
    pub size_large: i64,
    pub size_small: i64,
    pub h1_size: i64,
    pub h2_size: i64,
    pub h3_size: i64,
    pub h4_size: i64,
}

pub const DEFAULT_FONT_FAMILY: &str = "BlinkMacSystemFont,\"Segoe UI\",\"PingFang SC\",\"Hiragino Sans GB\",\"Microsoft YaHei\",\"Helvetica Neue\",Helvetica,Arial,sans-serif";

impl Default for Fonts {
    fn default() -> Self {
        let base = 14;
        let heading = |factor: f64| (base as f64 * factor) as i64;
        Self {
            family: DEFAULT_FONT_FAMILY.to_string(),
            size_base: base,
            size_large: base + 2,
            size_small: base - 2,
            h1_size: heading(2.71),
            h2_size: heading(2.12),
            h3_size: heading(1.71),
            h4_size: heading(1.41),
        }
    }
}

/// Surface colors that change with the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background_color: ColorToken,
    pub background_selected_color: ColorToken,
    pub background_in_color: ColorToken,
    pub background_out_color: ColorToken,
    pub sub_background_color: ColorToken,
    pub toast_color: ColorToken,
    pub title_color: ColorToken,
    pub primary_text_color: ColorToken,
    pub secondary_text_color: ColorToken,
    pub disable_color: ColorToken,
    pub border_color: ColorToken,
    pub divider_color: ColorToken,
    pub header_color: ColorToken,
    pub icon_color: ColorToken,
    pub window_dragger_color: ColorToken,
    pub window_dragger_label_color: ColorToken,
}

const fn hex(v: u32) -> ColorToken {
    ColorToken::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

impl Palette {
    pub const fn dark() -> Self {
        Self {
            background_color: hex(0x212121),
            background_selected_color: hex(0x292929),
            background_in_color: hex(0x3A3A3A),
            background_out_color: hex(0x494949),
            sub_background_color: hex(0x252525),
            toast_color: hex(0x555555),
            title_color: hex(0xFFFFFF),
            primary_text_color: hex(0xD9D9D9),
            secondary_text_color: hex(0xA6A6A6),
            disable_color: hex(0x737373),
            border_color: hex(0x1E1E1E),
            divider_color: hex(0x262626),
            header_color: hex(0x0A0A0A),
            icon_color: hex(0xA6A6A6),
            window_dragger_color: hex(0x232323),
            window_dragger_label_color: hex(0xD9D9D9),
        }
    }

    pub const fn light() -> Self {
        Self {
            background_color: hex(0xF8F8F9),
            background_selected_color: hex(0xBFBFBF),
            background_in_color: hex(0xFFFFFF),
            background_out_color: hex(0xEEEEEE),
            sub_background_color: hex(0xF4F4F5),
            toast_color: hex(0x333333),
            title_color: hex(0x262626),
            primary_text_color: hex(0x595959),
            secondary_text_color: hex(0x8C8C8C),
            disable_color: hex(0xE5E5E5),
            border_color: hex(0xD9D9D9),
            divider_color: hex(0xE8E8E8),
            header_color: hex(0xFAFAFA),
            icon_color: hex(0x8C8C8C),
            window_dragger_color: hex(0xF2F2FD),
            window_dragger_label_color: hex(0x262626),
        }
    }

    /// Light palette for [`Variant::Light`], dark palette otherwise.
    pub const fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Light => Self::light(),
            Variant::Normal | Variant::Dark => Self::dark(),
        }
    }

    /// The background faded to 90%, used behind modal overlays.
    pub fn mask_color(&self) -> String {
        fade(self.background_color, 90)
    }
}

/// Base colors of the semantic ramps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticColors {
    pub info: ColorToken,
    pub success: ColorToken,
    pub processing: ColorToken,
    pub warning: ColorToken,
    pub error: ColorToken,
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            info: Swatch::BLUE,
            success: Swatch::GREEN,
            processing: Swatch::BLUE,
            warning: Swatch::GOLD,
            error: Swatch::RED,
        }
    }
}

/// Built-in icon option names and their file names.
pub const DEFAULT_ICONS: &[(&str, &str)] = &[
    ("radio_checked_icon", "radio_button_checked.png"),
    ("radio_unchecked_icon", "radio_button_unchecked.png"),
    ("up_icon", "collapse.png"),
    ("down_icon", "expand.png"),
    ("up_arrow_icon", "up_arrow.png"),
    ("down_arrow_icon", "down_arrow.png"),
    ("left_icon", "back.png"),
    ("right_icon", "next.png"),
    ("calendar_icon", "calendar.png"),
    ("check_icon", "check.png"),
    ("uncheck_icon", "uncheck.png"),
    ("circle_icon", "circle.png"),
    ("splitter_icon", "splitter.png"),
    ("vline_icon", "vline.png"),
    ("branch_closed_icon", "branch_closed.png"),
    ("branch_end_icon", "branch_end.png"),
    ("branch_more_icon", "branch_more.png"),
    ("branch_open_icon", "branch_open.png"),
    ("python_expand_icon", "python_expand.png"),
    ("python_closed_icon", "python_no_expand.png"),
];

/// The typed attribute set of a theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeAttributes {
    pub sizes: Sizes,
    pub fonts: Fonts,
    pub palette: Palette,
    pub semantic: SemanticColors,
    accent: ColorToken,
    accent_ramp: [ColorToken; RAMP_STEPS as usize],
    pub icons: BTreeMap<String, String>,
    pub unit: String,
    pub text_color_inverse: String,
}

macro_rules! slot_table {
    ($list:ident, $slot:ident, $ty:ty { $( $name:literal => $($field:ident).+ ),* $(,)? }) => {
        fn $list(&self) -> Vec<(&'static str, $ty)> {
            vec![ $( ($name, self.$($field).+.clone()) ),* ]
        }

        fn $slot(&mut self, name: &str) -> Option<&mut $ty> {
            match name {
                $( $name => Some(&mut self.$($field).+), )*
                _ => None,
            }
        }
    };
}

impl ThemeAttributes {
    pub fn new(variant: Variant, accent: ColorToken) -> Self {
        let accent = accent.with_alpha(255);
        Self {
            sizes: Sizes::default(),
            fonts: Fonts::default(),
            palette: Palette::for_variant(variant),
            semantic: SemanticColors::default(),
            accent,
            accent_ramp: ramp(accent),
            icons: DEFAULT_ICONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            unit: "px".to_string(),
            text_color_inverse: "#FFF".to_string(),
        }
    }

    pub fn accent(&self) -> ColorToken {
        self.accent
    }

    /// Accent ramp, step 1 first.
    pub fn accent_ramp(&self) -> &[ColorToken; RAMP_STEPS as usize] {
        &self.accent_ramp
    }

    /// Sets the accent color and recomputes its ramp.
    pub fn set_accent(&mut self, accent: ColorToken) {
        self.accent = accent.with_alpha(255);
        self.accent_ramp = ramp(self.accent);
    }

    /// Background hover color for items, ramp step 1.
    pub fn item_hover_background_color(&self) -> ColorToken {
        self.accent_ramp[0]
    }

    /// Replaces the surface palette with the one for `variant`.
    pub fn apply_variant_palette(&mut self, variant: Variant) {
        self.palette = Palette::for_variant(variant);
    }

    slot_table!(int_fields, int_slot, i64 {
        "tiny" => sizes.tiny,
        "small" => sizes.small,
        "medium" => sizes.medium,
        "large" => sizes.large,
        "huge" => sizes.huge,
        "tiny_icon" => sizes.tiny_icon,
        "small_icon" => sizes.small_icon,
        "medium_icon" => sizes.medium_icon,
        "large_icon" => sizes.large_icon,
        "huge_icon" => sizes.huge_icon,
        "border_radius_large" => sizes.border_radius_large,
        "border_radius_base" => sizes.border_radius_base,
        "border_radius_small" => sizes.border_radius_small,
        "window_dragger_rounded_corners" => sizes.window_dragger_rounded_corners,
        "window_dragger_font_size" => sizes.window_dragger_font_size,
        "window_rounded_corners" => sizes.window_rounded_corners,
        "button_padding" => sizes.button_padding,
        "default_size" => sizes.default_size,
        "font_size_base" => fonts.size_base,
        "font_size_large" => fonts.size_large,
        "font_size_small" => fonts.size_small,
        "h1_size" => fonts.h1_size,
        "h2_size" => fonts.h2_size,
        "h3_size" => fonts.h3_size,
        "h4_size" => fonts.h4_size,
    });

    slot_table!(color_fields, color_slot, ColorToken {
        "background_color" => palette.background_color,
        "background_selected_color" => palette.background_selected_color,
        "background_in_color" => palette.background_in_color,
        "background_out_color" => palette.background_out_color,
        "sub_background_color" => palette.sub_background_color,
        "toast_color" => palette.toast_color,
        "title_color" => palette.title_color,
        "primary_text_color" => palette.primary_text_color,
        "secondary_text_color" => palette.secondary_text_color,
        "disable_color" => palette.disable_color,
        "border_color" => palette.border_color,
        "divider_color" => palette.divider_color,
        "header_color" => palette.header_color,
        "icon_color" => palette.icon_color,
        "window_dragger_color" => palette.window_dragger_color,
        "window_dragger_label_color" => palette.window_dragger_label_color,
        "info_color" => semantic.info,
        "success_color" => semantic.success,
        "processing_color" => semantic.processing,
        "warning_color" => semantic.warning,
        "error_color" => semantic.error,
    });

    slot_table!(text_fields, text_slot, String {
        "font_family" => fonts.family,
        "unit" => unit,
        "text_color_inverse" => text_color_inverse,
    });

    /// Returns the attribute `name` as an option value, if it is a built-in.
    pub fn get(&self, name: &str) -> Option<OptionValue> {
        if let Some(value) = self.derived().remove(name) {
            return Some(value);
        }
        if let Some(file) = self.icons.get(name) {
            return Some(file.as_str().into());
        }
        self.int_fields()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.into())
            .or_else(|| {
                self.color_fields()
                    .into_iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, v)| v.into())
            })
            .or_else(|| {
                self.text_fields()
                    .into_iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, v)| v.into())
            })
    }

    /// Sets the attribute `name` from `value`.
    ///
    /// Returns false if `name` is not a settable built-in or `value` has the
    /// wrong shape for it. Derived values (ramps, mask color) cannot be set;
    /// `accent_color` recomputes the accent ramp.
    pub fn set(&mut self, name: &str, value: &OptionValue) -> bool {
        if name == "accent_color" {
            return match value.as_color() {
                Some(color) => {
                    self.set_accent(color);
                    true
                }
                None => false,
            };
        }
        if let Some(slot) = self.int_slot(name) {
            return match value.as_i64() {
                Some(v) => {
                    *slot = v;
                    true
                }
                None => false,
            };
        }
        if let Some(slot) = self.color_slot(name) {
            return match value.as_color() {
                Some(c) => {
                    *slot = c;
                    true
                }
                None => false,
            };
        }
        if let Some(slot) = self.text_slot(name) {
            *slot = value.to_string();
            return true;
        }
        if let Some(slot) = self.icons.get_mut(name) {
            *slot = value.to_string();
            return true;
        }
        false
    }

    /// Values computed from other attributes: semantic ramps, accent ramp, mask color.
    fn derived(&self) -> Options {
        let mut options = Options::new();

        for (name, base) in [
            ("info", self.semantic.info),
            ("success", self.semantic.success),
            ("warning", self.semantic.warning),
            ("error", self.semantic.error),
        ] {
            for (i, step) in ramp(base).iter().enumerate() {
                let key = format!("{}_{}", name, i + 1);
                match i + 1 {
                    1 => options.insert(key, fade(base, 15)),
                    3 => options.insert(key, fade(base, 35)),
                    _ => options.insert(key, *step),
                };
            }
        }

        options.insert("accent_color", self.accent);
        for (i, step) in self.accent_ramp.iter().enumerate() {
            options.insert(format!("accent_color_{}", i + 1), *step);
        }
        options.insert(
            "item_hover_background_color",
            self.item_hover_background_color(),
        );
        options.insert("mask_color", self.palette.mask_color());

        options
    }

    /// Flattens every attribute into options.
    ///
    /// Integers stay integers, colors become hex strings, everything else is text.
    pub fn to_options(&self) -> Options {
        let mut options = self.derived();
        for (name, v) in self.int_fields() {
            options.insert(name, v);
        }
        for (name, v) in self.color_fields() {
            options.insert(name, v);
        }
        for (name, v) in self.text_fields() {
            options.insert(name, v);
        }
        for (name, file) in &self.icons {
            options.insert(name.clone(), file.clone());
        }
        options
    }
}

impl Default for ThemeAttributes {
    fn default() -> Self {
        Self::new(Variant::Normal, Swatch::BLUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_defaults() {
        let sizes = Sizes::default();
        assert_eq!(sizes.small_icon, 14);
        assert_eq!(sizes.huge_icon, 28);
        assert_eq!(sizes.default_size, Sizes::SMALL);
    }

    #[test]
    fn test_heading_sizes_truncate() {
        let fonts = Fonts::default();
        assert_eq!(
            (fonts.h1_size, fonts.h2_size, fonts.h3_size, fonts.h4_size),
            (37, 29, 23, 19)
        );
    }

    #[test]
    fn test_palette_by_variant() {
        assert_eq!(Palette::for_variant(Variant::Normal), Palette::dark());
        assert_eq!(Palette::for_variant(Variant::Dark), Palette::dark());
        assert_eq!(Palette::for_variant(Variant::Light), Palette::light());
        assert!(Palette::dark().background_color.is_dark());
        assert!(!Palette::light().background_color.is_dark());
    }

    #[test]
    fn test_semantic_ramp_fades() {
        let options = ThemeAttributes::default().to_options();
        assert_eq!(
            options.get("info_1").and_then(|v| v.as_str()),
            Some("rgba(24,144,255,15%)")
        );
        assert_eq!(
            options.get("error_3").and_then(|v| v.as_str()),
            Some("rgba(245,34,45,35%)")
        );
        assert_eq!(
            options.get("success_6").and_then(|v| v.as_str()),
            Some("#367F12")
        );
    }

    #[test]
    fn test_options_coercion() {
        let options = ThemeAttributes::default().to_options();
        assert_eq!(options.get("small"), Some(&OptionValue::Int(24)));
        assert_eq!(
            options.get("background_color"),
            Some(&OptionValue::Str("#212121".into()))
        );
        assert_eq!(options.get("unit"), Some(&OptionValue::Str("px".into())));
        assert_eq!(
            options.get("check_icon"),
            Some(&OptionValue::Str("check.png".into()))
        );
        assert_eq!(
            options.get("mask_color"),
            Some(&OptionValue::Str("rgba(33,33,33,90%)".into()))
        );
    }

    #[test]
    fn test_accent_recomputes_ramp() {
        let mut attrs = ThemeAttributes::default();
        let before = attrs.item_hover_background_color();
        attrs.set_accent(Swatch::RED);
        assert_ne!(attrs.item_hover_background_color(), before);
        assert_eq!(attrs.accent_ramp()[5], Swatch::RED);
        assert_eq!(
            attrs.to_options().get("accent_color_6"),
            Some(&OptionValue::from(Swatch::RED))
        );
    }

    #[test]
    fn test_set_and_get_by_name() {
        let mut attrs = ThemeAttributes::default();
        assert!(attrs.set("small", &OptionValue::Int(30)));
        assert!(attrs.set("border_color", &"#FF0000".into()));
        assert!(attrs.set("unit", &"pt".into()));
        assert!(attrs.set("accent_color", &"#722ED1".into()));
        assert!(!attrs.set("small", &"wide".into()));
        assert!(!attrs.set("no_such_attribute", &OptionValue::Int(1)));
        assert!(!attrs.set("accent_color_3", &"#000000".into()));

        assert_eq!(attrs.get("small"), Some(OptionValue::Int(30)));
        assert_eq!(attrs.get("border_color"), Some("#FF0000".into()));
        assert_eq!(attrs.get("unit"), Some("pt".into()));
        assert_eq!(attrs.accent(), Swatch::PURPLE);
        assert_eq!(attrs.get("nope"), None);
    }
}
