//! On-screen button layout for gamepad emulation.
//!
//! Positions are in device-frame coordinates and target the default
//! landscape HUD of the game build this layout was measured against. Every
//! field carries a serde default so a partial TOML file overrides only what
//! it names.

use serde::Deserialize;
use tapcast_core::geometry::Point;
use tapcast_core::pointer::VirtualPointer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to parse button layout: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Target positions for every emulated control, plus the two tuning
/// scalars used by the camera.
#[derive(Debug, Clone, Deserialize)]
pub struct ButtonLayout {
    /// Rest position of the movement joystick.
    #[serde(default = "default_joystick_rest")]
    pub joystick_rest: Point,
    /// How far a held direction displaces the joystick from rest.
    #[serde(default = "default_move_offset")]
    pub move_offset: i32,
    /// Rest position of the camera/look pointer.
    #[serde(default = "default_camera_rest")]
    pub camera_rest: Point,
    #[serde(default = "default_camera_sensitivity")]
    pub camera_sensitivity_normal: f32,
    #[serde(default = "default_camera_sensitivity")]
    pub camera_sensitivity_firing: f32,
    #[serde(default = "default_crouch")]
    pub crouch: Point,
    #[serde(default = "default_jump")]
    pub jump: Point,
    #[serde(default = "default_reload")]
    pub reload: Point,
    #[serde(default = "default_weapon_switch")]
    pub weapon_switch: Point,
    /// Base scorestreak button; the two variants sit to its left.
    #[serde(default = "default_scorestreak")]
    pub scorestreak: Point,
    /// Horizontal spacing between adjacent scorestreak buttons.
    #[serde(default = "default_scorestreak_offset")]
    pub scorestreak_offset: i32,
    #[serde(default = "default_skill")]
    pub skill: Point,
    #[serde(default = "default_throwable")]
    pub throwable: Point,
    #[serde(default = "default_chat")]
    pub chat: Point,
    /// Aim-down-sights / shoot button.
    #[serde(default = "default_fire")]
    pub fire: Point,
}

fn default_joystick_rest() -> Point {
    Point::new(340, 865)
}

fn default_move_offset() -> i32 {
    250
}

fn default_camera_rest() -> Point {
    Point::new(1250, 542)
}

fn default_camera_sensitivity() -> f32 {
    1.25
}

fn default_crouch() -> Point {
    Point::new(2032, 973)
}

fn default_jump() -> Point {
    Point::new(2209, 890)
}

fn default_reload() -> Point {
    Point::new(2255, 713)
}

fn default_weapon_switch() -> Point {
    Point::new(1290, 964)
}

fn default_scorestreak() -> Point {
    Point::new(1013, 957)
}

fn default_scorestreak_offset() -> i32 {
    120
}

fn default_skill() -> Point {
    Point::new(2247, 405)
}

fn default_throwable() -> Point {
    Point::new(1619, 932)
}

fn default_chat() -> Point {
    Point::new(2072, 343)
}

fn default_fire() -> Point {
    Point::new(2000, 790)
}

impl Default for ButtonLayout {
    fn default() -> Self {
        // An empty document deserializes every field to its default.
        toml::from_str("").expect("empty layout must deserialize")
    }
}

impl ButtonLayout {
    /// Parses a layout from TOML text; absent fields keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, LayoutError> {
        Ok(toml::from_str(text)?)
    }

    /// Layout position for a pointer slot.
    ///
    /// Returns `None` for the pinch pointer, whose position is derived from
    /// the live mouse position rather than the layout. The scorestreak
    /// variants are the base position shifted left by one and two offset
    /// steps; the shift is computed here so the stored base never changes.
    pub fn position_of(&self, pointer: VirtualPointer) -> Option<Point> {
        let point = match pointer {
            VirtualPointer::Joystick => self.joystick_rest,
            VirtualPointer::Camera => self.camera_rest,
            VirtualPointer::Crouch => self.crouch,
            VirtualPointer::Jump => self.jump,
            VirtualPointer::Reload => self.reload,
            VirtualPointer::WeaponSwitch => self.weapon_switch,
            VirtualPointer::Scorestreak => self.scorestreak,
            VirtualPointer::ScorestreakAlt1 => self.scorestreak.offset(-self.scorestreak_offset, 0),
            VirtualPointer::ScorestreakAlt2 => {
                self.scorestreak.offset(-2 * self.scorestreak_offset, 0)
            }
            VirtualPointer::Skill => self.skill,
            VirtualPointer::Throwable => self.throwable,
            VirtualPointer::Chat => self.chat,
            VirtualPointer::Fire => self.fire,
            VirtualPointer::Pinch => return None,
        };
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let layout = ButtonLayout::from_toml_str("").unwrap();

        assert_eq!(layout.joystick_rest, Point::new(340, 865));
        assert_eq!(layout.move_offset, 250);
        assert_eq!(layout.camera_rest, Point::new(1250, 542));
        assert_eq!(layout.fire, Point::new(2000, 790));
    }

    #[test]
    fn test_partial_toml_overrides_named_fields_only() {
        let layout = ButtonLayout::from_toml_str(
            r#"
            move_offset = 180
            jump = { x = 2100, y = 900 }
            "#,
        )
        .unwrap();

        assert_eq!(layout.move_offset, 180);
        assert_eq!(layout.jump, Point::new(2100, 900));
        assert_eq!(layout.crouch, Point::new(2032, 973));
    }

    #[test]
    fn test_scorestreak_variants_shift_left() {
        let layout = ButtonLayout::default();

        assert_eq!(
            layout.position_of(VirtualPointer::Scorestreak),
            Some(Point::new(1013, 957))
        );
        assert_eq!(
            layout.position_of(VirtualPointer::ScorestreakAlt1),
            Some(Point::new(893, 957))
        );
        assert_eq!(
            layout.position_of(VirtualPointer::ScorestreakAlt2),
            Some(Point::new(773, 957))
        );
        // the stored base is untouched
        assert_eq!(layout.scorestreak, Point::new(1013, 957));
    }

    #[test]
    fn test_pinch_has_no_layout_position() {
        assert_eq!(
            ButtonLayout::default().position_of(VirtualPointer::Pinch),
            None
        );
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(ButtonLayout::from_toml_str("move_offset = \"fast\"").is_err());
    }
}
