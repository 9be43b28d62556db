//! Scene lights and the live light parameters

use cgmath::{InnerSpace, Vector3};

use crate::{color::Color, gfx::resources::global_bindings::LightConfig};

/// Lowest intensity the light panel accepts
pub const MIN_LIGHT_INTENSITY: f32 = 0.5;
/// Highest intensity the light panel accepts
pub const MAX_LIGHT_INTENSITY: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Parallel light shining from `position` towards `target`
    Directional {
        position: Vector3<f32>,
        target: Vector3<f32>,
        color: Color,
        intensity: f32,
    },
    /// Uniform light reaching every surface
    Ambient { color: Color, intensity: f32 },
}

impl Light {
    pub fn directional(position: [f32; 3], color: Color, intensity: f32) -> Self {
        Self::Directional {
            position: position.into(),
            target: Vector3::new(0.0, 0.0, 0.0),
            color,
            intensity,
        }
    }

    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self::Ambient { color, intensity }
    }

    pub fn is_directional(&self) -> bool {
        matches!(self, Self::Directional { .. })
    }
}

/// Builds the shader lighting from the first directional and ambient lights.
pub fn light_config(lights: &[Light]) -> LightConfig {
    let mut config = LightConfig::default();

    if let Some(Light::Directional {
        position,
        target,
        color,
        intensity,
    }) = lights.iter().find(|light| light.is_directional())
    {
        let towards_light = *position - *target;
        if towards_light.magnitude2() > f32::EPSILON {
            config.direction = towards_light.normalize().into();
        }
        config.color = color.to_array();
        config.intensity = *intensity;
    }

    if let Some(Light::Ambient { color, intensity }) = lights
        .iter()
        .find(|light| matches!(light, Light::Ambient { .. }))
    {
        config.ambient_color = color.to_array();
        config.ambient_intensity = *intensity;
    }

    config
}

/// The two tunable light parameters edited through the light panel.
///
/// `color_input` holds the text as typed; `color` is the last value that
/// parsed successfully and is what the light receives.
#[derive(Debug, Clone, PartialEq)]
pub struct LightControls {
    pub color_input: String,
    color: Color,
    intensity: f32,
}

impl Default for LightControls {
    fn default() -> Self {
        Self {
            color_input: "white".to_string(),
            color: Color::WHITE,
            intensity: MIN_LIGHT_INTENSITY,
        }
    }
}

impl LightControls {
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Sets the intensity, clamped to the panel range.
    ///
    /// Non-finite requests are ignored.
    pub fn set_intensity(&mut self, intensity: f32) {
        if !intensity.is_finite() {
            log::warn!("Ignoring non-finite light intensity {}", intensity);
            return;
        }
        self.intensity = intensity.clamp(MIN_LIGHT_INTENSITY, MAX_LIGHT_INTENSITY);
    }

    /// Stores new color text and applies it if it parses.
    ///
    /// Returns whether the light color changed.
    pub fn set_color_input(&mut self, input: &str) -> bool {
        self.color_input = input.to_string();
        self.reparse_color()
    }

    /// Re-parses `color_input`, keeping the previous color on error.
    pub fn reparse_color(&mut self) -> bool {
        match Color::parse(&self.color_input) {
            Ok(color) => {
                let changed = color != self.color;
                self.color = color;
                changed
            }
            Err(err) => {
                log::warn!("Keeping light color {}: {}", self.color, err);
                false
            }
        }
    }

    /// Pushes the current parameters into a directional light.
    ///
    /// Other light kinds are left untouched.
    pub fn apply_to(&self, light: &mut Light) {
        if let Light::Directional {
            color, intensity, ..
        } = light
        {
            *color = self.color;
            *intensity = self.intensity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let controls = LightControls::default();
        assert_eq!(controls.color_input, "white");
        assert_eq!(controls.color(), Color::WHITE);
        assert_eq!(controls.intensity(), 0.5);
    }

    #[test]
    fn test_intensity_is_clamped() {
        let mut controls = LightControls::default();

        for (requested, expected) in [(-10.0, 0.5), (0.0, 0.5), (2.5, 2.5), (5.0, 5.0), (99.0, 5.0)] {
            controls.set_intensity(requested);
            assert_eq!(controls.intensity(), expected);
        }

        controls.set_intensity(f32::NAN);
        assert_eq!(controls.intensity(), 5.0);
        controls.set_intensity(f32::NEG_INFINITY);
        assert_eq!(controls.intensity(), 5.0);
    }

    #[test]
    fn test_invalid_color_keeps_previous() {
        let mut controls = LightControls::default();
        assert!(controls.set_color_input("#ff0000"));
        assert!(!controls.set_color_input("not-a-color"));

        assert_eq!(controls.color_input, "not-a-color");
        assert_eq!(controls.color().to_hex(), 0xff0000);
    }

    #[test]
    fn test_apply_to_directional_only() {
        let mut controls = LightControls::default();
        controls.set_intensity(3.0);
        controls.set_color_input("hotpink");

        let mut directional = Light::directional([0.0, 0.0, 5.0], Color::WHITE, 1.0);
        controls.apply_to(&mut directional);
        match directional {
            Light::Directional {
                color, intensity, ..
            } => {
                assert_eq!(color.to_hex(), 0xff69b4);
                assert_eq!(intensity, 3.0);
            }
            Light::Ambient { .. } => unreachable!(),
        }

        let mut ambient = Light::ambient(Color::WHITE, 0.1);
        controls.apply_to(&mut ambient);
        assert_eq!(ambient, Light::ambient(Color::WHITE, 0.1));
    }

    #[test]
    fn test_light_config_points_towards_light() {
        let lights = [
            Light::directional([0.0, 0.0, 5.0], Color::WHITE, 0.5),
            Light::ambient(Color::WHITE, 0.1),
        ];
        let config = light_config(&lights);

        assert_eq!(config.direction, [0.0, 0.0, 1.0]);
        assert_eq!(config.intensity, 0.5);
        assert_eq!(config.ambient_intensity, 0.1);
    }
}
