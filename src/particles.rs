//! Configuration for the `particlesJS` background.
//!
//! Field names follow the library's JSON schema, so the struct is serialized
//! straight into the object the global function expects.

use crate::theme::Theme;
use serde::Serialize;

pub const PARTICLES_CONTAINER_ID: &str = "particles-js";
pub const PARTICLES_GLOBAL: &str = "particlesJS";
pub const THEME_CHANGE_EVENT: &str = "themechange";

const MOBILE_PARTICLE_COUNT: u32 = 40;
const DESKTOP_PARTICLE_COUNT: u32 = 80;
const PUSH_PARTICLES: u32 = 4;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParticleConfig {
    pub particles: Particles,
    pub interactivity: Interactivity,
    pub retina_detect: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Particles {
    pub number: Number,
    pub color: ColorValue,
    pub shape: Shape,
    pub opacity: Opacity,
    pub size: Size,
    pub line_linked: LineLinked,
    #[serde(rename = "move")]
    pub movement: Movement,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Number {
    pub value: u32,
    pub density: Density,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Density {
    pub enable: bool,
    pub value_area: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorValue {
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: String,
    pub stroke: Stroke,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stroke {
    pub width: u32,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Opacity {
    pub value: f64,
    pub random: bool,
    pub anim: OpacityAnim,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OpacityAnim {
    pub enable: bool,
    pub speed: f64,
    pub opacity_min: f64,
    pub sync: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Size {
    pub value: f64,
    pub random: bool,
    pub anim: SizeAnim,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SizeAnim {
    pub enable: bool,
    pub speed: f64,
    pub size_min: f64,
    pub sync: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineLinked {
    pub enable: bool,
    pub distance: u32,
    pub color: String,
    pub opacity: f64,
    pub width: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Movement {
    pub enable: bool,
    pub speed: f64,
    pub direction: String,
    pub random: bool,
    pub straight: bool,
    pub out_mode: String,
    pub bounce: bool,
    pub attract: Attract,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Attract {
    pub enable: bool,
    #[serde(rename = "rotateX")]
    pub rotate_x: u32,
    #[serde(rename = "rotateY")]
    pub rotate_y: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Interactivity {
    pub detect_on: String,
    pub events: Events,
    pub modes: Modes,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Events {
    pub onhover: ModeToggle,
    pub onclick: ModeToggle,
    pub resize: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModeToggle {
    pub enable: bool,
    pub mode: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Modes {
    pub grab: Grab,
    pub bubble: Bubble,
    pub repulse: Repulse,
    pub push: ParticleCount,
    pub remove: ParticleCount,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grab {
    pub distance: u32,
    pub line_linked: GrabLine,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GrabLine {
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bubble {
    pub distance: u32,
    pub size: u32,
    pub duration: f64,
    pub opacity: f64,
    pub speed: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Repulse {
    pub distance: u32,
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParticleCount {
    pub particles_nb: u32,
}

/// Inputs the configuration depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleEnvironment {
    pub viewport_width: f64,
    pub breakpoint_px: f64,
    pub theme: Theme,
    pub coarse_pointer: bool,
}

impl ParticleEnvironment {
    pub fn is_narrow(&self) -> bool {
        self.viewport_width < self.breakpoint_px
    }
}

impl ParticleConfig {
    pub fn build(env: ParticleEnvironment) -> Self {
        let color = env.theme.particle_color().to_string();
        let count = if env.is_narrow() {
            MOBILE_PARTICLE_COUNT
        } else {
            DESKTOP_PARTICLE_COUNT
        };

        Self {
            particles: Particles {
                number: Number {
                    value: count,
                    density: Density {
                        enable: true,
                        value_area: 800,
                    },
                },
                color: ColorValue {
                    value: color.clone(),
                },
                shape: Shape {
                    kind: "circle".to_string(),
                    stroke: Stroke {
                        width: 0,
                        color: "#000000".to_string(),
                    },
                },
                opacity: Opacity {
                    value: 0.3,
                    random: true,
                    anim: OpacityAnim {
                        enable: true,
                        speed: 1.0,
                        opacity_min: 0.1,
                        sync: false,
                    },
                },
                size: Size {
                    value: 3.0,
                    random: true,
                    anim: SizeAnim {
                        enable: true,
                        speed: 2.0,
                        size_min: 0.1,
                        sync: false,
                    },
                },
                line_linked: LineLinked {
                    enable: true,
                    distance: 150,
                    color,
                    opacity: 0.2,
                    width: 1,
                },
                movement: Movement {
                    enable: true,
                    speed: 2.0,
                    direction: "none".to_string(),
                    random: true,
                    straight: false,
                    out_mode: "out".to_string(),
                    bounce: false,
                    attract: Attract {
                        enable: false,
                        rotate_x: 600,
                        rotate_y: 1200,
                    },
                },
            },
            interactivity: Interactivity {
                detect_on: "canvas".to_string(),
                events: Events {
                    onhover: ModeToggle {
                        enable: !env.coarse_pointer,
                        mode: "repulse".to_string(),
                    },
                    onclick: ModeToggle {
                        enable: true,
                        mode: "push".to_string(),
                    },
                    resize: true,
                },
                modes: Modes {
                    grab: Grab {
                        distance: 400,
                        line_linked: GrabLine { opacity: 1.0 },
                    },
                    bubble: Bubble {
                        distance: 400,
                        size: 40,
                        duration: 2.0,
                        opacity: 8.0,
                        speed: 3.0,
                    },
                    repulse: Repulse {
                        distance: 100,
                        duration: 0.4,
                    },
                    push: ParticleCount {
                        particles_nb: PUSH_PARTICLES,
                    },
                    remove: ParticleCount { particles_nb: 2 },
                },
            },
            retina_detect: true,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(viewport_width: f64, theme: Theme, coarse_pointer: bool) -> ParticleEnvironment {
        ParticleEnvironment {
            viewport_width,
            breakpoint_px: 768.0,
            theme,
            coarse_pointer,
        }
    }

    #[test]
    fn narrow_viewports_get_fewer_particles() {
        assert_eq!(
            ParticleConfig::build(env(767.0, Theme::Light, false)).particles.number.value,
            40
        );
        assert_eq!(
            ParticleConfig::build(env(768.0, Theme::Light, false)).particles.number.value,
            80
        );
    }

    #[test]
    fn colors_follow_the_theme() {
        let dark = ParticleConfig::build(env(1024.0, Theme::Dark, false));
        assert_eq!(dark.particles.color.value, "#ffffff");
        assert_eq!(dark.particles.line_linked.color, "#ffffff");

        let light = ParticleConfig::build(env(1024.0, Theme::Light, false));
        assert_eq!(light.particles.color.value, "#667eea");
    }

    #[test]
    fn touch_input_disables_hover_repulse() {
        let touch = ParticleConfig::build(env(400.0, Theme::Light, true));
        assert!(!touch.interactivity.events.onhover.enable);

        let mouse = ParticleConfig::build(env(1400.0, Theme::Light, false));
        assert!(mouse.interactivity.events.onhover.enable);
        assert_eq!(mouse.interactivity.events.onhover.mode, "repulse");
    }

    #[test]
    fn click_pushes_four_particles() {
        let config = ParticleConfig::build(env(1400.0, Theme::Dark, false));
        assert!(config.interactivity.events.onclick.enable);
        assert_eq!(config.interactivity.events.onclick.mode, "push");
        assert_eq!(config.interactivity.modes.push.particles_nb, 4);
    }

    #[test]
    fn json_uses_library_field_names() {
        let json = ParticleConfig::build(env(1400.0, Theme::Dark, false))
            .to_json()
            .expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["particles"]["move"]["out_mode"], "out");
        assert_eq!(value["particles"]["shape"]["type"], "circle");
        assert_eq!(value["particles"]["move"]["attract"]["rotateX"], 600);
        assert_eq!(value["interactivity"]["modes"]["push"]["particles_nb"], 4);
        assert_eq!(value["retina_detect"], true);
    }
}
