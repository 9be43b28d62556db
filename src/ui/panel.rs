// src/ui/panel.rs
//! Light control panel
//!
//! A small window exposing the two live light parameters. It starts
//! collapsed and applies edits as they are made.

use crate::gfx::scene::light::{LightControls, MAX_LIGHT_INTENSITY, MIN_LIGHT_INTENSITY};

/// Renders the light panel and writes edits into `controls`
///
/// # Arguments
/// * `ui` - ImGui UI context
/// * `controls` - Light parameters read by the scene every tick
pub fn light_panel(ui: &imgui::Ui, controls: &mut LightControls) {
    let display_size = ui.io().display_size;
    // Guard against invalid display size that could cause crashes
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }
    let panel_width = 280.0_f32.min(display_size[0]);

    ui.window("Controls")
        .size([panel_width, 0.0], imgui::Condition::FirstUseEver)
        .position(
            [display_size[0] - panel_width - 10.0, 10.0],
            imgui::Condition::FirstUseEver,
        )
        .collapsed(true, imgui::Condition::FirstUseEver)
        .always_auto_resize(true)
        .build(|| {
            let mut color_input = controls.color_input.clone();
            if ui.input_text("lightColor", &mut color_input).build() {
                controls.set_color_input(&color_input);
            }

            let mut intensity = controls.intensity();
            if ui.slider(
                "lightIntensity",
                MIN_LIGHT_INTENSITY,
                MAX_LIGHT_INTENSITY,
                &mut intensity,
            ) {
                controls.set_intensity(intensity);
            }

            ui.separator();
            ui.text_disabled(format!("Applied color: {}", controls.color()));
        });
}
