use bevy::prelude::*;
use constants::controls::HOLD_STEPS_PER_SECOND;
use constants::palette::SWATCHES;
use point_field::{
    CONTROLS, ControlDescriptor, ControlKind, ParameterField, ParameterValue, Rgb, SettingsSession,
};

use crate::engine::galaxy::events::{InputPhase, ParameterInputEvent, RegenerateGalaxyEvent};
use crate::engine::galaxy::state::GalaxyState;

#[derive(Component)]
pub struct SettingsPanelText;

/// Selection and key-hold state of the native panel.
#[derive(Resource, Debug, Default)]
pub struct SettingsPanel {
    selected: usize,
    held_steps: f64,
}

impl SettingsPanel {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_control(&self) -> &'static ControlDescriptor {
        &CONTROLS[self.selected % CONTROLS.len()]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % CONTROLS.len();
        self.held_steps = 0.0;
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + CONTROLS.len() - 1) % CONTROLS.len();
        self.held_steps = 0.0;
    }

    /// Whole steps to move this frame while an adjust key is held. The press
    /// itself moves one step; holding repeats at a fixed rate.
    pub fn hold_steps(&mut self, just_pressed: bool, delta_seconds: f32) -> f64 {
        if just_pressed {
            self.held_steps = 0.0;
            return 1.0;
        }
        self.held_steps += delta_seconds as f64 * HOLD_STEPS_PER_SECOND;
        let whole = self.held_steps.floor();
        self.held_steps -= whole;
        whole
    }
}

/// The swatch after (or before, for negative `direction`) `current`. Colors
/// not in the palette start from its first entry.
pub fn next_swatch(current: Rgb, direction: i32) -> Rgb {
    let swatches: Vec<Rgb> = SWATCHES
        .iter()
        .filter_map(|hex| Rgb::from_hex(hex).ok())
        .collect();
    if swatches.is_empty() {
        return current;
    }

    let len = swatches.len() as i32;
    let next = match swatches.iter().position(|swatch| swatch.to_hex() == current.to_hex()) {
        Some(index) => (index as i32 + direction).rem_euclid(len),
        None => 0,
    };
    swatches[next as usize]
}

/// Slider values print with as many decimals as their step; colors as hex.
pub fn format_value(control: &ControlDescriptor, value: ParameterValue) -> String {
    match (control.kind, value) {
        (ControlKind::Slider(range), ParameterValue::Number(number)) => {
            let decimals = (-range.step.log10()).ceil().max(0.0) as usize;
            format!("{:.*}", decimals, number)
        }
        (_, ParameterValue::Color(color)) => color.to_hex(),
        (_, ParameterValue::Number(number)) => number.to_string(),
    }
}

pub fn render_panel(session: &SettingsSession, selected: usize, seed: u64) -> String {
    let mut lines = vec![
        "Galaxy settings".to_string(),
        "Up/Down select, hold Left/Right adjust, C/O colors, R reroll".to_string(),
        String::new(),
    ];

    for (index, control) in CONTROLS.iter().enumerate() {
        let marker = if index == selected { ">" } else { " " };
        let staged = if session.is_staged(control.field) { " *" } else { "" };
        lines.push(format!(
            "{} {:<18} {}{}",
            marker,
            control.label,
            format_value(control, session.displayed(control.field)),
            staged
        ));
    }

    lines.push(String::new());
    lines.push(format!("seed {}", seed));
    lines.join("\n")
}

pub fn settings_panel_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut panel: ResMut<SettingsPanel>,
    galaxy: Res<GalaxyState>,
    mut input_events: EventWriter<ParameterInputEvent>,
    mut regenerate_events: EventWriter<RegenerateGalaxyEvent>,
) {
    let previous = panel.selected_control().field;
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        panel.select_previous();
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        panel.select_next();
    }

    let session = galaxy.context.session();
    let control = panel.selected_control();
    let field = control.field;

    // A drag still held when the selection moves would otherwise stay staged.
    if field != previous && session.is_staged(previous) {
        input_events.write(ParameterInputEvent {
            field: previous,
            value: session.displayed(previous),
            phase: InputPhase::Cancel,
        });
    }

    let mut direction = 0.0;
    if keyboard.pressed(KeyCode::ArrowRight) {
        direction += 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowLeft) {
        direction -= 1.0;
    }
    let just_pressed = keyboard.any_just_pressed([KeyCode::ArrowLeft, KeyCode::ArrowRight]);

    match control.kind {
        ControlKind::Slider(_) => {
            if direction != 0.0 {
                let steps = panel.hold_steps(just_pressed, time.delta_secs());
                if steps > 0.0 {
                    let value = control.nudge(session.displayed(field), steps * direction);
                    input_events.write(ParameterInputEvent {
                        field,
                        value,
                        phase: InputPhase::Drag,
                    });
                }
            } else if keyboard.any_just_released([KeyCode::ArrowLeft, KeyCode::ArrowRight]) {
                input_events.write(ParameterInputEvent {
                    field,
                    value: session.displayed(field),
                    phase: InputPhase::Commit,
                });
            }
        }
        ControlKind::Color => {
            if just_pressed && direction != 0.0 {
                commit_next_swatch(session, field, direction as i32, &mut input_events);
            }
        }
    }

    if keyboard.just_pressed(KeyCode::KeyC) {
        commit_next_swatch(session, ParameterField::InsideColor, 1, &mut input_events);
    }
    if keyboard.just_pressed(KeyCode::KeyO) {
        commit_next_swatch(session, ParameterField::OutsideColor, 1, &mut input_events);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        regenerate_events.write(RegenerateGalaxyEvent { reroll_seed: true });
    }
}

fn commit_next_swatch(
    session: &SettingsSession,
    field: ParameterField,
    direction: i32,
    input_events: &mut EventWriter<ParameterInputEvent>,
) {
    let Some(current) = session.displayed(field).as_color() else {
        return;
    };
    input_events.write(ParameterInputEvent {
        field,
        value: ParameterValue::Color(next_swatch(current, direction)),
        phase: InputPhase::Commit,
    });
}

pub fn settings_panel_text_update(
    galaxy: Res<GalaxyState>,
    panel: Res<SettingsPanel>,
    mut query: Query<&mut Text, With<SettingsPanelText>>,
) {
    for mut text in &mut query {
        text.0 = render_panel(galaxy.context.session(), panel.selected(), galaxy.seed);
    }
}
