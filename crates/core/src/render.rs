//! Textual dump of the grid state.

use crate::agent::AgentKind;
use crate::model::BushfireModel;

/// Render the grid as `height` rows of space-joined glyphs, row `y` top to
/// bottom, column `x` left to right: `' '` empty cell, `'T'` tree, `'F'`
/// burning tree, `'E'` firefighter.
///
/// Agents are drawn in scheduler registration order, so a multi-occupied
/// cell shows whichever of its occupants draws last. The format is lossy by
/// design; it mirrors what the interactive driver prints after each tick.
pub fn render_ascii(model: &BushfireModel) -> String {
    let width = model.grid().width() as usize;
    let height = model.grid().height() as usize;
    let mut cells = vec![vec![' '; width]; height];

    for &id in model.schedule().agents() {
        let Some(agent) = model.agent(id) else {
            continue;
        };
        let glyph = match agent.kind {
            AgentKind::Tree { on_fire: true } => 'F',
            AgentKind::Tree { on_fire: false } => 'T',
            AgentKind::Firefighter => 'E',
        };
        cells[agent.pos.1 as usize][agent.pos.0 as usize] = glyph;
    }

    let mut out = String::with_capacity(height * (width * 2 + 1));
    for row in &cells {
        for (col, glyph) in row.iter().enumerate() {
            if col > 0 {
                out.push(' ');
            }
            out.push(*glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelConfig;

    #[test]
    fn glyphs_reflect_agent_state() {
        let mut model = BushfireModel::new(ModelConfig {
            width: 3,
            height: 2,
            tree_density: 1.0,
            num_firefighters: 0,
            auto_place_firefighters: false,
            seed: 0,
        });
        model.ignite(1, 0).unwrap();

        assert_eq!(render_ascii(&model), "T F T\nT T T\n");
    }

    #[test]
    fn empty_grid_renders_blank_cells() {
        let model = BushfireModel::new(ModelConfig {
            width: 2,
            height: 2,
            tree_density: 0.0,
            ..ModelConfig::default()
        });
        assert_eq!(render_ascii(&model), "   \n   \n");
    }

    #[test]
    fn firefighter_draws_over_an_earlier_registered_tree() {
        let mut model = BushfireModel::new(ModelConfig {
            width: 2,
            height: 1,
            tree_density: 1.0,
            num_firefighters: 0,
            auto_place_firefighters: false,
            seed: 0,
        });
        model.place_firefighter(0, 0).unwrap();
        assert_eq!(render_ascii(&model), "E T\n");
    }
}
