//! Text rendering of the grid and the population histogram.
//!
//! Grid glyphs:
//!
//! | Glyph | Meaning                                  |
//! |-------|------------------------------------------|
//! | `x`   | predator                                 |
//! | `X`   | predator past half its lifespan          |
//! | `*`   | trails a predator that is asleep         |
//! | `o`   | prey                                     |
//! | `O`   | prey past half its lifespan              |
//! | `-`   | empty cell                               |
//!
//! Rows are `x` coordinates and columns are `y`, matching the scan order.

use predation_agents::AgentError;
use predation_core::Simulation;
use predation_types::{CellSnapshot, PopulationSample, Position, Species};
use predation_world::RandomSource;

/// ANSI sequence that clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[0;0H";

/// Legend printed above every frame.
const LEGEND: &str = "X/x = predator | O/o = prey | * = sleeping";

/// Render the header and grid of `sim` as one frame.
///
/// # Errors
///
/// Returns [`AgentError`] if the habitat cannot be read.
pub fn render_grid<R: RandomSource>(sim: &Simulation<R>) -> Result<String, AgentError> {
    let counts = sim.population_counts();
    let mut out = format!(
        "{LEGEND}\nPredators: {} | Prey: {} | Tick #{}\n\n",
        counts.predators,
        counts.prey,
        sim.tick_number()
    );

    for x in 0..sim.dimension() {
        for y in 0..sim.dimension() {
            let snapshot = sim.cell_snapshot(Position::new(x, y))?;
            out.push_str(cell_glyphs(snapshot.as_ref()));
        }
        out.push('\n');
    }
    Ok(out)
}

/// Three-character rendering of one cell.
fn cell_glyphs(snapshot: Option<&CellSnapshot>) -> &'static str {
    let Some(cell) = snapshot else {
        return " - ";
    };
    match (cell.species, cell.is_elder(), cell.is_asleep) {
        (Species::Predator, false, false) => " x ",
        (Species::Predator, false, true) => " x*",
        (Species::Predator, true, false) => " X ",
        (Species::Predator, true, true) => " X*",
        (Species::Prey, false, _) => " o ",
        (Species::Prey, true, _) => " O ",
    }
}

/// Render the population history as a `width` x `height` histogram.
///
/// The history is resampled to `width` columns (first and last samples
/// always included). Each column is filled from the bottom to the predator
/// share of that sample's population, rounded to the nearest row.
pub fn render_histogram(history: &[PopulationSample], width: u32, height: u32) -> String {
    let mut out = String::from("Population Histogram\n");
    if history.is_empty() || width == 0 || height == 0 {
        out.push_str("(no data)\n");
        return out;
    }

    let filled: Vec<u32> = (0..width)
        .filter_map(|column| resample(history, column, width))
        .map(|sample| filled_rows(sample, height))
        .collect();

    for level in (1..=height).rev() {
        for &column in &filled {
            out.push(if column >= level { 'x' } else { '-' });
        }
        out.push('\n');
    }
    out
}

/// Pick the sample shown in `column` of a `width`-column histogram.
fn resample(history: &[PopulationSample], column: u32, width: u32) -> Option<PopulationSample> {
    let last = history.len().checked_sub(1)?;
    let span = usize::try_from(width.checked_sub(1)?).ok()?;
    let index = if span == 0 {
        last
    } else {
        usize::try_from(column)
            .ok()?
            .checked_mul(last)?
            .checked_div(span)?
    };
    history.get(index).copied()
}

/// Rows filled for the predator share of `sample`.
fn filled_rows(sample: PopulationSample, height: u32) -> u32 {
    let total = u64::from(sample.total());
    if total == 0 {
        return 0;
    }
    let scaled = u64::from(sample.predators)
        .saturating_mul(u64::from(height))
        .saturating_mul(2)
        .saturating_add(total);
    let rows = scaled.checked_div(total.saturating_mul(2)).unwrap_or(0);
    u32::try_from(rows).unwrap_or(height).min(height)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use predation_agents::EcosystemConfig;
    use predation_core::SimulationState;
    use predation_world::ScriptedRandom;

    use super::*;

    #[test]
    fn grid_shows_species_maturity_and_sleep() {
        let mut state = SimulationState::new(2, EcosystemConfig::default()).unwrap();
        let parity = state.clock.parity();
        let predator = state
            .habitat
            .spawn(Species::Predator, Position::new(0, 0), parity, &state.ecosystem)
            .unwrap();
        let prey = state
            .habitat
            .spawn(Species::Prey, Position::new(1, 1), parity, &state.ecosystem)
            .unwrap();
        if let Some(agent) = state.habitat.agent_mut(predator) {
            agent.core_mut().age = 21;
        }
        if let Some(p) = state
            .habitat
            .agent_mut(predator)
            .and_then(|a| a.as_predator_mut())
        {
            p.is_asleep = true;
        }
        if let Some(agent) = state.habitat.agent_mut(prey) {
            agent.core_mut().age = 3;
        }
        let sim = Simulation::from_state(state, ScriptedRandom::new());

        let frame = render_grid(&sim).unwrap();

        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.first().copied(), Some(LEGEND));
        assert_eq!(lines.get(1).copied(), Some("Predators: 1 | Prey: 1 | Tick #0"));
        assert_eq!(lines.get(3).copied(), Some(" X* - "));
        assert_eq!(lines.get(4).copied(), Some(" -  o "));
    }

    #[test]
    fn empty_history_renders_placeholder() {
        assert_eq!(
            render_histogram(&[], 50, 20),
            "Population Histogram\n(no data)\n"
        );
    }

    #[test]
    fn histogram_fills_predator_share_from_the_bottom() {
        let history = [PopulationSample::new(1, 3), PopulationSample::new(4, 0)];
        let chart = render_histogram(&history, 2, 4);
        assert_eq!(chart, "Population Histogram\n-x\n-x\n-x\nxx\n");
    }

    #[test]
    fn histogram_resamples_long_histories() {
        let history: Vec<PopulationSample> = (0..100)
            .map(|i| PopulationSample::new(i, 100 - i))
            .collect();
        let chart = render_histogram(&history, 10, 5);
        let rows: Vec<&str> = chart.lines().skip(1).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|row| row.len() == 10));
        // The first column is all prey, the last nearly all predators.
        assert!(rows.iter().all(|row| row.starts_with('-')));
        assert!(rows.iter().all(|row| row.ends_with('x')));
    }

    #[test]
    fn filled_rows_rounds_to_nearest() {
        assert_eq!(filled_rows(PopulationSample::new(0, 0), 20), 0);
        assert_eq!(filled_rows(PopulationSample::new(5, 15), 20), 5);
        assert_eq!(filled_rows(PopulationSample::new(1, 2), 20), 7);
        assert_eq!(filled_rows(PopulationSample::new(9, 0), 20), 20);
    }
}
