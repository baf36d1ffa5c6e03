//! Scenario tests for the stochastic fire-spread rule.
//!
//! The spread front is the set of trees burning at tick start: each of them
//! ignites at most one occupied edge-adjacent neighbor per tick, chosen
//! uniformly at random. These tests characterize that process statistically
//! across seeds rather than pinning single examples.

use bushfire_core::{BushfireModel, ModelConfig};

fn full_forest(width: u32, height: u32, seed: u64) -> BushfireModel {
    BushfireModel::new(ModelConfig {
        width,
        height,
        tree_density: 1.0,
        num_firefighters: 0,
        auto_place_firefighters: false,
        seed,
    })
}

fn burning_cells(model: &BushfireModel) -> Vec<(u32, u32)> {
    let mut cells: Vec<(u32, u32)> = model
        .agents()
        .filter(|a| a.kind.on_fire() == Some(true))
        .map(|a| a.pos)
        .collect();
    cells.sort_unstable();
    cells
}

#[test]
fn center_fire_ignites_exactly_one_orthogonal_neighbor() {
    let orthogonal = [(0, 1), (2, 1), (1, 0), (1, 2)];
    for seed in 0..100 {
        let mut model = full_forest(3, 3, seed);
        model.ignite(1, 1).unwrap();
        model.step().unwrap();

        let burning = burning_cells(&model);
        assert_eq!(burning.len(), 2, "seed {seed}: expected center plus one");
        assert!(burning.contains(&(1, 1)), "seed {seed}: center went out");
        let new_cell = *burning.iter().find(|&&c| c != (1, 1)).unwrap();
        assert!(
            orthogonal.contains(&new_cell),
            "seed {seed}: fire jumped to non-adjacent cell {new_cell:?}"
        );
    }
}

#[test]
fn neighbor_choice_is_uniform_across_seeds() {
    let orthogonal = [(0, 1), (2, 1), (1, 0), (1, 2)];
    let mut counts = [0_u32; 4];
    let trials = 400;

    for seed in 0..trials {
        let mut model = full_forest(3, 3, seed);
        model.ignite(1, 1).unwrap();
        model.step().unwrap();
        let burning = burning_cells(&model);
        let new_cell = *burning.iter().find(|&&c| c != (1, 1)).unwrap();
        let slot = orthogonal.iter().position(|&c| c == new_cell).unwrap();
        counts[slot] += 1;
    }

    // Expect ~100 per neighbor; 60..140 is over four standard deviations out.
    for (slot, &count) in counts.iter().enumerate() {
        assert!(
            (60..140).contains(&count),
            "neighbor {slot} ignited {count} times out of {trials}"
        );
    }
}

#[test]
fn corner_fire_with_two_occupied_neighbors_spreads_to_at_most_one() {
    for seed in 0..100 {
        let mut model = full_forest(2, 2, seed);
        model.ignite(0, 0).unwrap();
        model.step().unwrap();

        let burning = burning_cells(&model);
        assert_eq!(burning.len(), 2, "seed {seed}: spread cap violated");
        assert!(burning.contains(&(0, 0)));
        let new_cell = *burning.iter().find(|&&c| c != (0, 0)).unwrap();
        assert!(
            new_cell == (1, 0) || new_cell == (0, 1),
            "seed {seed}: ignited diagonal or out-of-cap cell {new_cell:?}"
        );
    }
}

#[test]
fn lone_tree_on_1x1_grid_burns_without_spreading_or_failing() {
    let mut model = full_forest(1, 1, 7);
    model.ignite(0, 0).unwrap();
    for _ in 0..5 {
        model.step().unwrap();
    }
    assert_eq!(burning_cells(&model), vec![(0, 0)]);
    assert_eq!(model.schedule().len(), 1);
}

#[test]
fn fire_never_goes_out_on_its_own() {
    let mut model = full_forest(3, 3, 11);
    model.ignite(1, 1).unwrap();
    let center_id = model.grid().contents(1, 1).unwrap()[0];
    for _ in 0..10 {
        model.step().unwrap();
        assert_eq!(
            model.agent(center_id).unwrap().kind.on_fire(),
            Some(true),
            "tree self-extinguished at tick {}",
            model.tick()
        );
    }
}

#[test]
fn unburning_forest_stays_inert() {
    let mut model = full_forest(4, 4, 13);
    for _ in 0..5 {
        model.step().unwrap();
    }
    assert!(burning_cells(&model).is_empty());
    assert_eq!(model.schedule().len(), 16);
}
