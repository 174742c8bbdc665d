//! Property tests for round setup.
//!
//! Properties tested:
//! - Active cells are distinct, ascending, inside the grid, sized per level
//! - Beaver and Warden never share a cell and both sit on active cells
//! - Ammo is base ammo plus extra-ammo rank
//! - Random initial placement never lands on a hazard

use proptest::prelude::*;

use crate::domain::actions::Action;
use crate::domain::levels::level_def;
use crate::domain::rng::ChaChaRoundRng;
use crate::domain::state::Side;
use crate::domain::test_gens;
use crate::domain::test_prelude;
use crate::domain::turns::apply_action;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_board_shape(state in test_gens::fresh_round()) {
        let def = level_def(state.level).unwrap();
        prop_assert_eq!(state.active_cells.len(), def.active_count() as usize);
        prop_assert!(state.active_cells.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(state.active_cells.iter().all(|&c| c < def.grid_size()));
        prop_assert_eq!(
            state.ammo,
            def.ammo + state.inventory.hunter.perks.extra_ammo
        );
    }

    #[test]
    fn prop_hazards_never_stack(state in test_gens::fresh_round()) {
        let beaver = state.beaver_cell.unwrap();
        prop_assert!(state.is_active(beaver));
        if let Some(warden) = state.warden_cell {
            prop_assert_ne!(beaver, warden);
            prop_assert!(state.is_active(warden));
        }
    }

    #[test]
    fn prop_random_placement_is_safe(
        mut state in test_gens::fresh_round(),
        seed in any::<u64>(),
    ) {
        let mut rng = ChaChaRoundRng::from_seed(seed);
        let place = Action::PlaceDuck { cell: None };
        apply_action(&mut state, Side::Duck, &place, &mut rng).unwrap();
        let duck = state.duck_cell.unwrap();
        prop_assert!(!state.is_hazard(duck));
        prop_assert!(state.outcome.is_none());
    }
}
