//! Random playouts used to score newly reached leaves.

use engine_core::{GameState, Outcome};
use rand::Rng;

/// Play uniformly random successors from `state` until the game ends.
///
/// The playout stops at the first win or draw. A non-terminal state with no
/// successors is scored as a draw. The starting state is cloned, never
/// mutated.
pub fn random_playout<S, R>(state: &S, rng: &mut R) -> Outcome
where
    S: GameState,
    R: Rng + ?Sized,
{
    let mut current = state.clone();
    loop {
        if let Some(outcome) = current.outcome() {
            return outcome;
        }

        let mut successors = current.generate_states();
        if successors.is_empty() {
            return Outcome::Draw;
        }
        let index = rng.gen_range(0..successors.len());
        current = successors.swap_remove(index);
    }
}
