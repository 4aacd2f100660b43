use crate::RngState;
use std::fmt::Debug;

/// One game's full state, as consumed by the search engine.
///
/// `clone` must yield a fully independent deep copy: the engine mutates
/// clones freely during simulation and none of that may leak back into the
/// root. `legal_moves` is pure — two calls without an intervening
/// `apply_move` return the same set. Move equality is structural; the tree
/// matches children to moves with `==`, never by identity.
pub trait GameState: Clone {
    type Move: Clone + PartialEq + Debug;

    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Applies a move returned by `legal_moves` on this exact state.
    fn apply_move(&mut self, mv: &Self::Move);

    fn player_to_move(&self) -> usize;

    fn player_count(&self) -> usize;

    fn is_terminal(&self) -> bool {
        self.legal_moves().is_empty()
    }
}

/// Game-specific scoring and hidden-information policy.
pub trait Evaluator<G: GameState> {
    /// Replaces hidden information in `state` with one concrete resolution
    /// consistent with everything `observer` legitimately knows, and
    /// suppresses any determinization-dependent behavior of the other
    /// simulated players for the rest of the rollout.
    fn determinize(&self, state: &mut G, observer: usize, rng: &mut RngState);

    /// Terminal score for `player`, normalized to [0, 1], larger is better.
    /// Called once per player when a rollout reaches a terminal state.
    fn result(&self, state: &G, player: usize) -> f64;
}
