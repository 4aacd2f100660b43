use crate::{
    Evaluator, GameState, RngState, SearchConfig, SearchError, SearchStats, Tree, ROOT,
};
use std::time::Instant;

/// One search invocation's engine: owns the seeded random source and drives
/// determinize/select/expand/simulate/backpropagate cycles over a [`Tree`].
pub struct Searcher<'a, E> {
    config: SearchConfig,
    evaluator: &'a E,
    rng: RngState,
}

impl<'a, E> Searcher<'a, E> {
    pub fn new(evaluator: &'a E, config: SearchConfig) -> Self {
        let rng = RngState::from_seed(config.seed);
        Self {
            config,
            evaluator,
            rng,
        }
    }

    /// Recommends a move for the player to act at `root`: the most-visited
    /// root child after `iterations` simulations. A root with exactly one
    /// legal move is returned immediately without simulating.
    pub fn search<G>(&mut self, root: &G, iterations: u32) -> Result<G::Move, SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        self.search_with_stats(root, iterations).map(|(mv, _)| mv)
    }

    pub fn search_with_stats<G>(
        &mut self,
        root: &G,
        iterations: u32,
    ) -> Result<(G::Move, SearchStats), SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        let started_at = Instant::now();
        let legal = root.legal_moves();
        let fallback = legal.first().cloned();
        let tree = self.run_from(root, legal, iterations)?;
        let selected = match tree.best_move(ROOT).cloned().or(fallback) {
            Some(mv) => mv,
            None => return Err(SearchError::NoLegalMoves),
        };
        let (selected_visits, selected_mean) = tree
            .children(ROOT)
            .find(|node| node.mv.as_ref() == Some(&selected))
            .map(|node| (node.visits, node.mean()))
            .unwrap_or((0, 0.0));
        let stats = SearchStats {
            simulations: tree.node(ROOT).visits,
            elapsed_ms: started_at.elapsed().as_millis() as u64,
            root_children: tree.node(ROOT).children.len(),
            selected_visits,
            selected_mean,
        };
        Ok((selected, stats))
    }

    /// Runs the full search and hands back the raw tree statistics.
    pub fn run<G>(&mut self, root: &G, iterations: u32) -> Result<Tree<G::Move>, SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        let legal = root.legal_moves();
        self.run_from(root, legal, iterations)
    }

    fn run_from<G>(
        &mut self,
        root: &G,
        legal: Vec<G::Move>,
        iterations: u32,
    ) -> Result<Tree<G::Move>, SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        if legal.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let root_player = root.player_to_move();
        let mut tree = Tree::new(root_player);
        if let [only] = legal.as_slice() {
            // A forced move needs no search, and the determinization
            // contract assumes a real choice exists.
            tree.add_child(ROOT, only.clone(), root_player);
            return Ok(tree);
        }

        let started_at = Instant::now();
        for iteration in 0..iterations {
            if self.config.max_time_ms > 0
                && iteration >= self.config.min_iterations
                && started_at.elapsed().as_millis() as u64 >= self.config.max_time_ms
            {
                break;
            }
            self.simulate(root, &mut tree)?;
        }
        Ok(tree)
    }

    /// One determinize/select/expand/rollout/backpropagate cycle.
    fn simulate<G>(&mut self, root: &G, tree: &mut Tree<G::Move>) -> Result<(), SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        let mut state = root.clone();
        let observer = state.player_to_move();
        self.evaluator.determinize(&mut state, observer, &mut self.rng);

        let mut node = ROOT;
        loop {
            let legal = state.legal_moves();
            if legal.is_empty() {
                break;
            }
            let untried = tree.untried_moves(node, &legal);
            if !untried.is_empty() {
                let mv = untried[self.rng.pick_index(untried.len())].clone();
                let actor = state.player_to_move();
                state.apply_move(&mv);
                node = tree.add_child(node, mv, actor);
                break;
            }
            // Fully expanded under this determinization: descend by UCB.
            let Some(child) = tree.select_ucb_child(node, &legal, self.config.exploration_c)
            else {
                return Err(SearchError::ContractViolation(
                    "determinization produced legal moves matching no child".to_string(),
                ));
            };
            let Some(mv) = tree.node(child).mv.clone() else {
                return Err(SearchError::ContractViolation(
                    "selected child carries no move".to_string(),
                ));
            };
            state.apply_move(&mv);
            node = child;
        }

        self.rollout(&mut state);
        let scores = self.terminal_scores(&state)?;
        tree.backpropagate(node, &scores);
        Ok(())
    }

    /// Expected score of playing `mv` at `root` for the acting player,
    /// averaged over `iterations` determinized random rollouts. No tree is
    /// built; this measures one candidate in isolation.
    pub fn simulate_once<G>(
        &mut self,
        root: &G,
        mv: &G::Move,
        iterations: u32,
    ) -> Result<f64, SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        if root.legal_moves().is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let actor = root.player_to_move();
        let rounds = iterations.max(1);
        let mut total = 0.0;
        for _ in 0..rounds {
            let mut state = root.clone();
            self.evaluator.determinize(&mut state, actor, &mut self.rng);
            state.apply_move(mv);
            self.rollout(&mut state);
            let scores = self.terminal_scores(&state)?;
            total += scores[actor];
        }
        Ok(total / rounds as f64)
    }

    fn rollout<G: GameState>(&mut self, state: &mut G) {
        loop {
            let legal = state.legal_moves();
            if legal.is_empty() {
                break;
            }
            let mv = legal[self.rng.pick_index(legal.len())].clone();
            state.apply_move(&mv);
        }
    }

    fn terminal_scores<G>(&self, state: &G) -> Result<Vec<f64>, SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        let mut scores = Vec::with_capacity(state.player_count());
        for player in 0..state.player_count() {
            let score = self.evaluator.result(state, player);
            if !score.is_finite() || !(0.0..=1.0).contains(&score) {
                return Err(SearchError::ContractViolation(format!(
                    "score {score} for player {player} outside [0, 1]"
                )));
            }
            scores.push(score);
        }
        Ok(scores)
    }
}
