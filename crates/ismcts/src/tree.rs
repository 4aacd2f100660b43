use std::fmt::Debug;

pub const ROOT: usize = 0;

#[derive(Debug, Clone)]
pub struct Node<M> {
    pub parent: Option<usize>,
    pub mv: Option<M>,
    /// Position of the player whose move led into this node; `wins` below
    /// accumulates that player's scores.
    pub acting_player: usize,
    pub children: Vec<usize>,
    pub visits: u32,
    pub wins: f64,
    /// Times this node's move was legal while its parent ran UCB selection.
    pub avails: u32,
}

impl<M> Node<M> {
    fn new_root(acting_player: usize) -> Self {
        Self {
            parent: None,
            mv: None,
            acting_player,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
            avails: 0,
        }
    }

    fn new_child(parent: usize, mv: M, acting_player: usize) -> Self {
        Self {
            parent: Some(parent),
            mv: Some(mv),
            acting_player,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
            avails: 0,
        }
    }

    pub fn mean(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }
}

/// Search tree for one engine invocation, stored as an index arena: node 0
/// is the root, parents and children are plain indices, nothing is ever
/// removed within a run.
#[derive(Debug, Clone)]
pub struct Tree<M> {
    nodes: Vec<Node<M>>,
}

impl<M: Clone + PartialEq + Debug> Tree<M> {
    pub fn new(root_player: usize) -> Self {
        Self {
            nodes: vec![Node::new_root(root_player)],
        }
    }

    pub fn node(&self, index: usize) -> &Node<M> {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Moves in `legal` for which `node` has no child yet.
    pub fn untried_moves(&self, node: usize, legal: &[M]) -> Vec<M> {
        legal
            .iter()
            .filter(|mv| {
                !self.nodes[node]
                    .children
                    .iter()
                    .any(|&child| self.nodes[child].mv.as_ref() == Some(mv))
            })
            .cloned()
            .collect()
    }

    /// Among children whose move is currently legal, bumps every candidate's
    /// `avails` and returns the UCB maximizer (first encountered wins ties).
    /// `None` means no child is legal under this determinization.
    pub fn select_ucb_child(&mut self, node: usize, legal: &[M], exploration_c: f64) -> Option<usize> {
        let candidates: Vec<usize> = self.nodes[node]
            .children
            .iter()
            .copied()
            .filter(|&child| {
                self.nodes[child]
                    .mv
                    .as_ref()
                    .is_some_and(|mv| legal.contains(mv))
            })
            .collect();
        for &child in &candidates {
            self.nodes[child].avails += 1;
        }
        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;
        for child in candidates {
            let score = self.ucb_score(child, exploration_c);
            if score > best_score {
                best_score = score;
                best = Some(child);
            }
        }
        best
    }

    fn ucb_score(&self, child: usize, exploration_c: f64) -> f64 {
        let node = &self.nodes[child];
        // Children are visited by the simulation that creates them, so
        // visits is never 0 once a node is a selection candidate.
        let visits = node.visits as f64;
        let exploit = node.wins / visits;
        let explore = exploration_c * ((node.avails as f64).ln() / visits).sqrt();
        exploit + explore
    }

    /// Attaches a new child; the caller is responsible for having checked
    /// `untried_moves` first, duplicates are not detected here.
    pub fn add_child(&mut self, node: usize, mv: M, acting_player: usize) -> usize {
        let child = self.nodes.len();
        self.nodes.push(Node::new_child(node, mv, acting_player));
        self.nodes[node].children.push(child);
        child
    }

    /// Adds one visit and each node's acting player's score to `node` and
    /// every ancestor up to and including the root.
    pub fn backpropagate(&mut self, node: usize, per_player_scores: &[f64]) {
        let mut walk = Some(node);
        while let Some(index) = walk {
            let node = &mut self.nodes[index];
            node.visits = node.visits.saturating_add(1);
            node.wins += per_player_scores[node.acting_player];
            walk = node.parent;
        }
    }

    /// Move of the most-visited child of `node` (first encountered on ties);
    /// the robust final-recommendation criterion.
    pub fn best_move(&self, node: usize) -> Option<&M> {
        let mut best: Option<&Node<M>> = None;
        for &child in &self.nodes[node].children {
            let candidate = &self.nodes[child];
            if best.map_or(true, |current| candidate.visits > current.visits) {
                best = Some(candidate);
            }
        }
        best.and_then(|node| node.mv.as_ref())
    }

    pub fn children(&self, node: usize) -> impl Iterator<Item = &Node<M>> {
        self.nodes[node].children.iter().map(|&child| &self.nodes[child])
    }
}
