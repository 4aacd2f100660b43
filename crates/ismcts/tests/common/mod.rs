use std::sync::atomic::{AtomicU32, Ordering};
use trickmind_assign::{solve, Cost, CostMatrix, FORBIDDEN};
use trickmind_ismcts::{Evaluator, GameState, RngState};

/// Single-player, single-decision game: pick one of `width` slots, then the
/// game ends. Only `winning` scores.
#[derive(Debug, Clone)]
pub struct PickGame {
    pub width: u8,
    pub winning: u8,
    pub picked: Option<u8>,
}

impl PickGame {
    pub fn new(width: u8, winning: u8) -> Self {
        Self {
            width,
            winning,
            picked: None,
        }
    }
}

impl GameState for PickGame {
    type Move = u8;

    fn legal_moves(&self) -> Vec<u8> {
        if self.picked.is_some() {
            Vec::new()
        } else {
            (0..self.width).collect()
        }
    }

    fn apply_move(&mut self, mv: &u8) {
        self.picked = Some(*mv);
    }

    fn player_to_move(&self) -> usize {
        0
    }

    fn player_count(&self) -> usize {
        1
    }
}

#[derive(Debug, Default)]
pub struct PickEval {
    pub determinize_calls: AtomicU32,
}

impl Evaluator<PickGame> for PickEval {
    fn determinize(&self, _state: &mut PickGame, _observer: usize, _rng: &mut RngState) {
        self.determinize_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn result(&self, state: &PickGame, _player: usize) -> f64 {
        if state.picked == Some(state.winning) {
            1.0
        } else {
            0.0
        }
    }
}

/// Evaluator that breaks the [0, 1] score contract on purpose.
#[derive(Debug, Default)]
pub struct BadScoreEval;

impl Evaluator<PickGame> for BadScoreEval {
    fn determinize(&self, _state: &mut PickGame, _observer: usize, _rng: &mut RngState) {}

    fn result(&self, _state: &PickGame, _player: usize) -> f64 {
        1.5
    }
}

/// Two players alternate leading one card; the higher card takes the trick
/// and leads next. Each player sees only their own hand: the opponent's hand
/// and the face-down `aside` pile are hidden, so determinization must
/// resample them. Cards are plain values; suit is `card % 4`.
#[derive(Debug, Clone)]
pub struct HiddenTrickGame {
    pub hands: [Vec<u8>; 2],
    pub aside: Vec<u8>,
    pub lead: Option<(usize, u8)>,
    pub tricks: [u32; 2],
    pub total_tricks: u32,
    pub to_move: usize,
}

impl HiddenTrickGame {
    pub fn deal(hand_a: Vec<u8>, hand_b: Vec<u8>, aside: Vec<u8>) -> Self {
        let total_tricks = hand_a.len() as u32;
        assert_eq!(hand_a.len(), hand_b.len());
        Self {
            hands: [hand_a, hand_b],
            aside,
            lead: None,
            tricks: [0, 0],
            total_tricks,
            to_move: 0,
        }
    }

    pub fn suit(card: u8) -> u8 {
        card % 4
    }

    fn remove_card(hand: &mut Vec<u8>, card: u8) {
        if let Some(position) = hand.iter().position(|&held| held == card) {
            hand.remove(position);
        }
    }
}

impl GameState for HiddenTrickGame {
    type Move = u8;

    fn legal_moves(&self) -> Vec<u8> {
        self.hands[self.to_move].clone()
    }

    fn apply_move(&mut self, mv: &u8) {
        Self::remove_card(&mut self.hands[self.to_move], *mv);
        match self.lead.take() {
            None => {
                self.lead = Some((self.to_move, *mv));
                self.to_move = 1 - self.to_move;
            }
            Some((leader, led)) => {
                let winner = if *mv > led { self.to_move } else { leader };
                self.tricks[winner] += 1;
                self.to_move = winner;
            }
        }
    }

    fn player_to_move(&self) -> usize {
        self.to_move
    }

    fn player_count(&self) -> usize {
        2
    }
}

/// Baseline determinization: shuffle the opponent's hand together with the
/// aside pile and deal the opponent a fresh hand of the same size.
#[derive(Debug, Default)]
pub struct ShuffleDeal;

impl ShuffleDeal {
    pub fn hidden_pool(state: &HiddenTrickGame, observer: usize) -> Vec<u8> {
        let mut pool = state.hands[1 - observer].clone();
        pool.extend_from_slice(&state.aside);
        pool
    }
}

impl Evaluator<HiddenTrickGame> for ShuffleDeal {
    fn determinize(&self, state: &mut HiddenTrickGame, observer: usize, rng: &mut RngState) {
        let opponent = 1 - observer;
        let hand_size = state.hands[opponent].len();
        let mut pool = Self::hidden_pool(state, observer);
        rng.shuffle(&mut pool);
        state.aside = pool.split_off(hand_size);
        state.hands[opponent] = pool;
    }

    fn result(&self, state: &HiddenTrickGame, player: usize) -> f64 {
        if state.total_tricks == 0 {
            return 0.5;
        }
        state.tricks[player] as f64 / state.total_tricks as f64
    }
}

/// Determinization backed by the assignment solver: unseen cards are paired
/// with hidden slots (opponent hand, then aside) through a minimum-cost
/// matching in which slots the opponent is known to be void of are
/// `FORBIDDEN`. Randomized costs keep successive resolutions varied.
#[derive(Debug)]
pub struct ConstrainedDeal {
    pub void_suit: u8,
}

impl Evaluator<HiddenTrickGame> for ConstrainedDeal {
    fn determinize(&self, state: &mut HiddenTrickGame, observer: usize, rng: &mut RngState) {
        let opponent = 1 - observer;
        let hand_size = state.hands[opponent].len();
        let pool = ShuffleDeal::hidden_pool(state, observer);
        let matrix = CostMatrix::from_fn(pool.len(), |row, col| {
            let in_opponent_hand = col < hand_size;
            if in_opponent_hand && HiddenTrickGame::suit(pool[row]) == self.void_suit {
                FORBIDDEN
            } else {
                rng.next_u64() % 1000 as Cost
            }
        });
        let assignment = match solve(&matrix) {
            Ok(assignment) => assignment,
            // Constraints made the deal infeasible; keep the actual hands.
            Err(_) => return,
        };
        let mut opponent_hand = vec![0u8; hand_size];
        let mut aside = vec![0u8; pool.len() - hand_size];
        for (row, &card) in pool.iter().enumerate() {
            let col = assignment.col_for_row(row);
            if col < hand_size {
                opponent_hand[col] = card;
            } else {
                aside[col - hand_size] = card;
            }
        }
        state.hands[opponent] = opponent_hand;
        state.aside = aside;
    }

    fn result(&self, state: &HiddenTrickGame, player: usize) -> f64 {
        ShuffleDeal.result(state, player)
    }
}
