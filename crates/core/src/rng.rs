//! RNG module - fair pair generation
//!
//! Colors are drawn from a "bag": every playable color repeated [`BAG_COPIES`] times and
//! shuffled. The bag is rebuilt when it runs dry, so over a long game every color appears
//! with near-equal frequency. Same-color pairs are discouraged on a best-effort basis only.
//!
//! The opening two pairs draw from just three of the palette's colors.
//!
//! Also provides a simple LCG for deterministic testing.

use std::collections::VecDeque;

use crate::types::{Color, PiecePair, BAG_COPIES, EMPTY};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() >> 16) as u64 * max as u64 >> 16) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state, usable as a seed to continue the stream
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Bag-based generator of color pairs
#[derive(Debug, Clone)]
pub struct PieceSequencer {
    /// Playable colors (never contains [`EMPTY`])
    colors: Vec<Color>,
    /// Remaining colors; draws pop from the back
    bag: Vec<Color>,
    rng: SimpleRng,
}

impl PieceSequencer {
    pub fn new(colors: Vec<Color>, seed: u32) -> Self {
        Self {
            bag: Vec::with_capacity(colors.len() * BAG_COPIES + 2),
            colors,
            rng: SimpleRng::new(seed),
        }
    }

    /// Rebuild and shuffle the bag
    fn refill_bag(&mut self) {
        self.bag.clear();
        for &color in &self.colors {
            self.bag
                .extend(std::iter::repeat(color).take(BAG_COPIES));
        }
        self.rng.shuffle(&mut self.bag);
    }

    /// Pop one color, rebuilding the bag first if it is empty
    fn draw(&mut self) -> Color {
        if self.bag.is_empty() {
            self.refill_bag();
        }
        self.bag.pop().unwrap_or(EMPTY)
    }

    /// Draw the next pair.
    ///
    /// When both draws match, one more attempt is made to pair the axis color with a
    /// different one. This can still yield a same-color pair.
    pub fn next(&mut self) -> PiecePair {
        let mut color1 = self.draw();
        let mut color2 = self.draw();

        if color1 == color2 {
            if self.bag.len() < 2 {
                // Too few left to swap with: put both back and redraw.
                self.bag.push(color1);
                self.bag.push(color2);
                self.rng.shuffle(&mut self.bag);
                color1 = self.draw();
                color2 = self.draw();
            } else {
                let spare = self.draw();
                if spare != color2 {
                    self.bag.push(color2);
                    self.rng.shuffle(&mut self.bag);
                    color2 = spare;
                } else {
                    self.bag.push(spare);
                    self.rng.shuffle(&mut self.bag);
                    color2 = self.draw();
                }
            }
        }

        PiecePair::new(color1, color2)
    }

    /// The two opening pairs, drawn only from three randomly chosen colors
    pub fn first_two(&mut self) -> [PiecePair; 2] {
        let mut three = self.colors.clone();
        self.rng.shuffle(&mut three);
        three.truncate(3);

        let mut pick = |rng: &mut SimpleRng| {
            rng.shuffle(&mut three);
            three.first().copied().unwrap_or(EMPTY)
        };
        let first = PiecePair::new(pick(&mut self.rng), pick(&mut self.rng));
        let second = PiecePair::new(pick(&mut self.rng), pick(&mut self.rng));
        [first, second]
    }

    /// Playable colors this sequencer draws from
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Colors left before the bag is rebuilt
    pub fn bag_len(&self) -> usize {
        self.bag.len()
    }

    /// Current RNG state (for restarting with a continued sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

/// Upcoming pairs: the pair about to spawn followed by the visible "next" pairs
#[derive(Debug, Clone)]
pub struct PieceQueue {
    pending: VecDeque<PiecePair>,
    /// Number of pairs shown to the player
    depth: usize,
    sequencer: PieceSequencer,
}

impl PieceQueue {
    /// Create a queue holding `depth + 1` pairs, the first two being opening pairs
    pub fn new(colors: Vec<Color>, depth: usize, seed: u32) -> Self {
        let mut queue = Self {
            pending: VecDeque::with_capacity(depth + 1),
            depth,
            sequencer: PieceSequencer::new(colors, seed),
        };
        queue.reset();
        queue
    }

    /// Regenerate the queue for a new game; the RNG stream continues
    pub fn reset(&mut self) {
        self.pending.clear();
        self.pending.extend(self.sequencer.first_two());
        self.refill();
    }

    /// Top the queue back up to `depth + 1` pairs
    pub fn refill(&mut self) {
        while self.pending.len() < self.depth + 1 {
            let pair = self.sequencer.next();
            self.pending.push_back(pair);
        }
    }

    /// Take the front pair
    pub fn pop(&mut self) -> PiecePair {
        match self.pending.pop_front() {
            Some(pair) => pair,
            None => self.sequencer.next(),
        }
    }

    /// Peek at the front pair without removing it
    pub fn peek(&self) -> Option<PiecePair> {
        self.pending.front().copied()
    }

    /// The pairs shown to the player
    pub fn visible(&self) -> impl Iterator<Item = PiecePair> + '_ {
        self.pending.iter().copied().take(self.depth)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn sequencer(&self) -> &PieceSequencer {
        &self.sequencer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..50 {
            for _ in 0..20 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SimpleRng::new(99);
        let mut values: Vec<u32> = (0..32).collect();
        rng.shuffle(&mut values);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn test_bag_holds_each_color_sixty_four_times() {
        let mut seq = PieceSequencer::new(vec![1, 2, 3, 4], 1);
        seq.refill_bag();
        assert_eq!(seq.bag_len(), 4 * BAG_COPIES);
        for color in 1..=4u8 {
            let n = seq.bag.iter().filter(|&&c| c == color).count();
            assert_eq!(n, BAG_COPIES);
        }
    }

    #[test]
    fn test_draw_refills_empty_bag() {
        let mut seq = PieceSequencer::new(vec![1, 2, 3], 5);
        assert_eq!(seq.bag_len(), 0);
        let pair = seq.next();
        assert!(seq.colors().contains(&pair.color1));
        assert!(seq.colors().contains(&pair.color2));
        assert!(seq.bag_len() > 0);
    }

    #[test]
    fn test_single_color_palette_always_doubles() {
        // De-duplication is best effort: with one color it must give up gracefully.
        let mut seq = PieceSequencer::new(vec![3], 11);
        for _ in 0..200 {
            assert_eq!(seq.next(), PiecePair::new(3, 3));
        }
    }

    #[test]
    fn test_first_two_use_at_most_three_colors() {
        for seed in 1..50 {
            let mut seq = PieceSequencer::new(vec![1, 2, 3, 4, 5], seed);
            let pairs = seq.first_two();
            let mut used: Vec<Color> = pairs
                .iter()
                .flat_map(|p| [p.color1, p.color2])
                .collect();
            used.sort_unstable();
            used.dedup();
            assert!(used.len() <= 3, "seed {seed} used {used:?}");
        }
    }

    #[test]
    fn test_queue_length_and_visible() {
        let mut queue = PieceQueue::new(vec![1, 2, 3, 4], 2, 42);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.visible().count(), 2);

        let front = queue.peek();
        assert_eq!(Some(queue.pop()), front);
        assert_eq!(queue.len(), 2);
        queue.refill();
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_queue_depth_one_keeps_opening_pairs() {
        let queue = PieceQueue::new(vec![1, 2, 3, 4], 1, 3);
        assert_eq!(queue.len(), 2);
    }
}
