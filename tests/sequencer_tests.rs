//! Sequencer tests - bag fairness, opening pairs and the upcoming queue

use tui_puyo::core::{PieceQueue, PieceSequencer};
use tui_puyo::types::BAG_COPIES;

#[test]
fn test_color_frequency_is_near_uniform() {
    let colors = vec![1u8, 2, 3, 4];
    let mut seq = PieceSequencer::new(colors.clone(), 2024);
    let mut counts = [0usize; 5];
    let pairs = 20_000;

    for _ in 0..pairs {
        let pair = seq.next();
        counts[pair.color1 as usize] += 1;
        counts[pair.color2 as usize] += 1;
    }

    let expected = (pairs * 2 / colors.len()) as f64;
    for &color in &colors {
        let n = counts[color as usize] as f64;
        assert!(
            (n - expected).abs() < expected * 0.05,
            "color {color} drawn {n} times, expected about {expected}"
        );
    }
    assert_eq!(counts[0], 0);
}

#[test]
fn test_bag_never_exceeds_one_fill() {
    let mut seq = PieceSequencer::new(vec![1, 2, 3], 9);
    for _ in 0..2_000 {
        seq.next();
        assert!(seq.bag_len() <= 3 * BAG_COPIES);
    }
}

#[test]
fn test_dedup_is_best_effort() {
    // Doubles become rarer than the 1-in-4 of independent draws but still happen.
    let mut seq = PieceSequencer::new(vec![1, 2, 3, 4], 77);
    let doubles = (0..20_000).filter(|_| seq.next().is_double()).count();
    assert!(doubles > 0);
    assert!(doubles < 20_000 / 5, "{doubles} doubles");
}

#[test]
fn test_same_seed_same_sequence() {
    let mut a = PieceSequencer::new(vec![1, 2, 3, 4, 5], 31);
    let mut b = PieceSequencer::new(vec![1, 2, 3, 4, 5], 31);
    assert_eq!(a.first_two(), b.first_two());
    for _ in 0..500 {
        assert_eq!(a.next(), b.next());
    }
}

#[test]
fn test_queue_pop_and_refill() {
    let mut queue = PieceQueue::new(vec![1, 2, 3, 4], 2, 5);
    let upcoming: Vec<_> = queue.visible().collect();
    assert_eq!(upcoming.len(), 2);

    let first = queue.pop();
    assert_eq!(Some(first), upcoming.first().copied());
    queue.refill();
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.peek(), upcoming.get(1).copied());
}
