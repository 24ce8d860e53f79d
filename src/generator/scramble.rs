use rand::Rng;

use crate::error::ScrambleError;

/// Pick `count` distinct indices in `0..upper`, in draw order.
///
/// Rejection sampling: a draw that was already taken is simply redrawn.
pub fn pick_distinct_indices<R: Rng + ?Sized>(
    rng: &mut R,
    upper: usize,
    count: usize,
) -> Result<Vec<usize>, ScrambleError> {
    if count > upper {
        return Err(ScrambleError::NotEnoughCandidates {
            requested: count,
            available: upper,
        });
    }

    let mut picked: Vec<usize> = Vec::with_capacity(count);
    while picked.len() < count {
        let candidate = rng.gen_range(0..upper);
        if !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }
    Ok(picked)
}

/// True when at least one ordering of the letters differs from `word`.
pub fn has_distinct_scramble(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => chars.any(|c| c != first),
        None => false,
    }
}

/// Shuffle the letters of `word` into an order different from `word` itself.
///
/// Words without such an order (one letter, or a single repeated letter) come
/// back unchanged.
pub fn scramble_word<R: Rng + ?Sized>(rng: &mut R, word: &str) -> String {
    if !has_distinct_scramble(word) {
        return word.to_string();
    }

    let letters: Vec<char> = word.chars().collect();
    loop {
        let order = match pick_distinct_indices(rng, letters.len(), letters.len()) {
            Ok(order) => order,
            Err(_) => return word.to_string(),
        };
        let scrambled: String = order.iter().map(|&i| letters[i]).collect();
        if scrambled != word {
            return scrambled;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn sorted(word: &str) -> Vec<char> {
        let mut chars: Vec<char> = word.chars().collect();
        chars.sort_unstable();
        chars
    }

    #[test]
    fn picks_requested_number_of_unique_indices() {
        let mut rng = SmallRng::seed_from_u64(7);
        let picked = pick_distinct_indices(&mut rng, 11, 6).unwrap();
        assert_eq!(picked.len(), 6);
        let mut unique = picked.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 6);
        assert!(picked.iter().all(|&i| i < 11));
    }

    #[test]
    fn full_draw_is_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut picked = pick_distinct_indices(&mut rng, 8, 8).unwrap();
        picked.sort_unstable();
        assert_eq!(picked, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn refuses_more_indices_than_candidates() {
        let mut rng = SmallRng::seed_from_u64(1);
        let err = pick_distinct_indices(&mut rng, 3, 4).unwrap_err();
        assert_eq!(
            err,
            ScrambleError::NotEnoughCandidates {
                requested: 4,
                available: 3
            }
        );
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(pick_distinct_indices(&mut rng, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn scramble_differs_and_keeps_letters() {
        let mut rng = SmallRng::seed_from_u64(42);
        for word in ["apple", "function", "task", "sun", "application", "ab", "aab"] {
            for _ in 0..50 {
                let scrambled = scramble_word(&mut rng, word);
                assert_ne!(scrambled, word);
                assert_eq!(sorted(&scrambled), sorted(word));
            }
        }
    }

    #[test]
    fn two_letter_word_is_swapped() {
        let mut rng = SmallRng::seed_from_u64(9);
        assert_eq!(scramble_word(&mut rng, "ab"), "ba");
    }

    #[test]
    fn degenerate_words_come_back_unchanged() {
        let mut rng = SmallRng::seed_from_u64(5);
        assert_eq!(scramble_word(&mut rng, ""), "");
        assert_eq!(scramble_word(&mut rng, "a"), "a");
        assert_eq!(scramble_word(&mut rng, "zzz"), "zzz");
    }

    #[test]
    fn distinct_scramble_detection() {
        assert!(!has_distinct_scramble(""));
        assert!(!has_distinct_scramble("q"));
        assert!(!has_distinct_scramble("oo"));
        assert!(has_distinct_scramble("no"));
    }
}
