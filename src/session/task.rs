use rand::Rng;

use crate::error::RestoreError;
use crate::generator::dictionary::validate_word;
use crate::generator::scramble::scramble_word;
use crate::session::snapshot::TaskSnapshot;

/// One word to rebuild from its scrambled letters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    word: String,
    randomized_word: String,
    word_progress: String,
    current_letter_index: usize,
    current_err_count: u32,
    max_error_count: u32,
}

impl Task {
    pub fn new<R: Rng + ?Sized>(word: &str, max_error_count: u32, rng: &mut R) -> Self {
        Self {
            word: word.to_string(),
            randomized_word: scramble_word(rng, word),
            word_progress: String::new(),
            current_letter_index: 0,
            current_err_count: 0,
            max_error_count,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// Letters still available to pick, in scramble order.
    pub fn randomized_word(&self) -> &str {
        &self.randomized_word
    }

    pub fn word_progress(&self) -> &str {
        &self.word_progress
    }

    pub fn current_letter_index(&self) -> usize {
        self.current_letter_index
    }

    pub fn current_err_count(&self) -> u32 {
        self.current_err_count
    }

    pub fn max_error_count(&self) -> u32 {
        self.max_error_count
    }

    /// The letter the task expects next, `None` once every letter is in place.
    pub fn current_letter_symbol(&self) -> Option<char> {
        self.word.chars().nth(self.current_letter_index)
    }

    pub fn is_error(&self) -> bool {
        self.current_err_count == self.max_error_count
    }

    // Keyed off the error count: a failed task has its progress filled with
    // the word too, but never counts as complete.
    pub fn is_complete(&self) -> bool {
        !self.is_error() && self.current_letter_index == self.word.chars().count()
    }

    pub fn is_finished(&self) -> bool {
        self.is_complete() || self.is_error()
    }

    /// Apply one picked letter. Returns whether it was the expected one.
    ///
    /// A finished task ignores input.
    pub fn handle_letter(&mut self, letter: char) -> bool {
        if self.is_finished() {
            return false;
        }
        if self.current_letter_symbol() == Some(letter) {
            self.increment_progress(letter);
            true
        } else {
            self.set_error();
            false
        }
    }

    fn increment_progress(&mut self, letter: char) {
        if let Some(pos) = self.randomized_word.find(letter) {
            self.randomized_word.remove(pos);
        }
        self.word_progress.push(letter);
        self.current_letter_index += 1;
    }

    fn set_error(&mut self) {
        self.current_err_count += 1;
        if self.is_error() {
            self.word_progress = self.word.clone();
        }
    }

    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            word: self.word.clone(),
            randomized_word: self.randomized_word.clone(),
            word_progress: self.word_progress.clone(),
            current_letter_index: self.current_letter_index,
            current_err_count: self.current_err_count,
            max_error_count: self.max_error_count,
        }
    }

    /// Rebuild a task exactly as persisted, keeping its scramble.
    ///
    /// `position` is the task's place in its training and only feeds error
    /// reports.
    pub fn restore(
        position: usize,
        snapshot: &TaskSnapshot,
        max_error_count: u32,
    ) -> Result<Self, RestoreError> {
        validate_word(&snapshot.word).map_err(|source| RestoreError::InvalidWord {
            task: position,
            source,
        })?;

        let len = snapshot.word.chars().count();
        if snapshot.current_letter_index > len {
            return Err(RestoreError::LetterIndexOutOfRange {
                task: position,
                index: snapshot.current_letter_index,
                len,
            });
        }
        if snapshot.current_err_count > max_error_count {
            return Err(RestoreError::ErrorCountExceedsBudget {
                task: position,
                count: snapshot.current_err_count,
                max: max_error_count,
            });
        }

        let typed: String = snapshot
            .word
            .chars()
            .take(snapshot.current_letter_index)
            .collect();
        let expected_progress = if snapshot.current_err_count == max_error_count {
            snapshot.word.as_str()
        } else {
            typed.as_str()
        };
        if snapshot.word_progress != expected_progress {
            return Err(RestoreError::ProgressMismatch { task: position });
        }

        let untyped = snapshot.word.chars().skip(snapshot.current_letter_index);
        if sorted_letters(snapshot.randomized_word.chars()) != sorted_letters(untyped) {
            return Err(RestoreError::ScrambleMismatch { task: position });
        }

        Ok(Self {
            word: snapshot.word.clone(),
            randomized_word: snapshot.randomized_word.clone(),
            word_progress: snapshot.word_progress.clone(),
            current_letter_index: snapshot.current_letter_index,
            current_err_count: snapshot.current_err_count,
            max_error_count,
        })
    }
}

fn sorted_letters(letters: impl Iterator<Item = char>) -> Vec<char> {
    let mut letters: Vec<char> = letters.collect();
    letters.sort_unstable();
    letters
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn task(word: &str, max_error_count: u32) -> Task {
        let mut rng = SmallRng::seed_from_u64(11);
        Task::new(word, max_error_count, &mut rng)
    }

    fn type_word(task: &mut Task, letters: &str) -> Vec<bool> {
        letters.chars().map(|c| task.handle_letter(c)).collect()
    }

    #[test]
    fn new_task_is_scrambled_and_untouched() {
        let task = task("apple", 3);
        assert_ne!(task.randomized_word(), "apple");
        assert_eq!(task.randomized_word().len(), 5);
        assert_eq!(task.word_progress(), "");
        assert_eq!(task.current_letter_symbol(), Some('a'));
        assert!(!task.is_complete());
        assert!(!task.is_error());
    }

    #[test]
    fn typing_whole_word_completes() {
        let mut task = task("task", 3);
        assert_eq!(type_word(&mut task, "task"), vec![true; 4]);
        assert!(task.is_complete());
        assert!(!task.is_error());
        assert_eq!(task.word_progress(), "task");
        assert_eq!(task.current_err_count(), 0);
        assert_eq!(task.randomized_word(), "");
        assert_eq!(task.current_letter_symbol(), None);
    }

    #[test]
    fn correct_prefix_moves_letters_out_of_scramble() {
        let mut task = task("function", 3);
        type_word(&mut task, "fun");
        assert_eq!(task.word_progress(), "fun");
        assert_eq!(task.current_letter_index(), 3);
        let mut remaining: Vec<char> = task.randomized_word().chars().collect();
        remaining.sort_unstable();
        assert_eq!(remaining, vec!['c', 'i', 'n', 'o', 't']);
    }

    #[test]
    fn repeated_letter_removes_only_one_occurrence() {
        let mut task = task("apple", 3);
        type_word(&mut task, "ap");
        assert_eq!(task.randomized_word().matches('p').count(), 1);
        assert_eq!(task.current_letter_symbol(), Some('p'));
    }

    #[test]
    fn three_wrong_letters_fail_the_task() {
        let mut task = task("sun", 3);
        assert_eq!(type_word(&mut task, "xyz"), vec![false; 3]);
        assert!(task.is_error());
        assert!(!task.is_complete());
        assert_eq!(task.word_progress(), "sun");
        assert_eq!(task.current_err_count(), 3);
    }

    #[test]
    fn failure_leaves_scramble_and_index_alone() {
        let mut task = task("symbol", 2);
        type_word(&mut task, "sy");
        let remaining = task.randomized_word().to_string();
        type_word(&mut task, "qq");
        assert!(task.is_error());
        assert_eq!(task.randomized_word(), remaining);
        assert_eq!(task.current_letter_index(), 2);
        assert_eq!(task.word_progress(), "symbol");
    }

    #[test]
    fn errors_count_regardless_of_interleaving() {
        let mut task = task("button", 3);
        type_word(&mut task, "bxuytz");
        assert!(task.is_error());
        assert_eq!(task.current_err_count(), 3);
        assert_eq!(task.current_letter_index(), 3);
    }

    #[test]
    fn below_budget_is_recoverable() {
        let mut task = task("data", 3);
        type_word(&mut task, "dxqata");
        assert!(task.is_complete());
        assert_eq!(task.current_err_count(), 2);
    }

    #[test]
    fn finished_task_ignores_input() {
        let mut failed = task("sun", 3);
        type_word(&mut failed, "xyz");
        let frozen = failed.clone();
        assert!(!failed.handle_letter('s'));
        assert!(!failed.handle_letter('q'));
        assert_eq!(failed, frozen);
        assert!(!failed.is_complete());

        let mut done = task("sun", 3);
        type_word(&mut done, "sun");
        assert!(!done.handle_letter('x'));
        assert_eq!(done.current_err_count(), 0);
        assert!(done.is_complete());
    }

    #[test]
    fn snapshot_restores_identically() {
        let mut original = task("tragedy", 3);
        type_word(&mut original, "trx");
        let restored = Task::restore(0, &original.snapshot(), 3).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn restore_keeps_persisted_scramble() {
        let snapshot = TaskSnapshot {
            word: "apple".into(),
            randomized_word: "elppa".into(),
            word_progress: String::new(),
            current_letter_index: 0,
            current_err_count: 0,
            max_error_count: 3,
        };
        let task = Task::restore(0, &snapshot, 3).unwrap();
        assert_eq!(task.randomized_word(), "elppa");
    }

    #[test]
    fn restore_uses_training_budget() {
        let mut snapshot = task("sun", 3).snapshot();
        snapshot.max_error_count = 9;
        let task = Task::restore(0, &snapshot, 4).unwrap();
        assert_eq!(task.max_error_count(), 4);
    }

    #[test]
    fn restore_rejects_inconsistent_fields() {
        let good = TaskSnapshot {
            word: "sun".into(),
            randomized_word: "nu".into(),
            word_progress: "s".into(),
            current_letter_index: 1,
            current_err_count: 1,
            max_error_count: 3,
        };
        assert!(Task::restore(0, &good, 3).is_ok());

        let mut bad = good.clone();
        bad.current_letter_index = 4;
        assert!(matches!(
            Task::restore(2, &bad, 3),
            Err(RestoreError::LetterIndexOutOfRange { task: 2, .. })
        ));

        let mut bad = good.clone();
        bad.current_err_count = 4;
        assert!(matches!(
            Task::restore(0, &bad, 3),
            Err(RestoreError::ErrorCountExceedsBudget { .. })
        ));

        let mut bad = good.clone();
        bad.word_progress = "u".into();
        assert_eq!(
            Task::restore(0, &bad, 3),
            Err(RestoreError::ProgressMismatch { task: 0 })
        );

        let mut bad = good.clone();
        bad.randomized_word = "nx".into();
        assert_eq!(
            Task::restore(0, &bad, 3),
            Err(RestoreError::ScrambleMismatch { task: 0 })
        );

        let mut bad = good;
        bad.word = "x".into();
        assert!(matches!(
            Task::restore(0, &bad, 3),
            Err(RestoreError::InvalidWord { .. })
        ));
    }

    #[test]
    fn restore_accepts_failed_task_with_filled_progress() {
        let snapshot = TaskSnapshot {
            word: "sun".into(),
            randomized_word: "nus".into(),
            word_progress: "sun".into(),
            current_letter_index: 0,
            current_err_count: 3,
            max_error_count: 3,
        };
        let task = Task::restore(0, &snapshot, 3).unwrap();
        assert!(task.is_error());
        assert!(!task.is_complete());
    }
}
