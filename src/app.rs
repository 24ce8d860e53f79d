use std::time::{Duration, Instant};

use anyhow::Result;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::generator::dictionary::Dictionary;
use crate::session::result::InputResult;
use crate::session::snapshot::TrainingSnapshot;
use crate::session::task::Task;
use crate::session::training::Training;
use crate::store::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    RestorePrompt,
    Training,
    Summary,
}

pub struct App {
    pub screen: AppScreen,
    pub training: Training,
    pub config: Config,
    pub last_result: Option<InputResult>,
    /// Earlier task being looked at instead of the live one.
    pub viewed_task: Option<usize>,
    /// Highlighted tile in the remaining-letters row.
    pub letter_cursor: usize,
    pub pending_until: Option<Instant>,
    pub should_quit: bool,
    dictionary: Dictionary,
    store: Box<dyn SessionStore>,
    saved_snapshot: Option<TrainingSnapshot>,
    rng: SmallRng,
}

impl App {
    /// Build the app around a fresh training. A session left in `store` is
    /// offered for resuming unless `fresh` is set, in which case it is dropped.
    pub fn new(
        config: Config,
        dictionary: Dictionary,
        store: Box<dyn SessionStore>,
        mut rng: SmallRng,
        fresh: bool,
    ) -> Result<Self> {
        let training = Training::generate(&dictionary, config.training_settings(), &mut rng)?;

        let saved_snapshot = if fresh {
            if let Err(e) = store.clear() {
                tracing::warn!("cannot discard saved session: {e:#}");
            }
            None
        } else {
            store.load()
        };
        let screen = if saved_snapshot.is_some() {
            AppScreen::RestorePrompt
        } else {
            AppScreen::Training
        };

        tracing::info!(
            tasks = config.max_task_count,
            errors = config.max_err_count,
            saved_session = saved_snapshot.is_some(),
            "app started"
        );

        Ok(Self {
            screen,
            training,
            config,
            last_result: None,
            viewed_task: None,
            letter_cursor: 0,
            pending_until: None,
            should_quit: false,
            dictionary,
            store,
            saved_snapshot,
            rng,
        })
    }

    /// Progress recorded in the saved session offered for resuming.
    pub fn saved_progress(&self) -> Option<(usize, usize)> {
        self.saved_snapshot
            .as_ref()
            .map(|s| (s.current_task_index, s.max_task_count))
    }

    pub fn accept_restore(&mut self) {
        let Some(snapshot) = self.saved_snapshot.take() else {
            self.screen = AppScreen::Training;
            return;
        };
        match Training::restore(&snapshot) {
            Ok(training) => {
                tracing::info!(
                    task = training.current_task_index(),
                    of = training.max_task_count(),
                    "resumed saved session"
                );
                self.training = training;
                self.screen = if self.training.is_complete() {
                    AppScreen::Summary
                } else {
                    AppScreen::Training
                };
            }
            Err(e) => {
                tracing::warn!("saved session rejected: {e}");
                self.discard_saved();
                self.screen = AppScreen::Training;
            }
        }
        self.reset_view();
    }

    pub fn decline_restore(&mut self) {
        tracing::info!("saved session declined");
        self.saved_snapshot = None;
        self.discard_saved();
        self.screen = AppScreen::Training;
    }

    pub fn new_training(&mut self) -> Result<()> {
        self.training =
            Training::generate(&self.dictionary, self.config.training_settings(), &mut self.rng)?;
        self.last_result = None;
        self.reset_view();
        self.screen = AppScreen::Training;
        tracing::info!("new training started");
        Ok(())
    }

    pub fn is_pending(&self) -> bool {
        self.pending_until.is_some()
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if self.pending_until.is_some_and(|until| now >= until) {
            self.pending_until = None;
        }
    }

    /// Feed a letter to the live task. Ignored outside the training screen
    /// and while the pause after a finished task runs.
    pub fn type_letter(&mut self, ch: char) -> Option<InputResult> {
        if self.screen != AppScreen::Training || self.is_pending() {
            return None;
        }
        let letter = ch.to_ascii_lowercase();
        if !letter.is_ascii_lowercase() {
            return None;
        }

        self.viewed_task = None;
        let result = self.training.handle_input(letter)?;
        self.last_result = Some(result);

        if result.training_complete {
            tracing::info!(
                errors = self.training.error_count(),
                clean = self.training.tasks_without_errors(),
                "training finished"
            );
            self.discard_saved();
            self.screen = AppScreen::Summary;
        } else {
            if let Err(e) = self.store.save(&self.training.snapshot()) {
                tracing::warn!("cannot save session: {e:#}");
            }
            if result.task_finished() {
                self.letter_cursor = 0;
                if self.config.pause_ms > 0 {
                    self.pending_until =
                        Some(Instant::now() + Duration::from_millis(self.config.pause_ms));
                }
            }
        }
        self.clamp_letter_cursor();
        Some(result)
    }

    /// Type the highlighted tile of the remaining-letters row. While an
    /// earlier task is on screen no tile is highlighted, so this only returns
    /// to the live task.
    pub fn pick_selected_letter(&mut self) -> Option<InputResult> {
        if self.viewed_task.is_some() {
            self.viewed_task = None;
            return None;
        }
        let letter = self
            .training
            .current_task()?
            .randomized_word()
            .chars()
            .nth(self.letter_cursor)?;
        self.type_letter(letter)
    }

    pub fn move_letter_cursor(&mut self, forward: bool) {
        let Some(len) = self
            .training
            .current_task()
            .map(|t| t.randomized_word().chars().count())
        else {
            return;
        };
        if len == 0 {
            return;
        }
        self.letter_cursor = if forward {
            (self.letter_cursor + 1) % len
        } else if self.letter_cursor == 0 {
            len - 1
        } else {
            self.letter_cursor - 1
        };
    }

    /// Index of the task on screen: a reviewed one, the one that just ended
    /// while the pause runs, or the live one.
    pub fn displayed_task_index(&self) -> usize {
        let live = self.training.current_task_index();
        let index = match self.viewed_task {
            Some(i) => i,
            None if self.is_pending() => live.saturating_sub(1),
            None => live,
        };
        index.min(self.training.tasks().len().saturating_sub(1))
    }

    pub fn displayed_task(&self) -> Option<&Task> {
        self.training.tasks().get(self.displayed_task_index())
    }

    /// Whether the letter row belongs to the task that takes input.
    pub fn displaying_live_task(&self) -> bool {
        self.viewed_task.is_none() && !self.is_pending()
    }

    pub fn view_previous_task(&mut self) {
        let shown = self.displayed_task_index();
        if shown > 0 {
            self.viewed_task = Some(shown - 1);
        }
    }

    pub fn view_next_task(&mut self) {
        let Some(shown) = self.viewed_task else {
            return;
        };
        let live = self
            .training
            .current_task_index()
            .min(self.training.tasks().len().saturating_sub(1));
        self.viewed_task = if shown + 1 >= live {
            None
        } else {
            Some(shown + 1)
        };
    }

    fn reset_view(&mut self) {
        self.viewed_task = None;
        self.letter_cursor = 0;
        self.pending_until = None;
    }

    fn clamp_letter_cursor(&mut self) {
        let len = self
            .training
            .current_task()
            .map(|t| t.randomized_word().chars().count())
            .unwrap_or(0);
        if self.letter_cursor >= len {
            self.letter_cursor = len.saturating_sub(1);
        }
    }

    fn discard_saved(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("cannot clear saved session: {e:#}");
        }
    }
}
