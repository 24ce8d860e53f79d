use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::training::Training;
use crate::ui::palette;

/// End-of-training statistics.
pub struct Summary<'a> {
    pub training: &'a Training,
}

impl<'a> Summary<'a> {
    pub fn new(training: &'a Training) -> Self {
        Self { training }
    }
}

fn stat_line(label: &'static str, value: String, value_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(palette::FG)),
        Span::styled(value, value_style.add_modifier(Modifier::BOLD)),
    ])
}

impl Widget for Summary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Training Complete ")
            .border_style(Style::default().fg(palette::ACCENT))
            .style(Style::default().bg(palette::BG));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            "Results",
            Style::default()
                .fg(palette::ACCENT)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let errors = self.training.error_count();
        let error_color = if errors == 0 {
            palette::SUCCESS
        } else {
            palette::ERROR
        };
        stat_line(
            "  Mistakes:             ",
            errors.to_string(),
            Style::default().fg(error_color),
        )
        .render(layout[1], buf);

        let clean = self.training.tasks_without_errors();
        stat_line(
            "  Words without errors: ",
            format!("{clean} / {}", self.training.tasks().len()),
            Style::default().fg(palette::SUCCESS),
        )
        .render(layout[2], buf);

        let hardest = match self.training.most_broken_task() {
            Some(word) => format!("\"{word}\""),
            None => "none".to_string(),
        };
        stat_line(
            "  Hardest word:         ",
            hardest,
            Style::default().fg(palette::WARNING),
        )
        .render(layout[3], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("  [n] New training  ", Style::default().fg(palette::ACCENT)),
            Span::styled("[q] Quit", Style::default().fg(palette::ACCENT)),
        ]))
        .render(layout[5], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::snapshot::{TaskSnapshot, TrainingSnapshot};

    fn finished(word: &str, errors: u32) -> TaskSnapshot {
        TaskSnapshot {
            word: word.into(),
            randomized_word: if errors == 3 { word.into() } else { String::new() },
            word_progress: word.into(),
            current_letter_index: if errors == 3 { 0 } else { word.len() },
            current_err_count: errors,
            max_error_count: 3,
        }
    }

    fn rendered(tasks: Vec<TaskSnapshot>) -> String {
        let snapshot = TrainingSnapshot {
            max_err_count: 3,
            max_task_count: tasks.len(),
            current_task_index: tasks.len(),
            tasks,
        };
        let training = Training::restore(&snapshot).unwrap();
        let area = Rect::new(0, 0, 50, 14);
        let mut buf = Buffer::empty(area);
        Summary::new(&training).render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn shows_statistics_and_hardest_word() {
        let screen = rendered(vec![finished("sun", 1), finished("task", 3), finished("data", 0)]);
        assert!(screen.contains("Mistakes: 4"));
        assert!(screen.contains("Words without errors: 1 / 3"));
        assert!(screen.contains("\"task\""));
    }

    #[test]
    fn clean_training_names_first_word_as_hardest() {
        let screen = rendered(vec![finished("sun", 0), finished("task", 0)]);
        assert!(screen.contains("Mistakes: 0"));
        assert!(screen.contains("Hardest word: \"sun\""));
        assert!(!screen.contains("none"));
    }
}
