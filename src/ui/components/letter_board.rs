use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::task::Task;
use crate::ui::palette;

/// One task: the letters placed so far and the scrambled letters left.
pub struct LetterBoard<'a> {
    task: &'a Task,
    number: usize,
    total: usize,
    selected: Option<usize>,
}

impl<'a> LetterBoard<'a> {
    pub fn new(task: &'a Task, number: usize, total: usize) -> Self {
        Self {
            task,
            number,
            total,
            selected: None,
        }
    }

    /// Highlight a tile of the letter row; only the live task has one.
    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }
}

fn tile(letter: char, style: Style) -> [Span<'static>; 2] {
    [Span::styled(format!(" {letter} "), style), Span::raw(" ")]
}

pub fn answer_line(task: &Task) -> Line<'static> {
    let placed = if task.is_error() {
        Style::default().fg(palette::FG).bg(palette::ERROR)
    } else {
        Style::default().fg(palette::FG).bg(palette::SUCCESS)
    };

    let mut spans: Vec<Span<'static>> = task
        .word_progress()
        .chars()
        .flat_map(|c| tile(c, placed))
        .collect();

    let open = task
        .word()
        .chars()
        .count()
        .saturating_sub(task.word_progress().chars().count());
    for _ in 0..open {
        spans.extend(tile('_', Style::default().fg(palette::MUTED)));
    }
    spans.pop();
    Line::from(spans)
}

pub fn letters_line(task: &Task, selected: Option<usize>) -> Line<'static> {
    if task.is_finished() {
        return Line::default();
    }
    let mut spans: Vec<Span<'static>> = task
        .randomized_word()
        .chars()
        .enumerate()
        .flat_map(|(i, c)| {
            let style = if selected == Some(i) {
                Style::default()
                    .fg(palette::FG)
                    .bg(palette::TILE_SELECTED_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette::FG).bg(palette::TILE_BG)
            };
            tile(c, style)
        })
        .collect();
    spans.pop();
    Line::from(spans)
}

fn status_line(task: &Task) -> Line<'static> {
    if task.is_complete() {
        Line::from(Span::styled(
            "Solved",
            Style::default()
                .fg(palette::SUCCESS)
                .add_modifier(Modifier::BOLD),
        ))
    } else if task.is_error() {
        Line::from(Span::styled(
            "Out of attempts",
            Style::default()
                .fg(palette::ERROR)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        let color = if task.current_err_count() == 0 {
            palette::MUTED
        } else {
            palette::WARNING
        };
        Line::from(Span::styled(
            format!(
                "Mistakes: {} / {}",
                task.current_err_count(),
                task.max_error_count()
            ),
            Style::default().fg(color),
        ))
    }
}

impl Widget for LetterBoard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!(" Task {} / {} ", self.number, self.total))
            .border_style(Style::default().fg(palette::ACCENT))
            .style(Style::default().bg(palette::BG));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        Paragraph::new(answer_line(self.task))
            .alignment(Alignment::Center)
            .render(layout[1], buf);
        Paragraph::new(letters_line(self.task, self.selected))
            .alignment(Alignment::Center)
            .render(layout[3], buf);
        Paragraph::new(status_line(self.task))
            .alignment(Alignment::Center)
            .render(layout[5], buf);
    }
}
