use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::palette;

/// Asks whether to pick up the training left unfinished last time.
pub struct RestorePrompt {
    /// Finished tasks and total tasks of the saved training.
    pub progress: Option<(usize, usize)>,
}

impl Widget for RestorePrompt {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Unfinished Training ")
            .border_style(Style::default().fg(palette::WARNING))
            .style(Style::default().bg(palette::BG));

        let detail = match self.progress {
            Some((done, total)) => format!("{done} of {total} words done."),
            None => String::new(),
        };

        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                "You have a training in progress.",
                Style::default().fg(palette::FG).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(detail, Style::default().fg(palette::MUTED))),
            Line::default(),
            Line::from(vec![
                Span::styled("[y/Enter] Resume  ", Style::default().fg(palette::ACCENT)),
                Span::styled("[n/Esc] Start over", Style::default().fg(palette::ACCENT)),
            ]),
        ];

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
