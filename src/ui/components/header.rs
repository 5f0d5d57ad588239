use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Gauge, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Title strip plus the learned-parameters gauge.
pub struct Header<'a> {
    learned: usize,
    total: usize,
    /// Learned share in `0.0..=1.0`.
    progress: f64,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(learned: usize, total: usize, progress: f64, theme: &'a Theme) -> Self {
        Self {
            learned,
            total,
            progress: progress.clamp(0.0, 1.0),
            theme,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Block::default()
            .style(Style::default().bg(colors.header_bg()))
            .render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " paramlab ",
                Style::default()
                    .fg(colors.header_fg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  LLM Parameters Lab: master the OpenAI API request parameters",
                Style::default().fg(colors.header_fg()),
            ),
        ]));
        title.render(rows[0], buf);

        let gauge_area = centered_columns(rows[2], 48);
        Gauge::default()
            .gauge_style(Style::default().fg(colors.bar_filled()).bg(colors.bar_empty()))
            .ratio(self.progress)
            .label(Span::styled(
                format!("{:.0}%", self.progress * 100.0),
                Style::default().fg(colors.fg()),
            ))
            .render(gauge_area, buf);

        let caption = format!("{}/{} parameters learned", self.learned, self.total);
        Paragraph::new(Line::from(Span::styled(
            caption,
            Style::default().fg(colors.text_muted()),
        )))
        .alignment(Alignment::Center)
        .render(rows[1], buf);
    }
}

fn centered_columns(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramlab::catalog::Catalog;
    use paramlab::session::{Action, SessionState};

    fn rendered_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_gauge_shows_session_progress() {
        let catalog = Catalog::builtin().unwrap();
        let session = SessionState::new(&catalog, 1)
            .apply(&catalog, Action::MarkLearned("temperature".into()))
            .apply(&catalog, Action::MarkLearned("top_p".into()));
        let theme = Theme::default();

        let area = Rect::new(0, 0, 80, 4);
        let mut buf = Buffer::empty(area);
        Header::new(
            session.learned.len(),
            catalog.len(),
            session.progress(&catalog),
            &theme,
        )
        .render(area, &mut buf);

        let text = rendered_text(&buf);
        assert!(text.contains("2/13 parameters learned"), "{text}");
        assert!(text.contains("15%"), "{text}");
    }
}
