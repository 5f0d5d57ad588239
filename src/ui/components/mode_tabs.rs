use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use paramlab::session::Mode;

use crate::ui::theme::Theme;

pub struct ModeTabs<'a> {
    active: Mode,
    theme: &'a Theme,
}

impl<'a> ModeTabs<'a> {
    pub fn new(active: Mode, theme: &'a Theme) -> Self {
        Self { active, theme }
    }
}

fn tab_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Explore => "📚 Explore",
        Mode::Quiz => "🎯 Quiz",
        Mode::Sandbox => "🛠️ Sandbox",
    }
}

impl Widget for ModeTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let mut spans = Vec::new();
        for mode in Mode::ALL {
            let style = if mode == self.active {
                Style::default()
                    .fg(colors.header_fg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_muted())
            };
            spans.push(Span::styled(format!("  {}  ", tab_label(mode)), style));
            spans.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
