use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use paramlab::catalog::{Catalog, ParameterDescriptor};
use paramlab::session::SessionState;

use crate::ui::components::control::control_line;
use crate::ui::theme::{Theme, ThemeColors};

/// Full description of the selected parameter.
pub struct DetailPanel<'a> {
    param: &'a ParameterDescriptor,
    catalog: &'a Catalog,
    session: &'a SessionState,
    theme: &'a Theme,
}

impl<'a> DetailPanel<'a> {
    pub fn new(
        param: &'a ParameterDescriptor,
        catalog: &'a Catalog,
        session: &'a SessionState,
        theme: &'a Theme,
    ) -> Self {
        Self {
            param,
            catalog,
            session,
            theme,
        }
    }
}

impl Widget for DetailPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let heading = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(colors.text_muted());

        Clear.render(area, buf);
        let block = Block::bordered()
            .title(format!(" {} ", self.param.label()))
            .title_bottom(Line::from(" [Esc] close ").right_aligned())
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            Line::from(Span::styled(
                self.param.id.clone(),
                Style::default().fg(colors.json_key()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.param.full_desc.clone(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];

        if let Some(category) = self.catalog.category(&self.param.category) {
            lines.push(Line::from(Span::styled("Category", heading)));
            lines.push(Line::from(Span::styled(
                format!(" {} ", category.name),
                Style::default()
                    .fg(colors.bg())
                    .bg(ThemeColors::parse_color(&category.color)),
            )));
            lines.push(Line::from(Span::styled(category.description.clone(), muted)));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            format!("Interactive control ({})", self.param.kind().as_str()),
            heading,
        )));
        lines.push(control_line(
            self.param,
            self.session.values.get(&self.param.id),
            self.theme,
        ));
        lines.push(Line::from(""));

        if !self.param.examples.is_empty() {
            lines.push(Line::from(Span::styled("Usage examples", heading)));
            for example in &self.param.examples {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {}", example.value),
                        Style::default().fg(colors.json_value()),
                    ),
                    Span::styled(" → ", muted),
                    Span::styled(example.effect.clone(), Style::default().fg(colors.fg())),
                ]));
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
