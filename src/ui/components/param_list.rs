use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

use paramlab::catalog::{Catalog, ParameterDescriptor};
use paramlab::session::SessionState;

use crate::ui::components::control::{control_line, editing_line};
use crate::ui::line_input::LineInput;
use crate::ui::theme::{Theme, ThemeColors};

/// Scrolling column of parameter cards.
pub struct ParamList<'a> {
    params: Vec<&'a ParameterDescriptor>,
    catalog: &'a Catalog,
    session: &'a SessionState,
    cursor: usize,
    editing: Option<(&'a str, &'a LineInput)>,
    compact: bool,
    theme: &'a Theme,
}

impl<'a> ParamList<'a> {
    pub fn new(
        params: Vec<&'a ParameterDescriptor>,
        catalog: &'a Catalog,
        session: &'a SessionState,
        cursor: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            params,
            catalog,
            session,
            cursor,
            editing: None,
            compact: false,
            theme,
        }
    }

    pub fn editing(mut self, editing: Option<(&'a str, &'a LineInput)>) -> Self {
        self.editing = editing;
        self
    }

    /// Title and control only, as in the sandbox.
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    fn card_height(&self, param: &ParameterDescriptor) -> u16 {
        if self.compact {
            return 4;
        }
        let examples = if self.session.show_examples {
            param.examples.len() as u16
        } else {
            0
        };
        5 + examples
    }

    fn card_lines(&self, param: &ParameterDescriptor) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let muted = Style::default().fg(colors.text_muted());
        let learned = self.session.learned.contains(&param.id);

        let mut title = vec![Span::styled(
            param.label(),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )];
        if !self.compact {
            if let Some(category) = self.catalog.category(&param.category) {
                title.push(Span::raw("  "));
                title.push(Span::styled(
                    format!(" {} ", category.name),
                    Style::default()
                        .fg(colors.bg())
                        .bg(ThemeColors::parse_color(&category.color)),
                ));
            }
            if learned {
                title.push(Span::styled(
                    "  ✓ learned",
                    Style::default().fg(colors.success()),
                ));
            }
        }

        let mut lines = vec![Line::from(title)];
        if !self.compact {
            lines.push(Line::from(Span::styled(param.short_desc.clone(), muted)));
        }

        let control = match self.editing {
            Some((id, input)) if id == param.id => editing_line(input, self.theme),
            _ => control_line(param, self.session.values.get(&param.id), self.theme),
        };
        lines.push(control);

        if !self.compact && self.session.show_examples {
            for example in &param.examples {
                let value = if example.value.is_empty() {
                    "\"\"".to_string()
                } else {
                    example.value.clone()
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {value:<16}"),
                        Style::default().fg(colors.json_value()),
                    ),
                    Span::styled(format!(" {}", example.effect), muted),
                ]));
            }
        }
        lines
    }

    /// First card to draw so the cursor card is fully visible.
    fn scroll_start(&self, height: u16) -> usize {
        let cursor = self.cursor.min(self.params.len().saturating_sub(1));
        let mut start = 0;
        let mut used: u16 = self.params[..=cursor]
            .iter()
            .map(|p| self.card_height(p))
            .sum();
        while used > height && start < cursor {
            used -= self.card_height(self.params[start]);
            start += 1;
        }
        start
    }
}

impl Widget for ParamList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        if self.params.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "  No parameters in this category.",
                Style::default().fg(colors.text_muted()),
            )))
            .render(area, buf);
            return;
        }

        let start = self.scroll_start(area.height);
        let mut y = area.y;
        for (i, param) in self.params.iter().enumerate().skip(start) {
            let remaining = area.bottom().saturating_sub(y);
            if remaining < 3 {
                break;
            }
            let height = self.card_height(param).min(remaining);
            let card = Rect::new(area.x, y, area.width, height);

            let focused = i == self.cursor;
            let category_color = self
                .catalog
                .category(&param.category)
                .map(|c| ThemeColors::parse_color(&c.color))
                .unwrap_or_else(|| colors.border());
            let selected = self.session.selected.as_deref() == Some(param.id.as_str());
            let block = Block::bordered()
                .border_type(if focused {
                    BorderType::Thick
                } else {
                    BorderType::Rounded
                })
                .border_style(Style::default().fg(if focused || selected {
                    category_color
                } else {
                    colors.border()
                }))
                .style(Style::default().bg(colors.bg()));
            let inner = block.inner(card);
            block.render(card, buf);
            Paragraph::new(self.card_lines(param)).render(inner, buf);

            y += height;
        }
    }
}
