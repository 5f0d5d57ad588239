use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use paramlab::catalog::{Catalog, CategoryFilter};

use crate::ui::theme::{Theme, ThemeColors};

/// Filter chips: "All (n)" followed by one chip per category.
pub struct CategoryBar<'a> {
    catalog: &'a Catalog,
    active: &'a CategoryFilter,
    theme: &'a Theme,
}

impl<'a> CategoryBar<'a> {
    pub fn new(catalog: &'a Catalog, active: &'a CategoryFilter, theme: &'a Theme) -> Self {
        Self {
            catalog,
            active,
            theme,
        }
    }

    /// Lines needed to show every chip at `width`.
    pub fn height(catalog: &Catalog, width: u16) -> u16 {
        let total: usize = std::iter::once(format!("All ({})", catalog.len()).len())
            .chain(catalog.categories.iter().map(|c| c.name.len()))
            .map(|len| len + 3)
            .sum();
        (total as u16).div_ceil(width.max(1)).max(1)
    }
}

impl Widget for CategoryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let chip = |label: String, color, active: bool| {
            let style = if active {
                Style::default()
                    .fg(colors.bg())
                    .bg(color)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            [Span::styled(format!(" {label} "), style), Span::raw(" ")]
        };

        let mut spans: Vec<Span> = Vec::new();
        spans.extend(chip(
            format!("All ({})", self.catalog.len()),
            colors.accent(),
            *self.active == CategoryFilter::All,
        ));
        for category in &self.catalog.categories {
            let active = self.active.matches(&category.key) && *self.active != CategoryFilter::All;
            spans.extend(chip(
                category.name.clone(),
                ThemeColors::parse_color(&category.color),
                active,
            ));
        }

        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
