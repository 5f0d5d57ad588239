use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// The request preview, with keys, strings and bare values coloured apart.
pub struct SandboxPreview<'a> {
    preview: &'a str,
    theme: &'a Theme,
}

impl<'a> SandboxPreview<'a> {
    pub fn new(preview: &'a str, theme: &'a Theme) -> Self {
        Self { preview, theme }
    }

    pub fn height(preview: &str) -> u16 {
        preview.lines().count() as u16 + 2
    }
}

impl Widget for SandboxPreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" 📄 Current configuration (JSON) ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.accent_dim()));
        let inner = block.inner(area);
        block.render(area, buf);

        let punct = Style::default().fg(colors.fg());
        let lines: Vec<Line> = self
            .preview
            .lines()
            .map(|line| match split_field(line) {
                Some((indent, key, value)) => {
                    let value_color = if value.starts_with('"') {
                        colors.json_string()
                    } else {
                        colors.json_value()
                    };
                    Line::from(vec![
                        Span::raw(indent.to_string()),
                        Span::styled(key.to_string(), Style::default().fg(colors.json_key())),
                        Span::styled(": ", punct),
                        Span::styled(value.to_string(), Style::default().fg(value_color)),
                    ])
                }
                None => Line::from(Span::styled(line.to_string(), punct)),
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

/// `  "key": value,` -> (`  `, `"key"`, `value,`)
fn split_field(line: &str) -> Option<(&str, &str, &str)> {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];
    if !trimmed.starts_with('"') {
        return None;
    }
    let key_end = trimmed[1..].find('"')? + 2;
    let rest = trimmed[key_end..].strip_prefix(": ")?;
    Some((indent, &trimmed[..key_end], rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_field() {
        assert_eq!(
            split_field("  \"top_p\": 1,"),
            Some(("  ", "\"top_p\"", "1,"))
        );
        assert_eq!(
            split_field("  \"model\": \"gpt-4o\","),
            Some(("  ", "\"model\"", "\"gpt-4o\","))
        );
        assert_eq!(split_field("{"), None);
        assert_eq!(split_field("}"), None);
    }
}
