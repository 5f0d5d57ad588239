use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use paramlab::catalog::{Control, ParameterDescriptor};
use paramlab::session::values::{ParamValue, format_number};

use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

const SLIDER_WIDTH: usize = 20;

/// One-line rendering of a parameter's control showing its current value.
pub fn control_line(
    param: &ParameterDescriptor,
    value: Option<&ParamValue>,
    theme: &Theme,
) -> Line<'static> {
    let colors = &theme.colors;
    let value_style = Style::default()
        .fg(colors.json_value())
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(colors.text_muted());

    match &param.control {
        Control::Slider { min, max, .. } => {
            let v = value.and_then(ParamValue::as_number).unwrap_or(*min);
            let knob = slider_position(v, *min, *max, SLIDER_WIDTH);
            let mut spans = vec![
                Span::styled(format_number(*min), muted),
                Span::raw(" "),
                Span::styled("━".repeat(knob), Style::default().fg(colors.accent())),
                Span::styled("●", Style::default().fg(colors.fg())),
                Span::styled("─".repeat(SLIDER_WIDTH - knob), muted),
                Span::raw(" "),
                Span::styled(format_number(*max), muted),
                Span::raw("   "),
                Span::styled(format_number(v), value_style),
            ];
            if let Some(unit) = param.control.unit() {
                spans.push(Span::styled(format!(" {unit}"), muted));
            }
            Line::from(spans)
        }
        Control::Number { min, max, .. } => {
            let v = value.and_then(ParamValue::as_number).unwrap_or(*min);
            let mut spans = vec![
                Span::styled("‹ ", muted),
                Span::styled(format_number(v), value_style),
                Span::styled(" ›", muted),
            ];
            if let Some(unit) = param.control.unit() {
                spans.push(Span::styled(format!(" {unit}"), muted));
            }
            spans.push(Span::styled(
                format!("   ({}..{})", format_number(*min), format_number(*max)),
                muted,
            ));
            Line::from(spans)
        }
        Control::Select { options, .. } => {
            let current = value.and_then(ParamValue::as_text).unwrap_or_default();
            let mut spans = Vec::new();
            for (i, option) in options.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" │ ", muted));
                }
                let style = if option == current {
                    Style::default()
                        .fg(colors.bg())
                        .bg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                spans.push(Span::styled(format!(" {option} "), style));
            }
            Line::from(spans)
        }
        Control::Text { .. } | Control::Json { .. } => {
            let text = value.and_then(ParamValue::as_text).unwrap_or_default();
            if text.is_empty() {
                Line::from(vec![
                    Span::styled("▏", Style::default().fg(colors.border_focused())),
                    Span::styled(param.control.placeholder().to_string(), muted),
                ])
            } else {
                Line::from(vec![
                    Span::styled("▏", Style::default().fg(colors.border_focused())),
                    Span::styled(text.to_string(), Style::default().fg(colors.json_string())),
                ])
            }
        }
    }
}

/// Line showing an in-progress edit with a block cursor.
pub fn editing_line(input: &LineInput, theme: &Theme) -> Line<'static> {
    let colors = &theme.colors;
    let (before, cursor, after) = input.render_parts();
    let text_style = Style::default().fg(colors.fg());
    let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
    Line::from(vec![
        Span::styled("✎ ", Style::default().fg(colors.warning())),
        Span::styled(before.to_string(), text_style),
        Span::styled(cursor.map(String::from).unwrap_or_else(|| " ".to_string()), cursor_style),
        Span::styled(after.to_string(), text_style),
    ])
}

/// Knob offset in `0..=width` for `value` on a `[min, max]` track.
pub fn slider_position(value: f64, min: f64, max: f64, width: usize) -> usize {
    if max <= min {
        return 0;
    }
    let ratio = ((value - min) / (max - min)).clamp(0.0, 1.0);
    (ratio * width as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_position_bounds() {
        assert_eq!(slider_position(0.0, 0.0, 2.0, 20), 0);
        assert_eq!(slider_position(1.0, 0.0, 2.0, 20), 10);
        assert_eq!(slider_position(2.0, 0.0, 2.0, 20), 20);
        assert_eq!(slider_position(5.0, 0.0, 2.0, 20), 20);
        assert_eq!(slider_position(-9.0, -2.0, 2.0, 20), 0);
    }

    #[test]
    fn test_slider_position_degenerate_range() {
        assert_eq!(slider_position(1.0, 1.0, 1.0, 20), 0);
    }
}
