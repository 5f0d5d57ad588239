use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget, Wrap};

use paramlab::catalog::{Catalog, ParameterDescriptor};
use paramlab::session::quiz::QuizProgress;

use crate::ui::theme::Theme;

pub struct QuizView<'a> {
    catalog: &'a Catalog,
    quiz: &'a QuizProgress,
    options: &'a [&'a ParameterDescriptor],
    cursor: usize,
    theme: &'a Theme,
}

impl<'a> QuizView<'a> {
    pub fn new(
        catalog: &'a Catalog,
        quiz: &'a QuizProgress,
        options: &'a [&'a ParameterDescriptor],
        cursor: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            catalog,
            quiz,
            options,
            cursor,
            theme,
        }
    }
}

impl Widget for QuizView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let Some(question) = self.catalog.question(self.quiz.index) else {
            return;
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let option_rows = self.options.len() as u16 * 3;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(option_rows),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let score = format!(
            "Score: {} / {}   ·   Question {} of {}",
            self.quiz.score,
            self.catalog.questions.len(),
            self.quiz.index + 1,
            self.catalog.questions.len()
        );
        Paragraph::new(Line::from(Span::styled(
            score,
            Style::default().fg(colors.text_muted()),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        Paragraph::new(Line::from(Span::styled(
            question.prompt.clone(),
            Style::default()
                .fg(colors.fg())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(layout[1], buf);

        Paragraph::new(Line::from(Span::styled(
            format!("💡 Hint: {}", question.hint),
            Style::default().fg(colors.warning()),
        )))
        .alignment(Alignment::Center)
        .render(layout[2], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(self.options.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
            .split(layout[3]);

        for (i, option) in self.options.iter().enumerate() {
            let is_answer = option.id == question.answer;
            let focused = i == self.cursor;
            let border = if self.quiz.answered && is_answer {
                colors.success()
            } else if self.quiz.answered && self.quiz.wrong {
                colors.error()
            } else if focused {
                colors.border_focused()
            } else {
                colors.border()
            };
            let marker = if self.quiz.answered && is_answer {
                " ✓"
            } else {
                ""
            };

            let row = centered(rows[i], 60);
            let block = Block::bordered()
                .border_type(if focused {
                    BorderType::Thick
                } else {
                    BorderType::Rounded
                })
                .border_style(Style::default().fg(border));
            let text_style = if self.quiz.answered && !is_answer {
                Style::default().fg(colors.text_muted())
            } else {
                Style::default().fg(colors.fg())
            };
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(colors.text_muted())),
                Span::styled(option.label(), text_style),
                Span::styled(marker, Style::default().fg(colors.success())),
            ]))
            .block(block)
            .render(row, buf);
        }

        if self.quiz.answered {
            let (text, color) = if self.quiz.wrong {
                let answer = self
                    .catalog
                    .get(&question.answer)
                    .map(|p| p.name.as_str())
                    .unwrap_or(question.answer.as_str());
                (format!("Not quite: the answer is {answer}."), colors.error())
            } else {
                ("Correct!".to_string(), colors.success())
            };
            Paragraph::new(vec![
                Line::from(Span::styled(text, Style::default().fg(color))),
                Line::from(Span::styled(
                    "Next question →  [Enter / n]",
                    Style::default().fg(colors.accent()),
                )),
            ])
            .alignment(Alignment::Center)
            .render(layout[4], buf);
        }
    }
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}
