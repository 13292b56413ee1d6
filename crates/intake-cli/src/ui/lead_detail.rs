//! Lead detail pane: right panel.

use chrono::Local;
use intake_core::{lead::Lead, lifecycle};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
  app::{App, Screen},
  ui::status_color,
};

/// Render `lead` into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App, lead: &Lead) {
  let border = if app.screen == Screen::LeadDetail {
    Color::Cyan
  } else {
    Color::DarkGray
  };
  let block = Block::default()
    .title(format!(" {} ", lead.full_name()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let visas = lead
    .visa_categories
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(", ");
  let submitted = lead
    .created_at
    .with_timezone(&Local)
    .format("%Y-%m-%d %H:%M")
    .to_string();

  let mut lines = vec![
    Line::from(vec![
      label("status"),
      Span::styled(
        lead.status.to_string(),
        Style::default()
          .fg(status_color(lead.status))
          .add_modifier(Modifier::BOLD),
      ),
    ]),
    field("email", &lead.email),
    field("linkedin", &lead.linked_in),
    field("country", &lead.country),
    field("visas", &visas),
    field("submitted", &submitted),
    field("resume", lead.resume_url.as_deref().unwrap_or("—")),
    Line::from(""),
  ];

  if lead.additional_info.is_empty() {
    lines.push(Line::from(Span::styled(
      "No additional information.",
      Style::default().fg(Color::DarkGray),
    )));
  } else {
    lines.push(Line::from(label("notes")));
    lines.extend(lead.additional_info.lines().map(|l| Line::from(l.to_string())));
  }

  if lifecycle::allowed_next(lead.status).next().is_some() {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      "[r] mark as Reached Out",
      Style::default().fg(Color::DarkGray),
    )));
  }

  let para = Paragraph::new(lines)
    .wrap(Wrap { trim: false })
    .scroll((app.detail_scroll as u16, 0));
  f.render_widget(para, inner);
}

fn label(name: &str) -> Span<'static> {
  Span::styled(
    format!("{name:<12}"),
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  )
}

fn field<'a>(name: &str, value: &'a str) -> Line<'a> {
  Line::from(vec![label(name), Span::raw(value)])
}
