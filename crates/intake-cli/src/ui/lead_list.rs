//! Lead list pane: left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{app::App, ui::status_color};

/// Render the current page of leads into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let page = app.current_page();

  let title = format!(
    " Leads ({}/{})  page {}/{} ",
    page.filtered_count,
    app.leads.len(),
    page.page,
    page.total_pages.max(1),
  );

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = page
    .leads
    .iter()
    .map(|lead| {
      ListItem::new(Line::from(vec![
        Span::styled(
          format!("{:<12}", lead.status.to_string()),
          Style::default().fg(status_color(lead.status)),
        ),
        Span::raw(lead.full_name()),
        Span::styled(
          format!("  {}", lead.country),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Search bar on the last inner row while typing or while a search is set.
  if (app.search_active || !app.search.is_empty()) && inner_area.height > 2 {
    let search_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let text = if app.search_active {
      format!("/{}_", app.search)
    } else {
      format!("/{}", app.search)
    };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
      search_area,
    );
  }

  let mut state = ListState::default();
  state.select((!page.leads.is_empty()).then_some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}
