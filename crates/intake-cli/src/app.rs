//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use intake_core::{
  lead::{Lead, LeadStatus},
  lifecycle,
  query::{self, LeadPage, LeadQuery},
};
use strum::IntoEnumIterator;

use crate::client::ApiClient;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the lead list; the right pane previews the cursor lead.
  LeadList,
  /// Focus on the lead detail pane.
  LeadDetail,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Every lead the server returned, most recent first.
  pub leads: Vec<Lead>,

  /// Name search text.
  pub search: String,

  /// Whether the user is typing into `search`.
  pub search_active: bool,

  /// `None` shows every status.
  pub status_filter: Option<LeadStatus>,

  /// Current 1-indexed page.
  pub page: i64,

  /// Cursor position within the current page.
  pub list_cursor: usize,

  /// Scroll offset within the detail pane.
  pub detail_scroll: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  /// Create an [`App`] with no leads loaded.
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::LeadList,
      leads: Vec::new(),
      search: String::new(),
      search_active: false,
      status_filter: None,
      page: 1,
      list_cursor: 0,
      detail_scroll: 0,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch every lead from the API into `self.leads`.
  pub async fn load_leads(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading leads…".into();
    match self.client.list_leads().await {
      Ok(leads) => {
        self.leads = leads;
        self.reset_page();
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  // ── Query ─────────────────────────────────────────────────────────────────

  /// The dashboard query built from the current search, filter, and page.
  pub fn query(&self) -> LeadQuery {
    LeadQuery {
      search: self.search.clone(),
      status: self.status_filter.map(|s| s.to_string()),
      page:   self.page,
    }
  }

  /// The page of leads currently on screen.
  pub fn current_page(&self) -> LeadPage { query::run(&self.leads, &self.query()) }

  /// The lead under the list cursor, if any.
  pub fn cursor_lead(&self) -> Option<Lead> {
    self.current_page().leads.into_iter().nth(self.list_cursor)
  }

  fn reset_page(&mut self) {
    self.page = 1;
    self.list_cursor = 0;
    self.detail_scroll = 0;
  }

  /// All → Pending → Reached Out → Completed → All.
  pub fn cycle_status_filter(&mut self) {
    let mut statuses = LeadStatus::iter();
    self.status_filter = match self.status_filter {
      None => statuses.next(),
      Some(current) => statuses.skip_while(|s| *s != current).nth(1),
    };
    self.reset_page();
  }

  pub fn next_page(&mut self) {
    let total = self.current_page().total_pages;
    if usize::try_from(self.page).is_ok_and(|page| page < total) {
      self.page += 1;
      self.list_cursor = 0;
      self.detail_scroll = 0;
    }
  }

  pub fn prev_page(&mut self) {
    if self.page > 1 {
      self.page -= 1;
      self.list_cursor = 0;
      self.detail_scroll = 0;
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  /// Move the cursor lead to `Reached Out` through the API.
  pub async fn mark_reached_out(&mut self) {
    let Some(lead) = self.cursor_lead() else {
      return;
    };
    let target = LeadStatus::ReachedOut;
    if !lifecycle::allowed_next(lead.status).any(|s| s == target) {
      self.status_msg = format!("{} is already {}", lead.full_name(), lead.status);
      return;
    }

    self.status_msg = "Updating…".into();
    match self.client.update_status(&lead.id, target).await {
      Ok(updated) => {
        self.status_msg = format!("Marked {} as {}", updated.full_name(), updated.status);
        if let Some(slot) = self.leads.iter_mut().find(|l| l.id == updated.id) {
          *slot = updated;
        }
        self.clamp_cursor();
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  /// Keep the cursor on screen after the page shrinks.
  fn clamp_cursor(&mut self) {
    let len = self.current_page().leads.len();
    if len == 0 {
      self.list_cursor = 0;
      if self.page > 1 {
        self.prev_page();
      }
    } else if self.list_cursor >= len {
      self.list_cursor = len - 1;
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.search_active {
      self.handle_search_key(key);
      return Ok(true);
    }

    match self.screen {
      Screen::LeadList => self.handle_list_key(key).await,
      Screen::LeadDetail => self.handle_detail_key(key).await,
    }
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        self.search.clear();
        self.reset_page();
      }
      KeyCode::Enter => {
        self.search_active = false;
      }
      KeyCode::Backspace => {
        self.search.pop();
        self.reset_page();
      }
      KeyCode::Char(c) => {
        self.search.push(c);
        self.reset_page();
      }
      _ => {}
    }
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.current_page().leads.len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
          self.detail_scroll = 0;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
          self.detail_scroll = 0;
        }
      }

      KeyCode::Char(']') | KeyCode::Right => self.next_page(),
      KeyCode::Char('[') | KeyCode::Left => self.prev_page(),

      KeyCode::Enter | KeyCode::Char('l') => {
        if self.cursor_lead().is_some() {
          self.screen = Screen::LeadDetail;
        }
      }

      KeyCode::Char('/') => {
        self.search_active = true;
        self.search.clear();
        self.reset_page();
      }
      KeyCode::Char('s') => self.cycle_status_filter(),
      KeyCode::Char('r') => self.mark_reached_out().await,
      KeyCode::Char('R') => {
        self.load_leads().await.ok();
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::LeadList;
        self.detail_scroll = 0;
      }

      KeyCode::Down | KeyCode::Char('j') => self.detail_scroll += 1,
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }

      KeyCode::Char('r') => self.mark_reached_out().await,

      _ => {}
    }
    Ok(true)
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use intake_core::lead::{LeadId, VisaCategory};

  use super::*;
  use crate::client::ApiConfig;

  fn lead(i: usize, first: &str, status: LeadStatus) -> Lead {
    Lead {
      id:              LeadId::from(i.to_string()),
      first_name:      first.into(),
      last_name:       format!("Lead{i}"),
      email:           format!("lead{i}@example.com"),
      linked_in:       format!("https://linkedin.com/in/lead{i}"),
      country:         "Mexico".into(),
      visa_categories: vec![VisaCategory::O1],
      additional_info: String::new(),
      resume_url:      None,
      status,
      created_at:      Utc::now(),
    }
  }

  fn app_with(leads: Vec<Lead>) -> App {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://127.0.0.1:9".into(),
      username: String::new(),
      password: String::new(),
    })
    .unwrap();
    let mut app = App::new(client);
    app.leads = leads;
    app
  }

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn twenty() -> Vec<Lead> {
    (0..20).map(|i| lead(i, "Ana", LeadStatus::Pending)).collect()
  }

  #[test]
  fn status_filter_cycles_back_to_all() {
    let mut app = app_with(Vec::new());
    let mut seen = Vec::new();
    for _ in 0..4 {
      app.cycle_status_filter();
      seen.push(app.status_filter);
    }
    assert_eq!(
      seen,
      [
        Some(LeadStatus::Pending),
        Some(LeadStatus::ReachedOut),
        Some(LeadStatus::Completed),
        None,
      ]
    );
  }

  #[test]
  fn paging_stops_at_both_ends() {
    let mut app = app_with(twenty());
    app.prev_page();
    assert_eq!(app.page, 1);
    app.next_page();
    app.next_page();
    app.next_page();
    assert_eq!(app.page, 3);
    assert_eq!(app.current_page().leads.len(), 4);
  }

  #[test]
  fn status_filter_resets_to_first_page() {
    let mut leads = twenty();
    leads[3].status = LeadStatus::ReachedOut;
    let mut app = app_with(leads);
    app.next_page();
    app.cycle_status_filter();
    assert_eq!(app.page, 1);
    assert_eq!(app.current_page().filtered_count, 19);
    app.cycle_status_filter();
    assert_eq!(app.cursor_lead().map(|l| l.id), Some(LeadId::from("3")));
  }

  #[tokio::test]
  async fn typed_search_filters_by_name() {
    let mut app = app_with(vec![
      lead(0, "Jane", LeadStatus::Pending),
      lead(1, "Mark", LeadStatus::Pending),
      lead(2, "Janet", LeadStatus::ReachedOut),
    ]);
    app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
    for c in "jan".chars() {
      app.handle_key(key(KeyCode::Char(c))).await.unwrap();
    }
    app.handle_key(key(KeyCode::Enter)).await.unwrap();

    assert!(!app.search_active);
    let names: Vec<_> = app
      .current_page()
      .leads
      .iter()
      .map(|l| l.first_name.clone())
      .collect();
    assert_eq!(names, ["Jane", "Janet"]);
  }

  #[tokio::test]
  async fn reached_out_lead_is_not_sent_again() {
    let mut app = app_with(vec![lead(0, "Anand", LeadStatus::ReachedOut)]);
    app.handle_key(key(KeyCode::Char('r'))).await.unwrap();
    assert!(app.status_msg.contains("already Reached Out"), "{}", app.status_msg);
    assert_eq!(app.leads[0].status, LeadStatus::ReachedOut);
  }

  #[tokio::test]
  async fn q_quits() {
    let mut app = app_with(Vec::new());
    assert!(!app.handle_key(key(KeyCode::Char('q'))).await.unwrap());
  }
}
