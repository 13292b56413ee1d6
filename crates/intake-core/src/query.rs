//! The dashboard query: name search, status filter, fixed-size pages.

use serde::{Deserialize, Serialize};

use crate::lead::Lead;

/// Leads per page.
pub const PAGE_SIZE: usize = 8;

/// Parameters for [`run`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeadQuery {
  /// Case-insensitive substring of `"{first} {last}"`. Empty matches all.
  #[serde(default)]
  pub search: String,
  /// Exact status wire string (`"Reached Out"`). `None` or empty passes all;
  /// an unrecognised value passes none.
  #[serde(default)]
  pub status: Option<String>,
  /// 1-indexed. Zero, negative, and past-the-end pages are empty.
  #[serde(default = "first_page")]
  pub page:   i64,
}

fn first_page() -> i64 { 1 }

impl Default for LeadQuery {
  fn default() -> Self {
    Self {
      search: String::new(),
      status: None,
      page:   first_page(),
    }
  }
}

/// One page of filtered leads plus the numbers needed to page through them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPage {
  pub leads:          Vec<Lead>,
  pub page:           i64,
  pub page_size:      usize,
  pub total_pages:    usize,
  pub filtered_count: usize,
}

/// Filter `leads` by name then status, keeping their order, and cut out
/// `query.page`.
pub fn run(leads: &[Lead], query: &LeadQuery) -> LeadPage {
  let needle = query.search.to_lowercase();
  let status = query.status.as_deref().filter(|s| !s.is_empty());

  let filtered: Vec<&Lead> = leads
    .iter()
    .filter(|lead| lead.full_name().to_lowercase().contains(&needle))
    .filter(|lead| status.is_none_or(|s| lead.status.as_ref() == s))
    .collect();

  let filtered_count = filtered.len();
  let total_pages = filtered_count.div_ceil(PAGE_SIZE);

  let leads = usize::try_from(query.page)
    .ok()
    .and_then(|page| page.checked_sub(1))
    .and_then(|index| index.checked_mul(PAGE_SIZE))
    .map(|start| {
      filtered
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .map(|lead| (*lead).clone())
        .collect()
    })
    .unwrap_or_default();

  tracing::debug!(
    search = %query.search,
    status = ?query.status,
    page = query.page,
    filtered_count,
    "ran lead query"
  );

  LeadPage {
    leads,
    page: query.page,
    page_size: PAGE_SIZE,
    total_pages,
    filtered_count,
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::lead::{LeadId, LeadStatus, VisaCategory};

  fn lead(i: usize, first: &str, last: &str, status: LeadStatus) -> Lead {
    Lead {
      id: LeadId::from(i.to_string()),
      first_name: first.into(),
      last_name: last.into(),
      email: format!("lead{i}@example.com"),
      linked_in: format!("https://linkedin.com/in/lead{i}"),
      country: "Mexico".into(),
      visa_categories: vec![VisaCategory::O1],
      additional_info: String::new(),
      resume_url: None,
      status,
      created_at: Utc::now(),
    }
  }

  fn many(n: usize) -> Vec<Lead> {
    (0..n)
      .map(|i| lead(i, "Lead", &format!("Number{i}"), LeadStatus::Pending))
      .collect()
  }

  fn ids(page: &LeadPage) -> Vec<String> {
    page.leads.iter().map(|l| l.id.to_string()).collect()
  }

  #[test]
  fn search_and_status_combine() {
    let mut leads = Vec::new();
    leads.push(lead(0, "Mary", "Lopez", LeadStatus::Pending));
    leads.push(lead(1, "Maryam", "Khan", LeadStatus::Pending));
    leads.push(lead(2, "Jorge", "Ruiz", LeadStatus::Pending));
    leads.push(lead(3, "Marybeth", "Stone", LeadStatus::ReachedOut));
    for i in 4..10 {
      leads.push(lead(i, "Other", "Person", LeadStatus::ReachedOut));
    }

    let page = run(&leads, &LeadQuery {
      search: "MARY".into(),
      status: Some("Pending".into()),
      page:   1,
    });
    assert_eq!(ids(&page), ["0", "1"]);
    assert_eq!(page.filtered_count, 2);
    assert_eq!(page.total_pages, 1);
  }

  #[test]
  fn search_spans_first_and_last_name() {
    let leads = vec![
      lead(0, "Bahar", "Zamir", LeadStatus::Pending),
      lead(1, "Anna", "Voronova", LeadStatus::Pending),
    ];
    let query = LeadQuery { search: "r zam".into(), ..LeadQuery::default() };
    assert_eq!(ids(&run(&leads, &query)), ["0"]);
  }

  #[test]
  fn empty_query_returns_first_page_in_order() {
    let leads = many(10);
    let page = run(&leads, &LeadQuery::default());
    assert_eq!(page.leads.len(), PAGE_SIZE);
    assert_eq!(page.leads[0].id.as_str(), "0");
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.filtered_count, 10);
  }

  #[test]
  fn pagination_tail_and_past_the_end() {
    let leads = many(20);

    let third = run(&leads, &LeadQuery { page: 3, ..LeadQuery::default() });
    assert_eq!(ids(&third), ["16", "17", "18", "19"]);
    assert_eq!(third.total_pages, 3);

    let fourth = run(&leads, &LeadQuery { page: 4, ..LeadQuery::default() });
    assert!(fourth.leads.is_empty());
    assert_eq!(fourth.total_pages, 3);
    assert_eq!(fourth.filtered_count, 20);
  }

  #[test]
  fn zero_and_negative_pages_are_empty() {
    let leads = many(3);
    for page in [0, -1, i64::MIN] {
      let result = run(&leads, &LeadQuery { page, ..LeadQuery::default() });
      assert!(result.leads.is_empty(), "page {page}");
      assert_eq!(result.filtered_count, 3);
    }
  }

  #[test]
  fn unknown_status_matches_nothing_and_empty_status_matches_all() {
    let leads = many(3);
    let unknown = run(&leads, &LeadQuery {
      status: Some("Archived".into()),
      ..LeadQuery::default()
    });
    assert!(unknown.leads.is_empty());
    assert_eq!(unknown.total_pages, 0);

    let empty = run(&leads, &LeadQuery {
      status: Some(String::new()),
      ..LeadQuery::default()
    });
    assert_eq!(empty.filtered_count, 3);
  }

  #[test]
  fn empty_store() {
    let page = run(&[], &LeadQuery::default());
    assert!(page.leads.is_empty());
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.filtered_count, 0);
  }
}
