//! Tests for `MemoryStore`, and for `LeadService` running over it.

use std::sync::Arc;

use chrono::Utc;
use intake_core::{
  Error as CoreError,
  lead::{Lead, LeadId, LeadStatus, VisaCategory},
  query::LeadQuery,
  service::{LeadService, Listing},
  store::LeadStore,
  validate::{Field, FieldError, RawSubmission},
};

use crate::{Error, MemoryStore, seed::demo_leads};

fn lead(id: &str) -> Lead {
  Lead {
    id:              LeadId::from(id),
    first_name:      "Jane".into(),
    last_name:       "Ma".into(),
    email:           "jane.ma@example.com".into(),
    linked_in:       "https://linkedin.com/in/janema".into(),
    country:         "Mexico".into(),
    visa_categories: vec![VisaCategory::Unsure],
    additional_info: String::new(),
    resume_url:      None,
    status:          LeadStatus::Pending,
    created_at:      Utc::now(),
  }
}

fn submission() -> RawSubmission {
  RawSubmission {
    first_name:       Some("Li".into()),
    last_name:        Some("Zijin".into()),
    email:            Some("li.zijin@example.com".into()),
    country:          Some("South Korea".into()),
    linked_in:        Some("https://linkedin.com/in/lizijin".into()),
    visa_categories:  Some(r#"["O-1","EB-1A"]"#.into()),
    additional_info:  Some("Artist looking to work in the US".into()),
    resume_file_name: None,
  }
}

fn service() -> LeadService<MemoryStore> {
  LeadService::new(Arc::new(MemoryStore::new()))
}

async fn all(service: &LeadService<MemoryStore>) -> Vec<Lead> {
  match service.list(None).await.unwrap() {
    Listing::All(leads) => leads,
    Listing::Page(_) => panic!("expected the full listing"),
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_lists_nothing() {
  let s = MemoryStore::new();
  assert!(s.list_all().await.unwrap().is_empty());
  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn insert_prepends() {
  let s = MemoryStore::new();
  s.insert(lead("a")).await.unwrap();
  s.insert(lead("b")).await.unwrap();
  s.insert(lead("c")).await.unwrap();

  let ids: Vec<_> = s
    .list_all()
    .await
    .unwrap()
    .into_iter()
    .map(|l| l.id.to_string())
    .collect();
  assert_eq!(ids, ["c", "b", "a"]);
}

#[tokio::test]
async fn insert_duplicate_id_fails() {
  let s = MemoryStore::new();
  s.insert(lead("a")).await.unwrap();
  let err = s.insert(lead("a")).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateId(id) if id.as_str() == "a"));
  assert_eq!(s.count().await.unwrap(), 1);
}

#[tokio::test]
async fn find_by_id() {
  let s = MemoryStore::new();
  s.insert(lead("a")).await.unwrap();
  assert_eq!(s.find_by_id(&"a".into()).await.unwrap().first_name, "Jane");
  assert!(matches!(
    s.find_by_id(&"missing".into()).await,
    Err(Error::NotFound(_))
  ));
}

#[tokio::test]
async fn update_status_mutates_in_place() {
  let s = MemoryStore::new();
  let original = s.insert(lead("a")).await.unwrap();

  let updated = s
    .update_status(&"a".into(), LeadStatus::ReachedOut)
    .await
    .unwrap();
  assert_eq!(updated.status, LeadStatus::ReachedOut);
  assert_eq!(updated.created_at, original.created_at);

  let stored = s.find_by_id(&"a".into()).await.unwrap();
  assert_eq!(stored, updated);
}

#[tokio::test]
async fn update_status_rejects_illegal_moves() {
  let s = MemoryStore::new();
  s.insert(lead("a")).await.unwrap();

  let err = s
    .update_status(&"a".into(), LeadStatus::Completed)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Lifecycle(_)));
  let stored = s.find_by_id(&"a".into()).await.unwrap();
  assert_eq!(stored.status, LeadStatus::Pending);
}

#[tokio::test]
async fn update_status_unknown_id() {
  let s = MemoryStore::new();
  let err = s
    .update_status(&"nope".into(), LeadStatus::ReachedOut)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn concurrent_transitions_succeed_exactly_once() {
  let s = MemoryStore::new();
  s.insert(lead("a")).await.unwrap();

  let handles: Vec<_> = (0..16)
    .map(|_| {
      let s = s.clone();
      tokio::spawn(async move {
        s.update_status(&"a".into(), LeadStatus::ReachedOut).await
      })
    })
    .collect();

  let mut ok = 0;
  for h in handles {
    if h.await.unwrap().is_ok() {
      ok += 1;
    }
  }
  assert_eq!(ok, 1);
}

#[test]
fn demo_contact_links_match_the_seed_roster() {
  let leads = demo_leads();
  let anna = leads.iter().find(|l| l.id.as_str() == "8").unwrap();
  assert_eq!(anna.full_name(), "Anna Voronova");
  assert_eq!(anna.email, "anna.voronova@example.com");
  assert_eq!(anna.linked_in, "https://linkedin.com/in/anavoronova");

  let jorge = &leads[0];
  assert_eq!(jorge.linked_in, "https://linkedin.com/in/jorgeruiz");
}

#[tokio::test]
async fn with_leads_keeps_order_and_rejects_duplicates() {
  let s = MemoryStore::with_leads(demo_leads()).unwrap();
  let leads = s.list_all().await.unwrap();
  assert_eq!(leads.len(), 10);
  assert_eq!(leads[0].full_name(), "Jorge Ruiz");
  assert_eq!(
    leads
      .iter()
      .filter(|l| l.status == LeadStatus::ReachedOut)
      .count(),
    1
  );

  assert!(matches!(
    MemoryStore::with_leads([lead("x"), lead("x")]),
    Err(Error::DuplicateId(_))
  ));
}

// ─── Service ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_yields_pending_lead_at_the_head() {
  let svc = service();
  svc.create(submission()).await.unwrap();
  let created = svc.create(submission()).await.unwrap();

  assert_eq!(created.status, LeadStatus::Pending);
  assert_eq!(created.visa_categories, [VisaCategory::O1, VisaCategory::Eb1a]);

  let leads = all(&svc).await;
  assert_eq!(leads.len(), 2);
  assert_eq!(leads[0], created);
  assert_ne!(leads[0].id, leads[1].id);
}

#[tokio::test]
async fn create_and_list_round_trip() {
  let svc = service();
  let created = svc.create(submission()).await.unwrap();
  let listed = all(&svc).await.remove(0);
  assert_eq!(listed, created);
  assert_eq!(listed.first_name, "Li");
  assert_eq!(listed.additional_info, "Artist looking to work in the US");
  assert_eq!(listed.resume_url, None);
}

#[tokio::test]
async fn create_with_missing_field_leaves_store_unchanged() {
  let svc = LeadService::new(Arc::new(MemoryStore::with_leads(demo_leads()).unwrap()));
  let before = svc.store().count().await.unwrap();

  for strip in 0..6 {
    let mut raw = submission();
    match strip {
      0 => raw.first_name = None,
      1 => raw.last_name = None,
      2 => raw.email = None,
      3 => raw.country = None,
      4 => raw.linked_in = None,
      _ => raw.visa_categories = None,
    }
    let err = svc.create(raw).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)), "case {strip}: {err}");
  }

  assert_eq!(svc.store().count().await.unwrap(), before);
}

#[tokio::test]
async fn create_reports_malformed_categories() {
  let svc = service();
  let raw = RawSubmission {
    visa_categories: Some("O-1,EB-1A".into()),
    ..submission()
  };
  let CoreError::Validation(errors) = svc.create(raw).await.unwrap_err() else {
    panic!("expected a validation error");
  };
  assert_eq!(errors.get(Field::VisaCategories), Some(&FieldError::Malformed));
  assert_eq!(svc.store().count().await.unwrap(), 0);
}

#[tokio::test]
async fn create_with_resume_gets_placeholder_url() {
  let svc = service().with_resume_base_url("https://files.example.org/cv/");
  let raw = RawSubmission {
    resume_file_name: Some("uploads/li-zijin.pdf".into()),
    ..submission()
  };
  let created = svc.create(raw).await.unwrap();
  assert_eq!(
    created.resume_url.as_deref(),
    Some("https://files.example.org/cv/li-zijin.pdf")
  );
}

#[tokio::test]
async fn resume_url_skips_trailing_separators() {
  let svc = service().with_resume_base_url("https://files.example.org/cv");
  for (file_name, expected) in [
    ("dir/", Some("https://files.example.org/cv/dir")),
    ("C:\\cv\\li.pdf\\", Some("https://files.example.org/cv/li.pdf")),
    ("//", None),
  ] {
    let raw = RawSubmission {
      resume_file_name: Some(file_name.into()),
      ..submission()
    };
    let created = svc.create(raw).await.unwrap();
    assert_eq!(created.resume_url.as_deref(), expected, "{file_name:?}");
  }
}

#[tokio::test]
async fn reached_out_twice_is_rejected() {
  let svc = service();
  let created = svc.create(submission()).await.unwrap();
  let id = created.id.to_string();

  let updated = svc.update_status(Some(&id), "Reached Out").await.unwrap();
  assert_eq!(updated.status, LeadStatus::ReachedOut);
  assert_eq!(updated.id, created.id);
  assert_eq!(updated.created_at, created.created_at);

  let err = svc.update_status(Some(&id), "Reached Out").await.unwrap_err();
  assert!(matches!(
    err,
    CoreError::InvalidTransition {
      from: LeadStatus::ReachedOut,
      to:   LeadStatus::ReachedOut,
    }
  ));
}

#[tokio::test]
async fn update_status_unknown_id_leaves_store_unchanged() {
  let svc = LeadService::new(Arc::new(MemoryStore::with_leads(demo_leads()).unwrap()));
  let before = all(&svc).await;

  let err = svc.update_status(Some("404"), "Reached Out").await.unwrap_err();
  assert!(matches!(err, CoreError::NotFound(id) if id.as_str() == "404"));
  assert_eq!(all(&svc).await, before);
}

#[tokio::test]
async fn update_status_validates_inputs_first() {
  let svc = LeadService::new(Arc::new(MemoryStore::with_leads(demo_leads()).unwrap()));

  assert!(matches!(
    svc.update_status(None, "Reached Out").await,
    Err(CoreError::MissingId)
  ));
  assert!(matches!(
    svc.update_status(Some("  "), "Reached Out").await,
    Err(CoreError::MissingId)
  ));
  assert!(matches!(
    svc.update_status(Some("1"), "Contacted").await,
    Err(CoreError::InvalidStatus(s)) if s == "Contacted"
  ));
  assert!(matches!(
    svc.update_status(Some("1"), "Completed").await,
    Err(CoreError::InvalidTransition { .. })
  ));
  assert!(matches!(
    svc.update_status(Some("7"), "Pending").await,
    Err(CoreError::InvalidTransition { .. })
  ));
}

#[tokio::test]
async fn list_with_query_pages_the_store() {
  let svc = LeadService::new(Arc::new(MemoryStore::with_leads(demo_leads()).unwrap()));

  let query = LeadQuery {
    search: "an".into(),
    status: Some("Pending".into()),
    page:   1,
  };
  let Listing::Page(page) = svc.list(Some(&query)).await.unwrap() else {
    panic!("expected a page");
  };
  let names: Vec<_> = page.leads.iter().map(Lead::full_name).collect();
  // "Anand Jain" matches but has been reached out to.
  assert_eq!(names, ["Mark Antonov", "Jane Ma", "Anna Voronova"]);
  assert_eq!(page.total_pages, 1);

  let Listing::Page(second) = svc
    .list(Some(&LeadQuery { page: 2, ..LeadQuery::default() }))
    .await
    .unwrap()
  else {
    panic!("expected a page");
  };
  assert_eq!(second.leads.len(), 2);
  assert_eq!(second.total_pages, 2);
}
