//! Demo leads for a fresh dashboard.

use chrono::{DateTime, Utc};
use intake_core::lead::{Lead, LeadId, LeadStatus, VisaCategory};

/// 2024-02-02T14:45:00Z
const SEEDED_AT: i64 = 1_706_885_100;

/// Ten sample leads, most recent first. One of them has already been reached
/// out to; the rest are pending.
///
/// LinkedIn handles are listed per lead since they do not always follow the
/// name.
pub fn demo_leads() -> Vec<Lead> {
  use LeadStatus::{Pending, ReachedOut};
  use VisaCategory::{Eb1a, Eb2Niw, O1, Unsure};

  let created_at = DateTime::<Utc>::from_timestamp(SEEDED_AT, 0).unwrap_or_default();

  [
    ("1", "Jorge", "Ruiz", "jorgeruiz", "Mexico", &[O1][..], "Looking to move to the US for a tech job", Pending),
    ("2", "Bahar", "Zamir", "baharzamir", "Mexico", &[Eb1a, O1][..], "Entrepreneur looking to establish in the US", Pending),
    ("3", "Mary", "Lopez", "marylopez", "Brazil", &[Eb2Niw][..], "Researcher looking for opportunities in the US", Pending),
    ("4", "Li", "Zijin", "lizijin", "South Korea", &[O1, Eb1a][..], "Artist looking to work in the US", Pending),
    ("5", "Mark", "Antonov", "markantonov", "Russia", &[Eb2Niw][..], "Software engineer interested in US opportunities", Pending),
    ("6", "Jane", "Ma", "janema", "Mexico", &[Unsure][..], "Looking for visa options to study in the US", Pending),
    ("7", "Anand", "Jain", "anandjain", "Mexico", &[Eb1a][..], "Entrepreneur with a successful track record", ReachedOut),
    ("8", "Anna", "Voronova", "anavoronova", "France", &[O1][..], "Researcher with publications in top journals", Pending),
    ("9", "Carlos", "Mendoza", "carlosmendoza", "Mexico", &[Eb2Niw][..], "Academic looking for US opportunities", Pending),
    ("10", "Sophia", "Chen", "sophiachen", "China", &[O1][..], "Tech entrepreneur", Pending),
  ]
  .into_iter()
  .map(|(id, first, last, handle, country, visas, info, status)| {
    Lead {
      id: LeadId::from(id),
      first_name: first.to_owned(),
      last_name: last.to_owned(),
      email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
      linked_in: format!("https://linkedin.com/in/{handle}"),
      country: country.to_owned(),
      visa_categories: visas.to_vec(),
      additional_info: info.to_owned(),
      resume_url: None,
      status,
      created_at,
    }
  })
  .collect()
}
