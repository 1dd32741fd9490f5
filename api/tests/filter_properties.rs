// tests/filter_properties.rs
//
// Listing-engine property tests exercised against the reference predicate
// and the pagination math directly (without a live DB). Paging is mirrored
// here the same way the repository applies it: filter, then slice by
// offset/limit, with the total taken from the full match set.

use api::filter::ContactFilter;
use api::pagination::PageRequest;
use chrono::Utc;
use shared::{Contact, PageMeta};
use uuid::Uuid;

fn make_contact(name: &str, email: Option<&str>, tags: &[&str], favorite: bool) -> Contact {
    let now = Utc::now();
    Contact {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.map(str::to_string),
        phone: None,
        address: None,
        company: None,
        notes: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        is_favorite: favorite,
        created_at: now,
        updated_at: now,
    }
}

fn sample_contacts() -> Vec<Contact> {
    vec![
        make_contact("Ann Anderson", Some("ann@example.com"), &["work", "gym"], true),
        make_contact("Ben Baker", Some("ben@corp.example"), &["work"], false),
        make_contact("Carla Chen", None, &["friends", "work", "gym"], true),
        make_contact("Derek Dubois", Some("derek@example.com"), &[], false),
    ]
}

/// Filter + paginate, mirroring the repository's list contract.
fn list(contacts: &[Contact], filter: &ContactFilter, page: PageRequest) -> (Vec<Contact>, i64) {
    let matched: Vec<Contact> = contacts
        .iter()
        .filter(|c| filter.matches(c))
        .cloned()
        .collect();
    let total = matched.len() as i64;
    let paged = matched
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .collect();
    (paged, total)
}

#[test]
fn search_matches_any_field_case_insensitively() {
    let contacts = sample_contacts();

    let by_name = ContactFilter::from_params(Some("ANDERS"), None, None);
    assert!(by_name.matches(&contacts[0]));

    let by_email = ContactFilter::from_params(Some("corp.example"), None, None);
    assert!(!by_email.matches(&contacts[0]));
    assert!(by_email.matches(&contacts[1]));
}

#[test]
fn search_ignores_absent_optional_fields() {
    let no_email = make_contact("Carla Chen", None, &[], false);
    let filter = ContactFilter::from_params(Some("example.com"), None, None);
    assert!(!filter.matches(&no_email));
}

#[test]
fn tag_subset_matches_and_foreign_tag_excludes() {
    let contact = make_contact("Ann", None, &["work", "gym", "friends"], false);

    // Any subset of the contact's tags matches, order irrelevant.
    let subset = ContactFilter::from_params(None, Some("gym,work"), None);
    assert!(subset.matches(&contact));

    // One tag outside the contact's set excludes it.
    let with_foreign = ContactFilter::from_params(None, Some("work,vendor"), None);
    assert!(!with_foreign.matches(&contact));
}

#[test]
fn duplicate_tags_on_a_contact_still_match() {
    let contact = make_contact("Ann", None, &["work", "work"], false);
    let filter = ContactFilter::from_params(None, Some("work"), None);
    assert!(filter.matches(&contact));
}

#[test]
fn favorite_filter_selects_exactly_the_favorites() {
    let contacts = sample_contacts();

    let favorites = ContactFilter::from_params(None, None, Some("true"));
    let (matched, total) = list(&contacts, &favorites, PageRequest::default());
    assert_eq!(total, 2);
    assert!(matched.iter().all(|c| c.is_favorite));

    // Omitting the key imposes no constraint.
    let unfiltered = ContactFilter::from_params(None, None, None);
    let (_, total) = list(&contacts, &unfiltered, PageRequest::default());
    assert_eq!(total, contacts.len() as i64);

    // Present-but-not-"true" means explicitly non-favorite.
    let non_favorites = ContactFilter::from_params(None, None, Some("false"));
    let (matched, _) = list(&contacts, &non_favorites, PageRequest::default());
    assert!(matched.iter().all(|c| !c.is_favorite));
}

#[test]
fn axes_combine_with_and_semantics() {
    let contacts = sample_contacts();
    let filter = ContactFilter::from_params(Some("chen"), Some("gym"), Some("true"));
    let (matched, total) = list(&contacts, &filter, PageRequest::default());
    assert_eq!(total, 1);
    assert_eq!(matched[0].name, "Carla Chen");
}

#[test]
fn total_is_independent_of_page_and_limit() {
    let contacts = sample_contacts();
    let filter = ContactFilter::from_params(None, Some("work"), None);

    let (_, total_a) = list(&contacts, &filter, PageRequest::resolve(Some(1), Some(1)));
    let (_, total_b) = list(&contacts, &filter, PageRequest::resolve(Some(2), Some(2)));
    let (_, total_c) = list(&contacts, &filter, PageRequest::resolve(Some(9), Some(50)));
    assert_eq!(total_a, 3);
    assert_eq!(total_a, total_b);
    assert_eq!(total_a, total_c);
}

#[test]
fn page_beyond_total_pages_is_empty_with_same_total() {
    let contacts = sample_contacts();
    let filter = ContactFilter::default();
    let page = PageRequest::resolve(Some(5), Some(10));

    let (matched, total) = list(&contacts, &filter, page);
    assert!(matched.is_empty());
    assert_eq!(total, contacts.len() as i64);

    let meta = PageMeta::new(total, page.page, page.limit);
    assert_eq!(meta.total_pages, 1);
    assert!(page.page > meta.total_pages);
}

#[test]
fn pages_partition_the_match_set() {
    let contacts = sample_contacts();
    let filter = ContactFilter::default();

    let (first, total) = list(&contacts, &filter, PageRequest::resolve(Some(1), Some(3)));
    let (second, _) = list(&contacts, &filter, PageRequest::resolve(Some(2), Some(3)));
    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 1);
    assert_eq!(PageMeta::new(total, 1, 3).total_pages, 2);
}

#[test]
fn deleted_contact_disappears_from_search_results() {
    let mut contacts = sample_contacts();
    let filter = ContactFilter::from_params(Some("Ann Anderson"), None, None);

    let (matched, total) = list(&contacts, &filter, PageRequest::default());
    assert_eq!(total, 1);
    let deleted_id = matched[0].id;

    contacts.retain(|c| c.id != deleted_id);
    let (matched, total) = list(&contacts, &filter, PageRequest::default());
    assert!(matched.is_empty());
    assert_eq!(total, 0);
}
