use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::Rng;
use shared::Contact;
use sqlx::PgPool;

const FIRST_NAMES: &[&str] = &[
    "Ann", "Ben", "Carla", "Derek", "Elena", "Felix", "Grace", "Hugo", "Iris", "Jonas", "Katya",
    "Liam", "Mona", "Nadia", "Oscar", "Priya", "Quentin", "Rosa", "Sven", "Tara",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Baker", "Chen", "Dubois", "Eriksen", "Fischer", "Garcia", "Hansen", "Ito",
    "Jensen", "Kovacs", "Larsen", "Moreau", "Novak", "Okafor", "Petrov", "Quinn", "Rossi",
    "Sato", "Tanaka",
];

const COMPANIES: &[&str] = &[
    "Acme Corp",
    "Blue Harbor Logistics",
    "Cedar & Pine Studio",
    "Driftwood Analytics",
    "Evergreen Supply Co",
    "Foxglove Labs",
    "Granite Peak Consulting",
    "Harborlight Media",
];

const CITIES: &[&str] = &[
    "12 Elm Street, Springfield",
    "48 Harbor Road, Portsmouth",
    "7 Birchwood Lane, Riverton",
    "231 Main Street, Fairview",
    "99 Sunset Avenue, Lakewood",
];

const TAG_POOL: &[&str] = &[
    "work", "friends", "family", "client", "vendor", "gym", "book-club", "neighbor",
];

const NOTES: &[&str] = &[
    "Met at the industry meetup last spring.",
    "Prefers email over phone calls.",
    "Follow up about the quarterly order.",
    "Knows the building manager.",
];

/// Inserts `count` generated contacts and returns them as stored. Phone
/// numbers carry the row index so the unique constraint never trips.
pub async fn seed_contacts(pool: &PgPool, rng: &mut StdRng, count: usize) -> Result<Vec<Contact>> {
    let mut contacts = Vec::with_capacity(count);

    for i in 0..count {
        let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
        let name = format!("{first} {last}");
        let email = format!("{}.{}{}@example.com", first.to_lowercase(), last.to_lowercase(), i);
        let phone = format!("+1-555-{:04}", i);
        let address = CITIES[rng.gen_range(0..CITIES.len())].to_string();
        let company = COMPANIES[rng.gen_range(0..COMPANIES.len())].to_string();
        let notes = if rng.gen_bool(0.5) {
            Some(NOTES[rng.gen_range(0..NOTES.len())].to_string())
        } else {
            None
        };

        let tag_count = rng.gen_range(0..4);
        let mut tags: Vec<String> = Vec::with_capacity(tag_count);
        for _ in 0..tag_count {
            let tag = TAG_POOL[rng.gen_range(0..TAG_POOL.len())].to_string();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let is_favorite = rng.gen_bool(0.25);

        let contact = sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (name, email, phone, address, company, notes, tags, is_favorite) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(&name)
        .bind(&email)
        .bind(&phone)
        .bind(&address)
        .bind(&company)
        .bind(&notes)
        .bind(&tags)
        .bind(is_favorite)
        .fetch_one(pool)
        .await
        .with_context(|| format!("Failed to insert contact {name}"))?;

        contacts.push(contact);
    }

    Ok(contacts)
}
