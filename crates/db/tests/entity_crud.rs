//! Integration tests for contact, property and clock CRUD.
//!
//! Exercises the repository layer against a fresh SQLite database:
//! - Create the full hierarchy (contact -> property -> clock -> inspection)
//! - Cascade delete behaviour
//! - Unique and foreign key constraint violations
//! - Update, ordering and filtered list operations

use clockcheck_db::models::clock::ClockFields;
use clockcheck_db::models::contact::ContactFields;
use clockcheck_db::models::inspection::{InspectionFilter, NewInspection};
use clockcheck_db::models::property::PropertyFields;
use clockcheck_db::repositories::{ClockRepo, ContactRepo, InspectionRepo, PropertyRepo};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_contact(name: &str) -> ContactFields {
    ContactFields {
        name: name.to_string(),
        phone: "555-0100".to_string(),
        email: String::new(),
        organization: String::new(),
    }
}

fn new_property(contact_id: i64, name: &str, address: &str) -> PropertyFields {
    PropertyFields {
        contact_id,
        name: name.to_string(),
        address: address.to_string(),
        city: String::new(),
        state: String::new(),
        postal_code: String::new(),
        notes: String::new(),
    }
}

fn new_clock(property_id: i64, label: &str) -> ClockFields {
    ClockFields {
        property_id,
        label: label.to_string(),
        manufacturer: "Hunter".to_string(),
        model: String::new(),
        station_count: 8,
        location: String::new(),
        notes: String::new(),
    }
}

fn new_inspection(clock_id: i64) -> NewInspection {
    NewInspection {
        clock_id,
        started_at: None,
        summary: String::new(),
        notes: String::new(),
    }
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_contact_crud(pool: SqlitePool) {
    let created = ContactRepo::create(&pool, &new_contact("Acme")).await.unwrap();
    assert_eq!(created.name, "Acme");
    assert_eq!(created.phone, "555-0100");
    assert_eq!(created.created_at, created.updated_at);

    let found = ContactRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert!(ContactRepo::exists(&pool, created.id).await.unwrap());

    let mut changes = new_contact("Acme Irrigation");
    changes.email = "ops@acme.test".to_string();
    let updated = ContactRepo::update(&pool, created.id, &changes)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Acme Irrigation");
    assert_eq!(updated.email, "ops@acme.test");
    assert!(updated.updated_at >= created.updated_at);

    assert!(ContactRepo::delete(&pool, created.id).await.unwrap());
    assert!(ContactRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
    assert!(!ContactRepo::exists(&pool, created.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_contact_operations(pool: SqlitePool) {
    assert!(ContactRepo::find_by_id(&pool, 999).await.unwrap().is_none());
    assert!(ContactRepo::update(&pool, 999, &new_contact("Nobody"))
        .await
        .unwrap()
        .is_none());
    assert!(!ContactRepo::delete(&pool, 999).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_contacts_sorted_case_insensitively(pool: SqlitePool) {
    for name in ["bravo", "Alpha", "charlie"] {
        ContactRepo::create(&pool, &new_contact(name)).await.unwrap();
    }

    let names: Vec<String> = ContactRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "bravo", "charlie"]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_property_includes_contact_details(pool: SqlitePool) {
    let contact = ContactRepo::create(&pool, &new_contact("Acme")).await.unwrap();
    let property = PropertyRepo::create(&pool, &new_property(contact.id, "Site A", "1 Main St"))
        .await
        .unwrap();

    assert_eq!(property.contact_id, contact.id);
    assert_eq!(property.contact_name, "Acme");
    assert_eq!(property.contact_phone, "555-0100");

    let json = serde_json::to_value(&property).unwrap();
    assert_eq!(json["contactName"], "Acme");
    assert_eq!(json["postal_code"], "");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_address_is_unique_violation(pool: SqlitePool) {
    let contact = ContactRepo::create(&pool, &new_contact("Acme")).await.unwrap();
    PropertyRepo::create(&pool, &new_property(contact.id, "Site A", "1 Main St"))
        .await
        .unwrap();

    let err = PropertyRepo::create(&pool, &new_property(contact.id, "Site B", "1 Main St"))
        .await
        .unwrap_err();
    assert!(clockcheck_db::is_unique_violation(&err), "got {err:?}");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_to_taken_address_is_unique_violation(pool: SqlitePool) {
    let contact = ContactRepo::create(&pool, &new_contact("Acme")).await.unwrap();
    PropertyRepo::create(&pool, &new_property(contact.id, "Site A", "1 Main St"))
        .await
        .unwrap();
    let second = PropertyRepo::create(&pool, &new_property(contact.id, "Site B", "2 Main St"))
        .await
        .unwrap();

    let err = PropertyRepo::update(
        &pool,
        second.id,
        &new_property(contact.id, "Site B", "1 Main St"),
    )
    .await
    .unwrap_err();
    assert!(clockcheck_db::is_unique_violation(&err));

    // Keeping its own address is fine.
    let same = PropertyRepo::update(
        &pool,
        second.id,
        &new_property(contact.id, "Site B renamed", "2 Main St"),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(same.name, "Site B renamed");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_property_with_missing_contact_is_fk_violation(pool: SqlitePool) {
    let err = PropertyRepo::create(&pool, &new_property(424242, "Orphan", "9 Nowhere Rd"))
        .await
        .unwrap_err();
    assert!(clockcheck_db::is_foreign_key_violation(&err), "got {err:?}");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_property_list_filters_by_contact(pool: SqlitePool) {
    let acme = ContactRepo::create(&pool, &new_contact("Acme")).await.unwrap();
    let other = ContactRepo::create(&pool, &new_contact("Other")).await.unwrap();
    PropertyRepo::create(&pool, &new_property(acme.id, "zeta", "1 A St"))
        .await
        .unwrap();
    PropertyRepo::create(&pool, &new_property(acme.id, "Alpha", "2 A St"))
        .await
        .unwrap();
    PropertyRepo::create(&pool, &new_property(other.id, "Beta", "3 A St"))
        .await
        .unwrap();

    let all = PropertyRepo::list(&pool, None).await.unwrap();
    assert_eq!(all.len(), 3);

    let names: Vec<String> = PropertyRepo::list(&pool, Some(acme.id))
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "zeta"]);
}

// ---------------------------------------------------------------------------
// Clocks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_clock_crud_and_join(pool: SqlitePool) {
    let contact = ContactRepo::create(&pool, &new_contact("Acme")).await.unwrap();
    let property = PropertyRepo::create(&pool, &new_property(contact.id, "Site A", "1 Main St"))
        .await
        .unwrap();

    let clock = ClockRepo::create(&pool, &new_clock(property.id, "Zone A"))
        .await
        .unwrap();
    assert_eq!(clock.station_count, 8);
    assert_eq!(clock.property_name, "Site A");
    assert_eq!(clock.property_address, "1 Main St");
    assert_eq!(clock.contact_name, "Acme");

    let mut changes = new_clock(property.id, "Zone A (front)");
    changes.station_count = 12;
    let updated = ClockRepo::update(&pool, clock.id, &changes).await.unwrap().unwrap();
    assert_eq!(updated.label, "Zone A (front)");
    assert_eq!(updated.station_count, 12);

    assert!(ClockRepo::exists(&pool, clock.id).await.unwrap());
    assert!(ClockRepo::delete(&pool, clock.id).await.unwrap());
    assert!(!ClockRepo::delete(&pool, clock.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_clock_list_filters_by_property(pool: SqlitePool) {
    let contact = ContactRepo::create(&pool, &new_contact("Acme")).await.unwrap();
    let a = PropertyRepo::create(&pool, &new_property(contact.id, "Site A", "1 Main St"))
        .await
        .unwrap();
    let b = PropertyRepo::create(&pool, &new_property(contact.id, "Site B", "2 Main St"))
        .await
        .unwrap();
    ClockRepo::create(&pool, &new_clock(a.id, "zone b")).await.unwrap();
    ClockRepo::create(&pool, &new_clock(a.id, "Zone A")).await.unwrap();
    ClockRepo::create(&pool, &new_clock(b.id, "Zone C")).await.unwrap();

    let labels: Vec<String> = ClockRepo::list(&pool, Some(a.id))
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.label)
        .collect();
    assert_eq!(labels, vec!["Zone A", "zone b"]);
    assert_eq!(ClockRepo::list(&pool, None).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_non_positive_station_count_fails_check(pool: SqlitePool) {
    let contact = ContactRepo::create(&pool, &new_contact("Acme")).await.unwrap();
    let property = PropertyRepo::create(&pool, &new_property(contact.id, "Site A", "1 Main St"))
        .await
        .unwrap();

    let mut fields = new_clock(property.id, "Zone A");
    fields.station_count = 0;
    assert!(ClockRepo::create(&pool, &fields).await.is_err());
}

// ---------------------------------------------------------------------------
// Cascade delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_contact_delete_cascades_through_hierarchy(pool: SqlitePool) {
    let contact = ContactRepo::create(&pool, &new_contact("Acme")).await.unwrap();
    let keeper = ContactRepo::create(&pool, &new_contact("Keeper")).await.unwrap();

    for (i, owner) in [contact.id, contact.id, keeper.id].into_iter().enumerate() {
        let property = PropertyRepo::create(
            &pool,
            &new_property(owner, &format!("Site {i}"), &format!("{i} Main St")),
        )
        .await
        .unwrap();
        for label in ["Zone A", "Zone B"] {
            let clock = ClockRepo::create(&pool, &new_clock(property.id, label))
                .await
                .unwrap();
            InspectionRepo::start(&pool, &new_inspection(clock.id))
                .await
                .unwrap()
                .unwrap();
        }
    }

    assert_eq!(count(&pool, "properties").await, 3);
    assert_eq!(count(&pool, "clocks").await, 6);
    assert_eq!(count(&pool, "inspections").await, 6);

    assert!(ContactRepo::delete(&pool, contact.id).await.unwrap());

    assert!(PropertyRepo::list(&pool, Some(contact.id)).await.unwrap().is_empty());
    assert_eq!(count(&pool, "properties").await, 1);
    assert_eq!(count(&pool, "clocks").await, 2);
    assert_eq!(count(&pool, "inspections").await, 2);

    let remaining = InspectionRepo::list(&pool, &InspectionFilter::default())
        .await
        .unwrap();
    assert!(remaining.iter().all(|i| i.contact_name == "Keeper"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_property_delete_cascades_to_clocks_and_inspections(pool: SqlitePool) {
    let contact = ContactRepo::create(&pool, &new_contact("Acme")).await.unwrap();
    let property = PropertyRepo::create(&pool, &new_property(contact.id, "Site A", "1 Main St"))
        .await
        .unwrap();
    let clock = ClockRepo::create(&pool, &new_clock(property.id, "Zone A"))
        .await
        .unwrap();
    let inspection = InspectionRepo::start(&pool, &new_inspection(clock.id))
        .await
        .unwrap()
        .unwrap();

    assert!(PropertyRepo::delete(&pool, property.id).await.unwrap());

    assert!(ContactRepo::exists(&pool, contact.id).await.unwrap());
    assert!(ClockRepo::find_by_id(&pool, clock.id).await.unwrap().is_none());
    assert!(InspectionRepo::find_by_id(&pool, inspection.id)
        .await
        .unwrap()
        .is_none());
}
