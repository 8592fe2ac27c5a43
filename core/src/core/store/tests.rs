use super::*;
use crate::core::db::MemoryMedium;
use crate::types::{Material, MaterialType, WeightUnit, format_date};
use chrono::{NaiveDate, TimeZone};

mod common {
    use super::*;

    pub(super) fn create_test_store(write_mode: WriteMode) -> DeliveryStore<MemoryMedium> {
        DeliveryStore::new(MemoryMedium::new(), write_mode)
    }

    pub(super) fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 7, 9, 0, 0).unwrap()
    }

    pub(super) fn new_delivery(class_id: &str) -> NewDelivery {
        NewDelivery {
            date: "2024-05-07".to_string(),
            class_id: class_id.to_string(),
            class_name: format!("Class {class_id}"),
            unit: "Unidade Norte".to_string(),
            materials: vec![Material::new(MaterialType::Paper, 2.0, WeightUnit::Kilogram)],
            notes: Some("first run".to_string()),
        }
    }
}

mod validation {
    use super::common::new_delivery;
    use super::*;

    #[test]
    fn test_accepts_complete_delivery() {
        validate(&new_delivery("class1")).unwrap();
    }

    #[test]
    fn test_names_the_missing_field() {
        let cases: [(&str, fn(&mut NewDelivery)); 4] = [
            ("date", |d| d.date.clear()),
            ("classId", |d| d.class_id.clear()),
            ("className", |d| d.class_name = "   ".to_string()),
            ("unit", |d| d.unit.clear()),
        ];

        for (field, blank) in cases {
            let mut delivery = new_delivery("class1");
            blank(&mut delivery);
            assert_eq!(
                validate(&delivery),
                Err(ValidationError::MissingField(field)),
                "field {field}"
            );
        }
    }

    #[test]
    fn test_rejects_empty_materials() {
        let mut delivery = new_delivery("class1");
        delivery.materials.clear();
        assert_eq!(validate(&delivery), Err(ValidationError::NoMaterials));
        assert_eq!(ValidationError::NoMaterials.to_string(), "no materials");
    }

    #[test]
    fn test_rejects_non_positive_quantities() {
        for quantity in [0.0, -1.0, f64::INFINITY] {
            let mut delivery = new_delivery("class1");
            delivery
                .materials
                .push(Material::new(MaterialType::Glass, quantity, WeightUnit::Gram));
            assert_eq!(
                validate(&delivery),
                Err(ValidationError::NonPositiveQuantity { index: 1, quantity })
            );
        }
    }

    #[test]
    fn test_rejects_nan_quantity() {
        let mut delivery = new_delivery("class1");
        delivery.materials[0].quantity = f64::NAN;
        assert!(matches!(
            validate(&delivery),
            Err(ValidationError::NonPositiveQuantity { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_unparseable_date() {
        let mut delivery = new_delivery("class1");
        delivery.date = "yesterday".to_string();
        assert_eq!(
            validate(&delivery),
            Err(ValidationError::InvalidDate("yesterday".to_string()))
        );
    }

    #[test]
    fn test_rejects_date_without_a_week_start() {
        let mut delivery = new_delivery("class1");
        delivery.date = format_date(NaiveDate::MIN);
        assert!(parse_date(&delivery.date).is_some());

        assert_eq!(
            validate(&delivery),
            Err(ValidationError::InvalidDate(delivery.date.clone()))
        );
    }
}

mod append {
    use super::common::{create_test_store, new_delivery, now};
    use super::*;

    #[test]
    fn test_append_assigns_id_and_timestamps() {
        let store = create_test_store(WriteMode::Unguarded);

        let delivery = store.append(new_delivery("class1"), now()).unwrap();

        assert!(delivery.id.starts_with("delivery-"));
        assert_eq!(delivery.created_at, now());
        assert_eq!(delivery.updated_at, now());
        assert_eq!(delivery.class_id, "class1");
        assert_eq!(delivery.notes.as_deref(), Some("first run"));
    }

    #[test]
    fn test_append_preserves_order() {
        let store = create_test_store(WriteMode::Unguarded);

        for class_id in ["c", "a", "b"] {
            store.append(new_delivery(class_id), now()).unwrap();
        }

        let classes: Vec<String> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|d| d.class_id)
            .collect();
        assert_eq!(classes, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_rejected_append_leaves_store_unchanged() {
        let store = create_test_store(WriteMode::Unguarded);
        store.append(new_delivery("class1"), now()).unwrap();
        let before = store.medium().load(DELIVERIES_KEY).unwrap();

        let mut invalid = new_delivery("class2");
        invalid.materials.clear();
        let err = store.append(invalid, now()).unwrap_err();

        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::NoMaterials)
        ));
        assert_eq!(store.medium().load(DELIVERIES_KEY).unwrap(), before);
    }

    #[test]
    fn test_rejected_append_on_empty_store_writes_nothing() {
        let store = create_test_store(WriteMode::Serialized);

        let mut invalid = new_delivery("class1");
        invalid.unit.clear();
        store.append(invalid, now()).unwrap_err();

        assert!(store.medium().load(DELIVERIES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_list_all_is_a_snapshot() {
        let store = create_test_store(WriteMode::Unguarded);
        store.append(new_delivery("class1"), now()).unwrap();

        let mut listed = store.list_all().unwrap();
        listed.clear();

        assert_eq!(store.list_all().unwrap().len(), 1);
    }
}

mod clear_and_seed {
    use super::common::{create_test_store, new_delivery, now};
    use super::*;

    #[test]
    fn test_clear_is_idempotent() {
        let store = create_test_store(WriteMode::Unguarded);
        store.append(new_delivery("class1"), now()).unwrap();

        store.clear().unwrap();
        assert!(store.list_all().unwrap().is_empty());

        store.clear().unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_seed_replaces_collection_verbatim() {
        let store = create_test_store(WriteMode::Unguarded);
        store.append(new_delivery("old"), now()).unwrap();

        let seeded: Vec<Delivery> = ["x", "y"]
            .into_iter()
            .map(|class_id| {
                Delivery::from_new(
                    new_delivery(class_id),
                    DeliveryId::try_from(format!("demo-{class_id}")).unwrap(),
                    now(),
                )
            })
            .collect();
        store.seed(&seeded).unwrap();

        assert_eq!(store.list_all().unwrap(), seeded);
    }

    #[test]
    fn test_seed_does_not_apply_submission_rules() {
        let store = create_test_store(WriteMode::Unguarded);
        let mut record = Delivery::from_new(
            new_delivery("class1"),
            DeliveryId::generate("demo"),
            now(),
        );
        record.date = "not-a-date".to_string();

        store.seed(std::slice::from_ref(&record)).unwrap();

        assert_eq!(store.list_all().unwrap(), vec![record]);
    }

    #[test]
    fn test_seed_refuses_non_finite_quantity() {
        let store = create_test_store(WriteMode::Unguarded);
        let kept = store.append(new_delivery("class1"), now()).unwrap();
        let mut record = Delivery::from_new(
            new_delivery("class2"),
            DeliveryId::generate("demo"),
            now(),
        );
        record.materials[0].quantity = f64::NAN;
        let id = record.id.to_string();

        let err = store.seed(&[record]).unwrap_err();

        assert!(matches!(
            err,
            StoreError::NonFiniteQuantity { id: ref got, quantity } if *got == id && quantity.is_nan()
        ));
        assert_eq!(store.list_all().unwrap(), vec![kept]);
    }

    #[test]
    fn test_corrupt_document_is_reported() {
        let store = create_test_store(WriteMode::Unguarded);
        store.medium().store(DELIVERIES_KEY, "{not json").unwrap();

        assert!(matches!(store.list_all(), Err(StoreError::Corrupt(_))));
        assert!(matches!(
            store.append(new_delivery("class1"), now()),
            Err(StoreError::Corrupt(_))
        ));
        // The unreadable document is left as it was.
        assert_eq!(
            store.medium().load(DELIVERIES_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }
}

mod write_modes {
    use super::common::{new_delivery, now};
    use super::*;
    use crate::core::db::error::DatabaseError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    /// Holds the first `gated` loads at a barrier so that concurrent
    /// appends are guaranteed to read the same collection.
    struct GatedMedium {
        inner: MemoryMedium,
        gate: Barrier,
        gated: usize,
        loads: AtomicUsize,
    }

    impl DocumentMedium for GatedMedium {
        fn load(&self, key: &str) -> Result<Option<String>, DatabaseError> {
            let document = self.inner.load(key)?;
            if self.loads.fetch_add(1, Ordering::SeqCst) < self.gated {
                self.gate.wait();
            }
            Ok(document)
        }

        fn store(&self, key: &str, document: &str) -> Result<(), DatabaseError> {
            self.inner.store(key, document)
        }

        fn remove(&self, key: &str) -> Result<(), DatabaseError> {
            self.inner.remove(key)
        }
    }

    /// Widens the window between read and write.
    struct SlowMedium(MemoryMedium);

    impl DocumentMedium for SlowMedium {
        fn load(&self, key: &str) -> Result<Option<String>, DatabaseError> {
            let document = self.0.load(key)?;
            thread::sleep(Duration::from_millis(5));
            Ok(document)
        }

        fn store(&self, key: &str, document: &str) -> Result<(), DatabaseError> {
            self.0.store(key, document)
        }

        fn remove(&self, key: &str) -> Result<(), DatabaseError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn test_default_mode_is_unguarded() {
        assert_eq!(WriteMode::default(), WriteMode::Unguarded);
    }

    #[test]
    fn test_unguarded_concurrent_appends_lose_an_update() {
        let medium = GatedMedium {
            inner: MemoryMedium::new(),
            gate: Barrier::new(2),
            gated: 2,
            loads: AtomicUsize::new(0),
        };
        let store = Arc::new(DeliveryStore::new(medium, WriteMode::Unguarded));

        let handles: Vec<_> = ["class1", "class2"]
            .into_iter()
            .map(|class_id| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.append(new_delivery(class_id), now()).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Both appends succeeded, but both read the empty collection and
        // the second write replaced the first.
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_serialized_concurrent_appends_keep_every_update() {
        const WRITERS: usize = 8;
        let store = Arc::new(DeliveryStore::new(
            SlowMedium(MemoryMedium::new()),
            WriteMode::Serialized,
        ));

        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .append(new_delivery(&format!("class{i}")), now())
                        .unwrap()
                })
            })
            .collect();
        let appended: Vec<Delivery> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let stored = store.list_all().unwrap();
        assert_eq!(stored.len(), WRITERS);
        for delivery in appended {
            assert!(stored.iter().any(|d| d.id == delivery.id));
        }
    }
}
