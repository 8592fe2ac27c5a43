//! Synthetic deliveries for seeding a store with something to look at.
//!
//! Records are backdated: `created_at` and `updated_at` are midnight UTC of
//! the delivery date, so a seeded store looks like a month of real use.

use crate::types::{Delivery, DeliveryId, Material, MaterialType, WeightUnit, format_date};
use chrono::{Days, NaiveDate, NaiveTime};
use rand::Rng;
use rand::seq::SliceRandom;

/// Default number of records in a demo batch.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Default number of calendar days, counting back from today, that demo
/// dates are drawn from.
pub const DEFAULT_WINDOW_DAYS: u32 = 28;

pub const DEMO_ID_PREFIX: &str = "demo";

pub const DEMO_NOTE: &str = "Coleta realizada com sucesso.";

/// (class id, class name)
pub const CLASSES: [(&str, &str); 5] = [
    ("class1", "3º Ano A"),
    ("class2", "2º Ano B"),
    ("class3", "1º Ano C"),
    ("class4", "4º Ano A"),
    ("class5", "5º Ano B"),
];

pub const UNITS: [&str; 4] = [
    "Unidade Norte",
    "Unidade Sul",
    "Unidade Leste",
    "Unidade Oeste",
];

const MAX_MATERIALS: usize = 3;
const NOTE_PROBABILITY: f64 = 0.3;

/// Parameters for a demo batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoOptions {
    pub count: usize,
    pub window_days: u32,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            count: DEFAULT_BATCH_SIZE,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

/// Generates `count` deliveries dated within the last 28 days up to `today`.
pub fn generate<R: Rng + ?Sized>(count: usize, today: NaiveDate, rng: &mut R) -> Vec<Delivery> {
    generate_with(
        DemoOptions {
            count,
            ..DemoOptions::default()
        },
        today,
        rng,
    )
}

/// Generates a batch according to `options`. A zero window is treated as one
/// day (today only).
pub fn generate_with<R: Rng + ?Sized>(
    options: DemoOptions,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<Delivery> {
    let window = u64::from(options.window_days.max(1));
    (0..options.count)
        .map(|_| {
            let back = rng.gen_range(0..window);
            let date = today.checked_sub_days(Days::new(back)).unwrap_or(today);
            demo_delivery(date, rng)
        })
        .collect()
}

fn demo_delivery<R: Rng + ?Sized>(date: NaiveDate, rng: &mut R) -> Delivery {
    let (class_id, class_name) = CLASSES[rng.gen_range(0..CLASSES.len())];
    let unit = UNITS[rng.gen_range(0..UNITS.len())];

    let material_count = rng.gen_range(1..=MAX_MATERIALS);
    let materials = (0..material_count).map(|_| demo_material(rng)).collect();

    let notes = rng.gen_bool(NOTE_PROBABILITY).then(|| DEMO_NOTE.to_string());
    let stamp = date.and_time(NaiveTime::MIN).and_utc();

    Delivery {
        id: DeliveryId::generate(DEMO_ID_PREFIX),
        date: format_date(date),
        class_id: class_id.to_string(),
        class_name: class_name.to_string(),
        unit: unit.to_string(),
        materials,
        notes,
        created_at: stamp,
        updated_at: stamp,
    }
}

fn demo_material<R: Rng + ?Sized>(rng: &mut R) -> Material {
    let material_type = *MaterialType::ALL
        .choose(rng)
        .unwrap_or(&MaterialType::Other);

    if rng.gen_bool(0.5) {
        // Tenths of a kilogram, 0.1 to 10.0.
        let tenths: u32 = rng.gen_range(1..=100);
        Material::new(material_type, f64::from(tenths) / 10.0, WeightUnit::Kilogram)
    } else {
        let grams: u32 = rng.gen_range(1..=5000);
        Material::new(material_type, f64::from(grams), WeightUnit::Gram)
    }
}
