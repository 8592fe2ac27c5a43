//! Populates a recyclafy data directory with demo deliveries and prints the summary.
//!
//! Run with: `cargo run -q --example seed_data -p recyclafy_core [DATA_DIR]`

use chrono::Utc;
use recyclafy_core::RecyclafyCore;
use recyclafy_core::demo::DemoOptions;
use recyclafy_core::types::{AppConfig, Config};
use std::path::PathBuf;

fn main() {
    let base_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(get_default_data_path);
    println!("Using data path: {}", base_path.display());

    let app_config = AppConfig::load(&AppConfig::path(&base_path))
        .expect("Failed to load config.toml")
        .with_defaults_for_invalid();
    let config = Config {
        base_path,
        write_mode: app_config.store.write_mode,
    };

    let core = RecyclafyCore::open(config).expect("Failed to open recyclafy database");
    let options = DemoOptions {
        count: app_config.demo.batch_size,
        window_days: app_config.demo.window_days,
    };

    let today = Utc::now().date_naive();
    let seeded = core
        .add_demo_data(options, today, &mut rand::thread_rng())
        .expect("Failed to seed demo data");
    println!("\n[Seeded {} deliveries]", seeded);

    let summary = core.summary().expect("Failed to summarize");
    println!("\nTotal recycled: {:.2} kg", summary.total_recycled);

    println!("\n[Materials]");
    for (material, total) in &summary.material_breakdown {
        println!("  {:<12} {:>8.2} kg", material, total);
    }

    println!("\n[Top classes]");
    for class in &summary.top_classes {
        println!("  {:<10} {:>8.2} kg", class.class_name, class.total);
    }

    println!("\n[Weekly progress]");
    for week in &summary.weekly_progress {
        println!("  {} {:>8.2} kg", week.week_start_date, week.total);
    }
}

fn get_default_data_path() -> PathBuf {
    std::env::temp_dir().join("recyclafy-demo")
}
