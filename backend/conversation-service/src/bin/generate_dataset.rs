/// Synthetic dataset generator for the conversation store.
///
/// Writes two CSV files ready for `load-dataset`:
/// - `contacts.csv`: `name,phone_number` with globally-unique 8-digit phones
/// - `messages.csv`: `from_contact_id,to_contact_id,content,created_at` with
///   distinct endpoints drawn from `1..=CONTACTS_SIZE` (ids of a freshly
///   loaded contacts table)
///
/// Message bodies are drawn from `message_content.csv` in the data directory
/// when present, otherwise from a built-in template list.
///
/// Environment:
/// - `DATA_DIR` (default `./data`)
/// - `CONTACTS_SIZE` (default 100_000)
/// - `TOTAL_MESSAGES` (default 5_000_000)
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use rand::Rng;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

const DEFAULT_CONTACTS_SIZE: u64 = 100_000;
const DEFAULT_TOTAL_MESSAGES: u64 = 5_000_000;
const PROGRESS_EVERY: u64 = 500_000;

const FIRST_NAMES: &[&str] = &[
    "Aaron", "Alice", "Amir", "Ana", "Ben", "Bob", "Cara", "Chen", "Daniel", "Dewi", "Elena",
    "Farah", "Gabriel", "Hana", "Ivan", "Jia", "Kumar", "Leila", "Marco", "Mei", "Nadia", "Omar",
    "Priya", "Quentin", "Rafael", "Sofia", "Tariq", "Uma", "Victor", "Wei", "Xin", "Yusuf", "Zara",
];

const LAST_NAMES: &[&str] = &[
    "Abdullah", "Anderson", "Chan", "Chen", "Das", "Fernandez", "Garcia", "Hassan", "Ibrahim",
    "Johnson", "Kim", "Kumar", "Lee", "Lim", "Martin", "Muller", "Nguyen", "Novak", "Ong", "Patel",
    "Rahman", "Rossi", "Santos", "Sato", "Singh", "Smith", "Tan", "Tanaka", "Wang", "Wong", "Yang",
    "Zhang",
];

const DEFAULT_TEMPLATES: &[&str] = &[
    "Hey, are you free later?",
    "Running late, be there in 10.",
    "Did you see the update?",
    "Thanks, that worked!",
    "Can you call me when you get this?",
    "Lunch tomorrow?",
    "Sent you the document just now.",
    "Happy birthday!",
    "Let me check and get back to you.",
    "Where should we meet?",
    "Sounds good to me.",
    "I'll take care of it.",
    "Meeting moved to 3pm.",
    "On my way.",
    "Got it, thanks.",
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let contacts_size = env_u64("CONTACTS_SIZE", DEFAULT_CONTACTS_SIZE);
    let total_messages = env_u64("TOTAL_MESSAGES", DEFAULT_TOTAL_MESSAGES);

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir))?;

    generate_contacts(&data_dir, contacts_size)?;
    generate_messages(&data_dir, contacts_size, total_messages)?;

    Ok(())
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn generate_contacts(data_dir: &str, count: u64) -> Result<()> {
    let path = Path::new(data_dir).join("contacts.csv");
    info!(count, path = %path.display(), "generating contacts CSV");

    let mut writer = BufWriter::new(File::create(&path)?);
    let mut rng = rand::thread_rng();
    let mut phones: HashSet<u32> = HashSet::with_capacity(count as usize);

    for _ in 0..count {
        // 8-digit phone, unique across the whole file
        let phone = loop {
            let candidate: u32 = rng.gen_range(10_000_000..=99_999_999);
            if phones.insert(candidate) {
                break candidate;
            }
        };

        let name = format!(
            "{} {}",
            FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())],
            LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())]
        );

        writeln!(writer, "{},{}", name, phone)?;
    }

    writer.flush()?;
    info!("contacts CSV written");
    Ok(())
}

fn generate_messages(data_dir: &str, contacts_size: u64, total: u64) -> Result<()> {
    let templates = load_templates(data_dir)?;
    let path = Path::new(data_dir).join("messages.csv");
    info!(total, path = %path.display(), "generating messages CSV");

    let mut writer = BufWriter::new(File::create(&path)?);
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    for i in 1..=total {
        let from = rng.gen_range(1..=contacts_size);
        let to = loop {
            let candidate = rng.gen_range(1..=contacts_size);
            if candidate != from {
                break candidate;
            }
        };

        let body = &templates[rng.gen_range(0..templates.len())];
        let escaped = body.replace('"', "\"\"");
        // Spread timestamps over the past year so recency ordering is
        // meaningful
        let created_at = now - Duration::seconds(rng.gen_range(0..365 * 24 * 3600i64));

        writeln!(
            writer,
            "{},{},\"{}\",{}",
            from,
            to,
            escaped,
            created_at.to_rfc3339()
        )?;

        if i % PROGRESS_EVERY == 0 {
            info!(generated = i, "still writing messages");
        }
    }

    writer.flush()?;
    info!("messages CSV written");
    Ok(())
}

fn load_templates(data_dir: &str) -> Result<Vec<String>> {
    let path = Path::new(data_dir).join("message_content.csv");
    if !path.exists() {
        info!("no message_content.csv found, using built-in templates");
        return Ok(DEFAULT_TEMPLATES.iter().map(|s| s.to_string()).collect());
    }

    let reader = BufReader::new(
        File::open(&path).with_context(|| format!("failed to open {}", path.display()))?,
    );
    let mut templates = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            templates.push(trimmed.to_string());
        }
    }

    anyhow::ensure!(
        !templates.is_empty(),
        "message_content.csv exists but contains no usable lines"
    );
    info!(count = templates.len(), "loaded message templates");
    Ok(templates)
}
