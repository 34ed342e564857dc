//! Synthetic Slack export generator for stress testing slackpack.
//!
//! Usage: cargo run --features gen-fixture --bin gen_fixture -- [days] [messages_per_day] [output_dir]
//! Example: cargo run --features gen-fixture --bin gen_fixture -- 30 5000 heavy_export
//!
//! Produces `<output_dir>/users.json` and `<output_dir>/general/YYYY-MM-DD.json`,
//! with threads, reactions, file uploads (some deleted), shared messages and
//! link unfurls mixed in.

use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process;

use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};

const NAMES: &[&str] = &[
    "Alice Johnson",
    "Bob Smith",
    "Иван Петров",
    "村上 春樹",
    "محمد علي",
    "Zoë O'Brien",
    "🔥 Fire User 🔥",
    "Former Employee",
];

const WORDS: &[&str] = &[
    "deploy", "review", "lunch", "standup", "bug", "release", "hotfix", "ticket", "coffee",
    "meeting", "ship", "rollback", "🎉", "👀", "thanks", "today", "tomorrow", "merged",
];

const REACTIONS: &[&str] = &["thumbsup", "eyes", "tada", "heart", "joy", "rocket"];

const FILE_TYPES: &[(&str, &str)] = &[
    ("pdf", "PDF"),
    ("png", "PNG"),
    ("txt", "Plain Text"),
    ("xlsx", "Excel Spreadsheet"),
];

// 2025-01-01T00:00:00Z
const EPOCH_START: i64 = 1_735_689_600;

fn main() {
    let args: Vec<String> = env::args().collect();

    let days: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(7);
    let per_day: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1_000);
    let output = args.get(3).map(|s| s.as_str()).unwrap_or("synthetic_export");

    println!("🧪 Fixture Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Days:     {}", days);
    println!("   Per day:  {}", per_day);
    println!("   Output:   {}", output);
    println!();

    if let Err(e) = generate(Path::new(output), days, per_day) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn generate(root: &Path, days: usize, per_day: usize) -> std::io::Result<()> {
    let channel = root.join("general");
    fs::create_dir_all(&channel)?;

    let mut rng = rand::thread_rng();
    let user_ids: Vec<String> = (0..NAMES.len()).map(|i| format!("U{:08}", i + 1)).collect();

    write_json(&root.join("users.json"), &users(&user_ids))?;

    let start = std::time::Instant::now();
    let mut total = 0usize;

    for day in 0..days {
        let day_start = EPOCH_START + (day as i64) * 86_400;
        let date = chrono::DateTime::from_timestamp(day_start, 0)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("day-{day:04}"));

        let records = day_records(&mut rng, &user_ids, day_start, per_day);
        total += records.len();
        write_json(&channel.join(format!("{date}.json")), &Value::Array(records))?;

        let elapsed = start.elapsed().as_secs_f64();
        eprint!(
            "\r   Generated {}/{} days ({:.0} records/s)",
            day + 1,
            days,
            total as f64 / elapsed
        );
    }

    eprintln!();
    println!("✅ Done! {} records in {}", total, channel.display());
    Ok(())
}

fn users(user_ids: &[String]) -> Value {
    let entries: Vec<Value> = user_ids
        .iter()
        .zip(NAMES)
        .enumerate()
        .map(|(i, (id, name))| {
            json!({
                "id": id,
                "name": name.to_lowercase().replace(' ', "."),
                "deleted": i == NAMES.len() - 1,
                "profile": {"real_name": name, "display_name": ""}
            })
        })
        .collect();
    Value::Array(entries)
}

fn day_records<R: Rng>(rng: &mut R, user_ids: &[String], day_start: i64, count: usize) -> Vec<Value> {
    let mut records = Vec::with_capacity(count + count / 10);
    let mut second = 0i64;

    while records.len() < count {
        second += rng.gen_range(1..30);
        let ts = format!("{}.{:06}", day_start + second, rng.gen_range(0..1_000_000));
        let user = pick(rng, user_ids);
        let mut record = json!({
            "type": "message",
            "ts": ts,
            "user": user,
            "text": sentence(rng, user_ids),
        });

        match rng.gen_range(0..20) {
            0 => record["files"] = json!([file(rng, day_start + second)]),
            1 => record["attachments"] = json!([shared_message(rng, user_ids, day_start)]),
            2 => record["attachments"] = json!([unfurl(rng)]),
            3 => record["subtype"] = json!("channel_join"),
            _ => {}
        }

        if rng.gen_bool(0.15) {
            record["reactions"] = json!([reaction(rng, user_ids)]);
        }

        if rng.gen_bool(0.05) {
            let replies: Vec<Value> = (0..rng.gen_range(1..5))
                .map(|_| {
                    second += rng.gen_range(1..10);
                    json!({
                        "type": "message",
                        "ts": format!("{}.{:06}", day_start + second, rng.gen_range(0..1_000_000)),
                        "user": pick(rng, user_ids),
                        "text": sentence(rng, user_ids),
                        "thread_ts": ts,
                    })
                })
                .collect();

            record["thread_ts"] = json!(ts);
            record["reply_count"] = json!(replies.len());
            record["replies"] = Value::Array(
                replies
                    .iter()
                    .map(|r| json!({"user": r["user"], "ts": r["ts"]}))
                    .collect(),
            );
            records.push(record);
            records.extend(replies);
        } else {
            records.push(record);
        }
    }

    records
}

fn file<R: Rng>(rng: &mut R, created: i64) -> Value {
    if rng.gen_bool(0.2) {
        return json!({"id": "F0", "mode": "tombstone"});
    }
    let (ext, pretty) = FILE_TYPES.choose(rng).copied().unwrap_or(("txt", "Plain Text"));
    json!({
        "mode": "hosted",
        "timestamp": created,
        "name": format!("{}.{}", pick(rng, WORDS), ext),
        "pretty_type": pretty,
    })
}

fn shared_message<R: Rng>(rng: &mut R, user_ids: &[String], day_start: i64) -> Value {
    json!({
        "ts": format!("{}.000100", day_start - rng.gen_range(1..86_400)),
        "author_name": pick(rng, NAMES),
        "text": sentence(rng, user_ids),
    })
}

fn unfurl<R: Rng>(rng: &mut R) -> Value {
    let word = pick(rng, WORDS);
    json!({
        "from_url": format!("https://example.com/{word}"),
        "fallback": format!("Example: {word}"),
        "text": format!("All about {word}"),
    })
}

fn reaction<R: Rng>(rng: &mut R, user_ids: &[String]) -> Value {
    let amount = rng.gen_range(1..4);
    let users: Vec<&String> = user_ids.choose_multiple(rng, amount).collect();
    json!({
        "name": pick(rng, REACTIONS),
        "count": users.len(),
        "users": users,
    })
}

fn sentence<R: Rng>(rng: &mut R, user_ids: &[String]) -> String {
    let mut words: Vec<String> = (0..rng.gen_range(1..12))
        .map(|_| pick(rng, WORDS).to_string())
        .collect();
    if rng.gen_bool(0.3) {
        words.push(format!("<@{}>", pick(rng, user_ids)));
    }
    words.join(" ")
}

fn pick<'a, R: Rng, T: AsRef<str>>(rng: &mut R, items: &'a [T]) -> &'a str {
    items.choose(rng).map(|item| item.as_ref()).unwrap_or_default()
}

fn write_json(path: &Path, value: &Value) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()
}
