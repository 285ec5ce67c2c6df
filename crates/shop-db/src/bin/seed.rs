//! # seed
//!
//! Fills an empty users database with demo names for local development.
//!
//! ```bash
//! cargo run -p shop-db --bin seed
//! cargo run -p shop-db --bin seed -- --db ./database/users.db --count 25
//! ```
//!
//! Names repeat with a round suffix ("Alice 2") past the tenth user. A
//! database that already holds users is left alone.

use shop_db::{Database, DbConfig};

const DEMO_USERS: [&str; 10] = [
    "Alice", "Bob", "Carol", "Dave", "Eve", "Frank", "Grace", "Heidi", "Ivan", "Judy",
];

const DEFAULT_DB: &str = "./database/users.db";

struct SeedArgs {
    db_path: String,
    count: usize,
}

enum Command {
    Seed(SeedArgs),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let mut seed = SeedArgs {
        db_path: DEFAULT_DB.to_string(),
        count: DEMO_USERS.len(),
    };

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--db" | "-d" => {
                seed.db_path = args.next().ok_or("--db needs a path")?;
            }
            "--count" | "-c" => {
                let value = args.next().ok_or("--count needs a number")?;
                seed.count = value
                    .parse()
                    .map_err(|_| format!("--count: '{}' is not a number", value))?;
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    Ok(Command::Seed(seed))
}

fn demo_name(index: usize) -> String {
    let base = DEMO_USERS[index % DEMO_USERS.len()];
    match index / DEMO_USERS.len() {
        0 => base.to_string(),
        round => format!("{} {}", base, round + 1),
    }
}

fn print_help() {
    println!("seed: insert demo users into an empty users database");
    println!();
    println!("  -d, --db <PATH>    database file (default: {})", DEFAULT_DB);
    println!("  -c, --count <N>    users to insert (default: {})", DEMO_USERS.len());
    println!("  -h, --help         print this text");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Seed(args) => args,
    };

    let db = Database::new(DbConfig::new(&args.db_path)).await?;
    let users = db.users();

    let existing = users.count().await?;
    if existing > 0 {
        println!("{} already has {} users, nothing to do", args.db_path, existing);
        db.close().await;
        return Ok(());
    }

    let mut inserted = 0usize;
    for index in 0..args.count {
        let name = demo_name(index);
        match users.create(&name).await {
            Ok(user) => {
                inserted += 1;
                println!("  #{:<4} {}", user.id, user.name);
            }
            Err(e) => eprintln!("  could not insert {}: {}", name, e),
        }
    }

    println!("Inserted {} of {} users into {}", inserted, args.count, args.db_path);
    db.close().await;
    Ok(())
}
