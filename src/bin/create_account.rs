//! A utility for registering a login account out-of-band.
//!
//! The web service has no sign-up endpoint; the club's accounts are created
//! with this tool by whoever operates the server.

use std::{io, process::exit, str::FromStr};

use clap::Parser;
use rusqlite::Connection;

use shuttlebook::{
    db::initialize,
    models::{NewAccount, PasswordHash, Role, ValidatedPassword},
    stores::{AccountStore, SQLiteAccountStore},
};

/// Register a new account in the application database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database. Created if it does not
    /// exist yet.
    #[arg(long)]
    db_path: String,

    /// The username the account will log in with.
    #[arg(long)]
    username: String,

    /// The account's role, either "admin" or "user".
    #[arg(long, default_value = "admin")]
    role: String,
}

fn main() {
    let args = Args::parse();

    let role = match Role::from_str(&args.role) {
        Ok(role) => role,
        Err(error) => {
            print_error(error);
            exit(1);
        }
    };

    let connection = match Connection::open(&args.db_path) {
        Ok(connection) => connection,
        Err(error) => {
            print_error(format!(
                "Could not open the database at {}: {error}",
                args.db_path
            ));
            exit(1);
        }
    };

    if let Err(error) = initialize(&connection) {
        print_error(format!("Could not initialize the database: {error}"));
        exit(1);
    }

    let password_hash = match get_password_hash() {
        Some(password_hash) => password_hash,
        None => return,
    };

    let mut store = SQLiteAccountStore::new(std::sync::Arc::new(std::sync::Mutex::new(
        connection,
    )));

    match store.create(NewAccount {
        username: args.username,
        password_hash,
        role,
    }) {
        Ok(account) => {
            println!(
                "Created {} account \"{}\" with ID {}.",
                account.role, account.username, account.id
            );
        }
        Err(error) => {
            print_error(error);
            exit(1);
        }
    }
}

fn get_password_hash() -> Option<PasswordHash> {
    loop {
        println!();

        let first_password = match rpassword::prompt_password("Enter a password: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                return None;
            }
            Err(error) => {
                print_error(format!("Could not read password from stdin: {error}"));
                return None;
            }
        };

        if let Err(error) = ValidatedPassword::new(&first_password) {
            print_error(error);
            continue;
        }

        let second_password = match rpassword::prompt_password("Enter the same password again: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                return None;
            }
            Err(error) => {
                print_error(format!("Could not read password from stdin: {error}"));
                return None;
            }
        };

        if first_password != second_password {
            print_error("Passwords must match, try again.");
            continue;
        }

        let password_hash =
            match PasswordHash::from_raw_password(&first_password, PasswordHash::DEFAULT_COST) {
                Ok(password_hash) => password_hash,
                Err(error) => {
                    print_error(format!("Could not hash password: {error}. Try again."));
                    continue;
                }
            };

        return Some(password_hash);
    }
}

fn print_error(error: impl ToString) {
    eprintln!("\x1b[31;1m{}\x1b[0m", error.to_string());
}
