use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use super::{get_token_from_env, Credentials};

/// Ask for a GitHub username and password on the terminal.
/// The password is read without echo.
pub fn prompt_for_credentials() -> Result<Credentials> {
    println!(
        "Please enter your GitHub credentials. To proceed without authentication, use empty \
        username and password"
    );

    print!("Username: ");
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut username = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut username)
        .context("Failed to read username from stdin")?;

    let password = rpassword::prompt_password("Password: ")
        .context("Failed to read password from terminal")?;

    Ok(Credentials::from_input(username.trim(), &password))
}

/// Use the token from the environment when present, otherwise prompt
pub fn resolve_credentials() -> Result<Credentials> {
    match get_token_from_env() {
        Some(token) => Ok(Credentials::Token(token)),
        None => prompt_for_credentials(),
    }
}
