//! `relaychat auth` / `relaychat deauth`: manage the keyring credential.

use std::error::Error;
use std::io::{self, BufRead, Write};

use crate::core::keyring::{remove_credential, store_credential};

fn prompt_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> io::Result<String> {
    write!(writer, "{prompt}")?;
    writer.flush()?;
    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Reads a credential from `reader`. Blank input cancels.
pub fn read_credential<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> io::Result<Option<String>> {
    let token = prompt_line(reader, writer, "Bearer credential for the chat endpoint: ")?;
    Ok(Some(token).filter(|token| !token.is_empty()))
}

pub fn run_auth() -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match read_credential(&mut stdin.lock(), &mut stdout)? {
        Some(token) => {
            store_credential(&token)?;
            println!("✅ Credential stored in the system keyring");
        }
        None => println!("Cancelled."),
    }
    Ok(())
}

pub fn run_deauth() -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let answer = prompt_line(
        &mut stdin.lock(),
        &mut stdout,
        "Remove the stored credential? (y/N): ",
    )?;
    if !is_yes(&answer) {
        println!("Cancelled.");
        return Ok(());
    }

    if remove_credential()? {
        println!("✅ Credential removed from the system keyring");
    } else {
        println!("No stored credential to remove.");
    }
    Ok(())
}
