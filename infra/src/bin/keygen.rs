//! Generates key material for deployment
//!
//! Usage: `idps-keygen [encryption|secret]`
//!
//! `encryption` (the default) prints a base64 32-byte key for
//! `ENCRYPTION_KEY`; `secret` prints a random hex signing secret for
//! `JWT_SECRET_KEY`.

use anyhow::bail;

use idps_core::services::encryption::{CipherKey, KeyManager};

/// Signing secret length in bytes
const SECRET_LENGTH: usize = 48;

fn main() -> anyhow::Result<()> {
    let kind = std::env::args().nth(1).unwrap_or_else(|| "encryption".to_string());

    match kind.as_str() {
        "encryption" => println!("{}", KeyManager::export_key(&CipherKey::generate())),
        "secret" => {
            let secret = KeyManager::generate_key(SECRET_LENGTH);
            println!("{}", secret.iter().map(|b| format!("{:02x}", b)).collect::<String>());
        }
        other => bail!("unknown key kind '{}', expected 'encryption' or 'secret'", other),
    }

    Ok(())
}
