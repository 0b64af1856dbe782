use crate::{config, success, utils, warning};

pub fn keygen() {
    let key = utils::generate_encryption_key();

    success!("Generated a new encryption key:");
    println!("\n{}={}\n", config::ENCRYPTION_SECRET, key);
    warning!("Keep this key secret.");
    warning!("Refresh tokens issued under one key cannot be refreshed under another.");
}
