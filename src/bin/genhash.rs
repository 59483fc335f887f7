//! Password digest generator
//!
//! Prints the SHA-256 digest of a password for pasting into the `users`
//! section of config.toml.

use filegate_server::auth::hash_password;

fn main() {
    let mut args = std::env::args().skip(1);

    let Some(password) = args.next() else {
        eprintln!("usage: genhash <password>");
        std::process::exit(1);
    };

    println!("{}", hash_password(&password));
}
