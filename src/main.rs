use std::io;

use procwatch::cli::Menu;
use procwatch::{Config, Manager};

fn main() -> io::Result<()> {
    // Diagnostics go to stderr and stay off unless RUST_LOG is set.
    env_logger::init();

    let manager = Manager::new(Config::default());
    let stdin = io::stdin();

    // Run the interactive menu until the operator exits
    Menu::new(manager, stdin.lock(), io::stdout()).run()
}
