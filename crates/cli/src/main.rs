//! Interactive inventory menu binary.

mod menu;

use std::io;

use anyhow::Result;

use shelfstock_inventory::Inventory;

fn main() -> Result<()> {
    shelfstock_observability::init();
    tracing::debug!("starting inventory menu");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut inventory = Inventory::new();
    menu::run(&mut stdin.lock(), &mut stdout.lock(), &mut inventory)
}
