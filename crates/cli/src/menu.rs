//! The text menu loop.
//!
//! Thin IO wrapper over the domain crates: collects raw input, parses the
//! numeric fields at the boundary, constructs a product variant, and calls
//! into the inventory. All dates are resolved here (once per operation) and
//! injected into the expiry-sensitive calls; the domain never reads the clock.

use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::{NaiveDate, Utc};

use shelfstock_core::{DomainError, DomainResult};
use shelfstock_inventory::Inventory;
use shelfstock_products::Product;

/// Drive the menu until the user exits or input runs out.
pub fn run(
    input: &mut impl BufRead,
    out: &mut impl Write,
    inventory: &mut Inventory,
) -> Result<()> {
    loop {
        writeln!(out)?;
        writeln!(out, "===== Inventory Management System =====")?;
        writeln!(out, "1. Add Product")?;
        writeln!(out, "2. Remove Product")?;
        writeln!(out, "3. List All Products")?;
        writeln!(out, "4. Search Product")?;
        writeln!(out, "5. Calculate Total Value")?;
        writeln!(out, "6. Remove Expired Groceries")?;
        writeln!(out, "0. Exit")?;

        let Some(choice) = prompt(input, out, "Enter your choice: ")? else {
            break;
        };

        let keep_going = match choice.as_str() {
            "1" => add_product(input, out, inventory)?,
            "2" => remove_product(input, out, inventory)?,
            "3" => {
                list_products(out, inventory, today())?;
                true
            }
            "4" => search_products(input, out, inventory)?,
            "5" => {
                writeln!(out, "Total inventory value: Rs{:.2}", inventory.total_value())?;
                true
            }
            "6" => {
                for event in inventory.remove_expired(today()) {
                    writeln!(out, "{event}")?;
                }
                true
            }
            "0" => {
                writeln!(out, "Thank you for using Inventory Management System!")?;
                false
            }
            _ => {
                writeln!(out, "Invalid choice! Please try again.")?;
                true
            }
        };

        if !keep_going {
            break;
        }
    }
    Ok(())
}

/// Write `msg`, then read one trimmed line. `None` means end of input.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, msg: &str) -> Result<Option<String>> {
    write!(out, "{msg}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse the numeric base fields. The only validation the boundary performs.
fn parse_base(price: &str, quantity: &str) -> DomainResult<(f64, i64)> {
    let price = price
        .parse::<f64>()
        .map_err(|e| DomainError::parse(format!("price {price:?}: {e}")))?;
    let quantity = quantity
        .parse::<i64>()
        .map_err(|e| DomainError::parse(format!("quantity {quantity:?}: {e}")))?;
    Ok((price, quantity))
}

/// The add flow. A parse failure reports the error and falls back to the
/// menu without adding anything; the user retries with corrected input.
fn add_product(
    input: &mut impl BufRead,
    out: &mut impl Write,
    inventory: &mut Inventory,
) -> Result<bool> {
    writeln!(out)?;
    writeln!(out, "What type of product?")?;
    writeln!(out, "1. Electronics")?;
    writeln!(out, "2. Grocery")?;
    writeln!(out, "3. Clothing")?;
    let Some(type_choice) = prompt(input, out, "Enter type (1-3): ")? else {
        return Ok(false);
    };

    let Some(id) = prompt(input, out, "Enter product ID: ")? else {
        return Ok(false);
    };
    let Some(name) = prompt(input, out, "Enter product name: ")? else {
        return Ok(false);
    };
    let Some(price_raw) = prompt(input, out, "Enter price: ")? else {
        return Ok(false);
    };
    let Some(quantity_raw) = prompt(input, out, "Enter quantity: ")? else {
        return Ok(false);
    };
    let (price, quantity) = match parse_base(&price_raw, &quantity_raw) {
        Ok(base) => base,
        Err(err) => {
            writeln!(out, "{err}")?;
            return Ok(true);
        }
    };

    let product = match type_choice.as_str() {
        "1" => {
            let Some(brand) = prompt(input, out, "Enter brand: ")? else {
                return Ok(false);
            };
            let Some(warranty) = prompt(input, out, "Enter warranty (years): ")? else {
                return Ok(false);
            };
            Product::electronics(id, name, price, quantity, brand, warranty)
        }
        "2" => {
            let Some(expiry) = prompt(input, out, "Enter expiry date (YYYY-MM-DD): ")? else {
                return Ok(false);
            };
            match Product::grocery(id, name, price, quantity, &expiry) {
                Ok(product) => product,
                Err(err) => {
                    writeln!(out, "{err}")?;
                    return Ok(true);
                }
            }
        }
        "3" => {
            let Some(size) = prompt(input, out, "Enter size: ")? else {
                return Ok(false);
            };
            let Some(material) = prompt(input, out, "Enter material: ")? else {
                return Ok(false);
            };
            Product::clothing(id, name, price, quantity, size, material)
        }
        _ => {
            writeln!(out, "Invalid choice!")?;
            return Ok(true);
        }
    };

    writeln!(out, "{}", inventory.add(product))?;
    Ok(true)
}

fn remove_product(
    input: &mut impl BufRead,
    out: &mut impl Write,
    inventory: &mut Inventory,
) -> Result<bool> {
    let Some(id) = prompt(input, out, "Enter product ID to remove: ")? else {
        return Ok(false);
    };
    writeln!(out, "{}", inventory.remove(&id))?;
    Ok(true)
}

fn list_products(out: &mut impl Write, inventory: &Inventory, on: NaiveDate) -> Result<()> {
    if inventory.is_empty() {
        writeln!(out, "Inventory is empty!")?;
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "--- ALL PRODUCTS ---")?;
    for product in inventory.products() {
        writeln!(out, "{}", product.render(on))?;
    }
    Ok(())
}

fn search_products(
    input: &mut impl BufRead,
    out: &mut impl Write,
    inventory: &Inventory,
) -> Result<bool> {
    let Some(needle) = prompt(input, out, "Enter product name to search: ")? else {
        return Ok(false);
    };
    let hits = inventory.search_by_name(&needle);
    if hits.is_empty() {
        writeln!(out, "No products found with that name!")?;
        return Ok(true);
    }
    let on = today();
    for product in hits {
        writeln!(out, "{}", product.render(on))?;
    }
    Ok(true)
}
