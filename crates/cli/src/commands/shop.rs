//! Interactive cart session over stdin.
//!
//! # Commands
//!
//! - `page N` - show page `N`
//! - `add ID` / `remove ID` - change the cart
//! - `cart` - list the cart
//! - `refresh` - fetch the catalog again
//! - `help`, `quit`

use std::io::Write;
use std::num::NonZeroUsize;
use std::str::FromStr;

use catalog_cart_core::ProductId;
use catalog_cart_storefront::api::StoreApi;
use catalog_cart_storefront::notify::Toaster;
use catalog_cart_storefront::views::ProductListView;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::console;
use crate::error::CliError;

const HELP: &str = "Commands: page N, add ID, remove ID, cart, refresh, help, quit";

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopCommand {
    Page(usize),
    Add(ProductId),
    Remove(ProductId),
    Cart,
    Refresh,
    Help,
    Quit,
}

impl FromStr for ShopCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let argument = words.next();
        if words.next().is_some() {
            return Err(format!("Too many arguments. {HELP}"));
        }

        match (command.to_ascii_lowercase().as_str(), argument) {
            ("page", Some(n)) => n
                .parse()
                .map(Self::Page)
                .map_err(|_| format!("Not a page number: {n}")),
            ("add", Some(id)) => Ok(Self::Add(ProductId::new(id))),
            ("remove", Some(id)) => Ok(Self::Remove(ProductId::new(id))),
            ("page" | "add" | "remove", None) => Err(format!("`{command}` needs an argument.")),
            ("cart", None) => Ok(Self::Cart),
            ("refresh", None) => Ok(Self::Refresh),
            ("help" | "?", None) => Ok(Self::Help),
            ("quit" | "exit", None) => Ok(Self::Quit),
            _ => Err(format!("Unknown command: {line}. {HELP}")),
        }
    }
}

/// Load the catalog and process commands from `input` until `quit` or EOF.
///
/// A failed fetch is shown and the session continues; `refresh` retries.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run<A, R, T, W>(
    api: &A,
    page_size: NonZeroUsize,
    input: R,
    toaster: &mut T,
    out: &mut W,
) -> Result<(), CliError>
where
    A: StoreApi,
    R: AsyncBufRead + Unpin,
    T: Toaster,
    W: Write,
{
    let mut view = ProductListView::new(page_size);
    if view.load(api).await.is_err() {
        tracing::debug!("Starting session without a catalog");
    }
    console::write_catalog(out, &view)?;
    writeln!(out, "{HELP}")?;

    let mut lines = input.lines();
    loop {
        write!(out, "cart({})> ", view.cart().count())?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match line.parse::<ShopCommand>() {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        tracing::debug!(?command, "Shop command");

        match command {
            ShopCommand::Page(page) => {
                let changed = view
                    .pagination()
                    .click(page)
                    .is_some_and(|change| view.change_page(change));
                if changed {
                    console::write_catalog(out, &view)?;
                } else {
                    writeln!(out, "No page {page}.")?;
                }
            }
            ShopCommand::Add(id) => {
                if view.add_to_cart(&id, toaster).is_none() {
                    writeln!(out, "No product {id} in the catalog.")?;
                }
            }
            ShopCommand::Remove(id) => {
                view.remove_from_cart(&id, toaster);
            }
            ShopCommand::Cart => {
                view.open_cart();
                console::write_cart(out, &view)?;
                view.close_cart();
            }
            ShopCommand::Refresh => {
                if view.refetch(api).await.is_err() {
                    tracing::debug!("Refresh failed");
                }
                console::write_catalog(out, &view)?;
            }
            ShopCommand::Help => writeln!(out, "{HELP}")?,
            ShopCommand::Quit => break,
        }
    }

    tracing::info!(items = view.cart().count(), "Shop session ended");
    Ok(())
}
