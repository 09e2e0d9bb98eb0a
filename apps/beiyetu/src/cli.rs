//! # Command Line Interface
//!
//! `beiyetu` argument parsing, one-shot commands and the interactive shell.
//!
//! ```text
//! beiyetu [--db PATH] [--json] <COMMAND>
//!
//!   products            every product with its category
//!   search <QUERY>      products whose name contains QUERY
//!   best-price <ID>     cheapest store for a product
//!   details <ID>        all store prices for a product
//!   categories          products grouped by category
//!   config              display settings in effect
//!   shell               interactive loop (default)
//! ```
//!
//! The shell accepts the same commands plus `comment`, `comments`,
//! `login`, `logout`, `whoami`, `help` and `quit`.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::commands::{self, CategoryGroupDto, CommentDto, ListingDto, ProductDetailsDto, ProductDto};
use crate::error::ApiError;
use crate::state::{AppState, ConfigState};
use beiyetu_core::validation::parse_product_id;

#[derive(Debug, Parser)]
#[command(name = "beiyetu")]
#[command(author, version, about = "Compare product prices across stores", long_about = None)]
pub struct Cli {
    /// Database file (default: platform data directory)
    #[arg(long, global = true, env = "BEIYETU_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List every product
    Products,

    /// Search products by name
    Search {
        /// Case-insensitive part of the product name
        query: String,
    },

    /// Show the cheapest store for a product
    BestPrice {
        /// Product id
        id: i64,
    },

    /// Show every store price for a product
    Details {
        /// Product id
        id: i64,
    },

    /// List products grouped by category
    Categories,

    /// Show the display settings in effect
    Config,

    /// Interactive shell
    Shell,
}

// =============================================================================
// Output
// =============================================================================

/// Writes text or JSON depending on `--json`.
struct Output<'a, W: Write> {
    out: &'a mut W,
    json: bool,
}

impl<'a, W: Write> Output<'a, W> {
    fn json<T: Serialize>(&mut self, value: &T) -> std::io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(self.out, "{text}")
    }

    fn products(&mut self, products: &[ProductDto]) -> std::io::Result<()> {
        if self.json {
            return self.json(&products);
        }
        if products.is_empty() {
            return writeln!(self.out, "No products found.");
        }
        for p in products {
            writeln!(
                self.out,
                "{:>4}  {:<32} {:>16}  {} / {}",
                p.id, p.name, p.price_display, p.category_name, p.subcategory_name
            )?;
        }
        Ok(())
    }

    fn best_price(&mut self, id: i64, best: &Option<ListingDto>) -> std::io::Result<()> {
        if self.json {
            return self.json(best);
        }
        match best {
            Some(l) => writeln!(
                self.out,
                "Best price: {} at {} ({})",
                l.price_display, l.store_name, l.website_url
            ),
            None => writeln!(self.out, "No store lists product {id}."),
        }
    }

    fn details(&mut self, details: &ProductDetailsDto) -> std::io::Result<()> {
        if self.json {
            return self.json(details);
        }
        let p = &details.product;
        writeln!(self.out, "{} ({} / {})", p.name, p.category_name, p.subcategory_name)?;
        writeln!(self.out, "List price: {}", p.price_display)?;
        if let Some(description) = &p.description {
            writeln!(self.out, "{description}")?;
        }
        for l in &details.listings {
            let marker = if details.best.as_ref() == Some(l) { "*" } else { " " };
            writeln!(
                self.out,
                "{marker} {:<12} {:>16}  {}",
                l.store_name, l.price_display, l.website_url
            )?;
        }
        Ok(())
    }

    fn categories(&mut self, groups: &[CategoryGroupDto]) -> std::io::Result<()> {
        if self.json {
            return self.json(&groups);
        }
        for group in groups {
            writeln!(self.out, "{}", group.category_name)?;
            for p in &group.products {
                writeln!(self.out, "  {:>4}  {:<32} {:>16}", p.id, p.name, p.price_display)?;
            }
        }
        Ok(())
    }

    fn comments(&mut self, comments: &[CommentDto]) -> std::io::Result<()> {
        if self.json {
            return self.json(&comments);
        }
        if comments.is_empty() {
            return writeln!(self.out, "No comments yet.");
        }
        for c in comments {
            writeln!(
                self.out,
                "[{}] {}: {}",
                c.created_at.format("%Y-%m-%d %H:%M"),
                c.author,
                c.text
            )?;
        }
        Ok(())
    }

    fn config(&mut self, config: &ConfigState) -> std::io::Result<()> {
        if self.json {
            return self.json(config);
        }
        writeln!(self.out, "Currency symbol: {}", config.currency_symbol)?;
        writeln!(self.out, "Default author:  {}", config.default_author)
    }

    fn message(&mut self, text: &str) -> std::io::Result<()> {
        if self.json {
            return self.json(&serde_json::json!({ "message": text }));
        }
        writeln!(self.out, "{text}")
    }

    fn error(&mut self, err: &ApiError) -> std::io::Result<()> {
        if self.json {
            return self.json(err);
        }
        writeln!(self.out, "error: {}", err.message)
    }
}

fn io_error(e: std::io::Error) -> ApiError {
    ApiError::internal(format!("Failed to write output: {e}"))
}

// =============================================================================
// One-shot Commands
// =============================================================================

/// Runs one catalog command and prints the result.
///
/// `Command::Shell` is handled by [`run_shell`]; here it prints nothing.
pub async fn execute<W: Write>(
    state: &AppState,
    command: &Command,
    json: bool,
    out: &mut W,
) -> Result<(), ApiError> {
    let mut output = Output { out, json };
    let catalog = &state.catalog;
    let config = &state.config;

    let written = match command {
        Command::Products => {
            let products = commands::load_all_products(catalog, config).await?;
            output.products(&products)
        }
        Command::Search { query } => {
            let products = commands::search_products(catalog, config, query.clone()).await?;
            output.products(&products)
        }
        Command::BestPrice { id } => {
            let best = commands::get_best_price(catalog, config, *id).await?;
            output.best_price(*id, &best)
        }
        Command::Details { id } => {
            let details = commands::load_product_details(catalog, config, *id).await?;
            output.details(&details)
        }
        Command::Categories => {
            let groups = commands::list_categories(catalog, config).await?;
            output.categories(&groups)
        }
        Command::Config => {
            let config = commands::get_config(config)?;
            output.config(&config)
        }
        Command::Shell => Ok(()),
    };

    written.map_err(io_error)
}

// =============================================================================
// Interactive Shell
// =============================================================================

const SHELL_HELP: &str = "\
Commands:
  products                    list every product
  search <query>              search by name
  best-price <id>             cheapest store for a product
  details <id>                every store price for a product
  categories                  products grouped by category
  config                      display settings in effect
  comment <id> <text>         post a comment
  comments <id>               list comments for a product
  login <email>               sign in (stub)
  logout                      sign out
  whoami                      show the signed-in user
  help                        this text
  quit                        leave the shell";

/// What one shell line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellLine {
    Empty,
    Catalog(Command),
    Comment { product_id: String, text: String },
    Comments { product_id: String },
    Login { email: String },
    Logout,
    WhoAmI,
    Help,
    Quit,
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    Ok(parse_product_id(raw)?)
}

fn parse_shell_line(line: &str) -> Result<ShellLine, ApiError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let parsed = match word {
        "" => ShellLine::Empty,
        "products" => ShellLine::Catalog(Command::Products),
        "search" => ShellLine::Catalog(Command::Search {
            query: rest.to_string(),
        }),
        "best-price" | "best" => ShellLine::Catalog(Command::BestPrice { id: parse_id(rest)? }),
        "details" => ShellLine::Catalog(Command::Details { id: parse_id(rest)? }),
        "categories" => ShellLine::Catalog(Command::Categories),
        "config" => ShellLine::Catalog(Command::Config),
        "comment" => {
            let (product_id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            ShellLine::Comment {
                product_id: product_id.to_string(),
                text: text.trim().to_string(),
            }
        }
        "comments" => ShellLine::Comments {
            product_id: rest.to_string(),
        },
        "login" => ShellLine::Login {
            email: rest.to_string(),
        },
        "logout" => ShellLine::Logout,
        "whoami" => ShellLine::WhoAmI,
        "help" | "?" => ShellLine::Help,
        "quit" | "exit" => ShellLine::Quit,
        other => {
            return Err(ApiError::validation(format!(
                "Unknown command '{other}' (try 'help')"
            )))
        }
    };

    Ok(parsed)
}

/// Handles one non-empty line. Returns `false` when the shell should stop.
async fn handle_line<W: Write>(
    state: &AppState,
    line: ShellLine,
    json: bool,
    out: &mut W,
) -> Result<bool, ApiError> {
    match line {
        ShellLine::Empty => return Ok(true),
        ShellLine::Quit => return Ok(false),
        ShellLine::Catalog(command) => execute(state, &command, json, out).await?,
        ShellLine::Comment { product_id, text } => {
            let comment = commands::add_comment_with_default(
                &state.comments,
                &state.session,
                product_id,
                None,
                text,
                &state.config.default_author,
            )?;
            let mut output = Output { out, json };
            if json {
                output.json(&comment).map_err(io_error)?;
            } else {
                output
                    .message(&format!("Comment posted as {}.", comment.author))
                    .map_err(io_error)?;
            }
        }
        ShellLine::Comments { product_id } => {
            let comments = commands::list_comments(&state.comments, product_id)?;
            Output { out, json }.comments(&comments).map_err(io_error)?;
        }
        ShellLine::Login { email } => {
            let email = commands::login(&state.session, email)?;
            Output { out, json }
                .message(&format!("Signed in as {email}."))
                .map_err(io_error)?;
        }
        ShellLine::Logout => {
            let text = match commands::logout(&state.session)? {
                Some(email) => format!("Signed out {email}."),
                None => "Nobody is signed in.".to_string(),
            };
            Output { out, json }.message(&text).map_err(io_error)?;
        }
        ShellLine::WhoAmI => {
            let text = commands::current_user(&state.session)?
                .unwrap_or_else(|| format!("{} (not signed in)", state.config.default_author));
            Output { out, json }.message(&text).map_err(io_error)?;
        }
        ShellLine::Help => {
            Output { out, json: false }.message(SHELL_HELP).map_err(io_error)?;
        }
    }

    Ok(true)
}

/// Reads commands line by line until `quit` or end of input.
///
/// Command errors are printed and the loop continues; only a failure to
/// read input or write output ends it with an error.
pub async fn run_shell<R, W>(state: &AppState, input: R, json: bool, out: &mut W) -> Result<(), ApiError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        if !json {
            write!(out, "beiyetu> ").and_then(|_| out.flush()).map_err(io_error)?;
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(ApiError::internal(format!("Failed to read input: {e}"))),
        };
        debug!(line = %line, "shell input");

        let result = match parse_shell_line(&line) {
            Ok(parsed) => handle_line(state, parsed, json, out).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => Output { out: &mut *out, json }.error(&e).map_err(io_error)?,
        }
    }

    Ok(())
}
