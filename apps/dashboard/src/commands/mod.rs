//! # Dashboard Commands
//!
//! One input line becomes one [`Command`], which is executed against the
//! [`App`].
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (Command, parse, execute)
//! ├── catalog.rs  ◄─── search, add, edit, stock
//! ├── sales.rs    ◄─── sell
//! ├── advisor.rs  ◄─── recommend, whatif
//! └── reports.rs  ◄─── export
//! ```
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "sell 1 2 12.50"                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse() ──✗──► AppError { USAGE }                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Command::Sell { sku: "1", quantity: 2, price: $12.50, date: None }     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  execute() ── resolve row 1 ──► Mutations::record_sale                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Notice::Success / Notice::Error, then the view is re-rendered          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod advisor;
mod catalog;
mod reports;
mod sales;

use chrono::NaiveDate;
use stockwise_core::validation::{parse_sale_date, parse_stock_level, validate_sku_ref};
use stockwise_core::{Money, NewSku, ReportFormat, SkuDetailsUpdate, ValidationError};
use tracing::debug;

use crate::error::{AppError, AppResult, ErrorCode};
use crate::state::{ActiveView, App};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    View(ActiveView),
    Refresh,
    /// `None` clears the search.
    Search(Option<String>),
    Add(NewSku),
    Edit {
        sku: String,
        update: SkuDetailsUpdate,
    },
    Stock {
        sku: String,
        level: u64,
    },
    Sell {
        sku: String,
        quantity: u64,
        price: Money,
        /// Today when omitted.
        date: Option<NaiveDate>,
    },
    Trend(String),
    Recommend {
        sku: String,
        lead_time: Option<u32>,
        safety_stock: Option<u32>,
    },
    WhatIf {
        sku: String,
        scenario: String,
    },
    Export(ReportFormat),
    Health,
    Quit,
}

pub const USAGE: &str = "\
Commands:
  view <name>                         dashboard | catalog | advisor | reports | settings
  refresh                             re-fetch the current view
  search [term]                       filter the catalog (no term clears)
  add <name> | <unit> [| <description> [| <initial stock>]]
  edit <sku> name=<v> | unit=<v> | desc=<v>
  stock <sku> <level>                 set the stock level
  sell <sku> <qty> <price> [YYYY-MM-DD]
  trend <sku>                         chart this SKU on the dashboard
  recommend <sku> [lead_time] [safety_stock]
  whatif <sku> <scenario>
  export [csv|text]                   download the audit report
  health                              backend status
  quit
<sku> is a catalog row number or a full SKU id.";

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> AppResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "refresh" | "r" => Command::Refresh,
        "health" => Command::Health,
        "view" | "go" => Command::View(required(rest, "view <name>")?.parse()?),
        "search" | "find" => Command::Search(Some(rest.to_string()).filter(|t| !t.is_empty())),
        "add" => parse_add(rest)?,
        "edit" => parse_edit(rest)?,
        "stock" => {
            let [sku, level] = words::<2>(rest, "stock <sku> <level>")?;
            Command::Stock {
                sku,
                level: parse_stock_level(&level)?,
            }
        }
        "sell" => parse_sell(rest)?,
        "trend" => Command::Trend(required(rest, "trend <sku>")?.to_string()),
        "recommend" => parse_recommend(rest)?,
        "whatif" => {
            let usage = "whatif <sku> <scenario>";
            let (sku, scenario) = required(rest, usage)?
                .split_once(char::is_whitespace)
                .ok_or_else(|| AppError::usage(format!("Usage: {usage}")))?;
            Command::WhatIf {
                sku: sku.to_string(),
                scenario: scenario.trim().to_string(),
            }
        }
        "export" => Command::Export(if rest.is_empty() {
            ReportFormat::default()
        } else {
            rest.parse()?
        }),
        other => match other.parse::<ActiveView>() {
            Ok(view) => Command::View(view),
            Err(_) => {
                return Err(AppError::usage(format!(
                    "Unknown command '{other}'. Type 'help' for commands."
                )))
            }
        },
    };

    Ok(Some(command))
}

/// Executes a command, leaving its outcome as the app's notice.
pub async fn execute(app: &mut App, command: Command) {
    debug!(?command, "Executing command");
    if let Err(err) = dispatch(app, command).await {
        app.notify(err);
    }
}

async fn dispatch(app: &mut App, command: Command) -> AppResult<()> {
    match command {
        Command::Help => app.info(USAGE),
        Command::Quit => app.quit(),
        Command::View(view) => app.switch_to(view).await,
        Command::Refresh => app.refresh_current().await,
        Command::Health => {
            let health = app.client().health().await?;
            let count = health
                .sku_count
                .map(|n| format!(", {n} SKUs"))
                .unwrap_or_default();
            let message = format!(
                "Backend {} (database {}{})",
                health.status, health.database_status, count
            );
            if health.is_healthy() {
                app.success(message);
            } else {
                return Err(AppError::new(ErrorCode::BackendError, message));
            }
        }
        Command::Trend(token) => {
            let skuid = validate_sku_ref(Some(&app.resolve_sku(&token)?))?;
            app.set_focus(skuid).await;
        }
        Command::Search(term) => catalog::search(app, term).await,
        Command::Add(sku) => catalog::add(app, sku).await?,
        Command::Edit { sku, update } => catalog::edit(app, &sku, update).await?,
        Command::Stock { sku, level } => catalog::set_stock(app, &sku, level).await?,
        Command::Sell {
            sku,
            quantity,
            price,
            date,
        } => sales::sell(app, &sku, quantity, price, date).await?,
        Command::Recommend {
            sku,
            lead_time,
            safety_stock,
        } => advisor::recommend(app, &sku, lead_time, safety_stock).await?,
        Command::WhatIf { sku, scenario } => advisor::what_if(app, &sku, &scenario).await?,
        Command::Export(format) => reports::export(app, format).await?,
    }
    Ok(())
}

// =============================================================================
// Argument Helpers
// =============================================================================

fn required<'a>(rest: &'a str, usage: &str) -> AppResult<&'a str> {
    if rest.is_empty() {
        Err(AppError::usage(format!("Usage: {usage}")))
    } else {
        Ok(rest)
    }
}

/// Exactly `N` whitespace-separated words.
fn words<const N: usize>(rest: &str, usage: &str) -> AppResult<[String; N]> {
    let parts: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
    parts
        .try_into()
        .map_err(|_| AppError::usage(format!("Usage: {usage}")))
}

fn parse_count(field: &str, input: &str) -> Result<u64, ValidationError> {
    input
        .trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a non-negative whole number".to_string(),
        })
}

fn parse_days(field: &str, input: &str) -> Result<u32, ValidationError> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a non-negative whole number".to_string(),
        })
}

fn parse_add(rest: &str) -> AppResult<Command> {
    let usage = "add <name> | <unit> [| <description> [| <initial stock>]]";
    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
    if fields.len() < 2 || fields.len() > 4 {
        return Err(AppError::usage(format!("Usage: {usage}")));
    }

    let mut sku = NewSku::new(fields[0], fields[1]);
    sku.sku_description = fields
        .get(2)
        .filter(|d| !d.is_empty())
        .map(|d| d.to_string());
    if let Some(stock) = fields.get(3) {
        sku.initial_stock_level = parse_count("initial_stock_level", stock)?;
    }
    Ok(Command::Add(sku))
}

fn parse_edit(rest: &str) -> AppResult<Command> {
    let usage = "edit <sku> name=<v> | unit=<v> | desc=<v>";
    let (sku, assignments) = required(rest, usage)?
        .split_once(char::is_whitespace)
        .ok_or_else(|| AppError::usage(format!("Usage: {usage}")))?;

    let mut update = SkuDetailsUpdate::default();
    for assignment in assignments.split('|') {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| AppError::usage(format!("Usage: {usage}")))?;
        let value = Some(value.trim().to_string());
        match key.trim().to_lowercase().as_str() {
            "name" => update.sku_name = value,
            "unit" => update.unit_of_measure = value,
            "desc" | "description" => update.sku_description = value,
            other => {
                return Err(AppError::usage(format!(
                    "Unknown field '{other}'. Fields: name, unit, desc"
                )))
            }
        }
    }

    Ok(Command::Edit {
        sku: sku.to_string(),
        update,
    })
}

fn parse_sell(rest: &str) -> AppResult<Command> {
    let usage = "sell <sku> <qty> <price> [YYYY-MM-DD]";
    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() < 3 || parts.len() > 4 {
        return Err(AppError::usage(format!("Usage: {usage}")));
    }

    Ok(Command::Sell {
        sku: parts[0].to_string(),
        quantity: parse_count("quantity_sold", parts[1])?,
        price: Money::parse(parts[2])?,
        date: parts.get(3).map(|d| parse_sale_date(d)).transpose()?,
    })
}

fn parse_recommend(rest: &str) -> AppResult<Command> {
    let usage = "recommend <sku> [lead_time] [safety_stock]";
    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(AppError::usage(format!("Usage: {usage}")));
    }

    Ok(Command::Recommend {
        sku: parts[0].to_string(),
        lead_time: parts.get(1).map(|v| parse_days("lead_time", v)).transpose()?,
        safety_stock: parts
            .get(2)
            .map(|v| parse_days("safety_stock", v))
            .transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(line: &str) -> Command {
        parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_and_unknown() {
        assert_eq!(parse("   ").unwrap(), None);
        let err = parse("frobnicate").unwrap_err();
        assert_eq!(err.code, ErrorCode::Usage);
    }

    #[test]
    fn test_view_shortcuts() {
        assert_eq!(parsed("view reports"), Command::View(ActiveView::Reports));
        assert_eq!(parsed("catalog"), Command::View(ActiveView::Catalog));
        assert!(parse("view").is_err());
    }

    #[test]
    fn test_search() {
        assert_eq!(
            parsed("search hex bolt"),
            Command::Search(Some("hex bolt".into()))
        );
        assert_eq!(parsed("search"), Command::Search(None));
    }

    #[test]
    fn test_add() {
        let Command::Add(sku) = parsed("add Hex Bolt M8 | box | Zinc plated | 40") else {
            panic!("expected add");
        };
        assert_eq!(sku.sku_name, "Hex Bolt M8");
        assert_eq!(sku.unit_of_measure, "box");
        assert_eq!(sku.sku_description.as_deref(), Some("Zinc plated"));
        assert_eq!(sku.initial_stock_level, 40);

        let Command::Add(sku) = parsed("add Washer | bag") else {
            panic!("expected add");
        };
        assert_eq!(sku.sku_description, None);
        assert_eq!(sku.initial_stock_level, 0);

        assert!(parse("add Washer").is_err());
        assert!(parse("add Washer | bag | | lots").is_err());
    }

    #[test]
    fn test_edit() {
        assert_eq!(
            parsed("edit 2 unit=carton | desc=Stainless"),
            Command::Edit {
                sku: "2".into(),
                update: SkuDetailsUpdate {
                    unit_of_measure: Some("carton".into()),
                    sku_description: Some("Stainless".into()),
                    ..Default::default()
                },
            }
        );
        assert!(parse("edit 2 colour=red").is_err());
        assert!(parse("edit 2").is_err());
    }

    #[test]
    fn test_stock() {
        assert_eq!(
            parsed("stock 1 40"),
            Command::Stock {
                sku: "1".into(),
                level: 40
            }
        );
        assert_eq!(parse("stock 1 -3").unwrap_err().code, ErrorCode::ValidationError);
        assert_eq!(parse("stock 1").unwrap_err().code, ErrorCode::Usage);
    }

    #[test]
    fn test_sell() {
        assert_eq!(
            parsed("sell 1 2 12.50 2025-11-01"),
            Command::Sell {
                sku: "1".into(),
                quantity: 2,
                price: Money::from_cents(1250),
                date: NaiveDate::from_ymd_opt(2025, 11, 1),
            }
        );
        let Command::Sell { date, .. } = parsed("sell 1 2 $12") else {
            panic!("expected sell");
        };
        assert_eq!(date, None);

        assert_eq!(
            parse("sell 1 two 12").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert!(parse("sell 1 2 12 11/01/2025").is_err());
    }

    #[test]
    fn test_recommend_and_whatif() {
        assert_eq!(
            parsed("recommend 1 14"),
            Command::Recommend {
                sku: "1".into(),
                lead_time: Some(14),
                safety_stock: None
            }
        );
        assert_eq!(
            parsed("whatif 1 competitor closes nearby"),
            Command::WhatIf {
                sku: "1".into(),
                scenario: "competitor closes nearby".into()
            }
        );
        assert!(parse("whatif 1").is_err());
    }

    #[test]
    fn test_export() {
        assert_eq!(parsed("export"), Command::Export(ReportFormat::Csv));
        assert_eq!(parsed("export text"), Command::Export(ReportFormat::Text));
        assert!(parse("export pdf").is_err());
    }

    #[tokio::test]
    async fn test_trend_rejects_malformed_id() {
        use crate::state::Notice;
        use crate::test_support::{app, StubBackend, SKU_ID};

        let backend = StubBackend::healthy();
        let mut app = app(&backend, ActiveView::Dashboard);
        app.start().await;
        let before = backend.total();

        let line = format!("trend {SKU_ID}/../../dashboard/metrics");
        execute(&mut app, parsed(&line)).await;
        assert_eq!(
            app.take_notice(),
            Some(Notice::Error(
                "SKU reference is corrupt. Please re-select the SKU.".into()
            ))
        );
        assert_eq!(app.focus_sku(), None);
        assert_eq!(backend.total(), before);
    }
}
