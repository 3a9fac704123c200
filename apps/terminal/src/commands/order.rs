//! # Order Screen
//!
//! The interactive till: one command per line, the order redrawn after every
//! change.
//!
//! ```text
//! > add pizza
//!   1. Pizza x1 @ $10.00 = $10.00
//! Subtotal: $10.00  GST: $0.50  Discount: $0.00  Total: $10.50
//! > bill
//! ```
//!
//! The screen reads from any [`AsyncBufRead`] and writes to any
//! [`std::io::Write`], so tests drive it with byte slices.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use bistro_core::{DiscountAdjustment, OrderType, PaymentMethod};

use crate::commands::{menu, report};
use crate::error::CommandError;
use crate::state::{AppConfig, OrderSession, RenderModel};

const HELP: &[&str] = &[
    "Commands:",
    "  menu                     show the menu",
    "  add <name|number>        add one of a menu item",
    "  remove <line>            remove a line of the order",
    "  clear                    start over",
    "  discount <amount|N%>     set the discount",
    "  type <dine-in|takeaway>  set the order type",
    "  pay <cash|card|upi>      set the payment method",
    "  show                     show the current order",
    "  bill                     save the order and print the bill",
    "  report                   sales of the last 7 days",
    "  help                     this list",
    "  quit                     leave",
];

/// A parsed line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    Menu,
    Add(String),
    /// 1-based line number as typed; `None` when nothing was given.
    Remove(Option<String>),
    Clear,
    Discount(String),
    Type(String),
    Pay(String),
    Show,
    Bill,
    Report,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ScreenCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" => ScreenCommand::Empty,
            "menu" => ScreenCommand::Menu,
            "add" => ScreenCommand::Add(rest.to_string()),
            "remove" | "rm" => {
                ScreenCommand::Remove((!rest.is_empty()).then(|| rest.to_string()))
            }
            "clear" => ScreenCommand::Clear,
            "discount" => ScreenCommand::Discount(rest.to_string()),
            "type" => ScreenCommand::Type(rest.to_string()),
            "pay" => ScreenCommand::Pay(rest.to_string()),
            "show" => ScreenCommand::Show,
            "bill" => ScreenCommand::Bill,
            "report" => ScreenCommand::Report,
            "help" | "?" => ScreenCommand::Help,
            "quit" | "exit" => ScreenCommand::Quit,
            other => ScreenCommand::Unknown(other.to_string()),
        }
    }
}

/// Whether the loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The till screen around an [`OrderSession`].
pub struct OrderScreen<'a> {
    session: &'a mut OrderSession,
    config: &'a AppConfig,
    order_type: OrderType,
    payment_method: PaymentMethod,
}

impl<'a> OrderScreen<'a> {
    pub fn new(session: &'a mut OrderSession, config: &'a AppConfig) -> Self {
        OrderScreen {
            session,
            config,
            order_type: OrderType::default(),
            payment_method: PaymentMethod::default(),
        }
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{} - order screen. Type 'help' for commands.", self.config.store_name)?;
        self.print_menu(out)?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            if self.handle_line(&line, out).await? == Flow::Quit {
                break;
            }
        }

        if !self.session.draft().is_empty() {
            warn!(lines = self.session.draft().len(), "Leaving with an unbilled order");
        }
        Ok(())
    }

    /// Executes one line of input.
    pub async fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let command = ScreenCommand::parse(line);
        debug!(?command, "Screen command");

        match command {
            ScreenCommand::Empty => {}
            ScreenCommand::Menu => self.print_menu(out)?,
            ScreenCommand::Add(arg) => {
                let name = self.resolve_item(&arg);
                let result = self.session.add_item(&name);
                self.print_result(result, out)?;
            }
            ScreenCommand::Remove(arg) => match parse_line_number(arg.as_deref()) {
                Ok(index) => {
                    let result = self.session.remove_item(index);
                    self.print_result(result, out)?;
                }
                Err(e) => print_error(&e, out)?,
            },
            ScreenCommand::Clear => {
                let view = self.session.clear();
                self.print_order(&view, out)?;
            }
            ScreenCommand::Discount(arg) => {
                let view = self.session.set_discount(&arg);
                self.print_order(&view, out)?;
            }
            ScreenCommand::Type(arg) => match arg.parse::<OrderType>() {
                Ok(order_type) => {
                    self.order_type = order_type;
                    writeln!(out, "Order type: {}", order_type)?;
                }
                Err(e) => print_error(&CommandError::from(e), out)?,
            },
            ScreenCommand::Pay(arg) => match arg.parse::<PaymentMethod>() {
                Ok(method) => {
                    self.payment_method = method;
                    writeln!(out, "Payment: {}", method)?;
                }
                Err(e) => print_error(&CommandError::from(e), out)?,
            },
            ScreenCommand::Show => {
                let view = self.session.render();
                writeln!(out, "Type: {}  Payment: {}", self.order_type, self.payment_method)?;
                self.print_order(&view, out)?;
            }
            ScreenCommand::Bill => self.bill(out).await?,
            ScreenCommand::Report => self.report(out).await?,
            ScreenCommand::Help => {
                for line in HELP {
                    writeln!(out, "{}", line)?;
                }
            }
            ScreenCommand::Quit => return Ok(Flow::Quit),
            ScreenCommand::Unknown(word) => {
                writeln!(out, "Unknown command '{}'. Type 'help'.", word)?;
            }
        }

        Ok(Flow::Continue)
    }

    async fn bill<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let discount = self.session.discount_input().to_string();
        match self
            .session
            .finalize(self.order_type, self.payment_method, &discount)
            .await
        {
            Ok(receipt) => {
                writeln!(out, "Bill Generated")?;
                writeln!(out, "{}", self.config.store_name)?;
                for line in receipt.text_lines(&self.config.currency_symbol) {
                    writeln!(out, "{}", line)?;
                }
            }
            Err(e) => print_error(&e, out)?,
        }
        Ok(())
    }

    async fn report<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match report::recent_sales(self.session.database(), report::DEFAULT_RECENT_DAYS).await {
            Ok(days) => {
                for line in report::format_recent(&days, report::DEFAULT_RECENT_DAYS, self.config) {
                    writeln!(out, "{}", line)?;
                }
            }
            Err(e) => print_error(&e, out)?,
        }
        Ok(())
    }

    /// A menu number becomes the item's name; anything else is taken as a name.
    fn resolve_item(&self, arg: &str) -> String {
        let catalog = self.session.catalog();
        match arg.trim().parse::<usize>() {
            Ok(n) if (1..=catalog.len()).contains(&n) => catalog[n - 1].name.clone(),
            _ => arg.trim().to_string(),
        }
    }

    fn print_menu<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in menu::format_menu(self.session.catalog(), self.config) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn print_result<W: Write>(
        &self,
        result: Result<RenderModel, CommandError>,
        out: &mut W,
    ) -> io::Result<()> {
        match result {
            Ok(view) => self.print_order(&view, out),
            Err(e) => print_error(&e, out),
        }
    }

    fn print_order<W: Write>(&self, view: &RenderModel, out: &mut W) -> io::Result<()> {
        let money = |m: bistro_core::Money| self.config.format_currency(m.cents());

        if view.is_empty() {
            writeln!(out, "  (no items)")?;
        }
        for line in &view.lines {
            writeln!(
                out,
                "  {}. {} x{} @ {} = {}",
                line.number,
                line.item_name,
                line.quantity,
                money(line.unit_price),
                money(line.line_total)
            )?;
        }

        match view.discount_adjustment {
            Some(DiscountAdjustment::Unparsable) => {
                writeln!(out, "Notice: discount is not a number, using {}", money(view.discount))?
            }
            Some(DiscountAdjustment::Negative) => {
                writeln!(out, "Notice: discount cannot be negative, using {}", money(view.discount))?
            }
            Some(DiscountAdjustment::Capped) => {
                writeln!(out, "Notice: discount capped at {}", money(view.discount))?
            }
            None => {}
        }

        writeln!(
            out,
            "Subtotal: {}  GST: {}  Discount: {}  Total: {}",
            money(view.subtotal),
            money(view.gst),
            money(view.discount),
            money(view.total)
        )
    }
}

/// `"2"` → `Some(1)`; nothing typed → `None`.
fn parse_line_number(arg: Option<&str>) -> Result<Option<usize>, CommandError> {
    match arg {
        None => Ok(None),
        Some(text) => match text.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Some(n - 1)),
            _ => Err(CommandError::validation(format!(
                "'{}' is not a line number",
                text.trim()
            ))),
        },
    }
}

fn print_error<W: Write>(err: &CommandError, out: &mut W) -> io::Result<()> {
    if err.is_warning() {
        writeln!(out, "Warning: {}", err.message)
    } else {
        writeln!(out, "Error: {}", err.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_db::{Database, DbConfig};

    async fn session() -> OrderSession {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.menu().seed_if_empty().await.unwrap();
        OrderSession::new(db).await.unwrap()
    }

    async fn drive(session: &mut OrderSession, script: &str) -> String {
        let config = AppConfig::default();
        let mut out = Vec::new();
        OrderScreen::new(session, &config)
            .run(script.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ScreenCommand::parse("add Ice Cream"), ScreenCommand::Add("Ice Cream".to_string()));
        assert_eq!(ScreenCommand::parse("  REMOVE "), ScreenCommand::Remove(None));
        assert_eq!(ScreenCommand::parse("rm 2"), ScreenCommand::Remove(Some("2".to_string())));
        assert_eq!(ScreenCommand::parse(""), ScreenCommand::Empty);
        assert_eq!(ScreenCommand::parse("exit"), ScreenCommand::Quit);
        assert_eq!(ScreenCommand::parse("dance"), ScreenCommand::Unknown("dance".to_string()));
    }

    #[test]
    fn test_parse_line_number() {
        assert_eq!(parse_line_number(None).unwrap(), None);
        assert_eq!(parse_line_number(Some("2")).unwrap(), Some(1));
        assert!(parse_line_number(Some("0")).is_err());
        assert!(parse_line_number(Some("two")).is_err());
    }

    #[tokio::test]
    async fn test_full_order_flow() {
        let mut s = session().await;
        let script = "add pizza\nadd Pizza\nadd coke\ndiscount 1\ntype takeaway\npay upi\nbill\nquit\n";

        let out = drive(&mut s, script).await;

        assert!(out.contains("  1. Pizza x2 @ $10.00 = $20.00"));
        assert!(out.contains("Subtotal: $22.00  GST: $1.10  Discount: $1.00  Total: $22.10"));
        assert!(out.contains("Bill Generated"));
        assert!(out.contains("Type: Takeaway"));
        assert!(out.contains("Coke x1 @ $2.00 = $2.00"));
        assert!(out.contains("Total: $22.10"));
        assert!(out.contains("Payment: UPI"));
        assert!(s.draft().is_empty());
        assert_eq!(s.database().orders().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_menu_number_and_warnings() {
        let mut s = session().await;
        // menu order: Coffee, Coke, Juice, Tea, Ice Cream, ...
        let script = "add 5\nadd Sushi\nremove\nremove 9\nbill\n";

        let out = drive(&mut s, script).await;

        assert!(out.contains("  1. Ice Cream x1 @ $4.50 = $4.50"));
        assert!(out.contains("Warning: Menu item not found: Sushi"));
        assert!(out.contains("Warning: Please select an item to remove"));
        assert!(out.contains("Warning: Line 9 does not exist (order has 1 lines)"));
        assert!(out.contains("Bill Generated"));
    }

    #[tokio::test]
    async fn test_bill_with_nothing_ordered() {
        let mut s = session().await;

        let out = drive(&mut s, "bill\n").await;

        assert!(out.contains("Warning: No items in order"));
        assert_eq!(s.database().orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_discount_notices() {
        let mut s = session().await;

        let out = drive(&mut s, "add Tea\ndiscount abc\ndiscount -5\ndiscount 99\n").await;

        assert!(out.contains("Notice: discount is not a number, using $0.00"));
        assert!(out.contains("Notice: discount cannot be negative, using $0.00"));
        assert!(out.contains("Notice: discount capped at $2.63"));
        assert!(out.contains("Total: $0.00"));
    }

    #[tokio::test]
    async fn test_percentage_discount_bill() {
        let mut s = session().await;

        let out = drive(&mut s, "add pizza
add pizza
discount 10%
bill
").await;

        assert!(out.contains("Subtotal: $20.00  GST: $1.00  Discount: $2.00  Total: $19.00"));
        assert!(!out.contains("Notice:"));
        let (_, orders) = report::orders_on(s.database(), None).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].discount.cents(), 200);
    }

    #[tokio::test]
    async fn test_bad_type_and_unknown_command() {
        let mut s = session().await;

        let out = drive(&mut s, "type delivery\npay cheque\nfly\n").await;

        assert!(out.contains("Warning: order type must be one of"));
        assert!(out.contains("Warning: payment method must be one of"));
        assert!(out.contains("Unknown command 'fly'"));
    }

    #[tokio::test]
    async fn test_report_after_billing() {
        let mut s = session().await;

        let out = drive(&mut s, "report\nadd Burger\nbill\nreport\n").await;

        assert!(out.contains("No orders yet."));
        assert!(out.contains("Sales Report (Last 7 Days)"));
        assert!(out.contains("(1 orders)"));
    }
}
