use std::io::{BufRead, Write};

use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use crate::application::order_service::OrderService;
use crate::domain::format::format_date;
use crate::domain::order::{CoffeeType, Draft, DraftField, FieldUpdate, Order};
use crate::domain::ports::{OrderRepository, StatusSource};
use crate::errors::AppError;

// ── Commands ─────────────────────────────────────────────────────────────────

/// One line of terminal input.
#[derive(Parser, Debug)]
#[command(
    name = "orders",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Edit the draft order and manage the orders table"
)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Command,
}

impl CommandLine {
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(line.split_whitespace())
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set a draft field
    Set {
        /// coffeeType, weight, amount, deliveryDate or postDate
        field: DraftField,
        /// Coffee type name, whole number, or YYYY-MM-DD date
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Blank a draft field
    Clear { field: DraftField },
    /// Create an order from the draft
    Submit,
    /// Show all orders
    List,
    /// Show the current draft
    Draft,
    /// Dump all orders as JSON
    Json,
    /// Leave
    #[command(visible_alias = "exit")]
    Quit,
}

/// Parses a raw form value into a typed update for `field`.
pub fn parse_field_update(field: DraftField, raw: &str) -> Result<FieldUpdate, AppError> {
    let raw = raw.trim();
    let invalid =
        |what: &str| AppError::InvalidInput(format!("{} '{}' is not {}", field, raw, what));

    Ok(match field {
        DraftField::CoffeeType => FieldUpdate::CoffeeType(Some(
            raw.parse::<CoffeeType>()
                .map_err(|e| AppError::InvalidInput(e.to_string()))?,
        )),
        DraftField::Weight => FieldUpdate::Weight(Some(
            raw.parse::<u32>()
                .map_err(|_| invalid("a non-negative whole number of grams"))?,
        )),
        DraftField::Amount => FieldUpdate::Amount(Some(
            raw.parse::<u32>()
                .map_err(|_| invalid("a non-negative whole number"))?,
        )),
        DraftField::DeliveryDate => FieldUpdate::DeliveryDate(Some(
            parse_date(raw).map_err(|_| invalid("a YYYY-MM-DD date"))?,
        )),
        DraftField::PostDate => FieldUpdate::PostDate(Some(
            parse_date(raw).map_err(|_| invalid("a YYYY-MM-DD date"))?,
        )),
    })
}

fn parse_date(raw: &str) -> chrono::ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
}

// ── Handler ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// Runs one command against the session and returns what to print.
pub fn handle<R, S>(
    service: &mut OrderService<R, S>,
    command: Command,
) -> Result<Outcome, AppError>
where
    R: OrderRepository,
    S: StatusSource,
{
    let output = match command {
        Command::Set { field, value } => {
            let update = parse_field_update(field, &value.join(" "))?;
            service.set_field(update);
            render_draft(service.draft())
        }
        Command::Clear { field } => {
            service.set_field(FieldUpdate::cleared(field));
            render_draft(service.draft())
        }
        Command::Submit => {
            let order = service.submit()?;
            format!("Created order\n{}", render_table(std::slice::from_ref(&order)))
        }
        Command::List => render_table(service.list_orders()),
        Command::Draft => render_draft(service.draft()),
        Command::Json => serde_json::to_string_pretty(service.list_orders())?,
        Command::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Continue(output))
}

/// Parses and runs one line. `help` and `--help` print the generated usage.
pub fn handle_line<R, S>(service: &mut OrderService<R, S>, line: &str) -> Result<Outcome, AppError>
where
    R: OrderRepository,
    S: StatusSource,
{
    match CommandLine::parse_line(line) {
        Ok(parsed) => handle(service, parsed.command),
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            Ok(Outcome::Continue(e.to_string().trim_end().to_string()))
        }
        Err(e) => Err(AppError::InvalidInput(e.to_string().trim_end().to_string())),
    }
}

/// Reads commands until EOF or `quit`, writing each result to `writer`.
///
/// Input errors are reported and the session goes on; bytes that are not
/// UTF-8 are replaced rather than rejected. Only I/O failures end the loop.
pub fn run_session<B, W, R, S>(
    mut reader: B,
    mut writer: W,
    service: &mut OrderService<R, S>,
) -> Result<(), AppError>
where
    B: BufRead,
    W: Write,
    R: OrderRepository,
    S: StatusSource,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match handle_line(service, line) {
            Ok(Outcome::Continue(output)) => writeln!(writer, "{}", output)?,
            Ok(Outcome::Quit) => break,
            Err(e) => {
                log::warn!("{}", e);
                writeln!(writer, "{}", e)?;
            }
        }
        writer.flush()?;
    }
    Ok(())
}

// ── Rendering ────────────────────────────────────────────────────────────────

const HEADERS: [&str; 6] = [
    "Coffee Type",
    "Weight (g)",
    "Amount (pcs)",
    "Delivery Date",
    "Post Date",
    "Status",
];

/// Renders orders as a text table. The first column is left-aligned, the rest right-aligned.
pub fn render_table(orders: &[Order]) -> String {
    let rows: Vec<[String; 6]> = orders
        .iter()
        .map(|o| {
            [
                o.coffee_type().to_string(),
                o.weight().to_string(),
                o.amount().to_string(),
                format_date(o.delivery_date()),
                format_date(o.post_date()),
                o.status().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let header = HEADERS.map(str::to_string);
    std::iter::once(&header)
        .chain(rows.iter())
        .map(|row| render_row(row, &widths))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_row(cells: &[String; 6], widths: &[usize; 6]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &w))| {
            if i == 0 {
                format!("{:<w$}", cell, w = w)
            } else {
                format!("{:>w$}", cell, w = w)
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

pub fn render_draft(draft: &Draft) -> String {
    fn show<T: ToString>(v: Option<T>) -> String {
        v.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
    }

    [
        (DraftField::CoffeeType, show(draft.coffee_type)),
        (DraftField::Weight, show(draft.weight)),
        (DraftField::Amount, show(draft.amount)),
        (DraftField::DeliveryDate, show(draft.delivery_date)),
        (DraftField::PostDate, show(draft.post_date)),
    ]
    .iter()
    .map(|(field, value)| format!("{:<12} {}", field.name(), value))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;
    use crate::infrastructure::order_repo::InMemoryOrderRepository;

    /// Always answers the same status.
    struct FixedStatus(OrderStatus);

    impl StatusSource for FixedStatus {
        fn next_status(&mut self) -> OrderStatus {
            self.0
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn service() -> OrderService<InMemoryOrderRepository, FixedStatus> {
        OrderService::new(
            InMemoryOrderRepository::initialize(date(2024, 1, 1)),
            FixedStatus(OrderStatus::Picking),
        )
    }

    fn parse(line: &str) -> Command {
        CommandLine::parse_line(line)
            .expect("valid command")
            .command
    }

    #[test]
    fn parses_set_with_multi_word_value() {
        assert_eq!(
            parse("set coffeeType Black Coffee"),
            Command::Set {
                field: DraftField::CoffeeType,
                value: vec!["Black".to_string(), "Coffee".to_string()],
            }
        );
    }

    #[test]
    fn set_applies_parsed_numbers_and_dates() {
        let mut svc = service();
        handle_line(&mut svc, "set weight 500").expect("valid edit");
        handle_line(&mut svc, "set postDate 2024-01-06").expect("valid edit");
        handle_line(&mut svc, "set coffeeType black coffee").expect("valid edit");

        assert_eq!(svc.draft().weight, Some(500));
        assert_eq!(svc.draft().post_date, Some(date(2024, 1, 6)));
        assert_eq!(svc.draft().coffee_type, Some(CoffeeType::BlackCoffee));
    }

    #[test]
    fn parses_clear() {
        assert_eq!(
            parse("clear deliveryDate"),
            Command::Clear {
                field: DraftField::DeliveryDate
            }
        );
    }

    #[test]
    fn parses_bare_verbs() {
        assert_eq!(parse("  submit "), Command::Submit);
        assert_eq!(parse("list"), Command::List);
        assert_eq!(parse("exit"), Command::Quit);
    }

    #[test]
    fn rejects_negative_weight() {
        let mut svc = service();
        let err = handle_line(&mut svc, "set weight -5").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg.contains("weight")));
        assert_eq!(svc.draft().weight, Some(0));
    }

    #[test]
    fn rejects_unknown_field_and_command() {
        let mut svc = service();
        assert!(matches!(
            handle_line(&mut svc, "set colour red"),
            Err(AppError::InvalidInput(msg)) if msg.contains("unknown field 'colour'")
        ));
        assert!(matches!(
            handle_line(&mut svc, "brew"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_set_without_value() {
        assert!(CommandLine::parse_line("set amount").is_err());
    }

    #[test]
    fn help_lists_every_command() {
        let mut svc = service();
        let Outcome::Continue(help) = handle_line(&mut svc, "help").expect("help renders") else {
            panic!("help should not quit");
        };
        for verb in ["set", "clear", "submit", "list", "draft", "json", "quit"] {
            assert!(help.contains(verb), "help is missing {}", verb);
        }
    }

    #[test]
    fn session_survives_invalid_utf8_line() {
        let mut svc = service();
        let mut input = b"set coffeeType Arabica\nset deliveryDate 2024-01-05\n\
set postDate 2024-01-06\nsubmit\n"
            .to_vec();
        input.extend_from_slice(b"\xff\xfe\n");
        input.extend_from_slice(b"list\n");
        let mut output = Vec::new();

        run_session(&input[..], &mut output, &mut svc).expect("session ends cleanly");

        let output = String::from_utf8(output).expect("utf-8 output");
        assert_eq!(svc.list_orders().len(), 4);
        assert!(output.contains("Invalid input"));
        let table = output
            .rsplit("Invalid input")
            .next()
            .expect("text after the error");
        assert_eq!(
            table.lines().filter(|l| l.starts_with("Arabica")).count(),
            2,
            "list ran after the bad line"
        );
    }

    #[test]
    fn session_stops_at_quit() {
        let mut svc = service();
        let mut output = Vec::new();

        run_session(&b"quit\nlist\n"[..], &mut output, &mut svc).expect("session ends cleanly");

        assert!(output.is_empty());
    }

    #[test]
    fn table_has_header_and_formatted_dates() {
        let orders = vec![Order::new(
            CoffeeType::Decaf,
            11123,
            10,
            date(2024, 3, 21),
            date(2024, 3, 1),
            OrderStatus::Delivered,
        )];

        let table = render_table(&orders);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Coffee Type"));
        assert!(lines[0].ends_with("Status"));
        assert!(lines[1].starts_with("Decaf"));
        assert!(lines[1].contains("21th March 2024"));
        assert!(lines[1].contains("1th March 2024"));
        assert!(lines[1].ends_with("Delivered"));
    }

    #[test]
    fn draft_view_marks_unset_fields() {
        let view = render_draft(&Draft::empty());
        assert!(view.contains("coffeeType   -"));
        assert!(view.contains("weight       0"));
    }
}
