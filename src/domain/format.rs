use chrono::NaiveDate;

/// Formats a date the way the orders table shows it, e.g. `21th March 2024`.
///
/// The `th` suffix is applied to every day, so the 1st renders as `1th`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{}th {} {}",
        date.format("%-d"),
        date.format("%B"),
        date.format("%Y")
    )
}
