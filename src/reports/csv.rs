//! CSV export
//!
//! Files open with a UTF-8 byte order mark and use CRLF line endings so that
//! spreadsheet applications pick the right encoding. Hours are written with a
//! decimal comma.

use std::{borrow::Cow, io};

use jiff::civil::Date;

use crate::reports::{ReportError, ReportRow};

/// UTF-8 byte order mark written at the start of every export.
pub const BOM: &str = "\u{feff}";

/// Row separator.
pub const LINE_ENDING: &str = "\r\n";

/// Decimal separator used for numeric cells.
pub const DECIMAL_SEPARATOR: char = ',';

/// Quote a value when it contains a quote, a comma or a newline.
pub fn escape(value: &str) -> Cow<'_, str> {
    if value.contains(['"', ',', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn line<'a, I>(cells: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    cells.into_iter().map(escape).collect::<Vec<_>>().join(",")
}

/// Render rows as a CSV document, or `None` when there are no rows.
pub fn render<'a, R, I>(rows: I) -> Option<String>
where
    R: ReportRow + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut rows = rows.into_iter().peekable();

    rows.peek()?;

    let mut lines = vec![line(R::HEADERS.iter().copied())];

    for row in rows {
        let fields = row.fields(DECIMAL_SEPARATOR);

        lines.push(line(fields.iter().map(String::as_str)));
    }

    Some(format!("{BOM}{}", lines.join(LINE_ENDING)))
}

/// Write rows as CSV. Nothing is written for an empty report.
///
/// Returns whether anything was written.
///
/// # Errors
///
/// Returns [`ReportError::Io`] when the destination cannot be written.
pub fn write<'a, R, I, W>(out: &mut W, rows: I) -> Result<bool, ReportError>
where
    R: ReportRow + 'a,
    I: IntoIterator<Item = &'a R>,
    W: io::Write,
{
    let Some(document) = render(rows) else {
        return Ok(false);
    };

    out.write_all(document.as_bytes())?;
    out.flush()?;

    Ok(true)
}

/// Default export file name, e.g. `shifts_2024-05-01.csv`.
pub fn file_name<R: ReportRow>(today: Date) -> String {
    format!("{}_{}.csv", R::FILE_PREFIX, today.strftime("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;
    use crate::{
        fleet::{PersonName, WorkerId},
        reports::{ShiftReportRow, SupplyReportRow},
        shifts::{ShiftStatus, WorkingShiftId},
    };

    fn row(address: &str) -> ShiftReportRow {
        ShiftReportRow {
            shift_id: WorkingShiftId::new(1),
            worker_id: WorkerId::new(2),
            person: PersonName {
                name: "Ivan".to_string(),
                surname: "Petrov".to_string(),
                last_name: String::new(),
            },
            pick_up_point_address: address.to_string(),
            start_time: date(2024, 5, 1).at(9, 0, 0, 0),
            end_time: Some(date(2024, 5, 1).at(16, 30, 0, 0)),
            hours: 7.5,
            status: ShiftStatus::Completed,
        }
    }

    #[test]
    fn escapes_only_when_needed() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn renders_bom_crlf_and_decimal_comma() -> TestResult {
        let rows = [row("Lenina 1, office 2")];

        let document = render(&rows).ok_or("expected a document")?;

        assert!(document.starts_with(BOM));

        let lines: Vec<&str> = document.trim_start_matches(BOM).split(LINE_ENDING).collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines.get(1).copied(),
            Some("1,2,Petrov,Ivan,,2024-05-01 09:00,2024-05-01 16:30,\"Lenina 1, office 2\",\"7,5\",Completed")
        );

        Ok(())
    }

    #[test]
    fn empty_report_writes_nothing() -> TestResult {
        let mut out = Vec::new();
        let rows: [ShiftReportRow; 0] = [];

        assert!(!write(&mut out, &rows)?);
        assert!(out.is_empty());

        Ok(())
    }

    #[test]
    fn file_names_carry_the_date() {
        let today = date(2024, 5, 1);

        assert_eq!(file_name::<ShiftReportRow>(today), "shifts_2024-05-01.csv");
        assert_eq!(file_name::<SupplyReportRow>(today), "supplies_2024-05-01.csv");
    }
}
