//! Terminal tables

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns as TableColumns, Rows},
    },
};

use crate::{
    fleet::{Car, Driver, PickUpPoint, Staffed, Worker},
    products::{Product, TrackedProduct},
    reports::{ReportRow, format_hours},
    shifts::WorkingShift,
    supplies::{Arrival, BoardEntry, Destination, Supply},
    time::format_display,
    users::User,
};

/// A record that can be shown as one table row.
pub trait Columns {
    /// Column headers, in cell order.
    const HEADERS: &'static [&'static str];

    /// Cells in header order.
    fn cells(&self) -> Vec<String>;
}

/// Render records as a table, or a placeholder line when there are none.
pub fn table<'a, T, I>(rows: I) -> String
where
    T: Columns + 'a,
    I: IntoIterator<Item = &'a T>,
{
    build(T::HEADERS, rows.into_iter().map(Columns::cells))
}

/// Render report rows as a table.
pub fn report<'a, R, I>(rows: I) -> String
where
    R: ReportRow + 'a,
    I: IntoIterator<Item = &'a R>,
{
    build(
        R::HEADERS,
        rows.into_iter().map(|row| row.fields('.').into_vec()),
    )
}

fn build<I>(headers: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut builder = Builder::default();
    let mut count = 0_usize;

    builder.push_record(headers.iter().map(ToString::to_string));

    for row in rows {
        builder.push_record(row);
        count += 1;
    }

    if count == 0 {
        return "No records.".to_string();
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(TableColumns::first(), Alignment::right());

    table.to_string()
}

impl Columns for () {
    const HEADERS: &'static [&'static str] = &[];

    fn cells(&self) -> Vec<String> {
        Vec::new()
    }
}

impl Columns for Destination {
    const HEADERS: &'static [&'static str] = &["Address", "Region"];

    fn cells(&self) -> Vec<String> {
        vec![self.address.clone(), self.region.to_string()]
    }
}

impl Columns for Arrival {
    const HEADERS: &'static [&'static str] = &["Address", "Driver", "Phone"];

    fn cells(&self) -> Vec<String> {
        let (driver, phone) = self.driver.as_ref().map_or_else(
            || (String::new(), String::new()),
            |contact| (contact.person.full_name(), contact.phone_number.clone()),
        );

        vec![self.address.clone(), driver, phone]
    }
}

impl<D: Columns> Columns for BoardEntry<D> {
    const HEADERS: &'static [&'static str] = &["Supply", "Time", "Status", "Confirm"];

    fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.supply.id.to_string(),
            format_display(self.supply.time),
            self.status.label().to_string(),
            if self.can_confirm() { "available" } else { "" }.to_string(),
        ];

        cells.extend(self.details.cells());

        cells
    }
}

/// Headers of a board whose entries carry `D` details.
pub fn board_headers<D: Columns>() -> Vec<&'static str> {
    BoardEntry::<D>::HEADERS
        .iter()
        .chain(D::HEADERS)
        .copied()
        .collect()
}

/// Render a supply board, detail columns included.
pub fn board<'a, D, I>(entries: I) -> String
where
    D: Columns + 'a,
    I: IntoIterator<Item = &'a BoardEntry<D>>,
{
    build(
        &board_headers::<D>(),
        entries.into_iter().map(Columns::cells),
    )
}

impl Columns for Product {
    const HEADERS: &'static [&'static str] =
        &["Product", "Articul", "Description", "Supply", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.articul.clone(),
            self.discr.clone(),
            self.supply_id.map(|id| id.to_string()).unwrap_or_default(),
            self.status.label().to_string(),
        ]
    }
}

impl Columns for TrackedProduct {
    const HEADERS: &'static [&'static str] = &[
        "Product",
        "Articul",
        "Description",
        "Supply date",
        "Status",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.product.id.to_string(),
            self.product.articul.clone(),
            self.product.discr.clone(),
            self.supply_time.map(format_display).unwrap_or_default(),
            self.product.status.label().to_string(),
        ]
    }
}

impl Columns for Car {
    const HEADERS: &'static [&'static str] = &["Car", "Number", "Region"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.number.clone(),
            self.region.to_string(),
        ]
    }
}

impl Columns for PickUpPoint {
    const HEADERS: &'static [&'static str] = &["Point", "Address", "Region"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.address.clone(),
            self.region.to_string(),
        ]
    }
}

impl Columns for Staffed<Driver> {
    const HEADERS: &'static [&'static str] = &["Driver", "Name", "Car", "User"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.record.id.to_string(),
            self.person.full_name(),
            self.record.car_id.map(|id| id.to_string()).unwrap_or_default(),
            self.record.user_id.to_string(),
        ]
    }
}

impl Columns for Staffed<Worker> {
    const HEADERS: &'static [&'static str] = &["Worker", "Name", "Point", "User"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.record.id.to_string(),
            self.person.full_name(),
            self.record
                .pick_up_point_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            self.record.user_id.to_string(),
        ]
    }
}

impl Columns for User {
    const HEADERS: &'static [&'static str] = &["User", "Login", "Name", "Phone", "Region", "Role"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.login.clone(),
            self.full_name(),
            self.phone_number.clone(),
            self.region.to_string(),
            self.role.to_string(),
        ]
    }
}

impl Columns for Supply {
    const HEADERS: &'static [&'static str] = &["Supply", "Time", "Driver", "Point", "Ready"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            format_display(self.time),
            self.driver_id.map(|id| id.to_string()).unwrap_or_default(),
            self.pick_up_point_id.to_string(),
            if self.ready { "yes" } else { "no" }.to_string(),
        ]
    }
}

impl Columns for WorkingShift {
    const HEADERS: &'static [&'static str] = &["Shift", "Start", "End", "Hours", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            format_display(self.start_time),
            self.end_time.map(format_display).unwrap_or_default(),
            format_hours(self.hours(), '.'),
            self.status().label().to_string(),
        ]
    }
}
