//! Tables shared by more than one dashboard.

use baklay_core::models::format_php;
use baklay_core::{BookingView, ScheduleView, Trek, User};

use crate::console::Console;
use crate::error::AppResult;
use crate::table::Table;

fn print(console: &mut dyn Console, table: &Table, empty: &str) -> AppResult<()> {
    if table.is_empty() {
        console.println(empty)?;
    } else {
        console.write(&table.render())?;
    }
    Ok(())
}

pub fn users(console: &mut dyn Console, users: &[User]) -> AppResult<()> {
    let mut table = Table::new(["ID", "Name", "Email", "Contact", "Type", "Status"]);
    for u in users {
        table.row([
            u.id.to_string(),
            u.name.clone(),
            u.email.clone(),
            u.contact.clone(),
            u.user_type.to_string(),
            u.status.to_string(),
        ]);
    }
    print(console, &table, "No users found.")
}

pub fn treks(console: &mut dyn Console, treks: &[Trek]) -> AppResult<()> {
    let mut table = Table::new(["ID", "Code", "Description", "Difficulty", "Price (PHP)"]);
    for t in treks {
        table.row([
            t.id.to_string(),
            t.code.clone(),
            t.description.clone(),
            t.difficulty.clone(),
            format_php(t.price_centavos),
        ]);
    }
    print(console, &table, "No treks found.")
}

pub fn schedules(console: &mut dyn Console, schedules: &[ScheduleView]) -> AppResult<()> {
    let mut table = Table::new(["ID", "Trek", "Date", "Price (PHP)", "Slots", "Guide"]);
    for s in schedules {
        table.row([
            s.id.to_string(),
            s.trek_description.clone(),
            s.date.to_string(),
            format_php(s.price_centavos),
            s.capacity.to_string(),
            s.guide_name.clone().unwrap_or_else(|| "Unassigned".to_string()),
        ]);
    }
    print(console, &table, "No schedules found.")
}

pub fn bookings(console: &mut dyn Console, bookings: &[BookingView]) -> AppResult<()> {
    let mut table = Table::new([
        "ID", "Customer", "Trek", "Date", "Guide", "Guests", "Total (PHP)", "Status",
    ]);
    for b in bookings {
        table.row([
            b.id.to_string(),
            b.customer_name.clone(),
            b.trek_description.clone(),
            b.schedule_date.to_string(),
            b.guide_name.clone().unwrap_or_else(|| "Unassigned".to_string()),
            b.guest_count.to_string(),
            format_php(b.total_centavos),
            b.status.to_string(),
        ]);
    }
    print(console, &table, "No bookings found.")
}
