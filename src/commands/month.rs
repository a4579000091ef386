use anyhow::Result;
use event_tracker_core::{CalendarWidget, Filter, YearMonth};

use crate::render::render_month;

pub fn run(mut widget: CalendarWidget, month: Option<YearMonth>, filter: Option<Filter>) -> Result<()> {
    if let Some(month) = month {
        widget.go_to_month(month);
    }
    if let Some(filter) = filter {
        widget.set_filter(filter);
    }

    println!("{}", render_month(&widget));
    Ok(())
}
