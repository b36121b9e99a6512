//! Server-rendered booking page

use std::fmt;

use crate::{
    config::BookingConfig,
    models::{booking::BookingDraft, catalog::Catalog, enums::Period, Booking},
};

/// Escape text for HTML element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Everything the index page shows
pub struct IndexPage<'a> {
    pub catalog: &'a Catalog,
    pub rules: &'a BookingConfig,
    pub bookings: &'a [Booking],
    pub error: Option<&'a str>,
    /// Values to put back into the form after a failed submission
    pub draft: &'a BookingDraft,
}

impl IndexPage<'_> {
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_form(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.draft;
        f.write_str("<form method=\"POST\" action=\"/\" class=\"row g-3\">\n")?;
        text_input(f, "col-md-4", "Date", "date", "date", &d.date)?;
        text_input(f, "col-md-4", "Requester", "requester", "text", &d.requester)?;
        text_input(f, "col-md-4", "Subject", "subject", "text", &d.subject)?;

        f.write_str("<div class=\"col-md-3\">\n<label>Equipment</label>\n<select name=\"equipment_kind\" class=\"form-select\">\n")?;
        for entry in self.catalog.entries() {
            writeln!(
                f,
                "<option value=\"{name}\"{selected}>{name} ({quantity})</option>",
                name = escape(&entry.name),
                quantity = entry.quantity,
                selected = selected(d.equipment_kind == entry.name),
            )?;
        }
        f.write_str("</select>\n</div>\n")?;

        writeln!(
            f,
            "<div class=\"col-md-2\">\n<label>Qty</label>\n<input type=\"number\" name=\"quantity\" min=\"1\" value=\"{}\" class=\"form-control\" required>\n</div>",
            escape(&d.quantity)
        )?;

        f.write_str("<div class=\"col-md-3\">\n<label>Period</label>\n<select name=\"period\" class=\"form-select\">\n")?;
        for period in Period::ALL {
            writeln!(
                f,
                "<option{}>{}</option>",
                selected(d.period.eq_ignore_ascii_case(period.label())),
                period
            )?;
        }
        f.write_str("</select>\n</div>\n")?;

        writeln!(
            f,
            "<div class=\"col-md-2\">\n<label>Lesson</label>\n<input type=\"number\" name=\"lesson_slot\" min=\"{}\" max=\"{}\" value=\"{}\" class=\"form-control\" required>\n</div>",
            self.rules.min_lesson_slot,
            self.rules.max_lesson_slot,
            escape(&d.lesson_slot)
        )?;
        text_input(f, "col-md-12", "Activity", "activity", "text", &d.activity)?;

        f.write_str("<div class=\"col-12 text-center\">\n<button class=\"btn btn-primary btn-lg\">Book</button>\n</div>\n</form>\n")
    }

    fn write_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            "<div class=\"card shadow p-4\">\n<h4>Bookings</h4>\n<table class=\"table table-striped\">\n\
             <tr><th>Date</th><th>Requester</th><th>Subject</th><th>Equipment</th><th>Qty</th><th>Period</th><th>Lesson</th><th>Activity</th><th>Action</th></tr>\n",
        )?;
        for b in self.bookings {
            writeln!(
                f,
                "<tr><td>{date}</td><td>{requester}</td><td>{subject}</td><td>{kind}</td><td>{quantity}</td><td>{period}</td><td>{slot}</td><td>{activity}</td>\
                 <td><a href=\"/delete/{id}\" class=\"btn btn-danger btn-sm\" onclick=\"return confirm('Delete this booking?')\">Delete</a></td></tr>",
                date = b.date.format("%Y-%m-%d"),
                requester = escape(&b.requester),
                subject = escape(&b.subject),
                kind = escape(&b.equipment_kind),
                quantity = b.quantity,
                period = b.period,
                slot = b.lesson_slot,
                activity = escape(&b.activity),
                id = b.id,
            )?;
        }
        f.write_str("</table>\n</div>\n")
    }
}

impl fmt::Display for IndexPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HEAD)?;

        f.write_str("<div class=\"card shadow p-4 mb-4\">\n<h3 class=\"text-center\">Equipment Booking</h3>\n")?;
        if let Some(error) = self.error {
            writeln!(f, "<div class=\"alert alert-danger\">{}</div>", escape(error))?;
        }
        self.write_form(f)?;
        f.write_str("</div>\n")?;

        f.write_str("<div class=\"card shadow p-4 mb-4\">\n<h4>Calendar</h4>\n<div id=\"calendar\"></div>\n</div>\n")?;

        self.write_table(f)?;
        f.write_str(TAIL)
    }
}

fn selected(is_selected: bool) -> &'static str {
    if is_selected {
        " selected"
    } else {
        ""
    }
}

fn text_input(
    f: &mut fmt::Formatter<'_>,
    col: &str,
    label: &str,
    name: &str,
    kind: &str,
    value: &str,
) -> fmt::Result {
    writeln!(
        f,
        "<div class=\"{col}\">\n<label>{label}</label>\n<input type=\"{kind}\" name=\"{name}\" value=\"{value}\" class=\"form-control\" required>\n</div>",
        value = escape(value),
    )
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Equipment Booking</title>
<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css" rel="stylesheet">
<script src="https://cdn.jsdelivr.net/npm/fullcalendar@6.1.10/index.global.min.js"></script>
</head>
<body class="bg-light">
<div class="container mt-4">
"#;

const TAIL: &str = r#"</div>
<script>
document.addEventListener('DOMContentLoaded', function() {
  var calendar = new FullCalendar.Calendar(document.getElementById('calendar'), {
    initialView: 'dayGridMonth',
    events: '/events'
  });
  calendar.render();
});
</script>
</body>
</html>
"#;
