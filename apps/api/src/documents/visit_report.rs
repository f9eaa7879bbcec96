//! Daily visitor report, A4 landscape.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use crate::documents::spanish::{long_timestamp, short_timestamp};
use crate::documents::table::{Column, TableWriter, TABLE_MARGIN};
use crate::documents::DocumentError;
use crate::layout::FontFace;
use crate::models::visit::Visit;
use crate::render::{Align, Canvas, PageSize};

pub const REPORT_TITLE: &str = "Reporte diario de visitantes";
const TABLE_TOP: f32 = 30.0;

pub const VISIT_COLUMNS: [Column; 7] = [
    Column {
        label: "Nombre completo",
        width_mm: 60.0,
    },
    Column {
        label: "Cédula",
        width_mm: 30.0,
    },
    Column {
        label: "Departamento destino",
        width_mm: 50.0,
    },
    Column {
        label: "Motivo",
        width_mm: 60.0,
    },
    Column {
        label: "Entrada",
        width_mm: 20.0,
    },
    Column {
        label: "Salida",
        width_mm: 20.0,
    },
    Column {
        label: "Registrado",
        width_mm: 45.0,
    },
];

pub fn visit_report_file_name(day: NaiveDate) -> String {
    format!("Visitantes_{}.pdf", day.format("%Y-%m-%d"))
}

fn visit_cells(visit: &Visit) -> [String; 7] {
    [
        visit.visitor_name.clone(),
        visit.id_number.clone(),
        visit.destination.clone(),
        visit.reason.clone(),
        visit.entry_time.clone(),
        visit.exit_time.clone(),
        short_timestamp(visit.registered_at),
    ]
}

/// Lays out one row per visit, in the order given.
pub fn build_visit_report(
    visits: &[Visit],
    generated_at: NaiveDateTime,
) -> Result<Canvas, DocumentError> {
    if visits.is_empty() {
        return Err(DocumentError::NoVisits);
    }

    let mut canvas = Canvas::new(PageSize::A4_LANDSCAPE);
    canvas.set_font(FontFace::Helvetica);
    canvas.set_font_size(16.0);
    canvas.text(REPORT_TITLE, TABLE_MARGIN, 15.0, Align::Left);
    canvas.set_font_size(10.0);
    canvas.text(&long_timestamp(generated_at), TABLE_MARGIN, 20.0, Align::Left);

    let mut table = TableWriter::new(&VISIT_COLUMNS, TABLE_TOP);
    table.header(&mut canvas);
    for visit in visits {
        table.row(&mut canvas, &visit_cells(visit));
    }

    info!(
        visits = visits.len(),
        pages = canvas.pages().len(),
        "Visitor report laid out"
    );
    Ok(canvas)
}
