//! Staff listing for one department, A4 landscape.

use tracing::info;

use crate::documents::table::{Column, TableWriter, TABLE_MARGIN};
use crate::documents::DocumentError;
use crate::layout::FontFace;
use crate::models::department::Department;
use crate::models::personnel::Personnel;
use crate::render::{Align, Canvas, PageSize};

const TABLE_TOP: f32 = 25.0;

pub const LISTING_COLUMNS: [Column; 6] = [
    Column {
        label: "Cédula",
        width_mm: 30.0,
    },
    Column {
        label: "Nombre",
        width_mm: 60.0,
    },
    Column {
        label: "Cargo",
        width_mm: 45.0,
    },
    Column {
        label: "Teléfono",
        width_mm: 35.0,
    },
    Column {
        label: "Email",
        width_mm: 70.0,
    },
    Column {
        label: "Vacaciones",
        width_mm: 45.0,
    },
];

pub fn listing_file_name(department: &Department) -> String {
    format!("Listado_{}.pdf", department.name)
}

fn person_cells(person: &Personnel) -> [&str; 6] {
    [
        person.id_number.as_str(),
        person.full_name.as_str(),
        person.position.as_str(),
        person.phone.as_deref().unwrap_or(""),
        person.email.as_deref().unwrap_or(""),
        person.pending_vacation.as_str(),
    ]
}

pub fn build_department_listing(
    department: &Department,
    personnel: &[Personnel],
) -> Result<Canvas, DocumentError> {
    if personnel.is_empty() {
        return Err(DocumentError::EmptyDepartment(department.name.clone()));
    }

    let mut canvas = Canvas::new(PageSize::A4_LANDSCAPE);
    canvas.set_font(FontFace::Helvetica);
    canvas.set_font_size(16.0);
    canvas.text(
        &format!("Listado de personal - {}", department.name),
        TABLE_MARGIN,
        15.0,
        Align::Left,
    );
    canvas.set_font_size(10.0);
    canvas.text(
        &format!("Total de registros: {}", personnel.len()),
        TABLE_MARGIN,
        20.0,
        Align::Left,
    );

    let mut table = TableWriter::new(&LISTING_COLUMNS, TABLE_TOP);
    table.header(&mut canvas);
    for person in personnel {
        table.row(&mut canvas, &person_cells(person));
    }

    info!(
        department = %department.name,
        personnel = personnel.len(),
        "Department listing laid out"
    );
    Ok(canvas)
}
