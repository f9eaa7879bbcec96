//! Employment certificate ("Constancia de trabajo").
//!
//! Page layout (A4 portrait, millimetres):
//! - letterhead: four centered Helvetica 10pt lines at y = 15, 20, 25, 30
//! - title: "CONSTANCIA", Helvetica 16pt, centered at y = 50
//! - body: Times 12pt, justified from (20, 70), width = page − 40, 7mm leading
//! - issue line: Times Bold 12pt, justified 10mm below the body
//! - signature block: centered, 50mm below the issue line, 6mm apart
//! - footer: two centered 8pt lines at page height − 20 and − 15

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::documents::spanish::{month_name, number_to_words, short_date};
use crate::documents::DocumentError;
use crate::layout::{FontFace, GreedyLineBreaker, JustifyError, JustifyStrategy, Justifier};
use crate::models::personnel::Personnel;
use crate::render::{Align, Canvas, PageSize};

const MARGIN_LEFT: f32 = 20.0;
const MARGIN_RIGHT: f32 = 20.0;
const BODY_TOP: f32 = 70.0;
const BODY_LINE_HEIGHT: f32 = 7.0;
const ISSUE_LINE_GAP: f32 = 10.0;
const SIGNATURE_GAP: f32 = 50.0;
const SIGNATURE_LINE_HEIGHT: f32 = 6.0;

/// Institution-specific wording printed on every certificate.
#[derive(Debug, Clone, Copy)]
pub struct Letterhead {
    pub header_lines: [&'static str; 4],
    pub title: &'static str,
    /// Opening clause identifying who certifies, up to the comma before
    /// "por medio de la presente".
    pub issuer_clause: &'static str,
    pub city: &'static str,
    pub signature_lines: [&'static str; 4],
    pub contact_email: &'static str,
    pub footer_lines: [&'static str; 2],
}

pub const CLEBG_LETTERHEAD: Letterhead = Letterhead {
    header_lines: [
        "República Bolivariana de Venezuela",
        "Consejo Legislativo del Estado Bolivariano de Guárico",
        "Dirección De Gestión Humana",
        "R.I.F. G-20000485-1",
    ],
    title: "CONSTANCIA",
    issuer_clause: "Quien suscribe, Dr. LUIS EDUARDO MORENO, titular de la Cédula de Identidad \
        N° V-11.116.500, en mi carácter de Director de Gestión Humana del Consejo Legislativo \
        del Estado Bolivariano de Guárico (CLEBG)",
    city: "San Juan de los Morros",
    signature_lines: [
        "Dr. Luis Eduardo Moreno",
        "Director de Gestión Humana",
        "Del Consejo Legislativo del Estado",
        "Bolivariano Guárico.",
    ],
    contact_email: "RRHHCLEG@gmail.com",
    footer_lines: [
        "Año 207 de la Independencia, Año 157 de la federación y 18 de la Revolución Bolivariana.",
        "Palacio Legislativo. Av. Miranda, Sector la Redoma. Urb. La tropical. San Juan de los \
         Morros. Estado Bolivariano de Guárico. Teléfono: 0246-4319696 y 0424-306-55-30",
    ],
};

impl Default for Letterhead {
    fn default() -> Self {
        CLEBG_LETTERHEAD
    }
}

/// `la Ciudadana` when the name ends in `a`, otherwise `el Ciudadano`.
pub fn salutation(full_name: &str) -> &'static str {
    if full_name.trim().to_lowercase().ends_with('a') {
        "la Ciudadana"
    } else {
        "el Ciudadano"
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// Hire date as `dd/mm/yyyy`, or `None` when missing or not an ISO date.
fn formatted_hire_date(hired_on: Option<&str>) -> Option<String> {
    let raw = hired_on?.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .map(short_date)
}

/// The justified body paragraph. Missing fields print placeholders.
pub fn certificate_body(person: &Personnel, letterhead: &Letterhead) -> String {
    let hire_date = formatted_hire_date(person.hired_on.as_deref())
        .unwrap_or_else(|| "xxxxx".to_string());
    let payroll = if person.department.trim().is_empty() {
        "xx de: xxxx".to_string()
    } else {
        format!("de: {}", person.department)
    };
    let salary = or_placeholder(person.salary.as_deref().unwrap_or(""), "xxxx");

    format!(
        "{issuer}, por medio de la presente hago constar que {salutation}: {name}, titular de \
         la cedula de identidad N° V°{id_number}, se encuentra adscrito a esta dependencia \
         desempeñándose como: {position}, con fecha de ingreso: {hire_date}, en la nómina \
         {payroll}, devengando un sueldo mensual de Bs. {salary}.",
        issuer = letterhead.issuer_clause,
        salutation = salutation(&person.full_name),
        name = or_placeholder(&person.full_name, "xxxxx"),
        id_number = or_placeholder(&person.id_number, "xxxxxx"),
        position = or_placeholder(&person.position, "xxxxxx"),
    )
}

/// The bold closing line stating where and when the certificate was issued.
pub fn issue_line(issued_on: NaiveDate, city: &str) -> String {
    let day = issued_on.day();
    format!(
        "Constancia que se expide a petición de parte interesada, en {city} a los {} ({day}) \
         días del mes de {} de {}.",
        number_to_words(day),
        month_name(issued_on.month()),
        issued_on.year(),
    )
}

/// Download name offered to the browser.
pub fn certificate_file_name(person: &Personnel) -> String {
    format!(
        "Constancia_Trabajo_{}.pdf",
        or_placeholder(&person.full_name, "Personal")
    )
}

/// Lays out the full certificate for `person`.
pub fn build_work_certificate(
    person: &Personnel,
    issued_on: NaiveDate,
    letterhead: &Letterhead,
    strategy: JustifyStrategy,
) -> Result<Canvas, DocumentError> {
    let mut canvas = Canvas::new(PageSize::A4_PORTRAIT);
    let page = canvas.size();
    let center = page.width_mm / 2.0;
    let text_width = page.width_mm - MARGIN_LEFT - MARGIN_RIGHT;

    // Letterhead
    canvas.set_font_size(10.0);
    for (i, line) in letterhead.header_lines.iter().enumerate() {
        canvas.text(line, center, 15.0 + 5.0 * i as f32, Align::Center);
    }

    canvas.set_font_size(16.0);
    canvas.text(letterhead.title, center, 50.0, Align::Center);

    // Body
    canvas.set_font(FontFace::TimesRoman);
    canvas.set_font_size(12.0);
    let body = certificate_body(person, letterhead);
    let body_end = justify_paragraph(&mut canvas, strategy, &body, BODY_TOP, text_width)?;

    canvas.set_font(FontFace::TimesBold);
    let issued = issue_line(issued_on, letterhead.city);
    let issue_end = justify_paragraph(
        &mut canvas,
        strategy,
        &issued,
        body_end + ISSUE_LINE_GAP,
        text_width,
    )?;
    canvas.set_font(FontFace::TimesRoman);

    // Signature
    let mut signature_y = issue_end + SIGNATURE_GAP;
    for line in letterhead.signature_lines {
        canvas.text(line, center, signature_y, Align::Center);
        signature_y += SIGNATURE_LINE_HEIGHT;
    }
    canvas.text(letterhead.contact_email, center, signature_y, Align::Center);

    // Footer
    canvas.set_font_size(8.0);
    canvas.text(
        letterhead.footer_lines[0],
        center,
        page.height_mm - 20.0,
        Align::Center,
    );
    canvas.text(
        letterhead.footer_lines[1],
        center,
        page.height_mm - 15.0,
        Align::Center,
    );

    info!(
        personnel_id = person.id,
        issued_on = %issued_on,
        "Work certificate laid out"
    );
    Ok(canvas)
}

/// Justifies `text` at the left margin in the canvas's current font.
fn justify_paragraph(
    canvas: &mut Canvas,
    strategy: JustifyStrategy,
    text: &str,
    y: f32,
    width: f32,
) -> Result<f32, JustifyError> {
    let metrics = canvas.metrics();
    Justifier::new(metrics, GreedyLineBreaker::new(metrics))
        .with_strategy(strategy)
        .justify(canvas, text, MARGIN_LEFT, y, width, BODY_LINE_HEIGHT)
}
