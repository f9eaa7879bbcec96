//! Spanish wording used in issued documents: numbers in words and calendar names.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

const UNITS: [&str; 10] = [
    "", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve",
];

const TEENS: [&str; 10] = [
    "diez",
    "once",
    "doce",
    "trece",
    "catorce",
    "quince",
    "dieciséis",
    "diecisiete",
    "dieciocho",
    "diecinueve",
];

const TENS: [&str; 10] = [
    "", "", "veinte", "treinta", "cuarenta", "cincuenta", "sesenta", "setenta", "ochenta",
    "noventa",
];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Spells `n` in Spanish for 0..=100; larger values come back as digits.
///
/// The twenties are written as a single word (`veintiuno`, `veintitres`), the
/// other tens as `<decena> y <unidad>`.
pub fn number_to_words(n: u32) -> String {
    match n {
        0 => "cero".to_string(),
        1..=9 => UNITS[n as usize].to_string(),
        10..=19 => TEENS[(n - 10) as usize].to_string(),
        20..=99 => {
            let tens = (n / 10) as usize;
            let unit = (n % 10) as usize;
            match (tens, unit) {
                (_, 0) => TENS[tens].to_string(),
                (2, _) => format!("veinti{}", UNITS[unit]),
                _ => format!("{} y {}", TENS[tens], UNITS[unit]),
            }
        }
        100 => "cien".to_string(),
        _ => n.to_string(),
    }
}

/// Lower-case Spanish month name for 1..=12.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTHS.get(index as usize))
        .copied()
        .unwrap_or("")
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// `dd/mm/yyyy`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// e.g. `viernes, 16 de octubre de 2026, 09:05`.
pub fn long_timestamp(at: NaiveDateTime) -> String {
    format!(
        "{}, {} de {} de {}, {}",
        weekday_name(at.weekday()),
        at.day(),
        month_name(at.month()),
        at.year(),
        at.format("%H:%M")
    )
}

/// e.g. `16/10/26, 09:05`.
pub fn short_timestamp(at: NaiveDateTime) -> String {
    at.format("%d/%m/%y, %H:%M").to_string()
}
