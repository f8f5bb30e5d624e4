//! PDF rendering of a farmer's work history.
//!
//! Produces a simple A4 table (date, work type, duration, rate, total,
//! paid-to-date) followed by a grand total line. Uses the built-in
//! Helvetica faces so no font assets are needed at runtime.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::modules::work::model::WorkRecord;
use crate::utils::errors::AppError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const TOP_MARGIN_MM: f32 = 277.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;
const ROW_STEP_MM: f32 = 7.0;

const COLUMNS: &[(&str, f32)] = &[
    ("Date", 15.0),
    ("Work", 45.0),
    ("Minutes", 100.0),
    ("Rate/hr", 125.0),
    ("Total", 150.0),
    ("Paid", 175.0),
];

pub fn render_work_history(
    farmer_name: &str,
    phone: &str,
    works: &[WorkRecord],
) -> Result<Vec<u8>, AppError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("Work history - {}", farmer_name),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::internal(anyhow::anyhow!("PDF font error: {}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::internal(anyhow::anyhow!("PDF font error: {}", e)))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = TOP_MARGIN_MM;

    layer.use_text(
        format!("Work history - {} ({})", farmer_name, phone),
        14.0,
        Mm(15.0),
        Mm(y),
        &bold,
    );
    y -= ROW_STEP_MM * 1.5;
    write_header(&layer, &bold, y);
    y -= ROW_STEP_MM;

    for work in works {
        if y < BOTTOM_MARGIN_MM {
            let (page, inner) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(inner);
            y = TOP_MARGIN_MM;
            write_header(&layer, &bold, y);
            y -= ROW_STEP_MM;
        }

        let cells = [
            work.date.format("%Y-%m-%d").to_string(),
            work.work_type.clone(),
            format!("{:.0}", work.minutes),
            format!("{:.2}", work.rate_per60),
            format!("{:.2}", work.total_amount),
            format!("{:.2}", work.payment_given),
        ];
        for ((_, x), cell) in COLUMNS.iter().zip(cells) {
            layer.use_text(cell, 10.0, Mm(*x), Mm(y), &font);
        }
        y -= ROW_STEP_MM;
    }

    let total: f64 = works.iter().map(|w| w.total_amount).sum();
    let paid: f64 = works.iter().map(|w| w.payment_given).sum();
    y -= ROW_STEP_MM * 0.5;
    layer.use_text(
        format!("Total earned: {:.2}    Total paid: {:.2}", total, paid),
        11.0,
        Mm(15.0),
        Mm(y.max(BOTTOM_MARGIN_MM)),
        &bold,
    );

    doc.save_to_bytes()
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to render PDF: {}", e)))
}

fn write_header(layer: &PdfLayerReference, bold: &IndirectFontRef, y: f32) {
    for (label, x) in COLUMNS {
        layer.use_text(*label, 10.0, Mm(*x), Mm(y), bold);
    }
}
