// services/export_service.rs
use anyhow::Result;
use chrono::NaiveDate;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use rust_xlsxwriter::{Format, Workbook};

use crate::models::{
    commissionmodel::CommissionExportRow,
    dcsrmodel::{DcsrCounts, DcsrReport},
};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

const DCSR_REPORT_TITLE: &str = "Daily Client/Sales Report";
const COMMISSION_REPORT_TITLE: &str = "Commission Report";

// Prices are stored in minor units
fn money(amount: i64) -> f64 {
    amount as f64 / 100.0
}

fn dcsr_rows(counts: &DcsrCounts) -> [(&'static str, i64); 5] {
    [
        ("New listings", counts.listings_count),
        ("New leads", counts.leads_count),
        ("Sales closed", counts.sales_count),
        ("Rentals closed", counts.rent_count),
        ("Viewings held", counts.viewings_count),
    ]
}

pub fn dcsr_report_xlsx(report: &DcsrReport) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("DCSR")?;

    sheet.write_string_with_format(0, 0, DCSR_REPORT_TITLE, &bold)?;
    sheet.write_string(1, 0, "Period")?;
    sheet.write_string(1, 1, format!("{} to {}", report.start_date, report.end_date))?;

    sheet.write_string_with_format(3, 0, "Metric", &bold)?;
    sheet.write_string_with_format(3, 1, "Count", &bold)?;

    for (offset, (label, value)) in dcsr_rows(&report.counts()).iter().enumerate() {
        let row = 4 + offset as u32;
        sheet.write_string(row, 0, *label)?;
        sheet.write_number(row, 1, *value as f64)?;
    }

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

pub fn dcsr_report_pdf(report: &DcsrReport) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "DCSR Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let layer = doc.get_page(page).get_layer(layer);

    layer.use_text(DCSR_REPORT_TITLE, 16.0, Mm(20.0), Mm(270.0), &bold);
    layer.use_text(
        format!("Period: {} to {}", report.start_date, report.end_date),
        11.0,
        Mm(20.0),
        Mm(260.0),
        &font,
    );

    let mut y = 245.0;
    for (label, value) in dcsr_rows(&report.counts()) {
        layer.use_text(label, 11.0, Mm(20.0), Mm(y), &font);
        layer.use_text(value.to_string(), 11.0, Mm(90.0), Mm(y), &font);
        y -= 8.0;
    }

    let bytes = doc.save_to_bytes()?;
    Ok(bytes)
}

pub fn commissions_xlsx(
    rows: &[CommissionExportRow],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Commissions")?;

    sheet.write_string_with_format(0, 0, COMMISSION_REPORT_TITLE, &bold)?;
    sheet.write_string(1, 0, "Period")?;
    sheet.write_string(1, 1, format!("{} to {}", start, end))?;

    let headers = [
        "Reference",
        "Agent",
        "Sale amount",
        "Rate (bps)",
        "Commission",
        "Closed",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(3, col as u16, *header, &bold)?;
    }

    let mut total = 0i64;
    for (offset, row) in rows.iter().enumerate() {
        let r = 4 + offset as u32;
        sheet.write_string(r, 0, &row.reference_number)?;
        sheet.write_string(r, 1, &row.agent_name)?;
        sheet.write_number(r, 2, money(row.sale_amount))?;
        sheet.write_number(r, 3, row.rate_bps as f64)?;
        sheet.write_number(r, 4, money(row.amount))?;
        let closed = row.closed_date.map(|d| d.to_string()).unwrap_or_default();
        sheet.write_string(r, 5, closed)?;
        total += row.amount;
    }

    let total_row = 5 + rows.len() as u32;
    sheet.write_string_with_format(total_row, 3, "Total", &bold)?;
    sheet.write_number_with_format(total_row, 4, money(total), &bold)?;

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

pub fn commissions_pdf(
    rows: &[CommissionExportRow],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Commission Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    layer.use_text(COMMISSION_REPORT_TITLE, 16.0, Mm(20.0), Mm(275.0), &bold);
    layer.use_text(
        format!("Period: {} to {}", start, end),
        11.0,
        Mm(20.0),
        Mm(266.0),
        &font,
    );

    let mut y = 250.0;
    let mut total = 0i64;

    for row in rows {
        if y < 20.0 {
            let (page, new_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(new_layer);
            y = 275.0;
        }

        let closed = row.closed_date.map(|d| d.to_string()).unwrap_or_default();
        let line = format!(
            "{}  {}  {:.2}  {} bps  {:.2}  {}",
            row.reference_number,
            row.agent_name,
            money(row.sale_amount),
            row.rate_bps,
            money(row.amount),
            closed
        );
        layer.use_text(line, 10.0, Mm(20.0), Mm(y), &font);
        y -= 7.0;

        total += row.amount;
    }

    layer.use_text(
        format!("Total commission: {:.2}", money(total)),
        11.0,
        Mm(20.0),
        Mm(y - 5.0),
        &bold,
    );

    let bytes = doc.save_to_bytes()?;
    Ok(bytes)
}

pub fn dcsr_export_filename(start: NaiveDate, end: NaiveDate, extension: &str) -> String {
    format!("dcsr-report-{}-to-{}.{}", start, end, extension)
}

pub fn commission_export_filename(start: NaiveDate, end: NaiveDate, extension: &str) -> String {
    format!("commission-report-{}-to-{}.{}", start, end, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_report() -> DcsrReport {
        DcsrReport {
            id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            listings_count: 12,
            leads_count: 30,
            sales_count: 4,
            rent_count: 7,
            viewings_count: 21,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample_rows() -> Vec<CommissionExportRow> {
        vec![
            CommissionExportRow {
                reference_number: "FSAPT241".to_string(),
                agent_name: "Amina Yusuf".to_string(),
                sale_amount: 50_000_000,
                rate_bps: 250,
                amount: 1_250_000,
                closed_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            },
            CommissionExportRow {
                reference_number: "FRVIL242".to_string(),
                agent_name: "Tunde Bello".to_string(),
                sale_amount: 12_000_000,
                rate_bps: 250,
                amount: 300_000,
                closed_date: NaiveDate::from_ymd_opt(2024, 1, 20),
            },
        ]
    }

    #[test]
    fn test_dcsr_xlsx_is_a_zip_archive() {
        let buffer = dcsr_report_xlsx(&sample_report()).unwrap();
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_dcsr_pdf_has_pdf_header() {
        let bytes = dcsr_report_pdf(&sample_report()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_commissions_xlsx_is_a_zip_archive() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let buffer = commissions_xlsx(&sample_rows(), start, end).unwrap();
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_commissions_pdf_handles_empty_rows() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let bytes = commissions_pdf(&[], start, end).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_dcsr_heading_spells_out_the_acronym() {
        assert_eq!(DCSR_REPORT_TITLE, "Daily Client/Sales Report");
        assert_eq!(COMMISSION_REPORT_TITLE, "Commission Report");
    }

    #[test]
    fn test_export_filenames() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            dcsr_export_filename(start, end, "xlsx"),
            "dcsr-report-2024-01-01-to-2024-01-31.xlsx"
        );
        assert_eq!(
            commission_export_filename(start, end, "pdf"),
            "commission-report-2024-01-01-to-2024-01-31.pdf"
        );
    }
}
