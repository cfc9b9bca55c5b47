mod common;

use common::TestApp;
use invoice_web::models::{STATUS_PAID, STATUS_UNPAID};

#[tokio::test]
async fn empty_dashboard_shows_zero_totals() {
    let app = TestApp::spawn().await;

    let html = app.get_html("/").await;

    assert!(html.contains("<strong id=\"total-invoice\">0</strong>"));
    assert!(html.contains("<strong id=\"total-nominal\">Rp 0,00</strong>"));
    assert!(html.contains("Belum ada invoice"));
}

#[tokio::test]
async fn dashboard_aggregates_all_and_paid_invoices() {
    let app = TestApp::spawn().await;
    app.post_invoice("Andi", STATUS_PAID, &[("Jasa", "1", "1500000")], "")
        .await;
    app.post_invoice("Budi", STATUS_UNPAID, &[("Barang", "2", "250000.50")], "")
        .await;
    // Only the exact status string counts as paid.
    app.post_invoice("Citra", "lunas", &[("Lain", "1", "100")], "")
        .await;

    let html = app.get_html("/").await;

    assert!(html.contains("<strong id=\"total-invoice\">3</strong>"));
    assert!(html.contains("<strong id=\"total-nominal\">Rp 2.000.101,00</strong>"));
    assert!(html.contains("<strong id=\"total-lunas\">Rp 1.500.000,00</strong>"));
    assert!(html.contains("Andi"));
    assert!(html.contains("Citra"));
}

#[tokio::test]
async fn dashboard_lists_newest_first() {
    let app = TestApp::spawn().await;
    app.post_invoice("Pertama", STATUS_UNPAID, &[("A", "1", "1")], "")
        .await;
    app.post_invoice("Kedua", STATUS_UNPAID, &[("B", "1", "1")], "")
        .await;

    let html = app.get_html("/").await;

    let first = html.find("Pertama").unwrap();
    let second = html.find("Kedua").unwrap();
    assert!(second < first);
}
