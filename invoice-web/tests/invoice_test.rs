mod common;

use common::{location, TestApp};
use invoice_web::models::STATUS_UNPAID;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[tokio::test]
async fn create_invoice_stores_server_computed_total() {
    let app = TestApp::spawn().await;

    let response = app
        .post_invoice(
            "Budi",
            STATUS_UNPAID,
            &[("Widget", "2", "10.005"), ("Gadget", "1", "5.00"), ("", "", "")],
            "3.00",
        )
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/");

    let invoices = app.db.list_invoices().await.unwrap();
    assert_eq!(invoices.len(), 1);
    let invoice = &invoices[0];
    assert_eq!(invoice.customer_name, "Budi");
    assert_eq!(invoice.status, STATUS_UNPAID);
    assert_eq!(invoice.discount, Some(dec("3.00")));
    assert_eq!(invoice.total, dec("22.01"));
    assert!(invoice.invoice_number.starts_with("INV-"));

    let items = app.db.get_invoice_items(invoice.id).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].description, "Widget");
    assert_eq!(items[0].price, dec("10.005"));
    assert_eq!(items[1].description, "Gadget");

    let dashboard = app.get_html("/").await;
    assert!(dashboard.contains("Invoice baru berhasil dibuat!"));
}

#[tokio::test]
async fn client_supplied_total_is_ignored() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/create"))
        .form(&[
            ("customer_name", "Sari"),
            ("status", "LUNAS"),
            ("description", "Jasa"),
            ("quantity", "1"),
            ("price", "100"),
            ("total", "1"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 303);

    let invoices = app.db.list_invoices().await.unwrap();
    assert_eq!(invoices[0].total, dec("100.00"));
    assert_eq!(invoices[0].discount, None);
}

#[tokio::test]
async fn detail_page_shows_items_and_stored_total() {
    let app = TestApp::spawn().await;
    app.post_invoice(
        "Budi",
        STATUS_UNPAID,
        &[("Widget", "2", "10.005"), ("Gadget", "1", "5.00")],
        "3.00",
    )
    .await;
    let invoice = app.db.list_invoices().await.unwrap().remove(0);

    let html = app.get_html(&format!("/invoice/{}", invoice.id)).await;

    assert!(html.contains(&invoice.invoice_number));
    assert!(html.contains("Widget"));
    assert!(html.contains("Rp 20,01"));
    assert!(html.contains("Rp 25,01"));
    assert!(html.contains("Rp 3,00"));
    assert!(html.contains("data-total=\"22.01\""));
    assert!(html.contains("Rp 22,01"));
    assert!(!html.contains("Total tersimpan berbeda"));
}

#[tokio::test]
async fn unknown_or_malformed_invoice_id_is_not_found() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get("/invoice/99999").await.status().as_u16(), 404);
    assert_eq!(app.get("/invoice/abc").await.status().as_u16(), 404);
}

#[tokio::test]
async fn missing_customer_name_persists_nothing() {
    let app = TestApp::spawn().await;

    let response = app
        .post_invoice("  ", STATUS_UNPAID, &[("Widget", "1", "10")], "")
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/create");
    assert!(app.db.list_invoices().await.unwrap().is_empty());

    let page = app.get_html("/create").await;
    assert!(page.contains("Nama pelanggan wajib diisi"));
}

#[tokio::test]
async fn unparsable_quantity_rejects_whole_submission() {
    let app = TestApp::spawn().await;

    let response = app
        .post_invoice(
            "Budi",
            STATUS_UNPAID,
            &[("Widget", "1", "10"), ("Gadget", "x", "5")],
            "",
        )
        .await;

    assert_eq!(location(&response), "/create");
    assert!(app.db.list_invoices().await.unwrap().is_empty());

    let page = app.get_html("/create").await;
    assert!(page.contains("Baris 2: Jumlah"));
}

#[tokio::test]
async fn submission_without_items_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_invoice("Budi", STATUS_UNPAID, &[("", "1", "10")], "")
        .await;

    assert_eq!(location(&response), "/create");
    assert!(app.db.list_invoices().await.unwrap().is_empty());
}

#[tokio::test]
async fn invoices_created_in_same_second_get_distinct_numbers() {
    let app = TestApp::spawn().await;

    for _ in 0..3 {
        app.post_invoice("Budi", STATUS_UNPAID, &[("Widget", "1", "10")], "")
            .await;
    }

    let mut numbers: Vec<String> = app
        .db
        .list_invoices()
        .await
        .unwrap()
        .into_iter()
        .map(|invoice| invoice.invoice_number)
        .collect();
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), 3);
}

#[tokio::test]
async fn deleting_invoice_removes_its_items() {
    let app = TestApp::spawn().await;
    app.post_invoice("Budi", STATUS_UNPAID, &[("Widget", "1", "10")], "")
        .await;
    let invoice = app.db.list_invoices().await.unwrap().remove(0);

    let deleted = sqlx::query("DELETE FROM invoices WHERE id = ?1")
        .bind(invoice.id)
        .execute(app.db.pool())
        .await
        .unwrap();
    assert_eq!(deleted.rows_affected(), 1);

    assert!(app.db.get_invoice(invoice.id).await.unwrap().is_none());
    assert!(app.db.get_invoice_items(invoice.id).await.unwrap().is_empty());
    assert_eq!(
        app.get(&format!("/invoice/{}", invoice.id)).await.status().as_u16(),
        404
    );
}

#[tokio::test]
async fn detail_page_warns_when_stored_total_drifts_from_items() {
    let app = TestApp::spawn().await;
    app.post_invoice("Budi", STATUS_UNPAID, &[("Widget", "2", "5")], "")
        .await;
    let invoice = app.db.list_invoices().await.unwrap().remove(0);

    sqlx::query("UPDATE invoices SET total = ?1 WHERE id = ?2")
        .bind("99.00")
        .bind(invoice.id)
        .execute(app.db.pool())
        .await
        .unwrap();

    let html = app.get_html(&format!("/invoice/{}", invoice.id)).await;

    assert!(html.contains("Total tersimpan berbeda"));
    // The stored total stays on the page; the subtotal comes from the items.
    assert!(html.contains("data-total=\"99.00\""));
    assert!(html.contains("Rp 99,00"));
    assert!(html.contains("Rp 10,00"));
}

#[tokio::test]
async fn submission_with_too_many_rows_is_rejected() {
    let app = TestApp::spawn().await;
    let items = vec![("Widget", "1000000000000", "1000000000000"); 51];

    let response = app.post_invoice("Budi", STATUS_UNPAID, &items, "").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/create");
    assert!(app.db.list_invoices().await.unwrap().is_empty());

    let page = app.get_html("/create").await;
    assert!(page.contains("maksimal 50 baris"));
}

#[tokio::test]
async fn create_page_renders_requested_rows() {
    let app = TestApp::spawn().await;

    let html = app.get_html("/create?rows=7").await;

    assert_eq!(html.matches("name=\"description\"").count(), 7);
    assert!(html.contains("/create?rows=12"));
}
