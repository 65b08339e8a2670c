//! Pretty output formatting.

use catalog_core::product::Product;

use crate::metrics::MetricsSnapshot;

/// Format a product for display.
pub fn format_product(product: &Product) -> String {
    let mut output = format!(
        "{}\n  ID: {}\n  Price: {:.2}",
        product.name, product.id, product.price
    );
    if let Some(desc) = &product.description {
        output.push_str(&format!("\n  Description: {}", desc));
    }
    output
}

/// Format products for display.
pub fn format_products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found.".to_string();
    }
    let mut output = format!("PRODUCTS ({})\n", products.len());
    output.push_str(&"-".repeat(40));
    for product in products {
        output.push_str(&format!("\n{}", format_product(product)));
        output.push('\n');
    }
    output
}

/// Format a metrics snapshot as one line per operation and outcome.
pub fn format_metrics(snapshot: &MetricsSnapshot) -> String {
    if snapshot.calls.is_empty() {
        return "No calls recorded.".to_string();
    }
    let mut output = String::from("METRICS\n");
    output.push_str(&"-".repeat(40));
    for call in &snapshot.calls {
        output.push_str(&format!(
            "\n{} [{}]: {} call(s), total {:.3}ms, max {:.3}ms",
            call.operation, call.outcome, call.count, call.total_ms, call.max_ms
        ));
    }
    for (operation, size) in &snapshot.result_sizes {
        output.push_str(&format!("\n{operation} last result size: {size}"));
    }
    output
}
