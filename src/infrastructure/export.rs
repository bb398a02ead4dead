use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::domain::Order;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const HEADER: [&str; 8] = [
    "order_id",
    "created_at",
    "restaurant",
    "status",
    "item",
    "qty",
    "unit_price",
    "line_total",
];

/// Writes order history as CSV, one row per ordered item.
pub struct OrderExporter;

impl OrderExporter {
    pub fn export_to_csv(orders: &[Order], path: &Path) -> Result<usize, ExportError> {
        let file = std::fs::File::create(path)?;
        let rows = Self::write_orders(orders, file)?;
        info!(rows, path = %path.display(), "Exported order history");
        Ok(rows)
    }

    pub fn write_orders<W: Write>(orders: &[Order], writer: W) -> Result<usize, ExportError> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(HEADER)?;

        let mut rows = 0;
        for order in orders {
            for item in &order.items {
                let qty = item.qty.to_string();
                let unit_price = item.price.to_string();
                let line_total = (u64::from(item.qty) * item.price).to_string();
                writer.write_record([
                    order.id.as_str(),
                    order.created_at.as_str(),
                    order.restaurant_name.as_str(),
                    order.status.as_str(),
                    item.name.as_str(),
                    qty.as_str(),
                    unit_price.as_str(),
                    line_total.as_str(),
                ])?;
                rows += 1;
            }
        }

        writer.flush()?;
        Ok(rows)
    }
}
