use destiny_shared::calendar::span_label;
use destiny_shared::catalog::{self, CatalogRecord};

/// One line per mansion: id, names, quarter and date span.
pub fn list(json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(catalog::all())?);
        return Ok(());
    }

    for record in catalog::all() {
        println!("{}", summary_line(record));
    }
    Ok(())
}

pub fn summary_line(record: &CatalogRecord) -> String {
    format!(
        "{:>2}  {}  {}  {:<8} {}",
        record.id.0,
        record.short_name,
        record.full_name,
        record.direction.to_string(),
        span_label(record.id).unwrap_or_default()
    )
}
