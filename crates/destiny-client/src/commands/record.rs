use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use destiny_shared::calendar::span_label;
use destiny_shared::catalog::CatalogRecord;
use destiny_shared::resolve_str;
use destiny_store::{Database, Enrichment, UserRecord};

use crate::state::{AppState, Resolution};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolutionView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'a UserRecord>,
    constellation: &'a CatalogRecord,
    span: Option<String>,
}

/// Resolve a date without storing or sending anything.
pub fn resolve(date: &str, json: bool) -> anyhow::Result<()> {
    let constellation = resolve_str(date.trim())?;
    print_result(None, constellation, json)
}

/// Resolve, persist and relay a date, then wait (bounded) for deliveries.
pub async fn submit(
    state: &AppState,
    date: &str,
    enrichment: Enrichment,
    flush_timeout: Duration,
    json: bool,
) -> anyhow::Result<()> {
    let (resolution, handle) = state.handle_submission(date, Some(enrichment))?;
    print_result(Some(&resolution.record), resolution.constellation, json)?;

    // Exiting drops the runtime, so give in-flight deliveries a chance first.
    if tokio::time::timeout(flush_timeout, handle.join()).await.is_err() {
        warn!(
            timeout_secs = flush_timeout.as_secs(),
            "deliveries still in flight at exit"
        );
    }
    Ok(())
}

/// Print the stored result from an earlier submission.
pub fn show(state: &AppState, json: bool) -> anyhow::Result<()> {
    match state.restore() {
        Some(Resolution {
            record,
            constellation,
        }) => print_result(Some(&record), constellation, json),
        None => {
            if json {
                println!("null");
            } else {
                println!("No result yet. Run `destiny submit <YYYY-MM-DD>`.");
            }
            Ok(())
        }
    }
}

/// Forget the stored result (or, with `all`, every local slot).
pub fn reset(state: &AppState, db: &Database, all: bool) -> anyhow::Result<()> {
    if all {
        let removed = db.wipe()?;
        println!("Cleared {removed} stored entries.");
    } else {
        state.forget_record()?;
        println!("Stored result cleared.");
    }
    Ok(())
}

fn print_result(
    record: Option<&UserRecord>,
    constellation: &CatalogRecord,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let view = ResolutionView {
            record,
            constellation,
            span: span_label(constellation.id),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render_card(record, constellation));
    }
    Ok(())
}

/// Plain-text rendering of a result card.
pub fn render_card(record: Option<&UserRecord>, c: &CatalogRecord) -> String {
    let mut lines = vec![
        format!("{} · {}", c.short_name, c.full_name),
        format!(
            "{} · {} · {}  ({})",
            c.direction,
            c.element,
            c.animal,
            span_label(c.id).unwrap_or_default()
        ),
        String::new(),
        format!("“{}”", c.poem),
        c.fortune.to_string(),
    ];

    if let Some(record) = record {
        lines.push(String::new());
        let mut who = format!("Born {}", record.birth_date);
        if let Some(name) = record.display_name() {
            who = format!("{name}, born {}", record.birth_date);
        }
        lines.push(who);
        if !record.enrichment.organization_units.is_empty() {
            let mut org = record.enrichment.organization_units.join(" / ");
            if let Some(role) = &record.enrichment.role {
                org.push_str(&format!(" - {role}"));
            }
            lines.push(org);
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use destiny_shared::{catalog, BirthDate, ConstellationId};

    #[test]
    fn card_without_record() {
        let c = catalog::get(ConstellationId(7)).unwrap();
        let card = render_card(None, c);
        assert!(card.starts_with("斗宿 · 斗木獬"));
        assert!(card.contains("北方玄武 · 木 · 獬  (12/19 - 1/1)"));
        assert!(!card.contains("Born"));
    }

    #[test]
    fn card_with_enrichment() {
        let c = catalog::get(ConstellationId(12)).unwrap();
        let record = UserRecord::new(
            BirthDate::from_ymd(1992, 2, 29).unwrap(),
            c.id,
            Some(Enrichment::new(
                Some("Liu Yang".into()),
                vec!["R&D".into(), "Platform".into()],
                Some("Engineer".into()),
            )),
        );
        let card = render_card(Some(&record), c);
        assert!(card.contains("Liu Yang, born 1992-02-29"));
        assert!(card.ends_with("R&D / Platform - Engineer"));
    }
}
