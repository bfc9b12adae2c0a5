//! Notion database fetch and record extraction.
//!
//! Queries the database through the REST API and maps its loosely-typed
//! property values into `BirthdayRecord`s. Rows missing a name or a
//! parseable birth date are skipped; one bad row never aborts the run.

use anyhow::{Context, Result};
use birthdays_core::record::{parse_birth_date, BirthdayRecord};
use serde_json::Value;

use crate::config::{NotionConfig, PropertyNames};

const NOTION_API_VERSION: &str = "2022-06-28";

pub struct NotionClient {
    http: reqwest::Client,
    token: String,
    database_id: String,
    properties: PropertyNames,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Self {
        NotionClient {
            http: reqwest::Client::new(),
            token: config.token.clone(),
            database_id: config.database_id.clone(),
            properties: config.properties.clone(),
        }
    }

    fn query_url(&self) -> String {
        format!(
            "https://api.notion.com/v1/databases/{}/query",
            self.database_id
        )
    }

    /// Fetch every page of the database and extract birthday records.
    /// Records come back in the database's own order.
    pub async fn fetch_birthdays(&self) -> Result<Vec<BirthdayRecord>> {
        let mut records = Vec::new();
        let mut skipped = 0usize;
        let mut cursor: Option<String> = None;

        loop {
            let mut body = serde_json::Map::new();
            if let Some(ref c) = cursor {
                body.insert("start_cursor".to_string(), Value::String(c.clone()));
            }

            let response = self
                .http
                .post(self.query_url())
                .bearer_auth(&self.token)
                .header("Notion-Version", NOTION_API_VERSION)
                .json(&Value::Object(body))
                .send()
                .await
                .context("Failed to reach the Notion API")?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                anyhow::bail!("Notion query failed with {}: {}", status, text);
            }

            let page: Value = response
                .json()
                .await
                .context("Failed to parse Notion response")?;

            let (page_records, page_skipped) = extract_page(&page, &self.properties);
            records.extend(page_records);
            skipped += page_skipped;

            match page["next_cursor"].as_str() {
                Some(next) if page["has_more"].as_bool().unwrap_or(false) => {
                    cursor = Some(next.to_string());
                }
                _ => break,
            }
        }

        if skipped > 0 {
            eprintln!(
                "⚠️  Skipped {} row(s) with no name or invalid birth date",
                skipped
            );
        }

        Ok(records)
    }
}

/// Extract every row of one query response page, counting skipped rows.
/// Rows keep the order the API returned them in.
fn extract_page(page: &Value, names: &PropertyNames) -> (Vec<BirthdayRecord>, usize) {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    if let Some(results) = page["results"].as_array() {
        for item in results {
            match extract_record(&item["properties"], names) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }
    }

    (records, skipped)
}

/// Map one row's properties into a record.
///
/// Returns None when the row has no usable name or birth date; the caller
/// counts it as skipped and keeps going.
fn extract_record(props: &Value, names: &PropertyNames) -> Option<BirthdayRecord> {
    let name = props[names.name.as_str()]["title"][0]["plain_text"]
        .as_str()
        .unwrap_or("")
        .trim()
        .to_string();
    if name.is_empty() {
        return None;
    }

    let birthday_str = props[names.birthday.as_str()]["date"]["start"]
        .as_str()
        .unwrap_or("");
    if birthday_str.is_empty() {
        return None;
    }
    let birth_date = parse_birth_date(birthday_str).ok()?;

    let contact_id = contact_value(&props[names.contact.as_str()]);

    // Unchecked and absent both mean the age stays hidden
    let hide_age = props[names.hide_age.as_str()]["checkbox"]
        .as_bool()
        .unwrap_or(true);

    Some(BirthdayRecord {
        name,
        birth_date,
        contact_id,
        hide_age,
    })
}

/// Contact columns are numbers in the original database, but rich text is
/// accepted too.
fn contact_value(prop: &Value) -> Option<String> {
    match &prop["number"] {
        Value::Number(n) => Some(n.to_string()),
        _ => prop["rich_text"][0]["plain_text"]
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
    }
}
