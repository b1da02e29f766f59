//! JSON bodies shaped like the backends' responses.

use blacklistdb::reports::NewReport;
use serde_json::{json, Value};

pub const REPORTS_PATH: &str = "/scammers/";
pub const BANKS_PATH: &str = "/nigerian-banks";
pub const QUERY_PATH: &str = "/data/query/production";

pub fn report_json(id: u64, scammer: &str) -> Value {
    json!({
        "id": id,
        "scammers_name": scammer,
        "business_name": "",
        "scammers_account": "0123456789",
        "scammers_bank": "Access Bank",
        "scammers_phone": "08030000000",
        "scammers_instagram": null,
        "scammers_twitter": "",
        "date_occurred": "2025-04-01",
        "description": "Collected payment and blocked me.",
        "scammers_image": null,
        "other_documents": null,
        "created_at": "2025-04-02T10:00:00Z"
    })
}

pub fn bank_json(code: &str, name: &str) -> Value {
    json!({ "code": code, "name": name })
}

pub fn new_report(scammer: &str) -> NewReport {
    NewReport {
        reporter_name: "Ada".to_string(),
        reporter_email: "ada@example.com".to_string(),
        reporter_phone: "08011111111".to_string(),
        scammer_name: scammer.to_string(),
        account_number: "0123456789".to_string(),
        bank: "Access Bank".to_string(),
        phone: "08030000000".to_string(),
        date_occurred: "2025-04-01".to_string(),
        description: "Collected payment and blocked me.".to_string(),
        ..Default::default()
    }
}

/// An article as returned by the list projection.
pub fn article_json(id: &str, title: &str, featured: bool, published_at: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "slug": { "current": id },
        "excerpt": format!("All about {}", title),
        "author": { "name": "Ngozi" },
        "featured": featured,
        "readTime": "3 min read",
        "body": [
            { "_type": "block", "style": "normal", "children": [{ "text": title }] }
        ],
        "publishedAt": published_at,
        "mainImage": null
    })
}

/// `n` articles, newest first, none featured.
pub fn articles(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            article_json(
                &format!("post-{}", i),
                &format!("Post {}", i),
                false,
                &format!("2025-04-{:02}T09:00:00Z", 28 - i),
            )
        })
        .collect()
}

pub fn envelope(result: Value) -> Value {
    json!({ "result": result })
}
