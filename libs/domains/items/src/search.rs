//! KNN query construction and `FT.SEARCH` reply parsing.
//!
//! Replies are read in both protocol shapes:
//! - RESP2: `[total, key, [field, value, ...], key, [...], ...]`
//! - RESP3: `{total_results, results: [{id, extra_attributes: {field: value}}, ...], ...}`

use redis::{Cmd, Value};
use std::collections::HashMap;

use crate::error::{ItemError, ItemResult};
use crate::index::ITEM_INDEX;
use crate::models::{StoredItem, StoredSearchHit};

/// Results returned by a search
pub const KNN_LIMIT: usize = 5;

const RETURN_FIELDS: [&str; 6] = ["id", "title", "author", "image_url", "embedding", "score"];

/// `FT.SEARCH item:index "(*)=>[KNN k @embedding $blob AS score]" ... DIALECT 3`
pub fn knn_command(blob: &[u8], k: usize) -> Cmd {
    let mut cmd = redis::cmd("FT.SEARCH");
    cmd.arg(ITEM_INDEX)
        .arg(format!("(*)=>[KNN {k} @embedding $blob AS score]"))
        .arg("PARAMS")
        .arg(2)
        .arg("blob")
        .arg(blob)
        .arg("SORTBY")
        .arg("score")
        .arg("ASC")
        .arg("RETURN")
        .arg(RETURN_FIELDS.len());
    for field in RETURN_FIELDS {
        cmd.arg(field);
    }
    cmd.arg("LIMIT").arg(0).arg(k).arg("DIALECT").arg(3);
    cmd
}

/// Parse an `FT.SEARCH` reply into hits, in reply order
pub fn parse_search_reply(reply: Value) -> ItemResult<Vec<StoredSearchHit>> {
    match reply {
        Value::Array(values) => parse_resp2(values),
        Value::Map(entries) => parse_resp3(entries),
        other => Err(malformed(format!("expected array or map, got {other:?}"))),
    }
}

fn parse_resp2(values: Vec<Value>) -> ItemResult<Vec<StoredSearchHit>> {
    let mut values = values.into_iter();
    // total count, unused
    values
        .next()
        .ok_or_else(|| malformed("empty search reply"))?;

    let mut hits = Vec::new();
    while let Some(_key) = values.next() {
        let fields = match values.next() {
            Some(Value::Array(fields)) => fields,
            other => return Err(malformed(format!("expected field list, got {other:?}"))),
        };
        hits.push(hit_from_fields(pairs_from_flat(fields)?)?);
    }
    Ok(hits)
}

fn parse_resp3(entries: Vec<(Value, Value)>) -> ItemResult<Vec<StoredSearchHit>> {
    let results = entries
        .into_iter()
        .find(|(key, _)| text(key).as_deref() == Some("results"))
        .map(|(_, value)| value)
        .ok_or_else(|| malformed("search reply has no 'results'"))?;

    let Value::Array(results) = results else {
        return Err(malformed("'results' is not an array"));
    };

    results
        .into_iter()
        .map(|result| {
            let Value::Map(result) = result else {
                return Err(malformed("search result is not a map"));
            };
            let attributes = result
                .into_iter()
                .find(|(key, _)| text(key).as_deref() == Some("extra_attributes"))
                .map(|(_, value)| value)
                .ok_or_else(|| malformed("search result has no 'extra_attributes'"))?;

            let pairs = match attributes {
                Value::Map(pairs) => pairs,
                Value::Array(flat) => return hit_from_fields(pairs_from_flat(flat)?),
                _ => return Err(malformed("'extra_attributes' is not a map")),
            };
            hit_from_fields(pairs)
        })
        .collect()
}

fn pairs_from_flat(flat: Vec<Value>) -> ItemResult<Vec<(Value, Value)>> {
    if flat.len() % 2 != 0 {
        return Err(malformed("odd number of values in field list"));
    }
    let mut iter = flat.into_iter();
    let mut pairs = Vec::new();
    while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
        pairs.push((key, value));
    }
    Ok(pairs)
}

fn hit_from_fields(pairs: Vec<(Value, Value)>) -> ItemResult<StoredSearchHit> {
    let mut fields = HashMap::with_capacity(pairs.len());
    let mut score = None;

    for (key, value) in pairs {
        let key = text(&key).ok_or_else(|| malformed("field name is not text"))?;
        if key == "score" {
            score = Some(number(&value)?);
        } else if let Some(bytes) = bytes(value) {
            fields.insert(key, bytes);
        }
    }

    let score = score.ok_or_else(|| malformed("search hit has no score"))?;
    let item = StoredItem::from_fields(fields)?
        .ok_or_else(|| malformed("search hit has no fields"))?;

    Ok(StoredSearchHit { item, score })
}

fn bytes(value: Value) -> Option<Vec<u8>> {
    match value {
        Value::BulkString(bytes) => Some(bytes),
        Value::SimpleString(s) => Some(s.into_bytes()),
        Value::VerbatimString { text, .. } => Some(text.into_bytes()),
        Value::Int(n) => Some(n.to_string().into_bytes()),
        Value::Double(n) => Some(n.to_string().into_bytes()),
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::BulkString(bytes) => String::from_utf8(bytes.clone()).ok(),
        Value::SimpleString(s) => Some(s.clone()),
        Value::VerbatimString { text, .. } => Some(text.clone()),
        _ => None,
    }
}

fn number(value: &Value) -> ItemResult<f64> {
    match value {
        Value::Double(n) => Ok(*n),
        Value::Int(n) => Ok(*n as f64),
        other => text(other)
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(|| malformed(format!("score is not a number: {other:?}"))),
    }
}

fn malformed(msg: impl Into<String>) -> ItemError {
    ItemError::MalformedReply(msg.into())
}
