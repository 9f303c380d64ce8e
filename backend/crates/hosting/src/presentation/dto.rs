//! Response shapes

use serde::Serialize;

/// A read answers the bare row when exactly one matched, an array otherwise
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(mut rows: Vec<T>) -> Self {
        if rows.len() == 1 {
            if let Some(row) = rows.pop() {
                return OneOrMany::One(row);
            }
        }
        OneOrMany::Many(rows)
    }
}
