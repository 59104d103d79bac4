//! Indexed file objects and the search query shape used to fetch them

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Number of rows the recent-items card asks for
pub const RECENT_ITEMS_TAKE: u32 = 6;

/// A file object returned by `search.objects`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileObject {
    pub id: i64,
    #[serde(default)]
    pub pub_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub kind: i32,
    #[serde(default)]
    pub date_accessed: Option<DateTime<Utc>>,
}

impl FileObject {
    /// File name with extension, falling back to the object id
    pub fn display_name(&self) -> String {
        match (&self.name, &self.extension) {
            (Some(name), Some(ext)) if !ext.is_empty() => format!("{}.{}", name, ext),
            (Some(name), _) => name.clone(),
            (None, _) => format!("object #{}", self.id),
        }
    }

    /// Human readable "time since last access"
    pub fn accessed_label(&self, now: DateTime<Utc>) -> String {
        let Some(accessed) = self.date_accessed else {
            return "never".to_string();
        };
        let secs = (now - accessed).num_seconds().max(0);
        match secs {
            0..=59 => "just now".to_string(),
            60..=3599 => format!("{}m ago", secs / 60),
            3600..=86_399 => format!("{}h ago", secs / 3600),
            _ => format!("{}d ago", secs / 86_400),
        }
    }
}

/// Arguments for `search.objects`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchObjectsArgs {
    pub take: u32,
    pub order_and_pagination: OrderAndPagination,
    pub filters: Vec<ObjectFilter>,
}

impl SearchObjectsArgs {
    /// Objects that have ever been accessed, most recent first
    pub fn recently_accessed(take: u32) -> Self {
        Self {
            take,
            order_and_pagination: OrderAndPagination::OrderOnly(Ordering {
                field: OrderField::DateAccessed,
                value: SortDirection::Desc,
            }),
            filters: vec![ObjectFilter::Object(ObjectCriteria {
                date_accessed: TimeRange {
                    from: Utc.timestamp_opt(0, 0).single().unwrap_or_default(),
                },
            })],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderAndPagination {
    OrderOnly(Ordering),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ordering {
    pub field: OrderField,
    pub value: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderField {
    DateAccessed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectFilter {
    Object(ObjectCriteria),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectCriteria {
    pub date_accessed: TimeRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
}
