//! Post summary model: the rows of the summary index and the inputs that
//! create or patch them.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

pub const POST_LINK_PREFIX: &str = "/blog/posts/";
pub const MAX_POST_NAME_LEN: usize = 128;

/// Canonical URL path of the post named `name`.
pub fn post_link(name: &str) -> String {
    format!("{POST_LINK_PREFIX}{name}")
}

/// Post names double as file stems and URL segments, so only a conservative
/// ASCII alphabet is accepted.
pub fn validate_post_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::validation("post name must not be empty"));
    }
    if name.len() > MAX_POST_NAME_LEN {
        return Err(DomainError::validation(format!(
            "post name exceeds {MAX_POST_NAME_LEN} bytes"
        )));
    }
    if let Some(invalid) = name
        .chars()
        .find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '_'))
    {
        return Err(DomainError::validation(format!(
            "post name contains unsupported character `{invalid}`"
        )));
    }
    Ok(())
}

/// One row of the summary index exactly as persisted.
///
/// Every field is optional so that a hand-edited or truncated row still
/// loads; [`PostSummaryEntry::try_from`] decides whether it is displayable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl SummaryRecord {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|candidate| candidate == tag))
    }
}

/// A summary row with every display field present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummaryEntry {
    pub name: String,
    pub image: String,
    pub link: String,
    pub title: String,
    pub date: String,
    pub author: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl TryFrom<&SummaryRecord> for PostSummaryEntry {
    type Error = DomainError;

    fn try_from(record: &SummaryRecord) -> Result<Self, Self::Error> {
        fn required(value: &Option<String>, field: &'static str) -> Result<String, DomainError> {
            value.clone().ok_or(DomainError::missing_field(field))
        }

        Ok(Self {
            name: required(&record.name, "name")?,
            image: required(&record.image, "image")?,
            link: required(&record.link, "link")?,
            title: required(&record.title, "title")?,
            date: required(&record.date, "date")?,
            author: required(&record.author, "author")?,
            description: required(&record.description, "description")?,
            tags: record
                .tags
                .clone()
                .ok_or(DomainError::missing_field("tags"))?,
        })
    }
}

impl From<PostSummaryEntry> for SummaryRecord {
    fn from(entry: PostSummaryEntry) -> Self {
        Self {
            name: Some(entry.name),
            image: Some(entry.image),
            link: Some(entry.link),
            title: Some(entry.title),
            date: Some(entry.date),
            author: Some(entry.author),
            description: Some(entry.description),
            tags: Some(entry.tags),
        }
    }
}

/// Metadata supplied when creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInfo {
    pub name: String,
    pub image_src: String,
    pub title: String,
    pub author: String,
    pub date: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl PostInfo {
    pub fn link(&self) -> String {
        post_link(&self.name)
    }

    pub fn into_entry(self) -> PostSummaryEntry {
        let link = self.link();
        PostSummaryEntry {
            name: self.name,
            image: self.image_src,
            link,
            title: self.title,
            date: self.date,
            author: self.author,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Partial update applied by an edit. Absent fields keep their prior value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub new_name: Option<String>,
    pub image_src: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    /// Merge the patch into `record`, recomputing `link` from the merged name.
    pub fn apply_to(&self, record: &mut SummaryRecord) {
        fn merge<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if let Some(value) = value {
                *target = Some(value.clone());
            }
        }

        merge(&mut record.name, &self.new_name);
        merge(&mut record.image, &self.image_src);
        merge(&mut record.title, &self.title);
        merge(&mut record.author, &self.author);
        merge(&mut record.date, &self.date);
        merge(&mut record.description, &self.description);
        merge(&mut record.tags, &self.tags);

        if let Some(name) = record.name.as_deref() {
            record.link = Some(post_link(name));
        }
    }
}

/// Index of the first record whose `name` equals `name`.
pub fn position_by_name(entries: &[SummaryRecord], name: &str) -> Option<usize> {
    entries.iter().position(|entry| entry.name() == Some(name))
}

/// First record whose `name` equals `name`.
pub fn find_by_name<'a>(entries: &'a [SummaryRecord], name: &str) -> Option<&'a SummaryRecord> {
    entries.iter().find(|entry| entry.name() == Some(name))
}

/// Records carrying `tag`, in stored order.
pub fn filter_by_tag<'a>(entries: &'a [SummaryRecord], tag: &str) -> Vec<&'a SummaryRecord> {
    entries.iter().filter(|entry| entry.has_tag(tag)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, tags: &[&str]) -> SummaryRecord {
        PostInfo {
            name: name.to_string(),
            image_src: "/i.png".to_string(),
            title: name.to_uppercase(),
            author: "A".to_string(),
            date: "2024-01-01".to_string(),
            description: "d".to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
        .into_entry()
        .into()
    }

    #[test]
    fn link_is_derived_from_name() {
        assert_eq!(post_link("hello"), "/blog/posts/hello");
        assert_eq!(record("hello", &[]).link.as_deref(), Some("/blog/posts/hello"));
    }

    #[test]
    fn rejects_names_that_escape_the_content_directory() {
        assert!(validate_post_name("hello-world_2").is_ok());
        assert!(validate_post_name("").is_err());
        assert!(validate_post_name("../etc/passwd").is_err());
        assert!(validate_post_name("a b").is_err());
        assert!(validate_post_name(&"x".repeat(MAX_POST_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn find_by_name_returns_first_match() {
        let mut second = record("dup", &["b"]);
        second.title = Some("second".into());
        let entries = vec![record("a", &[]), record("dup", &["a"]), second];

        let found = find_by_name(&entries, "dup").expect("present");
        assert_eq!(found.title.as_deref(), Some("DUP"));
        assert_eq!(position_by_name(&entries, "dup"), Some(1));
        assert!(find_by_name(&entries, "missing").is_none());
    }

    #[test]
    fn filter_by_tag_preserves_relative_order() {
        let entries = vec![
            record("one", &["rust", "intro"]),
            record("two", &["misc"]),
            record("three", &["intro"]),
            SummaryRecord {
                name: Some("untagged".into()),
                ..SummaryRecord::default()
            },
        ];

        let names: Vec<_> = filter_by_tag(&entries, "intro")
            .into_iter()
            .filter_map(SummaryRecord::name)
            .collect();
        assert_eq!(names, ["one", "three"]);
        assert!(filter_by_tag(&entries, "absent").is_empty());
    }

    #[test]
    fn patch_keeps_absent_fields() {
        let mut target = record("hello", &["intro"]);
        let patch = PostPatch {
            title: Some("Changed".into()),
            ..PostPatch::default()
        };

        patch.apply_to(&mut target);

        assert_eq!(target.title.as_deref(), Some("Changed"));
        assert_eq!(target.name.as_deref(), Some("hello"));
        assert_eq!(target.author.as_deref(), Some("A"));
        assert_eq!(target.tags, Some(vec!["intro".to_string()]));
        assert_eq!(target.link.as_deref(), Some("/blog/posts/hello"));
    }

    #[test]
    fn patch_rename_recomputes_link() {
        let mut target = record("hello", &[]);
        PostPatch {
            new_name: Some("hi".into()),
            ..PostPatch::default()
        }
        .apply_to(&mut target);

        assert_eq!(target.name.as_deref(), Some("hi"));
        assert_eq!(target.link.as_deref(), Some("/blog/posts/hi"));
    }

    #[test]
    fn incomplete_record_reports_missing_field() {
        let partial = SummaryRecord {
            name: Some("x".into()),
            title: Some("t".into()),
            ..SummaryRecord::default()
        };
        assert_eq!(
            PostSummaryEntry::try_from(&partial),
            Err(DomainError::missing_field("image"))
        );
    }

    #[test]
    fn record_serializes_stored_field_names() {
        let json = serde_json::to_value(record("hello", &["intro"])).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "name": "hello",
                "image": "/i.png",
                "link": "/blog/posts/hello",
                "title": "HELLO",
                "date": "2024-01-01",
                "author": "A",
                "description": "d",
                "tags": ["intro"],
            })
        );
    }
}
