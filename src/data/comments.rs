use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};

use super::*;

/// A comment in a thread, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique within the subject the thread belongs to.
    pub id: u64,

    pub author_name: String,

    pub content: String,

    /// When the comment was written, normalized to UTC.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: NaiveDateTime,

    #[serde(default)]
    pub parent_comment_id: Option<u64>,

    /// Direct replies. The backend nests them already; their order is not
    /// trusted and is fixed up by [`sort_thread`].
    #[serde(default, deserialize_with = "deserialize_replies")]
    pub replies: Vec<Comment>,
}

/// The comment currently chosen as the parent of a new reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTarget {
    pub id: u64,
    pub author_name: String,
}

impl From<&Comment> for ReplyTarget {
    fn from(comment: &Comment) -> Self {
        ReplyTarget {
            id: comment.id,
            author_name: comment.author_name.clone(),
        }
    }
}

/// A processed comment thread: every level sorted, every node counted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Thread {
    /// The top-level comments.
    pub comments: Vec<Comment>,

    /// Number of comments at all depths.
    pub total: usize,
}

impl Thread {
    pub fn new(mut comments: Vec<Comment>) -> Self {
        sort_thread(&mut comments);
        let total = count_comments(&comments);
        Thread { comments, total }
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Find a comment anywhere in the thread.
    pub fn find(&self, id: u64) -> Option<&Comment> {
        fn find_in(comments: &[Comment], id: u64) -> Option<&Comment> {
            comments.iter().find_map(|c| {
                if c.id == id {
                    Some(c)
                } else {
                    find_in(&c.replies, id)
                }
            })
        }

        find_in(&self.comments, id)
    }
}

/// Sort every sibling list, at every depth, by creation time ascending.
///
/// The sort is stable, so comments sharing a timestamp keep the order the
/// backend sent them in.
pub fn sort_thread(comments: &mut [Comment]) {
    comments.sort_by_key(|c| c.created_at);
    for comment in comments {
        sort_thread(&mut comment.replies);
    }
}

/// Count the comments at all depths.
pub fn count_comments(comments: &[Comment]) -> usize {
    comments
        .iter()
        .map(|c| 1 + count_comments(&c.replies))
        .sum()
}

/// Read an API timestamp. RFC 3339 with an offset is normalized to UTC;
/// naive date-times and bare dates are taken as UTC already.
pub fn parse_timestamp(raw: &str) -> DataResult<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Ok(time.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(time) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(time);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| DataError::BadTimestamp(raw.to_owned()))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_replies<'de, D>(deserializer: D) -> Result<Vec<Comment>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Comment>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: serde_json::Value) -> Vec<Comment> {
        serde_json::from_value(value).unwrap()
    }

    fn created(comments: &[Comment]) -> Vec<String> {
        comments
            .iter()
            .map(|c| c.created_at.format("%Y-%m-%d").to_string())
            .collect()
    }

    fn assert_sorted(comments: &[Comment]) {
        assert!(comments.windows(2).all(|w| w[0].created_at <= w[1].created_at));
        for comment in comments {
            assert_sorted(&comment.replies);
        }
    }

    #[test]
    fn top_level_is_sorted_ascending() {
        let thread = Thread::new(parse(json!([
            { "id": 1, "authorName": "Анна", "content": "позже", "createdAt": "2024-03-05" },
            { "id": 2, "authorName": "Борис", "content": "раньше", "createdAt": "2024-01-01" },
        ])));

        assert_eq!(created(&thread.comments), ["2024-01-01", "2024-03-05"]);
    }

    #[test]
    fn every_depth_is_sorted() {
        let thread = Thread::new(parse(json!([
            {
                "id": 1, "authorName": "a", "content": "x", "createdAt": "2024-02-01T10:00:00Z",
                "replies": [
                    {
                        "id": 3, "authorName": "c", "content": "x",
                        "createdAt": "2024-02-03T10:00:00Z", "parentCommentId": 1,
                        "replies": [
                            { "id": 6, "authorName": "f", "content": "x", "createdAt": "2024-02-09T00:00:00Z", "parentCommentId": 3 },
                            { "id": 5, "authorName": "e", "content": "x", "createdAt": "2024-02-08T00:00:00Z", "parentCommentId": 3 },
                        ]
                    },
                    { "id": 2, "authorName": "b", "content": "x", "createdAt": "2024-02-02T10:00:00Z", "parentCommentId": 1 },
                ]
            },
            { "id": 4, "authorName": "d", "content": "x", "createdAt": "2024-01-15T10:00:00Z" },
        ])));

        assert_sorted(&thread.comments);
        assert_eq!(thread.comments[0].id, 4);
        assert_eq!(thread.comments[1].replies[0].id, 2);
        assert_eq!(thread.comments[1].replies[1].replies[0].id, 5);
    }

    #[test]
    fn equal_timestamps_keep_backend_order() {
        let mut comments = parse(json!([
            { "id": 7, "authorName": "a", "content": "x", "createdAt": "2024-05-01T00:00:00Z" },
            { "id": 3, "authorName": "b", "content": "x", "createdAt": "2024-05-01T00:00:00Z" },
            { "id": 9, "authorName": "c", "content": "x", "createdAt": "2024-04-01T00:00:00Z" },
        ]));
        sort_thread(&mut comments);

        let ids: Vec<_> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, [9, 7, 3]);
    }

    #[test]
    fn counts_every_node_once() {
        let thread = Thread::new(parse(json!([
            {
                "id": 1, "authorName": "a", "content": "x", "createdAt": "2024-01-01",
                "replies": [{
                    "id": 2, "authorName": "b", "content": "x", "createdAt": "2024-01-02",
                    "replies": [
                        { "id": 3, "authorName": "c", "content": "x", "createdAt": "2024-01-03" }
                    ]
                }]
            },
            { "id": 4, "authorName": "d", "content": "x", "createdAt": "2024-01-04", "replies": [] },
        ])));

        assert_eq!(thread.total, 4);
        assert_eq!(count_comments(&[]), 0);
    }

    #[test]
    fn missing_or_null_replies_are_empty() {
        let comments = parse(json!([
            { "id": 1, "authorName": "a", "content": "x", "createdAt": "2024-01-01", "replies": null },
            { "id": 2, "authorName": "b", "content": "x", "createdAt": "2024-01-01" },
        ]));

        assert!(comments.iter().all(|c| c.replies.is_empty()));
    }

    #[test]
    fn finds_nested_comments() {
        let thread = Thread::new(parse(json!([
            {
                "id": 1, "authorName": "a", "content": "x", "createdAt": "2024-01-01",
                "replies": [{ "id": 2, "authorName": "Вера", "content": "x", "createdAt": "2024-01-02" }]
            },
        ])));

        let target = ReplyTarget::from(thread.find(2).unwrap());
        assert_eq!(target.author_name, "Вера");
        assert!(thread.find(99).is_none());
    }

    #[test]
    fn reads_supported_timestamp_shapes() {
        for raw in [
            "2024-03-05T12:00:00Z",
            "2024-03-05T12:00:00.250+00:00",
            "2024-03-05T12:00:00",
            "2024-03-05 12:00:00",
            "2024-03-05",
        ] {
            let time = parse_timestamp(raw).unwrap();
            assert_eq!(time.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), "{raw}");
        }
    }
}
