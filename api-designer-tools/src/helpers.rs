use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub(crate) trait StringExt {
    fn push_line(&mut self, indent: usize, line: impl AsRef<str>);
}

impl StringExt for String {
    fn push_line(&mut self, indent: usize, line: impl AsRef<str>) {
        for _ in 0..indent {
            self.push_str("    ");
        }
        self.push_str(line.as_ref());
        self.push('\n');
    }
}

/// Converts a `snake_case` name to `PascalCase`.
///
/// Each underscore delimited segment gets its first character uppercased and the
/// underscores are dropped. The rest of each segment is left alone, so `userId`
/// becomes `UserId` and `order_items` becomes `OrderItems`.
pub fn to_pascal_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());

    for segment in name.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }

    result
}

/// Removes all whitespace from a display name, so it can be used as part of an identifier.
pub(crate) fn strip_whitespace(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub(crate) fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Parses an RFC 3339 timestamp as stored by older versions of the store.
pub(crate) fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(value, &Rfc3339).ok()
}
