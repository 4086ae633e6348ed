//! Request cookie parsing and re-serialization.

/// Cookies of a single request, grouped by name.
///
/// Names keep the order of their first appearance; values of a repeated name
/// keep the order in which they appeared in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    entries: Vec<(String, Vec<String>)>,
}

impl CookieJar {
    /// Create an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`.
    pub fn add(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, values)) => values.push(value.to_string()),
            None => self
                .entries
                .push((name.to_string(), vec![value.to_string()])),
        }
    }

    /// Replace every value of `name` with `value`, keeping its position.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, values)) => *values = vec![value.to_string()],
            None => self
                .entries
                .push((name.to_string(), vec![value.to_string()])),
        }
    }

    /// All values recorded for `name`, in order.
    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// First value recorded for `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get_all(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Whether the jar holds no cookies at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cookie names in first-appearance order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Serialize every cookie except `excluded` as a `Cookie` header value.
    ///
    /// Returns `None` when nothing is left to send.
    pub fn to_header_without(&self, excluded: &str) -> Option<String> {
        self.serialize(|name| name != excluded)
    }

    /// Serialize every cookie as a `Cookie` header value.
    pub fn to_header(&self) -> Option<String> {
        self.serialize(|_| true)
    }

    fn serialize<F>(&self, keep: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        let pairs: Vec<String> = self
            .entries
            .iter()
            .filter(|(name, _)| keep(name))
            .flat_map(|(name, values)| values.iter().map(move |v| format!("{}={}", name, v)))
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }
}

/// Parse a raw `Cookie` header.
///
/// Returns `None` when the header is absent. Pairs are split on the first
/// `=`; a pair without `=` is kept with an empty value, blank segments are
/// skipped.
pub fn parse(header: Option<&str>) -> Option<CookieJar> {
    let header = header?;
    let mut jar = CookieJar::new();

    for pair in header.split(';').map(str::trim) {
        if pair.is_empty() {
            continue;
        }
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        jar.add(name, value);
    }

    Some(jar)
}

/// Remove `excluded` from the jar and serialize what remains.
///
/// Returns `None` when the jar is absent or nothing remains.
pub fn strip_and_serialize(jar: Option<&CookieJar>, excluded: &str) -> Option<String> {
    jar?.to_header_without(excluded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absent_header() {
        assert!(parse(None).is_none());
    }

    #[test]
    fn test_parse_groups_repeated_names() {
        let jar = parse(Some("a=1; b=2;a=3")).unwrap();
        assert_eq!(jar.get_all("a").unwrap(), ["1", "3"]);
        assert_eq!(jar.first("b"), Some("2"));
        assert_eq!(jar.names().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let jar = parse(Some("token=abc==; flag")).unwrap();
        assert_eq!(jar.first("token"), Some("abc=="));
        assert_eq!(jar.first("flag"), Some(""));
    }

    #[test]
    fn test_parse_skips_blank_segments() {
        let jar = parse(Some(" ; a=1 ;; ")).unwrap();
        assert_eq!(jar.names().collect::<Vec<_>>(), ["a"]);
        assert!(parse(Some("")).unwrap().is_empty());
    }

    #[test]
    fn test_strip_removes_only_excluded_name() {
        let jar = parse(Some("SESSION_ID_SERVICE_A=x; foo=bar")).unwrap();
        assert_eq!(
            strip_and_serialize(Some(&jar), "SESSION_ID_SERVICE_A").as_deref(),
            Some("foo=bar")
        );
    }

    #[test]
    fn test_strip_is_name_exact() {
        let jar = parse(Some("SESSION_ID_SERVICE_A=x; SESSION_ID_SERVICE_AB=y")).unwrap();
        assert_eq!(
            strip_and_serialize(Some(&jar), "SESSION_ID_SERVICE_A").as_deref(),
            Some("SESSION_ID_SERVICE_AB=y")
        );
    }

    #[test]
    fn test_strip_returns_none_when_nothing_left() {
        let jar = parse(Some("SESSION_ID_SERVICE_A=x")).unwrap();
        assert!(strip_and_serialize(Some(&jar), "SESSION_ID_SERVICE_A").is_none());
        assert!(strip_and_serialize(None, "SESSION_ID_SERVICE_A").is_none());
        assert!(strip_and_serialize(Some(&CookieJar::new()), "x").is_none());
    }

    #[test]
    fn test_parse_then_serialize_keeps_pairs() {
        let header = "a=1; b=hello world; c=x=y; d=";
        let jar = parse(Some(header)).unwrap();
        assert_eq!(strip_and_serialize(Some(&jar), "zzz").as_deref(), Some(header));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut jar = parse(Some("a=1; b=2; a=3")).unwrap();
        jar.set("a", "9");
        jar.set("c", "4");
        assert_eq!(jar.to_header_without("b").as_deref(), Some("a=9; c=4"));
    }

    #[test]
    fn test_repeated_values_serialize_under_first_position() {
        let jar = parse(Some("a=1; b=2; a=3")).unwrap();
        assert_eq!(jar.to_header_without("zzz").as_deref(), Some("a=1; a=3; b=2"));
    }
}
