//! Building chaining URLs for a sequence of hops.

use url::Url;

use crate::relay::orchestrator::CALL_PARAM;

/// Nest `hops` so that each hop calls the next one.
///
/// `[a, b, c]` becomes `a?call=<b?call=<c>>`. Returns `None` for an empty
/// list. Existing query parameters of a hop are kept.
pub fn chain_url(hops: &[Url]) -> Option<Url> {
    let (last, rest) = hops.split_last()?;

    let url = rest.iter().rev().fold(last.clone(), |inner, hop| {
        let mut outer = hop.clone();
        outer.query_pairs_mut().append_pair(CALL_PARAM, inner.as_str());
        outer
    });
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::orchestrator::call_target;

    fn urls(items: &[&str]) -> Vec<Url> {
        items.iter().map(|s| Url::parse(s).unwrap()).collect()
    }

    #[test]
    fn test_empty_and_single() {
        assert!(chain_url(&[]).is_none());
        let single = chain_url(&urls(&["http://a:8080/"])).unwrap();
        assert_eq!(single.as_str(), "http://a:8080/");
    }

    #[test]
    fn test_two_hops() {
        let url = chain_url(&urls(&["http://a:8080/", "http://b:8081/"])).unwrap();
        assert_eq!(url.as_str(), "http://a:8080/?call=http%3A%2F%2Fb%3A8081%2F");
    }

    #[test]
    fn test_each_hop_unwraps_the_next() {
        let url = chain_url(&urls(&["http://a/", "http://b/", "http://c/"])).unwrap();

        let at_a = format!("{}?{}", url.path(), url.query().unwrap());
        let b = call_target(&at_a).unwrap();
        let b = Url::parse(&b).unwrap();
        assert_eq!(b.host_str(), Some("b"));

        let at_b = format!("{}?{}", b.path(), b.query().unwrap());
        assert_eq!(call_target(&at_b).as_deref(), Some("http://c/"));
    }
}
