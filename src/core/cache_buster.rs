//! Cache-busting URL decorator.
//!
//! Appends `_t=<random f64>` so browser, CDN and proxy caches see every
//! request as a new URL. The value comes from the process-wide thread RNG and
//! is not meant to be unpredictable.

/// 附加在 URL 上的查詢參數名稱
pub const CACHE_BUST_PARAM: &str = "_t";

pub fn bust_cache(url: &str) -> String {
    bust_cache_with(url, rand::random::<f64>())
}

/// 以指定值附加 `_t`；已有查詢字串時改用 `&`，fragment 保持在最後
pub fn bust_cache_with(url: &str, value: f64) -> String {
    let (base, fragment) = match url.find('#') {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    };

    let separator = if !base.contains('?') {
        "?"
    } else if base.ends_with('?') || base.ends_with('&') {
        ""
    } else {
        "&"
    };

    format!(
        "{}{}{}={}{}",
        base, separator, CACHE_BUST_PARAM, value, fragment
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use url::Url;

    fn bust_value(busted: &str) -> Option<String> {
        let parsed = Url::parse(busted)
            .or_else(|_| Url::parse("http://localhost/").and_then(|base| base.join(busted)))
            .ok()?;
        parsed
            .query_pairs()
            .find(|(k, _)| k == CACHE_BUST_PARAM)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_appends_t_parameter() {
        for url in [
            "/cgi-bin/videolist.sh",
            "http://teslausb/log.txt",
            "diagnostics.txt",
            "/cgi-bin/status.sh?verbose=1",
        ] {
            let busted = bust_cache(url);
            let value = bust_value(&busted).expect("missing _t parameter");
            let parsed: f64 = value.parse().unwrap();
            assert!((0.0..1.0).contains(&parsed), "{} out of range", parsed);
        }
    }

    #[test]
    fn test_successive_calls_differ() {
        let samples: HashSet<String> = (0..200).map(|_| bust_cache("/status.txt")).collect();
        // 偶發碰撞可以容忍，但不該大量重複
        assert!(samples.len() >= 199);
    }

    #[test]
    fn test_plain_url_uses_question_mark() {
        assert_eq!(bust_cache_with("/a.txt", 0.5), "/a.txt?_t=0.5");
    }

    #[test]
    fn test_existing_query_uses_ampersand() {
        let busted = bust_cache_with("/cgi-bin/x.sh?file=a", 0.25);
        assert_eq!(busted, "/cgi-bin/x.sh?file=a&_t=0.25");
        assert_eq!(busted.matches('?').count(), 1);

        assert_eq!(bust_cache_with("/x?", 0.25), "/x?_t=0.25");
        assert_eq!(bust_cache_with("/x?a=1&", 0.25), "/x?a=1&_t=0.25");
    }

    #[test]
    fn test_fragment_stays_last() {
        assert_eq!(
            bust_cache_with("/index.html#videos", 0.75),
            "/index.html?_t=0.75#videos"
        );
        assert_eq!(
            bust_cache_with("/index.html?a=1#videos", 0.75),
            "/index.html?a=1&_t=0.75#videos"
        );
    }

    #[test]
    fn test_value_uses_plain_decimal_form() {
        assert_eq!(bust_cache_with("/x", 0.0), "/x?_t=0");
        assert_eq!(bust_cache_with("/x", 0.123456789), "/x?_t=0.123456789");
    }
}
