use crate::parser::{log_lines, user_agent};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

/// Browser name tokens in priority order.
/// Chrome user agents also contain "Safari", so Chrome has to be tested first.
pub const DEFAULT_BROWSERS: [&str; 5] = ["Firefox", "Chrome", "Opera", "Safari", "MSIE"];

/// Label for user agents that match none of the browsers.
pub const OTHER: &str = "other";

/// Reorders the default browsers so the ones in `preferred` come first, in the given order.
/// Unknown names, blanks, duplicates and "other" are dropped.
/// Browsers not mentioned keep their default relative order after the preferred ones.
pub fn priority_order<I, S>(preferred: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut order: Vec<String> = Vec::with_capacity(DEFAULT_BROWSERS.len());
    for name in preferred {
        let name = name.as_ref().trim();
        if DEFAULT_BROWSERS.contains(&name) && !order.iter().any(|b| b == name) {
            order.push(name.to_string());
        }
    }

    for browser in DEFAULT_BROWSERS {
        if !order.iter().any(|b| b == browser) {
            order.push(browser.to_string());
        }
    }

    order
}

/// Classifies user agents by looking for browser name tokens in a fixed priority order.
#[derive(Debug, Clone)]
pub struct BrowserClassifier {
    browsers: Vec<String>,
}

impl BrowserClassifier {
    /// The priority list is passed through [`priority_order`], so the classifier always knows
    /// exactly the five default browsers and the tally always has all six labels.
    pub fn new(browsers: Vec<String>) -> Self {
        Self {
            browsers: priority_order(browsers),
        }
    }

    pub fn browsers(&self) -> &[String] {
        &self.browsers
    }

    /// Index of the first browser whose name is a substring of the user agent.
    fn position(&self, user_agent: &str) -> Option<usize> {
        self.browsers.iter().position(|b| user_agent.contains(b.as_str()))
    }

    /// Returns the browser family label for a user agent.
    pub fn classify(&self, user_agent: &str) -> &str {
        match self.position(user_agent) {
            Some(idx) => &self.browsers[idx],
            None => OTHER,
        }
    }

    /// Counts browser families over all non-empty lines of the log.
    /// Lines too short to carry a user agent are counted as "other" and as malformed.
    pub fn tally(&self, log: &str) -> BrowserTally<'_> {
        let mut tally = BrowserTally::new(&self.browsers);

        for line in log_lines(log) {
            match user_agent(line) {
                Some(ua) => tally.record(self.position(ua)),
                None => {
                    debug!("No user agent in: {line}");
                    tally.malformed += 1;
                    tally.record(None);
                }
            }
        }

        tally
    }
}

impl Default for BrowserClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_BROWSERS.iter().map(|b| b.to_string()).collect())
    }
}

/// Per-browser line counts. Every browser and "other" are present even with a zero count.
/// Serializes into a JSON object in priority order with "other" last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserTally<'a> {
    browsers: &'a [String],
    counts: Vec<u64>,
    other: u64,
    /// Lines with fewer fields than needed to hold a user agent
    malformed: u64,
}

impl<'a> BrowserTally<'a> {
    fn new(browsers: &'a [String]) -> Self {
        Self {
            browsers,
            counts: vec![0; browsers.len()],
            other: 0,
            malformed: 0,
        }
    }

    fn record(&mut self, position: Option<usize>) {
        match position {
            Some(idx) => self.counts[idx] += 1,
            None => self.other += 1,
        }
    }

    /// Count for a browser label or "other". `None` for unknown labels.
    pub fn get(&self, label: &str) -> Option<u64> {
        if label == OTHER {
            return Some(self.other);
        }
        self.browsers
            .iter()
            .position(|b| b == label)
            .map(|idx| self.counts[idx])
    }

    /// Number of lines counted, which is the sum of all labels.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum::<u64>() + self.other
    }

    pub fn malformed(&self) -> u64 {
        self.malformed
    }
}

impl Serialize for BrowserTally<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.browsers.len() + 1))?;
        for (browser, count) in self.browsers.iter().zip(&self.counts) {
            map.serialize_entry(browser, count)?;
        }
        map.serialize_entry(OTHER, &self.other)?;
        map.end()
    }
}
