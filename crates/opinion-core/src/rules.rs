//! Ordered Rule Sets
//!
//! Keyword classification as an ordered list of `(predicate, category)` rules.
//! Rules are evaluated in registration order and the first match wins, so
//! precedence is explicit in how a set is built.

/// Predicate over a classification input
pub type Predicate<I> = Box<dyn Fn(&I) -> bool + Send + Sync>;

/// A single named rule
pub struct Rule<I: ?Sized, C> {
    /// Identifier used in logs
    pub name: &'static str,

    /// Category returned when the predicate holds
    pub category: C,

    predicate: Predicate<I>,
}

impl<I: ?Sized, C> Rule<I, C> {
    pub fn matches(&self, input: &I) -> bool {
        (self.predicate)(input)
    }
}

/// First-match rule set with a fallback category
pub struct RuleSet<I: ?Sized, C> {
    rules: Vec<Rule<I, C>>,
    fallback: C,
}

impl<I: ?Sized, C: Clone> RuleSet<I, C> {
    pub fn new(fallback: C) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Append a rule (builder style); later rules have lower priority
    pub fn rule<F>(mut self, name: &'static str, category: C, predicate: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        self.push(name, category, predicate);
        self
    }

    /// Append a rule
    pub fn push<F>(&mut self, name: &'static str, category: C, predicate: F)
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            name,
            category,
            predicate: Box::new(predicate),
        });
    }

    /// First matching rule, if any
    pub fn first_match(&self, input: &I) -> Option<&Rule<I, C>> {
        self.rules.iter().find(|rule| rule.matches(input))
    }

    /// Category of the first matching rule, or the fallback
    pub fn classify(&self, input: &I) -> C {
        match self.first_match(input) {
            Some(rule) => {
                tracing::trace!(rule = rule.name, "Rule matched");
                rule.category.clone()
            }
            None => self.fallback.clone(),
        }
    }
}

/// True when `haystack` contains any of `needles`
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> RuleSet<str, &'static str> {
        RuleSet::new("none")
            .rule("red", "RED", |s: &str| s.contains("red"))
            .rule("reddish", "PINK", |s: &str| s.contains("redd"))
            .rule("blue", "BLUE", |s: &str| contains_any(s, &["blue", "navy"]))
    }

    #[test]
    fn test_first_match_wins() {
        let set = colors();
        // "reddish" satisfies both red rules; the earlier one wins
        assert_eq!(set.classify("reddish"), "RED");
        assert_eq!(set.classify("navy coat"), "BLUE");
        assert_eq!(set.first_match("reddish").map(|r| r.name), Some("red"));
    }

    #[test]
    fn test_fallback() {
        let set = colors();
        assert_eq!(set.classify("green"), "none");
        assert!(set.first_match("").is_none());
    }
}
