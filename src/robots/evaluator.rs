//! Exclusion-policy document parsing
//!
//! Deliberately NOT a general robots.txt matcher. The policy document is
//! reduced to one question: does any section that applies to this crawler
//! disallow the site root? A root block (`Disallow: /` or `Disallow: /*`)
//! denies the whole run; every other Disallow pattern is recorded but not
//! enforced. Path-prefix matching is out of scope on purpose.

/// One recorded rule: the section's agent pattern and a disallowed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    /// Lowercased user-agent pattern of the section the rule came from
    pub agent_pattern: String,
    /// The disallowed path exactly as written in the document
    pub disallowed: String,
}

/// The disallow rules collected from sections that apply to this crawler
///
/// Built once from the fetched policy document, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRuleSet {
    rules: Vec<ExclusionRule>,
}

impl ExclusionRuleSet {
    /// Parses a policy document, keeping rules from in-scope sections only
    ///
    /// A `User-agent:` line opens a section and closes the previous one. The
    /// section is in scope if its value contains the wildcard `*`, the
    /// generic substring `bot`, or the crawler's own identity, compared
    /// case-insensitively. `Disallow:` lines are recorded only while a
    /// section is in scope; blank lines and `#` comments are skipped.
    pub fn parse(document: &str, identity: &str) -> Self {
        let identity = identity.to_lowercase();
        let mut rules = Vec::new();
        let mut in_scope = false;
        let mut current_agent = String::new();

        for line in document.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    let agent = value.to_lowercase();
                    in_scope = agent.contains('*')
                        || agent.contains("bot")
                        || agent.contains(&identity);
                    current_agent = agent;
                }
                "disallow" if in_scope && !value.is_empty() => {
                    rules.push(ExclusionRule {
                        agent_pattern: current_agent.clone(),
                        disallowed: value.to_string(),
                    });
                }
                _ => {}
            }
        }

        Self { rules }
    }

    /// True if any applicable rule disallows the site root
    ///
    /// Only `/` and `/*` count; a rule like `Disallow: /private` does not
    /// gate the run.
    pub fn blocks_root(&self) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.disallowed == "/" || rule.disallowed == "/*")
    }

    /// The collected rules, in document order
    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: &str = "tidepool";

    #[test]
    fn test_root_disallow_blocks() {
        let doc = "User-agent: *\nDisallow: /";
        assert!(ExclusionRuleSet::parse(doc, IDENTITY).blocks_root());
    }

    #[test]
    fn test_root_wildcard_disallow_blocks() {
        let doc = "User-agent: *\nDisallow: /*";
        assert!(ExclusionRuleSet::parse(doc, IDENTITY).blocks_root());
    }

    #[test]
    fn test_specific_path_does_not_block() {
        let doc = "User-agent: *\nDisallow: /private";
        let rules = ExclusionRuleSet::parse(doc, IDENTITY);
        assert!(!rules.blocks_root());
        // The rule is still recorded, just not enforced
        assert_eq!(rules.rules().len(), 1);
        assert_eq!(rules.rules()[0].disallowed, "/private");
    }

    #[test]
    fn test_empty_document_allows() {
        assert!(!ExclusionRuleSet::parse("", IDENTITY).blocks_root());
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let doc = "# full block below\n\nUser-agent: *\n# really\nDisallow: /";
        assert!(ExclusionRuleSet::parse(doc, IDENTITY).blocks_root());
    }

    #[test]
    fn test_section_for_other_agent_ignored() {
        let doc = "User-agent: SpecificCrawler\nDisallow: /";
        assert!(!ExclusionRuleSet::parse(doc, IDENTITY).blocks_root());
    }

    #[test]
    fn test_section_matching_identity_substring() {
        let doc = "User-agent: Tidepool-Mirror\nDisallow: /";
        assert!(ExclusionRuleSet::parse(doc, IDENTITY).blocks_root());
    }

    #[test]
    fn test_section_matching_generic_bot() {
        let doc = "User-agent: Googlebot\nDisallow: /";
        assert!(ExclusionRuleSet::parse(doc, IDENTITY).blocks_root());
    }

    #[test]
    fn test_new_section_closes_scope() {
        // The root disallow sits in a section that does not apply to us
        let doc = "User-agent: *\nDisallow: /tmp\nUser-agent: OtherCrawler\nDisallow: /";
        assert!(!ExclusionRuleSet::parse(doc, IDENTITY).blocks_root());
    }

    #[test]
    fn test_case_insensitive_directives() {
        let doc = "USER-AGENT: *\nDISALLOW: /";
        assert!(ExclusionRuleSet::parse(doc, IDENTITY).blocks_root());
    }

    #[test]
    fn test_empty_disallow_value_ignored() {
        let doc = "User-agent: *\nDisallow:";
        let rules = ExclusionRuleSet::parse(doc, IDENTITY);
        assert!(rules.rules().is_empty());
        assert!(!rules.blocks_root());
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let doc = "this line has no colon\nUser-agent: *\nDisallow: /";
        assert!(ExclusionRuleSet::parse(doc, IDENTITY).blocks_root());
    }

    #[test]
    fn test_rules_keep_section_pattern() {
        let doc = "User-agent: *\nDisallow: /a\nUser-agent: somebot\nDisallow: /b";
        let rules = ExclusionRuleSet::parse(doc, IDENTITY);
        assert_eq!(rules.rules().len(), 2);
        assert_eq!(rules.rules()[0].agent_pattern, "*");
        assert_eq!(rules.rules()[1].agent_pattern, "somebot");
    }
}
