use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Source shown in the editor when the page first loads
pub const INITIAL_SOURCE: &str = "// Manual preview snippet
const root = document.getElementById('root');
if (root) root.innerHTML = '<div style=\"padding:16px;font-family:system-ui,Arial\"><h3>Manual preview</h3><p>Edit the code or press a test button.</p></div>';";

const COUNTER_SOURCE: &str = "const root = document.getElementById('root');
if (root) root.innerHTML = '<div style=\"padding:12px;font-family:system-ui,Arial\"><h3>Example: Counter</h3><div id=\"counter\">Count: 0</div><button id=\"inc\">Inc</button></div>';
let n = 0; const btn = document.getElementById('inc'); if (btn) btn.addEventListener('click', () => { n++; const c = document.getElementById('counter'); if (c) c.textContent = 'Count: ' + n; });";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown fixture '{0}'")]
pub struct UnknownFixture(pub String);

/// Canned test payloads exercising the classifier and pre-check edge cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fixture {
    /// Starts with `/` but is not a valid regex literal statement
    LeadingSlash,
    /// A statement that begins with a valid regex literal
    RegexLiteral,
    /// Markup that contains a literal closing script tag
    ContainsScript,
    /// Template literals with an embedded substitution
    Backticks,
    /// Non-BMP characters in a string literal
    LongUnicode,
    /// The counter example
    Normal,
    /// Fallback for unknown ids, same payload as `Normal`
    Default,
}

impl Fixture {
    pub const ALL: [Fixture; 7] = [
        Fixture::LeadingSlash,
        Fixture::RegexLiteral,
        Fixture::ContainsScript,
        Fixture::Backticks,
        Fixture::LongUnicode,
        Fixture::Normal,
        Fixture::Default,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Fixture::LeadingSlash => "leading-slash",
            Fixture::RegexLiteral => "regex-literal",
            Fixture::ContainsScript => "contains-script",
            Fixture::Backticks => "backticks",
            Fixture::LongUnicode => "long-unicode",
            Fixture::Normal => "normal",
            Fixture::Default => "default",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Fixture::LeadingSlash => "Leading slash that does not form a valid regex",
            Fixture::RegexLiteral => "Statement using a regex literal",
            Fixture::ContainsScript => "HTML fragment containing </script>",
            Fixture::Backticks => "Template literals with nested substitution",
            Fixture::LongUnicode => "Emoji in a string literal",
            Fixture::Normal => "Counter example",
            Fixture::Default => "Counter example",
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Fixture::LeadingSlash => "/this/is/not/valid/js();",
            Fixture::RegexLiteral => {
                "const r = /abc/i; document.getElementById('root').innerText = String(r.test('abc'));"
            }
            Fixture::ContainsScript => {
                "<div>Fragment with </script> inside, should be handled as HTML fragment</div>"
            }
            Fixture::Backticks => {
                "const name = `User`; document.getElementById('root').innerHTML = `<p>Hello ${'${name}'}</p>`;"
            }
            Fixture::LongUnicode => {
                "document.getElementById('root').innerText = \"Unicode: \u{1F600}\";"
            }
            Fixture::Normal | Fixture::Default => COUNTER_SOURCE,
        }
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Fixture {
    type Err = UnknownFixture;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fixture::ALL
            .iter()
            .copied()
            .find(|fixture| fixture.id() == s)
            .ok_or_else(|| UnknownFixture(s.to_string()))
    }
}

/// Look up a fixture by id; unknown ids get the default payload
pub fn load_fixture(id: &str) -> Fixture {
    id.parse().unwrap_or(Fixture::Default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{classify, ContentKind};

    #[test]
    fn test_ids_round_trip() {
        for fixture in Fixture::ALL {
            assert_eq!(fixture.id().parse::<Fixture>(), Ok(fixture));
        }
    }

    #[test]
    fn test_unknown_id_falls_back_to_default() {
        assert_eq!(load_fixture("nope"), Fixture::Default);
        assert_eq!(load_fixture(""), Fixture::Default);
        assert_eq!(load_fixture("nope").source(), Fixture::Normal.source());
    }

    #[test]
    fn test_unknown_id_parse_error() {
        let err = "Backticks".parse::<Fixture>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown fixture 'Backticks'");
    }

    #[test]
    fn test_classification_of_fixtures() {
        assert_eq!(classify(Fixture::ContainsScript.source()), ContentKind::HtmlFragment);
        for fixture in [
            Fixture::LeadingSlash,
            Fixture::RegexLiteral,
            Fixture::Backticks,
            Fixture::LongUnicode,
            Fixture::Normal,
        ] {
            assert_eq!(classify(fixture.source()), ContentKind::ScriptSource, "{}", fixture);
        }
    }

    #[test]
    fn test_backticks_keeps_nested_substitution() {
        assert!(Fixture::Backticks.source().contains("${'${name}'}"));
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Fixture::LongUnicode).unwrap();
        assert_eq!(json, "\"long-unicode\"");
    }
}
