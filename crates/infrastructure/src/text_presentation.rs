use std::cmp::Ordering;

use icu_collator::{Collator as IcuCollator, CollatorOptions};
use icu_locid::Locale;
use icu_provider::DataLocale;

use cohortrole_application::{Collator, TextFormatter};
use cohortrole_core::{AppError, AppResult};

/// Formatter that strips markup and normalizes whitespace in stored names.
///
/// Only `<` followed by a letter, `/` or `!` with a later `>` opens a tag;
/// any other `<` is kept as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilteringTextFormatter;

impl TextFormatter for FilteringTextFormatter {
    fn format_string(&self, raw: &str) -> String {
        let mut text = String::with_capacity(raw.len());
        let mut rest = raw;

        while let Some(start) = rest.find('<') {
            text.push_str(&rest[..start]);
            let candidate = &rest[start..];
            match tag_length(candidate) {
                Some(length) => {
                    text.push(' ');
                    rest = &candidate[length..];
                }
                None => {
                    text.push('<');
                    rest = &candidate[1..];
                }
            }
        }
        text.push_str(rest);

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Byte length of the tag `text` starts with, if it starts with one.
fn tag_length(text: &str) -> Option<usize> {
    let opens_tag = text
        .strip_prefix('<')?
        .chars()
        .next()
        .is_some_and(|next| next.is_ascii_alphabetic() || next == '/' || next == '!');
    if !opens_tag {
        return None;
    }

    text.find('>').map(|end| end + 1)
}

/// Unicode collation for the configured interface language.
pub struct LocaleCollator {
    language: String,
    collator: IcuCollator,
}

impl LocaleCollator {
    /// Loads collation data for a language code such as `en` or `de`.
    pub fn for_language(code: &str) -> AppResult<Self> {
        let language = code.trim().to_ascii_lowercase();
        let locale: Locale = language.parse().map_err(|error| {
            AppError::Validation(format!("invalid collation language '{language}': {error}"))
        })?;
        let collator = IcuCollator::try_new(&DataLocale::from(&locale), CollatorOptions::new())
            .map_err(|error| {
                AppError::Internal(format!(
                    "collation data for '{language}' is unavailable: {error}"
                ))
            })?;

        Ok(Self { language, collator })
    }

    /// Language the collation data was loaded for.
    #[must_use]
    pub fn language(&self) -> &str {
        self.language.as_str()
    }
}

impl Collator for LocaleCollator {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        self.collator.compare(left, right)
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use cohortrole_application::{Collator, TextFormatter};

    use super::{FilteringTextFormatter, LocaleCollator};

    fn collator(language: &str) -> LocaleCollator {
        match LocaleCollator::for_language(language) {
            Ok(collator) => collator,
            Err(error) => panic!("collator for '{language}' should load: {error}"),
        }
    }

    #[test]
    fn markup_is_removed_and_whitespace_collapsed() {
        let formatter = FilteringTextFormatter;

        assert_eq!(
            formatter.format_string("  <span lang=\"en\">Science</span>\n Faculty "),
            "Science Faculty"
        );
        assert_eq!(formatter.format_string("<!-- x -->Arts"), "Arts");
    }

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(FilteringTextFormatter.format_string("A > B"), "A > B");
    }

    #[test]
    fn less_than_sign_outside_markup_is_kept() {
        let formatter = FilteringTextFormatter;

        assert_eq!(
            formatter.format_string("Grades < 5 students"),
            "Grades < 5 students"
        );
        assert_eq!(formatter.format_string("Year<2 <b>only"), "Year<2 only");
        assert_eq!(formatter.format_string("a <b without end"), "a <b without end");
    }

    #[test]
    fn umlauts_sort_with_their_base_letter() {
        for language in ["de", "en"] {
            let collator = collator(language);

            assert_eq!(collator.compare("Ärzte", "Zahnmedizin"), Ordering::Less);
            assert_eq!(collator.compare("Öffentlichkeit", "Physik"), Ordering::Less);
        }
    }

    #[test]
    fn ordering_groups_case_variants() {
        let collator = collator("en");
        let mut names = vec!["beta", "Alpha", "Zoology", "alpha", "Ärzte", "Gamma"];
        names.sort_by(|left, right| collator.compare(left, right));

        assert_eq!(names, vec!["alpha", "Alpha", "Ärzte", "beta", "Gamma", "Zoology"]);
        assert_eq!(collator.compare("x", "x"), Ordering::Equal);
    }

    #[test]
    fn language_code_is_normalized_and_validated() {
        assert_eq!(collator(" DE ").language(), "de");
        assert!(LocaleCollator::for_language("not a language").is_err());
    }
}
