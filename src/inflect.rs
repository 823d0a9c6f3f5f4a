//! Word inflection for generated names and documentation.

/// Pluralizes, singularizes, and capitalizes English words.
///
/// Snake-cased compounds, like `issue_comment`, inflect their
/// last word only.
pub trait Inflector {
    fn pluralize(&self, word: &str) -> String;
    fn singularize(&self, word: &str) -> String;
    fn capitalize(&self, word: &str) -> String;
}

/// A rule-based English inflector that covers the vocabulary of
/// REST resource names.
#[derive(Clone, Copy, Debug, Default)]
pub struct English;

/// Words that are the same in the singular and the plural.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "feedback",
    "information",
    "metadata",
    "protection",
    "traffic",
];

/// `(singular, plural)` pairs that don't follow the suffix rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("person", "people"),
    ("cache", "caches"),
];

impl English {
    fn inflect_last(word: &str, f: impl FnOnce(&str) -> String) -> String {
        match word.rsplit_once('_') {
            Some((head, last)) => format!("{head}_{}", f(last)),
            None => f(word),
        }
    }

    fn singular_word(word: &str) -> String {
        if UNCOUNTABLE.contains(&word) {
            return word.to_owned();
        }
        if let Some(&(singular, _)) = IRREGULAR.iter().find(|&&(_, plural)| plural == word) {
            return singular.to_owned();
        }
        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return word.to_owned();
        }
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{stem}y");
        }
        for suffix in ["uses", "sses", "shes", "ches", "xes", "zes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_owned();
            }
        }
        word.strip_suffix('s').unwrap_or(word).to_owned()
    }

    fn plural_word(word: &str) -> String {
        if UNCOUNTABLE.contains(&word) || Self::singular_word(word) != word {
            return word.to_owned();
        }
        if let Some(&(_, plural)) = IRREGULAR.iter().find(|&&(singular, _)| singular == word) {
            return plural.to_owned();
        }
        if let Some(stem) = word.strip_suffix('y')
            && !stem.ends_with(['a', 'e', 'i', 'o', 'u'])
            && !stem.is_empty()
        {
            return format!("{stem}ies");
        }
        if ["s", "x", "z", "ch", "sh"]
            .iter()
            .any(|suffix| word.ends_with(suffix))
        {
            return format!("{word}es");
        }
        format!("{word}s")
    }
}

impl Inflector for English {
    fn pluralize(&self, word: &str) -> String {
        Self::inflect_last(word, Self::plural_word)
    }

    fn singularize(&self, word: &str) -> String {
        Self::inflect_last(word, Self::singular_word)
    }

    fn capitalize(&self, word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
