//! Keyword vocabularies for snippet languages.

use nested_steps_patterns::StepKeyword;

/// Step keywords of one natural language.
#[derive(Debug, PartialEq, Eq)]
pub struct Dialect {
    code: &'static str,
    keywords: &'static [(&'static str, StepKeyword)],
    spaced: bool,
}

const ENGLISH: Dialect = Dialect {
    code: "en",
    keywords: &[
        ("Given", StepKeyword::Given),
        ("When", StepKeyword::When),
        ("Then", StepKeyword::Then),
        ("And", StepKeyword::And),
        ("But", StepKeyword::But),
    ],
    spaced: true,
};

const FRENCH: Dialect = Dialect {
    code: "fr",
    keywords: &[
        ("Soit", StepKeyword::Given),
        ("Sachant que", StepKeyword::Given),
        ("Sachant qu'", StepKeyword::Given),
        ("Sachant", StepKeyword::Given),
        ("Etant donné que", StepKeyword::Given),
        ("Etant donné qu'", StepKeyword::Given),
        ("Etant donné", StepKeyword::Given),
        ("Étant donné que", StepKeyword::Given),
        ("Étant donné qu'", StepKeyword::Given),
        ("Étant donné", StepKeyword::Given),
        ("Quand", StepKeyword::When),
        ("Lorsque", StepKeyword::When),
        ("Lorsqu'", StepKeyword::When),
        ("Alors", StepKeyword::Then),
        ("Donc", StepKeyword::Then),
        ("Et que", StepKeyword::And),
        ("Et qu'", StepKeyword::And),
        ("Et", StepKeyword::And),
        ("Mais que", StepKeyword::But),
        ("Mais qu'", StepKeyword::But),
        ("Mais", StepKeyword::But),
    ],
    spaced: true,
};

const GERMAN: Dialect = Dialect {
    code: "de",
    keywords: &[
        ("Angenommen", StepKeyword::Given),
        ("Gegeben sei", StepKeyword::Given),
        ("Gegeben seien", StepKeyword::Given),
        ("Wenn", StepKeyword::When),
        ("Dann", StepKeyword::Then),
        ("Und", StepKeyword::And),
        ("Aber", StepKeyword::But),
    ],
    spaced: true,
};

const SPANISH: Dialect = Dialect {
    code: "es",
    keywords: &[
        ("Dado", StepKeyword::Given),
        ("Dada", StepKeyword::Given),
        ("Dados", StepKeyword::Given),
        ("Dadas", StepKeyword::Given),
        ("Cuando", StepKeyword::When),
        ("Entonces", StepKeyword::Then),
        ("Y", StepKeyword::And),
        ("E", StepKeyword::And),
        ("Pero", StepKeyword::But),
    ],
    spaced: true,
};

const JAPANESE: Dialect = Dialect {
    code: "ja",
    keywords: &[
        ("前提", StepKeyword::Given),
        ("もし", StepKeyword::When),
        ("ならば", StepKeyword::Then),
        ("かつ", StepKeyword::And),
        ("しかし", StepKeyword::But),
        ("但し", StepKeyword::But),
        ("ただし", StepKeyword::But),
    ],
    spaced: false,
};

static DIALECTS: [&Dialect; 5] = [&ENGLISH, &FRENCH, &GERMAN, &SPANISH, &JAPANESE];

impl Dialect {
    /// The English dialect.
    #[must_use]
    pub const fn english() -> &'static Self {
        &ENGLISH
    }

    /// Look up a dialect by language code such as `fr` or `en-GB`.
    ///
    /// Region subtags are ignored.
    ///
    /// # Examples
    /// ```
    /// use nested_steps::Dialect;
    ///
    /// assert_eq!(Dialect::for_language("de").map(Dialect::code), Some("de"));
    /// assert_eq!(Dialect::for_language("en-GB").map(Dialect::code), Some("en"));
    /// assert!(Dialect::for_language("tlh").is_none());
    /// ```
    #[must_use]
    pub fn for_language(code: &str) -> Option<&'static Self> {
        let primary = code.split(['-', '_']).next().unwrap_or(code).trim();
        DIALECTS
            .iter()
            .copied()
            .find(|dialect| dialect.code.eq_ignore_ascii_case(primary))
    }

    /// Primary language code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Split a step line into its keyword and the remaining text.
    ///
    /// The longest keyword wins. `*` is accepted in every dialect. A keyword
    /// ending in a letter must be followed by whitespace in languages that
    /// separate words with spaces.
    pub(crate) fn split_keyword<'l>(&self, line: &'l str) -> Option<(StepKeyword, &'l str)> {
        let star = ("*", StepKeyword::And);
        self.keywords
            .iter()
            .chain(std::iter::once(&star))
            .filter_map(|&(word, keyword)| {
                let rest = line.strip_prefix(word)?;
                let needs_space = self.spaced && word.ends_with(char::is_alphabetic);
                if needs_space && !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                    return None;
                }
                Some((word.len(), keyword, rest))
            })
            .max_by_key(|&(len, _, _)| len)
            .map(|(_, keyword, rest)| (keyword, rest))
    }
}
